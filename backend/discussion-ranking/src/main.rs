/// Offline ranking of a JSON data snapshot
///
/// Reproduces the story listing order or a comment thread order from facts
/// exported by the platform, printing the result with its score breakdown.
///
/// Usage:
/// ```bash
/// cargo run --bin rank-snapshot -- stories <file.json> [OPTIONS]
/// cargo run --bin rank-snapshot -- thread <file.json>
/// ```
///
/// Options (stories):
/// - `--window-seconds <N>`: Override RANKING_HOTNESS_WINDOW_SECONDS
/// - `--hidden <id,id,...>`: Stories the viewer has hidden
/// - `--visible-only`: Drop negative-score and hidden stories
use anyhow::{Context, Result};
use discussion_ranking::models::StoryId;
use discussion_ranking::{
    build_comment_tree, snapshot, visible_stories, HotnessWindow, RankingConfig, StoryRanker,
};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug)]
enum Command {
    Stories(StoriesArgs),
    Thread { path: PathBuf },
}

#[derive(Debug, Default)]
struct StoriesArgs {
    path: PathBuf,
    window_seconds: Option<f64>,
    hidden: HashSet<StoryId>,
    visible_only: bool,
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for the JSON result
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let command = parse_args(std::env::args().skip(1).collect())?;
    let config = RankingConfig::from_env().context("Failed to load ranking config")?;

    info!(
        window_seconds = config.hotness_window_seconds,
        edit_window_seconds = config.comment_edit_window_seconds,
        max_depth = config.comment_max_depth,
        "Ranking config loaded"
    );

    let output = match command {
        Command::Stories(args) => rank_story_snapshot(args, &config)?,
        Command::Thread { path } => rank_thread_snapshot(path, &config)?,
    };

    println!("{}", output);
    Ok(())
}

fn rank_story_snapshot(args: StoriesArgs, config: &RankingConfig) -> Result<String> {
    let window = match args.window_seconds {
        Some(seconds) => HotnessWindow::new(seconds)
            .with_context(|| format!("Invalid --window-seconds: {}", seconds))?,
        None => config.hotness_window(),
    };

    let snapshot = snapshot::load_stories(&args.path)?;
    info!(
        story_count = snapshot.stories.len(),
        path = %args.path.display(),
        "Story snapshot loaded"
    );

    let mut ranked = StoryRanker::new(window).rank(snapshot.stories);
    if args.visible_only {
        ranked = visible_stories(ranked, &args.hidden);
    }

    serde_json::to_string_pretty(&ranked).context("Failed to serialize ranked stories")
}

fn rank_thread_snapshot(path: PathBuf, config: &RankingConfig) -> Result<String> {
    let thread = snapshot::load_thread(&path)?;
    info!(
        row_count = thread.rows.len(),
        path = %path.display(),
        "Thread snapshot loaded"
    );

    let ctx = thread.context(chrono::Utc::now(), config.thread_policy());
    let forest = build_comment_tree(&thread.rows, &ctx);

    serde_json::to_string_pretty(&forest).context("Failed to serialize comment tree")
}

fn parse_args(args: Vec<String>) -> Result<Command> {
    let Some(mode) = args.first() else {
        print_help();
        anyhow::bail!("Missing command");
    };

    match mode.as_str() {
        "--help" | "-h" => {
            print_help();
            std::process::exit(0);
        }
        "stories" => parse_stories_args(&args[1..]).map(Command::Stories),
        "thread" => match &args[1..] {
            [path] => Ok(Command::Thread {
                path: PathBuf::from(path),
            }),
            [] => anyhow::bail!("thread requires a snapshot path"),
            [_, extra, ..] => anyhow::bail!("Unknown argument: {}", extra),
        },
        other => anyhow::bail!("Unknown command: {}", other),
    }
}

fn parse_stories_args(args: &[String]) -> Result<StoriesArgs> {
    let mut parsed = StoriesArgs::default();
    let mut path = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--window-seconds" => {
                if i + 1 >= args.len() {
                    anyhow::bail!("--window-seconds requires a value");
                }
                parsed.window_seconds =
                    Some(args[i + 1].parse().context("Invalid window seconds")?);
                i += 2;
            }
            "--hidden" => {
                if i + 1 >= args.len() {
                    anyhow::bail!("--hidden requires a comma-separated id list");
                }
                parsed.hidden = args[i + 1]
                    .split(',')
                    .filter(|id| !id.trim().is_empty())
                    .map(|id| id.trim().parse::<StoryId>())
                    .collect::<Result<_, _>>()
                    .context("Invalid story id in --hidden")?;
                i += 2;
            }
            "--visible-only" => {
                parsed.visible_only = true;
                i += 1;
            }
            arg if arg.starts_with("--") => {
                anyhow::bail!("Unknown argument: {}", arg);
            }
            arg => {
                if path.is_some() {
                    anyhow::bail!("Unknown argument: {}", arg);
                }
                path = Some(PathBuf::from(arg));
                i += 1;
            }
        }
    }

    parsed.path = path.context("stories requires a snapshot path")?;
    Ok(parsed)
}

fn print_help() {
    println!(
        r#"rank-snapshot - rank a JSON snapshot offline

USAGE:
    rank-snapshot stories <file.json> [OPTIONS]
    rank-snapshot thread <file.json>

OPTIONS (stories):
    --window-seconds <N>     Hotness window in seconds (default: from config)
    --hidden <id,id,...>     Stories hidden by the viewer
    --visible-only           Drop negative-score and hidden stories
    -h, --help               Print this help message

ENVIRONMENT:
    RANKING_HOTNESS_WINDOW_SECONDS         Default 79200
    RANKING_COMMENT_EDIT_WINDOW_SECONDS    Default 300
    RANKING_COMMENT_MAX_DEPTH              Default 10
    RUST_LOG                               Log filter (default: info)
"#
    );
}
