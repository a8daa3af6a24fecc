pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod snapshot;
pub mod utils;

pub use config::RankingConfig;
pub use error::{ConfigError, SnapshotError};
pub use models::{
    CommentFact, CommentNode, CommentRow, FlagCount, ScoredStory, StoryFacts, TagModifier,
};
pub use services::{
    build_comment_tree, compute_hotness, rank_stories, visible_stories, wilson_score,
    HotnessWindow, StoryRanker, ThreadContext, ThreadPolicy,
};
