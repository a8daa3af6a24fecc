/// JSON snapshots of ranking inputs
///
/// The snapshot tool reads these to reproduce an ordering offline. The core
/// never touches files; this module is the boundary that does.
use crate::error::SnapshotError;
use crate::models::{CommentId, CommentRow, FlagCount, StoryFacts, UserId};
use crate::services::comment_tree::{ThreadContext, ThreadPolicy};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Stories as a listing page would fetch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub stories: Vec<StoryFacts>,
}

/// One story's comment thread plus the request context it was viewed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSnapshot {
    pub rows: Vec<CommentRow>,
    #[serde(default)]
    pub viewer_id: Option<UserId>,
    pub story_submitter_id: UserId,
    #[serde(default)]
    pub last_visit: Option<DateTime<Utc>>,
    /// When absent the caller picks the evaluation time.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    pub story_code: String,
    #[serde(default)]
    pub voted: Vec<CommentId>,
    #[serde(default)]
    pub flagged: Vec<CommentId>,
    #[serde(default)]
    pub flag_counts: HashMap<CommentId, Vec<FlagCount>>,
}

impl ThreadSnapshot {
    /// Build the tree context, using `fallback_now` when the snapshot does not
    /// pin an evaluation time.
    pub fn context(&self, fallback_now: DateTime<Utc>, policy: ThreadPolicy) -> ThreadContext {
        let mut ctx = ThreadContext::new(
            self.story_submitter_id,
            self.story_code.clone(),
            self.now.unwrap_or(fallback_now),
        )
        .with_votes(self.voted.iter().copied())
        .with_flags(self.flagged.iter().copied())
        .with_flag_counts(self.flag_counts.clone())
        .with_policy(policy);

        ctx.viewer_id = self.viewer_id;
        ctx.last_visit = self.last_visit;
        ctx
    }
}

pub fn load_stories(path: &Path) -> Result<StorySnapshot, SnapshotError> {
    load(path)
}

pub fn load_thread(path: &Path) -> Result<ThreadSnapshot, SnapshotError> {
    load(path)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let data = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&data).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
