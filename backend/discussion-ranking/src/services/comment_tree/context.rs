use crate::models::{CommentId, FlagCount, UserId};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

/// Default time an author may still edit their comment.
pub const DEFAULT_EDIT_WINDOW_SECONDS: i64 = 5 * 60;

/// Default nesting depth at which replies are no longer offered.
pub const DEFAULT_MAX_COMMENT_DEPTH: u32 = 10;

/// Thread-wide display limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadPolicy {
    pub edit_window: Duration,
    pub max_depth: u32,
}

impl Default for ThreadPolicy {
    fn default() -> Self {
        Self {
            edit_window: Duration::seconds(DEFAULT_EDIT_WINDOW_SECONDS),
            max_depth: DEFAULT_MAX_COMMENT_DEPTH,
        }
    }
}

/// Everything about the current request that display flags depend on.
///
/// Passed explicitly into the tree builder so that building stays a pure
/// function of `(rows, context)`. `now` in particular is never read from the
/// clock inside the builder.
#[derive(Debug, Clone)]
pub struct ThreadContext {
    /// `None` for anonymous readers.
    pub viewer_id: Option<UserId>,
    pub story_submitter_id: UserId,
    pub voted: HashSet<CommentId>,
    pub flagged: HashSet<CommentId>,
    pub flag_counts: HashMap<CommentId, Vec<FlagCount>>,
    /// Viewer's previous visit to this story; `None` on a first visit.
    pub last_visit: Option<DateTime<Utc>>,
    pub story_code: String,
    pub now: DateTime<Utc>,
    pub policy: ThreadPolicy,
}

impl ThreadContext {
    /// Context for an anonymous reader.
    pub fn new(
        story_submitter_id: UserId,
        story_code: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            viewer_id: None,
            story_submitter_id,
            voted: HashSet::new(),
            flagged: HashSet::new(),
            flag_counts: HashMap::new(),
            last_visit: None,
            story_code: story_code.into(),
            now,
            policy: ThreadPolicy::default(),
        }
    }

    pub fn with_viewer(mut self, viewer_id: UserId) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }

    pub fn with_last_visit(mut self, last_visit: DateTime<Utc>) -> Self {
        self.last_visit = Some(last_visit);
        self
    }

    pub fn with_votes(mut self, voted: impl IntoIterator<Item = CommentId>) -> Self {
        self.voted = voted.into_iter().collect();
        self
    }

    pub fn with_flags(mut self, flagged: impl IntoIterator<Item = CommentId>) -> Self {
        self.flagged = flagged.into_iter().collect();
        self
    }

    pub fn with_flag_counts(mut self, flag_counts: HashMap<CommentId, Vec<FlagCount>>) -> Self {
        self.flag_counts = flag_counts;
        self
    }

    pub fn with_policy(mut self, policy: ThreadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.viewer_id.is_some()
    }

    /// True when the logged-in viewer wrote a comment by `author_id`.
    pub fn is_viewer(&self, author_id: UserId) -> bool {
        self.viewer_id == Some(author_id)
    }
}
