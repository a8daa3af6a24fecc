use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type StoryId = i64;
pub type CommentId = i64;
pub type UserId = i64;

/// Per-tag hotness modifier, range-checked to [-10, 10] before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagModifier {
    pub hotness_mod: f64,
}

impl TagModifier {
    pub fn new(hotness_mod: f64) -> Self {
        Self { hotness_mod }
    }
}

/// The only thing story scoring needs to know about a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentFact {
    pub is_submitter: bool,
}

impl CommentFact {
    /// Expand aggregate counts (total comments, comments written by the
    /// submitter) into one fact per comment.
    pub fn from_counts(total: usize, by_submitter: usize) -> Vec<CommentFact> {
        let by_submitter = by_submitter.min(total);
        let mut facts = Vec::with_capacity(total);
        facts.extend((0..by_submitter).map(|_| CommentFact { is_submitter: true }));
        facts.extend((by_submitter..total).map(|_| CommentFact::default()));
        facts
    }
}

/// Materialized facts about one story, as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryFacts {
    pub id: StoryId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<TagModifier>,
    /// Upvotes minus downvotes.
    pub score: i64,
    #[serde(default)]
    pub comments: Vec<CommentFact>,
}

/// Story facts plus the hotness breakdown computed from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStory {
    story: StoryFacts,
    hotness: f64,
    topic_bias: f64,
    magnitude: f64,
    sign: i8,
    recency: f64,
    raw_comment_bonus: f64,
    comment_bonus: f64,
}

impl ScoredStory {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        story: StoryFacts,
        hotness: f64,
        topic_bias: f64,
        magnitude: f64,
        sign: i8,
        recency: f64,
        raw_comment_bonus: f64,
        comment_bonus: f64,
    ) -> Self {
        Self {
            story,
            hotness,
            topic_bias,
            magnitude,
            sign,
            recency,
            raw_comment_bonus,
            comment_bonus,
        }
    }

    pub fn id(&self) -> StoryId {
        self.story.id
    }

    pub fn story(&self) -> &StoryFacts {
        &self.story
    }

    pub fn into_story(self) -> StoryFacts {
        self.story
    }

    /// Lower is hotter.
    pub fn hotness(&self) -> f64 {
        self.hotness
    }

    pub fn topic_bias(&self) -> f64 {
        self.topic_bias
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn sign(&self) -> i8 {
        self.sign
    }

    pub fn recency(&self) -> f64 {
        self.recency
    }

    /// Comment bonus before clamping to the story's net score.
    pub fn raw_comment_bonus(&self) -> f64 {
        self.raw_comment_bonus
    }

    /// Comment bonus as it entered the magnitude term.
    pub fn comment_bonus(&self) -> f64 {
        self.comment_bonus
    }
}

/// Flag tally for one reason on one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCount {
    pub reason: String,
    pub count: u32,
}

/// Reasons a reader may pick when flagging a comment.
pub const FLAG_REASONS: [&str; 4] = ["off-topic", "troll", "unkind", "spam"];

/// A comment as fetched for one story, flat and unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub user_id: UserId,
    pub username: String,
    pub depth: u32,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub body: String,
}

/// Render-ready comment with its replies already in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    pub id: CommentId,
    /// Display only; the tree is walked through `children`.
    pub parent_id: Option<CommentId>,
    pub user_id: UserId,
    pub username: String,
    pub body: String,
    pub raw_body: String,
    pub depth: u32,
    pub upvotes: u32,
    pub downvotes: u32,
    pub confidence: f64,
    pub has_upvoted: bool,
    pub has_flagged: bool,
    pub is_author: bool,
    pub is_submitter: bool,
    pub can_edit: bool,
    pub is_deleted: bool,
    pub is_unread: bool,
    pub is_logged_in: bool,
    pub is_max_depth: bool,
    pub created_at: DateTime<Utc>,
    pub flag_reasons: &'static [&'static str],
    pub flag_counts: Vec<FlagCount>,
    pub story_code: String,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Number of comments in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CommentNode::subtree_len).sum::<usize>()
    }
}
