/// Hotness Calculator
///
/// Scores a single story from its materialized facts. Every sub-step is a pure
/// function so the breakdown can be shown next to the ranking for debugging.
///
/// ```text
/// hotness = -1 * (topic_bias + magnitude * sign + recency)
/// ```
///
/// Lower (more negative) hotness ranks first.
use crate::models::{CommentFact, ScoredStory, StoryFacts, TagModifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 22 hours.
pub const DEFAULT_HOTNESS_WINDOW_SECONDS: f64 = 79_200.0;

/// Upper bound of the magnitude term.
const MAX_MAGNITUDE: f64 = 10.0;

const COMMENT_POINTS: f64 = 1.0;
const SUBMITTER_COMMENT_BONUS: f64 = 0.25;

/// Seconds of creation time that weigh as much as one order of magnitude of
/// votes. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HotnessWindow(f64);

impl HotnessWindow {
    pub fn new(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds > 0.0).then_some(Self(seconds))
    }

    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl Default for HotnessWindow {
    fn default() -> Self {
        Self(DEFAULT_HOTNESS_WINDOW_SECONDS)
    }
}

impl TryFrom<f64> for HotnessWindow {
    type Error = String;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        Self::new(seconds)
            .ok_or_else(|| format!("hotness window must be finite and positive, got {}", seconds))
    }
}

impl From<HotnessWindow> for f64 {
    fn from(window: HotnessWindow) -> Self {
        window.0
    }
}

/// Discussion contribution to a story's magnitude term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommentBonus {
    /// Bonus after clamping to the story's net score.
    pub clamped: f64,
    pub raw: f64,
}

/// Sum of the story's tag modifiers. Not re-clamped after summing.
pub fn topic_bias(tags: &[TagModifier]) -> f64 {
    tags.iter().map(|t| t.hotness_mod).sum()
}

/// Comment contribution, clamped to the story's net score.
///
/// A story penalized by its tags gets no bonus at all: discussion cannot
/// rescue it.
pub fn comment_bonus(topic_bias: f64, score: i64, comments: &[CommentFact]) -> CommentBonus {
    if topic_bias < 0.0 {
        return CommentBonus::default();
    }

    let raw: f64 = comments
        .iter()
        .map(|c| {
            if c.is_submitter {
                COMMENT_POINTS + SUBMITTER_COMMENT_BONUS
            } else {
                COMMENT_POINTS
            }
        })
        .sum();

    CommentBonus {
        clamped: raw.min(score as f64),
        raw,
    }
}

/// `min(log10(max(|score + bonus|, 1)), 10)`.
pub fn magnitude(score: i64, clamped_bonus: f64) -> f64 {
    let v = (score as f64 + clamped_bonus).abs().max(1.0);
    v.log10().min(MAX_MAGNITUDE)
}

/// Direction of the net score. Only the magnitude term is signed.
pub fn sign(score: i64) -> i8 {
    match score {
        s if s > 0 => 1,
        s if s < 0 => -1,
        _ => 0,
    }
}

/// Absolute creation time scaled by the window.
///
/// This is not an age: newer stories get larger values, and two calls over
/// the same data always agree because no clock is read here.
pub fn recency(created_at: DateTime<Utc>, window: HotnessWindow) -> f64 {
    created_at.timestamp() as f64 / window.seconds()
}

/// Score one story and keep the breakdown.
pub fn compute_hotness(story: StoryFacts, window: HotnessWindow) -> ScoredStory {
    let bias = topic_bias(&story.tags);
    let bonus = comment_bonus(bias, story.score, &story.comments);
    let order = magnitude(story.score, bonus.clamped);
    let direction = sign(story.score);
    let age = recency(story.created_at, window);
    let hotness = -1.0 * (bias + order * f64::from(direction) + age);

    ScoredStory::new(
        story,
        hotness,
        bias,
        order,
        direction,
        age,
        bonus.raw,
        bonus.clamped,
    )
}
