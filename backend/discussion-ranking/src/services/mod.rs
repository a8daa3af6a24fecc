pub mod comment_tree;
pub mod confidence;
pub mod hotness;
pub mod story_ranking;

pub use comment_tree::{build_comment_tree, ThreadContext, ThreadPolicy};
pub use confidence::wilson_score;
pub use hotness::{compute_hotness, CommentBonus, HotnessWindow};
pub use story_ranking::{rank_stories, visible_stories, StoryRanker};
