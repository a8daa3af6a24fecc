/// Comment Tree Module
///
/// Turns the flat comment rows of one story into a display-ready forest.
///
/// # Workflow
/// 1. Derive display fields per row from the request's [`ThreadContext`]
/// 2. Link rows to parents through an id-keyed index (orphans become roots)
/// 3. Order each sibling group by Wilson confidence, oldest first on ties
mod builder;
mod context;

pub use builder::{build_comment_tree, DELETED_PLACEHOLDER};
pub use context::{
    ThreadContext, ThreadPolicy, DEFAULT_EDIT_WINDOW_SECONDS, DEFAULT_MAX_COMMENT_DEPTH,
};
