use super::context::ThreadContext;
use crate::models::{CommentId, CommentNode, CommentRow, FLAG_REASONS};
use crate::services::confidence::wilson_score;
use crate::utils::descending;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Shown in place of a soft-deleted comment's body.
pub const DELETED_PLACEHOLDER: &str = "[deleted]";

/// Rebuild the reply forest for one story and order every sibling group.
///
/// 1. Build one display node per row.
/// 2. Attach each node to its parent. A node whose parent is not in `rows`
///    becomes a root instead of being dropped.
/// 3. Sort roots and each child list by confidence, highest first, with
///    earlier comments winning ties.
pub fn build_comment_tree(rows: &[CommentRow], ctx: &ThreadContext) -> Vec<CommentNode> {
    // First pass: one node per distinct row id
    let mut nodes: Vec<CommentNode> = Vec::with_capacity(rows.len());
    let mut index: HashMap<CommentId, usize> = HashMap::with_capacity(rows.len());

    for row in rows {
        if index.contains_key(&row.id) {
            warn!(comment_id = row.id, "Duplicate comment row skipped");
            continue;
        }
        index.insert(row.id, nodes.len());
        nodes.push(build_node(row, ctx));
    }

    // Second pass: link children to parents
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut roots: Vec<usize> = Vec::new();
    let mut promoted = 0usize;

    for (idx, node) in nodes.iter().enumerate() {
        match node.parent_id {
            Some(parent_id) => match index.get(&parent_id) {
                Some(&parent_idx) => children[parent_idx].push(idx),
                None => {
                    debug!(
                        comment_id = node.id,
                        parent_id = parent_id,
                        "Parent not in thread, promoting comment to root"
                    );
                    promoted += 1;
                    roots.push(idx);
                }
            },
            None => roots.push(idx),
        }
    }

    if promoted > 0 {
        warn!(
            promoted,
            story_code = %ctx.story_code,
            "Comments with unresolvable parents promoted to roots"
        );
    }

    // Third pass: order every sibling group
    sort_siblings(&mut roots, &nodes);
    for group in children.iter_mut() {
        sort_siblings(group, &nodes);
    }

    // Each node is moved out of its slot exactly once while assembling
    let mut slots: Vec<Option<CommentNode>> = nodes.into_iter().map(Some).collect();
    let forest: Vec<CommentNode> = roots
        .iter()
        .filter_map(|&idx| assemble(idx, &mut slots, &children))
        .collect();

    let unreachable = slots.iter().filter(|slot| slot.is_some()).count();
    if unreachable > 0 {
        warn!(
            unreachable,
            story_code = %ctx.story_code,
            "Comments in a parent cycle omitted from thread"
        );
    }

    debug!(
        comment_count = slots.len(),
        root_count = forest.len(),
        "Comment tree built"
    );

    forest
}

fn build_node(row: &CommentRow, ctx: &ThreadContext) -> CommentNode {
    let is_deleted = row.deleted_at.is_some();
    let (body, raw_body) = if is_deleted {
        (DELETED_PLACEHOLDER.to_string(), String::new())
    } else {
        (row.body.clone(), row.body.clone())
    };

    let is_author = ctx.is_viewer(row.user_id);

    let can_edit = !is_deleted && is_author && ctx.now - row.created_at < ctx.policy.edit_window;

    // No previous visit means a first visit: nothing is unread yet
    let is_unread = match ctx.last_visit {
        Some(last_visit) => ctx.is_logged_in() && row.created_at > last_visit && !is_author,
        None => false,
    };

    CommentNode {
        id: row.id,
        parent_id: row.parent_id,
        user_id: row.user_id,
        username: row.username.clone(),
        body,
        raw_body,
        depth: row.depth,
        upvotes: row.upvotes,
        downvotes: row.downvotes,
        confidence: wilson_score(row.upvotes, row.downvotes),
        has_upvoted: ctx.voted.contains(&row.id),
        has_flagged: ctx.flagged.contains(&row.id),
        is_author,
        is_submitter: row.user_id == ctx.story_submitter_id,
        can_edit,
        is_deleted,
        is_unread,
        is_logged_in: ctx.is_logged_in(),
        is_max_depth: row.depth >= ctx.policy.max_depth,
        created_at: row.created_at,
        flag_reasons: &FLAG_REASONS,
        flag_counts: ctx.flag_counts.get(&row.id).cloned().unwrap_or_default(),
        story_code: ctx.story_code.clone(),
        children: Vec::new(),
    }
}

/// Confidence descending, then created-at ascending.
pub(crate) fn sibling_order(a: &CommentNode, b: &CommentNode) -> Ordering {
    descending(a.confidence, b.confidence).then_with(|| a.created_at.cmp(&b.created_at))
}

fn sort_siblings(group: &mut [usize], nodes: &[CommentNode]) {
    if group.len() <= 1 {
        return;
    }

    group.sort_by(|&a, &b| sibling_order(&nodes[a], &nodes[b]));
}

fn assemble(
    idx: usize,
    slots: &mut [Option<CommentNode>],
    children: &[Vec<usize>],
) -> Option<CommentNode> {
    let mut node = slots[idx].take()?;
    node.children = children[idx]
        .iter()
        .filter_map(|&child| assemble(child, slots, children))
        .collect();
    Some(node)
}
