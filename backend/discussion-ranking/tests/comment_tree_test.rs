use chrono::{DateTime, Duration, TimeZone, Utc};
use discussion_ranking::models::CommentId;
use discussion_ranking::{build_comment_tree, CommentNode, CommentRow, ThreadContext};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn comment(
    id: CommentId,
    parent_id: Option<CommentId>,
    upvotes: u32,
    downvotes: u32,
    minutes_after: i64,
) -> CommentRow {
    CommentRow {
        id,
        parent_id,
        user_id: 100 + id,
        username: format!("user{}", id),
        depth: 0,
        upvotes,
        downvotes,
        created_at: base_time() + Duration::minutes(minutes_after),
        deleted_at: None,
        body: format!("body {}", id),
    }
}

fn ctx() -> ThreadContext {
    ThreadContext::new(1, "q7w2e9", base_time() + Duration::days(1))
}

fn ids(nodes: &[CommentNode]) -> Vec<CommentId> {
    nodes.iter().map(|n| n.id).collect()
}

#[test]
fn test_roots_ordered_by_confidence() {
    let rows = vec![
        comment(1, None, 1, 0, 0),
        comment(2, None, 10, 0, 1),
        comment(3, None, 5, 5, 2),
        comment(4, None, 0, 0, 3),
        comment(5, None, 8, 2, 4),
    ];

    let forest = build_comment_tree(&rows, &ctx());
    assert_eq!(ids(&forest), vec![2, 5, 1, 3, 4]);

    for pair in forest.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_equal_votes_ordered_oldest_first() {
    // Input order deliberately newest first
    let rows = vec![
        comment(1, None, 3, 1, 30),
        comment(2, None, 3, 1, 10),
        comment(3, None, 3, 1, 20),
    ];

    let forest = build_comment_tree(&rows, &ctx());
    assert_eq!(ids(&forest), vec![2, 3, 1]);
}

#[test]
fn test_nested_children_sorted_at_every_level() {
    let rows = vec![
        comment(1, None, 2, 0, 0),
        comment(2, Some(1), 0, 3, 1),
        comment(3, Some(1), 9, 1, 2),
        comment(4, Some(3), 1, 0, 3),
        comment(5, Some(3), 1, 0, 4),
        comment(6, Some(3), 6, 0, 5),
        comment(7, Some(2), 0, 0, 6),
    ];

    let forest = build_comment_tree(&rows, &ctx());
    assert_eq!(ids(&forest), vec![1]);

    let root = &forest[0];
    assert_eq!(ids(&root.children), vec![3, 2]);
    assert_eq!(ids(&root.children[0].children), vec![6, 4, 5]);
    assert_eq!(ids(&root.children[1].children), vec![7]);
    assert_eq!(root.subtree_len(), 7);
}

#[test]
fn test_children_listed_before_parent_still_attach() {
    let rows = vec![
        comment(3, Some(2), 0, 0, 2),
        comment(2, Some(1), 0, 0, 1),
        comment(1, None, 0, 0, 0),
    ];

    let forest = build_comment_tree(&rows, &ctx());
    assert_eq!(ids(&forest), vec![1]);
    assert_eq!(ids(&forest[0].children), vec![2]);
    assert_eq!(ids(&forest[0].children[0].children), vec![3]);
}

#[test]
fn test_orphans_promoted_to_roots() {
    let rows = vec![
        comment(1, None, 1, 0, 0),
        comment(2, Some(404), 5, 0, 1),
        comment(3, Some(2), 0, 0, 2),
    ];

    let forest = build_comment_tree(&rows, &ctx());

    // The orphan keeps its display parent id and its own replies
    assert_eq!(ids(&forest), vec![2, 1]);
    assert_eq!(forest[0].parent_id, Some(404));
    assert_eq!(ids(&forest[0].children), vec![3]);
}

#[test]
fn test_no_row_lost_or_duplicated() {
    let rows: Vec<CommentRow> = (1..=40)
        .map(|id| {
            let parent = if id % 4 == 1 { None } else { Some(id - 1 - id % 3) };
            comment(id, parent, (id % 7) as u32, (id % 3) as u32, id)
        })
        .collect();

    let forest = build_comment_tree(&rows, &ctx());
    let total: usize = forest.iter().map(CommentNode::subtree_len).sum();
    assert_eq!(total, rows.len());
}

#[test]
fn test_repeated_builds_are_identical() {
    let rows = vec![
        comment(1, None, 2, 2, 0),
        comment(2, None, 2, 2, 0),
        comment(3, Some(1), 4, 0, 1),
        comment(4, Some(1), 4, 0, 1),
    ];

    let first = build_comment_tree(&rows, &ctx());
    let second = build_comment_tree(&rows, &ctx());

    assert_eq!(first, second);
    // Full ties fall back to input order
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(ids(&first[0].children), vec![3, 4]);
}

#[test]
fn test_tree_serializes_for_rendering() {
    let rows = vec![comment(1, None, 1, 0, 0), comment(2, Some(1), 0, 0, 1)];

    let forest = build_comment_tree(&rows, &ctx().with_viewer(101));
    let json = serde_json::to_value(&forest).unwrap();

    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["is_author"], true);
    assert_eq!(json[0]["children"][0]["id"], 2);
    assert_eq!(json[0]["flag_reasons"][3], "spam");
    assert!(json[0].get("deleted_at").is_none());
}
