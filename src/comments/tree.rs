/**
 * Comment Tree Builder
 *
 * Assembles the flat, creation-ascending comment list into a nested
 * forest, and collects the ids of a comment's subtree for cascading
 * deletion. Both operations are iterative; depth is bounded only by the
 * data, never by the call stack.
 *
 * Orphan handling: a comment whose parent id matches no comment in the
 * list (the parent was deleted out from under it) is promoted to a root
 * rather than dropped.
 */
use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

use crate::comments::db::CommentRow;

/// A comment with its nested replies.
#[derive(Debug)]
pub struct CommentNode {
    pub row: CommentRow,
    pub replies: Vec<CommentNode>,
}

/// Build the nested forest from a creation-ascending flat list.
///
/// Root order and sibling order both follow the input order. Parents
/// precede their replies in creation order, so a single reverse pass can
/// assemble every node after its children.
pub fn build_forest(rows: Vec<CommentRow>) -> Vec<CommentNode> {
    let index: HashMap<Uuid, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.id, i))
        .collect();

    // children[i] lists the input indices replying to rows[i], in input order.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut root_indices: Vec<usize> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        // A parent at a later index would mean the data violates creation
        // order; treat the comment as orphaned rather than looping.
        match row.parent_comment_id.and_then(|p| index.get(&p)).copied() {
            Some(parent) if parent < i => children[parent].push(i),
            _ => root_indices.push(i),
        }
    }

    let mut nodes: Vec<Option<CommentNode>> = rows
        .into_iter()
        .map(|row| {
            Some(CommentNode {
                row,
                replies: Vec::new(),
            })
        })
        .collect();

    // Children always sit at higher indices than their parent, so walking
    // backwards completes every reply list before its parent is visited.
    for i in (0..nodes.len()).rev() {
        let replies: Vec<CommentNode> = children[i]
            .iter()
            .map(|&child| nodes[child].take().expect("child taken twice"))
            .collect();
        if let Some(node) = nodes[i].as_mut() {
            node.replies = replies;
        }
    }

    root_indices
        .into_iter()
        .map(|i| nodes[i].take().expect("root taken twice"))
        .collect()
}

/// Collect `root_id` and every transitive reply, breadth-first over an
/// explicit worklist.
pub fn collect_subtree(rows: &[CommentRow], root_id: Uuid) -> Vec<Uuid> {
    let mut collected = Vec::new();
    let mut queue = VecDeque::from([root_id]);

    while let Some(current) = queue.pop_front() {
        collected.push(current);
        for row in rows {
            if row.parent_comment_id == Some(current) {
                queue.push_back(row.id);
            }
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn comment(id: Uuid, parent: Option<Uuid>, seq: i64) -> CommentRow {
        CommentRow {
            id,
            post_id: Uuid::nil(),
            author_id: Uuid::new_v4(),
            parent_comment_id: parent,
            content: format!("comment {seq}"),
            created_at: Utc::now() + Duration::seconds(seq),
            author_name: "Alice".to_string(),
            author_profile_picture_url: None,
        }
    }

    #[test]
    fn test_flat_list_becomes_flat_forest() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let rows: Vec<CommentRow> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| comment(*id, None, i as i64))
            .collect();

        let forest = build_forest(rows);
        assert_eq!(forest.len(), 3);
        // Root order follows input order.
        for (node, id) in forest.iter().zip(&ids) {
            assert_eq!(node.row.id, *id);
            assert!(node.replies.is_empty());
        }
    }

    #[test]
    fn test_replies_nest_under_parents() {
        let root = Uuid::new_v4();
        let reply = Uuid::new_v4();
        let nested = Uuid::new_v4();
        let rows = vec![
            comment(root, None, 0),
            comment(reply, Some(root), 1),
            comment(nested, Some(reply), 2),
        ];

        let forest = build_forest(rows);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].row.id, root);
        assert_eq!(forest[0].replies.len(), 1);
        assert_eq!(forest[0].replies[0].row.id, reply);
        assert_eq!(forest[0].replies[0].replies[0].row.id, nested);
    }

    #[test]
    fn test_sibling_order_is_preserved() {
        let root = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let rows = vec![
            comment(root, None, 0),
            comment(first, Some(root), 1),
            comment(second, Some(root), 2),
        ];

        let forest = build_forest(rows);
        let replies = &forest[0].replies;
        assert_eq!(replies[0].row.id, first);
        assert_eq!(replies[1].row.id, second);
    }

    #[test]
    fn test_orphaned_reply_becomes_root() {
        let missing_parent = Uuid::new_v4();
        let orphan = Uuid::new_v4();
        let normal = Uuid::new_v4();
        let rows = vec![
            comment(normal, None, 0),
            comment(orphan, Some(missing_parent), 1),
        ];

        let forest = build_forest(rows);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].row.id, normal);
        assert_eq!(forest[1].row.id, orphan);
    }

    #[test]
    fn test_deep_thread_does_not_recurse() {
        // A 10k-deep reply chain must assemble without stack growth.
        let mut rows = Vec::new();
        let mut parent = None;
        for seq in 0..10_000 {
            let id = Uuid::new_v4();
            rows.push(comment(id, parent, seq));
            parent = Some(id);
        }

        let forest = build_forest(rows);
        assert_eq!(forest.len(), 1);

        let mut depth = 0;
        let mut node = &forest[0];
        while let Some(next) = node.replies.first() {
            node = next;
            depth += 1;
        }
        assert_eq!(depth, 9_999);
    }

    #[test]
    fn test_collect_subtree_gathers_all_descendants() {
        let root = Uuid::new_v4();
        let child_a = Uuid::new_v4();
        let child_b = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let unrelated = Uuid::new_v4();
        let rows = vec![
            comment(root, None, 0),
            comment(unrelated, None, 1),
            comment(child_a, Some(root), 2),
            comment(child_b, Some(root), 3),
            comment(grandchild, Some(child_a), 4),
        ];

        let ids = collect_subtree(&rows, root);
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&root));
        assert!(ids.contains(&child_a));
        assert!(ids.contains(&child_b));
        assert!(ids.contains(&grandchild));
        assert!(!ids.contains(&unrelated));
    }

    #[test]
    fn test_collect_subtree_of_leaf_is_just_the_leaf() {
        let root = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        let rows = vec![comment(root, None, 0), comment(leaf, Some(root), 1)];

        assert_eq!(collect_subtree(&rows, leaf), vec![leaf]);
    }
}
