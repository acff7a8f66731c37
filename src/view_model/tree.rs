use crate::models::Resource;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TreeNode<R> {
    pub record: R,
    pub children: Vec<TreeNode<R>>,
}

/// Group records under their parents, keeping insertion order among siblings.
///
/// Records whose parent is missing from `records` (or is themselves) become
/// roots. Records only reachable through a parent cycle are promoted to roots
/// in insertion order, which breaks the cycle at that record.
pub(crate) fn build_tree<R: Resource>(records: &[R]) -> Vec<TreeNode<R>> {
    let index: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id(), i))
        .collect();

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match record.parent_id().and_then(|p| index.get(p)) {
            Some(&parent) if parent != i => children.entry(parent).or_default().push(i),
            _ => roots.push(i),
        }
    }

    let mut visited = HashSet::new();
    let mut tree: Vec<TreeNode<R>> = roots
        .into_iter()
        .filter_map(|i| build_node(records, &children, i, &mut visited))
        .collect();

    for i in 0..records.len() {
        if !visited.contains(&i) {
            if let Some(node) = build_node(records, &children, i, &mut visited) {
                tree.push(node);
            }
        }
    }

    tree
}

fn build_node<R: Resource>(
    records: &[R],
    children: &HashMap<usize, Vec<usize>>,
    i: usize,
    visited: &mut HashSet<usize>,
) -> Option<TreeNode<R>> {
    if !visited.insert(i) {
        return None;
    }
    let kids = children
        .get(&i)
        .map(|ids| {
            ids.iter()
                .filter_map(|&c| build_node(records, children, c, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(TreeNode {
        record: records[i].clone(),
        children: kids,
    })
}

/// Depth-first `(depth, record)` pairs for indented rendering.
pub(crate) fn flatten_tree<R: Clone>(nodes: &[TreeNode<R>]) -> Vec<(usize, R)> {
    fn walk<R: Clone>(nodes: &[TreeNode<R>], depth: usize, out: &mut Vec<(usize, R)>) {
        for node in nodes {
            out.push((depth, node.record.clone()));
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn category(id: &str, parent: Option<&str>) -> Category {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": id,
            "parentCategory": parent,
        }))
        .expect("category fixture")
    }

    fn shape(nodes: &[TreeNode<Category>]) -> Vec<(usize, String)> {
        flatten_tree(nodes)
            .into_iter()
            .map(|(d, c)| (d, c.id))
            .collect()
    }

    #[test]
    fn test_tree_groups_children_in_order() {
        let records = vec![
            category("design", None),
            category("ui", Some("design")),
            category("dev", None),
            category("ux", Some("design")),
            category("rust", Some("dev")),
        ];
        let tree = build_tree(&records);
        assert_eq!(
            shape(&tree),
            vec![
                (0, "design".to_string()),
                (1, "ui".to_string()),
                (1, "ux".to_string()),
                (0, "dev".to_string()),
                (1, "rust".to_string()),
            ]
        );
    }

    #[test]
    fn test_orphans_become_roots() {
        let records = vec![category("ui", Some("missing"))];
        assert_eq!(shape(&build_tree(&records)), vec![(0, "ui".to_string())]);
    }

    #[test]
    fn test_cycles_are_broken() {
        let records = vec![
            category("a", Some("b")),
            category("b", Some("a")),
            category("self", Some("self")),
        ];
        let flat = shape(&build_tree(&records));
        assert_eq!(flat.len(), 3);
        assert!(flat.contains(&(0, "self".to_string())));
        assert!(flat.contains(&(0, "a".to_string())));
        assert!(flat.contains(&(1, "b".to_string())));
    }
}
