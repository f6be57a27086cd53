//! Depth-band layout for search-tree snapshots.

use std::collections::BTreeMap;

use crate::model::TreeNode;

/// Group nodes into depth bands, ordered by ascending depth. Within a band
/// the input order is preserved; nodes are never re-sorted by id or score.
/// Pixel placement is left to the row flow layout; this only decides grouping
/// and order. An empty node list yields zero bands.
pub fn group_by_depth(nodes: &[TreeNode]) -> Vec<(u32, Vec<&TreeNode>)> {
    let mut levels: BTreeMap<u32, Vec<&TreeNode>> = BTreeMap::new();
    for node in nodes {
        levels.entry(node.depth).or_default().push(node);
    }
    levels.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;

    fn node(id: &str, depth: u32) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            board: [Mark::Empty; 9],
            score: 0,
            depth,
            is_pruned: false,
            current_player: Mark::X,
        }
    }

    #[test]
    fn one_band_per_distinct_depth() {
        let nodes = vec![node("r", 0), node("a", 1), node("b", 1), node("c", 2)];
        let levels = group_by_depth(&nodes);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].0, 0);
        assert_eq!(levels[1].0, 1);
        assert_eq!(levels[2].0, 2);
        assert_eq!(levels[1].1.len(), 2);
    }

    #[test]
    fn band_order_is_input_order() {
        let nodes = vec![node("z", 1), node("a", 1), node("m", 1)];
        let levels = group_by_depth(&nodes);
        let ids: Vec<&str> = levels[0].1.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn bands_sort_by_depth_even_when_input_is_shuffled() {
        let nodes = vec![node("c", 2), node("r", 0), node("a", 1)];
        let levels = group_by_depth(&nodes);
        let depths: Vec<u32> = levels.iter().map(|(d, _)| *d).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn empty_tree_yields_zero_bands() {
        assert!(group_by_depth(&[]).is_empty());
    }

    #[test]
    fn forest_with_two_roots_is_accepted() {
        let nodes = vec![node("r1", 0), node("r2", 0)];
        let levels = group_by_depth(&nodes);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].1.len(), 2);
    }
}
