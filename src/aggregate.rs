//! Depth assignment, parent linkage, and cumulative weight accumulation.

use generational_arena::Index;
use tracing::instrument;

use crate::forest::Forest;

/// Assigns `depth` and `parent` and computes `cumulative_weight` for every
/// node, in a single pass.
///
/// Iterative depth-first traversal with an explicit stack, so depth is not
/// bounded by the call stack. Roots are pushed in reverse so popping
/// yields original left-to-right order. Visiting a node adds its own
/// weight to the cumulative weight of itself and every node on its
/// ancestor chain; each leaf weight thus reaches every ancestor exactly
/// once, making the result independent of visitation order.
///
/// Cumulative weights are reset at visit time, so re-aggregating an
/// already aggregated forest yields identical results.
#[instrument(level = "debug", skip(forest))]
pub fn aggregate(forest: &mut Forest) {
    let mut stack: Vec<(Index, usize, Option<Index>)> = forest
        .roots()
        .iter()
        .rev()
        .map(|&root| (root, 0, None))
        .collect();

    while let Some((idx, depth, parent)) = stack.pop() {
        let (weight, children) = match forest.get_node_mut(idx) {
            Some(node) => {
                node.depth = depth;
                node.parent = parent;
                node.cumulative_weight = 0;
                (node.weight, node.children.clone())
            }
            None => continue,
        };

        for &child in children.iter().rev() {
            stack.push((child, depth + 1, Some(idx)));
        }

        // Propagate own weight to self and every ancestor. Ancestors were
        // visited earlier (preorder), so their parent links are in place.
        let mut current = Some(idx);
        while let Some(i) = current {
            match forest.get_node_mut(i) {
                Some(node) => {
                    node.cumulative_weight += weight;
                    current = node.parent;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::Leaf;

    fn leaf(label: &str, weight: u64) -> Leaf {
        Leaf {
            label: label.to_string(),
            weight,
        }
    }

    /// a(1) -> a1(2) -> a11(4)
    ///      -> a2(8)
    /// b(16)
    fn sample_forest() -> Forest {
        let mut forest = Forest::new();
        let a = forest.insert_node(leaf("a", 1), None);
        let a1 = forest.insert_node(leaf("a1", 2), Some(a));
        forest.insert_node(leaf("a11", 4), Some(a1));
        forest.insert_node(leaf("a2", 8), Some(a));
        forest.insert_node(leaf("b", 16), None);
        forest
    }

    #[test]
    fn given_forest_when_aggregating_then_cumulative_weights_sum_descendants() {
        let mut forest = sample_forest();
        aggregate(&mut forest);

        let by_label = |label: &str| {
            forest
                .iter()
                .find(|(_, n)| n.label == label)
                .map(|(_, n)| n.cumulative_weight)
                .unwrap()
        };
        assert_eq!(by_label("a"), 15);
        assert_eq!(by_label("a1"), 6);
        assert_eq!(by_label("a11"), 4);
        assert_eq!(by_label("a2"), 8);
        assert_eq!(by_label("b"), 16);
    }

    #[test]
    fn given_forest_when_aggregating_then_weight_invariant_holds() {
        let mut forest = sample_forest();
        aggregate(&mut forest);

        for (_, node) in forest.iter() {
            let child_sum: u64 = node
                .children
                .iter()
                .map(|&c| forest.get_node(c).unwrap().cumulative_weight)
                .sum();
            assert_eq!(node.cumulative_weight, node.weight + child_sum);
        }
    }

    #[test]
    fn given_forest_when_aggregating_then_depth_invariant_holds() {
        let mut forest = sample_forest();
        aggregate(&mut forest);

        for (_, node) in forest.iter() {
            match node.parent {
                Some(parent) => {
                    assert_eq!(node.depth, forest.get_node(parent).unwrap().depth + 1)
                }
                None => assert_eq!(node.depth, 0),
            }
        }
    }

    #[test]
    fn given_aggregated_forest_when_aggregating_again_then_results_are_identical() {
        let mut forest = sample_forest();
        aggregate(&mut forest);
        let first: Vec<(usize, u64)> = forest
            .iter()
            .map(|(_, n)| (n.depth, n.cumulative_weight))
            .collect();

        aggregate(&mut forest);
        let second: Vec<(usize, u64)> = forest
            .iter()
            .map(|(_, n)| (n.depth, n.cumulative_weight))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn given_deep_chain_when_aggregating_then_no_stack_overflow() {
        let mut forest = Forest::new();
        let mut parent = None;
        for i in 0..5_000 {
            let idx = forest.insert_node(leaf(&format!("n{i}"), 1), parent);
            parent = Some(idx);
        }
        aggregate(&mut forest);

        let root = forest.roots()[0];
        assert_eq!(forest.get_node(root).unwrap().cumulative_weight, 5_000);
    }
}
