//! Decorated tree rendering with threshold highlighting.

use colored::Colorize;
use generational_arena::Index;
use tracing::instrument;

use crate::forest::{Forest, Node};
use crate::util::bytes::format_bytes;

/// Connector for an entry with further siblings at its depth.
pub const BRANCH: &str = "├── ";
/// Connector for the last entry at its depth.
pub const TERMINAL: &str = "└── ";
/// Indentation unit repeated once per depth level.
pub const CONTINUATION: &str = "|    ";

/// Rendered tree lines plus the running totals over all visited nodes.
#[derive(Debug)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub total_count: u64,
    pub total_weight: u64,
}

impl Rendered {
    /// Final summary line; an empty forest yields the zero-total form.
    pub fn summary(&self) -> String {
        format!(
            "{} in {} dependencies",
            format_bytes(self.total_weight),
            self.total_count
        )
    }
}

/// Renders an aggregated forest depth-first in source order.
///
/// The connector is chosen by lookahead before a node's children are
/// pushed: if the next stack entry sits at the same depth a sibling
/// follows and the entry gets the branch glyph, otherwise it is the last
/// at its depth and gets the terminal glyph. The rule applies uniformly
/// at every depth, roots included.
///
/// With `large_only` a line is emitted only when its owning root's
/// cumulative weight exceeds the threshold; suppressed nodes are still
/// traversed and still feed the totals.
#[instrument(level = "debug", skip(forest))]
pub fn render(forest: &Forest, threshold: u64, large_only: bool) -> Rendered {
    let mut lines = Vec::new();
    let mut total_count: u64 = 0;
    let mut total_weight: u64 = 0;

    // (node, depth, owning root)
    let mut stack: Vec<(Index, usize, Index)> = forest
        .roots()
        .iter()
        .rev()
        .map(|&root| (root, 0, root))
        .collect();

    while let Some((idx, depth, owner)) = stack.pop() {
        let Some(node) = forest.get_node(idx) else {
            continue;
        };
        total_count += 1;
        total_weight += node.weight;

        let connector = match stack.last() {
            Some(&(_, next_depth, _)) if next_depth == depth => BRANCH,
            _ => TERMINAL,
        };

        let emit = !large_only
            || forest
                .get_node(owner)
                .is_some_and(|root| root.cumulative_weight > threshold);
        if emit {
            lines.push(format_line(node, depth, connector, threshold));
        }

        for &child in node.children.iter().rev() {
            stack.push((child, depth + 1, owner));
        }
    }

    Rendered {
        lines,
        total_count,
        total_weight,
    }
}

fn format_line(node: &Node, depth: usize, connector: &str, threshold: u64) -> String {
    let own = format!("File: {}", format_bytes(node.weight));
    let own = if node.weight > threshold {
        own.on_red().to_string()
    } else {
        own
    };
    let total = format!("Total: {}", format_bytes(node.cumulative_weight));
    let total = if node.cumulative_weight > threshold {
        total.on_red().to_string()
    } else {
        total
    };

    format!(
        "{}{}{} Size[{}, {}]",
        CONTINUATION.repeat(depth),
        connector,
        node.label,
        own,
        total
    )
}
