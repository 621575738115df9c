use generational_arena::{Arena, Index};
use tracing::instrument;

/// Payload extracted from a single structural line of a dependency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Opaque identifier, e.g. a `group:artifact:version` coordinate
    pub label: String,
    /// Own weight of the dependency (artifact size in bytes)
    pub weight: u64,
}

/// Tree node in the arena-based dependency forest.
#[derive(Debug)]
pub struct Node {
    /// Opaque label supplied by the leaf-extraction callback
    pub label: String,
    /// Own weight, supplied by the leaf-extraction callback
    pub weight: u64,
    /// Indices of child nodes, in source-text order
    pub children: Vec<Index>,
    /// Non-owning back-reference to the parent, populated by the aggregator
    pub parent: Option<Index>,
    /// Distance from the owning root, populated by the aggregator
    pub depth: usize,
    /// Own weight plus all descendants' weights, populated by the aggregator
    pub cumulative_weight: u64,
}

/// Arena-based multi-rooted tree of dependencies.
///
/// Uses a generational arena for memory-safe node references, so the
/// parser's insertion cursor never aliases into a growing container.
/// Root order and sibling order are exactly the order entries appeared
/// in the source text.
#[derive(Debug, Default)]
pub struct Forest {
    /// Arena storage for all nodes
    arena: Arena<Node>,
    /// Indices of the root nodes, in source-text order
    roots: Vec<Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Inserts a new node as the last child of `parent`, or as the last
    /// root when `parent` is `None`.
    ///
    /// Only the downward link is recorded here; the `parent` back-reference
    /// on the node itself stays unset until aggregation.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, leaf: Leaf, parent: Option<Index>) -> Index {
        let node = Node {
            label: leaf.label,
            weight: leaf.weight,
            children: Vec::new(),
            parent: None,
            depth: 0,
            cumulative_weight: 0,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut Node> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Total number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder traversal over all roots, left to right.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }
}

pub struct ForestIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
