//! This module contains the Huffman coding tree and its greedy builder.
//!
//! The tree is an arena: nodes live in a single `Vec` and refer to their
//! children by index, so the whole structure is dropped as a unit. The same
//! arena type backs both the encoder's tree (built from frequencies) and the
//! decoder's tree (rebuilt from a persisted code table), where a missing child
//! marks a malformed container.

use bitvec::prelude::*;

use crate::error::HuffmanError;
use crate::kernels::frequency::FrequencyTable;
use crate::kernels::priority_queue::PriorityQueue;
use crate::types::Symbol;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf {
        symbol: Symbol,
    },
    Internal {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    /// Aggregate weight. Zero for nodes rebuilt from a code table.
    pub weight: u64,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Builds the optimal prefix-code tree for `frequencies`.
    ///
    /// Leaves are queued in ascending symbol order; on every step the first
    /// node extracted becomes the left child and the second the right child.
    /// An empty table produces an empty tree; a single distinct symbol
    /// produces a tree whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, HuffmanError> {
        let leaves = frequencies.iter_ascending();
        let mut tree = HuffmanTree {
            nodes: Vec::with_capacity(leaves.len().saturating_mul(2)),
            root: None,
        };
        if leaves.is_empty() {
            return Ok(tree);
        }

        let mut queue = PriorityQueue::with_capacity(leaves.len());
        for (symbol, weight) in leaves {
            let id = tree.alloc(weight, NodeKind::Leaf { symbol });
            queue.push(weight, id);
        }

        while queue.len() > 1 {
            let (left_weight, left) = queue.pop_min().ok_or_else(heap_underflow)?;
            let (right_weight, right) = queue.pop_min().ok_or_else(heap_underflow)?;
            let weight = left_weight.checked_add(right_weight).ok_or_else(|| {
                HuffmanError::InternalError("Huffman node weight overflowed u64".to_string())
            })?;
            let parent = tree.alloc(
                weight,
                NodeKind::Internal {
                    left: Some(left),
                    right: Some(right),
                },
            );
            queue.push(weight, parent);
        }

        let (_, root) = queue.pop_min().ok_or_else(heap_underflow)?;
        tree.root = Some(root);

        log_metric!(
            "event" = "build_tree",
            "leaves" = tree.leaf_count(),
            "nodes" = tree.len()
        );
        Ok(tree)
    }

    /// A tree holding only an internal root with no children, ready for
    /// codes to be grafted onto it.
    pub(crate) fn with_empty_root() -> Self {
        HuffmanTree {
            nodes: vec![TreeNode {
                weight: 0,
                kind: NodeKind::Internal {
                    left: None,
                    right: None,
                },
            }],
            root: Some(0),
        }
    }

    /// Attaches a leaf for `symbol` at the end of the path described by `code`,
    /// creating internal nodes as needed.
    ///
    /// Fails with `CorruptTree` if the path runs through an existing leaf or
    /// ends on an existing node, i.e. whenever `code` and an already grafted
    /// code are prefixes of one another.
    pub(crate) fn graft(
        &mut self,
        symbol: Symbol,
        code: &BitSlice<u8, Msb0>,
    ) -> Result<(), HuffmanError> {
        let root = self
            .root
            .ok_or_else(|| HuffmanError::CorruptTree("Cannot graft onto an empty tree".into()))?;
        if code.is_empty() {
            return Err(HuffmanError::CorruptTree(format!(
                "Symbol {} has a zero-length code",
                symbol
            )));
        }

        let mut cursor = root;
        let last = code.len() - 1;
        for (depth, bit) in code.iter().by_vals().enumerate() {
            let (left, right) = match self.nodes[cursor].kind {
                NodeKind::Internal { left, right } => (left, right),
                NodeKind::Leaf { symbol: existing } => {
                    return Err(HuffmanError::CorruptTree(format!(
                        "Code for symbol {} passes through the leaf of symbol {}",
                        symbol, existing
                    )))
                }
            };
            let slot = if bit { right } else { left };

            cursor = match slot {
                Some(_) if depth == last => {
                    return Err(HuffmanError::CorruptTree(format!(
                        "Code for symbol {} collides with an existing code path",
                        symbol
                    )))
                }
                Some(child) => child,
                None => {
                    let kind = if depth == last {
                        NodeKind::Leaf { symbol }
                    } else {
                        NodeKind::Internal {
                            left: None,
                            right: None,
                        }
                    };
                    let child = self.alloc(0, kind);
                    self.set_child(cursor, bit, child);
                    child
                }
            };
        }
        Ok(())
    }

    /// Follows one edge: `false` (0) to the left child, `true` (1) to the right.
    pub fn child(&self, id: NodeId, bit: bool) -> Result<NodeId, HuffmanError> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Internal { left, right } => {
                let next = if bit { right } else { left };
                next.ok_or_else(|| {
                    HuffmanError::CorruptTree(format!(
                        "Node {} has no {} child",
                        id,
                        if bit { "right" } else { "left" }
                    ))
                })
            }
            NodeKind::Leaf { .. } => Err(HuffmanError::CorruptTree(format!(
                "Attempted to descend below leaf node {}",
                id
            ))),
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&TreeNode, HuffmanError> {
        self.nodes.get(id).ok_or_else(|| {
            HuffmanError::CorruptTree(format!("Node index {} is outside the arena", id))
        })
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    pub fn root_weight(&self) -> u64 {
        self.root.map(|r| self.nodes[r].weight).unwrap_or(0)
    }

    fn alloc(&mut self, weight: u64, kind: NodeKind) -> NodeId {
        self.nodes.push(TreeNode { weight, kind });
        self.nodes.len() - 1
    }

    fn set_child(&mut self, parent: NodeId, bit: bool, child: NodeId) {
        if let NodeKind::Internal { left, right } = &mut self.nodes[parent].kind {
            if bit {
                *right = Some(child);
            } else {
                *left = Some(child);
            }
        }
    }
}

fn heap_underflow() -> HuffmanError {
    HuffmanError::InternalError("Priority queue underflow during tree construction".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(symbols: &[Symbol], alphabet: u32) -> FrequencyTable {
        FrequencyTable::from_symbols(symbols, alphabet).unwrap()
    }

    fn leaf_symbol(tree: &HuffmanTree, id: NodeId) -> Option<Symbol> {
        match tree.node(id).unwrap().kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    #[test]
    fn test_empty_table_builds_empty_tree() {
        let tree = HuffmanTree::build(&table(&[], 256)).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root_weight(), 0);
    }

    #[test]
    fn test_single_symbol_root_is_leaf() {
        let tree = HuffmanTree::build(&table(&[42, 42, 42], 256)).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(leaf_symbol(&tree, root), Some(42));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(tree.root_weight(), 3);
    }

    #[test]
    fn test_three_symbol_shape_follows_tie_break() {
        // A=3, B=2, C=1: C and B merge first (C extracted first -> left),
        // then A (inserted before the merged node) wins the tie at weight 3.
        let (a, b, c) = (0, 1, 2);
        let tree = HuffmanTree::build(&table(&[a, a, a, b, b, c], 3)).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.root_weight(), 6);

        let left = tree.child(root, false).unwrap();
        let right = tree.child(root, true).unwrap();
        assert_eq!(leaf_symbol(&tree, left), Some(a));
        assert_eq!(leaf_symbol(&tree, right), None);
        assert_eq!(
            leaf_symbol(&tree, tree.child(right, false).unwrap()),
            Some(c)
        );
        assert_eq!(
            leaf_symbol(&tree, tree.child(right, true).unwrap()),
            Some(b)
        );
    }

    #[test]
    fn test_leaf_and_internal_counts() {
        let symbols: Vec<Symbol> = (0..50u32).flat_map(|s| vec![s; (s % 7 + 1) as usize]).collect();
        let tree = HuffmanTree::build(&table(&symbols, 64)).unwrap();
        assert_eq!(tree.leaf_count(), 50);
        assert_eq!(tree.internal_count(), 49);
        assert_eq!(tree.root_weight(), symbols.len() as u64);
    }

    #[test]
    fn test_child_of_leaf_is_corrupt() {
        let tree = HuffmanTree::build(&table(&[7], 256)).unwrap();
        let root = tree.root().unwrap();
        assert!(matches!(
            tree.child(root, false),
            Err(HuffmanError::CorruptTree(_))
        ));
    }

    #[test]
    fn test_graft_detects_prefix_collisions() {
        let mut tree = HuffmanTree::with_empty_root();
        tree.graft(1, bits![u8, Msb0; 0]).unwrap();
        tree.graft(2, bits![u8, Msb0; 1, 0]).unwrap();

        // Passes through leaf `0`.
        assert!(matches!(
            tree.graft(3, bits![u8, Msb0; 0, 1]),
            Err(HuffmanError::CorruptTree(_))
        ));
        // Ends on the internal node `1`.
        assert!(matches!(
            tree.graft(4, bits![u8, Msb0; 1]),
            Err(HuffmanError::CorruptTree(_))
        ));
        // Empty code.
        assert!(matches!(
            tree.graft(5, BitSlice::<u8, Msb0>::empty()),
            Err(HuffmanError::CorruptTree(_))
        ));
    }

    #[test]
    fn test_incomplete_grafted_tree_reports_missing_child() {
        let mut tree = HuffmanTree::with_empty_root();
        tree.graft(9, bits![u8, Msb0; 0]).unwrap();
        let root = tree.root().unwrap();
        assert!(tree.child(root, false).is_ok());
        assert!(matches!(
            tree.child(root, true),
            Err(HuffmanError::CorruptTree(_))
        ));
    }
}
