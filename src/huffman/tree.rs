use crate::error::{Error, Result};
use crate::huffman::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One vertex of a prefix-code tree. Each leaf ends a codeword; the path
/// from the root spells the code (left is 0, right is 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A byte together with how often it occurs.
    Leaf { symbol: u8, weight: usize },
    /// Owns both subtrees; `weight` is the sum of theirs.
    Internal {
        weight: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the weight of the node.
    pub fn weight(&self) -> usize {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Number of internal nodes below (and including) this node.
    pub fn internal_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Heap entry for building the tree.
///
/// Entries are ordered by weight and then by insertion sequence, both
/// reversed so that `BinaryHeap` pops the lightest, oldest node first.
#[derive(Debug)]
struct HeapEntry {
    seq: usize,
    node: HuffmanNode,
}

impl HeapEntry {
    fn key(&self) -> (usize, usize) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower weight, then lower sequence number, comes first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree for a frequency table.
///
/// Leaves are seeded in ascending symbol order and numbered as they are
/// inserted; every merged node takes the next number. The two lowest entries
/// are merged until one remains, with the first one removed becoming the left
/// child. Equal weights are resolved by the insertion number, so the same
/// table always yields the same tree.
///
/// A table with a single symbol yields a single leaf.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the table has no symbols, and
/// [`Error::Overflow`] if a merged weight does not fit in `usize`.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Result<HuffmanNode> {
    let mut heap = BinaryHeap::with_capacity(freq_table.len());
    let mut seq = 0;
    for (symbol, weight) in freq_table.iter() {
        heap.push(HeapEntry {
            seq,
            node: HuffmanNode::Leaf { symbol, weight },
        });
        seq += 1;
    }

    // Combine nodes until only one tree remains.
    loop {
        let first = heap.pop().ok_or(Error::EmptyInput)?;
        let second = match heap.pop() {
            Some(entry) => entry,
            None => {
                log::debug!(
                    "built huffman tree: {} leaves, depth {}",
                    first.node.leaf_count(),
                    first.node.depth()
                );
                return Ok(first.node);
            }
        };

        let weight = first
            .node
            .weight()
            .checked_add(second.node.weight())
            .ok_or_else(|| {
                Error::Overflow(format!(
                    "merging weights {} and {}",
                    first.node.weight(),
                    second.node.weight()
                ))
            })?;
        log::trace!(
            "merge #{} (w={}) + #{} (w={}) -> #{} (w={})",
            first.seq,
            first.node.weight(),
            second.seq,
            second.node.weight(),
            seq,
            weight
        );
        heap.push(HeapEntry {
            seq,
            node: HuffmanNode::Internal {
                weight,
                left: Box::new(first.node),
                right: Box::new(second.node),
            },
        });
        seq += 1;
    }
}
