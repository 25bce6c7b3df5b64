use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use crate::error::CodecError;
use crate::tools::freq_count::FrequencyTable;

/// Payload of a tree node: either two owned children or a byte value.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, node_data: NodeData) -> Node {
        Node { weight, node_data }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }
}

/// Heap entry. The sequence number is handed out in insertion order so that equal weights
/// always come off the heap first-in first-out.
#[derive(Debug)]
struct Queued {
    seq: u32,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.node.weight == other.node.weight && self.seq == other.seq
    }
}
impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    /// Reversed so the max-heap pops the lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the Huffman tree for a frequency table.
///
/// Leaves are queued in ascending byte order. Each round pops the two lightest nodes; the first
/// popped becomes the left child of the merged node and the second the right child. With a
/// single distinct symbol the root is that lone leaf.
pub fn build_tree(freqs: &FrequencyTable) -> Result<Node, CodecError> {
    let mut seq = 0_u32;
    let mut heap = BinaryHeap::with_capacity(256);
    for (byte, weight) in freqs.iter() {
        heap.push(Queued {
            seq,
            node: Node::new(weight, NodeData::Leaf(byte)),
        });
        seq += 1;
    }

    while heap.len() > 1 {
        // Both pops are safe, the loop guard ensures at least two entries.
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let weight = left.node.weight + right.node.weight;
        heap.push(Queued {
            seq,
            node: Node::new(
                weight,
                NodeData::Kids(Box::new(left.node), Box::new(right.node)),
            ),
        });
        seq += 1;
    }

    let root = heap.pop().map(|q| q.node).ok_or(CodecError::EmptyInput)?;
    trace!(
        "Huffman tree built: {} symbols, weight {}, depth {}",
        freqs.distinct(),
        root.weight,
        root.depth()
    );
    Ok(root)
}
