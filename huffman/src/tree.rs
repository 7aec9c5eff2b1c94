use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Error;
use super::FrequencyTable;

/// Handle of a node inside a [`Tree`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx(u32);

impl NodeIdx {
    fn new(index: usize) -> NodeIdx {
        assert!(index <= u32::max_value() as usize);
        NodeIdx(index as u32)
    }
    fn to_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Node<S> {
    Leaf { symbol: S, weight: u64 },
    /// `children[0]` is reached by a 0 bit, `children[1]` by a 1 bit.
    Internal { weight: u64, children: [NodeIdx; 2] },
}

impl<S> Node<S> {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// Huffman tree stored as an arena.
///
/// The first `num_leaves` nodes are the leaves in frequency table order,
/// followed by the internal nodes in the order they were merged. The root is
/// always the last node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree<S> {
    nodes: Vec<Node<S>>,
    num_leaves: usize,
}

impl<S: Copy> Tree<S> {
    /// Builds the tree by repeatedly merging the two lightest candidates.
    ///
    /// Among candidates of equal weight, leaves win in frequency table
    /// order, and merged nodes come after everything that was already a
    /// candidate when they were created. The lighter candidate becomes the
    /// left (0) child.
    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Tree<S>, Error> {
        if frequencies.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let num_leaves = frequencies.len();
        let mut nodes: Vec<Node<S>> = Vec::with_capacity(num_leaves * 2 - 1);
        nodes.extend(frequencies.iter().map(|f| Node::Leaf {
            symbol: f.symbol,
            weight: f.count,
        }));

        // The node index doubles as insertion sequence number: leaves are
        // numbered in table order, merged nodes are pushed afterwards.
        let mut candidates: BinaryHeap<Reverse<(u64, NodeIdx)>> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| Reverse((n.weight(), NodeIdx::new(i))))
            .collect();

        while candidates.len() > 1 {
            // `candidates.len() > 1`, so these always succeed.
            let Reverse((weight0, left)) = candidates.pop().unwrap();
            let Reverse((weight1, right)) = candidates.pop().unwrap();

            // Total weight was checked to fit into a `u64`.
            let weight = weight0 + weight1;
            let node_idx = NodeIdx::new(nodes.len());
            nodes.push(Node::Internal {
                weight,
                children: [left, right],
            });
            candidates.push(Reverse((weight, node_idx)));
        }

        debug!(
            "built tree, leaves={} nodes={} weight={}",
            num_leaves,
            nodes.len(),
            frequencies.total(),
        );
        Ok(Tree { nodes, num_leaves })
    }
}

impl<S> Tree<S> {
    pub fn root(&self) -> NodeIdx {
        NodeIdx::new(self.nodes.len() - 1)
    }
    pub fn node(&self, idx: NodeIdx) -> &Node<S> {
        &self.nodes[idx.to_usize()]
    }
    pub fn root_node(&self) -> &Node<S> {
        self.node(self.root())
    }
    /// Total weight of all leaves.
    pub fn weight(&self) -> u64 {
        self.root_node().weight()
    }
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    /// Calls `f` with the symbol, weight and path from the root of every
    /// leaf, left subtrees first. `false` in the path is a left step.
    pub fn walk_leaves<F: FnMut(&S, u64, &[bool])>(&self, mut f: F) {
        let mut stack = vec![(self.root(), Vec::new())];
        while let Some((idx, path)) = stack.pop() {
            match *self.node(idx) {
                Node::Leaf { ref symbol, weight } => f(symbol, weight, &path),
                Node::Internal { children, .. } => {
                    let mut right = path.clone();
                    right.push(true);
                    let mut left = path;
                    left.push(false);
                    stack.push((children[1], right));
                    stack.push((children[0], left));
                }
            }
        }
    }
    /// Sum of weight times depth over all leaves.
    ///
    /// Counts may add up to `u64::MAX` and depths exceed one, so the sum is
    /// widened.
    pub fn weighted_path_length(&self) -> u128 {
        let mut result = 0;
        self.walk_leaves(|_, weight, path| result += weight as u128 * path.len() as u128);
        result
    }
}
