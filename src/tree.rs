use crate::error::{Error, Result};
use crate::model::ProbabilityTable;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use total_float_wrap::TotalF64;

/// A node of the code tree.
///
/// Internal nodes always own exactly two children, so a node with a single
/// child cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<Symbol> {
    Leaf {
        symbol: Symbol,
        weight: TotalF64,
    },
    Internal {
        weight: TotalF64,
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    pub fn leaf(symbol: Symbol, p: f64) -> Self {
        Node::Leaf {
            symbol,
            weight: TotalF64(p),
        }
    }

    pub fn from_children(left: Node<Symbol>, right: Node<Symbol>) -> Self {
        Node::Internal {
            weight: TotalF64(left.weight() + right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, d)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((left.as_ref(), d + 1));
                    stack.push((right.as_ref(), d + 1));
                }
            }
        }
        max
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }
}

/// Heap entry. Ordered by weight, then by creation sequence so that equal
/// weights always merge in the same order.
#[derive(Derivative)]
#[derivative(
    PartialEq(bound = ""),
    Eq(bound = ""),
    PartialOrd(bound = ""),
    Ord(bound = "")
)]
struct Pending<Symbol> {
    weight: TotalF64,
    seq: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node<Symbol>,
}

impl<Symbol> Pending<Symbol> {
    fn new(seq: usize, node: Node<Symbol>) -> Reverse<Self> {
        Reverse(Self {
            weight: TotalF64(node.weight()),
            seq,
            node,
        })
    }
}

/// Build the code tree by repeatedly merging the two lightest nodes.
///
/// Leaves are sequenced in table order (first appearance in the input) and
/// merged nodes after them in creation order. Of each merged pair the lighter
/// node becomes the right child.
pub fn build_tree<Symbol>(probs: ProbabilityTable<Symbol>) -> Result<Node<Symbol>> {
    let mut pq: BinaryHeap<_> = probs
        .into_iter()
        .enumerate()
        .map(|(seq, (s, p))| Pending::new(seq, Node::leaf(s, p)))
        .collect();
    let mut seq = pq.len();

    loop {
        let Reverse(lightest) = pq.pop().ok_or(Error::EmptyInput)?;
        let Some(Reverse(next)) = pq.pop() else {
            return Ok(lightest.node);
        };

        pq.push(Pending::new(seq, Node::from_children(next.node, lightest.node)));
        seq += 1;
    }
}
