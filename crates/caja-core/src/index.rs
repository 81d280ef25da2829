//! # Sales Index
//!
//! An ordered in-memory index over reconstructed sales: a plain unbalanced
//! binary search tree keyed by the sale total.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      SalesIndex (BST by total)                      │
//! │                                                                     │
//! │                     ┌─────────┐                                     │
//! │                     │ $300.00 │                                     │
//! │                     └────┬────┘                                     │
//! │              ┌───────────┴───────────┐                              │
//! │         ┌────┴────┐             ┌────┴────┐                         │
//! │         │ $100.00 │             │ $500.00 │                         │
//! │         └────┬────┘             └────┬────┘                         │
//! │              └──┐                ┌───┘                              │
//! │            ┌────┴────┐      ┌────┴────┐                             │
//! │            │ $100.00 │      │ $450.00 │                             │
//! │            └─────────┘      └─────────┘                             │
//! │                                                                     │
//! │  equal totals go RIGHT; in-order traversal yields                   │
//! │  non-decreasing totals: 100, 100, 300, 450, 500                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rebalancing: worst-case depth is O(n) for already-sorted insertion
//! order. Nodes are never removed or mutated after insertion; the index is
//! rebuilt wholesale at startup and only grows afterwards.
//!
//! Not internally synchronized; a concurrent host must serialize access.

use serde::{Deserialize, Serialize};

use crate::types::Sale;

// =============================================================================
// Tree
// =============================================================================

/// Ordered index of sales, keyed by `sale.total()` only.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SalesIndex {
    root: Option<Box<Node>>,
    len: usize,
}

/// A node owns its sale and both subtrees. No cycles, no sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    sale: Sale,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(sale: Sale) -> Box<Node> {
        Box::new(Node {
            sale,
            left: None,
            right: None,
        })
    }
}

impl SalesIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        SalesIndex { root: None, len: 0 }
    }

    /// Number of sales in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no sales.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a sale, descending by total.
    ///
    /// Strictly-less goes left; everything else — including an equal total —
    /// goes right. Duplicate totals therefore accumulate in the right
    /// subtree rather than being rejected, which keeps every recorded sale
    /// listable. The iterative descent keeps insertion depth off the call
    /// stack even for degenerate (sorted-input) trees.
    pub fn insert(&mut self, sale: Sale) {
        let total = sale.total();
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            if total < node.sale.total() {
                cursor = &mut node.left;
            } else {
                cursor = &mut node.right;
            }
        }
        *cursor = Some(Node::new(sale));
        self.len += 1;
    }

    /// In-order traversal: left subtree, node, right subtree.
    ///
    /// Yields sales in non-decreasing total order as a fresh snapshot
    /// `Vec`, not a live view of the tree.
    pub fn in_order(&self) -> Vec<Sale> {
        let mut sales = Vec::with_capacity(self.len);
        collect_in_order(&self.root, &mut sales);
        sales
    }
}

fn collect_in_order(node: &Option<Box<Node>>, out: &mut Vec<Sale>) {
    if let Some(node) = node {
        collect_in_order(&node.left, out);
        out.push(node.sale.clone());
        collect_in_order(&node.right, out);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
