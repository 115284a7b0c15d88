//! Index-addressed view of the working tree.
//!
//! Scoring needs to walk upwards from candidates to their ancestors. Rather
//! than threading parent pointers through the DOM, each element gets a slot
//! in a flat arena, numbered in document pre-order, that records its parent
//! slot and the end of its subtree. Pre-order numbering gives a cheap
//! "is descendant" test and a deterministic tie-break order.

use std::collections::HashMap;

use crate::dom::{self, Document, NodeId, NodeRef};

/// One element of the working tree.
#[derive(Clone)]
pub struct ArenaNode<'a> {
    /// The element itself.
    pub node: NodeRef<'a>,
    /// Lowercase tag name.
    pub tag: String,
    /// Slot of the nearest element ancestor.
    pub parent: Option<usize>,
    /// One past the slot of the last descendant.
    subtree_end: usize,
}

/// Elements of a document in pre-order, addressed by slot index.
pub struct NodeArena<'a> {
    nodes: Vec<ArenaNode<'a>>,
    slots: HashMap<NodeId, usize>,
}

impl<'a> NodeArena<'a> {
    /// Build the arena from every element reachable from the document root.
    #[must_use]
    pub fn build(doc: &'a Document) -> Self {
        let mut nodes: Vec<ArenaNode<'a>> = Vec::new();
        let mut slots: HashMap<NodeId, usize> = HashMap::new();

        for node in doc.root().descendants() {
            let Some(tag) = dom::tag_name(&node) else {
                continue;
            };

            let mut parent = None;
            let mut current = node.parent();
            while let Some(ancestor) = current {
                if let Some(&slot) = slots.get(&ancestor.id) {
                    parent = Some(slot);
                    break;
                }
                current = ancestor.parent();
            }

            let slot = nodes.len();
            slots.insert(node.id, slot);
            nodes.push(ArenaNode {
                node,
                tag,
                parent,
                subtree_end: slot + 1,
            });
        }

        // Children always sit after their parent, so one reverse sweep
        // settles every subtree boundary.
        for slot in (0..nodes.len()).rev() {
            if let Some(parent) = nodes[slot].parent {
                let end = nodes[slot].subtree_end;
                if end > nodes[parent].subtree_end {
                    nodes[parent].subtree_end = end;
                }
            }
        }

        Self { nodes, slots }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ArenaNode<'a>> {
        self.nodes.get(slot)
    }

    /// Iterate `(slot, node)` pairs in document pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ArenaNode<'a>)> {
        self.nodes.iter().enumerate()
    }

    /// Slot of a DOM node, if it is an element of this tree.
    #[must_use]
    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// Slot of the parent element.
    #[must_use]
    pub fn parent(&self, slot: usize) -> Option<usize> {
        self.nodes.get(slot).and_then(|n| n.parent)
    }

    /// Whether `slot` lies strictly inside the subtree rooted at `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, slot: usize, ancestor: usize) -> bool {
        self.nodes
            .get(ancestor)
            .is_some_and(|a| ancestor < slot && slot < a.subtree_end)
    }

    /// Slot of the first `<body>` element.
    #[must_use]
    pub fn body(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.tag == "body")
    }
}
