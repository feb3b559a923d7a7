//! Arena node types for the take tree.

use crate::timecode::Timecode;
use crate::types::{NodeId, NodeKind, Status};

/// Sequence node: top-level grouping under the root.
#[derive(Debug, Clone)]
pub struct SequenceNode {
    pub name: String,
}

/// Slate node: a named shot setup within a sequence.
#[derive(Debug, Clone)]
pub struct SlateNode {
    pub name: String,
}

/// Take node: one recorded attempt of a slate. Always a leaf.
#[derive(Debug, Clone)]
pub struct TakeNode {
    pub number: u32,
    pub timecode: Timecode,
    pub duration: f64,
    pub status: Status,
    pub notes: String,
}

/// Per-level payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Root,
    Sequence(SequenceNode),
    Slate(SlateNode),
    Take(TakeNode),
}

/// Arena entry. The parent link is a handle, not an owning reference.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn root() -> Self {
        Self {
            data: NodeData::Root,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn new(data: NodeData, parent: NodeId) -> Self {
        Self {
            data,
            parent: Some(parent),
            children: Vec::new(),
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Root => NodeKind::Root,
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Slate(_) => NodeKind::Slate,
            NodeData::Take(_) => NodeKind::Take,
        }
    }

    /// Human-readable label for tree views.
    pub fn label(&self) -> String {
        match &self.data {
            NodeData::Root => String::new(),
            NodeData::Sequence(seq) => seq.name.clone(),
            NodeData::Slate(slate) => slate.name.clone(),
            NodeData::Take(take) => format!("Take {}", take.number),
        }
    }

    pub fn as_take(&self) -> Option<&TakeNode> {
        match &self.data {
            NodeData::Take(take) => Some(take),
            _ => None,
        }
    }

    /// Name of a sequence or slate node.
    pub fn name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Sequence(seq) => Some(&seq.name),
            NodeData::Slate(slate) => Some(&slate.name),
            _ => None,
        }
    }
}
