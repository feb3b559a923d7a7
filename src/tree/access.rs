//! Toolkit-neutral data access used by view adapters.

use crate::tree::node::NodeData;
use crate::tree::TakeTree;
use crate::types::{Column, NodeId, NodeKind, Status, TYPE_COLUMN};
use std::fmt;

/// Cell value produced for a (node, column) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
    Float(f64),
    Status(Status),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Status(status) => f.write_str(status.token()),
        }
    }
}

/// Structural and per-column queries a tree view needs.
///
/// A view binding translates these into whatever its UI toolkit's model
/// protocol expects; the take tree itself knows nothing about rendering.
pub trait TreeAccess {
    fn row_count_under(&self, node: NodeId) -> usize;

    fn has_children(&self, node: NodeId) -> bool {
        self.row_count_under(node) > 0
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId>;

    /// None for the root and for unknown handles.
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    /// Position of `node` among its siblings; 0 for the root.
    fn row_of(&self, node: NodeId) -> usize;

    fn node_kind(&self, node: NodeId) -> Option<NodeKind>;

    fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    fn header(&self, index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    fn field_value(&self, node: NodeId, column: &str) -> Option<FieldValue>;

    fn is_editable(&self, column: &str) -> bool {
        Column::from_name(column)
            .map(|c| c.is_editable())
            .unwrap_or(false)
    }
}

impl TreeAccess for TakeTree {
    fn row_count_under(&self, node: NodeId) -> usize {
        self.children_of(node).len()
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children_of(node).get(index).copied()
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent()
    }

    fn row_of(&self, node: NodeId) -> usize {
        self.parent_of(node)
            .and_then(|parent| self.children_of(parent).iter().position(|&c| c == node))
            .unwrap_or(0)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|n| n.kind())
    }

    fn field_value(&self, node: NodeId, column: &str) -> Option<FieldValue> {
        let entry = self.node(node)?;
        if column.trim().eq_ignore_ascii_case(TYPE_COLUMN) {
            return match entry.kind() {
                NodeKind::Root => None,
                kind => Some(FieldValue::Text(kind.type_tag().to_string())),
            };
        }

        let column = Column::from_name(column)?;
        match (entry.data(), column) {
            (NodeData::Sequence(seq), Column::Sequence) => Some(FieldValue::Text(seq.name.clone())),
            (NodeData::Slate(slate), Column::Slate) => Some(FieldValue::Text(slate.name.clone())),
            (NodeData::Take(_), Column::Sequence) | (NodeData::Take(_), Column::Slate) => {
                // Takes resolve their context columns from their ancestors.
                let slate_id = entry.parent()?;
                let ancestor = if column == Column::Slate {
                    slate_id
                } else {
                    self.parent_of(slate_id)?
                };
                let name = self.node(ancestor)?.name()?;
                Some(FieldValue::Text(name.to_string()))
            }
            (NodeData::Take(take), Column::Take) => Some(FieldValue::Integer(take.number)),
            (NodeData::Take(take), Column::Timecode) => {
                Some(FieldValue::Text(take.timecode.to_string()))
            }
            (NodeData::Take(take), Column::Duration) => Some(FieldValue::Float(take.duration)),
            (NodeData::Take(take), Column::Status) => Some(FieldValue::Status(take.status)),
            (NodeData::Take(take), Column::Notes) => Some(FieldValue::Text(take.notes.clone())),
            _ => None,
        }
    }
}
