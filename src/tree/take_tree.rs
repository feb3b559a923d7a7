//! Three-level Sequence -> Slate -> Take store.

use crate::record::TakeRecord;
use crate::timecode::Timecode;
use crate::tree::events::{ListenerId, ListenerSet, TreeEvent, TreeListener};
use crate::tree::node::{NodeData, SequenceNode, SlateNode, TakeNode, TreeNode};
use crate::types::{Column, NodeId, NodeKind, Status};
use tracing::{debug, info, warn};

/// Result of inserting a take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTakeOutcome {
    /// A new take node was appended.
    Inserted(NodeId),
    /// A take with this number already existed under the slate; it was kept as is.
    Duplicate(NodeId),
}

impl AddTakeOutcome {
    pub fn node(self) -> NodeId {
        match self {
            AddTakeOutcome::Inserted(id) | AddTakeOutcome::Duplicate(id) => id,
        }
    }

    pub fn is_inserted(self) -> bool {
        matches!(self, AddTakeOutcome::Inserted(_))
    }
}

/// In-memory take tree.
///
/// All nodes live in one arena owned by the tree; parents own their children
/// by listing their handles, and children point back with a parent handle.
/// Nodes are only ever appended, so the structure stays acyclic.
pub struct TakeTree {
    nodes: Vec<TreeNode>,
    listeners: ListenerSet,
}

impl Default for TakeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TakeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeTree")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TakeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::root()],
            listeners: ListenerSet::default(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn take(&self, id: NodeId) -> Option<&TakeNode> {
        self.node(id).and_then(|n| n.as_take())
    }

    pub fn find_sequence(&self, name: &str) -> Option<NodeId> {
        self.find_named_child(NodeId::ROOT, NodeKind::Sequence, name)
    }

    pub fn find_slate(&self, sequence: NodeId, name: &str) -> Option<NodeId> {
        self.find_named_child(sequence, NodeKind::Slate, name)
    }

    pub fn find_take(&self, slate: NodeId, number: u32) -> Option<NodeId> {
        if self.node(slate)?.kind() != NodeKind::Slate {
            return None;
        }
        self.children_of(slate)
            .iter()
            .copied()
            .find(|&child| self.take(child).map(|t| t.number) == Some(number))
    }

    /// Resolve a take by its full identifying key.
    pub fn find_take_by_key(&self, sequence: &str, slate: &str, number: u32) -> Option<NodeId> {
        let seq = self.find_sequence(sequence)?;
        let slate = self.find_slate(seq, slate)?;
        self.find_take(slate, number)
    }

    fn find_named_child(&self, parent: NodeId, kind: NodeKind, name: &str) -> Option<NodeId> {
        self.children_of(parent).iter().copied().find(|&child| {
            self.node(child)
                .map(|n| n.kind() == kind && n.name() == Some(name))
                .unwrap_or(false)
        })
    }

    /// Log a take, creating its sequence and slate on demand.
    ///
    /// The take starts with `quality` as its status and `description` as its
    /// notes. If the slate already has a take with this number, the incoming data
    /// is discarded and the existing take is left untouched.
    pub fn add_take(
        &mut self,
        sequence: &str,
        slate: &str,
        take: u32,
        description: &str,
        quality: Status,
        timecode: Timecode,
    ) -> AddTakeOutcome {
        self.insert_take(
            sequence,
            slate,
            TakeNode {
                number: take,
                timecode,
                duration: 0.0,
                status: quality,
                notes: description.to_string(),
            },
        )
    }

    /// Insert a flat record with the same lookup-or-create rules as [`Self::add_take`].
    pub fn insert_record(&mut self, record: &TakeRecord) -> AddTakeOutcome {
        self.insert_take(
            &record.sequence,
            &record.slate,
            TakeNode {
                number: record.take,
                timecode: record.timecode,
                duration: record.duration,
                status: record.status,
                notes: record.notes.clone(),
            },
        )
    }

    fn insert_take(&mut self, sequence: &str, slate: &str, take: TakeNode) -> AddTakeOutcome {
        let seq_id = match self.find_sequence(sequence) {
            Some(id) => id,
            None => {
                info!("Adding sequence {}", sequence);
                self.append_child(
                    NodeId::ROOT,
                    NodeData::Sequence(SequenceNode {
                        name: sequence.to_string(),
                    }),
                )
            }
        };

        let slate_id = match self.find_slate(seq_id, slate) {
            Some(id) => id,
            None => {
                info!("Adding slate {} to sequence {}", slate, sequence);
                self.append_child(
                    seq_id,
                    NodeData::Slate(SlateNode {
                        name: slate.to_string(),
                    }),
                )
            }
        };

        if let Some(existing) = self.find_take(slate_id, take.number) {
            warn!(
                sequence,
                slate,
                take = take.number,
                "Take already exists in slate; discarding new take data"
            );
            return AddTakeOutcome::Duplicate(existing);
        }

        let number = take.number;
        let id = self.append_child(slate_id, NodeData::Take(take));
        info!("Adding take {} to {}/{}", number, sequence, slate);
        AddTakeOutcome::Inserted(id)
    }

    fn append_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(data, parent));
        let siblings = &mut self.nodes[parent.0].children;
        siblings.push(id);
        let row = siblings.len() - 1;
        self.emit(TreeEvent::RowsInserted {
            parent,
            row,
            node: id,
        });
        id
    }

    /// Edit one of the mutable take fields (`notes` or `status`).
    ///
    /// Returns false without changing anything when `node` is not a take, the
    /// field is not editable, or the status value does not parse.
    pub fn set_take_field(&mut self, node: NodeId, field: &str, value: &str) -> bool {
        let column = match Column::from_name(field) {
            Some(column) if column.is_editable() => column,
            _ => {
                debug!("Rejecting edit of non-editable field {:?}", field);
                return false;
            }
        };

        let take = match self.nodes.get_mut(node.0).map(|n| &mut n.data) {
            Some(NodeData::Take(take)) => take,
            _ => {
                debug!("Rejecting edit of {:?} on non-take node {}", field, node);
                return false;
            }
        };

        match column {
            Column::Notes => take.notes = value.to_string(),
            Column::Status => match value.parse::<Status>() {
                Ok(status) => take.status = status,
                Err(e) => {
                    debug!("Rejecting status edit on {}: {}", node, e);
                    return false;
                }
            },
            _ => return false,
        }

        debug!("Updated {} of take {}", column, node);
        self.emit(TreeEvent::DataChanged { node, column });
        true
    }

    /// One record per take, depth-first in append order.
    ///
    /// Always recomputed from the tree so exports reflect the latest edits.
    pub fn flatten(&self) -> Vec<TakeRecord> {
        let mut records = Vec::with_capacity(self.take_count());
        for &seq_id in self.children_of(NodeId::ROOT) {
            let sequence = self.node(seq_id).and_then(|n| n.name()).unwrap_or_default();
            for &slate_id in self.children_of(seq_id) {
                let slate = self.node(slate_id).and_then(|n| n.name()).unwrap_or_default();
                for &take_id in self.children_of(slate_id) {
                    if let Some(take) = self.take(take_id) {
                        records.push(TakeRecord {
                            sequence: sequence.to_string(),
                            slate: slate.to_string(),
                            take: take.number,
                            timecode: take.timecode,
                            duration: take.duration,
                            status: take.status,
                            notes: take.notes.clone(),
                        });
                    }
                }
            }
        }
        records
    }

    pub fn sequence_count(&self) -> usize {
        self.children_of(NodeId::ROOT).len()
    }

    pub fn take_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind() == NodeKind::Take)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.children_of(NodeId::ROOT).is_empty()
    }

    /// Register an observer; it is invoked after every committed mutation.
    pub fn subscribe(&mut self, listener: Box<dyn TreeListener + Send>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: TreeEvent) {
        if self.listeners.len() == 0 {
            return;
        }
        // Detach so listeners can read the tree while being called.
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.notify(self, &event);
        self.listeners = listeners;
    }
}
