//! Mutation notifications for take tree observers.

use crate::tree::TakeTree;
use crate::types::{Column, NodeId};

/// Committed change to the take tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// `node` was appended as child number `row` of `parent`.
    RowsInserted {
        parent: NodeId,
        row: usize,
        node: NodeId,
    },
    /// An editable column of a take changed.
    DataChanged { node: NodeId, column: Column },
}

/// Observer invoked synchronously after each committed mutation.
///
/// Listeners see the tree in its post-mutation state but cannot mutate it.
pub trait TreeListener {
    fn on_event(&mut self, tree: &TakeTree, event: &TreeEvent);
}

impl<F> TreeListener for F
where
    F: FnMut(&TakeTree, &TreeEvent),
{
    fn on_event(&mut self, tree: &TakeTree, event: &TreeEvent) {
        self(tree, event)
    }
}

/// Registration handle returned by [`TakeTree::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners in subscription order.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn TreeListener + Send>)>,
}

impl ListenerSet {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn TreeListener + Send>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, tree: &TakeTree, event: &TreeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_event(tree, event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
