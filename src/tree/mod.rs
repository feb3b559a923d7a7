//! Take tree: the hierarchical model of a recording session.

pub mod access;
pub mod events;
pub mod node;
mod take_tree;

pub use access::{FieldValue, TreeAccess};
pub use events::{ListenerId, TreeEvent, TreeListener};
pub use node::{NodeData, SequenceNode, SlateNode, TakeNode, TreeNode};
pub use take_tree::{AddTakeOutcome, TakeTree};
