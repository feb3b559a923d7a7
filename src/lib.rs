//! Takelist: slate and take logging for recording sessions
//!
//! Keeps a Sequence -> Slate -> Take tree of everything recorded in a
//! session and persists it as a flat CSV take list.

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod session;
pub mod store;
pub mod timecode;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod view;

pub use error::{ApiError, StorageError};
pub use record::TakeRecord;
pub use session::{SharedSession, TakeSession};
pub use timecode::Timecode;
pub use tree::{AddTakeOutcome, TakeTree, TreeAccess};
pub use types::{Column, NodeId, NodeKind, Status};
