//! Core types shared by the take tree, its views, and the file format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle to a node in the take tree's arena.
///
/// Handles are plain indices; they are never reused for a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root every sequence hangs off.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Level of a node in the Sequence -> Slate -> Take hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Sequence,
    Slate,
    Take,
}

impl NodeKind {
    /// Type tag shown by views for grouping rows.
    pub fn type_tag(self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Sequence => "Sequence",
            NodeKind::Slate => "Slate",
            NodeKind::Take => "Take",
        }
    }
}

/// Quality rating of a take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    /// Best take (`S`).
    Star,
    /// Usable take (`G`).
    Good,
    /// Rejected take (`NG`).
    NoGood,
    /// No rating; written as an empty cell.
    #[default]
    Unset,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Star, Status::Good, Status::NoGood, Status::Unset];

    /// Token written to the take list file.
    pub fn token(self) -> &'static str {
        match self {
            Status::Star => "S",
            Status::Good => "G",
            Status::NoGood => "NG",
            Status::Unset => "",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unset" => Ok(Status::Unset),
            "s" | "star" => Ok(Status::Star),
            "g" | "good" => Ok(Status::Good),
            "ng" | "nogood" | "no-good" | "no_good" => Ok(Status::NoGood),
            other => Err(format!(
                "Invalid status '{}' (expected S, G, NG or empty)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.token().to_string()
    }
}

/// Columns of the take list, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Sequence,
    Slate,
    Take,
    Timecode,
    Duration,
    Status,
    Notes,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Sequence,
        Column::Slate,
        Column::Take,
        Column::Timecode,
        Column::Duration,
        Column::Status,
        Column::Notes,
    ];

    /// Name used for the file header and for column lookups.
    pub fn name(self) -> &'static str {
        match self {
            Column::Sequence => "Sequence",
            Column::Slate => "Slate",
            Column::Take => "Take",
            Column::Timecode => "Timecode",
            Column::Duration => "Duration",
            Column::Status => "Status",
            Column::Notes => "Notes",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Column::Sequence => "Sequence for this take",
            Column::Slate => "Slate for this take",
            Column::Take => "Take number",
            Column::Timecode => "Timecode at the start of this take",
            Column::Duration => "Duration of this take",
            Column::Status => "Status flags for this take",
            Column::Notes => "Notes for this take",
        }
    }

    /// Only notes and status may change after a take is logged.
    pub fn is_editable(self) -> bool {
        matches!(self, Column::Notes | Column::Status)
    }

    /// Case-insensitive lookup by column name.
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Virtual column resolving to a node's type tag.
pub const TYPE_COLUMN: &str = "Type";
