//! Text and JSON renderings of the take list.
//!
//! Everything here reads the tree through [`crate::tree::TreeAccess`] only.

pub mod format;

pub use format::{
    color_enabled, format_records_json, format_section_heading, format_status, format_take_table,
    format_tree_outline, status_color,
};
