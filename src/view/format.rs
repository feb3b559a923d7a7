//! Format the take tree as tables, outlines, and JSON.

use crate::error::ApiError;
use crate::record::TakeRecord;
use crate::tree::{FieldValue, TreeAccess};
use crate::types::{Column, NodeId, NodeKind, Status, TYPE_COLUMN};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

const COLOR_BEST: (u8, u8, u8) = (0x0d, 0x81, 0x0d);
const COLOR_GOOD: (u8, u8, u8) = (0x27, 0x66, 0xb8);
const COLOR_BAD: (u8, u8, u8) = (0xb8, 0x27, 0x27);
const COLOR_NORMAL: (u8, u8, u8) = (0x3d, 0x3d, 0x3d);

/// RGB color a status is shown in.
pub fn status_color(status: Status) -> (u8, u8, u8) {
    match status {
        Status::Star => COLOR_BEST,
        Status::Good => COLOR_GOOD,
        Status::NoGood => COLOR_BAD,
        Status::Unset => COLOR_NORMAL,
    }
}

/// True when stdout is a terminal and NO_COLOR is unset.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Status cell text. With color an unset status shows as a dimmed `-`.
pub fn format_status(status: Status, color: bool) -> String {
    if !color {
        return status.token().to_string();
    }
    let (r, g, b) = status_color(status);
    match status {
        Status::Unset => format!("{}", "-".truecolor(r, g, b)),
        _ => format!("{}", status.token().truecolor(r, g, b).bold()),
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn cell(access: &dyn TreeAccess, node: NodeId, column: Column, color: bool) -> String {
    match access.field_value(node, column.name()) {
        Some(FieldValue::Status(status)) => format_status(status, color),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

/// Depth-first walk yielding every node below the root with its depth.
fn walk(access: &dyn TreeAccess, node: NodeId, depth: usize, out: &mut Vec<(NodeId, usize)>) {
    for index in 0..access.row_count_under(node) {
        if let Some(child) = access.child_at(node, index) {
            out.push((child, depth));
            walk(access, child, depth + 1, out);
        }
    }
}

/// Grouped table: one row per sequence and slate, followed by its takes.
pub fn format_take_table(access: &dyn TreeAccess, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Take List")));

    let mut nodes = Vec::new();
    walk(access, NodeId::ROOT, 0, &mut nodes);
    if nodes.is_empty() {
        out.push_str("  No takes logged.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(
        (0..access.column_count())
            .filter_map(|i| access.header(i))
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>(),
    );

    let mut takes = 0usize;
    for (node, _) in nodes {
        let row: Vec<String> = match access.node_kind(node) {
            Some(NodeKind::Take) => {
                takes += 1;
                Column::ALL
                    .iter()
                    .map(|&column| match column {
                        Column::Sequence | Column::Slate => String::new(),
                        _ => cell(access, node, column, color),
                    })
                    .collect()
            }
            Some(NodeKind::Sequence) | Some(NodeKind::Slate) => Column::ALL
                .iter()
                .map(|&column| cell(access, node, column, color))
                .collect(),
            _ => continue,
        };
        table.add_row(row);
    }

    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("  Total takes: {}\n", takes));
    out
}

/// Indented outline: sequences, slates, then one line per take.
pub fn format_tree_outline(access: &dyn TreeAccess, color: bool) -> String {
    let mut nodes = Vec::new();
    walk(access, NodeId::ROOT, 0, &mut nodes);

    let mut out = String::new();
    for (node, depth) in nodes {
        let indent = "  ".repeat(depth);
        let tag = access
            .field_value(node, TYPE_COLUMN)
            .map(|v| v.to_string())
            .unwrap_or_default();
        match access.node_kind(node) {
            Some(NodeKind::Sequence) => out.push_str(&format!(
                "{}{} [{}]\n",
                indent,
                cell(access, node, Column::Sequence, false),
                tag
            )),
            Some(NodeKind::Slate) => out.push_str(&format!(
                "{}{} [{}]\n",
                indent,
                cell(access, node, Column::Slate, false),
                tag
            )),
            Some(NodeKind::Take) => {
                let status = cell(access, node, Column::Status, color);
                let notes = cell(access, node, Column::Notes, false);
                let mut line = format!(
                    "{}Take {}  {}  {}s",
                    indent,
                    cell(access, node, Column::Take, false),
                    cell(access, node, Column::Timecode, false),
                    cell(access, node, Column::Duration, false),
                );
                if !status.is_empty() {
                    line.push_str(&format!("  {}", status));
                }
                if !notes.is_empty() {
                    line.push_str(&format!("  {}", notes));
                }
                out.push_str(&line);
                out.push('\n');
            }
            _ => {}
        }
    }
    out
}

pub fn format_records_json(records: &[TakeRecord]) -> Result<String, ApiError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize take list: {}", e)))
}
