//! Flat, one-row-per-take projection of the take tree.

use crate::error::ApiError;
use crate::timecode::Timecode;
use crate::types::Status;
use serde::{Deserialize, Serialize};

/// One take annotated with the names of its sequence and slate.
///
/// Field order matches the take list file's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeRecord {
    #[serde(rename = "Sequence")]
    pub sequence: String,
    #[serde(rename = "Slate")]
    pub slate: String,
    #[serde(rename = "Take")]
    pub take: u32,
    #[serde(rename = "Timecode")]
    pub timecode: Timecode,
    #[serde(rename = "Duration")]
    pub duration: f64,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl TakeRecord {
    /// Check identifying keys and attributes before they reach the tree.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_name("Sequence", &self.sequence)?;
        validate_name("Slate", &self.slate)?;
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "Duration must be a non-negative number, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

/// Sequence and slate names must be non-empty and free of control characters.
pub fn validate_name(kind: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} name cannot be empty", kind)));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ApiError::InvalidInput(format!(
            "{} name contains control characters: {:?}",
            kind, value
        )));
    }
    Ok(())
}
