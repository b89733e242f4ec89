//! Per-call metadata shared with contracts and hooks

use serde::Serialize;

use crate::signature::Signature;

/// Everything known about a `get_progress` call before the bar is written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallMetadata {
    /// Current progress value
    pub start_value: u64,

    /// Target progress value
    pub end_value: u64,

    /// Requested number of sectors
    pub length: usize,

    /// Signature the writer renders with
    pub signature: Signature,

    /// Name of the writer's calculation strategy
    pub calculation_service: String,

    /// Percentage as computed by that strategy
    pub percentage: f64,
}

/// Shape handed to external consumers of a rendered bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Concatenated glyphs
    pub bar: String,

    /// Progress percentage
    pub percentage: f64,

    /// Number of sectors
    pub length: usize,

    /// Current progress value
    pub current: u64,

    /// Target progress value
    pub target: u64,
}
