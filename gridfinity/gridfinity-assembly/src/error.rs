//! Error types for kernel recording and export.

use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportFormat;
use crate::recording::SolidId;

/// Result type for recording kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised by [`RecordingKernel`](crate::RecordingKernel) on degenerate
/// input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A box with a non-positive extent was requested.
    #[error("Degenerate box: {width} x {length} x {height} mm")]
    DegenerateBox {
        /// Footprint width in mm.
        width: f64,
        /// Footprint length in mm.
        length: f64,
        /// Height in mm.
        height: f64,
    },

    /// A profile has no area, or an extrusion has zero length.
    #[error("Degenerate profile: {reason}")]
    DegenerateProfile {
        /// What is wrong with the profile.
        reason: String,
    },

    /// A loft needs at least two sections.
    #[error("Loft needs at least 2 sections, got {0}")]
    TooFewSections(usize),

    /// Replication with no target positions.
    #[error("Cannot replicate a solid to zero positions")]
    EmptyReplication,

    /// Hole pattern with no positions.
    #[error("Hole pattern has no positions")]
    EmptyHolePattern,

    /// A solid id that this kernel never produced.
    #[error("Unknown solid {0}")]
    UnknownSolid(SolidId),
}

impl KernelError {
    /// Create a degenerate-profile error.
    #[must_use]
    pub fn degenerate_profile(reason: impl Into<String>) -> Self {
        Self::DegenerateProfile {
            reason: reason.into(),
        }
    }
}

/// Errors raised while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The exporter cannot write this format.
    #[error("Export format {0} is not supported by this exporter")]
    UnsupportedFormat(ExportFormat),

    /// The solid has no recorded history.
    #[error("Nothing recorded for solid {0}")]
    UnknownSolid(SolidId),

    /// I/O error during file operations.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
