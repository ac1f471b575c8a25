//! Non-fatal design diagnostics.
//!
//! Advisories are collected while planning geometry and returned alongside
//! the result. They never abort generation.

use serde::Serialize;

/// A non-fatal condition found while planning a bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// A bucket is at or below the minimum usable width.
    SmallBucket {
        /// Zero-based row index, counted from the front.
        row: usize,
        /// Zero-based bucket index within the row, counted from the left.
        column: usize,
        /// Computed bucket width in mm.
        width_mm: f64,
    },

    /// A label ledge was cut short because the bin is too low for a full
    /// 45 degree underside.
    LabelLedgeTruncated {
        /// Zero-based row index, counted from the front.
        row: usize,
        /// Ledge height actually available in mm.
        height_mm: f64,
        /// Horizontal run of the ledge in mm.
        run_mm: f64,
    },

    /// A label ledge was left out because the walls leave no height for it.
    LabelLedgeOmitted {
        /// Zero-based row index, counted from the front.
        row: usize,
        /// Vertical clearance left for the ledge in mm, zero or negative.
        clearance_mm: f64,
    },
}

impl Advisory {
    /// Severity of this advisory.
    #[must_use]
    pub const fn severity(&self) -> AdvisorySeverity {
        match self {
            Self::SmallBucket { .. } => AdvisorySeverity::Warning,
            Self::LabelLedgeTruncated { .. } => AdvisorySeverity::Info,
            Self::LabelLedgeOmitted { .. } => AdvisorySeverity::Warning,
        }
    }

    /// Row the advisory refers to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::SmallBucket { row, .. }
            | Self::LabelLedgeTruncated { row, .. }
            | Self::LabelLedgeOmitted { row, .. } => *row,
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SmallBucket {
                row,
                column,
                width_mm,
            } => write!(
                f,
                "bucket {column} in row {row} is {width_mm:.2}mm wide (minimum {:.0}mm)",
                crate::standard::MIN_BUCKET_WIDTH_MM
            ),
            Self::LabelLedgeTruncated {
                row,
                height_mm,
                run_mm,
            } => write!(
                f,
                "label ledge in row {row} truncated to {height_mm:.2}mm height over a {run_mm:.2}mm run"
            ),
            Self::LabelLedgeOmitted { row, clearance_mm } => write!(
                f,
                "label ledge in row {row} omitted, {clearance_mm:.2}mm of clearance"
            ),
        }
    }
}

/// Severity of an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    /// Informational only.
    Info,
    /// Geometry is produced but may not be practical.
    Warning,
}

impl AdvisorySeverity {
    /// Get a human-readable name for the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
        }
    }
}
