//! Error types for bin design input validation.

use thiserror::Error;

/// Result type alias for bin design operations.
pub type BinResult<T> = Result<T, BinError>;

/// Structural input errors.
///
/// These are raised eagerly at construction time, before any geometry is
/// attempted. None of them is recoverable by the pipeline itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinError {
    /// Grid dimensions below the standard minimum.
    #[error("invalid dimension {x}x{y}x{z}: {reason}")]
    InvalidDimension {
        /// Width in grid units.
        x: u32,
        /// Depth in grid units.
        y: u32,
        /// Height in grid units.
        z: u32,
        /// Which bound was violated.
        reason: &'static str,
    },

    /// Number of division rows does not match the bin depth.
    #[error("divisions have {rows} rows but the bin is {expected} units long")]
    RowCountMismatch {
        /// Rows supplied.
        rows: usize,
        /// Rows required (the `y` grid dimension).
        expected: u32,
    },

    /// A division row cannot be partitioned.
    #[error("division row {row} is invalid: {reason}")]
    InvalidDivision {
        /// Zero-based row index, counted from the front.
        row: usize,
        /// Why the row was rejected.
        reason: String,
    },

    /// Wall thickness is not a finite positive length.
    #[error("wall thickness must be a positive length, got {0}")]
    InvalidWallThickness(f64),
}

impl BinError {
    /// Create an invalid dimension error.
    #[must_use]
    pub const fn invalid_dimension(x: u32, y: u32, z: u32, reason: &'static str) -> Self {
        Self::InvalidDimension { x, y, z, reason }
    }

    /// Create an invalid division error.
    #[must_use]
    pub fn invalid_division(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDivision {
            row,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BinError::invalid_dimension(1, 1, 1, "units high cannot be less than 2");
        assert!(format!("{err}").contains("1x1x1"));

        let err = BinError::RowCountMismatch {
            rows: 2,
            expected: 3,
        };
        assert!(format!("{err}").contains("2 rows"));

        let err = BinError::invalid_division(4, "row has no buckets");
        assert!(format!("{err}").contains("row 4"));

        let err = BinError::InvalidWallThickness(-0.5);
        assert!(format!("{err}").contains("-0.5"));
    }
}
