//! Partition rows.
//!
//! A bin is divided into one row per grid unit of depth. Each row is split
//! into buckets along the width, either evenly ([`Row::Count`]) or by
//! relative weights ([`Row::Weights`]). Weights are normalized by the row's
//! own sum and are never compared across rows.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{BinError, BinResult};

/// One partition row.
///
/// Deserializes from either an integer (`3`) or an array of weights
/// (`[2, 1]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    /// `N` buckets of equal width.
    Count(u32),
    /// Buckets with widths proportional to these weights.
    Weights(Vec<f64>),
}

impl Row {
    /// Number of buckets in this row.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        match self {
            Self::Count(n) => *n as usize,
            Self::Weights(w) => w.len(),
        }
    }

    /// Relative weights of this row's buckets.
    ///
    /// A count row expands to `N` weights of `1.0`.
    #[must_use]
    pub fn weights(&self) -> Cow<'_, [f64]> {
        match self {
            Self::Count(n) => Cow::Owned(vec![1.0; *n as usize]),
            Self::Weights(w) => Cow::Borrowed(w),
        }
    }

    /// Check that the row can be partitioned.
    ///
    /// # Errors
    ///
    /// Returns [`BinError::InvalidDivision`] if the row has no buckets or
    /// any weight is not finite and strictly positive.
    pub fn validate(&self, index: usize) -> BinResult<()> {
        if self.bucket_count() == 0 {
            return Err(BinError::invalid_division(index, "row has no buckets"));
        }
        if let Self::Weights(weights) = self
            && let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(BinError::invalid_division(
                index,
                format!("weight {bad} is not a positive number"),
            ));
        }
        Ok(())
    }
}

impl From<u32> for Row {
    fn from(count: u32) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<f64>> for Row {
    fn from(weights: Vec<f64>) -> Self {
        Self::Weights(weights)
    }
}

/// Ordered partition rows, front row first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Divisions {
    rows: Vec<Row>,
}

impl Divisions {
    /// Create divisions from rows.
    #[must_use]
    pub const fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Create divisions where every row is an equal-width bucket count.
    ///
    /// # Example
    ///
    /// ```
    /// use gridfinity_types::Divisions;
    ///
    /// let divisions = Divisions::from_counts([1, 1, 1]);
    /// assert_eq!(divisions.len(), 3);
    /// ```
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rows: counts.into_iter().map(Row::Count).collect(),
        }
    }

    /// A single undivided bucket per row.
    #[must_use]
    pub fn single(rows: u32) -> Self {
        Self::from_counts(std::iter::repeat_n(1, rows as usize))
    }

    /// The rows, front first.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of buckets across all rows.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.rows.iter().map(Row::bucket_count).sum()
    }

    /// Validate the row count against the bin depth and every row's content.
    ///
    /// # Errors
    ///
    /// Returns [`BinError::RowCountMismatch`] if the number of rows differs
    /// from `expected_rows`, or [`BinError::InvalidDivision`] for the first
    /// row that cannot be partitioned.
    pub fn validate(&self, expected_rows: u32) -> BinResult<()> {
        if self.rows.len() != expected_rows as usize {
            return Err(BinError::RowCountMismatch {
                rows: self.rows.len(),
                expected: expected_rows,
            });
        }
        self.rows
            .iter()
            .enumerate()
            .try_for_each(|(index, row)| row.validate(index))
    }
}

impl FromIterator<Row> for Divisions {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
