//! Bucket partitioning for Gridfinity bins.
//!
//! Converts weighted partition rows into positioned, sized bucket rectangles
//! separated by walls of uniform thickness. Buckets and wall gaps together
//! tile the bin footprint exactly.
//!
//! # Algorithm
//!
//! For a bin with `R` rows, each row `r` with `C` buckets and weights `w`:
//!
//! - Row depth is uniform: `(y_mm - (R + 1) * wall) / R`
//! - Bucket width: `w[i] / sum(w) * (x_mm - (C + 1) * wall)`
//! - Origins start one wall in from the front-left corner and advance by
//!   bucket size plus one wall
//!
//! No rounding is applied. Buckets come out row-major, front row first,
//! left to right.
//!
//! # Example
//!
//! ```
//! use gridfinity_layout::layout;
//! use gridfinity_types::{Divisions, GridDimension, Row};
//!
//! let dimension = GridDimension::new(1, 1, 3).unwrap();
//! let divisions = Divisions::new(vec![Row::Weights(vec![2.0, 1.0])]);
//!
//! let result = layout(dimension, &divisions, 0.8).unwrap();
//! let widths: Vec<f64> = result.buckets().iter().map(|b| b.width_mm).collect();
//!
//! assert!((widths[0] / widths[1] - 2.0).abs() < 1e-9);
//! assert!((widths[0] + widths[1] + 3.0 * 0.8 - 41.5).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bucket;
mod layout;
mod rows;

pub use bucket::Bucket;
pub use layout::{Layout, layout, layout_properties};
pub use rows::RowStepping;
