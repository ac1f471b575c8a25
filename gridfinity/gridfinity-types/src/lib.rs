//! Core value types for Gridfinity storage bin design.
//!
//! This crate provides the validated inputs every other stage of the bin
//! pipeline consumes:
//!
//! - [`GridDimension`] - Bin size in grid units with millimeter accessors
//! - [`Divisions`] - Partition rows, either bucket counts or relative weights
//! - [`Properties`] - The full, validated design input
//! - [`Advisory`] - Non-fatal diagnostics collected while planning geometry
//! - [`BinConfig`] - Serde-facing configuration surface
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with zero geometry-kernel dependencies. Everything
//! here is a plain value: construct it once, validate it eagerly, never
//! mutate it.
//!
//! # Units
//!
//! Dimensions are given in grid units. All derived lengths are `f64`
//! millimeters. The standard constants live in [`standard`].
//!
//! # Coordinate System
//!
//! Footprint coordinates are measured from the front-left corner of the bin:
//!
//! - X: width (left/right)
//! - Y: depth, growing toward the back row
//! - Z: height (up/down)
//!
//! # Example
//!
//! ```
//! use gridfinity_types::{Divisions, FeatureFlags, GridDimension, Properties};
//!
//! let dimension = GridDimension::new(2, 3, 4).unwrap();
//! let divisions = Divisions::from_counts([1, 2, 3]);
//! let props = Properties::new(dimension, divisions, 0.8, FeatureFlags::default()).unwrap();
//!
//! assert_eq!(props.describe(), "gridfinity-2x3x4-w0.8");
//! assert!((dimension.x_mm() - 83.5).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod advisory;
mod config;
mod dimension;
mod divisions;
mod error;
mod properties;
pub mod standard;

pub use advisory::{Advisory, AdvisorySeverity};
pub use config::BinConfig;
pub use dimension::GridDimension;
pub use divisions::{Divisions, Row};
pub use error::{BinError, BinResult};
pub use properties::{FeatureFlags, Properties, PropertiesBuilder, validate_wall_thickness};
