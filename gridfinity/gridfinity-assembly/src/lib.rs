//! Kernel-agnostic assembly of Gridfinity bins.
//!
//! This crate turns validated [`Properties`](gridfinity_types::Properties)
//! into a solid by driving a [`GeometryKernel`]: it plans every profile up
//! front ([`BinPlan`]) and then issues kernel calls in a fixed order
//! ([`assemble`]).
//!
//! # Overview
//!
//! - [`GeometryKernel`] - The operations a CAD backend must provide
//! - [`RecordingKernel`] - Records calls as serializable [`KernelOp`]s
//! - [`BinPlan`] / [`AssemblyStep`] - Precomputed geometry and step order
//! - [`assemble`] / [`build_bin`] - Run a plan against a kernel
//! - [`Exporter`] / [`PlanExporter`] - Write results to files
//!
//! # Quick Start
//!
//! ```
//! use gridfinity_assembly::{
//!     ExportFormat, ExportOptions, Exporter, PlanExporter, RecordingKernel, build_bin,
//!     output_path,
//! };
//! use gridfinity_types::{Divisions, GridDimension, Properties};
//!
//! let props = Properties::builder(GridDimension::new(2, 2, 4).unwrap())
//!     .divisions(Divisions::from_counts([2, 1]))
//!     .label_ledge(true)
//!     .build()
//!     .unwrap();
//!
//! let mut kernel = RecordingKernel::new();
//! let bin = build_bin(&mut kernel, &props).unwrap();
//! assert!(bin.advisories().is_empty());
//!
//! let dir = std::env::temp_dir();
//! let path = output_path(&dir, &props, ExportFormat::Json);
//! PlanExporter::new(&kernel)
//!     .export(bin.solid(), &path, ExportFormat::Json, &ExportOptions::default())
//!     .unwrap();
//! # std::fs::remove_file(path).unwrap();
//! ```
//!
//! # Errors
//!
//! Planning never fails. Kernel errors abort assembly and are returned
//! unmodified as the kernel's own error type.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bin;
mod error;
mod export;
mod kernel;
mod orchestrator;
mod plan;
mod recording;

pub use bin::{Bin, build_bin};
pub use error::{ExportError, ExportResult, KernelError, KernelResult};
pub use export::{ExportFormat, ExportOptions, Exporter, PlanExporter, SvgOptions, output_path};
pub use kernel::{Axis, ExtrudeMode, FaceSelector, GeometryKernel};
pub use orchestrator::assemble;
pub use plan::{AssemblyStep, BinPlan, Lip};
pub use recording::{KernelOp, RecordingKernel, SolidId};
