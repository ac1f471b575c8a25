//! Export of assembled bins.
//!
//! Mesh and CAD formats are written by kernel backends through the
//! [`Exporter`] trait. The in-tree [`PlanExporter`] writes the construction
//! plan recorded by a [`RecordingKernel`] as JSON.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gridfinity_types::Properties;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::recording::{KernelOp, RecordingKernel, SolidId};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Stereolithography mesh.
    Stl,
    /// STEP boundary representation.
    Step,
    /// Additive manufacturing format.
    Amf,
    /// 2D projected drawing.
    Svg,
    /// three.js JSON.
    Tjs,
    /// 2D drawing exchange.
    Dxf,
    /// VRML scene.
    Vrml,
    /// VTK polydata.
    Vtp,
    /// Recorded construction plan.
    Json,
}

impl ExportFormat {
    /// Every format.
    pub const ALL: [Self; 9] = [
        Self::Stl,
        Self::Step,
        Self::Amf,
        Self::Svg,
        Self::Tjs,
        Self::Dxf,
        Self::Vrml,
        Self::Vtp,
        Self::Json,
    ];

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Step => "step",
            Self::Amf => "amf",
            Self::Svg => "svg",
            Self::Tjs => "json",
            Self::Dxf => "dxf",
            Self::Vrml => "wrl",
            Self::Vtp => "vtp",
            Self::Json => "plan.json",
        }
    }

    /// Determine format from a file name.
    ///
    /// `.json` alone is ambiguous and maps to [`ExportFormat::Tjs`]; plans
    /// use the double extension `.plan.json`.
    ///
    /// # Example
    ///
    /// ```
    /// use gridfinity_assembly::ExportFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ExportFormat::from_path(Path::new("bin.STL")), Some(ExportFormat::Stl));
    /// assert_eq!(ExportFormat::from_path(Path::new("bin.plan.json")), Some(ExportFormat::Json));
    /// assert_eq!(ExportFormat::from_path(Path::new("bin.obj")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".plan.json") {
            return Some(Self::Json);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == ext)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stl => "STL",
            Self::Step => "STEP",
            Self::Amf => "AMF",
            Self::Svg => "SVG",
            Self::Tjs => "TJS",
            Self::Dxf => "DXF",
            Self::Vrml => "VRML",
            Self::Vtp => "VTP",
            Self::Json => "plan JSON",
        };
        f.write_str(name)
    }
}

/// Drawing settings for SVG projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgOptions {
    /// Draw the coordinate axes.
    pub show_axes: bool,
    /// Left margin in px.
    pub margin_left: f64,
    /// Top margin in px.
    pub margin_top: f64,
    /// Direction the model is viewed from.
    pub projection_dir: Vector3<f64>,
    /// Draw hidden edges.
    pub show_hidden: bool,
    /// Perspective focus distance.
    pub focus: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            show_axes: false,
            margin_left: 10.0,
            margin_top: 10.0,
            projection_dir: Vector3::new(2.75, -2.6, 2.0),
            show_hidden: false,
            focus: 500.0,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Linear tessellation tolerance in mm.
    pub tolerance: f64,
    /// Angular tessellation tolerance in radians.
    pub angular_tolerance: f64,
    /// Drawing settings, for SVG only.
    pub svg: Option<SvgOptions>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            angular_tolerance: 0.1,
            svg: None,
        }
    }
}

impl ExportOptions {
    /// Default options for `format`, with drawing settings for SVG.
    #[must_use]
    pub fn for_format(format: ExportFormat) -> Self {
        Self {
            svg: (format == ExportFormat::Svg).then(SvgOptions::default),
            ..Self::default()
        }
    }

    /// Set the linear tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Writes solids to files.
pub trait Exporter<S> {
    /// Export failure.
    type Error: std::error::Error;

    /// Write `solid` to `path` in `format`.
    ///
    /// # Errors
    ///
    /// Implementation-specific; typically an unsupported format or I/O
    /// failure.
    fn export(
        &mut self,
        solid: &S,
        path: &Path,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<(), Self::Error>;
}

/// File path for a bin: `dir/<describe()>.<extension>`.
///
/// # Example
///
/// ```
/// use gridfinity_assembly::{ExportFormat, output_path};
/// use gridfinity_types::{GridDimension, Properties};
/// use std::path::Path;
///
/// let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap()).build().unwrap();
/// let path = output_path(Path::new("out"), &props, ExportFormat::Stl);
/// assert_eq!(path, Path::new("out/gridfinity-1x1x3-w0.8.stl"));
/// ```
#[must_use]
pub fn output_path(dir: &Path, properties: &Properties, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}.{}", properties.describe(), format.extension()))
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    solid: SolidId,
    options: &'a ExportOptions,
    ops: &'a [KernelOp],
}

/// Writes the operations a recorded solid was built from as JSON.
#[derive(Debug, Clone, Copy)]
pub struct PlanExporter<'a> {
    kernel: &'a RecordingKernel,
    pretty: bool,
}

impl<'a> PlanExporter<'a> {
    /// Exporter over `kernel`'s log.
    #[must_use]
    pub const fn new(kernel: &'a RecordingKernel) -> Self {
        Self {
            kernel,
            pretty: true,
        }
    }

    /// Write compact JSON instead of pretty-printed.
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Write the plan for `solid` to any writer.
    ///
    /// # Errors
    ///
    /// [`ExportError::UnknownSolid`] if `solid` was not recorded, or
    /// [`ExportError::Json`] on a write failure.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        solid: SolidId,
        options: &ExportOptions,
    ) -> ExportResult<()> {
        let ops = self
            .kernel
            .history(solid)
            .ok_or(ExportError::UnknownSolid(solid))?;
        let document = PlanDocument {
            solid,
            options,
            ops,
        };
        if self.pretty {
            serde_json::to_writer_pretty(writer, &document)?;
        } else {
            serde_json::to_writer(writer, &document)?;
        }
        Ok(())
    }
}

impl Exporter<SolidId> for PlanExporter<'_> {
    type Error = ExportError;

    fn export(
        &mut self,
        solid: &SolidId,
        path: &Path,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportResult<()> {
        if format != ExportFormat::Json {
            return Err(ExportError::UnsupportedFormat(format));
        }

        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, *solid, options)?;
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), solid = %solid, "Exported plan");
        Ok(())
    }
}
