//! Gridfinity bin planner.
//!
//! Plans a bin from command-line arguments or a JSON configuration file,
//! runs it against the recording kernel and writes the construction plan.
//!
//! # Usage
//!
//! - `gridfinity 2 3 4` - Print the plan for a 2x3x4 bin to stdout
//! - `gridfinity 2 1 3 --divisions '[[2, 1]]' --label-ledge` - Weighted buckets
//! - `gridfinity --config bin.json --output out/` - Write `out/<name>.plan.json`
//!
//! Logging goes to stderr. `-v` enables info, `-vv` debug; `RUST_LOG`
//! overrides both.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use gridfinity_assembly::{
    BinPlan, ExportFormat, ExportOptions, Exporter, PlanExporter, RecordingKernel, assemble,
    output_path,
};
use gridfinity_profile::mate::LipStyle;
use gridfinity_types::{AdvisorySeverity, BinConfig, Divisions, Properties};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Plan a Gridfinity storage bin
#[derive(Parser)]
#[command(name = "gridfinity")]
#[command(about = "Plan parametric Gridfinity storage bins", long_about = None)]
#[command(version)]
struct Cli {
    /// Width in grid units (42 mm)
    #[arg(required_unless_present = "config")]
    x: Option<u32>,

    /// Depth in grid units (42 mm)
    #[arg(required_unless_present = "config")]
    y: Option<u32>,

    /// Height in grid units (7 mm)
    #[arg(required_unless_present = "config")]
    z: Option<u32>,

    /// Read the bin from a JSON configuration file
    #[arg(long, conflicts_with_all = ["x", "y", "z"])]
    config: Option<PathBuf>,

    /// Partition rows as JSON, front first, e.g. '[3, [2, 1]]'
    #[arg(long)]
    divisions: Option<String>,

    /// Wall thickness in mm
    #[arg(long)]
    wall: Option<f64>,

    /// Add finger scoops
    #[arg(long)]
    finger_scoop: bool,

    /// Add label ledges
    #[arg(long)]
    label_ledge: bool,

    /// Cut magnet pockets
    #[arg(long)]
    magnet_holes: bool,

    /// Cut screw holes
    #[arg(long)]
    screw_holes: bool,

    /// Stacking lip construction
    #[arg(long, value_enum, default_value_t = LipArg::Loft)]
    lip_style: LipArg,

    /// Linear tessellation tolerance in mm, recorded with the plan
    #[arg(long, default_value_t = 0.1)]
    tolerance: f64,

    /// Write the plan into this directory instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Fail when any advisory is a warning
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum LipArg {
    /// Lofted lip
    Loft,
    /// Legacy straight and tapered cuts
    TaperedCut,
}

impl From<LipArg> for LipStyle {
    fn from(arg: LipArg) -> Self {
        match arg {
            LipArg::Loft => Self::Loft,
            LipArg::TaperedCut => Self::TaperedCut,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let properties = properties_from_cli(&cli)?;
    let plan = BinPlan::new(&properties).with_lip_style(cli.lip_style.into());

    let mut kernel = RecordingKernel::new();
    let solid = assemble(&mut kernel, &plan)
        .with_context(|| format!("Failed to assemble {}", plan.name()))?;
    info!(name = plan.name(), ops = kernel.len(), "Assembled bin");

    let options = ExportOptions::default().with_tolerance(cli.tolerance);
    match &cli.output {
        Some(dir) => {
            let path = write_plan(&kernel, solid, dir, &properties, &options)?;
            println!("{}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            PlanExporter::new(&kernel).write_to(&mut handle, solid, &options)?;
            writeln!(handle)?;
        }
    }

    for advisory in plan.advisories() {
        eprintln!("{}: {advisory}", advisory.severity().as_str());
    }
    let has_warnings = plan
        .advisories()
        .iter()
        .any(|a| a.severity() == AdvisorySeverity::Warning);
    if cli.strict && has_warnings {
        bail!("{} has warnings", plan.name());
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn properties_from_cli(cli: &Cli) -> Result<Properties> {
    let mut config = match (&cli.config, cli.x, cli.y, cli.z) {
        (Some(path), ..) => read_config(path)?,
        (None, Some(x), Some(y), Some(z)) => BinConfig::new(x, y, z),
        _ => bail!("Either X Y Z or --config is required"),
    };

    if let Some(text) = &cli.divisions {
        let divisions: Divisions =
            serde_json::from_str(text).with_context(|| format!("Invalid --divisions '{text}'"))?;
        config.divisions = Some(divisions);
    }
    if let Some(wall) = cli.wall {
        config.wall_thickness = wall;
    }
    config.features.draw_finger_scoop |= cli.finger_scoop;
    config.features.draw_label_ledge |= cli.label_ledge;
    config.features.make_magnet_hole |= cli.magnet_holes;
    config.features.make_screw_hole |= cli.screw_holes;

    config.into_properties().context("Invalid bin")
}

fn read_config(path: &Path) -> Result<BinConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

fn write_plan(
    kernel: &RecordingKernel,
    solid: gridfinity_assembly::SolidId,
    dir: &Path,
    properties: &Properties,
    options: &ExportOptions,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = output_path(dir, properties, ExportFormat::Json);
    if path.exists() {
        warn!(path = %path.display(), "Overwriting existing plan");
    }
    PlanExporter::new(kernel).export(&solid, &path, ExportFormat::Json, options)?;
    Ok(path)
}
