//! An assembled bin: the plan together with the kernel's solid.

use gridfinity_types::{Advisory, AdvisorySeverity, Properties};
use tracing::info;

use crate::kernel::GeometryKernel;
use crate::orchestrator::assemble;
use crate::plan::BinPlan;

/// A bin assembled by some kernel.
#[derive(Debug, Clone)]
pub struct Bin<S> {
    plan: BinPlan,
    solid: S,
}

impl<S> Bin<S> {
    /// Descriptive name, used for output files.
    #[must_use]
    pub fn name(&self) -> &str {
        self.plan.name()
    }

    /// The plan the bin was built from.
    #[must_use]
    pub const fn plan(&self) -> &BinPlan {
        &self.plan
    }

    /// The kernel's solid.
    #[must_use]
    pub const fn solid(&self) -> &S {
        &self.solid
    }

    /// Diagnostics collected while planning.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        self.plan.advisories()
    }

    /// Whether any advisory is a warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.advisories()
            .iter()
            .any(|a| a.severity() == AdvisorySeverity::Warning)
    }
}

/// Plan and assemble a bin in one call.
///
/// # Errors
///
/// The first kernel error, unmodified.
///
/// # Example
///
/// ```
/// use gridfinity_assembly::{RecordingKernel, build_bin};
/// use gridfinity_types::{GridDimension, Properties};
///
/// let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
///     .finger_scoop(true)
///     .build()
///     .unwrap();
/// let mut kernel = RecordingKernel::new();
/// let bin = build_bin(&mut kernel, &props).unwrap();
///
/// assert_eq!(bin.name(), "gridfinity-1x1x3-w0.8-finger-scoop");
/// assert!(!bin.has_warnings());
/// ```
pub fn build_bin<K: GeometryKernel>(
    kernel: &mut K,
    properties: &Properties,
) -> Result<Bin<K::Solid>, K::Error> {
    let plan = BinPlan::new(properties);
    let solid = assemble(kernel, &plan)?;
    info!(
        name = plan.name(),
        advisories = plan.advisories().len(),
        "Assembled bin"
    );
    Ok(Bin { plan, solid })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingKernel;
    use gridfinity_types::{Divisions, GridDimension};

    #[test]
    fn test_bin_carries_plan() {
        let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
            .divisions(Divisions::from_counts([3]))
            .build()
            .unwrap();
        let mut kernel = RecordingKernel::new();
        let bin = build_bin(&mut kernel, &props).unwrap();

        // (41.5 - 3.2) / 3 = 12.77 mm buckets
        assert_eq!(bin.advisories().len(), 3);
        assert!(bin.has_warnings());
        assert_eq!(bin.solid().index() + 1, kernel.len());
        assert_eq!(bin.plan().layout().buckets().len(), 3);
    }
}
