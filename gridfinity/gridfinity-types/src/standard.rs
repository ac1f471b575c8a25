//! Fixed constants of the Gridfinity standard.
//!
//! These values define mechanical compatibility with bins and baseplates
//! from other sources. They are not tunable parameters.

/// Horizontal grid pitch in mm.
pub const GRID_PITCH_MM: f64 = 42.0;

/// Vertical height unit in mm.
pub const HEIGHT_UNIT_MM: f64 = 7.0;

/// Slip-fit clearance subtracted from the outer footprint in mm.
pub const FOOTPRINT_CLEARANCE_MM: f64 = 0.5;

/// Height consumed by the base feet and lip seating, subtracted from the
/// nominal height to get the body height in mm.
pub const BASE_CLEARANCE_MM: f64 = 5.6;

/// Outer vertical corner radius of the bin in mm.
pub const OUTER_CORNER_RADIUS_MM: f64 = 3.75;

/// Solid floor left beneath each bucket cavity in mm.
pub const FLOOR_THICKNESS_MM: f64 = 2.0;

/// Buckets narrower than this are reported with an advisory, in mm.
pub const MIN_BUCKET_WIDTH_MM: f64 = 15.0;

/// Default wall thickness in mm.
pub const DEFAULT_WALL_THICKNESS_MM: f64 = 0.8;

/// Minimum grid height in units.
pub const MIN_HEIGHT_UNITS: u32 = 2;
