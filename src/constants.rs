//! # Constants and type definitions for Equant
//!
//! This module centralizes the **unit conversions** and **common type
//! definitions** used throughout the `equant` library.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians)
//! - Core type aliases used across the crate
//! - The fixed observation count of the opposition table
//!
//! These definitions are used by all main modules, including the geometric
//! projection engine and the grid-search stages.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Elapsed time in days
pub type Days = f64;
/// Angular speed in degrees per day
pub type DegPerDay = f64;

// -------------------------------------------------------------------------------------------------
// Opposition table geometry
// -------------------------------------------------------------------------------------------------

/// Number of opposition records the equant model is fitted against.
///
/// The model geometry and the search recurrence both assume exactly this many
/// chronologically ordered observations.
pub const NUM_OPPOSITIONS: usize = 12;

/// Normalize an angle in degrees into the range `[0, 360)`.
///
/// Argument
/// --------
/// * `angle`: an angle in degrees, possibly outside `[0, 360)`
///
/// Return
/// ------
/// * the principal value of the angle in degrees
pub fn principal_angle(angle: Degree) -> Degree {
    angle.rem_euclid(360.0)
}
