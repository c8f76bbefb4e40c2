//! # Equant model of Mars's orbit
//!
//! This module defines the geometric parameter set of the eccentric
//! circle-with-equant model ([`OrbitGeometry`]) and the per-opposition error
//! evaluation ([`evaluate`]) that drives every stage of the parameter search.
//!
//! ## Model
//!
//! The orbit is a circle of radius `r` centered at `(cos c, sin c)`, one
//! observer–sun distance away from the sun in the direction `c`. The planet's
//! angular motion is uniform as seen from the **equant**, an offset point at
//! distance `e1` from the sun in the direction `e2 + z`. Starting from the
//! initial phase `z`, the sighting angle advances by `s · dt_i` per
//! opposition; each sighting ray is projected onto the circle and the
//! predicted heliocentric longitude is compared with the observed one.
//!
//! ## Error convention
//!
//! Predicted longitudes are normalized into `[0, 360)` before comparison, but
//! the absolute difference itself is **not** reduced modulo 360: observation
//! pairs straddling the 0°/360° boundary can therefore report errors above
//! 180°. This matches the historical fitting procedure and is preserved as
//! documented behavior.
use std::fmt;

use crate::constants::{principal_angle, DegPerDay, Degree, NUM_OPPOSITIONS};
use crate::kinematics::project;
use crate::oppositions::OppositionSet;

/// The five free geometric parameters of the equant model.
///
/// Fields
/// -----------------
/// * `center_angle`: direction `c` of the orbit-circle center from the
///   sun–Aries axis, in degrees.
/// * `radius`: orbit radius `r`, in units where the observer–sun distance is 1.
/// * `equant_distance`: equant offset magnitude `e1` (> 0).
/// * `equant_angle`: equant direction offset `e2`, in degrees; the equant lies
///   in the direction `e2 + z`.
/// * `initial_phase`: initial angular position `z` of the planet, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGeometry {
    pub center_angle: Degree,
    pub radius: f64,
    pub equant_distance: f64,
    pub equant_angle: Degree,
    pub initial_phase: Degree,
}

impl OrbitGeometry {
    /// Cartesian position of the equant point.
    ///
    /// Return
    /// ------
    /// * `(h, k)` with `h = e1·cos(e2 + z)` and `k = e1·sin(e2 + z)`
    pub fn equant_position(&self) -> (f64, f64) {
        let direction = (self.equant_angle + self.initial_phase).to_radians();
        (
            self.equant_distance * direction.cos(),
            self.equant_distance * direction.sin(),
        )
    }
}

impl fmt::Display for OrbitGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c = {:.4}°, r = {:.4}, e1 = {:.4}, e2 = {:.4}°, z = {:.4}°",
            self.center_angle, self.radius, self.equant_distance, self.equant_angle,
            self.initial_phase
        )
    }
}

/// Per-opposition angular errors of one model evaluation.
///
/// The twelve entries are aligned by index with the opposition table; the
/// maximum is the scalar objective minimized by the parameter search. A fresh
/// report is produced per evaluation and never mutated afterwards, except
/// that the search stores its accepted copy with the maximum rounded to four
/// decimals (see [`crate::search`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorReport {
    pub errors: [Degree; NUM_OPPOSITIONS],
    pub max_error: Degree,
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  #  error [deg]")?;
        for (i, err) in self.errors.iter().enumerate() {
            writeln!(f, " {i:>2}  {err:.6}")?;
        }
        write!(f, "max  {:.6}", self.max_error)
    }
}

/// Evaluate the equant model against the opposition table.
///
/// Runs the kinematic projection to obtain the twelve predicted positions,
/// converts each to a heliocentric longitude in `[0, 360)`, and reports the
/// absolute difference with the observed longitude per opposition together
/// with the maximum difference.
///
/// Arguments
/// ---------
/// * `geometry`: the five geometric parameters of the orbit
/// * `speed`: angular speed in degrees/day
/// * `oppositions`: the validated 12-entry opposition table
///
/// Return
/// ------
/// * an [`ErrorReport`] with the twelve errors and their maximum
pub fn evaluate(
    geometry: &OrbitGeometry,
    speed: DegPerDay,
    oppositions: &OppositionSet,
) -> ErrorReport {
    let positions = project(geometry, speed, oppositions.times());

    let mut errors = [0.0; NUM_OPPOSITIONS];
    let mut max_error = f64::MIN;
    for (i, position) in positions.iter().enumerate() {
        let predicted = principal_angle(position.y.atan2(position.x).to_degrees());
        let error = (oppositions.longitudes()[i] - predicted).abs();
        errors[i] = error;
        if error > max_error {
            max_error = error;
        }
    }

    ErrorReport { errors, max_error }
}
