//! # Kinematic projection of the equant recurrence
//!
//! This module advances the equant angular recurrence over the opposition
//! time deltas and projects each step onto the orbit circle through
//! [`crate::geometry::intersect`].
//!
//! ## Recurrence
//!
//! The running angle state starts at the initial phase `z`. At step `i` the
//! sighting angle is
//!
//! ```text
//! theta_i = s · dt_i + state
//! ```
//!
//! and the state is then replaced by `theta_i`. The recurrence is cumulative:
//! step `i`'s input angle is step `i-1`'s output angle, so the twelve steps
//! must be executed in strict index order. The projection is a pure function
//! of its inputs; two runs with identical inputs produce identical outputs.
use nalgebra::Vector2;

use crate::constants::{Days, DegPerDay, NUM_OPPOSITIONS};
use crate::equant_model::OrbitGeometry;
use crate::geometry::intersect;

/// Project the twelve predicted orbital positions of the equant model.
///
/// Arguments
/// ---------
/// * `geometry`: the five geometric parameters of the orbit
/// * `speed`: angular speed of the planet around the equant, in degrees/day
/// * `times`: elapsed days since the previous opposition, first entry 0
///
/// Return
/// ------
/// * the twelve predicted Cartesian positions on the orbit circle, in
///   chronological order
pub fn project(
    geometry: &OrbitGeometry,
    speed: DegPerDay,
    times: &[Days; NUM_OPPOSITIONS],
) -> [Vector2<f64>; NUM_OPPOSITIONS] {
    let (h, k) = geometry.equant_position();

    let mut positions = [Vector2::zeros(); NUM_OPPOSITIONS];
    let mut state = geometry.initial_phase;
    for (position, dt) in positions.iter_mut().zip(times) {
        let theta = speed * dt + state;
        *position = intersect(h, k, theta, geometry.radius, geometry.center_angle);
        state = theta;
    }
    positions
}
