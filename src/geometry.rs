//! # Ray/circle intersection primitive
//!
//! This module provides the closed-form geometric projection used by the
//! equant model: given the sighting ray leaving the equant point and the
//! orbit circle, it returns the point of the circle the ray points at.
//!
//! ## Geometry
//!
//! The orbit circle has radius `r` and is centered at `(cos c, sin c)`, i.e.
//! at unit distance from the sun in the direction `c` (degrees from the
//! sun–Aries axis). The ray starts at the equant `(h, k)` and makes the angle
//! `theta` (degrees) with the reference axis.
//!
//! Substituting the ray parametrization `x = h + ℓ·cosθ`, `y = k + ℓ·sinθ`
//! into the circle equation yields the monic quadratic
//!
//! ```text
//! ℓ² + bℓ + c1 = 0
//! b  = 2(h·cosθ + k·sinθ − cos c·cosθ − sin c·sinθ)
//! c1 = h² + k² + 1 − 2h·cos c − 2k·sin c − r²
//! ```
//!
//! whose roots are taken as `ℓ = −b/2 ± √(b²−4c1)/2`.
//!
//! ## Root selection and degenerate policy
//!
//! The larger root is preferred when it is positive; otherwise the smaller
//! root is used as-is, even when negative. When the discriminant is negative
//! the ray misses the circle entirely; the projection then degenerates to the
//! ray origin `(h, k)` (`ℓ = 0`) instead of raising an error. Callers never
//! observe a NaN from this function.
use nalgebra::Vector2;

use crate::constants::Degree;

/// Intersect the equant sighting ray with the orbit circle.
///
/// Arguments
/// ---------
/// * `h`: x-coordinate of the ray origin (equant position)
/// * `k`: y-coordinate of the ray origin (equant position)
/// * `theta`: angle of the ray with the reference axis, in degrees
/// * `r`: radius of the orbit circle centered at `(cos c, sin c)`
/// * `c`: angle of the circle center from the reference axis, in degrees
///
/// Return
/// ------
/// * the Cartesian intersection point, or `(h, k)` when the ray misses the
///   circle (degenerate fallback, see the module documentation)
pub fn intersect(h: f64, k: f64, theta: Degree, r: f64, c: Degree) -> Vector2<f64> {
    let cos_theta = theta.to_radians().cos();
    let sin_theta = theta.to_radians().sin();

    let cos_c = c.to_radians().cos();
    let sin_c = c.to_radians().sin();

    let b = 2.0 * (h * cos_theta + k * sin_theta - cos_c * cos_theta - sin_c * sin_theta);
    let c1 = h * h + k * k + 1.0 - 2.0 * h * cos_c - 2.0 * k * sin_c - r * r;

    let discriminant = b * b - 4.0 * c1;
    if discriminant < 0.0 {
        // Ray misses the circle: degenerate point placed at the ray origin.
        return Vector2::new(h, k);
    }

    // Discriminant halved, not quartered: the quadratic is monic, so the
    // classical formula reduces to -b/2 ± sqrt(b² - 4c1)/2.
    let half_sqrt = discriminant.sqrt() / 2.0;
    let root1 = -b / 2.0 + half_sqrt;
    let root2 = -b / 2.0 - half_sqrt;

    let ell = if root1 > 0.0 { root1 } else { root2 };
    Vector2::new(h + ell * cos_theta, k + ell * sin_theta)
}
