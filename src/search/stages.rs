//! # The four search stages
//!
//! Each stage instantiates the generic grid reduction with its own candidate
//! enumeration:
//!
//! * [`best_inner_params`] — four nested axes `(c, e2, z, e1)` flattened with
//!   `iproduct!`, preserving the lexicographic enumeration order (and thus
//!   the first-found tie-break).
//! * [`best_speed`] / [`best_radius`] — one-dimensional scans delegating the
//!   inner four axes to [`best_inner_params`] for every candidate.
//! * [`best_orbit_params`] — the top-level joint scan over radii × periods.
//!
//! Periods are converted to angular speed as `s = 360/period` at candidate
//! evaluation, so results carry speeds while configuration stays in days.
use itertools::iproduct;

use crate::constants::{DegPerDay, Days};
use crate::equant_errors::EquantError;
use crate::equant_model::{evaluate, ErrorReport, OrbitGeometry};
use crate::oppositions::OppositionSet;
use crate::search::grid::{minimize_over, round4};
use crate::search::{Improvement, ImprovementObserver, SearchParams, SearchStage};

use std::fmt;

/// Best inner parameter set found for a fixed radius and angular speed.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerFit {
    /// Accepted geometry; `radius` is the fixed input radius and
    /// `equant_distance` is stored rounded to four decimals.
    pub geometry: OrbitGeometry,
    /// Error report of the accepted candidate, maximum rounded to four
    /// decimals.
    pub report: ErrorReport,
}

/// Final answer of the outer search stages.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub geometry: OrbitGeometry,
    pub speed: DegPerDay,
    pub report: ErrorReport,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "parameter      value")?;
        writeln!(f, "max error      {:.4}", self.report.max_error)?;
        writeln!(f, "c [deg]        {:.4}", self.geometry.center_angle)?;
        writeln!(f, "r              {:.4}", self.geometry.radius)?;
        writeln!(f, "e1             {:.4}", self.geometry.equant_distance)?;
        writeln!(f, "e2 [deg]       {:.4}", self.geometry.equant_angle)?;
        writeln!(f, "z [deg]        {:.4}", self.geometry.initial_phase)?;
        writeln!(f, "s [deg/day]    {:.6}", self.speed)?;
        write!(f, "{}", self.report)
    }
}

/// Inner candidate in enumeration order `(c, e2, z, e1)`.
type InnerCandidate = (f64, f64, f64, f64);

fn inner_geometry(candidate: &InnerCandidate, radius: f64) -> OrbitGeometry {
    let (center_angle, equant_angle, initial_phase, equant_distance) = *candidate;
    OrbitGeometry {
        center_angle,
        radius,
        equant_distance,
        equant_angle,
        initial_phase,
    }
}

fn notify(
    observer: &mut Option<&mut ImprovementObserver<'_>>,
    stage: SearchStage,
    geometry: OrbitGeometry,
    speed: DegPerDay,
    report: &ErrorReport,
) {
    if let Some(callback) = observer.as_deref_mut() {
        callback(&Improvement {
            stage,
            geometry,
            speed,
            report,
        });
    }
}

/// Grid search over the four inner geometric parameters.
///
/// Enumerates `(c, e2, z, e1)` over the configured axes, evaluates the model
/// for each combination at the given radius and speed, and keeps the
/// combination with the smallest maximum error (strict improvement,
/// first-found tie-break).
///
/// Arguments
/// ---------
/// * `radius`: fixed orbit radius
/// * `speed`: fixed angular speed in degrees/day
/// * `oppositions`: the validated opposition table
/// * `params`: grid definitions
/// * `observer`: optional callback invoked on each accepted improvement
///
/// Return
/// ------
/// * the best [`InnerFit`], or [`EquantError::NoCandidateEvaluated`] when
///   the inner axes generate no candidate
pub fn best_inner_params(
    radius: f64,
    speed: DegPerDay,
    oppositions: &OppositionSet,
    params: &SearchParams,
    mut observer: Option<&mut ImprovementObserver<'_>>,
) -> Result<InnerFit, EquantError> {
    let candidates: Vec<InnerCandidate> = iproduct!(
        params.center_angles.values(),
        params.equant_angles.values(),
        params.initial_phases.values(),
        params.equant_distances.values()
    )
    .collect();

    let best = minimize_over(
        SearchStage::Inner,
        candidates,
        |candidate| {
            let geometry = inner_geometry(candidate, radius);
            Ok(((), evaluate(&geometry, speed, oppositions)))
        },
        |candidate, _, report| {
            let mut geometry = inner_geometry(candidate, radius);
            geometry.equant_distance = round4(geometry.equant_distance);
            notify(&mut observer, SearchStage::Inner, geometry, speed, report);
        },
    )?;

    let mut geometry = inner_geometry(&best.candidate, radius);
    // The accepted equant distance is stored rounded, like the maximum error.
    geometry.equant_distance = round4(geometry.equant_distance);
    Ok(InnerFit {
        geometry,
        report: best.report,
    })
}

/// Scan over candidate orbital periods for a fixed radius.
///
/// Each period candidate is converted to `s = 360/period` and scored by a
/// full (unobserved) inner search; the candidate with the smallest resulting
/// maximum error wins.
///
/// Arguments
/// ---------
/// * `radius`: fixed orbit radius
/// * `oppositions`: the validated opposition table
/// * `params`: grid definitions; `scan_periods` drives this stage
/// * `observer`: optional callback invoked on each accepted improvement
///
/// Return
/// ------
/// * the best [`SearchResult`] over the period axis
pub fn best_speed(
    radius: f64,
    oppositions: &OppositionSet,
    params: &SearchParams,
    mut observer: Option<&mut ImprovementObserver<'_>>,
) -> Result<SearchResult, EquantError> {
    let candidates: Vec<Days> = params.scan_periods.values().collect();

    let best = minimize_over(
        SearchStage::Speed,
        candidates,
        |period| {
            let speed = 360.0 / period;
            let fit = best_inner_params(radius, speed, oppositions, params, None)?;
            Ok(((speed, fit.geometry), fit.report))
        },
        |_, (speed, geometry), report| {
            notify(&mut observer, SearchStage::Speed, *geometry, *speed, report);
        },
    )?;

    let (speed, geometry) = best.aux;
    Ok(SearchResult {
        geometry,
        speed,
        report: best.report,
    })
}

/// Scan over candidate radii for a fixed angular speed.
///
/// Arguments
/// ---------
/// * `speed`: fixed angular speed in degrees/day
/// * `oppositions`: the validated opposition table
/// * `params`: grid definitions; `scan_radii` drives this stage
/// * `observer`: optional callback invoked on each accepted improvement
///
/// Return
/// ------
/// * the best [`SearchResult`] over the radius axis
pub fn best_radius(
    speed: DegPerDay,
    oppositions: &OppositionSet,
    params: &SearchParams,
    mut observer: Option<&mut ImprovementObserver<'_>>,
) -> Result<SearchResult, EquantError> {
    let candidates: Vec<f64> = params.scan_radii.values().collect();

    let best = minimize_over(
        SearchStage::Radius,
        candidates,
        |radius| {
            let fit = best_inner_params(*radius, speed, oppositions, params, None)?;
            Ok((fit.geometry, fit.report))
        },
        |_, geometry, report| {
            notify(&mut observer, SearchStage::Radius, *geometry, speed, report);
        },
    )?;

    Ok(SearchResult {
        geometry: best.aux,
        speed,
        report: best.report,
    })
}

/// Joint scan over radii and orbital periods; the top-level entry point.
///
/// Every `(radius, period)` pair of the joint axes is scored by a full inner
/// search; the pair with the smallest maximum error over the whole joint
/// space is returned together with its inner parameter set. Running the
/// search twice on the same inputs yields bit-identical results.
///
/// Arguments
/// ---------
/// * `oppositions`: the validated opposition table
/// * `params`: grid definitions; `joint_radii` and `joint_periods` drive
///   this stage
/// * `observer`: optional callback invoked on each accepted improvement
///
/// Return
/// ------
/// * the final [`SearchResult`] of the fit
pub fn best_orbit_params(
    oppositions: &OppositionSet,
    params: &SearchParams,
    mut observer: Option<&mut ImprovementObserver<'_>>,
) -> Result<SearchResult, EquantError> {
    let candidates: Vec<(f64, Days)> =
        iproduct!(params.joint_radii.values(), params.joint_periods.values()).collect();

    let best = minimize_over(
        SearchStage::Joint,
        candidates,
        |(radius, period)| {
            let speed = 360.0 / period;
            let fit = best_inner_params(*radius, speed, oppositions, params, None)?;
            Ok(((speed, fit.geometry), fit.report))
        },
        |_, (speed, geometry), report| {
            notify(&mut observer, SearchStage::Joint, *geometry, *speed, report);
        },
    )?;

    let (speed, geometry) = best.aux;
    Ok(SearchResult {
        geometry,
        speed,
        report: best.report,
    })
}
