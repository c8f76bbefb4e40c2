//! # Nested grid search over the equant parameters
//!
//! This module implements the four-stage brute-force optimization that fits
//! the equant model to the opposition table:
//!
//! 1. **InnerSearch** ([`stages::best_inner_params`]) — exhaustive grid over
//!    the four inner parameters `(c, e2, z, e1)` for a fixed radius and
//!    angular speed.
//! 2. **SpeedSearch** ([`stages::best_speed`]) — scan over candidate orbital
//!    periods (`s = 360/period`), running InnerSearch per candidate.
//! 3. **RadiusSearch** ([`stages::best_radius`]) — scan over candidate radii.
//! 4. **JointSearch** ([`stages::best_orbit_params`]) — cross product of
//!    radii and periods; the top-level entry point producing the final
//!    [`stages::SearchResult`].
//!
//! Brute force is deliberate: the error surface is non-convex, the dimension
//! is low, and the precision requirement is coarse, so exhaustive scans over
//! fixed discretizations beat gradient methods here.
//!
//! ## Configuration
//!
//! Grid definitions live in [`SearchParams`], built through
//! [`SearchParams::builder`]. Each axis is a [`GridRange`] generating
//! `start + i·step` for `i ∈ 0..ceil((stop − start)/step)`. The defaults
//! replicate the discretizations of the historical fit.
//!
//! ## Observing improvements
//!
//! Every stage accepts an optional observer invoked on each strict
//! improvement of its best-so-far accumulator, with the stage, the candidate
//! parameters, and the (rounded) error report. The observer replaces the
//! debug printing of the original procedure and has no influence on the
//! search. Inner searches launched internally by the outer stages run
//! unobserved; only the driving stage reports.
//!
//! ## Numeric policy
//!
//! Every stage compares candidates with strict less-than against its stored
//! best error, and stores the accepted maximum **rounded to four decimal
//! places**; the rounded value feeds all later comparisons of the stage and
//! of downstream stages. Near-tie outcomes therefore depend on this exact
//! rounding chain, preserved from the historical procedure together with
//! its instability.
pub(crate) mod grid;
pub mod stages;

use std::fmt;

use crate::constants::DegPerDay;
use crate::equant_errors::EquantError;
use crate::equant_model::{ErrorReport, OrbitGeometry};

pub use stages::{best_inner_params, best_orbit_params, best_radius, best_speed};
pub use stages::{InnerFit, SearchResult};

/// Identifier of a search stage, carried by improvement notifications and
/// configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Grid over the four inner geometric parameters.
    Inner,
    /// Scan over candidate orbital periods.
    Speed,
    /// Scan over candidate radii.
    Radius,
    /// Joint scan over radii and periods.
    Joint,
}

impl SearchStage {
    /// Short stable name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            SearchStage::Inner => "inner",
            SearchStage::Speed => "speed",
            SearchStage::Radius => "radius",
            SearchStage::Joint => "joint",
        }
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One strict improvement of a stage's best-so-far accumulator.
///
/// Fields
/// -----------------
/// * `stage`: the stage reporting the improvement.
/// * `geometry`: the accepted geometric parameters (with `e1` rounded the
///   way the accepted value is stored).
/// * `speed`: the accepted angular speed in degrees/day.
/// * `report`: the accepted error report, maximum rounded to four decimals.
#[derive(Debug)]
pub struct Improvement<'a> {
    pub stage: SearchStage,
    pub geometry: OrbitGeometry,
    pub speed: DegPerDay,
    pub report: &'a ErrorReport,
}

/// Observer callback invoked on each accepted improvement.
pub type ImprovementObserver<'a> = dyn FnMut(&Improvement<'_>) + 'a;

/// Half-open discretization `start + i·step`, `i ∈ 0..ceil((stop−start)/step)`.
///
/// The candidate count follows the float division, so a `stop` landing on a
/// grid point up to rounding may or may not be included; this mirrors the
/// discretization of the historical procedure and keeps candidate
/// enumeration reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridRange {
    /// Create a range; validity is checked by [`SearchParams::builder`].
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        GridRange { start, stop, step }
    }

    /// Number of candidate values generated by the range.
    pub fn len(&self) -> usize {
        let n = ((self.stop - self.start) / self.step).ceil();
        if n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Whether the range generates no candidate.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = f64> + Clone {
        let (start, step) = (self.start, self.step);
        (0..self.len()).map(move |i| start + i as f64 * step)
    }

    fn validate(&self, axis: &'static str) -> Result<(), EquantError> {
        let well_formed = self.step > 0.0
            && self.stop > self.start
            && self.start.is_finite()
            && self.stop.is_finite()
            && self.step.is_finite();
        if !well_formed {
            return Err(EquantError::InvalidGridRange(axis));
        }
        Ok(())
    }
}

/// Grid definitions of the four search stages.
///
/// Fields
/// -----------------
/// **InnerSearch axes** (enumerated `c`, then `e2`, then `z`, then `e1`)
/// * `center_angles` – orbit-center direction `c` in degrees.
/// * `equant_angles` – equant direction offset `e2` in degrees.
/// * `initial_phases` – initial phase `z` in degrees.
/// * `equant_distances` – equant offset magnitude `e1` (strictly positive).
///
/// **Single-axis scans**
/// * `scan_periods` – orbital periods in days tried by SpeedSearch.
/// * `scan_radii` – radii tried by RadiusSearch (strictly positive).
///
/// **JointSearch axes**
/// * `joint_radii` – radii of the joint scan (strictly positive).
/// * `joint_periods` – orbital periods in days of the joint scan.
///
/// Defaults
/// -----------------
/// The [`Default`] implementation replicates the discretizations of the
/// historical fit:
///
/// * `c ∈ [149, 149.4) step 0.01`, `e2 ∈ [93, 94) step 0.1`,
///   `z ∈ [55.5, 56) step 0.1`, `e1 ∈ [1.45, 1.6) step 0.01`
/// * SpeedSearch periods `[680, 689) step 0.2`
/// * RadiusSearch radii `[5, 10) step 0.1`
/// * JointSearch radii `[8, 8.3) step 0.01`, periods `[686.5, 687) step 0.1`
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub center_angles: GridRange,
    pub equant_angles: GridRange,
    pub initial_phases: GridRange,
    pub equant_distances: GridRange,
    pub scan_periods: GridRange,
    pub scan_radii: GridRange,
    pub joint_radii: GridRange,
    pub joint_periods: GridRange,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            center_angles: GridRange::new(149.0, 149.4, 0.01),
            equant_angles: GridRange::new(93.0, 94.0, 0.1),
            initial_phases: GridRange::new(55.5, 56.0, 0.1),
            equant_distances: GridRange::new(1.45, 1.6, 0.01),
            scan_periods: GridRange::new(680.0, 689.0, 0.2),
            scan_radii: GridRange::new(5.0, 10.0, 0.1),
            joint_radii: GridRange::new(8.0, 8.3, 0.01),
            joint_periods: GridRange::new(686.5, 687.0, 0.1),
        }
    }
}

impl SearchParams {
    /// Start building a parameter set from the defaults.
    pub fn builder() -> SearchParamsBuilder {
        SearchParamsBuilder {
            params: SearchParams::default(),
        }
    }
}

/// Builder for [`SearchParams`] with axis validation at [`build`](SearchParamsBuilder::build).
#[derive(Debug, Clone)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    pub fn center_angles(mut self, range: GridRange) -> Self {
        self.params.center_angles = range;
        self
    }

    pub fn equant_angles(mut self, range: GridRange) -> Self {
        self.params.equant_angles = range;
        self
    }

    pub fn initial_phases(mut self, range: GridRange) -> Self {
        self.params.initial_phases = range;
        self
    }

    pub fn equant_distances(mut self, range: GridRange) -> Self {
        self.params.equant_distances = range;
        self
    }

    pub fn scan_periods(mut self, range: GridRange) -> Self {
        self.params.scan_periods = range;
        self
    }

    pub fn scan_radii(mut self, range: GridRange) -> Self {
        self.params.scan_radii = range;
        self
    }

    pub fn joint_radii(mut self, range: GridRange) -> Self {
        self.params.joint_radii = range;
        self
    }

    pub fn joint_periods(mut self, range: GridRange) -> Self {
        self.params.joint_periods = range;
        self
    }

    /// Validate every axis and produce the parameter set.
    ///
    /// Return
    /// ------
    /// * the validated [`SearchParams`], or an [`EquantError`] naming the
    ///   offending axis
    pub fn build(self) -> Result<SearchParams, EquantError> {
        let p = &self.params;
        p.center_angles.validate("center_angles")?;
        p.equant_angles.validate("equant_angles")?;
        p.initial_phases.validate("initial_phases")?;
        p.equant_distances.validate("equant_distances")?;
        p.scan_periods.validate("scan_periods")?;
        p.scan_radii.validate("scan_radii")?;
        p.joint_radii.validate("joint_radii")?;
        p.joint_periods.validate("joint_periods")?;

        if p.equant_distances.start <= 0.0 {
            return Err(EquantError::NonPositiveParameter("equant_distances"));
        }
        if p.scan_radii.start <= 0.0 {
            return Err(EquantError::NonPositiveParameter("scan_radii"));
        }
        if p.joint_radii.start <= 0.0 {
            return Err(EquantError::NonPositiveParameter("joint_radii"));
        }
        if p.scan_periods.start <= 0.0 {
            return Err(EquantError::NonPositiveParameter("scan_periods"));
        }
        if p.joint_periods.start <= 0.0 {
            return Err(EquantError::NonPositiveParameter("joint_periods"));
        }

        Ok(self.params)
    }
}
