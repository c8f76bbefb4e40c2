//! # Generic grid-search-and-reduce routine
//!
//! All four stages of the parameter search share the same shape: enumerate a
//! finite candidate set, evaluate each candidate into an
//! [`ErrorReport`], and keep the candidate whose maximum error is strictly
//! below the best seen so far. [`minimize_over`] implements that shape once,
//! parameterized by the candidate list, the evaluator, and an acceptance
//! callback; the stages in [`crate::search::stages`] instantiate it four
//! times.
//!
//! ## Acceptance rule
//!
//! Candidates are compared with strict less-than against the stored best
//! error. At the moment of acceptance the stored value is **rounded to four
//! decimal places** and that rounded value feeds every later comparison, both
//! inside the stage and in downstream stages consuming the stage's result.
//! Near ties can therefore resolve differently than with full-precision
//! bookkeeping; this is a documented property of the historical procedure,
//! kept on purpose.
//!
//! ## Evaluation order and parallelism
//!
//! Candidate evaluations are pure and independent, so they run as a parallel
//! map (`rayon`) collected back in enumeration order. The acceptance fold
//! then runs sequentially over the ordered results, which keeps the outcome
//! bit-identical to a fully sequential scan, including the first-found
//! tie-break of the enumeration order.
use rayon::prelude::*;

use crate::equant_errors::EquantError;
use crate::equant_model::ErrorReport;
use crate::search::SearchStage;

/// Round a non-negative value to four decimal places, half away from zero.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Best candidate of one search stage.
pub(crate) struct StageBest<C, A> {
    pub candidate: C,
    pub aux: A,
    pub report: ErrorReport,
}

/// Evaluate every candidate and reduce to the one with the smallest maximum
/// error.
///
/// Arguments
/// ---------
/// * `stage`: the stage being run, used for error reporting
/// * `candidates`: the full candidate list in enumeration order
/// * `evaluate`: pure evaluator producing a stage-specific payload and the
///   candidate's [`ErrorReport`]
/// * `on_accept`: invoked on every strict improvement of the accumulator,
///   after the stored maximum error has been rounded
///
/// Return
/// ------
/// * the accepted candidate, its payload, and its report (maximum rounded),
///   or [`EquantError::NoCandidateEvaluated`] when the candidate list is
///   empty
pub(crate) fn minimize_over<C, A, E, F>(
    stage: SearchStage,
    candidates: Vec<C>,
    evaluate: E,
    mut on_accept: F,
) -> Result<StageBest<C, A>, EquantError>
where
    C: Send + Sync,
    A: Send,
    E: Fn(&C) -> Result<(A, ErrorReport), EquantError> + Sync,
    F: FnMut(&C, &A, &ErrorReport),
{
    let evaluated = candidates
        .par_iter()
        .map(&evaluate)
        .collect::<Result<Vec<(A, ErrorReport)>, EquantError>>()?;

    let mut best: Option<StageBest<C, A>> = None;
    let mut best_error = f64::MAX;
    for (candidate, (aux, report)) in candidates.into_iter().zip(evaluated) {
        if report.max_error < best_error {
            best_error = round4(report.max_error);
            let stored = ErrorReport {
                errors: report.errors,
                max_error: best_error,
            };
            on_accept(&candidate, &aux, &stored);
            best = Some(StageBest {
                candidate,
                aux,
                report: stored,
            });
        }
    }

    best.ok_or(EquantError::NoCandidateEvaluated {
        stage: stage.name(),
    })
}
