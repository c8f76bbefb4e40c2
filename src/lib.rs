//! Equant-model fit of Mars's orbit from twelve historical oppositions.
//!
//! The crate recovers the five geometric parameters of an eccentric
//! circle-with-equant orbit (center angle, radius, equant offset magnitude
//! and direction, initial phase) together with the planet's angular speed,
//! by minimizing the worst-case absolute angular error over the opposition
//! table through a four-stage nested grid search.
//!
//! Entry points:
//! - [`oppositions::OppositionSet`] — validated observation input (direct or
//!   loaded from the historical CSV table),
//! - [`equant_model::evaluate`] — one model evaluation,
//! - [`search::best_orbit_params`] — the full joint search.
pub mod constants;
pub mod equant_errors;
pub mod equant_model;
pub mod geometry;
pub mod kinematics;
pub mod oppositions;
pub mod search;

pub use equant_errors::EquantError;
pub use equant_model::{ErrorReport, OrbitGeometry};
pub use oppositions::{Opposition, OppositionSet};
pub use search::{SearchParams, SearchResult};
