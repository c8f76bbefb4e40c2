//! # Opposition records and the validated observation set
//!
//! This module defines the input side of the fit: one [`Opposition`] per
//! historical observation (elapsed days since the previous opposition plus
//! the observed heliocentric longitude) and the [`OppositionSet`] container
//! holding exactly twelve of them in chronological order.
//!
//! ## Validation at the boundary
//!
//! The search core assumes twelve well-formed entries and does not
//! re-validate them. [`OppositionSet::new`] is the only way to build a set
//! and enforces:
//!
//! - exactly [`NUM_OPPOSITIONS`](crate::constants::NUM_OPPOSITIONS) records,
//! - a zero time delta on the first record,
//! - strictly positive time deltas afterwards (chronological order),
//! - longitudes normalized into `[0, 360)`.
//!
//! Sets can be built directly from `(dt, longitude)` pairs or loaded from the
//! historical CSV table through [`csv_reader::load_opposition_table`].
pub mod csv_reader;

use crate::constants::{principal_angle, Days, Degree, NUM_OPPOSITIONS};
use crate::equant_errors::EquantError;

/// One historical opposition observation.
///
/// Fields
/// -----------------
/// * `dt_days`: elapsed time since the previous opposition, in days; the
///   first record of a set carries 0.
/// * `longitude`: observed heliocentric longitude, in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opposition {
    pub dt_days: Days,
    pub longitude: Degree,
}

impl Opposition {
    /// Create a new opposition record, normalizing the longitude.
    pub fn new(dt_days: Days, longitude: Degree) -> Self {
        Opposition {
            dt_days,
            longitude: principal_angle(longitude),
        }
    }
}

/// The validated, chronologically ordered set of twelve oppositions.
///
/// Index order is semantically required: it drives the kinematic recurrence
/// and the time axis of the parameter search. The time-delta and longitude
/// arrays are cached at construction so the hot evaluation loop borrows them
/// without rebuilding.
#[derive(Debug, Clone, PartialEq)]
pub struct OppositionSet {
    records: [Opposition; NUM_OPPOSITIONS],
    times: [Days; NUM_OPPOSITIONS],
    longitudes: [Degree; NUM_OPPOSITIONS],
}

impl OppositionSet {
    /// Build a set from twelve `(dt, longitude)` records.
    ///
    /// Arguments
    /// ---------
    /// * `records`: opposition records in chronological order
    ///
    /// Return
    /// ------
    /// * the validated set, or an [`EquantError`] describing the violation
    pub fn new(records: impl IntoIterator<Item = Opposition>) -> Result<Self, EquantError> {
        let collected: Vec<Opposition> = records.into_iter().collect();
        if collected.len() != NUM_OPPOSITIONS {
            return Err(EquantError::WrongOppositionCount {
                expected: NUM_OPPOSITIONS,
                found: collected.len(),
            });
        }

        for (index, record) in collected.iter().enumerate() {
            let chronological = if index == 0 {
                record.dt_days == 0.0
            } else {
                record.dt_days > 0.0
            };
            if !chronological {
                return Err(EquantError::NonMonotonicTimes { index });
            }
        }

        let mut records = [Opposition::new(0.0, 0.0); NUM_OPPOSITIONS];
        let mut times = [0.0; NUM_OPPOSITIONS];
        let mut longitudes = [0.0; NUM_OPPOSITIONS];
        for (i, record) in collected.into_iter().enumerate() {
            records[i] = record;
            times[i] = record.dt_days;
            longitudes[i] = record.longitude;
        }

        Ok(OppositionSet {
            records,
            times,
            longitudes,
        })
    }

    /// The twelve opposition records in chronological order.
    pub fn records(&self) -> &[Opposition; NUM_OPPOSITIONS] {
        &self.records
    }

    /// Elapsed days since the previous opposition, aligned by index.
    pub fn times(&self) -> &[Days; NUM_OPPOSITIONS] {
        &self.times
    }

    /// Observed heliocentric longitudes in degrees, aligned by index.
    pub fn longitudes(&self) -> &[Degree; NUM_OPPOSITIONS] {
        &self.longitudes
    }
}

#[cfg(test)]
mod oppositions_test {
    use super::*;

    fn valid_records() -> Vec<Opposition> {
        (0..NUM_OPPOSITIONS)
            .map(|i| Opposition::new(if i == 0 { 0.0 } else { 700.0 + i as f64 }, 30.0 * i as f64))
            .collect()
    }

    #[test]
    fn test_valid_set_is_accepted() {
        let set = OppositionSet::new(valid_records()).unwrap();
        assert_eq!(set.times()[0], 0.0);
        assert_eq!(set.longitudes()[1], 30.0);
        assert_eq!(set.records().len(), NUM_OPPOSITIONS);
    }

    #[test]
    fn test_wrong_count_is_rejected() {
        let mut records = valid_records();
        records.pop();
        match OppositionSet::new(records) {
            Err(EquantError::WrongOppositionCount { expected, found }) => {
                assert_eq!(expected, NUM_OPPOSITIONS);
                assert_eq!(found, NUM_OPPOSITIONS - 1);
            }
            other => panic!("expected WrongOppositionCount, got {other:?}"),
        }
    }

    #[test]
    fn test_non_monotonic_times_are_rejected() {
        let mut records = valid_records();
        records[5].dt_days = -1.0;
        match OppositionSet::new(records) {
            Err(EquantError::NonMonotonicTimes { index }) => assert_eq!(index, 5),
            other => panic!("expected NonMonotonicTimes, got {other:?}"),
        }
    }

    #[test]
    fn test_nonzero_first_delta_is_rejected() {
        let mut records = valid_records();
        records[0].dt_days = 3.0;
        assert!(matches!(
            OppositionSet::new(records),
            Err(EquantError::NonMonotonicTimes { index: 0 })
        ));
    }

    #[test]
    fn test_longitudes_are_normalized() {
        let record = Opposition::new(0.0, 475.5);
        assert_eq!(record.longitude, 115.5);
        let record = Opposition::new(0.0, -10.0);
        assert_eq!(record.longitude, 350.0);
    }
}
