//! # CSV reader for the historical opposition table
//!
//! Reads the Mars opposition table used by the fit from a CSV file with the
//! columns
//!
//! ```text
//! Year,Month,Day,Hour,Minute,ZodiacIndex,Degree,ArcMinute,ArcSecond
//! ```
//!
//! Extra columns are ignored. Each row is turned into an [`Opposition`]:
//!
//! - the observed heliocentric longitude is reconstructed from the zodiacal
//!   coordinates as `ZodiacIndex·30 + Degree + ArcMinute/60 + ArcSecond/3600`
//!   degrees,
//! - the elapsed time since the previous row is the difference of the two
//!   [`hifitime::Epoch`]s expressed in days (0 for the first row).
//!
//! The resulting records are validated by [`OppositionSet::new`], so a table
//! with the wrong row count or out-of-order epochs is rejected at load time.
use std::path::Path;

use hifitime::{Epoch, Unit};
use serde::Deserialize;

use crate::constants::Degree;
use crate::equant_errors::EquantError;
use crate::oppositions::{Opposition, OppositionSet};

/// One raw row of the opposition table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OppositionRecord {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    zodiac_index: u8,
    degree: f64,
    arc_minute: f64,
    arc_second: f64,
}

impl OppositionRecord {
    /// Observed heliocentric longitude in degrees.
    fn longitude(&self) -> Degree {
        f64::from(self.zodiac_index) * 30.0
            + self.degree
            + self.arc_minute / 60.0
            + self.arc_second / 3600.0
    }

    /// Observation epoch of the row.
    fn epoch(&self, line: usize) -> Result<Epoch, EquantError> {
        Epoch::maybe_from_gregorian_utc(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            0,
            0,
        )
        .map_err(|err| EquantError::InvalidRecord {
            line,
            reason: err.to_string(),
        })
    }
}

/// Load and validate the opposition table from a CSV file.
///
/// Arguments
/// ---------
/// * `path`: path of the CSV file described in the module documentation
///
/// Return
/// ------
/// * the validated [`OppositionSet`], or an [`EquantError`] if the file
///   cannot be read, a row is malformed, or the table fails validation
pub fn load_opposition_table(path: impl AsRef<Path>) -> Result<OppositionSet, EquantError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut oppositions = Vec::new();
    let mut previous_epoch: Option<Epoch> = None;
    for (row, result) in reader.deserialize().enumerate() {
        // Line 1 is the header.
        let line = row + 2;
        let record: OppositionRecord = result?;
        let epoch = record.epoch(line)?;

        let dt_days = match previous_epoch {
            None => 0.0,
            Some(previous) => (epoch - previous).to_unit(Unit::Day),
        };
        previous_epoch = Some(epoch);

        oppositions.push(Opposition::new(dt_days, record.longitude()));
    }

    OppositionSet::new(oppositions)
}

impl OppositionSet {
    /// Convenience constructor reading the table from a CSV file.
    ///
    /// See [`load_opposition_table`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, EquantError> {
        load_opposition_table(path)
    }
}

#[cfg(test)]
mod csv_reader_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_longitude_reconstruction() {
        let record = OppositionRecord {
            year: 1580,
            month: 11,
            day: 18,
            hour: 1,
            minute: 31,
            zodiac_index: 2,
            degree: 6.0,
            arc_minute: 47.0,
            arc_second: 35.0,
        };
        assert_relative_eq!(record.longitude(), 66.79305555555555, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_date_is_reported_with_line() {
        let record = OppositionRecord {
            year: 1580,
            month: 13,
            day: 40,
            hour: 1,
            minute: 31,
            zodiac_index: 2,
            degree: 6.0,
            arc_minute: 47.0,
            arc_second: 35.0,
        };
        match record.epoch(7) {
            Err(EquantError::InvalidRecord { line, .. }) => assert_eq!(line, 7),
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_day_delta_between_epochs() {
        let first = Epoch::from_gregorian_utc(1580, 11, 18, 1, 31, 0, 0);
        let second = Epoch::from_gregorian_utc(1582, 12, 28, 12, 16, 0, 0);
        let dt = (second - first).to_unit(Unit::Day);
        assert_relative_eq!(dt, 770.4479166666666, epsilon = 1e-9);
    }
}
