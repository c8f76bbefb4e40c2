use std::path::PathBuf;

use equant::constants::NUM_OPPOSITIONS;
use equant::{Opposition, OppositionSet};

/// Time deltas of the historical 1580-1604 opposition series, in days.
pub const TIMES: [f64; NUM_OPPOSITIONS] = [
    0.0,
    770.4479166666666,
    765.2902777777778,
    764.50625,
    769.8354166666667,
    784.1569444444444,
    809.4416666666667,
    795.2826388888889,
    775.5354166666667,
    766.8430555555556,
    763.9631944444444,
    766.3020833333334,
];

/// Observed heliocentric longitudes of the series, in degrees.
pub const LONGITUDES: [f64; NUM_OPPOSITIONS] = [
    66.79305555555555,
    106.92500000000001,
    141.60277777777776,
    175.71666666666667,
    214.375,
    266.71666666666664,
    342.26666666666665,
    47.52916666666667,
    92.46666666666667,
    128.63333333333333,
    162.45,
    198.95,
];

/// The validated fixture opposition table.
pub fn fixture_set() -> OppositionSet {
    let records: Vec<Opposition> = TIMES
        .iter()
        .zip(LONGITUDES.iter())
        .map(|(&dt, &longitude)| Opposition::new(dt, longitude))
        .collect();
    OppositionSet::new(records).unwrap()
}

/// Path of a fixture file under `tests/data/`.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}
