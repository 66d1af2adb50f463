//! BC+200 persistence regression table (provisional coefficients)
//!
//! Regression coefficients `(M, a)` for the 200-year persistence model,
//! one row per whole degree of mean annual soil temperature from 7 °C to
//! 40 °C. Persistence is `PF = M − a × H/C_org` (percent).
//!
//! Only the 15 °C row (`M = 95.52`, `a = 46.82`) is a checked reference
//! value. The other rows are a smooth provisional fit around it, with the
//! intercept falling and the slope rising as soil warms. They are not the
//! published BC+200 coefficients. Results computed from this table carry
//! [`PERSISTENCE_TABLE_STATUS`] in their methodology version.
//!
//! TODO: load the published BC+200 rows and bump `METHODOLOGY_VERSION`.

use serde::Serialize;

use super::constants::{SOIL_TEMPERATURE_MAX_C, SOIL_TEMPERATURE_MIN_C};

/// One row of the persistence regression table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersistenceCoefficients {
    /// Mean annual soil temperature this row applies to (°C)
    pub temperature_c: i32,
    /// Intercept (%)
    pub m: f64,
    /// Slope per unit H/C_org (%)
    pub a: f64,
}

/// Provenance tag of the coefficient rows below
pub const PERSISTENCE_TABLE_STATUS: &str = "bc200-provisional-1";

/// Number of rows (7..=40 °C)
pub const TABLE_ROWS: usize = (SOIL_TEMPERATURE_MAX_C - SOIL_TEMPERATURE_MIN_C + 1) as usize;

#[rustfmt::skip]
static PERSISTENCE_TABLE: [PersistenceCoefficients; TABLE_ROWS] = [
    PersistenceCoefficients { temperature_c: 7, m: 98.98, a: 37.94 },
    PersistenceCoefficients { temperature_c: 8, m: 98.59, a: 39.02 },
    PersistenceCoefficients { temperature_c: 9, m: 98.18, a: 40.10 },
    PersistenceCoefficients { temperature_c: 10, m: 97.77, a: 41.20 },
    PersistenceCoefficients { temperature_c: 11, m: 97.34, a: 42.30 },
    PersistenceCoefficients { temperature_c: 12, m: 96.91, a: 43.41 },
    PersistenceCoefficients { temperature_c: 13, m: 96.46, a: 44.54 },
    PersistenceCoefficients { temperature_c: 14, m: 95.99, a: 45.67 },
    PersistenceCoefficients { temperature_c: 15, m: 95.52, a: 46.82 },
    PersistenceCoefficients { temperature_c: 16, m: 95.03, a: 47.98 },
    PersistenceCoefficients { temperature_c: 17, m: 94.54, a: 49.14 },
    PersistenceCoefficients { temperature_c: 18, m: 94.03, a: 50.31 },
    PersistenceCoefficients { temperature_c: 19, m: 93.50, a: 51.50 },
    PersistenceCoefficients { temperature_c: 20, m: 92.97, a: 52.70 },
    PersistenceCoefficients { temperature_c: 21, m: 92.42, a: 53.90 },
    PersistenceCoefficients { temperature_c: 22, m: 91.87, a: 55.12 },
    PersistenceCoefficients { temperature_c: 23, m: 91.30, a: 56.34 },
    PersistenceCoefficients { temperature_c: 24, m: 90.71, a: 57.58 },
    PersistenceCoefficients { temperature_c: 25, m: 90.12, a: 58.82 },
    PersistenceCoefficients { temperature_c: 26, m: 89.51, a: 60.08 },
    PersistenceCoefficients { temperature_c: 27, m: 88.90, a: 61.34 },
    PersistenceCoefficients { temperature_c: 28, m: 88.27, a: 62.62 },
    PersistenceCoefficients { temperature_c: 29, m: 87.62, a: 63.90 },
    PersistenceCoefficients { temperature_c: 30, m: 86.97, a: 65.19 },
    PersistenceCoefficients { temperature_c: 31, m: 86.30, a: 66.50 },
    PersistenceCoefficients { temperature_c: 32, m: 85.63, a: 67.81 },
    PersistenceCoefficients { temperature_c: 33, m: 84.94, a: 69.14 },
    PersistenceCoefficients { temperature_c: 34, m: 84.23, a: 70.47 },
    PersistenceCoefficients { temperature_c: 35, m: 83.52, a: 71.82 },
    PersistenceCoefficients { temperature_c: 36, m: 82.79, a: 73.17 },
    PersistenceCoefficients { temperature_c: 37, m: 82.06, a: 74.54 },
    PersistenceCoefficients { temperature_c: 38, m: 81.31, a: 75.91 },
    PersistenceCoefficients { temperature_c: 39, m: 80.54, a: 77.30 },
    PersistenceCoefficients { temperature_c: 40, m: 79.77, a: 78.69 },
];

/// Row for a whole-degree soil temperature.
///
/// Temperatures outside the table are clamped to the nearest bound here, at
/// the accessor, so every caller sees the same edge behavior.
pub fn coefficients_for(temperature_c: i32) -> PersistenceCoefficients {
    let clamped = temperature_c.clamp(SOIL_TEMPERATURE_MIN_C, SOIL_TEMPERATURE_MAX_C);
    PERSISTENCE_TABLE[(clamped - SOIL_TEMPERATURE_MIN_C) as usize]
}

/// The full table, for reporting.
pub fn table() -> &'static [PersistenceCoefficients] {
    &PERSISTENCE_TABLE
}
