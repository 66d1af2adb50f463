//! Fixed methodology constants.
//!
//! None of these are configuration. Changing any value changes the meaning of
//! previously issued results, so a change must come with a new
//! [`METHODOLOGY_VERSION`].

/// Methodology and constant-table version embedded in every result.
///
/// The suffix matches
/// [`PERSISTENCE_TABLE_STATUS`](super::persistence_table::PERSISTENCE_TABLE_STATUS):
/// the persistence coefficients are provisional.
pub const METHODOLOGY_VERSION: &str = "puro-biochar-2022-v3/bc200-provisional-1";

/// Maximum H/C_org molar ratio for eligible biochar (inclusive)
pub const H_CORG_MAX: f64 = 0.7;

/// Molar mass ratio of hydrogen-to-carbon mass percentages: C (12 g/mol) / H (1 g/mol)
pub const HYDROGEN_TO_CARBON_MOLAR_FACTOR: f64 = 12.0;

/// Molar mass ratio CO2 / C (44/12)
pub const CO2_TO_C_MOLAR_RATIO: f64 = 44.0 / 12.0;

/// Methane GWP over 100 years (IPCC AR5, without climate-carbon feedback)
pub const GWP100_CH4: f64 = 28.0;

/// Nitrous oxide GWP over 100 years (IPCC AR5)
pub const GWP100_N2O: f64 = 265.0;

/// Lowest mean annual soil temperature covered by the persistence table (°C)
pub const SOIL_TEMPERATURE_MIN_C: i32 = 7;

/// Highest mean annual soil temperature covered by the persistence table (°C)
pub const SOIL_TEMPERATURE_MAX_C: i32 = 40;

/// Flat emissions share used by the quick estimator (20% of C_stored)
pub const QUICK_ESTIMATE_EMISSION_FRACTION: f64 = 0.20;

/// Megajoules per gigajoule
pub const MJ_PER_GJ: f64 = 1000.0;
