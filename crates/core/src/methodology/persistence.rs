//! Persistence model (BC+200)
//!
//! Estimates the share of stored carbon that remains after 200 years as a
//! function of biochar quality (H/C_org) and mean annual soil temperature.
//! The complement is booked as carbon loss.
//!
//! # Formula
//! ```text
//! PF     = clamp(M(T) − a(T) × H/C_org, 0, 100)
//! C_loss = C_stored × (100 − PF) / 100
//! ```
//!
//! `T` is the soil temperature rounded to a whole degree and clamped to the
//! table range 7..=40 °C. Clamping is reported, not hidden.

use serde::{Deserialize, Serialize};

use super::constants::{SOIL_TEMPERATURE_MAX_C, SOIL_TEMPERATURE_MIN_C};
use super::persistence_table::{coefficients_for, PersistenceCoefficients};
use super::quality::is_eligible;
use crate::core_types::units::{Celsius, Percent, TonnesCo2e};
use crate::error::{ensure_finite, ensure_non_negative, ensure_percent, CorcError, Result};

/// Result of a persistence lookup, with the audit trail of the table row used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistenceEstimate {
    /// Persistence fraction after 200 years (%)
    pub fraction: Percent,
    /// Soil temperature supplied by the caller
    pub soil_temperature: Celsius,
    /// Table row actually used (°C)
    pub table_temperature_c: i32,
    /// True when the supplied temperature was outside 7..=40 °C
    pub temperature_clamped: bool,
    /// Intercept `M` of the row used
    pub m: f64,
    /// Slope `a` of the row used
    pub a: f64,
}

/// Resolve the table row for a soil temperature.
///
/// Returns the whole-degree key and whether the temperature had to be clamped.
pub fn table_temperature(soil_temperature: Celsius) -> Result<(i32, bool)> {
    let t = ensure_finite("soil temperature", *soil_temperature)?;
    let (min, max) = (
        f64::from(SOIL_TEMPERATURE_MIN_C),
        f64::from(SOIL_TEMPERATURE_MAX_C),
    );
    let clamped = !(min..=max).contains(&t);
    let key = t.round().clamp(min, max) as i32;
    Ok((key, clamped))
}

/// Persistence fraction for eligible biochar.
///
/// # Arguments
/// * `h_corg_ratio` - H/C_org molar ratio, must be in [0, 0.7]
/// * `soil_temperature` - Mean annual soil temperature (clamped to 7..=40 °C)
///
/// # Errors
/// [`CorcError::IneligibleQuality`] for `ratio > 0.7`: ineligible biochar has
/// no defined persistence. [`CorcError::OutOfRange`] for a negative ratio.
pub fn persistence_fraction(
    h_corg_ratio: f64,
    soil_temperature: Celsius,
) -> Result<PersistenceEstimate> {
    let ratio = ensure_non_negative("H/C_org ratio", h_corg_ratio)?;
    if !is_eligible(ratio) {
        return Err(CorcError::IneligibleQuality { ratio });
    }

    let (table_temperature_c, temperature_clamped) = table_temperature(soil_temperature)?;
    let PersistenceCoefficients { m, a, .. } = coefficients_for(table_temperature_c);

    let fraction = (m - a * ratio).clamp(0.0, 100.0);

    Ok(PersistenceEstimate {
        fraction: Percent::new(fraction),
        soil_temperature,
        table_temperature_c,
        temperature_clamped,
        m,
        a,
    })
}

/// Stored carbon expected to be lost within the 200-year horizon.
pub fn carbon_loss(c_stored: TonnesCo2e, persistence_fraction: Percent) -> Result<TonnesCo2e> {
    let stored = ensure_non_negative("carbon stored", *c_stored)?;
    let pf = ensure_percent("persistence fraction", *persistence_fraction)?;

    Ok(TonnesCo2e::new(stored * ((100.0 - pf) / 100.0)))
}

/// Stored carbon expected to remain after 200 years. Reporting only.
pub fn permanent_carbon(
    c_stored: TonnesCo2e,
    persistence_fraction: Percent,
) -> Result<TonnesCo2e> {
    let stored = ensure_non_negative("carbon stored", *c_stored)?;
    let pf = ensure_percent("persistence fraction", *persistence_fraction)?;

    Ok(TonnesCo2e::new(stored * (pf / 100.0)))
}
