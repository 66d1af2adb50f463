//! Carbon stored model (C_stored)
//!
//! Converts a dry biochar mass and its organic carbon content into the
//! CO2-equivalent quantity held in the biochar before any decay.
//!
//! # Formula
//! ```text
//! C_stored = m_dry × (C_org / 100) × 44/12
//! m_dry    = m_wet × (1 − moisture / 100)
//! ```

use super::constants::CO2_TO_C_MOLAR_RATIO;
use crate::core_types::units::{Percent, Tonnes, TonnesCo2e};
use crate::error::{ensure_finite, ensure_non_negative, ensure_percent, CorcError, Result};

/// Gross CO2e stored in a batch of biochar.
///
/// # Arguments
/// * `dry_mass` - Dry biochar mass (t), must be >= 0
/// * `organic_carbon` - Organic carbon content (%), must be in [0, 100]
///
/// # Returns
/// Stored carbon in tCO2e. A mass so large that the product overflows is
/// rejected as non-finite.
pub fn c_stored(dry_mass: Tonnes, organic_carbon: Percent) -> Result<TonnesCo2e> {
    let mass = ensure_non_negative("dry mass", *dry_mass)?;
    let corg = ensure_percent("organic carbon", *organic_carbon)?;

    let stored = ensure_finite("carbon stored", mass * (corg / 100.0) * CO2_TO_C_MOLAR_RATIO)?;
    Ok(TonnesCo2e::new(stored))
}

/// Dry mass from an as-received (wet) mass and its moisture content.
///
/// Moisture must be in `[0, 100)`; a fully wet sample has no dry mass to
/// certify.
pub fn dry_mass_from_wet(wet_mass: Tonnes, moisture: Percent) -> Result<Tonnes> {
    let wet = ensure_non_negative("wet mass", *wet_mass)?;
    let moisture = ensure_finite("moisture", *moisture)?;
    if !(0.0..100.0).contains(&moisture) {
        return Err(CorcError::OutOfRange {
            quantity: "moisture",
            value: moisture,
            expected: "0-100% (exclusive of 100)",
        });
    }

    Ok(Tonnes::new(wet * (1.0 - moisture / 100.0)))
}
