//! Biochar quality model (H/C_org molar ratio)
//!
//! The hydrogen to organic-carbon molar ratio is a proxy for the degree of
//! carbonization. Puro.earth admits biochar with `H/C_org <= 0.7`.
//!
//! # Formula
//! ```text
//! H/C_org = (H% / C_org%) × 12.0
//! ```
//!
//! # References
//! - Puro.earth (2022). "Biochar Methodology", Edition 2022 V3, Section 4.
//! - European Biochar Certificate (2022). "Guidelines for a Sustainable
//!   Production of Biochar", v10.1, Section 4 (H/C_org threshold).

use serde::{Deserialize, Serialize};

use super::constants::{H_CORG_MAX, HYDROGEN_TO_CARBON_MOLAR_FACTOR};
use crate::core_types::units::Percent;
use crate::error::{ensure_finite, ensure_non_negative, CorcError, Result};

/// Informational quality band. Not used by the credit formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// `ratio <= 0.4`
    Excellent,
    /// `0.4 < ratio <= 0.55`
    Good,
    /// `0.55 < ratio <= 0.7`
    Acceptable,
    /// `ratio > 0.7`, not eligible for credits
    Ineligible,
}

impl QualityTier {
    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Ineligible => "Ineligible",
        }
    }
}

/// Compute the H/C_org molar ratio from mass percentages.
///
/// # Arguments
/// * `hydrogen` - Hydrogen mass fraction (%)
/// * `organic_carbon` - Organic carbon mass fraction (%), must be > 0
///
/// # Errors
/// [`CorcError::NonPositiveOrganicCarbon`] if `organic_carbon <= 0`,
/// [`CorcError::OutOfRange`] if `hydrogen < 0`.
pub fn compute_ratio(hydrogen: Percent, organic_carbon: Percent) -> Result<f64> {
    let hydrogen = ensure_non_negative("hydrogen", *hydrogen)?;
    let organic_carbon = ensure_finite("organic carbon", *organic_carbon)?;
    if organic_carbon <= 0.0 {
        return Err(CorcError::NonPositiveOrganicCarbon {
            value: organic_carbon,
        });
    }

    Ok((hydrogen / organic_carbon) * HYDROGEN_TO_CARBON_MOLAR_FACTOR)
}

/// Eligibility check, inclusive at the threshold.
#[inline]
pub fn is_eligible(ratio: f64) -> bool {
    ratio <= H_CORG_MAX
}

/// Banded classification of a ratio.
pub fn classify(ratio: f64) -> QualityTier {
    if ratio <= 0.4 {
        QualityTier::Excellent
    } else if ratio <= 0.55 {
        QualityTier::Good
    } else if ratio <= H_CORG_MAX {
        QualityTier::Acceptable
    } else {
        // NaN lands here too
        QualityTier::Ineligible
    }
}

/// Organic carbon from a total-carbon and inorganic-carbon lab pair.
///
/// # Errors
/// [`CorcError::InorganicExceedsTotal`] when the subtraction would be negative.
pub fn derive_organic_carbon(total_carbon: Percent, inorganic_carbon: Percent) -> Result<Percent> {
    let total = ensure_non_negative("total carbon", *total_carbon)?;
    let inorganic = ensure_non_negative("inorganic carbon", *inorganic_carbon)?;
    if inorganic > total {
        return Err(CorcError::InorganicExceedsTotal { total, inorganic });
    }
    Ok(Percent::new(total - inorganic))
}
