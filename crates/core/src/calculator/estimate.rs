//! Preliminary CORC estimator (non-normative)
//!
//! Sizing tool for feasibility conversations before emission logs exist.
//! Project emissions and leakage are replaced by a flat share of `C_stored`.
//! A [`PreliminaryEstimate`] has no conversion into a
//! [`CorcResult`](super::orchestrator::CorcResult) and must never feed an
//! issuable figure.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::composition::BiocharComposition;
use crate::core_types::units::{Celsius, Percent, TonnesCo2e};
use crate::error::Result;
use crate::methodology::carbon_stored::c_stored;
use crate::methodology::constants::QUICK_ESTIMATE_EMISSION_FRACTION;
use crate::methodology::persistence::{carbon_loss, persistence_fraction};
use crate::methodology::quality::is_eligible;

/// Label carried on every estimate
pub const ESTIMATE_LABEL: &str =
    "Preliminary estimate: emissions approximated as 20% of carbon stored; not valid for issuance";

/// Rough credit figure. Deliberately a distinct type from the audited result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreliminaryEstimate {
    pub label: String,
    pub h_corg_ratio: f64,
    pub eligible: bool,
    pub c_stored: TonnesCo2e,
    pub persistence_fraction: Percent,
    pub c_loss: TonnesCo2e,
    /// Flat heuristic standing in for `E_project + E_leakage`
    pub estimated_emissions: TonnesCo2e,
    pub estimated_net_corcs: TonnesCo2e,
}

/// Quick estimate from composition and soil temperature alone.
///
/// Ineligible biochar gives an estimate of zero with `eligible = false`
/// instead of an error.
pub fn estimate(
    composition: &BiocharComposition,
    soil_temperature: Celsius,
) -> Result<PreliminaryEstimate> {
    let h_corg_ratio = composition.h_corg_ratio()?;
    let stored = c_stored(composition.dry_mass, composition.organic_carbon)?;
    let estimated_emissions = stored * QUICK_ESTIMATE_EMISSION_FRACTION;
    let eligible = is_eligible(h_corg_ratio);

    let (pf, loss, net) = if eligible {
        let pf = persistence_fraction(h_corg_ratio, soil_temperature)?.fraction;
        let loss = carbon_loss(stored, pf)?;
        let net = (stored - loss - estimated_emissions).max(TonnesCo2e::ZERO);
        (pf, loss, net)
    } else {
        (Percent::ZERO, stored, TonnesCo2e::ZERO)
    };

    debug!(h_corg_ratio, eligible, estimated_net_t = *net, "preliminary estimate");

    Ok(PreliminaryEstimate {
        label: ESTIMATE_LABEL.to_string(),
        h_corg_ratio,
        eligible,
        c_stored: stored,
        persistence_fraction: pf,
        c_loss: loss,
        estimated_emissions,
        estimated_net_corcs: net,
    })
}
