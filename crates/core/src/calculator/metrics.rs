//! Reporting-only efficiency metrics derived from a [`CorcResult`]

use serde::{Deserialize, Serialize};

use super::orchestrator::CorcResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// Net credits as a share of carbon stored (%)
    pub carbon_efficiency_percent: f64,
    /// `(E_project + E_leakage)` per tonne of dry biochar (tCO2e/t)
    pub emission_intensity_tco2e_per_tonne: f64,
    /// `C_stored / net`; `None` when no credits are issued
    pub gross_to_net_ratio: Option<f64>,
    pub net_corcs_per_tonne: f64,
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn efficiency_metrics(result: &CorcResult) -> EfficiencyMetrics {
    let stored = *result.c_stored;
    let net = *result.net_corcs;
    let mass = *result.dry_mass;

    EfficiencyMetrics {
        carbon_efficiency_percent: ratio_or_zero(net, stored) * 100.0,
        emission_intensity_tco2e_per_tonne: ratio_or_zero(
            *result.e_project + *result.e_leakage,
            mass,
        ),
        gross_to_net_ratio: (net > 0.0).then_some(stored / net),
        net_corcs_per_tonne: ratio_or_zero(net, mass),
    }
}
