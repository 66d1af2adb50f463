//! Leakage model (E_leakage)
//!
//! Ecological leakage (facility land and biomass sourcing area) plus market
//! and activity-shifting leakage (AFOLU, displaced energy/material uses and
//! indirect land-use change).
//!
//! # Formula
//! ```text
//! E_leakage = (E_ecological + E_afolu + E_energy_material + E_iLUC) / 1000
//! E_iLUC    = Q_dry × (LHV × 1000) × EF_iLUC × attribution
//! ```
//!
//! where `Q_dry` is in t, `LHV` in GJ/t and `EF_iLUC` in kg CO2e/MJ.

use serde::{Deserialize, Serialize};

use super::constants::MJ_PER_GJ;
use crate::core_types::leakage::{
    EcologicalLeakage, FeedstockCategory, IlucAssessment, IlucTerm, LeakageBreakdown,
    MarketActivityLeakage,
};
use crate::core_types::units::{KgCo2e, Tonnes, TonnesCo2e};
use crate::error::{ensure_finite, ensure_non_negative, CorcError, Result};

pub fn ecological_total(ecological: &EcologicalLeakage) -> KgCo2e {
    ecological.total()
}

/// Indirect land-use change emissions (kg CO2e).
///
/// # Arguments
/// * `quantity_dry` - Feedstock quantity, dry basis (t)
/// * `lower_heating_value_gj_per_tonne` - Feedstock LHV (GJ/t)
/// * `iluc_factor_kg_per_mj` - Emission factor (kg CO2e/MJ)
/// * `attribution_factor` - Share attributed to the project, in [0, 1]
pub fn iluc(
    quantity_dry: Tonnes,
    lower_heating_value_gj_per_tonne: f64,
    iluc_factor_kg_per_mj: f64,
    attribution_factor: f64,
) -> Result<KgCo2e> {
    let quantity = ensure_non_negative("iLUC feedstock quantity", *quantity_dry)?;
    let lhv = ensure_non_negative("lower heating value", lower_heating_value_gj_per_tonne)?;
    let factor = ensure_non_negative("iLUC emission factor", iluc_factor_kg_per_mj)?;
    let attribution = ensure_finite("attribution factor", attribution_factor)?;
    if !(0.0..=1.0).contains(&attribution) {
        return Err(CorcError::OutOfRange {
            quantity: "attribution factor",
            value: attribution,
            expected: "0-1",
        });
    }

    Ok(KgCo2e::new(
        quantity * (lhv * MJ_PER_GJ) * factor * attribution,
    ))
}

pub fn iluc_from_assessment(assessment: &IlucAssessment) -> Result<KgCo2e> {
    iluc(
        assessment.quantity_dry,
        assessment.lower_heating_value_gj_per_tonne,
        assessment.factor.kg_per_mj(),
        assessment.attribution_factor,
    )
}

/// Resolve an iLUC term to kg CO2e.
pub fn iluc_term_value(term: &IlucTerm) -> Result<KgCo2e> {
    match term {
        IlucTerm::Reported { value } => {
            ensure_non_negative("market_activity.iluc", **value).map(KgCo2e::new)
        }
        IlucTerm::Derived(assessment) => iluc_from_assessment(assessment),
    }
}

/// Market and activity-shifting leakage (kg CO2e). Fails when the iLUC
/// sub-calculation does.
pub fn market_activity_total(market: &MarketActivityLeakage) -> Result<KgCo2e> {
    Ok(market.afolu + market.energy_material + iluc_term_value(&market.iluc)?)
}

/// Leakage emissions in tonnes CO2e.
pub fn e_leakage(breakdown: &LeakageBreakdown) -> Result<TonnesCo2e> {
    for (name, value) in breakdown.ecological.terms() {
        ensure_non_negative(name, *value)?;
    }
    ensure_non_negative("market_activity.afolu", *breakdown.market_activity.afolu)?;
    ensure_non_negative(
        "market_activity.energy_material",
        *breakdown.market_activity.energy_material,
    )?;

    let total =
        ecological_total(&breakdown.ecological) + market_activity_total(&breakdown.market_activity)?;
    Ok(total.to_tonnes())
}

/// Whether a feedstock needs an iLUC assessment.
pub fn requires_iluc_assessment(category: FeedstockCategory, is_dedicated_crop: bool) -> bool {
    is_dedicated_crop
        || matches!(
            category,
            FeedstockCategory::DedicatedEnergyCrop
                | FeedstockCategory::CerealCrop
                | FeedstockCategory::SugarCrop
                | FeedstockCategory::OilCrop
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Qualitative leakage triage for the intake workflow. Not used by the
/// credit formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub requires_iluc: bool,
    pub mitigation_required: bool,
    pub notes: Vec<String>,
}

pub fn assess_risk(
    category: FeedstockCategory,
    is_dedicated_crop: bool,
    has_existing_use: bool,
) -> RiskAssessment {
    let requires_iluc = requires_iluc_assessment(category, is_dedicated_crop);
    let mut notes = Vec::new();

    let level = if requires_iluc {
        notes.push(
            "Feedstock competes for land with food, feed or energy crops; quantify iLUC".to_string(),
        );
        if let Some(risk) = category.iluc_risk_category() {
            notes.push(format!(
                "Default iLUC factor available: {} kg CO2e/MJ",
                risk.default_factor_kg_per_mj()
            ));
        }
        RiskLevel::High
    } else if has_existing_use {
        notes.push(
            "Feedstock has an existing use; document displaced energy or material uses"
                .to_string(),
        );
        RiskLevel::Medium
    } else {
        if category.is_residue() {
            notes.push("Residue or waste stream with no competing use".to_string());
        }
        RiskLevel::Low
    };

    if requires_iluc && has_existing_use {
        notes.push("Existing use also displaced; include energy/material leakage".to_string());
    }

    RiskAssessment {
        level,
        requires_iluc,
        mitigation_required: level != RiskLevel::Low,
        notes,
    }
}
