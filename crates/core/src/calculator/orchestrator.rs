//! CORC orchestrator
//!
//! Combines the methodology models into the net credit formula:
//!
//! ```text
//! CORCs = max(0, C_stored − C_baseline − C_loss − E_project − E_leakage)
//! ```
//!
//! An ineligible quality ratio does not abort the calculation. The full
//! numeric trail is still produced with `quality_valid = false`, a
//! persistence fraction of 0% (no defined persistence) and therefore the
//! whole of `C_stored` booked as loss.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core_types::composition::{BaselineScenario, BiocharComposition, EndUseContext};
use crate::core_types::emissions::ProjectEmissionsInput;
use crate::core_types::leakage::LeakageBreakdown;
use crate::core_types::units::{Percent, Tonnes, TonnesCo2e};
use crate::error::{ensure_non_negative, Result};
use crate::methodology::carbon_stored::c_stored;
use crate::methodology::constants::{
    METHODOLOGY_VERSION, SOIL_TEMPERATURE_MAX_C, SOIL_TEMPERATURE_MIN_C,
};
use crate::methodology::leakage::e_leakage;
use crate::methodology::persistence::{
    carbon_loss, permanent_carbon, persistence_fraction, table_temperature, PersistenceEstimate,
};
use crate::methodology::project_emissions::{
    project_emissions_breakdown, AllocationSource, ProjectEmissionsBreakdown,
};
use crate::methodology::quality::{classify, is_eligible, QualityTier};

/// Everything one calculation needs, as stored on a monitoring-period record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub composition: BiocharComposition,
    pub end_use: EndUseContext,
    pub baseline: BaselineScenario,
    #[serde(default)]
    pub project_emissions: ProjectEmissionsInput,
    #[serde(default)]
    pub leakage: LeakageBreakdown,
}

/// One signed line of the audit breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownTerm {
    /// Formula symbol, e.g. `C_loss`
    pub symbol: String,
    pub description: String,
    /// Signed contribution to the net quantity
    pub contribution: TonnesCo2e,
}

impl BreakdownTerm {
    fn new(symbol: &str, description: &str, contribution: TonnesCo2e) -> Self {
        Self {
            symbol: symbol.to_string(),
            description: description.to_string(),
            contribution,
        }
    }
}

/// Symbol of the clamp adjustment line in [`CorcResult::breakdown`]
pub const CLAMP_SYMBOL: &str = "clamp";

/// Immutable result of a CORC calculation, persisted as a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorcResult {
    pub methodology_version: String,
    pub dry_mass: Tonnes,
    pub h_corg_ratio: f64,
    pub quality_valid: bool,
    pub quality_tier: QualityTier,
    pub c_stored: TonnesCo2e,
    pub c_baseline: TonnesCo2e,
    /// Persistence fraction used in the formula (0% for ineligible biochar)
    pub persistence_fraction: Percent,
    /// Table lookup detail; `None` when the quality ratio is ineligible
    pub persistence: Option<PersistenceEstimate>,
    pub soil_temperature_clamped: bool,
    pub c_loss: TonnesCo2e,
    /// Reporting only
    pub permanent_carbon: TonnesCo2e,
    pub e_project: TonnesCo2e,
    pub project_emissions: ProjectEmissionsBreakdown,
    pub e_leakage: TonnesCo2e,
    /// Net credits, never negative
    pub net_corcs: TonnesCo2e,
    pub clamped_to_zero: bool,
    /// Signed terms in formula order followed by the clamp adjustment
    pub breakdown: Vec<BreakdownTerm>,
    /// Fallbacks taken during the calculation
    pub warnings: Vec<String>,
}

impl CorcResult {
    /// Net quantity before the clamp, recovered from the formula terms
    pub fn unclamped_net(&self) -> TonnesCo2e {
        self.breakdown
            .iter()
            .filter(|term| term.symbol != CLAMP_SYMBOL)
            .fold(TonnesCo2e::ZERO, |acc, term| acc + term.contribution)
    }
}

/// Run the full CORC calculation.
///
/// # Errors
/// Strict domain errors for physically invalid data (negative mass, percent
/// out of range, inorganic carbon above total carbon, negative emission
/// terms, invalid iLUC inputs). An
/// ineligible H/C_org ratio is not an error.
pub fn calculate(input: &CalculationInput) -> Result<CorcResult> {
    let composition = &input.composition;
    let mut warnings = Vec::new();

    // 1. Quality
    if let Some(derived) = composition.lab_organic_carbon()? {
        debug!(derived_organic_carbon = *derived, "lab carbon pair consistent");
    }
    let h_corg_ratio = composition.h_corg_ratio()?;
    let quality_valid = is_eligible(h_corg_ratio);
    let quality_tier = classify(h_corg_ratio);
    debug!(h_corg_ratio, quality_valid, ?quality_tier, "quality ratio computed");
    if !quality_valid {
        warn!(h_corg_ratio, "H/C_org exceeds 0.7; reporting result as ineligible");
        warnings.push(format!(
            "H/C_org ratio {h_corg_ratio:.4} exceeds 0.7: biochar is not eligible, persistence set to 0%"
        ));
    }

    // 2. Carbon stored
    let stored = c_stored(composition.dry_mass, composition.organic_carbon)?;
    debug!(c_stored_t = *stored, "carbon stored computed");

    // 3. Baseline
    let (baseline, baseline_missing) = input.baseline.resolve();
    let baseline = TonnesCo2e::new(ensure_non_negative("baseline storage", *baseline)?);
    if baseline_missing {
        warn!("charcoal-repurpose baseline missing; using 0");
        warnings.push(
            "Charcoal-repurpose baseline has no prior storage value; 0 tCO2e used".to_string(),
        );
    }

    // 4. Persistence and loss
    let soil_temperature = input.end_use.soil_temperature;
    let (persistence, pf, soil_temperature_clamped) = if quality_valid {
        let estimate = persistence_fraction(h_corg_ratio, soil_temperature)?;
        (Some(estimate), estimate.fraction, estimate.temperature_clamped)
    } else {
        let (_, clamped) = table_temperature(soil_temperature)?;
        (None, Percent::ZERO, clamped)
    };
    if soil_temperature_clamped {
        warn!(soil_temperature = *soil_temperature, "soil temperature clamped");
        warnings.push(format!(
            "Soil temperature {soil_temperature} outside {SOIL_TEMPERATURE_MIN_C}-{SOIL_TEMPERATURE_MAX_C}°C; nearest table row used"
        ));
    }
    let loss = carbon_loss(stored, pf)?;
    let permanent = permanent_carbon(stored, pf)?;
    debug!(persistence_pct = *pf, c_loss_t = *loss, "persistence applied");

    // 5. Project emissions
    let project_emissions = project_emissions_breakdown(&input.project_emissions)?;
    match project_emissions.allocation_source {
        AllocationSource::DefaultedMissing => {
            warn!("allocation factor missing; using 1.0");
            warnings.push("Co-product allocation factor missing; 1.0 used".to_string());
        }
        AllocationSource::DefaultedInvalid { supplied } => {
            warn!(supplied, "invalid allocation factor replaced with 1.0");
            warnings.push(format!(
                "Co-product allocation factor {supplied} outside (0, 1]; 1.0 used"
            ));
        }
        AllocationSource::DefaultedInvalidEnergy { biochar, other } => {
            warn!(biochar, other, "invalid co-product energy; allocation factor 1.0 used");
            warnings.push(format!(
                "Co-product energy (biochar {biochar} MJ, other {other} MJ) must be non-negative; allocation factor 1.0 used"
            ));
        }
        AllocationSource::Explicit | AllocationSource::CoProductEnergy => {}
    }
    let e_project = project_emissions.total;

    // 6. Leakage
    let e_leakage = e_leakage(&input.leakage)?;
    debug!(e_project_t = *e_project, e_leakage_t = *e_leakage, "emissions aggregated");

    // 7. Net, clamped at zero
    let unclamped = stored - baseline - loss - e_project - e_leakage;
    let net_corcs = unclamped.max(TonnesCo2e::ZERO);
    let clamped_to_zero = net_corcs != unclamped;
    if clamped_to_zero {
        warn!(unclamped_t = *unclamped, "net balance negative; zero credits issued");
        warnings.push(format!(
            "Net balance {unclamped} is negative; the project is a net emitter and issues 0 CORCs"
        ));
    }

    let breakdown = vec![
        BreakdownTerm::new("C_stored", "Carbon stored in biochar", stored),
        BreakdownTerm::new("C_baseline", "Baseline carbon storage", -baseline),
        BreakdownTerm::new("C_loss", "Carbon lost within 200 years", -loss),
        BreakdownTerm::new("E_project", "Project emissions", -e_project),
        BreakdownTerm::new("E_leakage", "Leakage emissions", -e_leakage),
        BreakdownTerm::new(
            CLAMP_SYMBOL,
            "Adjustment for the zero floor on net credits",
            net_corcs - unclamped,
        ),
    ];

    // 8. Version tag
    info!(
        net_corcs_t = *net_corcs,
        quality_valid,
        methodology = METHODOLOGY_VERSION,
        "CORC calculation complete"
    );

    Ok(CorcResult {
        methodology_version: METHODOLOGY_VERSION.to_string(),
        dry_mass: composition.dry_mass,
        h_corg_ratio,
        quality_valid,
        quality_tier,
        c_stored: stored,
        c_baseline: baseline,
        persistence_fraction: pf,
        persistence,
        soil_temperature_clamped,
        c_loss: loss,
        permanent_carbon: permanent,
        e_project,
        project_emissions,
        e_leakage,
        net_corcs,
        clamped_to_zero,
        breakdown,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::emissions::CoProductEnergy;
    use crate::core_types::units::{Celsius, KgCo2e, Megajoules};
    use crate::error::CorcError;
    use approx::assert_relative_eq;

    fn scenario_a() -> CalculationInput {
        CalculationInput {
            composition: BiocharComposition::new(
                Tonnes::new(10.0),
                Percent::new(80.0),
                Percent::new(3.0),
            ),
            end_use: EndUseContext::soil(Celsius::new(15.0)),
            baseline: BaselineScenario::NewBuild,
            project_emissions: ProjectEmissionsInput {
                allocation_factor: Some(1.0),
                ..Default::default()
            },
            leakage: LeakageBreakdown::default(),
        }
    }

    #[test]
    fn test_reference_batch() {
        let result = calculate(&scenario_a()).unwrap();
        assert_relative_eq!(result.h_corg_ratio, 0.45, epsilon = 1e-12);
        assert_relative_eq!(*result.c_stored, 29.333_333, epsilon = 1e-5);
        assert_relative_eq!(*result.persistence_fraction, 74.451, epsilon = 1e-6);
        assert_relative_eq!(*result.c_loss, 7.494_373, epsilon = 1e-5);
        assert_relative_eq!(*result.net_corcs, 21.838_96, epsilon = 1e-5);
        assert!(result.quality_valid);
        assert!(!result.clamped_to_zero);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.methodology_version, METHODOLOGY_VERSION);
    }

    #[test]
    fn test_breakdown_sums_to_net() {
        let result = calculate(&scenario_a()).unwrap();
        let total = result
            .breakdown
            .iter()
            .fold(TonnesCo2e::ZERO, |acc, t| acc + t.contribution);
        assert_relative_eq!(*total, *result.net_corcs, epsilon = 1e-9);
        assert_relative_eq!(*result.unclamped_net(), *result.net_corcs, epsilon = 1e-9);
    }

    #[test]
    fn test_ineligible_batch_still_reports() {
        let mut input = scenario_a();
        input.composition.hydrogen = Percent::new(8.0);
        let result = calculate(&input).unwrap();
        assert!(!result.quality_valid);
        assert_eq!(result.quality_tier, QualityTier::Ineligible);
        assert_eq!(result.persistence, None);
        assert_eq!(result.c_loss, result.c_stored);
        assert_eq!(*result.net_corcs, 0.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_negative_balance_clamps_and_stays_visible() {
        let mut input = scenario_a();
        input.project_emissions.breakdown.production.energy = KgCo2e::new(40_000.0);
        let result = calculate(&input).unwrap();
        assert_eq!(*result.net_corcs, 0.0);
        assert!(result.clamped_to_zero);
        assert_relative_eq!(*result.unclamped_net(), 21.838_96 - 40.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_charcoal_baseline_warns() {
        let mut input = scenario_a();
        input.baseline = BaselineScenario::CharcoalRepurpose {
            prior_storage: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(*result.c_baseline, 0.0);
        assert!(result.warnings.iter().any(|w| w.contains("Charcoal-repurpose")));
    }

    #[test]
    fn test_allocation_fallback_is_reported() {
        let mut input = scenario_a();
        input.project_emissions.allocation_factor = Some(0.0);
        input.project_emissions.breakdown.production.energy = KgCo2e::new(1000.0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.project_emissions.allocation_factor, 1.0);
        assert_relative_eq!(*result.e_project, 1.0);
        assert!(result.warnings.iter().any(|w| w.contains("outside (0, 1]")));
    }

    #[test]
    fn test_inorganic_above_total_is_an_error() {
        let mut input = scenario_a();
        input.composition.total_carbon = Some(Percent::new(5.0));
        input.composition.inorganic_carbon = Some(Percent::new(6.0));
        assert_eq!(
            calculate(&input),
            Err(CorcError::InorganicExceedsTotal {
                total: 5.0,
                inorganic: 6.0
            })
        );

        input.composition.total_carbon = Some(Percent::new(81.0));
        input.composition.inorganic_carbon = Some(Percent::new(1.0));
        assert!(calculate(&input).is_ok());
    }

    #[test]
    fn test_negative_co_product_energy_is_reported() {
        let mut input = scenario_a();
        input.project_emissions.allocation_factor = None;
        input.project_emissions.co_product_energy = Some(CoProductEnergy {
            biochar: Megajoules::new(500.0),
            other: Megajoules::new(-100.0),
        });
        let result = calculate(&input).unwrap();
        assert_eq!(result.project_emissions.allocation_factor, 1.0);
        assert!(result.project_emissions.allocation_source.is_defaulted());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("must be non-negative"));
    }

    #[test]
    fn test_invalid_mass_is_an_error() {
        let mut input = scenario_a();
        input.composition.dry_mass = Tonnes::new(-1.0);
        assert!(calculate(&input).is_err());
    }
}
