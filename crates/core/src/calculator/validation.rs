//! Lenient input validation
//!
//! [`validate_input`] never fails. It collects human-readable errors, which
//! block eligibility and issuance, and warnings, which are shown to the
//! operator but do not block. The strict methodology functions remain the
//! authority on what is computable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::orchestrator::CalculationInput;
use crate::core_types::composition::{BaselineScenario, EndUseCategory};
use crate::core_types::emissions::EmissionsBreakdown;
use crate::core_types::leakage::{IlucTerm, LeakageBreakdown};
use crate::core_types::units::Percent;
use crate::methodology::carbon_stored::c_stored;
use crate::methodology::constants::{H_CORG_MAX, SOIL_TEMPERATURE_MAX_C, SOIL_TEMPERATURE_MIN_C};
use crate::methodology::leakage::iluc_from_assessment;
use crate::methodology::project_emissions::{co_product_allocation_factor, validate_allocation_factor};
use crate::methodology::quality::{compute_ratio, is_eligible};

/// Tunable diagnostics thresholds. Methodology constants are not tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Warn when `0.7 − margin < H/C_org <= 0.7`
    pub near_threshold_margin: f64,
    /// Hydrogen content above this is unusual for biochar (%)
    pub practical_hydrogen_max: f64,
    /// Allowed gap between reported organic carbon and total − inorganic (percentage points)
    pub composition_tolerance: f64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            near_threshold_margin: 0.05,
            practical_hydrogen_max: 15.0,
            composition_tolerance: 0.5,
        }
    }
}

impl ValidationOptions {
    /// Preset for pre-issuance review: wider near-threshold band, tighter lab consistency
    pub fn strict() -> Self {
        Self {
            near_threshold_margin: 0.1,
            practical_hydrogen_max: 10.0,
            composition_tolerance: 0.2,
        }
    }
}

/// Outcome of [`validate_input`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// `None` when the ratio could not be computed
    pub h_corg_ratio: Option<f64>,
    pub quality_valid: bool,
}

impl ValidationReport {
    /// No blocking errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn check_percent(errors: &mut Vec<String>, name: &str, value: Percent) {
    if !value.is_valid_mass_fraction() {
        errors.push(format!("{name} must be between 0 and 100%, got {}", *value));
    }
}

fn check_emissions(errors: &mut Vec<String>, breakdown: &EmissionsBreakdown) {
    let stack_masses = [
        ("production.stack_ch4_kg", breakdown.production.stack_ch4_kg),
        ("production.stack_n2o_kg", breakdown.production.stack_n2o_kg),
    ];
    for (name, value) in stack_masses {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(format!("Emission term {name} must be a non-negative number, got {value}"));
        }
    }
    for (name, value) in breakdown.all_terms() {
        if !(value.is_finite() && *value >= 0.0) {
            errors.push(format!("Emission term {name} must be a non-negative number, got {}", *value));
        }
    }
}

fn check_leakage(errors: &mut Vec<String>, leakage: &LeakageBreakdown) {
    let market = &leakage.market_activity;
    let mut terms = leakage.ecological.terms().to_vec();
    terms.push(("market_activity.afolu", market.afolu));
    terms.push(("market_activity.energy_material", market.energy_material));
    for (name, value) in terms {
        if !(value.is_finite() && *value >= 0.0) {
            errors.push(format!("Leakage term {name} must be a non-negative number, got {}", *value));
        }
    }

    match &market.iluc {
        IlucTerm::Reported { value } => {
            if !(value.is_finite() && **value >= 0.0) {
                errors.push(format!("Reported iLUC must be a non-negative number, got {}", **value));
            }
        }
        IlucTerm::Derived(assessment) => {
            if let Err(err) = iluc_from_assessment(assessment) {
                errors.push(format!("iLUC assessment is invalid: {err}"));
            }
        }
    }
}

/// Range and consistency checks over a full calculation input.
pub fn validate_input(input: &CalculationInput, options: &ValidationOptions) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let composition = &input.composition;

    // Mass and composition
    let mass = *composition.dry_mass;
    if !(mass.is_finite() && mass >= 0.0) {
        errors.push(format!("Dry mass must be a non-negative number, got {mass}"));
    } else if mass == 0.0 {
        warnings.push("Dry mass is 0 t; no credits can be issued".to_string());
    }

    check_percent(&mut errors, "Organic carbon", composition.organic_carbon);
    if errors.is_empty() {
        if let Err(err) = c_stored(composition.dry_mass, composition.organic_carbon) {
            errors.push(format!("Carbon stored cannot be computed: {err}"));
        }
    }
    check_percent(&mut errors, "Hydrogen", composition.hydrogen);
    if *composition.hydrogen > options.practical_hydrogen_max
        && composition.hydrogen.is_valid_mass_fraction()
    {
        warnings.push(format!(
            "Hydrogen content {} is above the practical maximum of {}%",
            composition.hydrogen, options.practical_hydrogen_max
        ));
    }

    if let Some(total) = composition.total_carbon {
        check_percent(&mut errors, "Total carbon", total);
        let inorganic = composition.inorganic_carbon.unwrap_or(Percent::ZERO);
        check_percent(&mut errors, "Inorganic carbon", inorganic);
        if inorganic > total {
            errors.push(format!(
                "Inorganic carbon ({inorganic}) exceeds total carbon ({total})"
            ));
        } else {
            let derived = *total - *inorganic;
            let gap = (derived - *composition.organic_carbon).abs();
            if gap > options.composition_tolerance {
                warnings.push(format!(
                    "Organic carbon {} differs from total − inorganic ({derived:.2}%) by {gap:.2} points",
                    composition.organic_carbon
                ));
            }
        }
    }

    // Quality
    let h_corg_ratio = match compute_ratio(composition.hydrogen, composition.organic_carbon) {
        Ok(ratio) => Some(ratio),
        Err(err) => {
            errors.push(format!("H/C_org ratio cannot be computed: {err}"));
            None
        }
    };
    let quality_valid = h_corg_ratio.is_some_and(is_eligible);
    if let Some(ratio) = h_corg_ratio {
        if !is_eligible(ratio) {
            errors.push(format!(
                "H/C_org ratio {ratio:.4} exceeds the maximum of {H_CORG_MAX}; biochar is not eligible"
            ));
        } else if ratio > H_CORG_MAX - options.near_threshold_margin {
            warnings.push(format!(
                "H/C_org ratio {ratio:.4} is within {} of the {H_CORG_MAX} limit",
                options.near_threshold_margin
            ));
        }
    }

    // End use
    let temperature = *input.end_use.soil_temperature;
    if !temperature.is_finite() {
        errors.push("Soil temperature must be a finite number".to_string());
    } else if !(f64::from(SOIL_TEMPERATURE_MIN_C)..=f64::from(SOIL_TEMPERATURE_MAX_C))
        .contains(&temperature)
    {
        warnings.push(format!(
            "Soil temperature {} outside {SOIL_TEMPERATURE_MIN_C}-{SOIL_TEMPERATURE_MAX_C}°C will be clamped",
            input.end_use.soil_temperature
        ));
    }
    if input.end_use.category == EndUseCategory::Other {
        warnings.push(
            "End use 'other' is not covered by the soil persistence model; document the application"
                .to_string(),
        );
    }
    if let Some(details) = input.end_use.incorporation {
        for (name, value) in [
            ("Application rate", details.application_rate_t_per_ha),
            ("Incorporation depth", details.depth_cm),
        ] {
            if let Some(v) = value.filter(|v| !(v.is_finite() && *v >= 0.0)) {
                errors.push(format!("{name} must be a non-negative number, got {v}"));
            }
        }
    }

    // Baseline
    if let BaselineScenario::CharcoalRepurpose { prior_storage } = input.baseline {
        match prior_storage {
            None => warnings.push(
                "Charcoal-repurpose baseline requires prior storage; 0 tCO2e will be used"
                    .to_string(),
            ),
            Some(prior) if !(prior.is_finite() && *prior >= 0.0) => {
                errors.push(format!("Baseline prior storage must be non-negative, got {}", *prior));
            }
            Some(_) => {}
        }
    }

    // Project emissions
    let project = &input.project_emissions;
    check_emissions(&mut errors, &project.breakdown);
    match (project.allocation_factor, project.co_product_energy) {
        (Some(factor), _) => {
            if validate_allocation_factor(factor).is_err() {
                errors.push(format!(
                    "Co-product allocation factor must be in (0, 1], got {factor}"
                ));
            }
        }
        (None, Some(energy)) => match co_product_allocation_factor(energy.biochar, energy.other) {
            Err(err) => errors.push(format!("Co-product energy is invalid: {err}")),
            Ok(factor) if validate_allocation_factor(factor).is_err() => errors.push(format!(
                "Co-product energy gives an allocation factor of {factor}; biochar energy must be positive"
            )),
            Ok(_) => {}
        },
        (None, None) => {
            warnings.push("Co-product allocation factor missing; 1.0 will be used".to_string());
        }
    }

    // Leakage
    check_leakage(&mut errors, &input.leakage);

    debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        quality_valid,
        "input validated"
    );

    ValidationReport {
        errors,
        warnings,
        h_corg_ratio,
        quality_valid,
    }
}
