//! Methodology Validation Suite for the Puro.earth Biochar CORC Calculation
//!
//! Reference scenarios and invariants of the net credit formula
//!
//! ```text
//! CORCs = max(0, C_stored − C_baseline − C_loss − E_project − E_leakage)
//! ```
//!
//! # References Validated
//!
//! - **Puro.earth (2022)**: Biochar Methodology, Edition 2022 V3
//! - **BC+200 model**: persistence regression (15 °C reference row; other rows provisional)
//! - **IPCC AR5**: GWP100 factors for CH4 and N2O
//!
//! Run tests with: cargo test --test `puro_methodology_validation`

use approx::assert_relative_eq;
use corc_core::{
    calculate,
    core_types::{
        BaselineScenario, BiocharComposition, Celsius, EndUseContext, KgCo2e, LeakageBreakdown,
        Percent, ProjectEmissionsInput, Tonnes, TonnesCo2e,
    },
    methodology::{
        c_stored, constants::H_CORG_MAX, e_leakage, e_project, is_eligible, persistence_fraction,
    },
    validate_input, CalculationInput, CorcError, ValidationOptions,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn input(mass: f64, organic_carbon: f64, hydrogen: f64, soil_temperature: f64) -> CalculationInput {
    CalculationInput {
        composition: BiocharComposition::new(
            Tonnes::new(mass),
            Percent::new(organic_carbon),
            Percent::new(hydrogen),
        ),
        end_use: EndUseContext::soil(Celsius::new(soil_temperature)),
        baseline: BaselineScenario::NewBuild,
        project_emissions: ProjectEmissionsInput {
            allocation_factor: Some(1.0),
            ..Default::default()
        },
        leakage: LeakageBreakdown::default(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REFERENCE SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Scenario A: 10 t, 80% C_org, 3% H, 15°C, no emissions
#[test]
fn scenario_a_reference_batch() {
    let result = calculate(&input(10.0, 80.0, 3.0, 15.0)).unwrap();

    assert_relative_eq!(result.h_corg_ratio, 0.45, epsilon = 1e-12);
    assert_relative_eq!(*result.c_stored, 29.333, epsilon = 1e-3);
    assert_relative_eq!(*result.persistence_fraction, 74.45, epsilon = 1e-2);
    assert_relative_eq!(*result.c_loss, 7.495, epsilon = 1e-3);
    assert_relative_eq!(*result.net_corcs, 21.84, epsilon = 1e-2);
    assert!(result.quality_valid);
    assert_eq!(*result.c_baseline, 0.0);
}

/// Scenario B: 8% H gives H/C_org = 1.2, rejected by the strict path only
#[test]
fn scenario_b_ineligible_ratio() {
    let case = input(10.0, 80.0, 8.0, 15.0);
    let ratio = case.composition.h_corg_ratio().unwrap();
    assert_relative_eq!(ratio, 1.2, epsilon = 1e-12);

    assert!(matches!(
        persistence_fraction(ratio, Celsius::new(15.0)),
        Err(CorcError::IneligibleQuality { .. })
    ));

    let report = validate_input(&case, &ValidationOptions::default());
    assert!(!report.is_valid());
    assert!(!report.quality_valid);

    let result = calculate(&case).unwrap();
    assert!(!result.quality_valid);
    assert_eq!(*result.net_corcs, 0.0);
}

/// Scenario C: allocation 0.5 on 1000 kg production emissions
#[test]
fn scenario_c_allocation_on_production() {
    let mut case = input(10.0, 80.0, 3.0, 15.0);
    case.project_emissions.breakdown.production.energy = KgCo2e::new(1000.0);
    let value = e_project(&case.project_emissions.breakdown, 0.5).unwrap();
    assert_relative_eq!(*value, 0.5, epsilon = 1e-12);

    case.project_emissions.allocation_factor = Some(0.5);
    let result = calculate(&case).unwrap();
    assert_relative_eq!(*result.e_project, 0.5, epsilon = 1e-12);
}

/// Scenario D: facility leakage of 500 kg
#[test]
fn scenario_d_facility_leakage() {
    let mut leakage = LeakageBreakdown::default();
    leakage.ecological.facility = KgCo2e::new(500.0);
    assert_relative_eq!(*e_leakage(&leakage).unwrap(), 0.5, epsilon = 1e-12);
}

/// Scenario E: 10 − 0 − 3 − 2 − 1 = 4, and a net emitter clamps to 0
#[test]
fn scenario_e_net_and_clamp() {
    // PF = 70% at 15°C: 95.52 − 46.82 × r = 70
    let ratio = (95.52 - 70.0) / 46.82;
    let hydrogen = ratio * 100.0 / 12.0;
    let mass_for_ten = 10.0 / (44.0 / 12.0);

    let mut case = input(mass_for_ten, 100.0, hydrogen, 15.0);
    case.project_emissions.breakdown.production.energy = KgCo2e::new(2000.0);
    case.leakage.ecological.facility = KgCo2e::new(1000.0);
    let result = calculate(&case).unwrap();
    assert_relative_eq!(*result.c_stored, 10.0, epsilon = 1e-9);
    assert_relative_eq!(*result.c_loss, 3.0, epsilon = 1e-9);
    assert_relative_eq!(*result.net_corcs, 4.0, epsilon = 1e-9);
    assert!(!result.clamped_to_zero);

    // C_stored = 2, loss 0.6 + E_project 3.4 + E_leakage 1.0 = 5
    let mut case = input(mass_for_ten * 0.2, 100.0, hydrogen, 15.0);
    case.project_emissions.breakdown.production.energy = KgCo2e::new(3400.0);
    case.leakage.ecological.facility = KgCo2e::new(1000.0);
    let result = calculate(&case).unwrap();
    assert_eq!(result.net_corcs, TonnesCo2e::ZERO);
    assert!(result.clamped_to_zero);
    assert_relative_eq!(*result.unclamped_net(), -3.0, epsilon = 1e-9);
}

// ═══════════════════════════════════════════════════════════════════════════════
// BOUNDARIES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn quality_threshold_is_inclusive() {
    assert!(is_eligible(0.70));
    assert!(!is_eligible(0.700_000_01));
    assert!(persistence_fraction(H_CORG_MAX, Celsius::new(20.0)).is_ok());
    assert!(persistence_fraction(0.700_000_01, Celsius::new(20.0)).is_err());
}

#[test]
fn soil_temperature_clamps_to_table_bounds() {
    let low = persistence_fraction(0.45, Celsius::new(6.9)).unwrap();
    let at_low = persistence_fraction(0.45, Celsius::new(7.0)).unwrap();
    assert!(low.temperature_clamped);
    assert!(!at_low.temperature_clamped);
    assert_eq!(low.table_temperature_c, 7);
    assert_eq!(low.fraction, at_low.fraction);

    let high = persistence_fraction(0.45, Celsius::new(40.1)).unwrap();
    let at_high = persistence_fraction(0.45, Celsius::new(40.0)).unwrap();
    assert!(high.temperature_clamped);
    assert_eq!(high.table_temperature_c, 40);
    assert_eq!(high.fraction, at_high.fraction);

    let result = calculate(&input(10.0, 80.0, 3.0, 45.0)).unwrap();
    assert!(result.soil_temperature_clamped);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn warmer_soil_lowers_persistence() {
    let cool = calculate(&input(10.0, 80.0, 3.0, 10.0)).unwrap();
    let warm = calculate(&input(10.0, 80.0, 3.0, 30.0)).unwrap();
    assert!(warm.persistence_fraction < cool.persistence_fraction);
    assert!(warm.net_corcs < cool.net_corcs);
}

#[test]
fn strict_functions_reject_invalid_arguments() {
    assert!(c_stored(Tonnes::new(-0.1), Percent::new(80.0)).is_err());
    assert!(c_stored(Tonnes::new(1.0), Percent::new(100.1)).is_err());
    assert!(calculate(&input(10.0, 0.0, 3.0, 15.0)).is_err());
    assert!(calculate(&input(10.0, 80.0, -1.0, 15.0)).is_err());
}

// ═══════════════════════════════════════════════════════════════════════════════
// INVARIANTS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn net_is_never_negative_and_c_stored_is_exact() {
    let mut rng = StdRng::seed_from_u64(0x00C0_2C00);

    for _ in 0..500 {
        let mass = rng.random_range(0.0..500.0);
        let organic_carbon = rng.random_range(1.0..=100.0);
        let hydrogen = rng.random_range(0.0..6.0);
        let temperature = rng.random_range(0.0..45.0);

        let mut case = input(mass, organic_carbon, hydrogen, temperature);
        case.project_emissions.breakdown.production.energy =
            KgCo2e::new(rng.random_range(0.0..200_000.0));
        case.project_emissions.allocation_factor = Some(rng.random_range(0.05..=1.0));
        case.leakage.market_activity.afolu = KgCo2e::new(rng.random_range(0.0..20_000.0));

        let result = calculate(&case).unwrap();
        assert!(*result.net_corcs >= 0.0, "negative net for {case:?}");
        assert_eq!(
            *result.c_stored,
            mass * (organic_carbon / 100.0) * (44.0 / 12.0),
            "C_stored identity broken for {case:?}"
        );
        let sum: f64 = result.breakdown.iter().map(|t| *t.contribution).sum();
        assert_relative_eq!(sum, *result.net_corcs, epsilon = 1e-6);
    }
}

#[test]
fn calculation_is_idempotent() {
    let mut case = input(12.5, 76.0, 2.4, 22.3);
    case.project_emissions.breakdown.production.stack_ch4_kg = 3.2;
    case.leakage.ecological.biomass_sourcing_area = KgCo2e::new(120.0);

    let first = calculate(&case).unwrap();
    let second = calculate(&case).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
