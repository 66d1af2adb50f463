//! Calculator pipeline tests: orchestration, diagnostics, estimator, metrics,
//! batch fan-out and the persisted result snapshot.
//!
//! Run tests with: cargo test --test `calculator_pipeline`

use approx::assert_relative_eq;
use corc_core::{
    calculate, calculate_batch,
    calculator::{CLAMP_SYMBOL, ESTIMATE_LABEL},
    core_types::{
        BaselineScenario, BiocharComposition, Celsius, CoProductEnergy, EndUseCategory,
        EndUseContext, IlucAssessment, IlucFactor, IlucRiskCategory, IlucTerm, KgCo2e,
        LeakageBreakdown, Megajoules, Percent, ProjectEmissionsInput, Tonnes, TonnesCo2e,
    },
    efficiency_metrics, estimate,
    methodology::{assess_risk, AllocationSource, RiskLevel},
    validate_input, CalculationInput, ValidationOptions, METHODOLOGY_VERSION,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::Value;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A monitoring period with every emission group populated
fn facility_period() -> CalculationInput {
    let mut project = ProjectEmissionsInput {
        co_product_energy: Some(CoProductEnergy {
            biochar: Megajoules::new(600_000.0),
            other: Megajoules::new(400_000.0),
        }),
        ..Default::default()
    };
    let groups = &mut project.breakdown;
    groups.biomass.harvesting = KgCo2e::new(350.0);
    groups.biomass.transport = KgCo2e::new(420.0);
    groups.production.energy = KgCo2e::new(1800.0);
    groups.production.stack_ch4_kg = 4.0;
    groups.production.stack_n2o_kg = 0.5;
    groups.embodied.facility_construction = KgCo2e::new(600.0);
    groups.end_use.transport = KgCo2e::new(150.0);
    groups.end_use.application = KgCo2e::new(80.0);

    let mut leakage = LeakageBreakdown::default();
    leakage.ecological.facility = KgCo2e::new(200.0);
    leakage.market_activity.iluc = IlucTerm::Derived(IlucAssessment {
        quantity_dry: Tonnes::new(1.0),
        lower_heating_value_gj_per_tonne: 17.0,
        factor: IlucFactor::Category(IlucRiskCategory::Cereals),
        attribution_factor: 0.5,
    });

    CalculationInput {
        composition: BiocharComposition::from_lab_analysis(
            Tonnes::new(25.0),
            Percent::new(82.0),
            Percent::new(2.0),
            Percent::new(2.5),
        )
        .unwrap(),
        end_use: EndUseContext::soil(Celsius::new(18.0)),
        baseline: BaselineScenario::CharcoalRepurpose {
            prior_storage: Some(TonnesCo2e::new(1.5)),
        },
        project_emissions: project,
        leakage,
    }
}

#[test]
fn full_period_terms_are_consistent() {
    let result = calculate(&facility_period()).unwrap();

    // f_alloc = 600 000 / 1 000 000
    assert_eq!(
        result.project_emissions.allocation_source,
        AllocationSource::CoProductEnergy
    );
    assert_relative_eq!(result.project_emissions.allocation_factor, 0.6, epsilon = 1e-12);
    // production = 1800 + 4×28 + 0.5×265 = 2044.5 kg
    assert_relative_eq!(
        *result.project_emissions.production_unallocated,
        2.0445,
        epsilon = 1e-9
    );
    // 350 + 420 + 0.6×2044.5 + 600 + 150 + 80 = 2826.7 kg
    assert_relative_eq!(*result.e_project, 2.8267, epsilon = 1e-9);
    // 200 + 1 × 17 000 × 0.012 × 0.5 = 302 kg
    assert_relative_eq!(*result.e_leakage, 0.302, epsilon = 1e-9);
    assert_relative_eq!(*result.c_baseline, 1.5);

    let expected = *result.c_stored - 1.5 - *result.c_loss - 2.8267 - 0.302;
    assert_relative_eq!(*result.net_corcs, expected, epsilon = 1e-9);
    assert_relative_eq!(
        *result.c_loss + *result.permanent_carbon,
        *result.c_stored,
        epsilon = 1e-9
    );
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn validation_and_calculation_agree_on_quality() {
    let mut rng = StdRng::seed_from_u64(7);
    let options = ValidationOptions::default();

    for _ in 0..200 {
        let mut case = facility_period();
        case.composition.hydrogen = Percent::new(rng.random_range(0.5..8.0));
        let report = validate_input(&case, &options);
        let result = calculate(&case).unwrap();
        assert_eq!(report.quality_valid, result.quality_valid);
        assert_eq!(report.h_corg_ratio, Some(result.h_corg_ratio));
    }
}

#[test]
fn validation_reports_warnings_without_blocking() {
    let mut case = facility_period();
    case.end_use = EndUseContext {
        soil_temperature: Celsius::new(3.0),
        category: EndUseCategory::Other,
        incorporation: None,
    };
    case.baseline = BaselineScenario::CharcoalRepurpose {
        prior_storage: None,
    };

    let report = validate_input(&case, &ValidationOptions::default());
    assert!(report.is_valid(), "{:?}", report.errors);
    assert_eq!(report.warnings.len(), 3, "{:?}", report.warnings);

    let result = calculate(&case).unwrap();
    assert!(result.soil_temperature_clamped);
    assert_eq!(*result.c_baseline, 0.0);
}

#[test]
fn estimate_is_labeled_and_differs_from_audit() {
    let case = facility_period();
    let preliminary = estimate(&case.composition, case.end_use.soil_temperature).unwrap();
    let audited = calculate(&case).unwrap();

    assert_eq!(preliminary.label, ESTIMATE_LABEL);
    assert_eq!(preliminary.c_stored, audited.c_stored);
    assert_eq!(preliminary.c_loss, audited.c_loss);
    assert_relative_eq!(
        *preliminary.estimated_emissions,
        *audited.c_stored * 0.2,
        epsilon = 1e-12
    );
    assert_ne!(preliminary.estimated_net_corcs, audited.net_corcs);
}

#[test]
fn efficiency_metrics_follow_result() {
    let result = calculate(&facility_period()).unwrap();
    let metrics = efficiency_metrics(&result);

    assert_relative_eq!(
        metrics.carbon_efficiency_percent,
        *result.net_corcs / *result.c_stored * 100.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        metrics.emission_intensity_tco2e_per_tonne,
        (2.8267 + 0.302) / 25.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        metrics.gross_to_net_ratio.unwrap(),
        *result.c_stored / *result.net_corcs,
        epsilon = 1e-12
    );
}

#[test]
fn batch_matches_sequential_calls() {
    let mut rng = StdRng::seed_from_u64(42);
    let inputs: Vec<(u32, CalculationInput)> = (0..64)
        .map(|id| {
            let mut case = facility_period();
            case.composition.dry_mass = Tonnes::new(rng.random_range(0.0..100.0));
            case.end_use.soil_temperature = Celsius::new(rng.random_range(5.0..42.0));
            (id, case)
        })
        .collect();

    let results = calculate_batch(&inputs);
    assert_eq!(results.len(), inputs.len());
    for (id, case) in &inputs {
        assert_eq!(results[id], calculate(case));
    }
}

#[test]
fn input_loads_from_minimal_record() {
    let record = r#"{
        "composition": { "dry_mass": 10.0, "organic_carbon": 80.0, "hydrogen": 3.0 },
        "end_use": { "soil_temperature": 15.0, "category": "soil" },
        "baseline": { "kind": "new_build" }
    }"#;
    let case: CalculationInput = serde_json::from_str(record).unwrap();
    let result = calculate(&case).unwrap();

    assert_relative_eq!(*result.net_corcs, 21.838_96, epsilon = 1e-5);
    assert_eq!(
        result.project_emissions.allocation_source,
        AllocationSource::DefaultedMissing
    );
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn result_snapshot_round_trips() {
    let result = calculate(&facility_period()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["methodology_version"], METHODOLOGY_VERSION);
    assert_eq!(value["quality_tier"], "excellent");
    assert_eq!(value["project_emissions"]["allocation_source"]["source"], "co_product_energy");
    assert_eq!(value["breakdown"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["breakdown"][5]["symbol"], CLAMP_SYMBOL);
    assert!(value["net_corcs"].is_f64());

    let restored: corc_core::CorcResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.methodology_version, result.methodology_version);
    assert_eq!(restored.breakdown.len(), result.breakdown.len());
    assert_relative_eq!(*restored.net_corcs, *result.net_corcs, epsilon = 1e-12);
}

#[test]
fn risk_triage_for_intake() {
    let triage = assess_risk(
        corc_core::core_types::FeedstockCategory::SugarCrop,
        false,
        true,
    );
    assert_eq!(triage.level, RiskLevel::High);
    assert!(triage.requires_iluc);
    assert_eq!(triage.notes.len(), 3);
}
