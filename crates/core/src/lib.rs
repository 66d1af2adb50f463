//! Puro.earth Biochar CORC Calculation Core
//!
//! Computes CO2 Removal Certificates (CORCs) for biochar production batches
//! under the Puro.earth Biochar Methodology (Edition 2022 V3). The net credit
//! quantity is
//!
//! ```text
//! CORCs = max(0, C_stored − C_baseline − C_loss − E_project − E_leakage)
//! ```
//!
//! ## Layout
//!
//! - [`core_types`]: unit newtypes and the calculation inputs
//! - [`methodology`]: one strict model per formula term
//! - [`calculator`]: orchestration, lenient validation, estimates, metrics
//!
//! Everything is synchronous and stateless. Results embed
//! [`METHODOLOGY_VERSION`](methodology::constants::METHODOLOGY_VERSION) so
//! archived snapshots stay reproducible.

// Core types and units
pub mod core_types;
pub mod error;

// Formula terms
pub mod methodology;

// Orchestration and reporting
pub mod calculator;

pub use calculator::{
    calculate, calculate_batch, efficiency_metrics, estimate, validate_input, BreakdownTerm,
    CalculationInput, CorcResult, EfficiencyMetrics, PreliminaryEstimate, ValidationOptions,
    ValidationReport,
};
pub use core_types::{
    BaselineScenario, BiocharComposition, EmissionsBreakdown, EndUseCategory, EndUseContext,
    LeakageBreakdown, ProjectEmissionsInput,
};
pub use error::{CorcError, Result};
pub use methodology::constants::METHODOLOGY_VERSION;
