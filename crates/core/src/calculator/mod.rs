//! CORC calculator
//!
//! The orchestrator runs the full methodology; validation, the quick
//! estimator, metrics and batch fan-out sit alongside it and never alter its
//! numbers.

pub mod batch;
pub mod estimate;
pub mod metrics;
pub mod orchestrator;
pub mod validation;

pub use batch::calculate_batch;
pub use estimate::{estimate, PreliminaryEstimate, ESTIMATE_LABEL};
pub use metrics::{efficiency_metrics, EfficiencyMetrics};
pub use orchestrator::{calculate, BreakdownTerm, CalculationInput, CorcResult, CLAMP_SYMBOL};
pub use validation::{validate_input, ValidationOptions, ValidationReport};
