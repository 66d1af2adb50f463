//! Puro.earth biochar methodology models
//!
//! Each submodule implements one term of the CORC formula as strict pure
//! functions. Data flows one way: quality and carbon stored feed
//! persistence; everything feeds the [`calculator`](crate::calculator).

pub mod carbon_stored;
pub mod constants;
pub mod leakage;
pub mod persistence;
pub mod persistence_table;
pub mod project_emissions;
pub mod quality;

pub use carbon_stored::{c_stored, dry_mass_from_wet};
pub use leakage::{
    assess_risk, e_leakage, ecological_total, iluc, market_activity_total,
    requires_iluc_assessment, RiskAssessment, RiskLevel,
};
pub use persistence::{carbon_loss, permanent_carbon, persistence_fraction, PersistenceEstimate};
pub use persistence_table::PersistenceCoefficients;
pub use project_emissions::{
    biomass_total, co_product_allocation_factor, e_project, embodied_total, end_use_total,
    production_total, project_emissions_breakdown, AllocationSource, ProjectEmissionsBreakdown,
};
pub use quality::{classify, compute_ratio, derive_organic_carbon, is_eligible, QualityTier};
