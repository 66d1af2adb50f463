//! Core types: unit newtypes and the immutable calculation inputs

pub mod composition;
pub mod emissions;
pub mod leakage;
pub mod units;

pub use composition::{
    BaselineScenario, BiocharComposition, EndUseCategory, EndUseContext, IncorporationDetails,
    IncorporationMethod,
};
pub use emissions::{
    BiomassSourcingEmissions, CoProductEnergy, EmbodiedEmissions, EmissionsBreakdown,
    EndUseEmissions, GreenhouseGas, ProductionEmissions, ProjectEmissionsInput,
};
pub use leakage::{
    EcologicalLeakage, FeedstockCategory, IlucAssessment, IlucFactor, IlucRiskCategory, IlucTerm,
    LeakageBreakdown, MarketActivityLeakage,
};
pub use units::*;
