//! Project lifecycle emission records for one monitoring period
//!
//! Every term is a kilogram CO2e quantity except the stack methane and
//! nitrous-oxide masses, which are raw gas masses converted with GWP100
//! factors by [`ProductionEmissions::co2e_terms`].

use serde::{Deserialize, Serialize};

use crate::core_types::units::{KgCo2e, Megajoules};
use crate::methodology::constants::{GWP100_CH4, GWP100_N2O};

/// Greenhouse gases reported in emission logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenhouseGas {
    Co2,
    Ch4,
    N2o,
}

impl GreenhouseGas {
    /// 100-year global warming potential (IPCC AR5)
    pub const fn gwp100(&self) -> f64 {
        match self {
            Self::Co2 => 1.0,
            Self::Ch4 => GWP100_CH4,
            Self::N2o => GWP100_N2O,
        }
    }

    /// Convert a gas mass (kg) to kg CO2e
    pub fn to_co2e(&self, mass_kg: f64) -> KgCo2e {
        KgCo2e::new(mass_kg * self.gwp100())
    }
}

/// Feedstock cultivation, harvest and delivery
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomassSourcingEmissions {
    pub cultivation: KgCo2e,
    pub harvesting: KgCo2e,
    pub transport: KgCo2e,
    pub preprocessing: KgCo2e,
}

impl BiomassSourcingEmissions {
    pub fn terms(&self) -> [(&'static str, KgCo2e); 4] {
        [
            ("biomass.cultivation", self.cultivation),
            ("biomass.harvesting", self.harvesting),
            ("biomass.transport", self.transport),
            ("biomass.preprocessing", self.preprocessing),
        ]
    }

    pub fn total(&self) -> KgCo2e {
        self.terms().into_iter().map(|(_, v)| v).sum()
    }
}

/// Pyrolysis plant operation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionEmissions {
    /// Purchased electricity and fuels
    pub energy: KgCo2e,
    /// Process materials and consumables
    pub materials: KgCo2e,
    /// Waste treatment
    pub waste: KgCo2e,
    /// Methane slip from the stack (kg CH4, not CO2e)
    pub stack_ch4_kg: f64,
    /// Nitrous oxide from the stack (kg N2O, not CO2e)
    pub stack_n2o_kg: f64,
    /// Fossil CO2 from auxiliary burners
    pub fossil_co2: KgCo2e,
    pub maintenance: KgCo2e,
}

impl ProductionEmissions {
    /// All terms in kg CO2e, with stack gases converted by GWP100
    pub fn co2e_terms(&self) -> [(&'static str, KgCo2e); 7] {
        [
            ("production.energy", self.energy),
            ("production.materials", self.materials),
            ("production.waste", self.waste),
            ("production.stack_ch4", GreenhouseGas::Ch4.to_co2e(self.stack_ch4_kg)),
            ("production.stack_n2o", GreenhouseGas::N2o.to_co2e(self.stack_n2o_kg)),
            ("production.fossil_co2", self.fossil_co2),
            ("production.maintenance", self.maintenance),
        ]
    }
}

/// Facility and equipment emissions amortized over the monitoring period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbodiedEmissions {
    pub facility_construction: KgCo2e,
    pub equipment_manufacturing: KgCo2e,
    pub decommissioning: KgCo2e,
}

impl EmbodiedEmissions {
    pub fn terms(&self) -> [(&'static str, KgCo2e); 3] {
        [
            ("embodied.facility_construction", self.facility_construction),
            ("embodied.equipment_manufacturing", self.equipment_manufacturing),
            ("embodied.decommissioning", self.decommissioning),
        ]
    }

    pub fn total(&self) -> KgCo2e {
        self.terms().into_iter().map(|(_, v)| v).sum()
    }
}

/// Distribution and application of the biochar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndUseEmissions {
    pub transport: KgCo2e,
    pub application: KgCo2e,
    /// Blending or processing into the end product
    pub processing: KgCo2e,
}

impl EndUseEmissions {
    pub fn terms(&self) -> [(&'static str, KgCo2e); 3] {
        [
            ("end_use.transport", self.transport),
            ("end_use.application", self.application),
            ("end_use.processing", self.processing),
        ]
    }

    pub fn total(&self) -> KgCo2e {
        self.terms().into_iter().map(|(_, v)| v).sum()
    }
}

/// The four independently summed emission groups
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionsBreakdown {
    pub biomass: BiomassSourcingEmissions,
    pub production: ProductionEmissions,
    pub embodied: EmbodiedEmissions,
    pub end_use: EndUseEmissions,
}

impl EmissionsBreakdown {
    /// Every named term across all groups, in kg CO2e
    pub fn all_terms(&self) -> impl Iterator<Item = (&'static str, KgCo2e)> {
        self.biomass
            .terms()
            .into_iter()
            .chain(self.production.co2e_terms())
            .chain(self.embodied.terms())
            .chain(self.end_use.terms())
    }
}

/// Energy content of the products leaving the pyrolysis unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoProductEnergy {
    pub biochar: Megajoules,
    /// Heat, syngas, bio-oil and other exported energy carriers
    pub other: Megajoules,
}

/// Project emissions as supplied by the monitoring-period record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEmissionsInput {
    pub breakdown: EmissionsBreakdown,
    /// Explicit co-product allocation factor, takes precedence over
    /// `co_product_energy`
    pub allocation_factor: Option<f64>,
    pub co_product_energy: Option<CoProductEnergy>,
}
