//! Leakage records: emissions caused indirectly by the project outside its
//! direct boundary.

use serde::{Deserialize, Serialize};

use crate::core_types::units::{KgCo2e, Tonnes};

/// Feedstock categories as recorded at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedstockCategory {
    AgriculturalResidue,
    ForestryResidue,
    WoodProcessingResidue,
    UrbanGreenWaste,
    AnimalManure,
    SewageSludge,
    /// Purpose-grown lignocellulosic energy crop (miscanthus, short-rotation coppice)
    DedicatedEnergyCrop,
    CerealCrop,
    SugarCrop,
    OilCrop,
    Other,
}

impl FeedstockCategory {
    /// Food and feed crops with a published iLUC risk estimate
    pub const fn iluc_risk_category(&self) -> Option<IlucRiskCategory> {
        match self {
            Self::CerealCrop => Some(IlucRiskCategory::Cereals),
            Self::SugarCrop => Some(IlucRiskCategory::Sugars),
            Self::OilCrop => Some(IlucRiskCategory::OilCrops),
            _ => None,
        }
    }

    /// Residues and wastes whose diversion can still displace an existing use
    pub const fn is_residue(&self) -> bool {
        matches!(
            self,
            Self::AgriculturalResidue
                | Self::ForestryResidue
                | Self::WoodProcessingResidue
                | Self::UrbanGreenWaste
                | Self::AnimalManure
                | Self::SewageSludge
        )
    }
}

/// Crop groups with provisional iLUC emission estimates
///
/// # References
/// - Directive (EU) 2018/2001 (RED II), Annex VIII, Part A: provisional
///   estimated indirect land-use change emissions from biofuel feedstocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IlucRiskCategory {
    Cereals,
    Sugars,
    OilCrops,
}

impl IlucRiskCategory {
    /// Default emission factor (kg CO2e per MJ of feedstock energy)
    pub const fn default_factor_kg_per_mj(&self) -> f64 {
        match self {
            Self::Cereals => 0.012,
            Self::Sugars => 0.013,
            Self::OilCrops => 0.055,
        }
    }
}

/// Source of the iLUC emission factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IlucFactor {
    /// Site-specific factor (kg CO2e/MJ)
    KgCo2ePerMj(f64),
    /// Default factor of a risk category
    Category(IlucRiskCategory),
}

impl IlucFactor {
    pub fn kg_per_mj(&self) -> f64 {
        match self {
            Self::KgCo2ePerMj(v) => *v,
            Self::Category(category) => category.default_factor_kg_per_mj(),
        }
    }
}

fn full_attribution() -> f64 {
    1.0
}

/// Inputs of the iLUC sub-calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlucAssessment {
    /// Feedstock quantity, dry basis (t)
    pub quantity_dry: Tonnes,
    /// Lower heating value of the feedstock (GJ/t)
    pub lower_heating_value_gj_per_tonne: f64,
    pub factor: IlucFactor,
    /// Share of the displacement attributed to this project, 0-1
    #[serde(default = "full_attribution")]
    pub attribution_factor: f64,
}

/// iLUC leakage, either reported directly or derived from feedstock data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IlucTerm {
    Reported { value: KgCo2e },
    Derived(IlucAssessment),
}

impl Default for IlucTerm {
    fn default() -> Self {
        Self::Reported {
            value: KgCo2e::ZERO,
        }
    }
}

/// Ecological leakage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EcologicalLeakage {
    /// Land cleared or converted for the facility
    pub facility: KgCo2e,
    /// Carbon stock changes in the biomass sourcing area
    pub biomass_sourcing_area: KgCo2e,
}

impl EcologicalLeakage {
    pub fn terms(&self) -> [(&'static str, KgCo2e); 2] {
        [
            ("ecological.facility", self.facility),
            ("ecological.biomass_sourcing_area", self.biomass_sourcing_area),
        ]
    }

    pub fn total(&self) -> KgCo2e {
        self.facility + self.biomass_sourcing_area
    }
}

/// Market and activity-shifting leakage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketActivityLeakage {
    /// Agriculture, forestry and other land use activity shifting
    pub afolu: KgCo2e,
    /// Displaced energy or material uses of the feedstock
    pub energy_material: KgCo2e,
    pub iluc: IlucTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeakageBreakdown {
    pub ecological: EcologicalLeakage,
    pub market_activity: MarketActivityLeakage,
}
