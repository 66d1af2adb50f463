use serde::{Deserialize, Serialize};

use crate::core_types::units::{Celsius, Percent, Tonnes, TonnesCo2e};
use crate::error::{ensure_percent, Result};
use crate::methodology::carbon_stored::dry_mass_from_wet;
use crate::methodology::quality::{compute_ratio, derive_organic_carbon};

/// Elemental composition and mass of one biochar batch (lab results)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiocharComposition {
    /// Dry biochar mass (t)
    pub dry_mass: Tonnes,
    /// Organic carbon content, dry basis (%)
    pub organic_carbon: Percent,
    /// Hydrogen content, dry basis (%)
    pub hydrogen: Percent,
    /// Total carbon content when reported by the lab (%)
    #[serde(default)]
    pub total_carbon: Option<Percent>,
    /// Inorganic (carbonate) carbon when reported by the lab (%)
    #[serde(default)]
    pub inorganic_carbon: Option<Percent>,
}

impl BiocharComposition {
    /// Composition from a lab report that states organic carbon directly
    pub fn new(dry_mass: Tonnes, organic_carbon: Percent, hydrogen: Percent) -> Self {
        Self {
            dry_mass,
            organic_carbon,
            hydrogen,
            total_carbon: None,
            inorganic_carbon: None,
        }
    }

    /// Composition from a total/inorganic carbon pair; organic carbon is derived
    pub fn from_lab_analysis(
        dry_mass: Tonnes,
        total_carbon: Percent,
        inorganic_carbon: Percent,
        hydrogen: Percent,
    ) -> Result<Self> {
        let organic_carbon = derive_organic_carbon(total_carbon, inorganic_carbon)?;
        Ok(Self {
            dry_mass,
            organic_carbon,
            hydrogen,
            total_carbon: Some(total_carbon),
            inorganic_carbon: Some(inorganic_carbon),
        })
    }

    /// Composition for an as-received batch weighed wet
    pub fn from_wet_mass(
        wet_mass: Tonnes,
        moisture: Percent,
        organic_carbon: Percent,
        hydrogen: Percent,
    ) -> Result<Self> {
        let dry_mass = dry_mass_from_wet(wet_mass, moisture)?;
        Ok(Self::new(dry_mass, organic_carbon, hydrogen))
    }

    /// Organic carbon implied by the lab total/inorganic pair, if one was
    /// reported. Missing inorganic carbon counts as 0%.
    ///
    /// # Errors
    /// Either value outside 0-100%, or inorganic carbon above total carbon.
    pub fn lab_organic_carbon(&self) -> Result<Option<Percent>> {
        let Some(total) = self.total_carbon else {
            return Ok(None);
        };
        let inorganic = self.inorganic_carbon.unwrap_or(Percent::ZERO);
        ensure_percent("total carbon", *total)?;
        ensure_percent("inorganic carbon", *inorganic)?;
        derive_organic_carbon(total, inorganic).map(Some)
    }

    /// H/C_org molar ratio of this batch
    pub fn h_corg_ratio(&self) -> Result<f64> {
        compute_ratio(self.hydrogen, self.organic_carbon)
    }
}

/// Where the biochar ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndUseCategory {
    /// Agricultural or urban soil application
    Soil,
    /// Concrete, asphalt and other construction materials
    Construction,
    Other,
}

/// How the biochar is incorporated into its end use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncorporationMethod {
    SoilAmendment,
    CompostBlend,
    ConcreteAdditive,
    AsphaltAdditive,
    Other,
}

/// Optional detail recorded at application time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncorporationDetails {
    pub method: IncorporationMethod,
    /// Application rate (t/ha), soil uses only
    #[serde(default)]
    pub application_rate_t_per_ha: Option<f64>,
    /// Incorporation depth (cm), soil uses only
    #[serde(default)]
    pub depth_cm: Option<f64>,
}

/// End-use conditions that drive the persistence model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndUseContext {
    /// Mean annual soil temperature at the application site
    pub soil_temperature: Celsius,
    pub category: EndUseCategory,
    #[serde(default)]
    pub incorporation: Option<IncorporationDetails>,
}

impl EndUseContext {
    /// Soil application at the given mean annual temperature
    pub fn soil(soil_temperature: Celsius) -> Self {
        Self {
            soil_temperature,
            category: EndUseCategory::Soil,
            incorporation: None,
        }
    }
}

/// Counterfactual carbon storage without the project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaselineScenario {
    /// New production facility; baseline is zero
    NewBuild,
    /// Retrofit of an existing facility; baseline is zero
    Retrofit,
    /// Charcoal production repurposed to biochar; the prior storage must be
    /// supplied from facility records
    CharcoalRepurpose {
        #[serde(default)]
        prior_storage: Option<TonnesCo2e>,
    },
}

impl BaselineScenario {
    /// Baseline storage, and whether a required value was missing (treated as 0)
    pub fn resolve(&self) -> (TonnesCo2e, bool) {
        match self {
            Self::NewBuild | Self::Retrofit => (TonnesCo2e::ZERO, false),
            Self::CharcoalRepurpose {
                prior_storage: Some(prior),
            } => (*prior, false),
            Self::CharcoalRepurpose {
                prior_storage: None,
            } => (TonnesCo2e::ZERO, true),
        }
    }
}
