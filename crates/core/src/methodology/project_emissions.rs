//! Project emissions model (E_project)
//!
//! Aggregates lifecycle emissions of one monitoring period into a single
//! CO2-equivalent figure. Stack methane and nitrous oxide are converted with
//! GWP100 factors; when the plant exports other energy carriers, only the
//! production group is allocated to the biochar by energy content.
//!
//! # Formula
//! ```text
//! E_project = (E_biomass + f_alloc × E_production + E_embodied + E_end_use) / 1000
//! f_alloc   = E_biochar / (E_biochar + E_other co-products)
//! ```
//!
//! [`e_project`] is the strict path and rejects an allocation factor outside
//! `(0, 1]`. [`project_emissions_breakdown`] is the caller-facing reporting
//! path; it substitutes 1.0 for a missing or invalid factor and says so in
//! [`AllocationSource`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::emissions::{
    BiomassSourcingEmissions, EmbodiedEmissions, EmissionsBreakdown, EndUseEmissions,
    ProductionEmissions, ProjectEmissionsInput,
};
use crate::core_types::units::{KgCo2e, Megajoules, TonnesCo2e};
use crate::error::{ensure_non_negative, CorcError, Result};

pub fn biomass_total(biomass: &BiomassSourcingEmissions) -> KgCo2e {
    biomass.total()
}

pub fn embodied_total(embodied: &EmbodiedEmissions) -> KgCo2e {
    embodied.total()
}

pub fn end_use_total(end_use: &EndUseEmissions) -> KgCo2e {
    end_use.total()
}

/// Production emissions with stack CH4/N2O converted to CO2e (GWP100, AR5).
pub fn production_total(production: &ProductionEmissions) -> KgCo2e {
    production.co2e_terms().into_iter().map(|(_, v)| v).sum()
}

/// Energy-content allocation factor for the biochar co-product.
///
/// Returns 1.0 when no energy is reported at all. A biochar energy of zero
/// yields 0.0, which [`validate_allocation_factor`] rejects.
///
/// # Errors
/// Negative or non-finite energy contents.
pub fn co_product_allocation_factor(
    biochar: Megajoules,
    other_co_products: Megajoules,
) -> Result<f64> {
    let biochar = ensure_non_negative("co-product energy (biochar)", *biochar)?;
    let other = ensure_non_negative("co-product energy (other)", *other_co_products)?;
    let total = biochar + other;
    if total == 0.0 {
        return Ok(1.0);
    }
    Ok(biochar / total)
}

/// Accept only factors in `(0, 1]`.
pub fn validate_allocation_factor(factor: f64) -> Result<f64> {
    if factor.is_finite() && factor > 0.0 && factor <= 1.0 {
        Ok(factor)
    } else {
        Err(CorcError::InvalidAllocationFactor { value: factor })
    }
}

fn ensure_terms_non_negative(breakdown: &EmissionsBreakdown) -> Result<()> {
    ensure_non_negative("production.stack_ch4_kg", breakdown.production.stack_ch4_kg)?;
    ensure_non_negative("production.stack_n2o_kg", breakdown.production.stack_n2o_kg)?;
    for (name, value) in breakdown.all_terms() {
        ensure_non_negative(name, *value)?;
    }
    Ok(())
}

/// Project emissions in tonnes CO2e (strict).
///
/// The allocation factor applies to the production group only.
pub fn e_project(breakdown: &EmissionsBreakdown, allocation_factor: f64) -> Result<TonnesCo2e> {
    let factor = validate_allocation_factor(allocation_factor)?;
    ensure_terms_non_negative(breakdown)?;

    let total = biomass_total(&breakdown.biomass)
        + production_total(&breakdown.production) * factor
        + embodied_total(&breakdown.embodied)
        + end_use_total(&breakdown.end_use);

    Ok(total.to_tonnes())
}

/// Where the applied allocation factor came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AllocationSource {
    /// Factor supplied on the monitoring-period record
    Explicit,
    /// Derived from co-product energy content
    CoProductEnergy,
    /// Nothing supplied; 1.0 used
    DefaultedMissing,
    /// Supplied or derived factor outside (0, 1]; 1.0 used
    DefaultedInvalid { supplied: f64 },
    /// Co-product energy negative or non-finite; 1.0 used
    DefaultedInvalidEnergy { biochar: f64, other: f64 },
}

impl AllocationSource {
    pub fn is_defaulted(&self) -> bool {
        matches!(
            self,
            Self::DefaultedMissing
                | Self::DefaultedInvalid { .. }
                | Self::DefaultedInvalidEnergy { .. }
        )
    }
}

/// Resolve the allocation factor for reporting, falling back to 1.0.
///
/// Convenience defaulting lives here and nowhere else; [`e_project`] never
/// substitutes a value.
pub fn resolve_allocation_factor(input: &ProjectEmissionsInput) -> (f64, AllocationSource) {
    let (candidate, source) = match (input.allocation_factor, input.co_product_energy) {
        (Some(factor), _) => (factor, AllocationSource::Explicit),
        (None, Some(energy)) => match co_product_allocation_factor(energy.biochar, energy.other) {
            Ok(factor) => (factor, AllocationSource::CoProductEnergy),
            Err(_) => {
                return (
                    1.0,
                    AllocationSource::DefaultedInvalidEnergy {
                        biochar: *energy.biochar,
                        other: *energy.other,
                    },
                )
            }
        },
        (None, None) => return (1.0, AllocationSource::DefaultedMissing),
    };

    match validate_allocation_factor(candidate) {
        Ok(factor) => (factor, source),
        Err(_) => (
            1.0,
            AllocationSource::DefaultedInvalid {
                supplied: candidate,
            },
        ),
    }
}

/// Per-group project emissions for audit display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectEmissionsBreakdown {
    pub biomass: TonnesCo2e,
    /// Production emissions before allocation
    pub production_unallocated: TonnesCo2e,
    /// Production emissions attributed to the biochar
    pub production_allocated: TonnesCo2e,
    pub embodied: TonnesCo2e,
    pub end_use: TonnesCo2e,
    pub allocation_factor: f64,
    pub allocation_source: AllocationSource,
    /// `E_project`
    pub total: TonnesCo2e,
}

impl ProjectEmissionsBreakdown {
    /// Sum of the allocated components; equals `total` up to rounding
    pub fn component_sum(&self) -> TonnesCo2e {
        self.biomass + self.production_allocated + self.embodied + self.end_use
    }
}

/// Caller-facing project emissions with a labeled allocation fallback.
///
/// Negative or non-finite emission terms are still rejected.
pub fn project_emissions_breakdown(
    input: &ProjectEmissionsInput,
) -> Result<ProjectEmissionsBreakdown> {
    let (allocation_factor, allocation_source) = resolve_allocation_factor(input);
    let breakdown = &input.breakdown;
    let total = e_project(breakdown, allocation_factor)?;

    let production = production_total(&breakdown.production);
    debug!(
        allocation_factor,
        ?allocation_source,
        production_kg = *production,
        total_t = *total,
        "project emissions aggregated"
    );

    Ok(ProjectEmissionsBreakdown {
        biomass: biomass_total(&breakdown.biomass).to_tonnes(),
        production_unallocated: production.to_tonnes(),
        production_allocated: (production * allocation_factor).to_tonnes(),
        embodied: embodied_total(&breakdown.embodied).to_tonnes(),
        end_use: end_use_total(&breakdown.end_use).to_tonnes(),
        allocation_factor,
        allocation_source,
        total,
    })
}
