//! Domain errors raised by the strict methodology functions.
//!
//! These are data-integrity errors: an argument outside its physically valid
//! range is reported, never coerced. The lenient diagnostics channel is
//! [`validate_input`](crate::calculator::validate_input), which never fails.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorcError {
    #[error("{quantity} is out of range: got {value}, expected {expected}")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("{quantity} must be a finite number")]
    NonFinite { quantity: &'static str },

    #[error("organic carbon must be greater than 0% to compute H/C_org, got {value}%")]
    NonPositiveOrganicCarbon { value: f64 },

    #[error("inorganic carbon ({inorganic}%) exceeds total carbon ({total}%)")]
    InorganicExceedsTotal { total: f64, inorganic: f64 },

    #[error("H/C_org ratio {ratio:.4} exceeds the 0.7 eligibility limit; persistence is undefined")]
    IneligibleQuality { ratio: f64 },

    #[error("co-product allocation factor must be in (0, 1], got {value}")]
    InvalidAllocationFactor { value: f64 },
}

pub type Result<T> = std::result::Result<T, CorcError>;

/// Reject NaN and infinities before any range check.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CorcError::NonFinite { quantity })
    }
}

/// Reject negative (or non-finite) quantities.
pub(crate) fn ensure_non_negative(quantity: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(quantity, value)?;
    if value < 0.0 {
        return Err(CorcError::OutOfRange {
            quantity,
            value,
            expected: ">= 0",
        });
    }
    Ok(value)
}

/// Reject values outside the closed percent range [0, 100].
pub(crate) fn ensure_percent(quantity: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(quantity, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CorcError::OutOfRange {
            quantity,
            value,
            expected: "0-100%",
        });
    }
    Ok(value)
}
