//! Semantic unit types for type-safe quantity handling
//!
//! Newtype wrappers prevent mixing incompatible quantities in the credit
//! formula (e.g. kilograms of CO2e with tonnes of CO2e, or a percent with a
//! fraction).
//!
//! # Design Philosophy
//! - Every type wraps `f64`; credit quantities are financially consequential
//!   and are summed over many terms
//! - Constructors do not validate. Range checks belong to the methodology
//!   functions, which report them as [`CorcError`](crate::CorcError) values
//! - Total ordering via `total_cmp` (NaN sorts above all values)
//! - `KgCo2e::to_tonnes` is the single kg → t conversion point
//!
//! # Usage
//! ```
//! use corc_core::core_types::units::{KgCo2e, TonnesCo2e};
//!
//! let stack = KgCo2e::new(1500.0);
//! let tonnes: TonnesCo2e = stack.to_tonnes();
//! assert!((*tonnes - 1.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Deref, Mul, Neg, Sub};

/// Kilograms per tonne
const KG_PER_TONNE: f64 = 1000.0;

/// Compare f64 values with total ordering
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// PERCENT
// ============================================================================

/// Percentage value (0-100 for mass fractions, not enforced by the type)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Zero percent
    pub const ZERO: Percent = Percent(0.0);

    /// One hundred percent
    pub const FULL: Percent = Percent(100.0);

    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the value lies in the closed range [0, 100]
    #[inline]
    #[must_use]
    pub fn is_valid_mass_fraction(self) -> bool {
        (0.0..=100.0).contains(&self.0)
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

// ============================================================================
// MASS
// ============================================================================

/// Mass in metric tonnes (biochar or feedstock)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Tonnes(f64);

impl Eq for Tonnes {}

impl PartialOrd for Tonnes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tonnes {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Tonnes {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Tonnes {
    /// Create a new mass in tonnes
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Tonnes(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Tonnes {
    fn from(v: f64) -> Self {
        Tonnes(v)
    }
}

impl From<Tonnes> for f64 {
    fn from(t: Tonnes) -> f64 {
        t.0
    }
}

impl fmt::Display for Tonnes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} t", self.0)
    }
}

// ============================================================================
// CO2-EQUIVALENT QUANTITIES
// ============================================================================

/// Greenhouse-gas quantity in tonnes of CO2-equivalent (the CORC unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct TonnesCo2e(f64);

impl Eq for TonnesCo2e {}

impl PartialOrd for TonnesCo2e {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TonnesCo2e {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for TonnesCo2e {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TonnesCo2e {
    /// Zero tonnes
    pub const ZERO: TonnesCo2e = TonnesCo2e(0.0);

    /// Create a new CO2e quantity in tonnes. Negative values are allowed for
    /// intermediate results (e.g. an unclamped net balance).
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        TonnesCo2e(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for TonnesCo2e {
    fn from(v: f64) -> Self {
        TonnesCo2e(v)
    }
}

impl From<TonnesCo2e> for f64 {
    fn from(t: TonnesCo2e) -> f64 {
        t.0
    }
}

impl fmt::Display for TonnesCo2e {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} tCO2e", self.0)
    }
}

impl Add for TonnesCo2e {
    type Output = TonnesCo2e;
    fn add(self, rhs: TonnesCo2e) -> TonnesCo2e {
        TonnesCo2e(self.0 + rhs.0)
    }
}

impl Sub for TonnesCo2e {
    type Output = TonnesCo2e;
    fn sub(self, rhs: TonnesCo2e) -> TonnesCo2e {
        TonnesCo2e(self.0 - rhs.0)
    }
}

impl Neg for TonnesCo2e {
    type Output = TonnesCo2e;
    fn neg(self) -> TonnesCo2e {
        TonnesCo2e(-self.0)
    }
}

impl Mul<f64> for TonnesCo2e {
    type Output = TonnesCo2e;
    fn mul(self, rhs: f64) -> TonnesCo2e {
        TonnesCo2e(self.0 * rhs)
    }
}

/// Greenhouse-gas quantity in kilograms of CO2-equivalent (emission log unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct KgCo2e(f64);

impl Eq for KgCo2e {}

impl PartialOrd for KgCo2e {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KgCo2e {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for KgCo2e {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl KgCo2e {
    /// Zero kilograms
    pub const ZERO: KgCo2e = KgCo2e(0.0);

    /// Create a new CO2e quantity in kilograms
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KgCo2e(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to tonnes of CO2e
    #[inline]
    #[must_use]
    pub fn to_tonnes(self) -> TonnesCo2e {
        TonnesCo2e(self.0 / KG_PER_TONNE)
    }
}

impl From<f64> for KgCo2e {
    fn from(v: f64) -> Self {
        KgCo2e(v)
    }
}

impl From<KgCo2e> for f64 {
    fn from(k: KgCo2e) -> f64 {
        k.0
    }
}

impl fmt::Display for KgCo2e {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kgCO2e", self.0)
    }
}

impl Add for KgCo2e {
    type Output = KgCo2e;
    fn add(self, rhs: KgCo2e) -> KgCo2e {
        KgCo2e(self.0 + rhs.0)
    }
}

impl Mul<f64> for KgCo2e {
    type Output = KgCo2e;
    fn mul(self, rhs: f64) -> KgCo2e {
        KgCo2e(self.0 * rhs)
    }
}

impl Sum for KgCo2e {
    fn sum<I: Iterator<Item = KgCo2e>>(iter: I) -> KgCo2e {
        KgCo2e(iter.map(|k| k.0).sum())
    }
}

// ============================================================================
// ENERGY
// ============================================================================

/// Energy content in megajoules (co-product allocation)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Megajoules(f64);

impl Eq for Megajoules {}

impl PartialOrd for Megajoules {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Megajoules {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Megajoules {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Megajoules {
    /// Create a new energy quantity in megajoules
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Megajoules(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Megajoules {
    fn from(v: f64) -> Self {
        Megajoules(v)
    }
}

impl fmt::Display for Megajoules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} MJ", self.0)
    }
}

impl Add for Megajoules {
    type Output = Megajoules;
    fn add(self, rhs: Megajoules) -> Megajoules {
        Megajoules(self.0 + rhs.0)
    }
}
