//! Logarithmic unit scaling
//!
//! An amount is divided by the largest power of the base not exceeding it
//! and labelled with the matching prefix symbol.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{UNIT_PREFIXES, UnitPrefix};
use crate::{Error, Result};

/// Step between consecutive prefixes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitBase {
    /// Powers of 1000
    Decimal,
    /// Powers of 1024
    #[default]
    Binary,
}

impl UnitBase {
    pub fn value(&self) -> f64 {
        match self {
            UnitBase::Decimal => 1000.0,
            UnitBase::Binary => 1024.0,
        }
    }
}

impl FromStr for UnitBase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1000" | "decimal" | "si" => Ok(UnitBase::Decimal),
            "1024" | "binary" | "iec" => Ok(UnitBase::Binary),
            other => Err(Error::configuration(format!(
                "Unknown unit base '{}' (expected 1000 or 1024)",
                other
            ))),
        }
    }
}

/// Which symbol column of the prefix table to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStyle {
    /// "k", "M", "G", ...
    #[default]
    Si,
    /// "Ki", "Mi", "Gi", ...
    Iec,
}

impl PrefixStyle {
    fn symbol(&self, prefix: &UnitPrefix) -> &'static str {
        match self {
            PrefixStyle::Si => prefix.symbol,
            PrefixStyle::Iec => prefix.iec_symbol,
        }
    }
}

/// A scaled amount and its prefix symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scaled {
    pub amount: f64,
    /// Empty for unscaled amounts
    pub symbol: &'static str,
}

/// Formatter for chart axes and table cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitFormatter {
    base: UnitBase,
    style: PrefixStyle,
}

impl UnitFormatter {
    pub fn new(base: UnitBase, style: PrefixStyle) -> Self {
        Self { base, style }
    }

    pub fn base(&self) -> UnitBase {
        self.base
    }

    pub fn style(&self) -> PrefixStyle {
        self.style
    }

    /// Largest exponent `e` with `base^e <= |amount|`, never below zero
    ///
    /// # Errors
    /// * Returns `Error::UnsupportedMagnitude` for non-finite amounts
    pub fn exponent(&self, amount: f64) -> Result<usize> {
        if !amount.is_finite() {
            return Err(Error::unsupported_magnitude(amount));
        }
        let magnitude = amount.abs();
        if magnitude < 1.0 {
            return Ok(0);
        }

        let base = self.base.value();
        // Float logs drift around exact powers; settle on the integer boundary
        let mut exponent = (magnitude.ln() / base.ln()).floor().max(0.0) as i32;
        while base.powi(exponent + 1) <= magnitude {
            exponent += 1;
        }
        while exponent > 0 && base.powi(exponent) > magnitude {
            exponent -= 1;
        }
        Ok(exponent as usize)
    }

    /// Scale `amount` into the prefix table
    ///
    /// # Errors
    /// * Returns `Error::UnsupportedMagnitude` if the amount is not finite or
    ///   needs a prefix beyond yotta/yobi
    pub fn scale(&self, amount: f64) -> Result<Scaled> {
        let exponent = self.exponent(amount)?;
        let prefix = UNIT_PREFIXES
            .get(exponent)
            .ok_or_else(|| Error::unsupported_magnitude(amount))?;

        Ok(Scaled {
            amount: amount / self.base.value().powi(exponent as i32),
            symbol: self.style.symbol(prefix),
        })
    }

    /// Render `amount` as one decimal, a space, and the prefix symbol
    ///
    /// Unscaled amounts keep the trailing space: `0` renders as `"0.0 "`.
    pub fn format(&self, amount: f64) -> Result<String> {
        let scaled = self.scale(amount)?;
        Ok(format!("{:.1} {}", scaled.amount, scaled.symbol))
    }
}
