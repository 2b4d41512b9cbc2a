//! # Discount Strategies
//!
//! Pluggable pricing policies that map a raw cart total to the amount the
//! shopper pays.
//!
//! ## Available Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Policy               Rule                             $300.00 becomes  │
//! │  ──────────────────   ──────────────────────────────   ───────────────  │
//! │  DefaultDiscount      no discount                      $300.00          │
//! │  NewDiscount          ≥$100: 10%  ≥$200: 20%  ≥$300: 30%   $210.00      │
//! │  PercentageDiscount   flat N basis points              depends on N     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::discount::{DiscountStrategy, NewDiscount};
//! use vitrine_core::Money;
//!
//! let total = Money::from_major_minor(300, 0);
//! assert_eq!(NewDiscount.discounted_total(total), Money::from_major_minor(210, 0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MAX_DISCOUNT_BPS;

// =============================================================================
// Strategy Trait
// =============================================================================

/// A pricing policy.
///
/// Implementations must be pure: the same total always yields the same
/// discounted total.
pub trait DiscountStrategy: fmt::Debug {
    /// Short identifier used in logs and summaries.
    fn name(&self) -> &'static str;

    fn discounted_total(&self, total: Money) -> Money;
}

/// Owned, type-erased strategy as stored by the cart.
pub type BoxedDiscount = Box<dyn DiscountStrategy>;

// =============================================================================
// Default
// =============================================================================

/// Baseline policy. Returns the total untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultDiscount;

impl DiscountStrategy for DefaultDiscount {
    fn name(&self) -> &'static str {
        "default"
    }

    fn discounted_total(&self, total: Money) -> Money {
        total
    }
}

// =============================================================================
// New (tiered)
// =============================================================================

/// Tiered policy: the bigger the cart, the bigger the percentage off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewDiscount;

impl NewDiscount {
    /// (threshold, discount in bps), highest threshold first.
    const TIERS: [(Money, u32); 3] = [
        (Money::from_major_minor(300, 0), 3000),
        (Money::from_major_minor(200, 0), 2000),
        (Money::from_major_minor(100, 0), 1000),
    ];

    /// Basis points this policy takes off `total`.
    pub fn rate_bps(total: Money) -> u32 {
        Self::TIERS
            .iter()
            .find(|(threshold, _)| total >= *threshold)
            .map_or(0, |(_, bps)| *bps)
    }
}

impl DiscountStrategy for NewDiscount {
    fn name(&self) -> &'static str {
        "new"
    }

    fn discounted_total(&self, total: Money) -> Money {
        total.apply_percentage_discount(Self::rate_bps(total))
    }
}

// =============================================================================
// Flat percentage
// =============================================================================

/// Flat percentage off every total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageDiscount {
    bps: u32,
}

impl PercentageDiscount {
    /// Creates a flat discount of `bps` basis points (1500 = 15%).
    ///
    /// ## Errors
    /// [`CoreError::InvalidDiscountRate`] above 10000 bps.
    pub fn new(bps: u32) -> CoreResult<Self> {
        if bps > MAX_DISCOUNT_BPS {
            return Err(CoreError::InvalidDiscountRate {
                bps,
                max: MAX_DISCOUNT_BPS,
            });
        }
        Ok(PercentageDiscount { bps })
    }
}

impl DiscountStrategy for PercentageDiscount {
    fn name(&self) -> &'static str {
        "percentage"
    }

    fn discounted_total(&self, total: Money) -> Money {
        total.apply_percentage_discount(self.bps)
    }
}

// =============================================================================
// Policy Selector
// =============================================================================

/// Serializable name of a strategy, for configuration and summaries.
///
/// ## Text Form
/// `default`, `new`, or `percentage:<bps>` (e.g. `percentage:1500`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    #[default]
    Default,
    New,
    Percentage(u32),
}

impl DiscountPolicy {
    /// Builds the strategy this policy names.
    pub fn build(&self) -> CoreResult<BoxedDiscount> {
        Ok(match self {
            DiscountPolicy::Default => Box::new(DefaultDiscount),
            DiscountPolicy::New => Box::new(NewDiscount),
            DiscountPolicy::Percentage(bps) => Box::new(PercentageDiscount::new(*bps)?),
        })
    }
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPolicy::Default => write!(f, "default"),
            DiscountPolicy::New => write!(f, "new"),
            DiscountPolicy::Percentage(bps) => write!(f, "percentage:{}", bps),
        }
    }
}

impl FromStr for DiscountPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "default" | "none" => Ok(DiscountPolicy::Default),
            "new" | "tiered" => Ok(DiscountPolicy::New),
            other => other
                .strip_prefix("percentage:")
                .and_then(|bps| bps.trim().parse::<u32>().ok())
                .map(DiscountPolicy::Percentage)
                .ok_or_else(|| CoreError::UnknownDiscount(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
