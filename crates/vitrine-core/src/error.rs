//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## What Can Fail?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart operations (add/remove/checkout)   ──► never fail, return Notice  │
//! │                                                                         │
//! │  Parsing a locale name                   ──► CoreError::UnknownLocale   │
//! │  Parsing a discount policy name          ──► CoreError::UnknownDiscount │
//! │  Building a percentage discount > 100%   ──► InvalidDiscountRate        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A refused cart operation is an expected user mistake, so it is reported
//! through [`crate::notice::Notice`] instead of this module.

use thiserror::Error;

/// Errors raised while turning outside input into core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Locale name is not one the notices are written in.
    #[error("Unknown locale: '{0}'. Valid options: pt, en")]
    UnknownLocale(String),

    /// Discount policy name could not be parsed.
    #[error("Unknown discount policy: '{0}'. Valid options: default, new, percentage:<bps>")]
    UnknownDiscount(String),

    /// Percentage discount above 100%.
    #[error("Discount rate {bps} bps exceeds maximum of {max} bps")]
    InvalidDiscountRate { bps: u32, max: u32 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
