//! # vitrine-core: Pure Cart Logic for Vitrine
//!
//! A shopping cart whose operations depend on its lifecycle phase, plus
//! swappable pricing policies. No I/O happens here: every operation returns
//! a [`Notice`] and the caller decides how to show it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Driver (vitrine-cli, tests, ...)                │   │
//! │  │      add_product ──► remove_product ──► checkout ──► totals    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Notice                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   state   │  │ discount  │  │  notice   │  │   │
//! │  │   │ Shopping  │  │  Empty    │  │  Default  │  │  Notice   │  │   │
//! │  │   │   Cart    │  │  WithProd │  │  New      │  │  Locale   │  │   │
//! │  │   │  Summary  │  │  Closed   │  │  Percent  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO THREADS • NOTICES INSTEAD OF ERRORS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The `ShoppingCart` facade and `CartSummary`
//! - [`state`] - Phase behavior (`CartState` and its three phases)
//! - [`discount`] - Pricing strategies and the `DiscountPolicy` selector
//! - [`notice`] - Operation outcomes and their rendered messages
//! - [`product`] - The `Product` record
//! - [`money`] - Integer-cents `Money`
//! - [`error`] - Parse errors
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::discount::NewDiscount;
//! use vitrine_core::{Locale, Money, Product, ShoppingCart};
//!
//! let mut cart = ShoppingCart::new();
//! cart.set_discount(NewDiscount);
//!
//! let notice = cart.add_product(Product::new("Produto 1", Money::from_major_minor(150, 0)));
//! assert_eq!(
//!     notice.message(Locale::Portuguese),
//!     "Produto \"Produto 1\" adicionado ao carrinho."
//! );
//!
//! // 10% off from $100.00
//! assert_eq!(cart.total_with_discount().cents(), 13_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod notice;
pub mod product;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartSummary, ShoppingCart};
pub use discount::{DiscountPolicy, DiscountStrategy};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use notice::{CartOperation, EmptyCartOperation, Locale, Notice};
pub use product::Product;
pub use state::CartPhase;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest discount a percentage policy may take, in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;
