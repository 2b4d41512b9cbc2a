//! # Shopping Cart
//!
//! The facade callers drive. It owns the products, the current phase and
//! the active discount strategy.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  caller ──► cart.add_product(p)                                         │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          CartContext { &mut products, next: None }                      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          state.add_product(ctx, p) ──► Notice                           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          ctx.next is Some? ──► cart installs the new state              │
//! │                                                                         │
//! │  total()               = Σ product.price         (recomputed per call)  │
//! │  total_with_discount() = discount(total())       (current strategy)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use vitrine_core::{CartPhase, Money, Product, ShoppingCart};
//!
//! let mut cart = ShoppingCart::new();
//! cart.add_product(Product::new("Produto 1", Money::from_major_minor(50, 0)));
//! cart.checkout();
//!
//! assert_eq!(cart.phase(), CartPhase::Closed);
//! assert_eq!(cart.total().cents(), 5_000);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::discount::{BoxedDiscount, DiscountStrategy};
use crate::money::Money;
use crate::notice::{CartOperation, Notice};
use crate::product::Product;
use crate::state::{CartContext, CartPhase, CartState, EmptyCartState};

/// A single shopper's cart.
#[derive(Debug)]
pub struct ShoppingCart {
    products: Vec<Product>,
    state: Box<dyn CartState>,
    discount: Option<BoxedDiscount>,
}

impl ShoppingCart {
    /// Creates an empty cart with no discount.
    pub fn new() -> Self {
        ShoppingCart {
            products: Vec::new(),
            state: Box::new(EmptyCartState),
            discount: None,
        }
    }

    // =========================================================================
    // Phase-dependent operations
    // =========================================================================

    pub fn add_product(&mut self, product: Product) -> Notice {
        self.dispatch(CartOperation::AddProduct, |state, cart| {
            state.add_product(cart, product)
        })
    }

    /// Removes the first product structurally equal to `product`.
    pub fn remove_product(&mut self, product: &Product) -> Notice {
        self.dispatch(CartOperation::RemoveProduct, |state, cart| {
            state.remove_product(cart, product)
        })
    }

    pub fn checkout(&mut self) -> Notice {
        self.dispatch(CartOperation::Checkout, |state, cart| state.checkout(cart))
    }

    /// Runs one operation against the current state and installs the
    /// successor it scheduled, if any.
    fn dispatch<F>(&mut self, operation: CartOperation, op: F) -> Notice
    where
        F: FnOnce(&dyn CartState, &mut CartContext<'_>) -> Notice,
    {
        let mut cart = CartContext::new(&mut self.products);
        let notice = op(self.state.as_ref(), &mut cart);

        if let Some(next) = cart.into_next() {
            self.set_state(next);
        }

        info!(
            %operation,
            phase = %self.phase(),
            applied = notice.is_applied(),
            outcome = ?notice,
            "Cart operation handled"
        );
        debug_assert!(
            self.phase() == CartPhase::Closed
                || (self.phase() == CartPhase::Empty) == self.products.is_empty(),
            "phase {} disagrees with {} products",
            self.phase(),
            self.products.len()
        );

        notice
    }

    fn set_state(&mut self, state: Box<dyn CartState>) {
        debug!(from = %self.state.phase(), to = %state.phase(), "Cart phase transition");
        self.state = state;
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True if a product structurally equal to `product` is in the cart.
    pub fn contains(&self, product: &Product) -> bool {
        self.products.contains(product)
    }

    pub fn phase(&self) -> CartPhase {
        self.state.phase()
    }

    /// Sum of product prices, ignoring any discount.
    pub fn total(&self) -> Money {
        self.products.iter().map(|p| p.price).sum()
    }

    /// Raw total passed through the active strategy, or the raw total when
    /// no strategy is set.
    pub fn total_with_discount(&self) -> Money {
        let total = self.total();
        match &self.discount {
            Some(discount) => discount.discounted_total(total),
            None => total,
        }
    }

    // =========================================================================
    // Pricing policy
    // =========================================================================

    /// Replaces the active discount strategy.
    pub fn set_discount(&mut self, discount: impl DiscountStrategy + 'static) {
        self.set_boxed_discount(Box::new(discount));
    }

    /// Replaces the active discount strategy with an already boxed one.
    pub fn set_boxed_discount(&mut self, discount: BoxedDiscount) {
        debug!(
            from = self.discount_name(),
            to = discount.name(),
            "Discount strategy replaced"
        );
        self.discount = Some(discount);
    }

    pub fn clear_discount(&mut self) {
        self.discount = None;
    }

    /// Name of the active strategy, `"none"` when unset.
    pub fn discount_name(&self) -> &'static str {
        self.discount.as_ref().map_or("none", |d| d.name())
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

impl Default for ShoppingCart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Point-in-time snapshot of a cart for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSummary {
    pub phase: CartPhase,
    /// False once the purchase is closed.
    pub accepts_changes: bool,
    pub item_count: usize,
    pub total_cents: i64,
    pub discounted_total_cents: i64,
    pub discount: String,
}

impl From<&ShoppingCart> for CartSummary {
    fn from(cart: &ShoppingCart) -> Self {
        CartSummary {
            phase: cart.phase(),
            accepts_changes: cart.phase().accepts_changes(),
            item_count: cart.products().len(),
            total_cents: cart.total().cents(),
            discounted_total_cents: cart.total_with_discount().cents(),
            discount: cart.discount_name().to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
