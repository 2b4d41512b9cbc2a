//! # Cart States
//!
//! Phase-specific behavior for [`crate::cart::ShoppingCart`].
//!
//! ## Phase Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             add_product                       checkout                  │
//! │   ┌───────┐ ──────────► ┌──────────────┐ ──────────────► ┌────────┐     │
//! │   │ Empty │             │ WithProducts │                 │ Closed │     │
//! │   └───────┘ ◄────────── └──────────────┘                 └────────┘     │
//! │       ▲      remove last    │     ▲                           │         │
//! │       │                     └─────┘ add / remove              │         │
//! │       │                                                       │         │
//! │   remove, checkout: refused                 everything: refused         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! States hold no reference to their cart. The cart lends each call a
//! [`CartContext`], which exposes the product list and a slot for the next
//! state. Once the call returns the cart installs whatever the state put in
//! that slot. A new phase is one more type implementing [`CartState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::notice::{CartOperation, EmptyCartOperation, Notice};
use crate::product::Product;

// =============================================================================
// Cart Phase
// =============================================================================

/// Tag naming the phase a cart is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CartPhase {
    /// No products. Initial phase.
    #[default]
    Empty,
    /// At least one product, purchase still open.
    WithProducts,
    /// Checkout happened. Products are frozen.
    Closed,
}

impl CartPhase {
    /// True when add/remove can still change the products.
    pub fn accepts_changes(&self) -> bool {
        !matches!(self, CartPhase::Closed)
    }
}

impl fmt::Display for CartPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartPhase::Empty => write!(f, "empty"),
            CartPhase::WithProducts => write!(f, "with_products"),
            CartPhase::Closed => write!(f, "closed"),
        }
    }
}

// =============================================================================
// Cart Context
// =============================================================================

/// Mutation handle a state receives for the duration of one operation.
pub struct CartContext<'a> {
    products: &'a mut Vec<Product>,
    next: Option<Box<dyn CartState>>,
}

impl<'a> CartContext<'a> {
    pub(crate) fn new(products: &'a mut Vec<Product>) -> Self {
        CartContext {
            products,
            next: None,
        }
    }

    /// The cart's products, in insertion order.
    pub fn products(&self) -> &[Product] {
        self.products.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Appends a product. Duplicates are allowed.
    pub fn push_product(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Removes the first product equal to `product`.
    ///
    /// Returns false when no product matched.
    pub fn remove_first(&mut self, product: &Product) -> bool {
        match self.products.iter().position(|p| p == product) {
            Some(index) => {
                self.products.remove(index);
                true
            }
            None => false,
        }
    }

    /// Schedules `state` to replace the current state when the call returns.
    pub fn transition_to<S: CartState + 'static>(&mut self, state: S) {
        debug!(to = %state.phase(), "Scheduling cart phase transition");
        self.next = Some(Box::new(state));
    }

    pub(crate) fn into_next(self) -> Option<Box<dyn CartState>> {
        self.next
    }
}

// =============================================================================
// Cart State Trait
// =============================================================================

/// Behavior of one cart phase.
///
/// Each method handles its operation completely: it mutates the products
/// through `cart` if the phase allows it, schedules a successor if the phase
/// changes, and returns the notice describing the outcome.
pub trait CartState: fmt::Debug {
    fn phase(&self) -> CartPhase;

    fn add_product(&self, cart: &mut CartContext<'_>, product: Product) -> Notice;

    fn remove_product(&self, cart: &mut CartContext<'_>, product: &Product) -> Notice;

    fn checkout(&self, cart: &mut CartContext<'_>) -> Notice;
}

// =============================================================================
// Empty
// =============================================================================

/// No products yet. Only `add_product` does anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCartState;

impl CartState for EmptyCartState {
    fn phase(&self) -> CartPhase {
        CartPhase::Empty
    }

    fn add_product(&self, cart: &mut CartContext<'_>, product: Product) -> Notice {
        let name = product.name.clone();
        cart.push_product(product);
        cart.transition_to(WithProductsState);
        Notice::Added { product: name }
    }

    fn remove_product(&self, _cart: &mut CartContext<'_>, _product: &Product) -> Notice {
        Notice::RefusedEmptyCart {
            operation: EmptyCartOperation::RemoveProduct,
        }
    }

    fn checkout(&self, _cart: &mut CartContext<'_>) -> Notice {
        Notice::RefusedEmptyCart {
            operation: EmptyCartOperation::Checkout,
        }
    }
}

// =============================================================================
// With Products
// =============================================================================

/// Open cart holding at least one product.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithProductsState;

impl CartState for WithProductsState {
    fn phase(&self) -> CartPhase {
        CartPhase::WithProducts
    }

    fn add_product(&self, cart: &mut CartContext<'_>, product: Product) -> Notice {
        let name = product.name.clone();
        cart.push_product(product);
        Notice::Added { product: name }
    }

    fn remove_product(&self, cart: &mut CartContext<'_>, product: &Product) -> Notice {
        if !cart.remove_first(product) {
            return Notice::NotFound {
                product: product.name.clone(),
            };
        }

        if cart.is_empty() {
            cart.transition_to(EmptyCartState);
        }

        Notice::Removed {
            product: product.name.clone(),
        }
    }

    fn checkout(&self, cart: &mut CartContext<'_>) -> Notice {
        cart.transition_to(ClosedCartState);
        Notice::CheckoutStarted
    }
}

// =============================================================================
// Closed
// =============================================================================

/// Purchase finalized. Every operation is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedCartState;

impl CartState for ClosedCartState {
    fn phase(&self) -> CartPhase {
        CartPhase::Closed
    }

    fn add_product(&self, _cart: &mut CartContext<'_>, _product: Product) -> Notice {
        Notice::RefusedClosedCart {
            operation: CartOperation::AddProduct,
        }
    }

    fn remove_product(&self, _cart: &mut CartContext<'_>, _product: &Product) -> Notice {
        Notice::RefusedClosedCart {
            operation: CartOperation::RemoveProduct,
        }
    }

    fn checkout(&self, _cart: &mut CartContext<'_>) -> Notice {
        Notice::RefusedClosedCart {
            operation: CartOperation::Checkout,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(name: &str, price: i64) -> Product {
        Product::new(name, Money::from_major_minor(price, 0))
    }

    fn next_phase(cart: CartContext<'_>) -> Option<CartPhase> {
        cart.into_next().map(|s| s.phase())
    }

    #[test]
    fn test_empty_add_moves_to_with_products() {
        let mut products = Vec::new();
        let mut cart = CartContext::new(&mut products);

        let notice = EmptyCartState.add_product(&mut cart, product("P1", 50));

        assert_eq!(notice, Notice::Added { product: "P1".to_string() });
        assert_eq!(next_phase(cart), Some(CartPhase::WithProducts));
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_empty_refuses_remove_and_checkout() {
        let mut products = Vec::new();
        let mut cart = CartContext::new(&mut products);

        let removed = EmptyCartState.remove_product(&mut cart, &product("P1", 50));
        let checkout = EmptyCartState.checkout(&mut cart);

        assert!(matches!(removed, Notice::RefusedEmptyCart { operation: EmptyCartOperation::RemoveProduct }));
        assert!(matches!(checkout, Notice::RefusedEmptyCart { operation: EmptyCartOperation::Checkout }));
        assert_eq!(next_phase(cart), None);
    }

    #[test]
    fn test_with_products_add_stays_put() {
        let mut products = vec![product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        WithProductsState.add_product(&mut cart, product("P1", 50));

        assert_eq!(next_phase(cart), None);
        assert_eq!(products.len(), 2, "duplicates are kept");
    }

    #[test]
    fn test_with_products_remove_first_match_only() {
        let mut products = vec![product("P1", 50), product("P2", 100), product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        let notice = WithProductsState.remove_product(&mut cart, &product("P1", 50));

        assert_eq!(notice, Notice::Removed { product: "P1".to_string() });
        assert_eq!(next_phase(cart), None);
        assert_eq!(products, vec![product("P2", 100), product("P1", 50)]);
    }

    #[test]
    fn test_with_products_remove_last_moves_to_empty() {
        let mut products = vec![product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        WithProductsState.remove_product(&mut cart, &product("P1", 50));

        assert_eq!(next_phase(cart), Some(CartPhase::Empty));
        assert!(products.is_empty());
    }

    #[test]
    fn test_with_products_remove_missing_is_not_found() {
        let mut products = vec![product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        // Price is part of identity
        let notice = WithProductsState.remove_product(&mut cart, &product("P1", 51));

        assert_eq!(notice, Notice::NotFound { product: "P1".to_string() });
        assert_eq!(next_phase(cart), None);
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_with_products_checkout_closes() {
        let mut products = vec![product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        assert_eq!(WithProductsState.checkout(&mut cart), Notice::CheckoutStarted);
        assert_eq!(next_phase(cart), Some(CartPhase::Closed));
    }

    #[test]
    fn test_closed_refuses_everything() {
        let mut products = vec![product("P1", 50)];
        let mut cart = CartContext::new(&mut products);

        assert!(ClosedCartState.add_product(&mut cart, product("P3", 150)).is_refusal());
        assert!(ClosedCartState.remove_product(&mut cart, &product("P1", 50)).is_refusal());
        assert_eq!(
            ClosedCartState.checkout(&mut cart),
            Notice::RefusedClosedCart { operation: CartOperation::Checkout }
        );
        assert_eq!(next_phase(cart), None);
        assert_eq!(products, vec![product("P1", 50)]);
    }

    #[test]
    fn test_phase_display_and_flags() {
        assert_eq!(CartPhase::WithProducts.to_string(), "with_products");
        assert_eq!(CartPhase::default(), CartPhase::Empty);
        assert!(CartPhase::Empty.accepts_changes());
        assert!(!CartPhase::Closed.accepts_changes());
    }
}
