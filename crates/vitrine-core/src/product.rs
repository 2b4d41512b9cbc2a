//! # Product
//!
//! The passive record a cart holds: a name and a price.
//!
//! ## Identity
//! Products have no id. Two products are the same product when both the
//! name and the price match, and that single rule is used everywhere the
//! cart looks a product up (`remove_product`, `contains`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// A product placed in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Display name, also used in notices.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::{Money, Product};
    ///
    /// let p = Product::new("Produto 1", Money::from_major_minor(50, 0));
    /// assert_eq!(p.price.cents(), 5_000);
    /// ```
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Product {
            name: name.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Product::new("Produto 1", Money::from_cents(5_000));
        let b = Product::new("Produto 1", Money::from_cents(5_000));
        assert_eq!(a, b);

        // Same name, different price is a different product
        let c = Product::new("Produto 1", Money::from_cents(4_999));
        assert_ne!(a, c);
    }

    #[test]
    fn test_json_shape() {
        let p = Product::new("Produto 2", Money::from_cents(10_000));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "Produto 2");
        assert_eq!(json["price"], 10_000);
    }
}
