//! # Notices
//!
//! Every cart operation produces exactly one [`Notice`] describing what
//! happened. Notices are values, not errors: a refused checkout is an
//! outcome the caller reports to the shopper, it does not abort anything.
//!
//! ## Outcome Table
//! ```text
//! ┌──────────────────┬───────────────────┬───────────────────┬──────────────────────┐
//! │ Phase            │ add_product       │ remove_product    │ checkout             │
//! ├──────────────────┼───────────────────┼───────────────────┼──────────────────────┤
//! │ Empty            │ Added             │ RefusedEmptyCart  │ RefusedEmptyCart     │
//! │ WithProducts     │ Added             │ Removed/NotFound  │ CheckoutStarted      │
//! │ Closed           │ RefusedClosedCart │ RefusedClosedCart │ RefusedClosedCart    │
//! └──────────────────┴───────────────────┴───────────────────┴──────────────────────┘
//! ```
//!
//! ## Rendering
//! [`Notice::message`] renders the line shown to the shopper. Portuguese is
//! the default locale; English is available for logs and tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Cart Operation
// =============================================================================

/// The three operations a cart accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    Checkout,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::AddProduct => write!(f, "add_product"),
            CartOperation::RemoveProduct => write!(f, "remove_product"),
            CartOperation::Checkout => write!(f, "checkout"),
        }
    }
}

/// Operations an empty cart can refuse. Adding is always accepted there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCartOperation {
    RemoveProduct,
    Checkout,
}

impl From<EmptyCartOperation> for CartOperation {
    fn from(operation: EmptyCartOperation) -> Self {
        match operation {
            EmptyCartOperation::RemoveProduct => CartOperation::RemoveProduct,
            EmptyCartOperation::Checkout => CartOperation::Checkout,
        }
    }
}

impl fmt::Display for EmptyCartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CartOperation::from(*self).fmt(f)
    }
}

// =============================================================================
// Locale
// =============================================================================

/// Language notices are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    /// Brazilian Portuguese, the storefront's native language.
    #[default]
    #[serde(rename = "pt")]
    Portuguese,

    #[serde(rename = "en")]
    English,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Portuguese => write!(f, "pt"),
            Locale::English => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" | "portuguese" => Ok(Locale::Portuguese),
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::English),
            other => Err(CoreError::UnknownLocale(other.to_string())),
        }
    }
}

// =============================================================================
// Notice
// =============================================================================

/// Outcome of a single cart operation.
///
/// `product` fields carry the product name, which is all a rendered notice
/// needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Product appended to the cart.
    Added { product: String },

    /// First matching product taken out of the cart.
    Removed { product: String },

    /// Removal target is not in the cart. Nothing changed.
    NotFound { product: String },

    /// Cart moved to the Closed phase.
    CheckoutStarted,

    /// Operation refused because the cart has no products.
    RefusedEmptyCart { operation: EmptyCartOperation },

    /// Operation refused because the purchase is already finalized.
    RefusedClosedCart { operation: CartOperation },
}

impl Notice {
    /// True when the operation changed the cart's products or phase.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::notice::{EmptyCartOperation, Notice};
    ///
    /// assert!(Notice::CheckoutStarted.is_applied());
    /// assert!(!Notice::RefusedEmptyCart { operation: EmptyCartOperation::Checkout }.is_applied());
    /// ```
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Notice::Added { .. } | Notice::Removed { .. } | Notice::CheckoutStarted
        )
    }

    /// True for refusals caused by the cart's current phase.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Notice::RefusedEmptyCart { .. } | Notice::RefusedClosedCart { .. }
        )
    }

    /// Renders the human-readable line for this outcome.
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::Portuguese => self.message_pt(),
            Locale::English => self.message_en(),
        }
    }

    fn message_pt(&self) -> String {
        match self {
            Notice::Added { product } => format!("Produto \"{}\" adicionado ao carrinho.", product),
            Notice::Removed { product } => format!("Produto \"{}\" removido do carrinho.", product),
            Notice::NotFound { product } => {
                format!("Produto \"{}\" não encontrado no carrinho.", product)
            }
            Notice::CheckoutStarted => "Finalizando compra...".to_string(),
            Notice::RefusedEmptyCart { operation } => String::from(match operation {
                EmptyCartOperation::RemoveProduct => "Carrinho vazio. Nenhum produto para remover.",
                EmptyCartOperation::Checkout => {
                    "Carrinho vazio. Adicione produtos antes de finalizar a compra."
                }
            }),
            Notice::RefusedClosedCart { operation } => String::from(match operation {
                CartOperation::AddProduct => {
                    "Compra finalizada. Não é possível adicionar mais produtos."
                }
                CartOperation::RemoveProduct => "Compra finalizada. Não é possível remover produtos.",
                CartOperation::Checkout => "Compra já foi finalizada.",
            }),
        }
    }

    fn message_en(&self) -> String {
        match self {
            Notice::Added { product } => format!("Product \"{}\" added to the cart.", product),
            Notice::Removed { product } => format!("Product \"{}\" removed from the cart.", product),
            Notice::NotFound { product } => format!("Product \"{}\" is not in the cart.", product),
            Notice::CheckoutStarted => "Finalizing purchase...".to_string(),
            Notice::RefusedEmptyCart { operation } => String::from(match operation {
                EmptyCartOperation::RemoveProduct => "Cart is empty. No products to remove.",
                EmptyCartOperation::Checkout => "Cart is empty. Add products before checking out.",
            }),
            Notice::RefusedClosedCart { operation } => String::from(match operation {
                CartOperation::AddProduct => "Purchase finalized. Cannot add more products.",
                CartOperation::RemoveProduct => "Purchase finalized. Cannot remove products.",
                CartOperation::Checkout => "Purchase was already finalized.",
            }),
        }
    }
}

/// Renders in the default locale.
impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Locale::default()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_messages() {
        let added = Notice::Added {
            product: "Produto 1".to_string(),
        };
        assert_eq!(
            added.message(Locale::Portuguese),
            "Produto \"Produto 1\" adicionado ao carrinho."
        );
        assert_eq!(
            Notice::CheckoutStarted.message(Locale::Portuguese),
            "Finalizando compra..."
        );
        assert_eq!(
            Notice::RefusedClosedCart {
                operation: CartOperation::Checkout
            }
            .message(Locale::Portuguese),
            "Compra já foi finalizada."
        );
    }

    #[test]
    fn test_refusals_render_distinct_lines_per_operation() {
        let remove = Notice::RefusedEmptyCart {
            operation: EmptyCartOperation::RemoveProduct,
        };
        let checkout = Notice::RefusedEmptyCart {
            operation: EmptyCartOperation::Checkout,
        };
        assert_ne!(remove.message(Locale::English), checkout.message(Locale::English));

        let closed_add = Notice::RefusedClosedCart {
            operation: CartOperation::AddProduct,
        };
        let closed_checkout = Notice::RefusedClosedCart {
            operation: CartOperation::Checkout,
        };
        assert_ne!(
            closed_add.message(Locale::Portuguese),
            closed_checkout.message(Locale::Portuguese)
        );
    }

    #[test]
    fn test_display_uses_default_locale() {
        let notice = Notice::Removed {
            product: "Produto 2".to_string(),
        };
        assert_eq!(notice.to_string(), notice.message(Locale::Portuguese));
    }

    #[test]
    fn test_applied_and_refusal_flags() {
        let not_found = Notice::NotFound {
            product: "X".to_string(),
        };
        assert!(!not_found.is_applied());
        assert!(!not_found.is_refusal());

        let refused = Notice::RefusedClosedCart {
            operation: CartOperation::AddProduct,
        };
        assert!(!refused.is_applied());
        assert!(refused.is_refusal());
    }

    #[test]
    fn test_empty_cart_operation_maps_onto_cart_operation() {
        assert_eq!(
            CartOperation::from(EmptyCartOperation::RemoveProduct),
            CartOperation::RemoveProduct
        );
        assert_eq!(
            CartOperation::from(EmptyCartOperation::Checkout),
            CartOperation::Checkout
        );
        assert_eq!(EmptyCartOperation::Checkout.to_string(), "checkout");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("pt".parse::<Locale>().unwrap(), Locale::Portuguese);
        assert_eq!("PT-BR".parse::<Locale>().unwrap(), Locale::Portuguese);
        assert_eq!(" english ".parse::<Locale>().unwrap(), Locale::English);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(CoreError::UnknownLocale(_))
        ));
    }

    #[test]
    fn test_notice_json_is_tagged() {
        let notice = Notice::RefusedEmptyCart {
            operation: EmptyCartOperation::Checkout,
        };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["kind"], "refused_empty_cart");
        assert_eq!(json["operation"], "checkout");

        let json = serde_json::to_value(Notice::CheckoutStarted).unwrap();
        assert_eq!(json["kind"], "checkout_started");
    }
}
