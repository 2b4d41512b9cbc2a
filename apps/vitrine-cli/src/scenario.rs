//! # Demonstration Scripts
//!
//! Fixed sequences of cart operations. Each runner returns a
//! [`ScenarioReport`] instead of printing, so `main` owns the output format
//! and tests can check the exact lines.
//!
//! ## Scripts
//! ```text
//! lifecycle                               discount
//! ─────────                               ────────
//! add "Produto 1" $50                     set DefaultDiscount
//! add "Produto 2" $100                    set <configured policy>
//! remove "Produto 1" $50                  add "Produto 1".."Produto 6" at $50
//! checkout                                print total
//! add "Produto 3" $150  (refused)         print total with discount
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use vitrine_core::discount::DefaultDiscount;
use vitrine_core::{CartSummary, DiscountPolicy, Locale, Money, Product, ShoppingCart};

use crate::error::{CliError, CliResult};

/// Which script(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    Lifecycle,
    Discount,
    #[default]
    All,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Lifecycle => write!(f, "lifecycle"),
            Scenario::Discount => write!(f, "discount"),
            Scenario::All => write!(f, "all"),
        }
    }
}

impl FromStr for Scenario {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lifecycle" | "state" => Ok(Scenario::Lifecycle),
            "discount" | "strategy" => Ok(Scenario::Discount),
            "all" => Ok(Scenario::All),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown scenario: '{}'. Valid options: lifecycle, discount, all",
                other
            ))),
        }
    }
}

/// Output of one script: printable lines plus the cart's final state.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub lines: Vec<String>,
    pub summary: CartSummary,
}

fn product(name: &str, major: i64) -> Product {
    Product::new(name, Money::from_major_minor(major, 0))
}

/// Runs the selected script(s) in order.
pub fn run(
    scenario: Scenario,
    locale: Locale,
    policy: DiscountPolicy,
) -> CliResult<Vec<ScenarioReport>> {
    Ok(match scenario {
        Scenario::Lifecycle => vec![run_lifecycle(locale)],
        Scenario::Discount => vec![run_discount(policy)?],
        Scenario::All => vec![run_lifecycle(locale), run_discount(policy)?],
    })
}

/// Walks a cart through every phase, ending with a refused add.
pub fn run_lifecycle(locale: Locale) -> ScenarioReport {
    let mut cart = ShoppingCart::new();

    let notices = [
        cart.add_product(product("Produto 1", 50)),
        cart.add_product(product("Produto 2", 100)),
        cart.remove_product(&product("Produto 1", 50)),
        cart.checkout(),
        cart.add_product(product("Produto 3", 150)),
    ];

    ScenarioReport {
        scenario: Scenario::Lifecycle.to_string(),
        lines: notices.iter().map(|n| n.message(locale)).collect(),
        summary: cart.summary(),
    }
}

/// Installs the baseline strategy, replaces it with `policy`, fills the
/// cart and reports both totals.
pub fn run_discount(policy: DiscountPolicy) -> CliResult<ScenarioReport> {
    let mut cart = ShoppingCart::new();

    cart.set_discount(DefaultDiscount);
    cart.set_boxed_discount(policy.build()?);

    for i in 1..=6 {
        let notice = cart.add_product(product(&format!("Produto {}", i), 50));
        debug!(?notice, "Discount script added product");
    }

    Ok(ScenarioReport {
        scenario: Scenario::Discount.to_string(),
        lines: vec![cart.total().to_string(), cart.total_with_discount().to_string()],
        summary: cart.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::CartPhase;

    #[test]
    fn test_lifecycle_lines_in_portuguese() {
        let report = run_lifecycle(Locale::Portuguese);
        assert_eq!(
            report.lines,
            vec![
                "Produto \"Produto 1\" adicionado ao carrinho.",
                "Produto \"Produto 2\" adicionado ao carrinho.",
                "Produto \"Produto 1\" removido do carrinho.",
                "Finalizando compra...",
                "Compra finalizada. Não é possível adicionar mais produtos.",
            ]
        );
    }

    #[test]
    fn test_lifecycle_final_state() {
        let report = run_lifecycle(Locale::English);
        assert_eq!(report.summary.phase, CartPhase::Closed);
        assert_eq!(report.summary.item_count, 1);
        assert_eq!(report.summary.total_cents, 10_000);
        assert_eq!(report.lines[3], "Finalizing purchase...");
    }

    #[test]
    fn test_discount_with_new_policy() {
        let report = run_discount(DiscountPolicy::New).unwrap();
        assert_eq!(report.lines, vec!["$300.00", "$210.00"]);
        assert_eq!(report.summary.discount, "new");
        assert_eq!(report.summary.phase, CartPhase::WithProducts);
    }

    #[test]
    fn test_discount_with_other_policies() {
        let report = run_discount(DiscountPolicy::Default).unwrap();
        assert_eq!(report.lines, vec!["$300.00", "$300.00"]);

        let report = run_discount(DiscountPolicy::Percentage(1500)).unwrap();
        assert_eq!(report.summary.discounted_total_cents, 25_500);
    }

    #[test]
    fn test_discount_rejects_invalid_rate() {
        assert!(matches!(
            run_discount(DiscountPolicy::Percentage(10_001)),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn test_run_all_in_order() {
        let reports = run(Scenario::All, Locale::Portuguese, DiscountPolicy::New).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(names, vec!["lifecycle", "discount"]);
    }

    #[test]
    fn test_scenario_parsing() {
        assert_eq!("state".parse::<Scenario>().unwrap(), Scenario::Lifecycle);
        assert_eq!("Discount".parse::<Scenario>().unwrap(), Scenario::Discount);
        assert!("checkout".parse::<Scenario>().is_err());
    }
}
