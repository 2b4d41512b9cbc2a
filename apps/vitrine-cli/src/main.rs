//! # Vitrine CLI
//!
//! Replays the cart demonstration scripts and prints what the cart said.
//!
//! ## Usage
//! ```bash
//! # Both scripts, Portuguese notices
//! cargo run -p vitrine-cli
//!
//! # Only the discount script, flat 15% policy, JSON output
//! cargo run -p vitrine-cli -- --scenario discount --discount percentage:1500 --json
//!
//! # English notices with transition logs on stderr
//! VITRINE_LOG=vitrine_core=debug cargo run -p vitrine-cli -- --locale en
//! ```
//!
//! Notices go to stdout, logs go to stderr.

mod config;
mod error;
mod scenario;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};
use vitrine_core::{DiscountPolicy, Locale};

use crate::config::{CliConfig, OutputFormat, DEFAULT_LOG_FILTER};
use crate::error::{CliError, CliResult};
use crate::scenario::{Scenario, ScenarioReport};

/// Parsed command line. `None` means "keep the configured value".
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    scenario: Scenario,
    config_path: Option<PathBuf>,
    locale: Option<Locale>,
    discount: Option<DiscountPolicy>,
    json: bool,
    help: bool,
}

const HELP: &str = "\
Vitrine cart demo

Usage: vitrine [OPTIONS]

Options:
  -s, --scenario <NAME>    lifecycle | discount | all (default: all)
  -c, --config <PATH>      Config file (default: platform config dir)
  -l, --locale <LOCALE>    Notice language: pt | en
  -d, --discount <POLICY>  default | new | percentage:<bps>
      --json               Print scenario reports as JSON
  -h, --help               Show this help message";

fn parse_args(args: &[String]) -> CliResult<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| CliError::InvalidArgument(format!("{} needs a value", arg)))
        };

        match arg.as_str() {
            "--scenario" | "-s" => parsed.scenario = value()?.parse::<Scenario>()?,
            "--config" | "-c" => parsed.config_path = Some(PathBuf::from(value()?)),
            "--locale" | "-l" => parsed.locale = Some(value()?.parse::<Locale>()?),
            "--discount" | "-d" => parsed.discount = Some(value()?.parse::<DiscountPolicy>()?),
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            other => {
                return Err(CliError::InvalidArgument(format!(
                    "Unknown option: '{}'",
                    other
                )))
            }
        }
    }

    Ok(parsed)
}

/// Directive used before config is loaded: `VITRINE_LOG` when it parses,
/// otherwise the default.
fn bootstrap_filter(env_value: Option<String>) -> String {
    env_value
        .filter(|directive| !directive.trim().is_empty())
        .filter(|directive| EnvFilter::try_new(directive).is_ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Installs the global subscriber. The returned handle swaps the filter
/// once the configured one is known.
fn init_tracing(directive: &str) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    handle
}

fn apply_log_filter(
    handle: &reload::Handle<EnvFilter, Registry>,
    directive: &str,
) -> CliResult<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| CliError::InvalidConfig(format!("logging.filter: {}", e)))?;
    handle
        .reload(filter)
        .map_err(|e| CliError::InvalidConfig(format!("logging.filter: {}", e)))
}

/// Command-line flags override everything loaded before them.
fn apply_args(config: &mut CliConfig, args: &CliArgs) {
    if let Some(locale) = args.locale {
        config.notices.locale = locale;
    }
    if let Some(discount) = args.discount {
        config.pricing.discount = discount;
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    }
}

fn print_reports(reports: &[ScenarioReport], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for line in &report.lines {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let log_handle = init_tracing(&bootstrap_filter(std::env::var("VITRINE_LOG").ok()));

    let mut config = CliConfig::load(args.config_path.clone())?;
    apply_args(&mut config, &args);
    config.validate()?;

    apply_log_filter(&log_handle, &config.logging.filter)?;
    info!(
        scenario = %args.scenario,
        locale = %config.notices.locale,
        discount = %config.pricing.discount,
        "Running cart scenarios"
    );

    let reports = scenario::run(
        args.scenario,
        config.notices.locale,
        config.pricing.discount,
    )?;
    print_reports(&reports, config.output.format)?;

    Ok(())
}
