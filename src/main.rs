//! Position sizing CLI
//!
//! Sizes a trade from balance, risk percentage, entry and weighted stop-loss
//! targets, folding entry and exit fees into the risk budget.

use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use position_sizer::{
    CalculatorConfig, PositionSizer, PriceTarget, SizingRequest, StopLossPlan, TakeProfitPlan,
    TradePlanAnalyzer,
};

/// Risk-based position sizing calculator.
#[derive(Parser)]
#[command(name = "possizer")]
#[command(about = "Size positions so that price move plus fees stays within your risk", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate position size for a single entry
    Size {
        #[command(flatten)]
        sizing: SizingArgs,
    },

    /// Calculate position size plus reward, risk/reward and margin for a full plan
    Plan {
        #[command(flatten)]
        sizing: SizingArgs,

        /// Take-profit target as PRICE[:WEIGHT] (repeatable)
        #[arg(short, long = "take-profit", value_parser = parse_target, required = true)]
        take_profits: Vec<PriceTarget>,
    },

    /// Show the effective configuration after env and flag overrides
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Values that replace the config defaults, from flags or `SIZER_*` env vars.
#[derive(Args)]
struct OverrideArgs {
    /// Percentage of balance to risk (1.0 = 1%)
    #[arg(short, long, env = "SIZER_RISK_PERCENT")]
    risk: Option<Decimal>,

    /// Leverage multiplier (does not change the size, only the margin)
    #[arg(long, env = "SIZER_LEVERAGE")]
    leverage: Option<Decimal>,

    /// Fee rate per side (0.0004 = 0.04%)
    #[arg(short, long, env = "SIZER_FEE_RATE")]
    fee: Option<Decimal>,
}

impl OverrideArgs {
    fn apply(&self, config: CalculatorConfig) -> CalculatorConfig {
        config.with_overrides(self.risk, self.fee, self.leverage)
    }
}

#[derive(Args)]
struct SizingArgs {
    /// Account balance
    #[arg(short, long)]
    balance: Decimal,

    /// Entry price
    #[arg(short, long)]
    entry: Decimal,

    /// Stop-loss target as PRICE[:WEIGHT] (repeatable, weight defaults to 1)
    #[arg(short, long = "stop", value_parser = parse_target, required = true)]
    stops: Vec<PriceTarget>,

    #[command(flatten)]
    overrides: OverrideArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl SizingArgs {
    /// Merge overrides into `base` and build a request from the result.
    fn to_request(&self, base: &CalculatorConfig) -> (SizingRequest, CalculatorConfig) {
        let config = self.overrides.apply(base.clone());
        let request = SizingRequest::new(
            self.balance,
            config.default_risk_percent,
            self.entry,
            StopLossPlan::new(self.stops.clone()),
        )
        .with_leverage(config.default_leverage)
        .with_fee_rate(config.default_fee_rate);
        (request, config)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging (RUST_LOG overrides --log-level)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level.to_lowercase()))
        .context("invalid log level")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CalculatorConfig::default();

    match cli.command {
        Commands::Size { sizing } => {
            let (request, config) = sizing.to_request(&config);
            log_request(&request, &config);

            let outcome = PositionSizer::compute(&request);
            render(outcome, sizing.json, |e| e.code())?;
        }

        Commands::Plan {
            sizing,
            take_profits,
        } => {
            let (request, config) = sizing.to_request(&config);
            log_request(&request, &config);

            let outcome = TradePlanAnalyzer::analyze(&request, &TakeProfitPlan::new(take_profits));
            render(outcome, sizing.json, |e| e.code())?;
        }

        Commands::Config { overrides } => {
            let config = overrides.apply(config);
            println!("\n=== Calculator Configuration ===\n");
            println!("Defaults:");
            println!("  Risk Per Trade:       {}%", config.default_risk_percent);
            println!("  Fee Rate (per side):  {}", config.default_fee_rate);
            println!("  Leverage:             {}x", config.default_leverage);
            println!("\nWarnings:");
            println!("  Aggressive Risk:      > {}%", config.max_risk_percent_warning);
            println!("\nOverrides:");
            println!("  SIZER_RISK_PERCENT, SIZER_FEE_RATE, SIZER_LEVERAGE (env or .env)");
        }
    }

    Ok(())
}

fn log_request(request: &SizingRequest, config: &CalculatorConfig) {
    info!(
        balance = %request.balance,
        risk_percent = %request.risk_percent,
        entry = %request.entry_price,
        stops = request.stop_loss_plan.len(),
        fee_rate = %request.fee_rate,
        "Sizing position"
    );

    if config.is_aggressive(request.risk_percent) {
        warn!(
            risk_percent = %request.risk_percent,
            threshold = %config.max_risk_percent_warning,
            "Risk per trade is above the aggressive threshold"
        );
    }
}

/// Print a result as a table or JSON; rejected requests exit non-zero.
fn render<T, E>(outcome: Result<T, E>, json: bool, code: impl Fn(&E) -> &'static str) -> Result<()>
where
    T: Serialize + Display,
    E: std::error::Error + Send + Sync + 'static,
{
    match outcome {
        Ok(value) if json => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Ok(value) => {
            println!("\n{}", value);
            Ok(())
        }
        Err(e) => {
            if json {
                let body = ErrorBody {
                    code: code(&e),
                    message: e.to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            let code = code(&e);
            Err(anyhow::Error::new(e).context(format!("request rejected ({code})")))
        }
    }
}

/// Parse `PRICE[:WEIGHT]`; weight defaults to 1.
fn parse_target(s: &str) -> Result<PriceTarget, String> {
    let (price, weight) = match s.split_once(':') {
        Some((price, weight)) => (price, Some(weight)),
        None => (s, None),
    };

    let price: Decimal = price
        .trim()
        .parse()
        .map_err(|e| format!("invalid price '{}': {}", price.trim(), e))?;
    let weight = match weight {
        Some(w) => w
            .trim()
            .parse()
            .map_err(|e| format!("invalid weight '{}': {}", w.trim(), e))?,
        None => Decimal::ONE,
    };

    Ok(PriceTarget::new(price, weight))
}
