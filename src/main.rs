//! heston-mc - price a European option under the Heston model
//!
//! ```text
//! heston-mc -t 0 -T 1 -N 100 -M 10000 --Xt 100 --Vt 0.04 -K 100 -r 0.05 \
//!     --kappa 1.2 --theta 0.04 --sigma 0.3 --rho -0.5
//! ```
//!
//! The report goes to stdout; logs go to stderr and follow `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use heston_mc::math_utils::Stopwatch;
use heston_mc::output::{self, PricingReport};
use heston_mc::rng::DEFAULT_SEED;
use heston_mc::{mc_price_option_heston, McConfig, Payoff, SimulationParameters};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PayoffArg {
    Put,
    Call,
}

impl From<PayoffArg> for Payoff {
    fn from(arg: PayoffArg) -> Self {
        match arg {
            PayoffArg::Put => Payoff::EuropeanPut,
            PayoffArg::Call => Payoff::EuropeanCall,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Monte Carlo pricing under the Heston model with a weak Euler-Maruyama scheme
#[derive(Parser, Debug)]
#[command(name = "heston-mc")]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Start time t
    #[arg(short = 't', long)]
    start_time: f64,

    /// End time T
    #[arg(short = 'T', long)]
    end_time: f64,

    /// Number of time steps N
    #[arg(short = 'N', long)]
    num_steps: usize,

    /// Number of simulated paths M
    #[arg(short = 'M', long)]
    num_paths: usize,

    /// Initial asset price X_t
    #[arg(long, visible_alias = "Xt")]
    initial_price: f64,

    /// Initial variance V_t
    #[arg(long, visible_alias = "Vt")]
    initial_variance: f64,

    /// Strike price K
    #[arg(short = 'K', long)]
    strike: f64,

    /// Risk-free rate r
    #[arg(short = 'r', long)]
    rate: f64,

    /// Mean reversion speed of the variance
    #[arg(long)]
    kappa: f64,

    /// Long-run variance
    #[arg(long)]
    theta: f64,

    /// Volatility of variance
    #[arg(long)]
    sigma: f64,

    /// Correlation between asset and variance, in [-1, 1]
    #[arg(long)]
    rho: f64,

    /// Seed of the random number generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Payoff to price
    #[arg(long, value_enum, default_value = "put")]
    payoff: PayoffArg,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write the report as a key,value CSV file
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            start_time: self.start_time,
            end_time: self.end_time,
            num_steps: self.num_steps,
            num_paths: self.num_paths,
            initial_price: self.initial_price,
            initial_variance: self.initial_variance,
            strike: self.strike,
            rate: self.rate,
            kappa: self.kappa,
            theta: self.theta,
            sigma: self.sigma,
            rho: self.rho,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let params = cli.parameters();
    params.validate().context("invalid simulation parameters")?;

    let cfg = McConfig {
        seed: cli.seed,
        payoff: cli.payoff.into(),
    };
    info!(?params, seed = cfg.seed, "pricing");

    let timer = Stopwatch::start();
    let estimate = mc_price_option_heston(&params, &cfg).context("pricing run failed")?;
    info!(elapsed_ms = timer.elapsed_ms(), "pricing complete");

    let report = PricingReport::new(params.start_time, &estimate, cfg.seed, cfg.payoff);
    match cli.format {
        OutputFormat::Text => println!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(path) = &cli.summary_csv {
        output::write_summary_to_csv(path, &report)
            .with_context(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    Ok(())
}
