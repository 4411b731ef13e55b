//! # heston-mc: Weak Euler Monte Carlo for the Heston Model
//!
//! Prices European options under the Heston stochastic-volatility model by
//! simulating the asset and its variance with a weak Euler-Maruyama scheme
//! driven by two-point (±1) variates.
//!
//! ## Key Features
//!
//! - **Non-negative variance**: the variance is advanced through the closed-form
//!   root of a quadratic, so it can never go below zero
//! - **Reproducible**: one seeded generator, consumed in a fixed order
//! - **Explicit failures**: a variance step outside the scheme's regime is
//!   reported with the offending path, step and coefficients
//!
//! ## Quick Start
//!
//! ```rust
//! use heston_mc::mc::mc_engine::{mc_price_option_heston, McConfig, SimulationParameters};
//! use heston_mc::output::confidence_half_width;
//!
//! let params = SimulationParameters {
//!     num_paths: 2_000,
//!     num_steps: 50,
//!     ..Default::default()
//! };
//!
//! let estimate = mc_price_option_heston(&params, &McConfig::default()).expect("Valid parameters");
//! println!(
//!     "Put price: {:.4} ± {:.4}",
//!     estimate.mean,
//!     confidence_half_width(&estimate)
//! );
//! ```

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod solvers;

// Re-export commonly used types for convenience
pub use error::{SdeError, SdeResult, VarianceStepError};
pub use mc::mc_engine::{mc_price_option_heston, McConfig, McEstimate, SimulationParameters};
pub use mc::payoffs::Payoff;
