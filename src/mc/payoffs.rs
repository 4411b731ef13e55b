//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//!
//! Both payoffs depend on the terminal price only. The put is the default
//! policy of the pricing engine.

/// European put payoff: max(K - S_T, 0)
pub fn european_put_payoff(strike: f64, terminal_price: f64) -> f64 {
    (strike - terminal_price).max(0.0)
}

/// European call payoff: max(S_T - K, 0)
pub fn european_call_payoff(strike: f64, terminal_price: f64) -> f64 {
    (terminal_price - strike).max(0.0)
}

/// Payoff policy applied to the terminal price of every path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payoff {
    #[default]
    EuropeanPut,
    EuropeanCall,
}

impl Payoff {
    /// Non-negative payoff for a terminal price
    pub fn calculate(&self, strike: f64, terminal_price: f64) -> f64 {
        match self {
            Payoff::EuropeanPut => european_put_payoff(strike, terminal_price),
            Payoff::EuropeanCall => european_call_payoff(strike, terminal_price),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Payoff::EuropeanPut => "European put",
            Payoff::EuropeanCall => "European call",
        }
    }
}
