// src/analytics/bs_analytic.rs
//! Black-Scholes reference prices
//!
//! With zero vol-of-vol and `V₀ = θ` the Heston variance is frozen at `θ`
//! and the asset follows geometric Brownian motion with volatility `√θ`:
//! ```text
//! dX_t = r X_t dt + √θ X_t dW_t
//! ```
//! These closed forms are the limit the weak scheme must converge to in that
//! case.

use crate::math_utils::norm_cdf;

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call price
///
/// ```text
/// C = S Φ(d₁) - K e^(-rT) Φ(d₂)
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T),    d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put price
///
/// ```text
/// P = K e^(-rT) Φ(-d₂) - S Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}
