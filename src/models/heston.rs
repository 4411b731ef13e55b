// src/models/heston.rs
//! Heston Stochastic Volatility Model
//!
//! # Mathematical Framework
//!
//! ```text
//! dX_t = r X_t dt + √V_t X_t dW_t^(1)
//! dV_t = κ(θ - V_t) dt + σ√V_t dW_t^(2),    d⟨W^(1), W^(2)⟩_t = ρ dt
//! ```
//!
//! Where:
//! - X_t: Asset price
//! - V_t: Instantaneous variance
//! - κ: Mean reversion speed for variance
//! - θ: Long-term variance level
//! - σ: Volatility of variance (vol-of-vol)
//! - ρ: Correlation between the two Brownian motions
//!
//! # Weak Euler-Maruyama Discretization
//!
//! The asset is advanced with a plain Euler step driven by a two-point variate:
//! ```text
//! X' = X + h r X + √(h V) X z₁
//! ```
//!
//! The variance is advanced implicitly in √V'. Writing `u = √V'` gives the
//! quadratic `a u² + b u + c = 0` with
//! ```text
//! ζ = ρ z₁ + √(1-ρ²) z₂
//! a = 1 + h κ
//! b = -√h σ ζ
//! c = -h κ θ - V + h σ²/2
//! ```
//! and `V' = ((-b + √(b² - 4ac)) / 2a)²`, which is non-negative by
//! construction. The root is only admissible when `b² - 4ac >= b²`, i.e.
//! `c <= 0`. In exact arithmetic that holds for every `V >= 0` when
//! `2κθ >= σ²`. In floating point the computed `c` is non-increasing in `V`,
//! so a computed `c <= 0` at `V = 0` is what guarantees it for a given `h`;
//! see [`Heston::admits_all_variances`].

use super::model::StochasticVolModel;
use crate::error::{validation::*, SdeResult, VarianceStepError};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonParams {
    pub kappa: f64, // Mean reversion speed
    pub theta: f64, // Long-term variance
    pub sigma: f64, // Volatility of variance (vol-of-vol)
    pub rho: f64,   // Correlation between asset and variance
}

impl HestonParams {
    /// Stricter than a plain numeric parse: negative `kappa`, `theta` and
    /// `sigma` are rejected even though the flags accept any decimal.
    pub fn validate(&self) -> SdeResult<()> {
        validate_finite("kappa", self.kappa)?;
        validate_non_negative("kappa", self.kappa)?;
        validate_finite("theta", self.theta)?;
        validate_non_negative("theta", self.theta)?;
        validate_finite("sigma", self.sigma)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_correlation("rho", self.rho)?;
        Ok(())
    }

    /// Whether `2κθ >= σ²`.
    ///
    /// This is the exact-arithmetic condition. On its boundary the computed
    /// `c` at `V = 0` can round above zero, so a step may still fail; use
    /// [`Heston::admits_all_variances`] for the check the step performs.
    pub fn satisfies_variance_regime(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.sigma * self.sigma
    }
}

/// Coefficients of `a u² + b u + c = 0` solved for `u = √V'`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VarianceQuadraticCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl VarianceQuadraticCoefficients {
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }
}

impl fmt::Display for VarianceQuadraticCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a = {}, b = {}, c = {}", self.a, self.b, self.c)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Heston {
    pub params: HestonParams,
    rho_complement: f64, // √(1 - ρ²)
}

impl Heston {
    pub fn new(params: HestonParams) -> SdeResult<Self> {
        params.validate()?;

        Ok(Heston {
            params,
            rho_complement: (1.0 - params.rho * params.rho).sqrt(),
        })
    }

    /// Correlated driver of the variance equation.
    pub fn correlate(&self, z1: f64, z2: f64) -> f64 {
        self.params.rho * z1 + self.rho_complement * z2
    }

    /// Whether no variance step of length `dt` can fail from any `V >= 0`.
    ///
    /// `c` does not depend on the variates and its computed value is
    /// non-increasing in `V`, so a computed `c(0) <= 0` keeps `-4ac >= 0` and
    /// the discriminant at or above `b²` on every step. When this returns
    /// `false` a step from low variance may fail.
    pub fn admits_all_variances(&self, dt: f64) -> bool {
        self.variance_coefficients(0.0, 1.0, 1.0, dt).c <= 0.0
    }

    pub fn variance_coefficients(
        &self,
        variance: f64,
        z1: f64,
        z2: f64,
        dt: f64,
    ) -> VarianceQuadraticCoefficients {
        let HestonParams {
            kappa,
            theta,
            sigma,
            ..
        } = self.params;

        VarianceQuadraticCoefficients {
            a: 1.0 + dt * kappa,
            b: -dt.sqrt() * sigma * self.correlate(z1, z2),
            c: -dt * kappa * theta - variance + dt * sigma * sigma / 2.0,
        }
    }
}

impl StochasticVolModel for Heston {
    fn asset_step(&self, price: f64, variance: f64, z1: f64, dt: f64, rate: f64) -> f64 {
        price + dt * rate * price + (dt * variance).sqrt() * price * z1
    }

    fn variance_step(
        &self,
        variance: f64,
        z1: f64,
        z2: f64,
        dt: f64,
    ) -> Result<f64, VarianceStepError> {
        let coefficients = self.variance_coefficients(variance, z1, z2, dt);
        let VarianceQuadraticCoefficients { a, b, .. } = coefficients;

        if a.is_nan() || a <= 0.0 {
            return Err(VarianceStepError::NonPositiveLeadingCoefficient { variance, a });
        }

        let discriminant = coefficients.discriminant();
        let b_squared = b * b;
        if discriminant.is_nan() || discriminant < b_squared {
            return Err(VarianceStepError::DiscriminantBelowBSquared {
                variance,
                coefficients,
                discriminant,
                b_squared,
            });
        }

        let root = if discriminant == 0.0 {
            -b / (2.0 * a)
        } else {
            (-b + discriminant.sqrt()) / (2.0 * a)
        };
        Ok(root * root)
    }
}
