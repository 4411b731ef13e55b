// src/solvers/weak_euler.rs
//! Weak Euler-Maruyama Scheme for Two-Factor Models
//!
//! # Mathematical Framework
//!
//! For the pair `(X_t, V_t)` the weak scheme replaces each Brownian increment
//! `ΔW ~ N(0, h)` by `√h z` with `z` a symmetric ±1 variate. Only the law of
//! the terminal state is approximated, not individual trajectories.
//!
//! # Convergence Properties
//!
//! - **Weak convergence**: Order 1.0 in step size
//! - **Strong convergence**: none (the variates are not Brownian increments)
//!
//! # Step Ordering
//!
//! 1. Draw `(z₁, z₂)`
//! 2. Advance the price using the variance from the start of the step
//! 3. Advance the variance, except on the final step where it is never read

use crate::error::VarianceStepError;
use crate::models::model::StochasticVolModel;
use crate::rng::TwoPoint;
use rand::Rng;

/// State of one simulated path. Lives for exactly one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathState {
    pub price: f64,
    pub variance: f64,
}

impl PathState {
    pub fn new(price: f64, variance: f64) -> Self {
        PathState { price, variance }
    }
}

/// Weak Euler-Maruyama numerical scheme
pub struct WeakEuler;

impl WeakEuler {
    /// Single weak Euler step for a stochastic-volatility model
    ///
    /// # Parameters
    /// - `model`: supplies the asset and variance updates
    /// - `state`: current path state (modified in-place)
    /// - `dt`: time step size
    /// - `rate`: risk-free rate
    /// - `update_variance`: `false` on the last step of a path
    /// - `variates`: two-point distribution for `(z₁, z₂)`
    /// - `rng`: random number generator shared by the whole run
    pub fn step<M: StochasticVolModel, R: Rng + ?Sized>(
        model: &M,
        state: &mut PathState,
        dt: f64,
        rate: f64,
        update_variance: bool,
        variates: &TwoPoint,
        rng: &mut R,
    ) -> Result<(), VarianceStepError> {
        let (z1, z2) = variates.sample_pair(rng);

        state.price = model.asset_step(state.price, state.variance, z1, dt, rate);
        if update_variance {
            state.variance = model.variance_step(state.variance, z1, z2, dt)?;
        }
        Ok(())
    }
}
