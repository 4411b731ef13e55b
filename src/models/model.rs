// src/models/model.rs
use crate::error::VarianceStepError;

/// A two-factor stochastic-volatility model advanced by a weak scheme.
///
/// `asset_step` must be evaluated with the variance from *before* the
/// variance update of the same time step.
pub trait StochasticVolModel {
    fn asset_step(&self, price: f64, variance: f64, z1: f64, dt: f64, rate: f64) -> f64;
    fn variance_step(&self, variance: f64, z1: f64, z2: f64, dt: f64)
        -> Result<f64, VarianceStepError>;
}
