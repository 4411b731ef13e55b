// src/mc/mc_engine.rs
use crate::error::{validation::*, SdeError, SdeResult};
use crate::mc::payoffs::Payoff;
use crate::mc::sample_set::SampleSet;
use crate::models::heston::{Heston, HestonParams};
use crate::rng::{self, TwoPoint, DEFAULT_SEED};
use crate::solvers::weak_euler::{PathState, WeakEuler};
use rand::Rng;
use tracing::{debug, error, warn};

/// Contract inputs of a pricing run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
    pub start_time: f64,
    pub end_time: f64,
    pub num_steps: usize,
    pub num_paths: usize,
    pub initial_price: f64,
    pub initial_variance: f64,
    pub strike: f64,
    pub rate: f64,
    pub kappa: f64,
    pub theta: f64,
    pub sigma: f64,
    pub rho: f64,
}

impl SimulationParameters {
    /// Validate the simulation parameters
    pub fn validate(&self) -> SdeResult<()> {
        validate_time_window(self.start_time, self.end_time)?;
        validate_steps(self.num_steps)?;
        validate_paths(self.num_paths)?;
        validate_finite("initial_price", self.initial_price)?;
        validate_positive("initial_price", self.initial_price)?;
        validate_finite("initial_variance", self.initial_variance)?;
        validate_non_negative("initial_variance", self.initial_variance)?;
        validate_finite("strike", self.strike)?;
        validate_non_negative("strike", self.strike)?;
        validate_finite("rate", self.rate)?;
        self.heston_params().validate()
    }

    pub fn heston_params(&self) -> HestonParams {
        HestonParams {
            kappa: self.kappa,
            theta: self.theta,
            sigma: self.sigma,
            rho: self.rho,
        }
    }

    pub fn horizon(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// h = (T - t) / N
    pub fn step_length(&self) -> f64 {
        self.horizon() / self.num_steps as f64
    }

    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.horizon()).exp()
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            start_time: 0.0,
            end_time: 1.0,
            num_steps: 100,
            num_paths: 10_000,
            initial_price: 100.0,
            initial_variance: 0.04,
            strike: 100.0,
            rate: 0.05,
            kappa: 1.2,
            theta: 0.04,
            sigma: 0.3,
            rho: -0.5,
        }
    }
}

/// Run-level options that are not part of the contract itself
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McConfig {
    pub seed: u64,
    pub payoff: Payoff,
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            seed: DEFAULT_SEED,
            payoff: Payoff::EuropeanPut,
        }
    }
}

/// Result of a pricing run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McEstimate {
    /// Mean discounted payoff
    pub mean: f64,
    /// Standard deviation of the discounted payoffs (1/M normalisation)
    pub standard_error: f64,
    /// Number of simulated paths M
    pub paths: usize,
    /// Step length h
    pub step_length: f64,
}

/// Simulates independent paths and returns their discounted payoffs
pub struct PathSimulator<'a> {
    params: &'a SimulationParameters,
    model: Heston,
    payoff: Payoff,
    variates: TwoPoint,
    step_length: f64,
    discount: f64,
}

impl<'a> PathSimulator<'a> {
    pub fn new(params: &'a SimulationParameters, payoff: Payoff) -> SdeResult<Self> {
        let simulator = PathSimulator {
            params,
            model: Heston::new(params.heston_params())?,
            payoff,
            variates: TwoPoint::symmetric()?,
            step_length: params.step_length(),
            discount: params.discount_factor(),
        };

        if !simulator.admits_all_variances() {
            warn!(
                kappa = params.kappa,
                theta = params.theta,
                sigma = params.sigma,
                step_length = simulator.step_length,
                "c > 0 at zero variance: the variance step fails once variance drops below h(σ²/2 - κθ)"
            );
        }

        Ok(simulator)
    }

    /// Whether the variance step at this run's `h` is guaranteed for every
    /// non-negative variance.
    pub fn admits_all_variances(&self) -> bool {
        self.model.admits_all_variances(self.step_length)
    }

    /// Terminal state of one path
    ///
    /// `path` only labels diagnostics; it does not affect the draws.
    pub fn simulate_terminal<R: Rng + ?Sized>(
        &self,
        path: usize,
        rng: &mut R,
    ) -> SdeResult<PathState> {
        let n = self.params.num_steps;
        let mut state = PathState::new(self.params.initial_price, self.params.initial_variance);

        for step in 0..n {
            WeakEuler::step(
                &self.model,
                &mut state,
                self.step_length,
                self.params.rate,
                step != n - 1,
                &self.variates,
                rng,
            )
            .map_err(|source| SdeError::PreconditionViolated { path, step, source })?;
        }

        if !state.price.is_finite() {
            return Err(SdeError::NumericalInstability {
                method: "weak Euler asset step".to_string(),
                reason: format!("terminal price of path {} is not finite: {}", path, state.price),
            });
        }

        Ok(state)
    }

    /// Discounted payoff of one path
    pub fn simulate_path<R: Rng + ?Sized>(&self, path: usize, rng: &mut R) -> SdeResult<f64> {
        let terminal = self.simulate_terminal(path, rng)?;
        Ok(self.discount * self.payoff.calculate(self.params.strike, terminal.price))
    }
}

/// Monte Carlo pricing under the Heston model
///
/// # Algorithm
///
/// 1. Seed one generator from `cfg.seed`
/// 2. Simulate `num_paths` paths sequentially on that generator
/// 3. Reduce the discounted payoffs to mean and standard error
///
/// Paths consume the random stream in index order, so a run is fully
/// determined by `(params, cfg)`.
///
/// # Errors
///
/// Returns `SdeError` for:
/// - Invalid parameters
/// - A variance step whose precondition fails (names path and step)
/// - Non-finite terminal prices or statistics
pub fn mc_price_option_heston(
    params: &SimulationParameters,
    cfg: &McConfig,
) -> SdeResult<McEstimate> {
    params.validate()?;
    let simulator = PathSimulator::new(params, cfg.payoff)?;

    debug!(
        paths = params.num_paths,
        steps = params.num_steps,
        step_length = params.step_length(),
        seed = cfg.seed,
        payoff = cfg.payoff.name(),
        "starting Heston Monte Carlo run"
    );

    let mut rng = rng::seed_rng_from_u64(cfg.seed);
    let mut samples = SampleSet::try_with_capacity(params.num_paths)?;
    for path in 0..params.num_paths {
        let value = simulator.simulate_path(path, &mut rng).map_err(|e| {
            error!(error = %e, "aborting Monte Carlo run");
            e
        })?;
        samples.push(value);
    }

    let summary = samples.summarize()?;

    if !summary.mean.is_finite() || !summary.standard_error.is_finite() {
        return Err(SdeError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!(
                "estimate is not finite: mean = {}, standard error = {}",
                summary.mean, summary.standard_error
            ),
        });
    }

    debug!(
        mean = summary.mean,
        standard_error = summary.standard_error,
        "finished Heston Monte Carlo run"
    );

    Ok(McEstimate {
        mean: summary.mean,
        standard_error: summary.standard_error,
        paths: summary.count,
        step_length: params.step_length(),
    })
}
