// tests/integration_test.rs
use heston_mc::analytics::bs_analytic;
use heston_mc::output::confidence_half_width;
use heston_mc::{mc_price_option_heston, McConfig, Payoff, SdeError, SimulationParameters};

#[test]
fn test_scenario_put_price() {
    let params = SimulationParameters::default();
    let estimate =
        mc_price_option_heston(&params, &McConfig::default()).expect("Valid configuration");

    println!("\nHeston put price: {}", estimate.mean);
    println!("Standard error: {}", estimate.standard_error);
    println!("99.7% half-width: {}", confidence_half_width(&estimate));

    assert_eq!(estimate.paths, 10_000);
    assert!((estimate.step_length - 0.01).abs() < 1e-15);
    assert!(
        estimate.mean > 2.0 && estimate.mean < 15.0,
        "Put price {} outside plausible range",
        estimate.mean
    );
    assert!(estimate.standard_error > 0.0);
}

#[test]
fn test_reproducibility() {
    let params = SimulationParameters {
        num_paths: 2_000,
        num_steps: 50,
        ..Default::default()
    };

    let first = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");
    let second = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");
    assert_eq!(first, second);

    let other_seed = McConfig {
        seed: 54321,
        ..Default::default()
    };
    let third = mc_price_option_heston(&params, &other_seed).expect("Valid");
    assert_ne!(first.mean, third.mean);
}

#[test]
fn test_single_path_has_zero_standard_error() {
    let params = SimulationParameters {
        num_paths: 1,
        ..Default::default()
    };
    let estimate = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");

    assert_eq!(estimate.paths, 1);
    assert_eq!(estimate.standard_error, 0.0);
    assert_eq!(confidence_half_width(&estimate), 0.0);
}

#[test]
fn test_half_width_shrinks_with_paths() {
    let small = SimulationParameters {
        num_paths: 2_500,
        ..Default::default()
    };
    let large = SimulationParameters {
        num_paths: 10_000,
        ..Default::default()
    };

    let small_est = mc_price_option_heston(&small, &McConfig::default()).expect("Valid");
    let large_est = mc_price_option_heston(&large, &McConfig::default()).expect("Valid");

    // Four times the paths: half the interval.
    let ratio = confidence_half_width(&small_est) / confidence_half_width(&large_est);
    println!("\nHalf-width ratio (2.5k / 10k paths): {}", ratio);
    assert!(ratio > 1.6 && ratio < 2.5, "Unexpected half-width ratio {}", ratio);
}

#[test]
fn test_zero_vol_of_vol_converges_to_black_scholes() {
    // σ = 0 and V₀ = θ freeze the variance, so the scheme is a binomial
    // walk whose weak error against Black-Scholes shrinks like O(h).
    let base = SimulationParameters {
        num_paths: 100_000,
        sigma: 0.0,
        initial_variance: 0.04,
        theta: 0.04,
        ..Default::default()
    };
    let analytic = bs_analytic::bs_put_price(
        base.initial_price,
        base.strike,
        base.rate,
        base.theta.sqrt(),
        base.horizon(),
    );

    let ladder: Vec<(usize, f64, f64)> = [1, 5, 25, 125]
        .iter()
        .map(|&num_steps| {
            let params = SimulationParameters { num_steps, ..base };
            let estimate = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");
            let stderr_of_mean = estimate.standard_error / (estimate.paths as f64).sqrt();
            (num_steps, (estimate.mean - analytic).abs(), stderr_of_mean)
        })
        .collect();

    println!("
Black-Scholes put: {}", analytic);
    for (num_steps, abs_error, stderr_of_mean) in &ladder {
        println!(
            "N = {:>3}: |error| = {:.5}, stderr = {:.5}",
            num_steps, abs_error, stderr_of_mean
        );
    }

    // Discretisation bias dominates the noise on the coarse rungs.
    assert!(ladder[1].1 < ladder[0].1, "N = 5 not closer than N = 1");
    assert!(ladder[2].1 < ladder[1].1, "N = 25 not closer than N = 5");
    assert!(ladder[3].1 < ladder[1].1, "N = 125 not closer than N = 5");

    // On the finest rung only Monte Carlo noise is left.
    let (_, abs_error, stderr_of_mean) = ladder[3];
    assert!(
        abs_error < 4.0 * stderr_of_mean,
        "N = 125 error {} exceeds 4 standard errors ({})",
        abs_error,
        stderr_of_mean
    );
}

#[test]
fn test_call_payoff_policy() {
    let params = SimulationParameters {
        num_paths: 5_000,
        num_steps: 50,
        ..Default::default()
    };
    let put = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");
    let call = mc_price_option_heston(
        &params,
        &McConfig {
            payoff: Payoff::EuropeanCall,
            ..Default::default()
        },
    )
    .expect("Valid");

    // Same draws for both runs, so C - P is the discounted mean of X_T - K.
    let discount = params.discount_factor();
    let forward = params.initial_price * (1.0 + params.rate * params.step_length()).powi(50);
    let parity = discount * (forward - params.strike);

    println!(
        "\nCall: {}, Put: {}, C - P: {}, parity: {}",
        call.mean,
        put.mean,
        call.mean - put.mean,
        parity
    );
    assert!(call.mean > put.mean);
    assert!(((call.mean - put.mean) - parity).abs() < 1.5);
}

#[test]
fn test_out_of_regime_parameters_fail_with_location() {
    let params = SimulationParameters {
        initial_variance: 0.0,
        kappa: 0.5,
        theta: 0.04,
        sigma: 1.0,
        ..Default::default()
    };

    let err = mc_price_option_heston(&params, &McConfig::default())
        .expect_err("Variance step precondition must fail");
    match &err {
        SdeError::PreconditionViolated { path, step, .. } => {
            assert_eq!(*path, 0);
            assert_eq!(*step, 0);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().contains("path 0, step 0"));
}

#[test]
fn test_single_step_never_updates_variance() {
    // Same regime as above, but with one step the variance update is skipped.
    let params = SimulationParameters {
        num_steps: 1,
        initial_variance: 0.0,
        strike: 110.0,
        kappa: 0.5,
        theta: 0.04,
        sigma: 1.0,
        ..Default::default()
    };

    let estimate = mc_price_option_heston(&params, &McConfig::default()).expect("Valid");
    // Zero variance: X_T = X (1 + r h) = 105 on every path.
    let expected = params.discount_factor() * (params.strike - 105.0);
    assert!((estimate.mean - expected).abs() < 1e-10);
    assert!(estimate.standard_error < 1e-10);
}

#[test]
fn test_invalid_configuration_rejected() {
    let params = SimulationParameters {
        num_steps: 0,
        ..Default::default()
    };
    assert!(matches!(
        mc_price_option_heston(&params, &McConfig::default()),
        Err(SdeError::InvalidConfiguration { .. })
    ));

    let params = SimulationParameters {
        initial_variance: -0.04,
        ..Default::default()
    };
    assert!(matches!(
        mc_price_option_heston(&params, &McConfig::default()),
        Err(SdeError::InvalidParameters { .. })
    ));
}
