// src/output.rs
//! Reporting layer: confidence interval and rendering of a pricing run.

use crate::mc::mc_engine::McEstimate;
use crate::mc::payoffs::Payoff;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// z-value of the two-sided 99.7% normal interval
pub const Z_99_7: f64 = 2.968;

/// Half-width of the 99.7% confidence interval around the mean
pub fn confidence_half_width(estimate: &McEstimate) -> f64 {
    Z_99_7 * estimate.standard_error / (estimate.paths as f64).sqrt()
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingReport {
    pub start_time: f64,
    pub price: f64,
    pub standard_error: f64,
    pub ci_half_width: f64,
    pub step_length: f64,
    pub paths: usize,
    pub seed: u64,
    pub payoff: Payoff,
    pub generated_at: DateTime<Utc>,
}

impl PricingReport {
    pub fn new(start_time: f64, estimate: &McEstimate, seed: u64, payoff: Payoff) -> Self {
        PricingReport {
            start_time,
            price: estimate.mean,
            standard_error: estimate.standard_error,
            ci_half_width: confidence_half_width(estimate),
            step_length: estimate.step_length,
            paths: estimate.paths,
            seed,
            payoff,
            generated_at: Utc::now(),
        }
    }

    pub fn render_text(&self) -> String {
        format!(
            "Option price at time {}: {}\n\
             with 99.7% CI : (+/-) {}\n\
             using h = {}\n\
             using M = {}",
            self.start_time, self.price, self.ci_half_width, self.step_length, self.paths
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn summary_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("payoff", self.payoff.name().to_string()),
            ("start_time", self.start_time.to_string()),
            ("price", self.price.to_string()),
            ("standard_error", self.standard_error.to_string()),
            ("ci_99_7_half_width", self.ci_half_width.to_string()),
            ("step_length", self.step_length.to_string()),
            ("paths", self.paths.to_string()),
            ("seed", self.seed.to_string()),
            ("generated_at", self.generated_at.to_rfc3339()),
        ]
    }
}

pub fn write_summary_to_csv<P: AsRef<Path>>(path: P, report: &PricingReport) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "key,value")?;
    for (key, value) in report.summary_rows() {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn estimate() -> McEstimate {
        McEstimate {
            mean: 5.5,
            standard_error: 8.0,
            paths: 10_000,
            step_length: 0.01,
        }
    }

    #[test]
    fn test_half_width() {
        assert_relative_eq!(confidence_half_width(&estimate()), 2.968 * 8.0 / 100.0, epsilon = 1e-12);

        let single = McEstimate {
            paths: 1,
            standard_error: 0.0,
            ..estimate()
        };
        assert_eq!(confidence_half_width(&single), 0.0);
    }

    #[test]
    fn test_text_report() {
        let report = PricingReport::new(0.0, &estimate(), 12345, Payoff::EuropeanPut);
        let text = report.render_text();

        assert!(text.starts_with("Option price at time 0: 5.5\n"));
        assert!(text.contains("with 99.7% CI : (+/-) 0.2374"));
        assert!(text.contains("using h = 0.01"));
        assert!(text.ends_with("using M = 10000"));
    }

    #[test]
    fn test_json_report() {
        let report = PricingReport::new(0.0, &estimate(), 7, Payoff::EuropeanCall);
        let json = report.to_json().expect("Serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("Valid JSON");

        assert_eq!(value["price"], 5.5);
        assert_eq!(value["paths"], 10_000);
        assert_eq!(value["seed"], 7);
        assert_eq!(value["payoff"], "european_call");
    }

    #[test]
    fn test_summary_csv() {
        let report = PricingReport::new(0.0, &estimate(), 12345, Payoff::EuropeanPut);
        let path = std::env::temp_dir().join(format!("heston_mc_summary_{}.csv", std::process::id()));

        write_summary_to_csv(&path, &report).expect("Writable temp dir");
        let contents = std::fs::read_to_string(&path).expect("Readable");
        std::fs::remove_file(&path).ok();

        assert!(contents.starts_with("key,value\n"));
        assert!(contents.contains("price,5.5\n"));
        assert!(contents.contains("paths,10000\n"));
        assert!(contents.contains("seed,12345\n"));
    }
}
