// scripts/benchmark.rs
use anyhow::{Context, Result};
use heston_mc::analytics::bs_analytic;
use heston_mc::math_utils::Stopwatch;
use heston_mc::output::confidence_half_width;
use heston_mc::{mc_price_option_heston, McConfig, SimulationParameters};
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    steps: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    price: f64,
    half_width: f64,
    reference: Option<f64>,
}

fn run(name: &str, params: &SimulationParameters, reference: Option<f64>) -> Result<BenchmarkResult> {
    let timer = Stopwatch::start();
    let estimate = mc_price_option_heston(params, &McConfig::default())
        .with_context(|| format!("benchmark '{}' failed", name))?;
    let time_ms = timer.elapsed_ms();

    Ok(BenchmarkResult {
        name: name.to_string(),
        paths: params.num_paths,
        steps: params.num_steps,
        time_ms,
        throughput_paths_per_sec: params.num_paths as f64 / (time_ms / 1000.0),
        price: estimate.mean,
        half_width: confidence_half_width(&estimate),
        reference,
    })
}

/// Heston scenario for a ladder of path counts; the half-width should halve
/// each time the path count quadruples.
fn run_path_ladder() -> Result<Vec<BenchmarkResult>> {
    [2_500, 10_000, 40_000, 160_000]
        .iter()
        .map(|&num_paths| {
            let params = SimulationParameters {
                num_paths,
                ..Default::default()
            };
            println!("Running Heston put with {} paths...", num_paths);
            run(&format!("Heston put ({} paths)", num_paths), &params, None)
        })
        .collect()
}

/// Zero vol-of-vol runs against the Black-Scholes limit for shrinking steps.
fn run_step_ladder() -> Result<Vec<BenchmarkResult>> {
    let base = SimulationParameters {
        num_paths: 100_000,
        sigma: 0.0,
        ..Default::default()
    };
    let reference = bs_analytic::bs_put_price(
        base.initial_price,
        base.strike,
        base.rate,
        base.theta.sqrt(),
        base.horizon(),
    );

    [10, 50, 250]
        .iter()
        .map(|&num_steps| {
            let params = SimulationParameters { num_steps, ..base };
            println!("Running zero vol-of-vol put with {} steps...", num_steps);
            run(&format!("Frozen variance put ({} steps)", num_steps), &params, Some(reference))
        })
        .collect()
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &Path,
) -> Result<()> {
    let mut file = File::create(filename)
        .with_context(|| format!("could not create {}", filename.display()))?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Paths,Steps,Time_ms,Throughput_paths_per_sec,Price,CI_99_7_Half_Width,Reference"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.2},{:.0},{:.6},{:.6},{}",
            result.name,
            result.paths,
            result.steps,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.price,
            result.half_width,
            result
                .reference
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "N/A".to_string()),
        )?;
    }

    Ok(())
}

fn main() -> Result<()> {
    println!("heston-mc Benchmark Suite");
    println!("=========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!();

    let mut results = run_path_ladder()?;
    results.extend(run_step_ladder()?);

    println!("\n{:=<96}", "");
    println!(
        "{:<36} {:>8} {:>6} {:>12} {:>12} {:>10} {:>10} {:>8}",
        "Benchmark", "Paths", "Steps", "Time (ms)", "Paths/sec", "Price", "CI ±", "Ref"
    );
    println!("{:-<96}", "");
    for result in &results {
        println!(
            "{:<36} {:>8} {:>6} {:>12.2} {:>12.0} {:>10.4} {:>10.4} {:>8}",
            result.name,
            result.paths,
            result.steps,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.price,
            result.half_width,
            result
                .reference
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "N/A".to_string()),
        );
    }
    println!("{:=<96}", "");

    fs::create_dir_all("bench")?;
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = Path::new("bench").join(format!("heston_benchmark_{}.csv", timestamp));
    write_results_to_csv(&results, &system_info, &filename)?;

    println!("\nResults saved to: {}", filename.display());
    println!("Run with: cargo run --bin benchmark --release");
    Ok(())
}
