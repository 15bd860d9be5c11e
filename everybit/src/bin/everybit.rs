//! `everybit` – run rotation test scripts and the tiered rotation benchmark.
//!
//! ## Usage
//!
//! ```bash
//! # Run every test in a script
//! everybit -t tests/data/rotations.txt
//!
//! # Run only test 3
//! everybit -t tests/data/rotations.txt -n 3
//!
//! # Find the largest tier rotated in under 0.01s / 0.1s / 1s
//! everybit -s
//! everybit -m
//! everybit -l
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, ensure, Result};
use bitpack::RotationAlgorithm;
use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use everybit::{timed_rotation, BenchmarkConfig, Entry, Harness, HarnessConfig, Preset, TestSelection};

/// Rotation test harness and tiered benchmark.
#[derive(Parser, Debug)]
#[command(name = "everybit")]
#[command(about = "Run bit-rotation test scripts and the tiered rotation benchmark")]
struct Args {
    /// Test script to run.
    #[arg(short = 't', long)]
    test_file: Option<PathBuf>,

    /// Run only the test with this id (default: every test).
    #[arg(short = 'n', long = "test", requires = "test_file")]
    test: Option<u64>,

    /// Benchmark with the small time limit (0.01s).
    #[arg(short = 's', group = "preset")]
    small: bool,

    /// Benchmark with the medium time limit (0.1s).
    #[arg(short = 'm', group = "preset")]
    medium: bool,

    /// Benchmark with the large time limit (1s).
    #[arg(short = 'l', group = "preset")]
    large: bool,

    /// Benchmark with a custom time limit, in seconds.
    #[arg(long, group = "preset")]
    time_limit: Option<f64>,

    /// Rotation algorithm (reversal, juggling or stepwise).
    #[arg(long, default_value_t = RotationAlgorithm::default())]
    algorithm: RotationAlgorithm,

    /// Seed for every benchmark workload.
    #[arg(long, default_value_t = BenchmarkConfig::DEFAULT_WORKLOAD_SEED)]
    seed: u64,

    /// Echo the bit vector after every command and log debug output.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn benchmark_config(&self) -> Result<Option<BenchmarkConfig>> {
        let time_limit = if let Some(seconds) = self.time_limit {
            ensure!(seconds.is_finite() && seconds > 0.0, "--time-limit must be a positive number of seconds");
            Duration::from_secs_f64(seconds)
        } else if self.small {
            Preset::Small.time_limit()
        } else if self.medium {
            Preset::Medium.time_limit()
        } else if self.large {
            Preset::Large.time_limit()
        } else {
            return Ok(None);
        };
        Ok(Some(BenchmarkConfig {
            time_limit,
            workload_seed: self.seed,
            ..BenchmarkConfig::default()
        }))
    }
}

fn print_entry(entry: &Entry) {
    match entry {
        Entry::Echo(text) => println!("{text}"),
        other => eprintln!("{other}"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let benchmark = args.benchmark_config()?;
    if args.test_file.is_none() && benchmark.is_none() {
        Args::command().print_help()?;
        return Ok(());
    }

    let mut harness = Harness::new(&HarnessConfig {
        verbose: args.verbose,
        algorithm: args.algorithm,
    });
    harness.report_to(print_entry);

    let mut failed = 0;
    if let Some(path) = &args.test_file {
        eprintln!("Testing file {}.", path.display());
        let summary = harness.run_script_file(path, TestSelection::from(args.test))?;
        eprintln!("Done testing file {}.", path.display());
        eprintln!("{summary}");
        failed = summary.failed;
    }

    if let Some(config) = benchmark {
        let report = timed_rotation(&mut harness, &config);
        for sample in &report.samples {
            println!("{sample}");
        }
        println!("{}", report.completion_line());
    }

    if failed > 0 {
        bail!("{failed} test expectation(s) failed");
    }
    Ok(())
}
