//! Correctness harness and tiered performance benchmark for [`bitpack`]
//! rotations.
//!
//! A [`Harness`] owns the bit vector under test and records everything it
//! reports in a [`Transcript`]. It is driven either by a line-oriented test
//! script ([`script`]) or by the Fibonacci-scaled benchmark in [`tiers`].

pub mod config;
pub mod harness;
pub mod report;
pub mod script;
pub mod tiers;

pub use config::{BenchmarkConfig, HarnessConfig, Preset};
pub use harness::Harness;
pub use report::{Entry, Failure, Finding, Location, MismatchKind, Summary, Transcript, Verdict};
pub use script::{Command, CommandError, ScriptError, TestSelection};
pub use tiers::{timed_rotation, SizeLabel, Tier, TierReport, TierSample, TierTable};
