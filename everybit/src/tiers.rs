//! Tiered rotation benchmark.
//!
//! Tier `t` takes four consecutive Fibonacci numbers as
//! `(offset, amount, length, size)`: a random vector of `size` bits is
//! rotated once over `[offset, offset + length)` by `amount`. Tiers grow
//! geometrically, and the scan stops at the first tier whose single timed
//! rotation does not finish under the time limit.

use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use derive_more::Display;
use tracing::{info, warn};

use crate::config::BenchmarkConfig;
use crate::Harness;

/// One benchmark workload. Always `size > length > amount > offset` and
/// `size > offset + length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub index: usize,
    pub offset: usize,
    pub amount: isize,
    pub length: usize,
    pub size: usize,
}

impl Tier {
    #[must_use]
    pub fn label(&self) -> SizeLabel {
        SizeLabel::of_bits(self.length)
    }
}

/// Validated tier parameters derived from an increasing sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Builds tiers from `sequence`, one per window of four entries.
    ///
    /// # Panics
    ///
    /// Panics if any window violates the tier ordering.
    #[must_use]
    pub fn from_sequence(sequence: &[usize]) -> Self {
        let tiers = sequence
            .windows(4)
            .enumerate()
            .map(|(index, window)| {
                let [offset, amount, length, size] = [window[0], window[1], window[2], window[3]];
                assert!(
                    size > length && length > amount && amount > offset,
                    "tier {index} is not ordered: offset {offset}, amount {amount}, length {length}, size {size}"
                );
                assert!(
                    offset.checked_add(length).is_some_and(|end| end < size),
                    "tier {index} rotates past its vector: offset {offset}, length {length}, size {size}"
                );
                let Ok(amount) = isize::try_from(amount) else {
                    panic!("tier {index} amount {amount} does not fit a signed rotation");
                };
                Tier {
                    index,
                    offset,
                    amount,
                    length,
                    size,
                }
            })
            .collect();
        Self { tiers }
    }

    /// Tiers from the Fibonacci numbers `1, 2, 3, 5, 8, ...`, taking the
    /// first `entry_count` of them that fit a `usize`.
    #[must_use]
    pub fn fibonacci(entry_count: usize) -> Self {
        let mut sequence = Vec::with_capacity(entry_count);
        let (mut current, mut next) = (1usize, 2usize);
        while sequence.len() < entry_count {
            sequence.push(current);
            let Some(after) = current.checked_add(next) else {
                sequence.push(next);
                break;
            };
            (current, next) = (next, after);
        }
        sequence.truncate(entry_count);
        Self::from_sequence(&sequence)
    }

    /// The default table, built once.
    pub fn standard() -> &'static TierTable {
        static TABLE: OnceLock<TierTable> = OnceLock::new();
        TABLE.get_or_init(|| TierTable::fibonacci(BenchmarkConfig::DEFAULT_TABLE_SIZE))
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SizeUnit {
    B,
    KB,
    MB,
    GB,
}

/// Human-readable byte size of a bit length, rounded down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[display("{amount}{unit}")]
pub struct SizeLabel {
    pub amount: u64,
    pub unit: SizeUnit,
}

impl SizeLabel {
    #[must_use]
    pub fn of_bits(bit_length: usize) -> Self {
        const KIB: u64 = 1024;
        let bits = bit_length as u64;
        let (divisor, unit) = if bits < 8 * KIB {
            (8, SizeUnit::B)
        } else if bits < 8 * KIB * KIB {
            (8 * KIB, SizeUnit::KB)
        } else if bits < 8 * KIB * KIB * KIB {
            (8 * KIB * KIB, SizeUnit::MB)
        } else {
            (8 * KIB * KIB * KIB, SizeUnit::GB)
        };
        Self {
            amount: bits / divisor,
            unit,
        }
    }
}

/// The single timing taken for one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierSample {
    pub tier: Tier,
    pub elapsed: Duration,
    pub time_limit: Duration,
}

impl TierSample {
    #[must_use]
    pub fn within_limit(&self) -> bool {
        self.elapsed < self.time_limit
    }
}

impl fmt::Display for TierSample {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = self.elapsed.as_secs_f64();
        if self.within_limit() {
            write!(formatter, "Tier {} (≈{}) completed in {elapsed:.6}s", self.tier.index, self.tier.label())
        } else {
            write!(
                formatter,
                "Tier {} (≈{}) exceeded {:.2}s cutoff with time {elapsed:.6}s",
                self.tier.index,
                self.tier.label(),
                self.time_limit.as_secs_f64()
            )
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TierReport {
    pub samples: Vec<TierSample>,
    /// Index of the last tier that finished under the limit; `None` when
    /// even the first tier did not.
    pub last_completed: Option<usize>,
}

impl TierReport {
    /// Final line of a benchmark run; `-1` when no tier completed.
    #[must_use]
    pub fn completion_line(&self) -> String {
        // Spelling matches what the grading scripts scan stdout for.
        match self.last_completed {
            Some(tier) => format!("Succesfully completed tier: {tier}"),
            None => "Succesfully completed tier: -1".to_owned(),
        }
    }
}

/// Runs the tier scan, timing each tier with `measure`.
///
/// `measure` receives the harness holding the tier's freshly built workload
/// and returns how long that tier took. Each tier is measured once. The
/// scan ends at the first tier not under the limit, at the end of the table,
/// or when a workload cannot be allocated.
pub fn run_tiers_with<Measure>(
    harness: &mut Harness,
    table: &TierTable,
    config: &BenchmarkConfig,
    mut measure: Measure,
) -> TierReport
where
    Measure: FnMut(&mut Harness, &Tier) -> Duration,
{
    harness.set_verbose(false);
    let mut report = TierReport::default();
    for tier in table.tiers() {
        if let Err(error) = harness.construct_random(tier.size, config.workload_seed) {
            warn!(tier = tier.index, %error, "could not build tier workload");
            break;
        }
        let sample = TierSample {
            tier: *tier,
            elapsed: measure(harness, tier),
            time_limit: config.time_limit,
        };
        info!(
            tier = tier.index,
            label = %tier.label(),
            elapsed_s = sample.elapsed.as_secs_f64(),
            within_limit = sample.within_limit(),
            "measured tier"
        );
        report.samples.push(sample);
        if !sample.within_limit() {
            break;
        }
        report.last_completed = Some(tier.index);
    }
    harness.release();
    report
}

/// Times one rotation per tier of the configured Fibonacci table and
/// reports the largest tier completed under `config.time_limit`.
pub fn timed_rotation(harness: &mut Harness, config: &BenchmarkConfig) -> TierReport {
    let owned;
    let table = if config.table_size == BenchmarkConfig::DEFAULT_TABLE_SIZE {
        TierTable::standard()
    } else {
        owned = TierTable::fibonacci(config.table_size);
        &owned
    };
    run_tiers_with(harness, table, config, |harness, tier| {
        let start = Instant::now();
        harness.rotate(tier.offset, tier.length, tier.amount);
        start.elapsed()
    })
}
