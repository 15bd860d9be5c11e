use std::time::Duration;

use bitpack::RotationAlgorithm;
use derive_more::Display;

/// Settings for a [`Harness`](crate::Harness).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Echo the bit vector after every command.
    pub verbose: bool,
    pub algorithm: RotationAlgorithm,
}

/// Named time budgets for the tiered benchmark.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Preset {
    #[display("small")]
    Small,
    #[display("medium")]
    Medium,
    #[display("large")]
    Large,
}

impl Preset {
    #[must_use]
    pub fn time_limit(self) -> Duration {
        match self {
            Preset::Small => Duration::from_millis(10),
            Preset::Medium => Duration::from_millis(100),
            Preset::Large => Duration::from_secs(1),
        }
    }
}

/// Settings for [`timed_rotation`](crate::timed_rotation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// A tier passes when its single rotation takes strictly less than this.
    pub time_limit: Duration,
    /// Seed used to fill every tier's workload.
    pub workload_seed: u64,
    /// Number of Fibonacci entries in the tier table; yields `table_size - 3` tiers.
    pub table_size: usize,
}

impl BenchmarkConfig {
    pub const DEFAULT_WORKLOAD_SEED: u64 = 6172;
    pub const DEFAULT_TABLE_SIZE: usize = 53;

    #[must_use]
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_preset(preset: Preset) -> Self {
        Self::with_time_limit(preset.time_limit())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            time_limit: Preset::Medium.time_limit(),
            workload_seed: Self::DEFAULT_WORKLOAD_SEED,
            table_size: Self::DEFAULT_TABLE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_grow() {
        assert!(Preset::Small.time_limit() < Preset::Medium.time_limit());
        assert!(Preset::Medium.time_limit() < Preset::Large.time_limit());
    }

    #[test]
    fn preset_keeps_other_defaults() {
        let config = BenchmarkConfig::with_preset(Preset::Large);
        assert_eq!(config.time_limit, Duration::from_secs(1));
        assert_eq!(config.workload_seed, 6172);
        assert_eq!(config.table_size, 53);
    }
}
