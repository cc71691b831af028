use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::counters::cycle::CycleCounterConfig;
use crate::error::PmuError;

/// Where a chained (64-bit) pair may start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainAlignment {
    /// Any two adjacent free slots
    #[default]
    Any,
    /// Only pairs starting at an even slot, (0, 1), (2, 3), ...
    Even,
}

impl ChainAlignment {
    pub fn name(&self) -> &'static str {
        match self {
            ChainAlignment::Any => "any",
            ChainAlignment::Even => "even",
        }
    }

    /// Step between candidate pair start slots
    pub(crate) fn step(&self) -> usize {
        match self {
            ChainAlignment::Any => 1,
            ChainAlignment::Even => 2,
        }
    }
}

impl FromStr for ChainAlignment {
    type Err = PmuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ChainAlignment::Any),
            "even" => Ok(ChainAlignment::Even),
            other => Err(PmuError::BadArgument(format!(
                "unknown chain alignment '{other}' (expected 'any' or 'even')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmuConfig {
    pub chain_alignment: ChainAlignment,
    /// Cycle counter setup applied when the allocator is created
    pub cycle_counter: Option<CycleCounterConfig>,
}

impl PmuConfig {
    pub const CHAIN_ALIGNMENT_ENV: &'static str = "PERFMON_CHAIN_ALIGNMENT";

    pub fn new(chain_alignment: ChainAlignment) -> Self {
        Self {
            chain_alignment,
            cycle_counter: None,
        }
    }

    pub fn with_cycle_counter(mut self, cycle_counter: CycleCounterConfig) -> Self {
        self.cycle_counter = Some(cycle_counter);
        self
    }

    /// Defaults, overridden by `PERFMON_CHAIN_ALIGNMENT` when it is set
    pub fn from_env() -> Self {
        let chain_alignment = match std::env::var(Self::CHAIN_ALIGNMENT_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {}", Self::CHAIN_ALIGNMENT_ENV, e);
                ChainAlignment::default()
            }),
            Err(_) => ChainAlignment::default(),
        };

        tracing::info!("Chain alignment: {}", chain_alignment.name());

        Self::new(chain_alignment)
    }
}
