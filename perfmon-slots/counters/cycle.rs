// Dedicated cycle counter (PMCCNTR)

use perfmon_raw::current_arch::pmcr::{
    PMCR_CYCLE_COUNTER_64_BITS, PMCR_CYCLE_COUNTER_RESET, PMCR_CYCLE_COUNT_EVERY_64,
};
use perfmon_raw::current_arch::PMCNTEN_CYCLE_COUNTER;
use perfmon_raw::RegisterPort;
use serde::{Deserialize, Serialize};

use crate::pmu::Pmu;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleCounterConfig {
    /// Overflow at 64 bits instead of 32 (PMCR.LC)
    pub long: bool,
    /// Count once every 64 cycles (PMCR.D)
    pub divide_by_64: bool,
}

impl<P: RegisterPort> Pmu<P> {
    /// Enable the PMU and the cycle counter, then zero it
    pub fn configure_cycle_counter(&mut self, config: CycleCounterConfig) {
        self.enable();
        self.port.pmcntenset_write(PMCNTEN_CYCLE_COUNTER);

        let mut flags = self.control_flags();
        for (bit, set) in [
            (PMCR_CYCLE_COUNTER_64_BITS, config.long),
            (PMCR_CYCLE_COUNT_EVERY_64, config.divide_by_64),
        ] {
            if set {
                flags |= bit;
            } else {
                flags &= !bit;
            }
        }
        self.port.pmcr_write(flags | PMCR_CYCLE_COUNTER_RESET);

        tracing::debug!(
            "Cycle counter enabled (64-bit: {}, every 64: {})",
            config.long,
            config.divide_by_64
        );
    }

    pub fn disable_cycle_counter(&mut self) {
        self.port.pmcntenclr_write(PMCNTEN_CYCLE_COUNTER);
    }

    pub fn is_cycle_counter_enabled(&self) -> bool {
        self.port.pmcntenset_read() & PMCNTEN_CYCLE_COUNTER != 0
    }

    pub fn reset_cycle_counter(&mut self) {
        let flags = self.control_flags();
        self.port.pmcr_write(flags | PMCR_CYCLE_COUNTER_RESET);
    }

    /// Cycle count, 64 bits wide when PMCR.LC is set and 32 bits otherwise
    pub fn read_cycles(&self) -> u64 {
        if self.control_flags() & PMCR_CYCLE_COUNTER_64_BITS != 0 {
            self.port.pmccntr_read_64()
        } else {
            self.port.pmccntr_read_32() as u64
        }
    }
}
