// Save and restore of the complete PMU configuration

use perfmon_raw::current_arch::pmcr::{
    PMCR_CYCLE_COUNTER_RESET, PMCR_ENABLE, PMCR_EVENT_COUNTER_RESET, PMCR_STICKY_FLAGS,
};
use perfmon_raw::current_arch::pmuserenr::UserEnable;
use perfmon_raw::current_arch::PMCNTEN_CYCLE_COUNTER;
use perfmon_raw::{RegisterLayout, RegisterPort};
use serde::{Deserialize, Serialize};

use crate::error::{PmuError, Result};
use crate::pmu::Pmu;

/// PMU configuration captured at one point in time
///
/// Plain data: holding a snapshot has no effect on the PMU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    control: u32,
    enabled: u32,
    user_access: u32,
    event_types: Vec<u32>,
}

impl Snapshot {
    /// PMCR configuration flags
    pub fn control(&self) -> u32 {
        self.control
    }

    /// PMCNTENSET mask, cycle counter bit included
    pub fn enabled_mask(&self) -> u32 {
        self.enabled
    }

    /// PMUSERENR value
    pub fn user_access(&self) -> u32 {
        self.user_access
    }

    /// PMUSERENR decoded
    pub fn user_enable(&self) -> UserEnable {
        UserEnable::from_raw_value(self.user_access)
    }

    /// Raw PMEVTYPER value of every slot, free ones included
    pub fn event_types(&self) -> &[u32] {
        &self.event_types
    }
}

impl<P: RegisterPort> Pmu<P> {
    /// Save the current configuration and enable the PMU for use
    pub fn capture(&mut self) -> Snapshot {
        let control = self.port.pmcr_read() & PMCR_STICKY_FLAGS;
        self.port.pmcr_write(control | PMCR_ENABLE);

        let snapshot = Snapshot {
            control,
            enabled: self.port.pmcntenset_read(),
            user_access: self.port.pmuserenr_read(),
            event_types: self
                .bank
                .indices()
                .map(|n| self.port.pmevtyper_read(n))
                .collect(),
        };

        tracing::info!(
            "Captured PMU context (control 0x{:x}, enabled 0x{:08x}, user access: {})",
            snapshot.control,
            snapshot.enabled,
            snapshot.user_enable().enable
        );

        snapshot
    }

    /// [`capture`](Self::capture), then zero every counter
    pub fn capture_and_reset(&mut self) -> Snapshot {
        let snapshot = self.capture();
        self.reset_all_counts();
        snapshot
    }

    /// Put back a captured configuration
    ///
    /// The enable mask is applied as a set/clear pair, and PMCR goes last so
    /// counting resumes only once the slots are configured.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        if snapshot.event_types.len() != self.bank.num_slots() {
            tracing::warn!(
                "Snapshot holds {} event types but the bank has {} slots",
                snapshot.event_types.len(),
                self.bank.num_slots()
            );
            return Err(PmuError::BadArgument(format!(
                "snapshot of {} slots does not match bank of {}",
                snapshot.event_types.len(),
                self.bank.num_slots()
            )));
        }

        for (n, &raw) in self.bank.indices().zip(snapshot.event_types.iter()) {
            self.port.pmevtyper_write(n, raw);
        }

        self.port.pmcntenset_write(snapshot.enabled);
        self.port.pmcntenclr_write(!snapshot.enabled);
        self.port.pmuserenr_write(snapshot.user_access);
        self.port.pmcr_write(snapshot.control);

        tracing::info!(
            "Restored PMU context (control 0x{:x}, enabled 0x{:08x})",
            snapshot.control,
            snapshot.enabled
        );

        Ok(())
    }

    /// [`restore`](Self::restore), then zero every counter
    pub fn restore_and_reset(&mut self, snapshot: Snapshot) -> Result<()> {
        self.restore(snapshot)?;
        self.reset_all_counts();
        Ok(())
    }

    /// Zero every event counter and the cycle counter
    pub fn reset_all_counts(&mut self) {
        let flags = self.control_flags();
        self.port
            .pmcr_write(flags | PMCR_EVENT_COUNTER_RESET | PMCR_CYCLE_COUNTER_RESET);
    }

    /// Disable every counter, zero them all and turn the PMU off
    pub fn disable_all(&mut self) {
        self.port
            .pmcntenclr_write(self.bank.slot_mask() | PMCNTEN_CYCLE_COUNTER);
        self.reset_all_counts();
        self.disable();

        tracing::info!("Disabled all {} event counters", self.bank.num_slots());
    }
}
