use perfmon_raw::current_arch::pmcr::{self, Pmcr, PMCR_ENABLE, PMCR_STICKY_FLAGS};
use perfmon_raw::{RegisterLayout, RegisterPort};

use crate::common::{Capabilities, CounterBank};
use crate::config::PmuConfig;
use crate::error::Result;

/// Counter-slot allocator for the Performance Monitors of one core
///
/// The count-enable and event-type registers are the only record of which
/// event lives in which slot; nothing is shadowed in memory, so the allocator
/// also sees slots configured by a previous owner of the PMU.
#[derive(Debug)]
pub struct Pmu<P: RegisterPort> {
    pub(crate) port: P,
    pub(crate) bank: CounterBank,
    pub(crate) caps: Capabilities,
    pub(crate) config: PmuConfig,
}

impl<P: RegisterPort> Pmu<P> {
    pub fn new(port: P) -> Self {
        Self::with_config(port, PmuConfig::default())
    }

    pub fn with_config(port: P, config: PmuConfig) -> Self {
        let bank = CounterBank::discover(&port);
        let caps = Capabilities::read(&port);

        let id = Pmcr::from_raw_value(port.pmcr_read());
        tracing::info!(
            "PMU implementer 0x{:02x}, id code 0x{:02x}",
            id.implementer,
            id.idcode
        );
        tracing::info!(
            "PMU has {} event counters, {} common events available, chain alignment: {}",
            bank.num_slots(),
            caps.available_events().count(),
            config.chain_alignment.name()
        );

        let mut pmu = Self {
            port,
            bank,
            caps,
            config,
        };

        if let Some(cycle_counter) = config.cycle_counter {
            pmu.configure_cycle_counter(cycle_counter);
        }

        pmu
    }

    pub fn config(&self) -> &PmuConfig {
        &self.config
    }

    pub fn num_slots(&self) -> usize {
        self.bank.num_slots()
    }

    pub fn bank(&self) -> &CounterBank {
        &self.bank
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Check if the event is implemented by this PMU
    pub fn is_event_available(&self, event: u16) -> bool {
        self.caps.is_event_available(event)
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Direct register access, bypassing the slot bookkeeping
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// PMCR configuration flags currently set
    pub fn control_flags(&self) -> u32 {
        self.port.pmcr_read() & PMCR_STICKY_FLAGS
    }

    /// Set PMCR flags, keeping the others as they are
    ///
    /// Fails with `PmuError::Raw` if `flags` includes a bit software cannot write.
    pub fn set_control_flags(&mut self, flags: u32) -> Result<()> {
        pmcr::check_writable(flags)?;
        let current = self.control_flags();
        self.port.pmcr_write(current | flags);
        Ok(())
    }

    /// Clear PMCR flags, keeping the others as they are
    pub fn clear_control_flags(&mut self, flags: u32) -> Result<()> {
        pmcr::check_writable(flags)?;
        let current = self.control_flags();
        self.port.pmcr_write(current & !flags);
        Ok(())
    }

    /// Enable event counting (PMCR.E)
    pub fn enable(&mut self) {
        let current = self.control_flags();
        self.port.pmcr_write(current | PMCR_ENABLE);
    }

    /// Disable event counting (PMCR.E)
    pub fn disable(&mut self) {
        let current = self.control_flags();
        self.port.pmcr_write(current & !PMCR_ENABLE);
    }

    pub fn is_enabled(&self) -> bool {
        self.control_flags() & PMCR_ENABLE != 0
    }
}
