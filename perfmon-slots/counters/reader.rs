// Counter values of watched events

use perfmon_raw::RegisterPort;

use crate::error::{PmuError, Result};
use crate::pmu::Pmu;

impl<P: RegisterPort> Pmu<P> {
    /// Count of `event`, combining a chained pair into one 64-bit value
    pub fn read(&self, event: u16) -> Result<u64> {
        let slot = self.watched_slot(event)?;
        let low = self.port.pmevcntr_read(slot) as u64;

        let high = match self.continuation_of(slot) {
            Some(next) => self.port.pmevcntr_read(next) as u64,
            None => 0,
        };

        Ok(low | (high << 32))
    }

    /// Low 32 bits of the count of `event`, skipping the chain check
    pub fn read_fast(&self, event: u16) -> Result<u32> {
        let slot = self.watched_slot(event)?;
        Ok(self.port.pmevcntr_read(slot))
    }

    /// Store the count of `event` into `value`
    pub fn read_into(&self, event: u16, value: Option<&mut u64>) -> Result<()> {
        let count = self.read(event)?;
        let value = value.ok_or_else(|| {
            PmuError::BadArgument(format!("no output location for event 0x{event:02X}"))
        })?;
        *value = count;
        Ok(())
    }
}
