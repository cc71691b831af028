//! Register port: raw read/write primitives for the Performance Monitors
//!
//! Everything above this layer talks to the PMU through [`RegisterPort`], so
//! the same policy code drives real CP15 registers or a simulated register
//! file.

pub type Result<T> = std::result::Result<T, RawError>;

/// Largest number of event counters the architecture allows (PMCR.N is 5 bits,
/// index 31 is reserved for the cycle counter)
pub const MAX_EVENT_COUNTERS: usize = 31;

/// Errors that can occur while building register values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawError {
    #[error("Event counter index {index} out of range (max {max})")]
    CounterOutOfRange { index: usize, max: usize },

    #[error("Value 0x{value:X} sets bits outside {register} mask 0x{mask:X}")]
    ReservedBits {
        register: &'static str,
        value: u32,
        mask: u32,
    },
}

/// Index of one event counter (`PMEVCNTR<n>`/`PMEVTYPER<n>`), always below 31
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CounterIndex(u8);

impl CounterIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < MAX_EVENT_COUNTERS {
            Ok(Self(index as u8))
        } else {
            Err(RawError::CounterOutOfRange {
                index,
                max: MAX_EVENT_COUNTERS - 1,
            })
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Bit for this counter in PMCNTENSET/PMCNTENCLR
    pub fn mask(self) -> u32 {
        1 << self.0
    }
}

impl std::fmt::Display for CounterIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw access to the AArch32 Performance Monitors registers of one core
///
/// Pure I/O: no method applies policy. PMCNTENSET/PMCNTENCLR are
/// one-directional: writing a 1 sets (or clears) the matching enable bit and
/// writing a 0 does nothing. Reading either returns the current enable mask.
pub trait RegisterPort {
    /// PMCR: control register
    fn pmcr_read(&self) -> u32;
    fn pmcr_write(&mut self, value: u32);

    /// PMCNTENSET read: current count-enable mask
    fn pmcntenset_read(&self) -> u32;
    /// PMCNTENSET write: enable every counter whose bit is 1
    fn pmcntenset_write(&mut self, mask: u32);
    /// PMCNTENCLR write: disable every counter whose bit is 1
    fn pmcntenclr_write(&mut self, mask: u32);

    /// PMEVTYPER<n>: event type register
    fn pmevtyper_read(&self, n: CounterIndex) -> u32;
    fn pmevtyper_write(&mut self, n: CounterIndex, value: u32);

    /// PMEVCNTR<n>: event count register
    fn pmevcntr_read(&self, n: CounterIndex) -> u32;
    fn pmevcntr_write(&mut self, n: CounterIndex, value: u32);

    /// PMUSERENR: user-mode access enable
    fn pmuserenr_read(&self) -> u32;
    fn pmuserenr_write(&mut self, value: u32);

    /// PMCEID0/PMCEID1: common event identification bitmaps
    fn pmceid0_read(&self) -> u32;
    fn pmceid1_read(&self) -> u32;

    /// PMCCNTR: dedicated cycle counter
    fn pmccntr_read_32(&self) -> u32;
    fn pmccntr_read_64(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_index_bounds() {
        assert_eq!(CounterIndex::new(30).map(|i| i.get()), Ok(30));
        assert_eq!(
            CounterIndex::new(31),
            Err(RawError::CounterOutOfRange { index: 31, max: 30 })
        );
        assert_eq!(CounterIndex::new(5).map(|i| i.mask()), Ok(1 << 5));
    }

    #[test]
    fn test_raw_error_display() {
        let err = RawError::CounterOutOfRange { index: 40, max: 30 };
        assert!(err.to_string().contains("out of range"));
    }
}
