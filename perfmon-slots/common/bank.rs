use perfmon_raw::current_arch::pmcr;
use perfmon_raw::{CounterIndex, RegisterPort, MAX_EVENT_COUNTERS};

/// The event counters implemented by one core, discovered once from PMCR.N
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterBank {
    num_slots: usize,
}

impl CounterBank {
    pub fn discover<P: RegisterPort>(port: &P) -> Self {
        let num_slots = pmcr::num_counters(port.pmcr_read()).min(MAX_EVENT_COUNTERS);
        Self { num_slots }
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Index of slot `n`, if the bank has one
    pub fn index(&self, n: usize) -> Option<CounterIndex> {
        if n < self.num_slots {
            CounterIndex::new(n).ok()
        } else {
            None
        }
    }

    /// Slot following `n`, if it is still inside the bank
    pub fn next(&self, n: CounterIndex) -> Option<CounterIndex> {
        self.index(n.get() + 1)
    }

    pub fn indices(&self) -> impl Iterator<Item = CounterIndex> + '_ {
        (0..self.num_slots).filter_map(|n| self.index(n))
    }

    /// PMCNTEN bits of every slot in the bank (the cycle counter excluded)
    pub fn slot_mask(&self) -> u32 {
        if self.num_slots == 0 {
            0
        } else {
            u32::MAX >> (32 - self.num_slots)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfmon_raw::SimulatedPmu;

    #[test]
    fn test_discover_slot_count() {
        let bank = CounterBank::discover(&SimulatedPmu::cortex_a53());
        assert_eq!(bank.num_slots(), 6);
        assert_eq!(bank.slot_mask(), 0b11_1111);
        assert_eq!(bank.indices().count(), 6);
        assert!(bank.index(6).is_none());
    }

    #[test]
    fn test_next_stays_in_bank() {
        let bank = CounterBank::discover(&SimulatedPmu::new(2));
        let first = bank.index(0).unwrap();
        let second = bank.next(first).unwrap();
        assert_eq!(second.get(), 1);
        assert!(bank.next(second).is_none());
    }

    #[test]
    fn test_empty_and_full_banks() {
        assert_eq!(CounterBank::discover(&SimulatedPmu::new(0)).slot_mask(), 0);
        assert_eq!(
            CounterBank::discover(&SimulatedPmu::new(31)).slot_mask(),
            0x7FFF_FFFF
        );
    }
}
