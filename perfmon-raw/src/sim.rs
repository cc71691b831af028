//! Simulated Performance Monitors register file
//!
//! Behaves like the hardware where the policy layer can observe a difference:
//! - PMCNTENSET/PMCNTENCLR only ever set or clear the bits written as 1
//! - PMCR.P and PMCR.C zero the counters and always read back as 0
//! - PMCR.N, IDCODE and IMP are read-only
//! - registers of unimplemented counters read as zero and ignore writes
//! - an enabled `CHAIN` counter receives the overflow of the counter below it

use crate::arch::cortex_a53::events::{CHAIN, CORTEX_A53_PMCEID0, CORTEX_A53_PMCEID1};
use crate::arch::cortex_a53::pmcr::{
    PMCR_CYCLE_COUNTER_RESET, PMCR_ENABLE, PMCR_EVENT_COUNTER_RESET, PMCR_N_MASK, PMCR_N_SHIFT,
    PMCR_STICKY_FLAGS,
};
use crate::arch::cortex_a53::pmevtyper::event_of;
use crate::arch::cortex_a53::{CORTEX_A53_EVENT_COUNTERS, PMCNTEN_CYCLE_COUNTER};
use crate::port::{CounterIndex, RegisterPort, MAX_EVENT_COUNTERS};

/// PMCR identification bits of a Cortex-A53 (IMP = 'A', IDCODE = 0x03)
const CORTEX_A53_PMCR_ID: u32 = 0x4103_0000;

#[derive(Debug, Clone)]
pub struct SimulatedPmu {
    num_counters: usize,
    control: u32,
    enabled: u32,
    event_types: [u32; MAX_EVENT_COUNTERS],
    counts: [u32; MAX_EVENT_COUNTERS],
    user_access: u32,
    pmceid0: u32,
    pmceid1: u32,
    cycles: u64,
}

impl SimulatedPmu {
    /// Register file with `num_counters` event counters and the Cortex-A53 event set
    pub fn new(num_counters: usize) -> Self {
        Self {
            num_counters: num_counters.min(MAX_EVENT_COUNTERS),
            control: 0,
            enabled: 0,
            event_types: [0; MAX_EVENT_COUNTERS],
            counts: [0; MAX_EVENT_COUNTERS],
            user_access: 0,
            pmceid0: CORTEX_A53_PMCEID0,
            pmceid1: CORTEX_A53_PMCEID1,
            cycles: 0,
        }
    }

    pub fn cortex_a53() -> Self {
        Self::new(CORTEX_A53_EVENT_COUNTERS)
    }

    /// Replace the PMCEID0/PMCEID1 capability bitmaps
    pub fn with_capabilities(mut self, pmceid0: u32, pmceid1: u32) -> Self {
        self.pmceid0 = pmceid0;
        self.pmceid1 = pmceid1;
        self
    }

    pub fn num_counters(&self) -> usize {
        self.num_counters
    }

    fn implemented_mask(&self) -> u32 {
        let counters = if self.num_counters == 0 {
            0
        } else {
            u32::MAX >> (32 - self.num_counters)
        };
        counters | PMCNTEN_CYCLE_COUNTER
    }

    fn implemented(&self, n: usize) -> bool {
        n < self.num_counters
    }

    /// Raw count of counter `n`, bypassing any allocator bookkeeping
    pub fn count(&self, n: usize) -> u32 {
        if self.implemented(n) {
            self.counts[n]
        } else {
            0
        }
    }

    pub fn set_count(&mut self, n: usize, value: u32) {
        if self.implemented(n) {
            self.counts[n] = value;
        }
    }

    pub fn event_type(&self, n: usize) -> u32 {
        if self.implemented(n) {
            self.event_types[n]
        } else {
            0
        }
    }

    pub fn set_event_type(&mut self, n: usize, raw: u32) {
        if self.implemented(n) {
            self.event_types[n] = raw;
        }
    }

    pub fn enabled_mask(&self) -> u32 {
        self.enabled
    }

    pub fn is_enabled(&self, n: usize) -> bool {
        self.implemented(n) && self.enabled & (1 << n) != 0
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn set_cycles(&mut self, value: u64) {
        self.cycles = value;
    }

    fn counting(&self, n: usize) -> bool {
        self.control & PMCR_ENABLE != 0 && self.is_enabled(n)
    }

    /// Let counter `n` observe `delta` events, as the hardware would
    ///
    /// Nothing is counted unless PMCR.E and the counter's enable bit are set.
    /// Overflows carry into counter `n + 1` when it is counting `CHAIN`.
    pub fn advance(&mut self, n: usize, delta: u64) {
        if !self.counting(n) {
            return;
        }

        let total = self.counts[n] as u64 + delta;
        self.counts[n] = total as u32;

        let carry = total >> 32;
        let next = n + 1;
        if carry != 0 && self.counting(next) && event_of(self.event_types[next]) == CHAIN {
            self.counts[next] = self.counts[next].wrapping_add(carry as u32);
        }
    }

    /// Let the cycle counter observe `delta` cycles
    pub fn advance_cycles(&mut self, delta: u64) {
        if self.control & PMCR_ENABLE != 0 && self.enabled & PMCNTEN_CYCLE_COUNTER != 0 {
            self.cycles = self.cycles.wrapping_add(delta);
        }
    }
}

impl Default for SimulatedPmu {
    fn default() -> Self {
        Self::cortex_a53()
    }
}

impl RegisterPort for SimulatedPmu {
    fn pmcr_read(&self) -> u32 {
        (self.control & PMCR_STICKY_FLAGS)
            | (((self.num_counters as u32) << PMCR_N_SHIFT) & PMCR_N_MASK)
            | CORTEX_A53_PMCR_ID
    }

    fn pmcr_write(&mut self, value: u32) {
        tracing::trace!("PMCR write 0x{:08x}", value);

        if value & PMCR_EVENT_COUNTER_RESET != 0 {
            self.counts = [0; MAX_EVENT_COUNTERS];
        }
        if value & PMCR_CYCLE_COUNTER_RESET != 0 {
            self.cycles = 0;
        }
        self.control = value & PMCR_STICKY_FLAGS;
    }

    fn pmcntenset_read(&self) -> u32 {
        self.enabled
    }

    fn pmcntenset_write(&mut self, mask: u32) {
        self.enabled |= mask & self.implemented_mask();
    }

    fn pmcntenclr_write(&mut self, mask: u32) {
        self.enabled &= !(mask & self.implemented_mask());
    }

    fn pmevtyper_read(&self, n: CounterIndex) -> u32 {
        if self.implemented(n.get()) {
            self.event_types[n.get()]
        } else {
            0
        }
    }

    fn pmevtyper_write(&mut self, n: CounterIndex, value: u32) {
        self.set_event_type(n.get(), value);
    }

    fn pmevcntr_read(&self, n: CounterIndex) -> u32 {
        if self.implemented(n.get()) {
            self.counts[n.get()]
        } else {
            0
        }
    }

    fn pmevcntr_write(&mut self, n: CounterIndex, value: u32) {
        self.set_count(n.get(), value);
    }

    fn pmuserenr_read(&self) -> u32 {
        self.user_access
    }

    fn pmuserenr_write(&mut self, value: u32) {
        self.user_access = value & 0xF;
    }

    fn pmceid0_read(&self) -> u32 {
        self.pmceid0
    }

    fn pmceid1_read(&self) -> u32 {
        self.pmceid1
    }

    fn pmccntr_read_32(&self) -> u32 {
        self.cycles as u32
    }

    fn pmccntr_read_64(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::cortex_a53::pmcr::num_counters;

    fn idx(n: usize) -> CounterIndex {
        CounterIndex::new(n).unwrap()
    }

    #[test]
    fn test_enable_registers_are_one_directional() {
        let mut sim = SimulatedPmu::cortex_a53();
        sim.pmcntenset_write(0b101);
        sim.pmcntenset_write(0);
        assert_eq!(sim.pmcntenset_read(), 0b101);

        sim.pmcntenclr_write(0);
        assert_eq!(sim.pmcntenset_read(), 0b101);

        sim.pmcntenclr_write(0b001);
        assert_eq!(sim.pmcntenset_read(), 0b100);
    }

    #[test]
    fn test_unimplemented_counters_ignore_writes() {
        let mut sim = SimulatedPmu::new(2);
        sim.pmcntenset_write(0b111);
        assert_eq!(sim.pmcntenset_read(), 0b011);

        sim.pmevcntr_write(idx(4), 7);
        assert_eq!(sim.pmevcntr_read(idx(4)), 0);
    }

    #[test]
    fn test_inspection_past_the_bank() {
        let mut sim = SimulatedPmu::cortex_a53();
        sim.pmcntenset_write(u32::MAX);

        assert!(sim.is_enabled(5));
        assert!(!sim.is_enabled(6));
        assert!(!sim.is_enabled(31));
        assert!(!sim.is_enabled(40));
        assert_eq!(sim.count(31), 0);
        assert_eq!(sim.event_type(31), 0);
        assert_eq!(sim.count(64), 0);
        assert_eq!(sim.event_type(64), 0);
    }

    #[test]
    fn test_pmcr_reset_bits_zero_counters() {
        let mut sim = SimulatedPmu::cortex_a53();
        sim.set_count(3, 99);
        sim.set_cycles(1234);

        sim.pmcr_write(PMCR_ENABLE | PMCR_EVENT_COUNTER_RESET);
        assert_eq!(sim.count(3), 0);
        assert_eq!(sim.cycles(), 1234);
        assert_eq!(sim.pmcr_read() & PMCR_EVENT_COUNTER_RESET, 0);

        sim.pmcr_write(PMCR_CYCLE_COUNTER_RESET);
        assert_eq!(sim.cycles(), 0);
        assert_eq!(num_counters(sim.pmcr_read()), 6);
    }

    #[test]
    fn test_advance_carries_into_chain_counter() {
        let mut sim = SimulatedPmu::cortex_a53();
        sim.pmcr_write(PMCR_ENABLE);
        sim.set_event_type(2, CHAIN as u32);
        sim.pmcntenset_write(0b110);
        sim.set_count(1, u32::MAX);

        sim.advance(1, 2);
        assert_eq!(sim.count(1), 1);
        assert_eq!(sim.count(2), 1);
    }

    #[test]
    fn test_advance_requires_enable() {
        let mut sim = SimulatedPmu::cortex_a53();
        sim.pmcntenset_write(0b1);
        sim.advance(0, 5);
        assert_eq!(sim.count(0), 0);

        sim.pmcr_write(PMCR_ENABLE);
        sim.advance(0, 5);
        assert_eq!(sim.count(0), 5);
    }
}
