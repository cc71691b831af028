// Slot allocation: binding events to event counters

use perfmon_raw::current_arch::events::CHAIN;
use perfmon_raw::current_arch::pmevtyper::{self, EventType};
use perfmon_raw::{CounterIndex, RegisterLayout, RegisterPort};

use crate::error::{PmuError, Result};
use crate::pmu::Pmu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Primary,
    /// High half of a chained pair, counting overflows of the slot below
    ChainContinuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Bound { event: u16, role: SlotRole },
}

impl<P: RegisterPort> Pmu<P> {
    fn enabled_mask(&self) -> u32 {
        self.port.pmcntenset_read() & self.bank.slot_mask()
    }

    fn slot_event(&self, n: CounterIndex) -> u16 {
        pmevtyper::event_of(self.port.pmevtyper_read(n))
    }

    /// Slot `n + 1` if it is bound as the continuation of slot `n`
    pub(crate) fn continuation_of(&self, n: CounterIndex) -> Option<CounterIndex> {
        let next = self.bank.next(n)?;
        let enabled = self.enabled_mask() & next.mask() != 0;
        (enabled && self.slot_event(next) == CHAIN).then_some(next)
    }

    /// Lowest enabled slot counting `event`
    pub fn find_slot(&self, event: u16) -> Option<CounterIndex> {
        if event == CHAIN {
            return None;
        }

        let enabled = self.enabled_mask();
        self.bank
            .indices()
            .find(|n| enabled & n.mask() != 0 && self.slot_event(*n) == event)
    }

    pub(crate) fn watched_slot(&self, event: u16) -> Result<CounterIndex> {
        self.find_slot(event)
            .ok_or(PmuError::EventNotWatched { event })
    }

    pub fn slot_state(&self, n: usize) -> Option<SlotState> {
        let index = self.bank.index(n)?;

        if self.enabled_mask() & index.mask() == 0 {
            return Some(SlotState::Free);
        }

        let event = self.slot_event(index);
        if event != CHAIN {
            return Some(SlotState::Bound {
                event,
                role: SlotRole::Primary,
            });
        }

        // Report the logical event of the pair, taken from the slot below
        let primary = n
            .checked_sub(1)
            .and_then(|below| self.bank.index(below))
            .filter(|below| self.enabled_mask() & below.mask() != 0)
            .map(|below| self.slot_event(below))
            .unwrap_or(CHAIN);

        Some(SlotState::Bound {
            event: primary,
            role: SlotRole::ChainContinuation,
        })
    }

    pub fn slots(&self) -> Vec<SlotState> {
        (0..self.bank.num_slots())
            .filter_map(|n| self.slot_state(n))
            .collect()
    }

    /// Check if the event is counted by a chained pair
    pub fn is_wide(&self, event: u16) -> Result<bool> {
        let slot = self.watched_slot(event)?;
        Ok(self.continuation_of(slot).is_some())
    }

    /// First-fit search for a free slot, or a free adjacent pair when `wide`
    fn find_open(&self, wide: bool) -> Option<CounterIndex> {
        let enabled = self.enabled_mask();
        let width = if wide { 2 } else { 1 };
        let step = if wide {
            self.config.chain_alignment.step()
        } else {
            1
        };

        (0..self.bank.num_slots())
            .step_by(step)
            .find(|&start| {
                start + width <= self.bank.num_slots()
                    && (start..start + width).all(|n| enabled & (1 << n) == 0)
            })
            .and_then(|start| self.bank.index(start))
    }

    /// Program the event type and zero the count
    ///
    /// The whole register is rewritten, so mode filters left behind by a
    /// previous owner are cleared.
    fn program(&mut self, n: CounterIndex, event: u16) {
        let event_type = EventType {
            event,
            ..Default::default()
        };
        self.port.pmevtyper_write(n, event_type.to_raw_value());
        self.port.pmevcntr_write(n, 0);
    }

    /// Start counting `event` in the lowest free slot
    ///
    /// With `wide`, the event gets a chained pair of slots and reads as a
    /// 64-bit value. Returns the primary slot.
    pub fn add(&mut self, event: u16, wide: bool) -> Result<CounterIndex> {
        if event == CHAIN {
            return Err(PmuError::BadArgument(
                "the chain marker cannot be watched directly".to_string(),
            ));
        }

        if !self.is_event_available(event) {
            return Err(PmuError::EventUnavailable { event });
        }

        if let Some(slot) = self.find_slot(event) {
            return Err(PmuError::AlreadyWatched { event, slot });
        }

        let slot = self
            .find_open(wide)
            .ok_or(PmuError::NoOpenSlot { event, wide })?;

        self.program(slot, event);
        let mut mask = slot.mask();

        if wide {
            let next = self
                .bank
                .next(slot)
                .ok_or(PmuError::NoOpenSlot { event, wide })?;
            self.program(next, CHAIN);
            mask |= next.mask();
        }

        self.port.pmcntenset_write(mask);

        tracing::debug!(
            "Bound event 0x{:02x} to slot {}{}",
            event,
            slot,
            if wide { " (chained)" } else { "" }
        );

        Ok(slot)
    }

    /// Stop counting `event`, releasing its slot (and chained slot)
    ///
    /// Counts are left in place so a final value can still be read from the
    /// registers.
    pub fn remove(&mut self, event: u16) -> Result<()> {
        let slot = self.watched_slot(event)?;

        let mut mask = slot.mask();
        if let Some(next) = self.continuation_of(slot) {
            mask |= next.mask();
        }

        self.port.pmcntenclr_write(mask);

        tracing::debug!("Released event 0x{:02x} from slot {}", event, slot);

        Ok(())
    }

    /// Zero the count of `event`
    pub fn reset(&mut self, event: u16) -> Result<()> {
        let slot = self.watched_slot(event)?;

        if let Some(next) = self.continuation_of(slot) {
            self.port.pmevcntr_write(next, 0);
        }
        self.port.pmevcntr_write(slot, 0);

        tracing::debug!("Reset event 0x{:02x} in slot {}", event, slot);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChainAlignment, PmuConfig};
    use crate::events::ArchEvent;
    use crate::test_support;
    use perfmon_raw::SimulatedPmu;

    const INST: u16 = 0x08;
    const CYCLES: u16 = 0x11;
    const L1D: u16 = 0x04;
    const L1D_REFILL: u16 = 0x03;

    #[test]
    fn test_add_binds_lowest_slot() {
        let mut pmu = test_support::cortex_a53();

        assert_eq!(pmu.add(INST, false).unwrap().get(), 0);
        assert_eq!(pmu.add(CYCLES, false).unwrap().get(), 1);

        assert_eq!(pmu.find_slot(INST).map(|s| s.get()), Some(0));
        assert_eq!(pmu.port().enabled_mask(), 0b11);
        assert_eq!(pmu.port().event_type(1), CYCLES as u32);
    }

    #[test]
    fn test_add_rejects_unavailable_event() {
        let mut pmu = test_support::cortex_a53();

        assert_eq!(
            pmu.add(0x1B, false),
            Err(PmuError::EventUnavailable { event: 0x1B })
        );
        assert_eq!(
            pmu.add(0x80, true),
            Err(PmuError::EventUnavailable { event: 0x80 })
        );
        assert_eq!(pmu.port().enabled_mask(), 0);
    }

    #[test]
    fn test_no_double_binding() {
        let mut pmu = test_support::cortex_a53();
        let slot = pmu.add(INST, false).unwrap();

        assert_eq!(
            pmu.add(INST, true),
            Err(PmuError::AlreadyWatched { event: INST, slot })
        );
        assert_eq!(pmu.port().enabled_mask(), 0b1);

        pmu.remove(INST).unwrap();
        assert!(pmu.add(INST, true).is_ok());
    }

    #[test]
    fn test_chain_marker_is_not_an_event() {
        let mut pmu = test_support::cortex_a53();
        assert!(matches!(
            pmu.add(ArchEvent::Chain.code(), false),
            Err(PmuError::BadArgument(_))
        ));

        pmu.add(INST, true).unwrap();
        assert_eq!(pmu.find_slot(CHAIN), None);
    }

    #[test]
    fn test_add_resets_count() {
        let mut pmu = test_support::cortex_a53();
        pmu.port_mut().set_count(0, 500);
        pmu.port_mut().set_count(1, 600);

        pmu.add(INST, true).unwrap();
        assert_eq!(pmu.port().count(0), 0);
        assert_eq!(pmu.port().count(1), 0);
    }

    #[test]
    fn test_add_clears_leftover_filters() {
        let mut pmu = test_support::cortex_a53();
        let excluded = EventType {
            event: 0x3FF,
            exclude_user: true,
            exclude_privileged: true,
            ..Default::default()
        };
        pmu.port_mut().set_event_type(0, excluded.to_raw_value());
        pmu.port_mut().set_event_type(1, 0xC000_0000);
        pmu.port_mut().set_event_type(2, 0x1000_0000 | CHAIN as u32);

        pmu.add(L1D, false).unwrap();
        pmu.add(INST, true).unwrap();

        assert_eq!(pmu.port().event_type(0), L1D as u32);
        assert_eq!(pmu.port().event_type(1), INST as u32);
        assert_eq!(pmu.port().event_type(2), CHAIN as u32);

        pmu.enable();
        pmu.port_mut().advance(0, 7);
        assert_eq!(pmu.read(L1D), Ok(7));
    }

    #[test]
    fn test_wide_add_binds_chain_slot() {
        let mut pmu = test_support::cortex_a53();
        pmu.add(INST, false).unwrap();
        let slot = pmu.add(CYCLES, true).unwrap();

        assert_eq!(slot.get(), 1);
        assert_eq!(pmu.port().event_type(2), CHAIN as u32);
        assert_eq!(pmu.port().enabled_mask(), 0b111);
        assert_eq!(
            pmu.slots()[..3],
            [
                SlotState::Bound {
                    event: INST,
                    role: SlotRole::Primary
                },
                SlotState::Bound {
                    event: CYCLES,
                    role: SlotRole::Primary
                },
                SlotState::Bound {
                    event: CYCLES,
                    role: SlotRole::ChainContinuation
                },
            ]
        );
        assert_eq!(pmu.is_wide(CYCLES), Ok(true));
        assert_eq!(pmu.is_wide(INST), Ok(false));
    }

    #[test]
    fn test_even_alignment_skips_odd_pairs() {
        let config = PmuConfig::new(ChainAlignment::Even);
        let mut pmu = Pmu::with_config(SimulatedPmu::cortex_a53(), config);

        pmu.add(INST, false).unwrap();
        let slot = pmu.add(CYCLES, true).unwrap();

        assert_eq!(slot.get(), 2);
        assert_eq!(pmu.slot_state(1), Some(SlotState::Free));
        assert_eq!(pmu.add(L1D, false).unwrap().get(), 1);
    }

    #[test]
    fn test_no_open_slot() {
        let mut pmu = Pmu::new(SimulatedPmu::new(4));
        for event in [INST, CYCLES, L1D, L1D_REFILL] {
            pmu.add(event, false).unwrap();
        }

        assert_eq!(
            pmu.add(0x05, false),
            Err(PmuError::NoOpenSlot {
                event: 0x05,
                wide: false
            })
        );

        pmu.remove(CYCLES).unwrap();
        assert_eq!(pmu.add(0x05, false).unwrap().get(), 1);
    }

    #[test]
    fn test_no_open_pair() {
        let mut pmu = Pmu::new(SimulatedPmu::new(5));
        pmu.add(INST, true).unwrap();
        pmu.add(CYCLES, true).unwrap();

        // Slot 4 is free, but there is no slot 5 to chain into
        assert_eq!(
            pmu.add(L1D, true),
            Err(PmuError::NoOpenSlot {
                event: L1D,
                wide: true
            })
        );
        assert_eq!(pmu.port().enabled_mask(), 0b1111);

        pmu.remove(INST).unwrap();
        assert_eq!(pmu.add(L1D, true).unwrap().get(), 0);
    }

    #[test]
    fn test_remove_releases_chain_and_keeps_count() {
        let mut pmu = test_support::cortex_a53();
        pmu.add(INST, true).unwrap();
        pmu.port_mut().set_count(0, 42);
        pmu.port_mut().set_count(1, 7);

        pmu.remove(INST).unwrap();

        assert_eq!(pmu.port().enabled_mask(), 0);
        assert_eq!(pmu.port().count(0), 42);
        assert_eq!(pmu.port().count(1), 7);
        assert_eq!(pmu.find_slot(INST), None);
        assert_eq!(
            pmu.remove(INST),
            Err(PmuError::EventNotWatched { event: INST })
        );
    }

    #[test]
    fn test_remove_leaves_neighbour_alone() {
        let mut pmu = test_support::cortex_a53();
        pmu.add(INST, false).unwrap();
        pmu.add(CYCLES, false).unwrap();

        pmu.remove(INST).unwrap();
        assert_eq!(pmu.port().enabled_mask(), 0b10);
    }

    #[test]
    fn test_stale_chain_type_is_free() {
        let mut pmu = test_support::cortex_a53();
        pmu.add(INST, true).unwrap();
        pmu.remove(INST).unwrap();

        // Slot 1 still holds CHAIN but is disabled
        pmu.add(CYCLES, false).unwrap();
        assert_eq!(pmu.slot_state(1), Some(SlotState::Free));
        assert_eq!(pmu.is_wide(CYCLES), Ok(false));

        pmu.add(L1D, false).unwrap();
        assert_eq!(pmu.port().event_type(1), L1D as u32);
    }

    #[test]
    fn test_reset_zeroes_pair() {
        let mut pmu = test_support::cortex_a53();
        pmu.add(INST, false).unwrap();
        pmu.add(CYCLES, true).unwrap();
        for n in 0..3 {
            pmu.port_mut().set_count(n, 1000 + n as u32);
        }

        pmu.reset(CYCLES).unwrap();
        assert_eq!(pmu.port().count(0), 1000);
        assert_eq!(pmu.port().count(1), 0);
        assert_eq!(pmu.port().count(2), 0);

        assert_eq!(
            pmu.reset(L1D),
            Err(PmuError::EventNotWatched { event: L1D })
        );
    }

    #[test]
    fn test_slot_state_out_of_bank() {
        let pmu = test_support::cortex_a53();
        assert_eq!(pmu.slot_state(5), Some(SlotState::Free));
        assert_eq!(pmu.slot_state(6), None);
        assert_eq!(pmu.slots().len(), 6);
    }
}
