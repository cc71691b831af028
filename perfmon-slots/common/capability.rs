use perfmon_raw::current_arch::COMMON_EVENT_LIMIT;
use perfmon_raw::RegisterPort;

/// Common events the PMU can count, from PMCEID0 (0-31) and PMCEID1 (32-63)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pmceid0: u32,
    pmceid1: u32,
}

impl Capabilities {
    pub fn read<P: RegisterPort>(port: &P) -> Self {
        Self {
            pmceid0: port.pmceid0_read(),
            pmceid1: port.pmceid1_read(),
        }
    }

    pub fn is_event_available(&self, event: u16) -> bool {
        if event >= COMMON_EVENT_LIMIT {
            return false;
        }

        let (plane, bit) = if event >= 32 {
            (self.pmceid1, event - 32)
        } else {
            (self.pmceid0, event)
        };

        plane & (1 << bit) != 0
    }

    pub fn available_events(&self) -> impl Iterator<Item = u16> + '_ {
        (0..COMMON_EVENT_LIMIT).filter(|&event| self.is_event_available(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfmon_raw::SimulatedPmu;

    #[test]
    fn test_event_planes() {
        let sim = SimulatedPmu::cortex_a53().with_capabilities(0b1001, 0b10);
        let caps = Capabilities::read(&sim);

        assert!(caps.is_event_available(0));
        assert!(!caps.is_event_available(1));
        assert!(caps.is_event_available(3));
        assert!(!caps.is_event_available(32));
        assert!(caps.is_event_available(33));
        assert!(!caps.is_event_available(64));
        assert!(!caps.is_event_available(0x3FF));
        assert_eq!(caps.available_events().collect::<Vec<_>>(), vec![0, 3, 33]);
    }

    #[test]
    fn test_top_bit_of_each_plane() {
        let sim = SimulatedPmu::cortex_a53().with_capabilities(1 << 31, 1 << 31);
        let caps = Capabilities::read(&sim);
        assert!(caps.is_event_available(31));
        assert!(caps.is_event_available(63));
        assert!(!caps.is_event_available(30));
    }
}
