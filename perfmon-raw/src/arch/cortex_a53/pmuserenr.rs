//! PMUSERENR: Performance Monitors User Enable Register

use crate::register::{bit, flag, RegisterLayout};

pub const PMUSERENR_EN: u32 = 1 << 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserEnable {
    /// User mode access to all PMU registers (EN, bit 0)
    pub enable: bool,

    /// User mode writes to the software increment register (SW, bit 1)
    pub software_increment: bool,

    /// User mode reads of the cycle counter (CR, bit 2)
    pub cycle_read: bool,

    /// User mode reads of the event counters (ER, bit 3)
    pub event_read: bool,
}

impl RegisterLayout for UserEnable {
    fn to_raw_value(&self) -> u32 {
        flag(self.enable, 0)
            | flag(self.software_increment, 1)
            | flag(self.cycle_read, 2)
            | flag(self.event_read, 3)
    }

    fn from_raw_value(value: u32) -> Self {
        Self {
            enable: bit(value, 0),
            software_increment: bit(value, 1),
            cycle_read: bit(value, 2),
            event_read: bit(value, 3),
        }
    }
}
