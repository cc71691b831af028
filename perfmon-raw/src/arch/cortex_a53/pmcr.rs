//! PMCR: Performance Monitors Control Register
//!
//! ## Register Format
//!
//! | Bits   | Field  | Description                                   |
//! |--------|--------|-----------------------------------------------|
//! | 0      | E      | Enable all counters                           |
//! | 1      | P      | Event counter reset (write-only, reads 0)     |
//! | 2      | C      | Cycle counter reset (write-only, reads 0)     |
//! | 3      | D      | Cycle counter counts every 64th cycle         |
//! | 4      | X      | Export enable                                 |
//! | 5      | DP     | Disable cycle counter when counting prohibited|
//! | 6      | LC     | Cycle counter overflows at 64 bits            |
//! | 11-15  | N      | Number of event counters (read-only)          |
//! | 16-23  | IDCODE | Identification code (read-only)               |
//! | 24-31  | IMP    | Implementer code (read-only)                  |

use crate::port::RawError;
use crate::register::{bit, flag, RegisterLayout};

pub const PMCR_ENABLE: u32 = 1 << 0;
pub const PMCR_EVENT_COUNTER_RESET: u32 = 1 << 1;
pub const PMCR_CYCLE_COUNTER_RESET: u32 = 1 << 2;
pub const PMCR_CYCLE_COUNT_EVERY_64: u32 = 1 << 3;
pub const PMCR_EXPORT_ENABLE: u32 = 1 << 4;
pub const PMCR_CYCLE_COUNTER_DISABLE: u32 = 1 << 5;
pub const PMCR_CYCLE_COUNTER_64_BITS: u32 = 1 << 6;

pub const PMCR_N_SHIFT: u32 = 11;
pub const PMCR_N_MASK: u32 = 0b11111 << PMCR_N_SHIFT;

/// Bits software may write
pub const PMCR_WRITABLE: u32 = PMCR_ENABLE
    | PMCR_EVENT_COUNTER_RESET
    | PMCR_CYCLE_COUNTER_RESET
    | PMCR_CYCLE_COUNT_EVERY_64
    | PMCR_EXPORT_ENABLE
    | PMCR_CYCLE_COUNTER_DISABLE
    | PMCR_CYCLE_COUNTER_64_BITS;

/// Configuration flags that read back as written (the reset bits always read 0)
pub const PMCR_STICKY_FLAGS: u32 =
    PMCR_WRITABLE & !(PMCR_EVENT_COUNTER_RESET | PMCR_CYCLE_COUNTER_RESET);

/// Number of event counters reported by a raw PMCR value
pub fn num_counters(pmcr: u32) -> usize {
    ((pmcr & PMCR_N_MASK) >> PMCR_N_SHIFT) as usize
}

/// Typed PMCR layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pmcr {
    /// Enable all counters (E, bit 0)
    pub enable: bool,

    /// Reset all event counters to zero (P, bit 1)
    pub event_counter_reset: bool,

    /// Reset the cycle counter to zero (C, bit 2)
    pub cycle_counter_reset: bool,

    /// Count every 64th cycle (D, bit 3)
    pub cycle_divider: bool,

    /// Export events to an external monitor (X, bit 4)
    pub export: bool,

    /// Disable cycle counter where event counting is prohibited (DP, bit 5)
    pub cycle_counter_disable: bool,

    /// 64-bit cycle counter overflow (LC, bit 6)
    pub long_cycle: bool,

    /// Number of event counters (N, bits 11-15)
    pub num_counters: u8,

    /// Identification code (bits 16-23)
    pub idcode: u8,

    /// Implementer code (bits 24-31)
    pub implementer: u8,
}

impl RegisterLayout for Pmcr {
    fn to_raw_value(&self) -> u32 {
        flag(self.enable, 0)
            | flag(self.event_counter_reset, 1)
            | flag(self.cycle_counter_reset, 2)
            | flag(self.cycle_divider, 3)
            | flag(self.export, 4)
            | flag(self.cycle_counter_disable, 5)
            | flag(self.long_cycle, 6)
            | (((self.num_counters as u32) << PMCR_N_SHIFT) & PMCR_N_MASK)
            | ((self.idcode as u32) << 16)
            | ((self.implementer as u32) << 24)
    }

    fn from_raw_value(value: u32) -> Self {
        Self {
            enable: bit(value, 0),
            event_counter_reset: bit(value, 1),
            cycle_counter_reset: bit(value, 2),
            cycle_divider: bit(value, 3),
            export: bit(value, 4),
            cycle_counter_disable: bit(value, 5),
            long_cycle: bit(value, 6),
            num_counters: num_counters(value) as u8,
            idcode: ((value >> 16) & 0xFF) as u8,
            implementer: ((value >> 24) & 0xFF) as u8,
        }
    }

    fn validate(&self) -> Result<(), RawError> {
        if self.num_counters > 31 {
            return Err(RawError::ReservedBits {
                register: "PMCR.N",
                value: self.num_counters as u32,
                mask: 0b11111,
            });
        }
        Ok(())
    }
}

/// Check that `flags` only touches writable PMCR bits
pub fn check_writable(flags: u32) -> Result<(), RawError> {
    if flags & !PMCR_WRITABLE != 0 {
        return Err(RawError::ReservedBits {
            register: "PMCR",
            value: flags,
            mask: PMCR_WRITABLE,
        });
    }
    Ok(())
}
