//! PMEVTYPER<n>: Performance Monitors Event Type Registers
//!
//! ## Register Format
//!
//! | Bits   | Field    | Description                          |
//! |--------|----------|--------------------------------------|
//! | 0-9    | evtCount | Event number                         |
//! | 27     | NSH      | Count events in Hyp mode             |
//! | 28     | NSU      | Non-secure User mode filter          |
//! | 29     | NSK      | Non-secure kernel mode filter        |
//! | 30     | U        | Do not count in User mode            |
//! | 31     | P        | Do not count in privileged modes     |
//!
//! Binding an event writes the event number with every filter bit clear, so
//! the event counts in all modes.

use crate::port::RawError;
use crate::register::{bit, flag, RegisterLayout};

pub const EVENT_MASK: u32 = (1 << 10) - 1;

/// Event number held by a raw PMEVTYPER value
pub fn event_of(raw: u32) -> u16 {
    (raw & EVENT_MASK) as u16
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventType {
    /// Event number (bits 0-9)
    pub event: u16,

    /// Count in Hyp mode (bit 27)
    pub nsh: bool,

    /// Non-secure User mode filter (bit 28)
    pub nsu: bool,

    /// Non-secure kernel mode filter (bit 29)
    pub nsk: bool,

    /// Exclude User mode (bit 30)
    pub exclude_user: bool,

    /// Exclude privileged modes (bit 31)
    pub exclude_privileged: bool,
}

impl RegisterLayout for EventType {
    fn to_raw_value(&self) -> u32 {
        (self.event as u32 & EVENT_MASK)
            | flag(self.nsh, 27)
            | flag(self.nsu, 28)
            | flag(self.nsk, 29)
            | flag(self.exclude_user, 30)
            | flag(self.exclude_privileged, 31)
    }

    fn from_raw_value(value: u32) -> Self {
        Self {
            event: event_of(value),
            nsh: bit(value, 27),
            nsu: bit(value, 28),
            nsk: bit(value, 29),
            exclude_user: bit(value, 30),
            exclude_privileged: bit(value, 31),
        }
    }

    fn validate(&self) -> Result<(), RawError> {
        if self.event as u32 & !EVENT_MASK != 0 {
            return Err(RawError::ReservedBits {
                register: "PMEVTYPER.evtCount",
                value: self.event as u32,
                mask: EVENT_MASK,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_fields() {
        let decoded = EventType::from_raw_value(0x4800_001E);
        assert_eq!(decoded.event, 0x1E);
        assert!(decoded.exclude_user);
        assert!(decoded.nsh);
        assert!(!decoded.exclude_privileged);

        let plain = EventType {
            event: 0x08,
            ..Default::default()
        };
        assert_eq!(plain.to_raw_value(), 0x08);
        assert_eq!(event_of(0xC000_0008), 0x08);
    }

    #[test]
    fn test_event_type_validate() {
        let bad = EventType {
            event: 0x400,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(EventType::default().validate().is_ok());
    }
}
