use perfmon_raw::{CounterIndex, RawError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PmuError {
    #[error("Event 0x{event:02X} is not implemented by this PMU")]
    EventUnavailable { event: u16 },

    #[error("Event 0x{event:02X} is already watched by slot {slot}")]
    AlreadyWatched { event: u16, slot: CounterIndex },

    #[error("No open slot for event 0x{event:02X} (chained: {wide})")]
    NoOpenSlot { event: u16, wide: bool },

    #[error("Event 0x{event:02X} is not being watched")]
    EventNotWatched { event: u16 },

    #[error("Bad argument: {0}")]
    BadArgument(String),

    #[error("Register error: {0}")]
    Raw(#[from] RawError),
}

pub type Result<T> = std::result::Result<T, PmuError>;
