//! # perfmon
//!
//! Event-counter slot allocation for the Arm Performance Monitors of one core.
//!
//! Callers ask for architectural events by number; the allocator finds a free
//! counter (or a free adjacent pair, fused into one 64-bit counter with the
//! `CHAIN` event), reads values back, and saves/restores the whole PMU
//! configuration around borrowed use.
//!
//! ```
//! use perfmon::{ArchEvent, Pmu};
//! use perfmon_raw::SimulatedPmu;
//!
//! let mut pmu = Pmu::new(SimulatedPmu::cortex_a53());
//! let snapshot = pmu.capture();
//!
//! pmu.add(ArchEvent::InstRetired.code(), false)?;
//! pmu.add(ArchEvent::CpuCycles.code(), true)?;
//! assert_eq!(pmu.read(ArchEvent::CpuCycles.code())?, 0);
//!
//! pmu.restore(snapshot)?;
//! # Ok::<(), perfmon::PmuError>(())
//! ```

// Macros (must be first for visibility)
#[macro_use]
pub mod macros;

pub mod common;
pub mod config;
pub mod context;
pub mod counters;
pub mod error;
pub mod events;
pub mod locked;
pub mod pmu;

#[cfg(test)]
mod test_support;

pub use config::{ChainAlignment, PmuConfig};
pub use context::{PmuSession, Snapshot};
pub use counters::{CycleCounterConfig, SlotRole, SlotState};
pub use error::{PmuError, Result};
pub use events::ArchEvent;
pub use locked::LockedPmu;
pub use pmu::Pmu;
