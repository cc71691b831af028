//! # perfmon-raw
//!
//! Register definitions for the Arm Performance Monitors Extension (PMUv3) as
//! seen from AArch32 state.
//!
//! This crate provides type-safe layouts of the PMU registers, the common
//! architectural event numbers, and the [`RegisterPort`] trait through which
//! all register access happens. Two ports are provided: the CP15 coprocessor
//! interface of the executing core (`target_arch = "arm"` only) and a
//! simulated register file for tests.
//!
//! ## Features
//!
//! Select the target core via feature flags:
//! - `cortex-a53` (default) - Cortex-A53 (Raspberry Pi 3) definitions
//!
//! ## Usage
//!
//! ```ignore
//! use perfmon_raw::current_arch::{events, pmcr};
//! use perfmon_raw::{CounterIndex, RegisterPort};
//!
//! let slots = pmcr::num_counters(port.pmcr_read());
//! let first = CounterIndex::new(0)?;
//! port.pmevtyper_write(first, events::INST_RETIRED as u32);
//! port.pmcntenset_write(first.mask());
//! ```

pub mod arch;
pub mod port;
pub mod register;
#[cfg(feature = "cortex-a53")]
pub mod sim;

// Re-export for convenience
pub use port::{CounterIndex, RawError, RegisterPort, Result, MAX_EVENT_COUNTERS};
pub use register::RegisterLayout;
#[cfg(feature = "cortex-a53")]
pub use sim::SimulatedPmu;

// Export current architecture based on feature flag
#[cfg(feature = "cortex-a53")]
pub use arch::cortex_a53 as current_arch;
