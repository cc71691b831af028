//! Arm Cortex-A53 Performance Monitors Unit definitions (AArch32 state)
//!
//! The Cortex-A53 implements PMUv3 with six event counters plus the
//! dedicated cycle counter. All registers are reached through the CP15
//! coprocessor interface.
//!
//! ## Registers
//!
//! - **PMCR** - Control register, also reports the number of event counters
//! - **PMCNTENSET/PMCNTENCLR** - Count enable set/clear pair
//! - **PMEVTYPER<n>/PMEVCNTR<n>** - Per-counter event type and count
//! - **PMUSERENR** - User mode access enable
//! - **PMCEID0/PMCEID1** - Common event identification bitmaps
//! - **PMCCNTR** - Cycle counter
//!
//! ## References
//!
//! - Arm® Cortex®-A53 MPCore Processor Technical Reference Manual, Chapter 12
//! - Arm® Architecture Reference Manual for A-profile, Performance Monitors Extension

#[cfg(target_arch = "arm")]
pub mod cp15;
pub mod events;
pub mod pmcr;
pub mod pmevtyper;
pub mod pmuserenr;

/// Number of event counters implemented by the Cortex-A53
pub const CORTEX_A53_EVENT_COUNTERS: usize = 6;

/// Bit of the cycle counter in PMCNTENSET/PMCNTENCLR
pub const PMCNTEN_CYCLE_COUNTER: u32 = 1 << 31;

/// Event IDs covered by the PMCEID0/PMCEID1 bitmaps
pub const COMMON_EVENT_LIMIT: u16 = 64;
