//! Architecture-specific register definitions
//!
//! Each Arm core implements a different number of event counters and a
//! different subset of the common events, while the register interface is
//! shared by every PMUv3 implementation. This module provides the
//! core-specific definitions organized by CPU.
//!
//! ## Supported Cores
//!
//! - **Cortex-A53** (`cortex-a53` feature) - Raspberry Pi 3, AArch32 state

#[cfg(feature = "cortex-a53")]
pub mod cortex_a53;
