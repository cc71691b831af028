//! CP15 register port for AArch32 state
//!
//! Event type and count registers are reached through the PMSELR selector
//! and the PMXEVTYPER/PMXEVCNTR windows, so any counter index can be addressed
//! without a per-index instruction encoding.

use core::arch::asm;

use crate::port::{CounterIndex, RegisterPort};

macro_rules! mrc {
    ($crn:literal, $crm:literal, $opc2:literal) => {{
        let value: u32;
        // SAFETY: `Cp15Port::new` requires PMU register access at the current
        // privilege level.
        unsafe {
            asm!(
                concat!("mrc p15, 0, {0}, ", $crn, ", ", $crm, ", ", $opc2),
                out(reg) value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }};
}

macro_rules! mcr {
    ($crn:literal, $crm:literal, $opc2:literal, $value:expr) => {{
        let value: u32 = $value;
        // SAFETY: see `mrc!`.
        unsafe {
            asm!(
                concat!("mcr p15, 0, {0}, ", $crn, ", ", $crm, ", ", $opc2),
                in(reg) value,
                options(nostack, preserves_flags)
            );
        }
    }};
}

/// Live Performance Monitors registers of the executing core
#[derive(Debug)]
pub struct Cp15Port {
    _private: (),
}

impl Cp15Port {
    /// # Safety
    ///
    /// The caller must run at PL1 or above (or have PMUSERENR.EN set) and must
    /// stay on one core for the lifetime of the port.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn select(&self, n: CounterIndex) {
        mcr!("c9", "c12", "5", n.get() as u32);
        // SAFETY: barrier only.
        unsafe { asm!("isb", options(nomem, nostack, preserves_flags)) };
    }
}

impl RegisterPort for Cp15Port {
    fn pmcr_read(&self) -> u32 {
        mrc!("c9", "c12", "0")
    }

    fn pmcr_write(&mut self, value: u32) {
        mcr!("c9", "c12", "0", value);
    }

    fn pmcntenset_read(&self) -> u32 {
        mrc!("c9", "c12", "1")
    }

    fn pmcntenset_write(&mut self, mask: u32) {
        mcr!("c9", "c12", "1", mask);
    }

    fn pmcntenclr_write(&mut self, mask: u32) {
        mcr!("c9", "c12", "2", mask);
    }

    fn pmevtyper_read(&self, n: CounterIndex) -> u32 {
        self.select(n);
        mrc!("c9", "c13", "1")
    }

    fn pmevtyper_write(&mut self, n: CounterIndex, value: u32) {
        self.select(n);
        mcr!("c9", "c13", "1", value);
    }

    fn pmevcntr_read(&self, n: CounterIndex) -> u32 {
        self.select(n);
        mrc!("c9", "c13", "2")
    }

    fn pmevcntr_write(&mut self, n: CounterIndex, value: u32) {
        self.select(n);
        mcr!("c9", "c13", "2", value);
    }

    fn pmuserenr_read(&self) -> u32 {
        mrc!("c9", "c14", "0")
    }

    fn pmuserenr_write(&mut self, value: u32) {
        mcr!("c9", "c14", "0", value);
    }

    fn pmceid0_read(&self) -> u32 {
        mrc!("c9", "c12", "6")
    }

    fn pmceid1_read(&self) -> u32 {
        mrc!("c9", "c12", "7")
    }

    fn pmccntr_read_32(&self) -> u32 {
        mrc!("c9", "c13", "0")
    }

    fn pmccntr_read_64(&self) -> u64 {
        let low: u32;
        let high: u32;
        // SAFETY: see `mrc!`.
        unsafe {
            asm!(
                "mrrc p15, 0, {0}, {1}, c9",
                out(reg) low,
                out(reg) high,
                options(nomem, nostack, preserves_flags)
            );
        }
        (low as u64) | ((high as u64) << 32)
    }
}
