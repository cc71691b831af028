//! Common architectural event numbers
//!
//! Event numbers 0x00-0x3F are the common events whose presence is reported by
//! PMCEID0 (0x00-0x1F) and PMCEID1 (0x20-0x3F).

pub const SW_INCR: u16 = 0x00;
pub const L1I_CACHE_REFILL: u16 = 0x01;
pub const L1I_TLB_REFILL: u16 = 0x02;
pub const L1D_CACHE_REFILL: u16 = 0x03;
pub const L1D_CACHE: u16 = 0x04;
pub const L1D_TLB_REFILL: u16 = 0x05;
pub const LD_RETIRED: u16 = 0x06;
pub const ST_RETIRED: u16 = 0x07;
pub const INST_RETIRED: u16 = 0x08;
pub const EXC_TAKEN: u16 = 0x09;
pub const EXC_RETURN: u16 = 0x0A;
pub const CID_WRITE_RETIRED: u16 = 0x0B;
pub const PC_WRITE_RETIRED: u16 = 0x0C;
pub const BR_IMMED_RETIRED: u16 = 0x0D;
pub const BR_RETURN_RETIRED: u16 = 0x0E;
pub const UNALIGNED_LDST_RETIRED: u16 = 0x0F;
pub const BR_MIS_PRED: u16 = 0x10;
pub const CPU_CYCLES: u16 = 0x11;
pub const BR_PRED: u16 = 0x12;
pub const MEM_ACCESS: u16 = 0x13;
pub const L1I_CACHE: u16 = 0x14;
pub const L1D_CACHE_WB: u16 = 0x15;
pub const L2D_CACHE: u16 = 0x16;
pub const L2D_CACHE_REFILL: u16 = 0x17;
pub const L2D_CACHE_WB: u16 = 0x18;
pub const BUS_ACCESS: u16 = 0x19;
pub const MEMORY_ERROR: u16 = 0x1A;
pub const BUS_CYCLES: u16 = 0x1D;

/// Odd counter counts overflows of the counter below it
pub const CHAIN: u16 = 0x1E;

/// PMCEID0 as reported by the Cortex-A53
pub const CORTEX_A53_PMCEID0: u32 = 0x67FF_BFFF;

/// PMCEID1 as reported by the Cortex-A53 (no common events above 0x1F)
pub const CORTEX_A53_PMCEID1: u32 = 0x0000_0000;
