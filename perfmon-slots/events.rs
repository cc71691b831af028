// Named common architectural events

use perfmon_raw::current_arch::events;

enum_with_data! {
    /// Common architectural events with their PMEVTYPER event numbers
    pub enum ArchEvent: u16 {
        SwIncr => ("SW_INCR", events::SW_INCR),
        L1iCacheRefill => ("L1I_CACHE_REFILL", events::L1I_CACHE_REFILL),
        L1iTlbRefill => ("L1I_TLB_REFILL", events::L1I_TLB_REFILL),
        L1dCacheRefill => ("L1D_CACHE_REFILL", events::L1D_CACHE_REFILL),
        L1dCache => ("L1D_CACHE", events::L1D_CACHE),
        L1dTlbRefill => ("L1D_TLB_REFILL", events::L1D_TLB_REFILL),
        LdRetired => ("LD_RETIRED", events::LD_RETIRED),
        StRetired => ("ST_RETIRED", events::ST_RETIRED),
        InstRetired => ("INST_RETIRED", events::INST_RETIRED),
        ExcTaken => ("EXC_TAKEN", events::EXC_TAKEN),
        ExcReturn => ("EXC_RETURN", events::EXC_RETURN),
        CidWriteRetired => ("CID_WRITE_RETIRED", events::CID_WRITE_RETIRED),
        PcWriteRetired => ("PC_WRITE_RETIRED", events::PC_WRITE_RETIRED),
        BrImmedRetired => ("BR_IMMED_RETIRED", events::BR_IMMED_RETIRED),
        BrReturnRetired => ("BR_RETURN_RETIRED", events::BR_RETURN_RETIRED),
        UnalignedLdstRetired => ("UNALIGNED_LDST_RETIRED", events::UNALIGNED_LDST_RETIRED),
        BrMisPred => ("BR_MIS_PRED", events::BR_MIS_PRED),
        CpuCycles => ("CPU_CYCLES", events::CPU_CYCLES),
        BrPred => ("BR_PRED", events::BR_PRED),
        MemAccess => ("MEM_ACCESS", events::MEM_ACCESS),
        L1iCache => ("L1I_CACHE", events::L1I_CACHE),
        L1dCacheWb => ("L1D_CACHE_WB", events::L1D_CACHE_WB),
        L2dCache => ("L2D_CACHE", events::L2D_CACHE),
        L2dCacheRefill => ("L2D_CACHE_REFILL", events::L2D_CACHE_REFILL),
        L2dCacheWb => ("L2D_CACHE_WB", events::L2D_CACHE_WB),
        BusAccess => ("BUS_ACCESS", events::BUS_ACCESS),
        MemoryError => ("MEMORY_ERROR", events::MEMORY_ERROR),
        BusCycles => ("BUS_CYCLES", events::BUS_CYCLES),
        Chain => ("CHAIN", events::CHAIN),
    }
    impl code -> u16
}

impl ArchEvent {
    pub fn from_code(code: u16) -> Option<Self> {
        Self::all().into_iter().find(|event| event.code() == code)
    }
}

impl From<ArchEvent> for u16 {
    fn from(event: ArchEvent) -> Self {
        event.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lookup() {
        assert_eq!(ArchEvent::from_code(0x08), Some(ArchEvent::InstRetired));
        assert_eq!(ArchEvent::InstRetired.name(), "INST_RETIRED");
        assert_eq!(u16::from(ArchEvent::Chain), 0x1E);
        assert_eq!(ArchEvent::from_code(0x3F), None);
    }
}
