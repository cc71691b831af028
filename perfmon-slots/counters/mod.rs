pub mod allocator;
pub mod cycle;
pub mod reader;

pub use allocator::{SlotRole, SlotState};
pub use cycle::CycleCounterConfig;
