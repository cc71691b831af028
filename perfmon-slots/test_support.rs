use perfmon_raw::SimulatedPmu;
use tracing_subscriber::EnvFilter;

use crate::pmu::Pmu;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Allocator over a simulated Cortex-A53 bank of six counters
pub fn cortex_a53() -> Pmu<SimulatedPmu> {
    init_tracing();
    Pmu::new(SimulatedPmu::cortex_a53())
}
