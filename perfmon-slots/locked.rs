use parking_lot::{Mutex, MutexGuard};
use perfmon_raw::RegisterPort;

use crate::pmu::Pmu;

/// A [`Pmu`] behind a core-local lock
///
/// Adding, removing and capturing each take several register writes; running
/// them under the lock keeps another context on the same core from seeing the
/// bank half-configured.
pub struct LockedPmu<P: RegisterPort> {
    inner: Mutex<Pmu<P>>,
}

impl<P: RegisterPort> LockedPmu<P> {
    pub fn new(pmu: Pmu<P>) -> Self {
        Self {
            inner: Mutex::new(pmu),
        }
    }

    /// Run `f` with exclusive access to the PMU
    pub fn with<R>(&self, f: impl FnOnce(&mut Pmu<P>) -> R) -> R {
        let mut pmu = self.inner.lock();
        f(&mut pmu)
    }

    pub fn lock(&self) -> MutexGuard<'_, Pmu<P>> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> Pmu<P> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_with_runs_under_lock() {
        let locked = LockedPmu::new(test_support::cortex_a53());

        let slot = locked.with(|pmu| pmu.add(0x08, true)).unwrap();
        assert_eq!(slot.get(), 0);

        assert!(locked.lock().is_wide(0x08).unwrap());

        let pmu = locked.into_inner();
        assert_eq!(pmu.port().enabled_mask(), 0b11);
    }
}
