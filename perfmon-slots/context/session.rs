use std::ops::{Deref, DerefMut};

use perfmon_raw::RegisterPort;

use crate::context::Snapshot;
use crate::error::Result;
use crate::pmu::Pmu;

/// Borrowed use of the PMU that puts the previous configuration back on drop
///
/// Created by [`Pmu::session`]. The configuration found when the session
/// started is restored when the guard goes out of scope (or by
/// [`finish`](Self::finish), which reports errors instead of logging them).
pub struct PmuSession<'a, P: RegisterPort> {
    pmu: &'a mut Pmu<P>,
    snapshot: Option<Snapshot>,
    reset: bool,
}

impl<P: RegisterPort> Pmu<P> {
    /// Capture the current configuration and hand out the PMU until the
    /// returned guard is dropped
    ///
    /// With `reset`, counts are zeroed both when the session starts and when
    /// it ends.
    pub fn session(&mut self, reset: bool) -> PmuSession<'_, P> {
        let snapshot = if reset {
            self.capture_and_reset()
        } else {
            self.capture()
        };

        PmuSession {
            pmu: self,
            snapshot: Some(snapshot),
            reset,
        }
    }
}

impl<P: RegisterPort> PmuSession<'_, P> {
    /// Configuration the session will restore
    pub fn saved(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// End the session now, restoring the saved configuration
    pub fn finish(mut self) -> Result<()> {
        self.restore_saved()
    }

    fn restore_saved(&mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(snapshot) if self.reset => self.pmu.restore_and_reset(snapshot),
            Some(snapshot) => self.pmu.restore(snapshot),
            None => Ok(()),
        }
    }
}

impl<P: RegisterPort> Deref for PmuSession<'_, P> {
    type Target = Pmu<P>;

    fn deref(&self) -> &Self::Target {
        &*self.pmu
    }
}

impl<P: RegisterPort> DerefMut for PmuSession<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.pmu
    }
}

impl<P: RegisterPort> Drop for PmuSession<'_, P> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_saved() {
            tracing::warn!("Failed to restore PMU context: {}", e);
        }
    }
}
