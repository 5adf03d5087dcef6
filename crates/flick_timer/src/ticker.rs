//! Interval ticker
//!
//! An [`IntervalTicker`] owns at most one repeating timer. Its owner calls
//! [`IntervalTicker::use_interval`] on every update pass with a fresh closure;
//! the closure is swapped in place so the next tick sees the owner's latest
//! captures, while the timer itself (and therefore its phase) survives until
//! the period or the dependency value changes.
//!
//! ```ignore
//! // Called on every render pass
//! ticker.use_interval(move || advance(page), AUTO_PAGE_INTERVAL, None)?;
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::error::Result;
use crate::scheduler::{SchedulerHandle, TickCallback, TimerId};

type CallbackSlot = Arc<Mutex<Option<TickCallback>>>;

/// A repeating timer that always invokes its most recent callback
pub struct IntervalTicker {
    handle: SchedulerHandle,
    /// Latest callback; read by the live timer on every tick
    callback: CallbackSlot,
    timer: Option<TimerId>,
    period: Option<Duration>,
    dependency: Option<u64>,
}

impl IntervalTicker {
    /// Create an idle ticker bound to a scheduler
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            callback: Arc::new(Mutex::new(None)),
            timer: None,
            period: None,
            dependency: None,
        }
    }

    /// Run `callback` every `period`
    ///
    /// The callback is always replaced. The underlying timer is only torn
    /// down and recreated when `period` or `dependency` differs from the
    /// previous call, or when no timer is live.
    pub fn use_interval<F>(
        &mut self,
        callback: F,
        period: Duration,
        dependency: Option<u64>,
    ) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.set_callback(callback);

        let unchanged = self.period == Some(period) && self.dependency == dependency;
        if unchanged && self.is_running() {
            return Ok(());
        }

        self.stop();

        let slot = Arc::clone(&self.callback);
        let id = self.handle.register(
            period,
            Arc::new(move || {
                let current = slot
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                if let Some(callback) = current {
                    callback();
                }
            }),
        )?;

        tracing::debug!(
            "IntervalTicker: timer {:?} started ({:?}, dep={:?})",
            id,
            period,
            dependency
        );
        self.timer = Some(id);
        self.period = Some(period);
        self.dependency = dependency;
        Ok(())
    }

    /// Replace the callback without touching the timer
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    /// Cancel the live timer, if any
    pub fn stop(&mut self) {
        if let Some(id) = self.timer.take() {
            self.handle.cancel(id);
            tracing::debug!("IntervalTicker: timer {:?} stopped", id);
        }
        self.period = None;
        self.dependency = None;
    }

    /// Whether a timer is currently live
    pub fn is_running(&self) -> bool {
        self.timer
            .map(|id| self.handle.is_registered(id))
            .unwrap_or(false)
    }

    /// Period of the live timer
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
