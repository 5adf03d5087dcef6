//! Timer scheduler
//!
//! Owns every repeating timer and fires them as time passes. Time only moves
//! when the scheduler is driven:
//! - `advance(dt)` - move a virtual clock (deterministic, used by tests and
//!   hosts with their own frame clock)
//! - `tick()` - advance by the wall-clock time since the previous `tick`
//! - `start_background()` - run `tick` on a dedicated thread
//!
//! Timers register through a [`SchedulerHandle`], which holds only a weak
//! reference and fails cleanly once the scheduler is gone.

use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, TimerError};

new_key_type! {
    /// Handle to a registered repeating timer
    pub struct TimerId;
}

/// Callback invoked each time a timer fires
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

struct TimerSlot {
    period: Duration,
    /// Virtual time of the next firing
    next_due: Duration,
    callback: TickCallback,
}

/// Internal state of the scheduler
struct SchedulerInner {
    timers: SlotMap<TimerId, TimerSlot>,
    /// Virtual clock
    now: Duration,
    /// Wall-clock reference for `tick`, set once wall-clock driving starts
    last_tick: Option<Instant>,
}

impl SchedulerInner {
    /// Virtual time matching the wall clock right now
    ///
    /// Wall time since the last `tick` hasn't reached `now` yet; timers
    /// registered in between are anchored past it.
    fn wall_now(&self) -> Duration {
        let pending = self
            .last_tick
            .map(|last| last.elapsed())
            .unwrap_or(Duration::ZERO);
        self.now.saturating_add(pending)
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fire every timer due within `dt`, earliest first.
///
/// The lock is released around each callback so callbacks may register or
/// cancel timers. A timer cancelled by an earlier callback does not fire.
/// The clock saturates at `Duration::MAX`; a timer whose next firing would
/// land past it never fires again.
fn advance_inner(inner: &Mutex<SchedulerInner>, dt: Duration) -> usize {
    let target = lock(inner).now.saturating_add(dt);
    let mut fired = 0;

    loop {
        let due = {
            let mut guard = lock(inner);
            let next = guard
                .timers
                .iter()
                .filter(|(_, slot)| slot.next_due <= target && slot.next_due < Duration::MAX)
                .min_by_key(|(_, slot)| slot.next_due)
                .map(|(id, _)| id);

            match next {
                Some(id) => {
                    let slot = &mut guard.timers[id];
                    let due_at = slot.next_due;
                    slot.next_due = due_at.saturating_add(slot.period);
                    let callback = Arc::clone(&slot.callback);
                    guard.now = due_at;
                    Some(callback)
                }
                None => {
                    guard.now = target;
                    None
                }
            }
        };

        match due {
            Some(callback) => {
                callback();
                fired += 1;
            }
            None => break,
        }
    }

    fired
}

/// Wall time since the previous wall-clock step, re-anchored at `at`
fn wall_elapsed(inner: &Mutex<SchedulerInner>, at: Instant) -> Duration {
    let mut guard = lock(inner);
    guard
        .last_tick
        .replace(at)
        .map(|last| at.saturating_duration_since(last))
        .unwrap_or(Duration::ZERO)
}

/// The scheduler that owns all repeating timers
///
/// ```ignore
/// let mut scheduler = TimerScheduler::new();
/// scheduler.start_background(Duration::from_millis(16));
/// ```
pub struct TimerScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Stop signal for background thread
    stop_flag: Arc<AtomicBool>,
    /// Background thread handle (if running)
    thread_handle: Option<JoinHandle<()>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timers: SlotMap::with_key(),
                now: Duration::ZERO,
                last_tick: None,
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Move the virtual clock forward by `dt`, firing due timers
    ///
    /// A timer whose period fits k times into the elapsed span fires k times.
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, dt: Duration) -> usize {
        advance_inner(&self.inner, dt)
    }

    /// Advance by the wall-clock time elapsed since the previous `tick`
    ///
    /// The first call only anchors the wall clock and fires nothing.
    pub fn tick(&self) -> usize {
        let dt = wall_elapsed(&self.inner, Instant::now());
        advance_inner(&self.inner, dt)
    }

    /// Start ticking on a background thread at the given resolution
    ///
    /// Callbacks then run on that thread. Calling this while already running
    /// is a no-op.
    pub fn start_background(&mut self, resolution: Duration) {
        if self.thread_handle.is_some() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        lock(&inner).last_tick = Some(Instant::now());

        tracing::debug!("TimerScheduler: starting background thread ({:?})", resolution);
        self.thread_handle = Some(thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();
                let dt = wall_elapsed(&inner, start);
                advance_inner(&inner, dt);

                let elapsed = start.elapsed();
                if elapsed < resolution {
                    thread::sleep(resolution - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            // The next `tick` re-anchors instead of replaying the pause
            lock(&self.inner).last_tick = None;
            tracing::debug!("TimerScheduler: background thread stopped");
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    /// Check if the background thread is running
    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.inner).now
    }

    /// Number of live timers
    pub fn timer_count(&self) -> usize {
        lock(&self.inner).timers.len()
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerScheduler {
    fn drop(&mut self) {
        self.stop_background();
    }
}

/// A weak handle to the timer scheduler
///
/// It won't keep the scheduler alive.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a repeating timer firing every `period`
    ///
    /// The first firing happens one full period after registration, measured
    /// on the wall clock when the scheduler is driven by `tick` or the
    /// background thread.
    pub fn register(&self, period: Duration, callback: TickCallback) -> Result<TimerId> {
        if period.is_zero() {
            return Err(TimerError::ZeroPeriod);
        }
        let inner = self.inner.upgrade().ok_or(TimerError::SchedulerDropped)?;
        let mut guard = lock(&inner);
        let next_due = guard.wall_now().saturating_add(period);
        let id = guard.timers.insert(TimerSlot {
            period,
            next_due,
            callback,
        });
        tracing::trace!("timer {:?} registered every {:?}", id, period);
        Ok(id)
    }

    /// Remove a timer. Unknown ids are ignored.
    pub fn cancel(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            if lock(&inner).timers.remove(id).is_some() {
                tracing::trace!("timer {:?} cancelled", id);
            }
        }
    }

    /// Whether the timer is still registered
    pub fn is_registered(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timers.contains_key(id))
            .unwrap_or(false)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
