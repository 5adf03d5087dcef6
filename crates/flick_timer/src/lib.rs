//! Flick Timers
//!
//! Repeating timers for widgets that act on a fixed period.
//!
//! # Features
//!
//! - **TimerScheduler**: owns every repeating timer; driven by a virtual
//!   clock (`advance`), the wall clock (`tick`), or its own background thread
//! - **SchedulerHandle**: weak handle passed to components that register timers
//! - **IntervalTicker**: one timer per owner that always calls the latest
//!   callback and is only recreated when its period or dependency changes
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use flick_timer::{IntervalTicker, TimerScheduler};
//!
//! let scheduler = TimerScheduler::new();
//! let mut ticker = IntervalTicker::new(scheduler.handle());
//!
//! let count = Arc::new(AtomicUsize::new(0));
//! let count_cb = Arc::clone(&count);
//! ticker
//!     .use_interval(
//!         move || {
//!             count_cb.fetch_add(1, Ordering::SeqCst);
//!         },
//!         Duration::from_millis(100),
//!         None,
//!     )
//!     .unwrap();
//!
//! scheduler.advance(Duration::from_millis(250));
//! assert_eq!(count.load(Ordering::SeqCst), 2);
//! ```

pub mod error;
pub mod scheduler;
pub mod ticker;

pub use error::{Result, TimerError};
pub use scheduler::{SchedulerHandle, TickCallback, TimerId, TimerScheduler};
pub use ticker::IntervalTicker;
