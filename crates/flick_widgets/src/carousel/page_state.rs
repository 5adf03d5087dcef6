//! Page index ownership
//!
//! The carousel reads and writes its page index through a
//! [`PageIndexStore`]. By default it owns a [`LocalPageState`]; a caller that
//! wants to own the index (lifted state) passes a [`PageState`] instead. The
//! widget never keeps a copy of the index, so the caller's getter is the
//! single source of truth.
//!
//! ```rust
//! use flick_core::State;
//! use flick_widgets::{PageIndexStore, PageState};
//!
//! let page = State::new(0usize);
//! let store = PageState::from(page.clone());
//!
//! store.set(2);
//! assert_eq!(page.get(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use flick_core::State;

/// Read/write access to a carousel's page index
pub trait PageIndexStore: Send + Sync {
    /// Current page index (may be out of range; callers clamp)
    fn get(&self) -> usize;

    /// Commit a new page index
    fn set(&self, page: usize);
}

/// Page index owned by the widget itself
#[derive(Clone, Default)]
pub struct LocalPageState {
    page: State<usize>,
}

impl LocalPageState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageIndexStore for LocalPageState {
    fn get(&self) -> usize {
        self.page.get()
    }

    fn set(&self, page: usize) {
        self.page.set(page);
    }
}

type PageGetter = Arc<dyn Fn() -> usize + Send + Sync>;
type PageSetter = Arc<dyn Fn(usize) + Send + Sync>;

/// Caller-owned page index: a getter/setter pair
#[derive(Clone)]
pub struct PageState {
    get: PageGetter,
    set: PageSetter,
}

impl PageState {
    /// Build from an index getter and a setter
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> usize + Send + Sync + 'static,
        S: Fn(usize) + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }
}

impl From<State<usize>> for PageState {
    fn from(state: State<usize>) -> Self {
        let reader = state.clone();
        PageState::new(move || reader.get(), move |page| state.set(page))
    }
}

impl PageIndexStore for PageState {
    fn get(&self) -> usize {
        (self.get)()
    }

    fn set(&self, page: usize) {
        (self.set)(page)
    }
}

impl fmt::Debug for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageState")
            .field("page", &(self.get)())
            .finish()
    }
}
