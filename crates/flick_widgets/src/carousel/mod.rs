//! Touch-swipeable carousel
//!
//! The Carousel widget provides:
//! - Horizontal paging by touch drag with 1:1 finger tracking
//! - Auto-paging on a fixed interval, wrapping from the last page to the first
//! - Dot or counter page indicators
//! - Caller-owned page index (lifted state) or a widget-owned one
//! - An imperative [`CarouselHandle`] for moving the track from outside
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut carousel = Carousel::new(scheduler.handle(), config);
//! carousel.mount(measured_width)?;   // captures page width, starts the ticker
//! let tree = carousel.render(&slides); // every render pass
//! carousel.handle_touch(&mut event);   // from the host's touch delivery
//! carousel.unmount();                  // stops the ticker
//! ```
//!
//! All gesture and measurement state belongs to the instance, so any number
//! of carousels can be mounted at once.

pub mod gesture;
pub mod indicator;
pub mod page_state;
pub mod track;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use flick_core::events::event_types::{TOUCH_END, TOUCH_START};
use flick_core::{Event, StateTransitions, TouchEvent};
use flick_timer::{IntervalTicker, SchedulerHandle};

use crate::config::CarouselConfig;
use crate::element::{div, li, ul, Element};
use crate::error::Result;

use self::gesture::{release_target, GestureSession, GestureState};
use self::page_state::{LocalPageState, PageIndexStore, PageState};
use self::track::{page_offset_percent, CarouselHandle, Transition};

/// Interval between auto-paging steps
pub const AUTO_PAGE_INTERVAL: Duration = Duration::from_millis(5000);

/// Clamp a stored page index to the pages that exist
fn clamp_page(page: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        page.min(count - 1)
    }
}

/// Per-instance state shared with the tick callback
struct CarouselShared {
    config: CarouselConfig,
    /// Widget-owned index, used whenever no lifted state is supplied
    local: Arc<LocalPageState>,
    store: Arc<dyn PageIndexStore>,
    track: CarouselHandle,
    gesture: Option<GestureSession>,
    state: GestureState,
    /// Page width in pixels, fixed at mount
    content_width: f32,
    /// Children seen by the latest render
    child_count: usize,
    mounted: bool,
}

fn lock(shared: &Mutex<CarouselShared>) -> MutexGuard<'_, CarouselShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Advance one page if auto-paging applies right now
fn auto_page(shared: &Mutex<CarouselShared>, auto_paging: bool, transition: Transition) {
    let (store, track, count) = {
        let s = lock(shared);
        if !auto_paging || s.state == GestureState::Dragging || s.child_count == 0 {
            return;
        }
        (Arc::clone(&s.store), s.track.clone(), s.child_count)
    };

    let current = clamp_page(store.get(), count);
    let next = (current + 1) % count;
    tracing::debug!("carousel: auto-paging {} -> {} of {}", current, next, count);
    track.set_translate_x_style_in_carousel(next, transition);
    store.set(next);
}

/// Touch-swipeable carousel widget
pub struct Carousel {
    shared: Arc<Mutex<CarouselShared>>,
    ticker: IntervalTicker,
}

impl Carousel {
    /// Create a carousel that owns its page index
    pub fn new(scheduler: SchedulerHandle, config: CarouselConfig) -> Self {
        let local = Arc::new(LocalPageState::new());
        let store: Arc<dyn PageIndexStore> = local.clone();
        Self {
            shared: Arc::new(Mutex::new(CarouselShared {
                config,
                local,
                store,
                track: CarouselHandle::new(),
                gesture: None,
                state: GestureState::Idle,
                content_width: 0.0,
                child_count: 0,
                mounted: false,
            })),
            ticker: IntervalTicker::new(scheduler),
        }
    }

    /// Let the caller own the page index
    pub fn with_page_state(self, page_state: PageState) -> Self {
        self.set_page_state(Some(page_state));
        self
    }

    /// Drive the track through an existing handle (forwarded ref)
    pub fn with_handle(self, handle: CarouselHandle) -> Self {
        lock(&self.shared).track = handle;
        self
    }

    /// Switch between lifted state (`Some`) and the widget's own index
    pub fn set_page_state(&self, page_state: Option<PageState>) {
        let mut s = lock(&self.shared);
        let store: Arc<dyn PageIndexStore> = match page_state {
            Some(page_state) => Arc::new(page_state),
            None => s.local.clone(),
        };
        s.store = store;
    }

    /// Replace the configuration (new props)
    pub fn set_config(&self, config: CarouselConfig) {
        let mounted = {
            let mut s = lock(&self.shared);
            s.config = config.clone();
            s.mounted
        };
        if mounted {
            self.ticker.set_callback(self.tick_callback(&config));
        }
    }

    /// Current configuration
    pub fn config(&self) -> CarouselConfig {
        lock(&self.shared).config.clone()
    }

    /// Capture the page width and start the auto-paging ticker
    ///
    /// The width is measured once; later calls while mounted are ignored.
    pub fn mount(&mut self, content_width: f32) -> Result<()> {
        let config = {
            let mut s = lock(&self.shared);
            if s.mounted {
                tracing::debug!("carousel: already mounted, keeping width {}", s.content_width);
                return Ok(());
            }
            s.content_width = if content_width.is_finite() && content_width > 0.0 {
                content_width
            } else {
                tracing::warn!(
                    "carousel: unusable content width {}, drag offsets will be zero",
                    content_width
                );
                0.0
            };
            s.config.clone()
        };

        self.ticker
            .use_interval(self.tick_callback(&config), AUTO_PAGE_INTERVAL, None)?;
        lock(&self.shared).mounted = true;
        tracing::debug!("carousel: mounted (width {})", content_width);
        Ok(())
    }

    /// Stop the ticker; no tick reaches the widget afterwards
    pub fn unmount(&mut self) {
        self.ticker.stop();
        let mut s = lock(&self.shared);
        s.mounted = false;
        s.gesture = None;
        s.state = GestureState::Idle;
    }

    /// Tick callback capturing this render's props
    fn tick_callback(&self, config: &CarouselConfig) -> impl Fn() + Send + Sync + 'static {
        let shared: Weak<Mutex<CarouselShared>> = Arc::downgrade(&self.shared);
        let auto_paging = config.auto_paging;
        let transition = Transition::animated(config.transition_duration);
        move || {
            if let Some(shared) = shared.upgrade() {
                auto_page(&shared, auto_paging, transition);
            }
        }
    }

    // =========================================================================
    // Touch handling
    // =========================================================================

    /// Handle a touch event delivered to the carousel's root
    ///
    /// Propagation is always stopped so ancestors don't react to the same
    /// gesture.
    pub fn handle_touch(&self, event: &mut Event) {
        event.stop_propagation();
        match event.data {
            TouchEvent::Started { x, .. } => self.on_touch_start(x),
            TouchEvent::Moved { x, .. } => self.on_touch_move(x),
            TouchEvent::Ended { .. } => self.on_touch_end(),
        }
    }

    fn on_touch_start(&self, x: f32) {
        let (store, track, count) = {
            let mut s = lock(&self.shared);
            if s.child_count == 0 {
                return;
            }
            if s.gesture.is_some() {
                tracing::debug!("carousel: discarding stale gesture");
            }
            s.gesture = Some(GestureSession::begin(x));
            s.state.transition(TOUCH_START);
            (Arc::clone(&s.store), s.track.clone(), s.child_count)
        };

        let page = clamp_page(store.get(), count);
        tracing::debug!("carousel: drag start at {} on page {}", x, page);
        track.set_translate_x_style_in_carousel(page, Transition::None);
    }

    fn on_touch_move(&self, x: f32) {
        let (session, width, store, track, count) = {
            let mut s = lock(&self.shared);
            let Some(session) = s.gesture.as_mut() else {
                tracing::trace!("carousel: move without an active gesture");
                return;
            };
            session.track(x);
            let session = *session;
            (
                session,
                s.content_width,
                Arc::clone(&s.store),
                s.track.clone(),
                s.child_count,
            )
        };

        let page = clamp_page(store.get(), count);
        let offset = session.offset_percent(width);
        tracing::trace!("carousel: drag offset {}%", offset);
        track.set_translate_x_percent(page_offset_percent(page) + offset, Transition::None);
    }

    fn on_touch_end(&self) {
        let (session, width, store, track, count, transition) = {
            let mut s = lock(&self.shared);
            let session = s.gesture.take();
            s.state.transition(TOUCH_END);
            if s.child_count == 0 {
                return;
            }
            (
                session,
                s.content_width,
                Arc::clone(&s.store),
                s.track.clone(),
                s.child_count,
                Transition::animated(s.config.transition_duration),
            )
        };

        let page = clamp_page(store.get(), count);
        let offset = session.map(|s| s.offset_percent(width)).unwrap_or(0);
        let target = release_target(offset, page, count);
        tracing::debug!(
            "carousel: drag end offset {}%, page {} -> {}",
            offset,
            page,
            target
        );

        track.set_translate_x_style_in_carousel(target, transition);
        if target != page {
            store.set(target);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Build the element tree for `children`, one page per child
    ///
    /// The track element carries whatever style the handle currently holds;
    /// rendering never resets it.
    pub fn render(&self, children: &[Element]) -> Element {
        let (config, store, track, mounted) = {
            let mut s = lock(&self.shared);
            s.child_count = children.len();
            (
                s.config.clone(),
                Arc::clone(&s.store),
                s.track.clone(),
                s.mounted,
            )
        };
        if mounted {
            self.ticker.set_callback(self.tick_callback(&config));
        }

        let page = clamp_page(store.get(), children.len());
        let classes = &config.classes;

        let keys: Vec<String> = children
            .iter()
            .enumerate()
            .map(|(i, child)| match child.key_str() {
                Some(key) => key.to_string(),
                None => {
                    tracing::warn!("carousel: child {} has no key, using its index", i);
                    i.to_string()
                }
            })
            .collect();

        let items = children.iter().zip(&keys).enumerate().map(|(i, (child, key))| {
            let height = if config.need_height_resizing && i != page {
                &classes.height_zero
            } else {
                &classes.height_full
            };
            li().key(key.clone())
                .class(&classes.content)
                .class(height)
                .child(child.clone())
        });

        let mut contents = ul()
            .class(&classes.contents)
            .class(&classes.height_auto)
            .children_from(items);
        if let Some(style) = track.style_string() {
            contents = contents.style(style);
        }

        let mut root = div()
            .class_opt(config.class_name.as_deref())
            .class(&classes.wrapper)
            .child(contents);
        if let Some(indicator) = config.page_indicator.render(classes, &keys, page) {
            root = root.child(indicator);
        }
        root
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The imperative track handle to forward to parents
    pub fn handle(&self) -> CarouselHandle {
        lock(&self.shared).track.clone()
    }

    /// Current page, clamped to the children of the latest render
    pub fn current_page(&self) -> usize {
        let (store, count) = {
            let s = lock(&self.shared);
            (Arc::clone(&s.store), s.child_count)
        };
        clamp_page(store.get(), count)
    }

    pub fn gesture_state(&self) -> GestureState {
        lock(&self.shared).state
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture_state() == GestureState::Dragging
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.shared).mounted
    }

    /// Children seen by the latest render
    pub fn child_count(&self) -> usize {
        lock(&self.shared).child_count
    }

    /// Page width captured at mount
    pub fn content_width(&self) -> f32 {
        lock(&self.shared).content_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::indicator::PageIndicator;
    use flick_core::State;
    use flick_timer::TimerScheduler;

    fn slides(n: usize) -> Vec<Element> {
        (0..n).map(|i| div().key(format!("s{}", i)).text(i.to_string())).collect()
    }

    fn touch(carousel: &Carousel, data: TouchEvent) -> Event {
        let mut event = Event::new(data);
        carousel.handle_touch(&mut event);
        event
    }

    fn drag(carousel: &Carousel, from: f32, to: f32) {
        touch(carousel, TouchEvent::start(from));
        touch(carousel, TouchEvent::moved(to));
        touch(carousel, TouchEvent::end(to));
    }

    fn mounted(scheduler: &TimerScheduler, config: CarouselConfig, n: usize) -> Carousel {
        let mut carousel = Carousel::new(scheduler.handle(), config);
        carousel.mount(100.0).unwrap();
        carousel.render(&slides(n));
        carousel
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 0), 0);
        assert_eq!(clamp_page(5, 3), 2);
        assert_eq!(clamp_page(1, 3), 1);
    }

    #[test]
    fn test_swipe_left_and_right() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        drag(&carousel, 80.0, 40.0);
        assert_eq!(carousel.current_page(), 1);
        assert_eq!(
            carousel.handle().style_string().as_deref(),
            Some("transform: translateX(-100%); transition: transform 0.5s; ")
        );

        drag(&carousel, 10.0, 60.0);
        assert_eq!(carousel.current_page(), 0);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn test_touch_start_snaps_without_transition() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);
        drag(&carousel, 80.0, 40.0);

        let event = touch(&carousel, TouchEvent::start(50.0));
        assert!(event.is_propagation_stopped());
        assert!(carousel.is_dragging());
        let style = carousel.handle().track_style().unwrap();
        assert_eq!(style.translate_x_percent, -100);
        assert_eq!(style.transition, Transition::None);
    }

    #[test]
    fn test_touch_move_tracks_finger() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);
        drag(&carousel, 80.0, 40.0);

        touch(&carousel, TouchEvent::start(50.0));
        touch(&carousel, TouchEvent::moved(70.0));
        let style = carousel.handle().track_style().unwrap();
        assert_eq!(style.translate_x_percent, -80);
        assert_eq!(style.transition, Transition::None);

        // Page is only committed on release
        assert_eq!(carousel.current_page(), 1);
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        let event = touch(&carousel, TouchEvent::moved(10.0));
        assert!(event.is_propagation_stopped());
        assert!(carousel.handle().track_style().is_none());
    }

    #[test]
    fn test_end_without_start_resettles() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        touch(&carousel, TouchEvent::end(0.0));
        assert_eq!(carousel.current_page(), 0);
        let style = carousel.handle().track_style().unwrap();
        assert_eq!(style.translate_x_percent, 0);
        assert_eq!(style.transition, Transition::animated(0.5));
    }

    #[test]
    fn test_restarted_gesture_discards_stale_session() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        // First gesture never ends
        touch(&carousel, TouchEvent::start(90.0));
        touch(&carousel, TouchEvent::moved(10.0));

        // New gesture measures from its own start
        touch(&carousel, TouchEvent::start(50.0));
        touch(&carousel, TouchEvent::moved(45.0));
        touch(&carousel, TouchEvent::end(45.0));
        assert_eq!(carousel.current_page(), 0);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn test_zero_children_ignores_touch() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 0);

        drag(&carousel, 90.0, 0.0);
        assert_eq!(carousel.current_page(), 0);
        assert!(!carousel.is_dragging());
        assert!(carousel.handle().track_style().is_none());
    }

    #[test]
    fn test_zero_width_never_pages() {
        let scheduler = TimerScheduler::new();
        let mut carousel = Carousel::new(scheduler.handle(), CarouselConfig::default());
        carousel.mount(0.0).unwrap();
        carousel.render(&slides(3));

        drag(&carousel, 300.0, 0.0);
        assert_eq!(carousel.current_page(), 0);
        assert_eq!(carousel.content_width(), 0.0);
    }

    #[test]
    fn test_width_is_captured_once() {
        let scheduler = TimerScheduler::new();
        let mut carousel = Carousel::new(scheduler.handle(), CarouselConfig::default());
        carousel.mount(320.0).unwrap();
        carousel.mount(640.0).unwrap();
        assert_eq!(carousel.content_width(), 320.0);
        assert_eq!(scheduler.timer_count(), 1);
    }

    #[test]
    fn test_auto_paging_wraps() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::new().auto_paging(true), 3);

        scheduler.advance(AUTO_PAGE_INTERVAL);
        assert_eq!(carousel.current_page(), 1);
        scheduler.advance(AUTO_PAGE_INTERVAL * 2);
        assert_eq!(carousel.current_page(), 0);
        assert_eq!(
            carousel.handle().track_style().unwrap().transition,
            Transition::animated(0.5)
        );
    }

    #[test]
    fn test_auto_paging_disabled() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        scheduler.advance(AUTO_PAGE_INTERVAL * 3);
        assert_eq!(carousel.current_page(), 0);
        assert!(carousel.handle().track_style().is_none());
    }

    #[test]
    fn test_auto_paging_suppressed_while_dragging() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::new().auto_paging(true), 3);

        touch(&carousel, TouchEvent::start(50.0));
        scheduler.advance(AUTO_PAGE_INTERVAL);
        assert_eq!(carousel.current_page(), 0);

        touch(&carousel, TouchEvent::end(50.0));
        scheduler.advance(AUTO_PAGE_INTERVAL);
        assert_eq!(carousel.current_page(), 1);
    }

    #[test]
    fn test_set_config_reaches_ticker() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        carousel.set_config(CarouselConfig::new().auto_paging(true).transition_duration(2.0));
        scheduler.advance(AUTO_PAGE_INTERVAL);
        assert_eq!(carousel.current_page(), 1);
        assert_eq!(
            carousel.handle().track_style().unwrap().transition,
            Transition::animated(2.0)
        );
    }

    #[test]
    fn test_unmount_stops_ticks() {
        let scheduler = TimerScheduler::new();
        let mut carousel = mounted(&scheduler, CarouselConfig::new().auto_paging(true), 3);

        carousel.unmount();
        assert!(!carousel.is_mounted());
        assert_eq!(scheduler.timer_count(), 0);
        scheduler.advance(AUTO_PAGE_INTERVAL * 4);
        assert_eq!(carousel.current_page(), 0);
    }

    #[test]
    fn test_drop_releases_timer() {
        let scheduler = TimerScheduler::new();
        {
            let _carousel = mounted(&scheduler, CarouselConfig::new().auto_paging(true), 3);
            assert_eq!(scheduler.timer_count(), 1);
        }
        assert_eq!(scheduler.timer_count(), 0);
    }

    #[test]
    fn test_lifted_state_receives_changes() {
        let scheduler = TimerScheduler::new();
        let page = State::new(0usize);
        let mut carousel = Carousel::new(scheduler.handle(), CarouselConfig::new().auto_paging(true))
            .with_page_state(PageState::from(page.clone()));
        carousel.mount(100.0).unwrap();
        carousel.render(&slides(3));

        drag(&carousel, 80.0, 40.0);
        assert_eq!(page.get(), 1);

        // The caller moves the page; the widget follows without a copy
        page.set(2);
        assert_eq!(carousel.current_page(), 2);
        scheduler.advance(AUTO_PAGE_INTERVAL);
        assert_eq!(page.get(), 0);
    }

    #[test]
    fn test_switch_back_to_local_state() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);
        let page = State::new(2usize);

        carousel.set_page_state(Some(PageState::from(page.clone())));
        assert_eq!(carousel.current_page(), 2);

        carousel.set_page_state(None);
        assert_eq!(carousel.current_page(), 0);
    }

    #[test]
    fn test_render_structure() {
        let scheduler = TimerScheduler::new();
        let config = CarouselConfig::new()
            .class_name("hero")
            .page_indicator(PageIndicator::Counter);
        let carousel = mounted(&scheduler, config, 4);

        let tree = carousel.render(&slides(4));
        assert_eq!(tree.class_list(), &["hero".to_string(), "wrapper".to_string()]);
        assert_eq!(tree.children().len(), 2);

        let contents = &tree.children()[0];
        assert!(contents.has_class("contents") && contents.has_class("h-auto"));
        assert!(contents.inline_style().is_none());
        assert_eq!(contents.children().len(), 4);
        assert_eq!(contents.children()[3].key_str(), Some("s3"));
        assert!(contents.children().iter().all(|li| li.has_class("h-full")));

        assert_eq!(tree.children()[1].text_content(), Some("1/4"));
    }

    #[test]
    fn test_class_name_matching_wrapper_is_kept_once() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::new().class_name("wrapper"), 1);

        let tree = carousel.render(&slides(1));
        assert_eq!(tree.class_list(), &["wrapper".to_string()]);
        assert!(tree.to_html().starts_with("<div class=\"wrapper\">"));
    }

    #[test]
    fn test_height_resizing_collapses_other_pages() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::new().need_height_resizing(true), 3);
        drag(&carousel, 80.0, 40.0);

        let tree = carousel.render(&slides(3));
        let items = tree.children()[0].children();
        assert!(items[0].has_class("h-0"));
        assert!(items[1].has_class("h-full"));
        assert!(items[2].has_class("h-0"));
    }

    #[test]
    fn test_render_keeps_imperative_style() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 3);

        carousel
            .handle()
            .set_translate_x_style_in_carousel(2, Transition::None);
        let tree = carousel.render(&slides(3));
        assert_eq!(
            tree.children()[0].inline_style(),
            Some("transform: translateX(-200%); transition: none; ")
        );
        // The fast path moves the track only, not the page index
        assert_eq!(carousel.current_page(), 0);
    }

    #[test]
    fn test_missing_keys_fall_back_to_index() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(
            &scheduler,
            CarouselConfig::new().page_indicator(PageIndicator::Dot),
            0,
        );

        let tree = carousel.render(&[div().text("a"), div().text("b")]);
        let items = tree.children()[0].children();
        assert_eq!(items[1].key_str(), Some("1"));
        assert_eq!(tree.children()[1].children()[0].key_str(), Some("dot_0"));
    }

    #[test]
    fn test_shrinking_children_clamps_page() {
        let scheduler = TimerScheduler::new();
        let carousel = mounted(&scheduler, CarouselConfig::default(), 4);
        drag(&carousel, 80.0, 40.0);
        drag(&carousel, 80.0, 40.0);
        drag(&carousel, 80.0, 40.0);
        assert_eq!(carousel.current_page(), 3);

        carousel.render(&slides(2));
        assert_eq!(carousel.current_page(), 1);
    }
}
