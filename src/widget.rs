use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, TouchEvent};

use crate::autoplay;
use crate::config::{Animation, ArrowBuilder, ArrowSide, BulletBuilder, Options};
use crate::dom::{self, Chrome};
use crate::drag::{self, Arbiter, PointerId};
use crate::error::{CarouselError, Result};
use crate::geometry::{DomGeometry, Geometry};
use crate::resize::{Debounce, RESIZE_DEBOUNCE_MS};
use crate::track::{Commit, Track};

/// The carousel widget. Built into a host-owned container element; all
/// operations go through the shared commit path on [`Track`], whatever the
/// input source (arrows, bullets, drag end, autoplay, resize, direct calls).
pub struct Carousel {
    inner: Rc<Inner>,
}

struct Inner {
    chrome: Chrome,
    track: RefCell<Track>,
    arbiter: RefCell<Arbiter>,
    full_width: Cell<bool>,
    draggable: Cell<bool>,
    arrow_builder: Option<ArrowBuilder>,
    bullet_builder: Option<BulletBuilder>,
    bullets: RefCell<Vec<Element>>,
    bullets_box: RefCell<Option<Element>>,
    bullet_listeners: RefCell<Vec<EventListener>>,
    arrows_box: RefCell<Option<Element>>,
    arrow_listeners: RefCell<Vec<EventListener>>,
    gesture_listeners: RefCell<Vec<EventListener>>,
    resize_listener: RefCell<Option<EventListener>>,
    resize_debounce: RefCell<Debounce>,
    resize_timer: RefCell<Option<Timeout>>,
    autoplay_timer: RefCell<Option<Interval>>,
}

impl Carousel {
    pub fn new(container: &Element, options: Options) -> Result<Self> {
        options.validate()?;
        let document = container.owner_document().ok_or_else(|| {
            CarouselError::Configuration("container is not attached to a document".to_string())
        })?;

        let Options {
            slides,
            full_width_slide,
            animation,
            draggable,
            arrows,
            arrow_builder,
            bullets,
            bullet_builder,
            autoplay_delay,
        } = options;

        let contents = dom::collect_slides(&document, slides)?;
        let chrome = Chrome::build(&document, container, contents)?;
        let track = Track::new(chrome.slides.len(), animation);

        let inner = Rc::new(Inner {
            chrome,
            track: RefCell::new(track),
            arbiter: RefCell::new(Arbiter::new()),
            full_width: Cell::new(full_width_slide),
            draggable: Cell::new(false),
            arrow_builder,
            bullet_builder,
            bullets: RefCell::new(Vec::new()),
            bullets_box: RefCell::new(None),
            bullet_listeners: RefCell::new(Vec::new()),
            arrows_box: RefCell::new(None),
            arrow_listeners: RefCell::new(Vec::new()),
            gesture_listeners: RefCell::new(Vec::new()),
            resize_listener: RefCell::new(None),
            resize_debounce: RefCell::new(Debounce::new()),
            resize_timer: RefCell::new(None),
            autoplay_timer: RefCell::new(None),
        });

        Inner::install_resize_listener(&inner);
        inner.reconcile();
        // Initial alignment is not user activity.
        inner.track.borrow_mut().clear_autoplay_suppression();

        let carousel = Carousel { inner };
        if arrows {
            carousel.add_arrows()?;
        }
        if bullets {
            carousel.add_bullets()?;
        }
        if draggable {
            carousel.enable_dragging()?;
        }
        if let Some(delay) = autoplay_delay {
            carousel.start_autoplay(delay)?;
        }
        Ok(carousel)
    }

    pub fn active_index(&self) -> usize {
        self.inner.track.borrow().active_index()
    }

    pub fn slide_count(&self) -> usize {
        self.inner.track.borrow().slide_count()
    }

    pub fn animation(&self) -> Animation {
        self.inner.track.borrow().animation()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.arbiter.borrow().is_dragging()
    }

    pub fn next(&self) -> Result<()> {
        let commit = self.inner.track.borrow_mut().next(&self.inner.geometry())?;
        self.inner.apply(commit);
        Ok(())
    }

    pub fn previous(&self) -> Result<()> {
        let commit = self
            .inner
            .track
            .borrow_mut()
            .previous(&self.inner.geometry())?;
        self.inner.apply(commit);
        Ok(())
    }

    pub fn go_to(&self, index: usize) -> Result<()> {
        let commit = self
            .inner
            .track
            .borrow_mut()
            .go_to(index, &self.inner.geometry())?;
        self.inner.apply(commit);
        Ok(())
    }

    /// Switching away from the slide animation force-ends any drag and
    /// detaches the gesture listeners; switching back restores the offset
    /// for the current index.
    pub fn set_animation(&self, animation: Animation) {
        if self.inner.track.borrow().animation() == animation {
            return;
        }
        if animation == Animation::Plain {
            self.disable_dragging();
            self.inner.chrome.clear_offset();
        }
        self.inner.track.borrow_mut().set_animation(animation);
        if animation == Animation::Slide {
            let index = self.inner.track.borrow().active_index();
            let result = self
                .inner
                .track
                .borrow_mut()
                .commit(index, &self.inner.geometry());
            match result {
                Ok(commit) => self.inner.apply(commit),
                Err(err) => log::warn!("offset restore after animation change failed: {err}"),
            }
        }
    }

    pub fn set_full_width(&self, full_width: bool) {
        self.inner.full_width.set(full_width);
        self.inner.reconcile();
    }

    pub fn enable_dragging(&self) -> Result<()> {
        if self.inner.track.borrow().animation() != Animation::Slide {
            return Err(CarouselError::Configuration(
                "dragging requires the slide animation".to_string(),
            ));
        }
        if self.inner.draggable.get() {
            return Ok(());
        }
        Inner::install_gesture_listeners(&self.inner);
        self.inner.draggable.set(true);
        Ok(())
    }

    pub fn disable_dragging(&self) {
        // Force-end an in-flight drag before the listener group drops, so
        // the rail never stays in a mid-drag untracked position.
        self.inner.force_end_drag();
        self.inner.gesture_listeners.borrow_mut().clear();
        self.inner.draggable.set(false);
    }

    /// Replaces any existing arrow pair.
    pub fn add_arrows(&self) -> Result<()> {
        self.remove_arrows();
        let inner = &self.inner;
        let document = &inner.chrome.document;
        let container = dom::create_div(document, dom::ARROWS_CLASS)?;
        let mut listeners = Vec::with_capacity(2);
        for side in [ArrowSide::Previous, ArrowSide::Next] {
            let arrow = match &inner.arrow_builder {
                Some(builder) => builder(side),
                None => dom::default_arrow(document, side)?,
            };
            let weak = Rc::downgrade(inner);
            listeners.push(EventListener::new(&arrow, "click", move |_| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match side {
                    ArrowSide::Previous => inner.navigate_previous(),
                    ArrowSide::Next => inner.navigate_next(),
                }
            }));
            let _ = container.append_child(&arrow);
        }
        let _ = inner.chrome.root.append_child(&container);
        *inner.arrows_box.borrow_mut() = Some(container);
        *inner.arrow_listeners.borrow_mut() = listeners;
        Ok(())
    }

    pub fn remove_arrows(&self) {
        self.inner.arrow_listeners.borrow_mut().clear();
        if let Some(container) = self.inner.arrows_box.borrow_mut().take() {
            container.remove();
        }
    }

    /// Replaces any existing bullet set, so repeated calls never accumulate
    /// duplicate bullets.
    pub fn add_bullets(&self) -> Result<()> {
        self.remove_bullets();
        let inner = &self.inner;
        let document = &inner.chrome.document;
        let container = dom::create_div(document, dom::BULLETS_CLASS)?;
        let count = inner.chrome.slides.len();
        let mut bullets = Vec::with_capacity(count);
        let mut listeners = Vec::with_capacity(count);
        for index in 0..count {
            let bullet = match &inner.bullet_builder {
                Some(builder) => builder(index),
                None => dom::default_bullet(document, index)?,
            };
            let weak = Rc::downgrade(inner);
            listeners.push(EventListener::new(&bullet, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.navigate_to(index);
                }
            }));
            let _ = container.append_child(&bullet);
            bullets.push(bullet);
        }
        let _ = inner.chrome.root.append_child(&container);
        inner
            .chrome
            .mark_active(&bullets, inner.track.borrow().active_index());
        *inner.bullets.borrow_mut() = bullets;
        *inner.bullets_box.borrow_mut() = Some(container);
        *inner.bullet_listeners.borrow_mut() = listeners;
        Ok(())
    }

    pub fn remove_bullets(&self) {
        self.inner.bullet_listeners.borrow_mut().clear();
        self.inner.bullets.borrow_mut().clear();
        if let Some(container) = self.inner.bullets_box.borrow_mut().take() {
            container.remove();
        }
    }

    /// Stops any running schedule and arms a fresh one.
    pub fn start_autoplay(&self, delay_ms: f64) -> Result<()> {
        let delay = autoplay::validate_delay(delay_ms)?;
        self.stop_autoplay();
        let weak = Rc::downgrade(&self.inner);
        let interval = Interval::new(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.autoplay_tick();
            }
        });
        *self.inner.autoplay_timer.borrow_mut() = Some(interval);
        Ok(())
    }

    /// Idempotent; dropping the interval cancels it.
    pub fn stop_autoplay(&self) {
        self.inner.autoplay_timer.borrow_mut().take();
    }

    /// Forced geometry reconciliation, synchronous. Supersedes any pending
    /// debounced resize pass.
    pub fn refresh(&self) {
        self.inner.reconcile();
    }
}

impl Inner {
    fn geometry(&self) -> DomGeometry<'_> {
        DomGeometry {
            viewport: &self.chrome.viewport,
            rail: &self.chrome.rail,
            slides: &self.chrome.slides,
        }
    }

    fn apply(&self, commit: Commit) {
        self.chrome.mark_active(&self.bullets.borrow(), commit.index);
        if let Some(offset) = commit.offset {
            self.chrome.apply_offset(offset);
        }
    }

    fn navigate_next(&self) {
        let result = self.track.borrow_mut().next(&self.geometry());
        match result {
            Ok(commit) => self.apply(commit),
            Err(err) => log::warn!("arrow navigation failed: {err}"),
        }
    }

    fn navigate_previous(&self) {
        let result = self.track.borrow_mut().previous(&self.geometry());
        match result {
            Ok(commit) => self.apply(commit),
            Err(err) => log::warn!("arrow navigation failed: {err}"),
        }
    }

    fn navigate_to(&self, index: usize) {
        let result = self.track.borrow_mut().go_to(index, &self.geometry());
        match result {
            Ok(commit) => self.apply(commit),
            Err(err) => log::warn!("bullet navigation failed: {err}"),
        }
    }

    fn autoplay_tick(&self) {
        let result = self.track.borrow_mut().autoplay_tick(&self.geometry());
        match result {
            Ok(Some(commit)) => self.apply(commit),
            Ok(None) => log::debug!("autoplay tick suppressed by recent user action"),
            Err(err) => log::warn!("autoplay advance failed: {err}"),
        }
    }

    /// The reconciliation pass: reapply slide widths in full-width mode and,
    /// in slide animation, re-commit the current index so the active slide
    /// stays flush after layout changes.
    fn reconcile(&self) {
        self.resize_timer.borrow_mut().take();
        self.resize_debounce.borrow_mut().cancel();

        if self.full_width.get() {
            let width = self.geometry().viewport_width();
            self.chrome.apply_full_width(Some(width));
        } else {
            self.chrome.apply_full_width(None);
        }

        if self.track.borrow().animation() == Animation::Slide {
            let index = self.track.borrow().active_index();
            let result = self.track.borrow_mut().commit(index, &self.geometry());
            match result {
                Ok(commit) => self.apply(commit),
                Err(err) => log::warn!("resize reconciliation failed: {err}"),
            }
        }
    }

    fn schedule_reconcile(self: &Rc<Self>) {
        self.resize_debounce.borrow_mut().signal(js_sys::Date::now());
        self.arm_resize_timer(RESIZE_DEBOUNCE_MS);
    }

    fn arm_resize_timer(self: &Rc<Self>, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay_ms, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.resize_timer.borrow_mut().take();
            let now = js_sys::Date::now();
            if inner.resize_debounce.borrow_mut().due(now) {
                inner.reconcile();
            } else if let Some(remaining) = inner.resize_debounce.borrow().remaining_ms(now) {
                // The timer beat the clock deadline; finish the remainder
                // rather than dropping the pass.
                inner.arm_resize_timer((remaining.ceil() as u32).max(1));
            }
        });
        // Replacing the pending timeout drops, and thereby cancels, it.
        *self.resize_timer.borrow_mut() = Some(timeout);
    }

    fn install_resize_listener(inner: &Rc<Inner>) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window available, resize reconciliation disabled");
            return;
        };
        let weak = Rc::downgrade(inner);
        let listener = EventListener::new(&window, "resize", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_reconcile();
            }
        });
        *inner.resize_listener.borrow_mut() = Some(listener);
    }

    /// The gesture listener group. Dropping the vector detaches every
    /// mouse/touch listener at once.
    fn install_gesture_listeners(inner: &Rc<Inner>) {
        let viewport = &inner.chrome.viewport;
        let mut listeners = Vec::with_capacity(7);

        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new_with_options(
            viewport,
            "mousedown",
            non_passive(),
            move |event: &Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if event.button() != 0 {
                    return;
                }
                if inner.begin_drag(PointerId::Mouse, f64::from(event.client_x())) {
                    event.prevent_default();
                }
            },
        ));

        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new_with_options(
            viewport,
            "mousemove",
            non_passive(),
            move |event: &Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if inner.move_drag(PointerId::Mouse, f64::from(event.client_x())) {
                    event.prevent_default();
                }
            },
        ));

        for kind in ["mouseup", "mouseleave"] {
            let weak = Rc::downgrade(inner);
            listeners.push(EventListener::new(viewport, kind, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.end_drag(PointerId::Mouse);
                }
            }));
        }

        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new_with_options(
            viewport,
            "touchstart",
            non_passive(),
            move |event: &Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                // Track the first touch of the event; anything after it,
                // and any start while a session runs, is ignored.
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let pointer = PointerId::Touch(touch.identifier());
                if inner.begin_drag(pointer, f64::from(touch.client_x())) {
                    event.prevent_default();
                }
            },
        ));

        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new_with_options(
            viewport,
            "touchmove",
            non_passive(),
            move |event: &Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = event.changed_touches();
                let mut tracked = false;
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let pointer = PointerId::Touch(touch.identifier());
                        tracked |= inner.move_drag(pointer, f64::from(touch.client_x()));
                    }
                }
                if tracked {
                    event.prevent_default();
                }
            },
        ));

        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new(viewport, "touchend", move |event: &Event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let touches = event.changed_touches();
            for i in 0..touches.length() {
                if let Some(touch) = touches.get(i) {
                    inner.end_drag(PointerId::Touch(touch.identifier()));
                }
            }
        }));

        *inner.gesture_listeners.borrow_mut() = listeners;
    }

    fn begin_drag(&self, pointer: PointerId, x: f64) -> bool {
        let entry_offset = self.track.borrow().rail_offset();
        if !self.arbiter.borrow_mut().begin(pointer, x, entry_offset) {
            return false;
        }
        // The rail must track the pointer without animated lag.
        self.chrome.set_transition(false);
        true
    }

    fn move_drag(&self, pointer: PointerId, x: f64) -> bool {
        let Some(offset) = self.arbiter.borrow().update(pointer, x) else {
            return false;
        };
        self.track.borrow_mut().set_live_offset(offset);
        self.chrome.apply_offset(offset);
        true
    }

    fn end_drag(&self, pointer: PointerId) {
        if !self.arbiter.borrow_mut().finish(pointer) {
            return;
        }
        self.settle_after_drag();
    }

    fn force_end_drag(&self) {
        if self.arbiter.borrow_mut().cancel() {
            self.settle_after_drag();
        }
    }

    fn settle_after_drag(&self) {
        self.chrome.set_transition(true);
        let result = drag::resolve_drop_index(&self.geometry())
            .and_then(|index| self.track.borrow_mut().commit(index, &self.geometry()));
        match result {
            Ok(commit) => self.apply(commit),
            Err(err) => log::warn!("drag resolution failed: {err}"),
        }
    }
}

fn non_passive() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}
