//! The dropdown widget engine.
//!
//! `Dropdown` wires the parts together: the lifecycle gates everything, and
//! every other part reacts to its transitions (see [`Dropdown::tick`]). The
//! host calls the operations below with the current time, forwards input
//! events, and draws from [`Dropdown::view`]. Caller-facing outputs are
//! produced through callbacks and collected until [`Dropdown::take_messages`].
//!
//! The dropdown is controlled: selecting emits `on_change` but the displayed
//! value only changes when the caller passes it back through
//! [`Dropdown::set_value`].

use std::time::Duration;

use web_time::Instant;

use crate::accessibility::AriaAttributes;
use crate::callback::{Callback, Callback0};
use crate::callback_setter;
use crate::config::DropdownConfig;
use crate::error::DropdownError;
use crate::event::{Event, EventStatus, KeyCode, KeyModifiers, WindowEvent};
use crate::focus::{FocusCoordinator, FocusOutcome, FocusTarget};
use crate::hover::{HoverIntent, HoverIntentController};
use crate::layout::{Point, Size};
use crate::lifecycle::{OpenCloseController, OpenState, Transition};
use crate::navigation::{KeyOutcome, KeyboardNavigator, NavContext};
use crate::option::{DropdownOption, OptionList, SelectionValue};
use crate::overflow::TextOverflowManager;
use crate::position::{PlacementOutcome, PositionEngine};
use crate::registry::{DropdownRegistry, InstanceId};
use crate::scheduler::Scheduler;
use crate::scroll_sync::{ScrollMetrics, ScrollSync};
use crate::search::{SearchFilterEngine, SearchStatus};
use crate::surface::{HeadlessSurface, Surface};
use crate::text_metrics::{ApproxMeasurer, TextMeasurer};
use crate::validation::Validation;
use crate::view::{DropdownView, EmptyState, OverlayView, RowView, SearchView, TriggerView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DropdownTimer {
    SearchDebounce,
    TypeAheadReset,
    PositionRetry,
    ScrollIntoView,
    ScrollMetrics,
    FocusMove,
    FocusCheck,
    KeyboardModeExit,
    HighlightReset,
    ValidationHide,
}

/// Timers that belong to one open session.
const SESSION_TIMERS: &[DropdownTimer] = &[
    DropdownTimer::PositionRetry,
    DropdownTimer::ScrollIntoView,
    DropdownTimer::ScrollMetrics,
    DropdownTimer::FocusMove,
    DropdownTimer::FocusCheck,
    DropdownTimer::KeyboardModeExit,
];

/// A searchable selector with a floating option list.
pub struct Dropdown<Message> {
    config: DropdownConfig,
    options: OptionList,
    value: SelectionValue,

    lifecycle: OpenCloseController,
    search: SearchFilterEngine,
    nav: KeyboardNavigator,
    position: PositionEngine,
    focus: FocusCoordinator,
    hover: HoverIntentController,
    scroll: ScrollSync,
    label: TextOverflowManager,
    validation: Validation,
    timers: Scheduler<DropdownTimer>,

    surface: Box<dyn Surface>,
    measurer: Box<dyn TextMeasurer>,
    /// Last scroll-lock state pushed to the surface
    scroll_locked: bool,
    /// Row waiting for the next frame to be scrolled into view
    pending_scroll: Option<usize>,

    outbox: Vec<Message>,
    on_change: Callback<SelectionValue, Message>,
    on_add_new: Callback<String, Message>,
    on_blur: Callback0<Message>,
    on_open_change: Callback<bool, Message>,
}

impl<Message> Dropdown<Message> {
    /// Create a dropdown registered with `registry`.
    pub fn new(registry: DropdownRegistry, config: DropdownConfig) -> Result<Self, DropdownError> {
        config.validate()?;

        let mut dropdown = Self {
            lifecycle: OpenCloseController::new(registry, &config.timings),
            search: SearchFilterEngine::new(config.searchable || config.type_ahead),
            nav: KeyboardNavigator::new(),
            position: PositionEngine::new(config.width, config.max_list_height),
            focus: FocusCoordinator::new(),
            hover: HoverIntentController::new(config.hover_to_open, &config.timings),
            scroll: ScrollSync::new(),
            label: TextOverflowManager::new(),
            validation: Validation::new(config.required, config.required_message.clone()),
            timers: Scheduler::new(),
            surface: Box::new(HeadlessSurface::default()),
            measurer: Box::new(ApproxMeasurer::default()),
            scroll_locked: false,
            pending_scroll: None,
            outbox: Vec::new(),
            on_change: Callback::none(),
            on_add_new: Callback::none(),
            on_blur: Callback::none(),
            on_open_change: Callback::none(),
            options: OptionList::empty(),
            value: SelectionValue::default(),
            config,
        };
        dropdown.refresh_label();
        log::debug!("{}: created", dropdown.id());
        Ok(dropdown)
    }

    // Callback setters using macros
    callback_setter!(on_change, SelectionValue);
    callback_setter!(on_add_new, String);
    callback_setter!(on_blur);
    callback_setter!(on_open_change, bool);

    /// Set the initial options.
    pub fn options(mut self, options: OptionList) -> Self {
        self.options = options;
        self.search.refilter(&self.options);
        self.refresh_label();
        self
    }

    /// Set the initial value.
    pub fn value(mut self, value: SelectionValue) -> Self {
        self.value = value;
        self.refresh_label();
        self
    }

    /// Use a host surface for geometry, focus and scrolling.
    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Box::new(surface);
        self.refresh_label();
        self
    }

    /// Use a different text measurer for label overflow.
    pub fn measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self.refresh_label();
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn id(&self) -> InstanceId {
        self.lifecycle.id()
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn state(&self) -> OpenState {
        self.lifecycle.state()
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn styles_applied(&self) -> bool {
        self.lifecycle.styles_applied()
    }

    pub fn current_options(&self) -> &OptionList {
        &self.options
    }

    pub fn current_value(&self) -> &SelectionValue {
        &self.value
    }

    /// Term as typed.
    pub fn search_term(&self) -> &str {
        self.search.raw_term()
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search.status()
    }

    /// Options currently shown, in display order.
    pub fn filtered(&self) -> Vec<&DropdownOption> {
        self.search.filtered(&self.options)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.nav.highlighted()
    }

    /// Highlight as `-1` (nothing) or an index into [`Dropdown::filtered`].
    pub fn highlighted_index(&self) -> isize {
        self.nav.highlighted_index()
    }

    pub fn is_keyboard_mode(&self) -> bool {
        self.nav.is_keyboard_mode()
    }

    pub fn placement(&self) -> &PositionEngine {
        &self.position
    }

    pub fn scroll_state(&self) -> &ScrollSync {
        &self.scroll
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Whether the user has left the field at least once.
    pub fn is_touched(&self) -> bool {
        self.focus.is_touched()
    }

    /// Earliest time at which [`Dropdown::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.lifecycle.next_deadline(),
            self.hover.next_deadline(),
            self.timers.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Messages produced since the last call, including those of a close
    /// forced by another instance that has not been observed yet.
    pub fn take_messages(&mut self) -> Vec<Message> {
        self.sync();
        std::mem::take(&mut self.outbox)
    }

    // ------------------------------------------------------------------
    // Caller inputs
    // ------------------------------------------------------------------

    /// Replace the option list (called on every render with fresh data).
    pub fn set_options(&mut self, options: OptionList, now: Instant) {
        self.sync();
        self.options = options;
        if self.search.refilter(&self.options) {
            self.on_filter_changed(now);
        }
        self.nav.clamp(self.search.filtered_len());
        self.refresh_label();
    }

    /// Replace the value the caller owns.
    pub fn set_value(&mut self, value: SelectionValue) {
        if value == self.value {
            return;
        }
        self.value = value;
        self.label.reset();
        if self.validation.on_value_change(self.value.is_empty()) {
            self.timers.cancel(DropdownTimer::ValidationHide);
        }
        self.refresh_label();
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Open when closed, close when open. Ignored during the exit animation.
    pub fn toggle(&mut self, now: Instant) {
        self.sync();
        self.lifecycle.toggle(now);
        self.sync();
    }

    pub fn open(&mut self, now: Instant) {
        self.sync();
        self.lifecycle.open_this(now);
        self.sync();
    }

    pub fn close(&mut self, now: Instant) {
        self.sync();
        self.lifecycle.close_this(now);
        self.sync();
    }

    /// Pick an option. Replaces a single value (and closes), toggles
    /// membership in checkbox mode (and stays open).
    pub fn select(&mut self, option_id: &str, now: Instant) {
        self.sync();
        if self.options.get(option_id).is_none() {
            log::warn!("{}: ignoring selection of unknown option {:?}", self.id(), option_id);
            return;
        }

        let next = if self.config.mode.is_multiple() {
            let current = match &self.value {
                SelectionValue::Multiple(_) => self.value.clone(),
                SelectionValue::Single(id) => {
                    SelectionValue::Multiple(id.iter().cloned().collect())
                }
            };
            current.with_toggled(option_id)
        } else {
            SelectionValue::single(option_id)
        };
        log::debug!("{}: selected {:?}", self.id(), option_id);
        self.outbox.extend(self.on_change.call(next));

        if self.config.mode.closes_on_select() {
            self.lifecycle.close_this(now);
        }
        self.sync();
    }

    /// The search box text changed.
    pub fn on_search_term_change(&mut self, text: impl Into<String>, now: Instant) {
        if self.search.on_term_change(text) {
            self.timers.schedule(
                DropdownTimer::SearchDebounce,
                now,
                self.config.timings.search_debounce(),
            );
        } else {
            self.timers.cancel(DropdownTimer::SearchDebounce);
        }
    }

    /// Offer the current term to the caller as a new option. Skipped when the
    /// term is blank or no add-new handler is set.
    pub fn add_new(&mut self, now: Instant) {
        let term = self.search.raw_term().trim().to_string();
        if term.is_empty() || self.on_add_new.is_none() {
            log::trace!("{}: add-new skipped", self.id());
            return;
        }
        log::debug!("{}: add new {:?}", self.id(), term);
        self.outbox.extend(self.on_add_new.call(term));
        self.validation.clear();
        self.timers.cancel(DropdownTimer::ValidationHide);
        self.lifecycle.close_this(now);
        self.sync();
    }

    /// The field lost focus: mark touched, validate and notify.
    pub fn blur(&mut self, now: Instant) {
        self.focus.mark_touched();
        if self.validation.on_blur(self.value.is_empty()) {
            match self.config.timings.validation_auto_hide() {
                Some(delay) => self
                    .timers
                    .schedule(DropdownTimer::ValidationHide, now, delay),
                None => {
                    self.timers.cancel(DropdownTimer::ValidationHide);
                }
            }
        }
        self.outbox.extend(self.on_blur.emit());
    }

    /// Show the full trigger label. Only takes effect when it is truncated.
    pub fn expand_label(&mut self) -> bool {
        self.label.request_expand()
    }

    pub fn collapse_label(&mut self) -> bool {
        self.label.collapse()
    }

    // ------------------------------------------------------------------
    // Input plumbing
    // ------------------------------------------------------------------

    /// Route an input event.
    pub fn on_event(&mut self, event: &Event, now: Instant) -> EventStatus {
        match event {
            Event::KeyPress { key, modifiers } => self.handle_key(*key, *modifiers, now),
            Event::MouseMove { position } => {
                self.mouse_moved(*position, now);
                EventStatus::Ignored
            }
            Event::PointerEnterTrigger => {
                self.pointer_enter_trigger(now);
                EventStatus::Ignored
            }
            Event::PointerEnterOverlay => {
                self.pointer_enter_overlay();
                EventStatus::Ignored
            }
            Event::PointerLeave => {
                self.pointer_leave(now);
                EventStatus::Ignored
            }
            Event::OptionHover { index } => {
                if self.hover_option(*index) {
                    EventStatus::Captured
                } else {
                    EventStatus::Ignored
                }
            }
            Event::ListScroll(metrics) => {
                self.list_scrolled(*metrics);
                EventStatus::Ignored
            }
            Event::Window(window_event) => self.window_event(*window_event, now),
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        now: Instant,
    ) -> EventStatus {
        self.sync();
        if !self.lifecycle.is_open() || modifiers.has_command() {
            return EventStatus::Ignored;
        }
        if let Some(status) = self.type_ahead_key(key, now) {
            return status;
        }

        let ctx = NavContext {
            len: self.search.filtered_len(),
            has_search_box: self.config.searchable,
            page_size: self.config.page_size,
        };
        let status = match self.nav.handle_key(key, modifiers, ctx) {
            KeyOutcome::Ignored => EventStatus::Ignored,
            KeyOutcome::Moved(index) => {
                self.timers.cancel(DropdownTimer::KeyboardModeExit);
                self.request_scroll_into_view(index, now);
                EventStatus::Captured
            }
            KeyOutcome::Activate(Some(index)) => {
                let id = self
                    .search
                    .option_at(&self.options, index)
                    .map(|option| option.id.clone());
                if let Some(id) = id {
                    self.select(&id, now);
                }
                EventStatus::Captured
            }
            KeyOutcome::Activate(None) => {
                if self.search.offers_add_new() {
                    self.add_new(now);
                }
                EventStatus::Captured
            }
            KeyOutcome::Dismiss => {
                self.label.collapse();
                self.lifecycle.close_this(now);
                EventStatus::Captured
            }
        };
        self.sync();
        status
    }

    fn type_ahead_key(&mut self, key: KeyCode, now: Instant) -> Option<EventStatus> {
        if self.config.searchable || !self.config.type_ahead {
            return None;
        }
        match key {
            KeyCode::Char(c) if !c.is_control() => {
                self.search.push_char(c);
            }
            KeyCode::Space if !self.search.raw_term().is_empty() => {
                self.search.push_char(' ');
            }
            KeyCode::Backspace => {
                if !self.search.pop_char() {
                    return Some(EventStatus::Ignored);
                }
            }
            _ => return None,
        }

        let timings = self.config.timings;
        self.timers
            .schedule(DropdownTimer::SearchDebounce, now, timings.search_debounce());
        self.timers
            .schedule(DropdownTimer::TypeAheadReset, now, timings.type_ahead_reset());
        Some(EventStatus::Captured)
    }

    pub fn mouse_moved(&mut self, position: Point, now: Instant) {
        if self.nav.mouse_moved(position) {
            self.timers.schedule(
                DropdownTimer::KeyboardModeExit,
                now,
                self.config.timings.keyboard_mode_exit(),
            );
        }
    }

    /// Pointer over a row. Returns true if the highlight moved.
    pub fn hover_option(&mut self, index: usize) -> bool {
        self.lifecycle.is_open() && self.nav.hover(index, self.search.filtered_len())
    }

    pub fn pointer_enter_trigger(&mut self, now: Instant) {
        self.sync();
        self.hover.pointer_enter_trigger(self.state(), now);
    }

    pub fn pointer_enter_overlay(&mut self) {
        self.hover.pointer_enter_overlay();
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.sync();
        self.hover.pointer_leave(self.state(), now);
    }

    /// Window scroll, resize and focus-out. Ignored unless open.
    pub fn window_event(&mut self, event: WindowEvent, now: Instant) -> EventStatus {
        self.sync();
        if !self.focus.is_attached() {
            return EventStatus::Ignored;
        }
        match event {
            WindowEvent::Scroll => {
                let viewport = self.surface.viewport();
                self.place_in(viewport, now);
            }
            WindowEvent::Resize(viewport) => {
                self.place_in(viewport, now);
                self.refresh_label();
            }
            WindowEvent::FocusOut => {
                if self.focus.focus_out() {
                    self.timers
                        .schedule(DropdownTimer::FocusCheck, now, Duration::ZERO);
                }
            }
        }
        EventStatus::Captured
    }

    pub fn list_scrolled(&mut self, metrics: ScrollMetrics) {
        if self.lifecycle.is_open() {
            self.scroll.update(metrics);
        }
    }

    /// Run everything that is due at `now`, in deadline order.
    pub fn tick(&mut self, now: Instant) {
        self.sync();
        while let Some(at) = self.next_deadline().filter(|&deadline| deadline <= now) {
            self.lifecycle.tick(at);
            self.sync();
            for intent in self.hover.take_due(at) {
                self.on_hover_intent(intent, at);
            }
            for timer in self.timers.take_due(at) {
                self.on_timer(timer, at);
            }
            self.sync();
        }
    }

    /// Tear down: cancel every timer and give up the registry.
    pub fn unmount(&mut self) {
        self.timers.clear();
        self.hover.cancel_all();
        self.focus.detach();
        self.lifecycle.unmount();
        self.search.reset(&self.options);
        self.position.reset();
        self.scroll.reset();
        self.nav.reset();
        self.pending_scroll = None;
        self.push_scroll_lock();
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Snapshot for rendering.
    pub fn view(&self) -> DropdownView {
        let trigger = TriggerView {
            label: self.label.display_text().to_string(),
            full_label: self.label.full_text().to_string(),
            is_placeholder: self.trigger_text().1,
            is_overflowing: self.label.is_overflowing(),
            is_expanded: self.label.is_expanded(),
            aria: AriaAttributes::trigger(self.is_open()),
        };

        DropdownView {
            trigger,
            overlay: self.state().is_mounted().then(|| self.overlay_view()),
            validation_message: self.validation.error_message().map(str::to_string),
            highlighted_index: self.nav.highlighted_index(),
        }
    }

    fn overlay_view(&self) -> OverlayView {
        let highlighted = self.nav.highlighted();
        let rows: Vec<RowView> = self
            .search
            .filtered(&self.options)
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = self.value.contains(&option.id);
                RowView {
                    id: option.id.clone(),
                    name: option.name.clone(),
                    code: option.code.clone(),
                    description: option.description.clone(),
                    highlighted: highlighted == Some(i),
                    selected,
                    aria: AriaAttributes::option(&option.id, selected),
                }
            })
            .collect();

        let active = highlighted
            .and_then(|i| self.search.option_at(&self.options, i))
            .map(|option| option.id.as_str());
        let search = (self.config.searchable || self.config.type_ahead).then(|| SearchView {
            term: self.search.raw_term().to_string(),
            status: self.search.status(),
            aria: AriaAttributes::search_input(active),
        });
        let add_new_term = (self.on_add_new.is_some() && self.search.offers_add_new())
            .then(|| self.search.raw_term().trim());

        OverlayView {
            state: self.state(),
            styles_applied: self.styles_applied(),
            direction: self.position.direction(),
            style: *self.position.style(),
            is_ready: self.position.is_ready(),
            search,
            empty: EmptyState::resolve(self.options.len(), rows.len(), add_new_term),
            rows,
            is_scrollable: self.scroll.is_scrollable(),
            reached_bottom: self.scroll.reached_bottom(),
            scrolled_from_top: self.scroll.scrolled_from_top(),
            is_keyboard_mode: self.nav.is_keyboard_mode(),
            aria: AriaAttributes::listbox(self.config.mode.is_multiple()),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply lifecycle transitions and keep the host scroll lock in step.
    fn sync(&mut self) {
        for transition in self.lifecycle.drain_transitions() {
            self.apply_transition(transition);
        }
        self.push_scroll_lock();
    }

    fn push_scroll_lock(&mut self) {
        let locked = self.lifecycle.registry().is_scroll_locked();
        if locked != self.scroll_locked {
            self.scroll_locked = locked;
            self.surface.set_scroll_lock(locked);
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        let now = transition.at;
        match transition.to {
            OpenState::Opening => self.on_opening(now),
            OpenState::Open => self.place(now),
            OpenState::Closing => self.on_closing(now),
            OpenState::Closed => self.on_closed(),
        }
    }

    fn on_opening(&mut self, now: Instant) {
        self.outbox.extend(self.on_open_change.call(true));
        self.timers.cancel(DropdownTimer::HighlightReset);
        self.focus.attach();
        // Reopening during the close animation skips `Closed`; start the
        // session with a fresh direction lock and auto-scroll.
        self.position.reset();
        self.scroll.reset();

        let selected = self.selected_position();
        self.nav.on_open(
            selected,
            self.search.filtered_len(),
            self.config.auto_highlight_first,
        );
        self.place(now);

        let timings = self.config.timings;
        let target = FocusTarget::for_searchable(self.config.searchable);
        self.timers
            .schedule(DropdownTimer::FocusMove, now, target.delay(&timings));
        self.timers
            .schedule(DropdownTimer::ScrollMetrics, now, timings.scroll_metrics());
    }

    fn on_closing(&mut self, now: Instant) {
        self.outbox.extend(self.on_open_change.call(false));
        self.focus.detach();
        self.hover.cancel_all();
        self.timers.cancel_all_of(SESSION_TIMERS);
        self.pending_scroll = None;
        self.label.reset();
        self.timers
            .schedule(DropdownTimer::HighlightReset, now, Duration::ZERO);
    }

    fn on_closed(&mut self) {
        self.timers.cancel_all_of(&[
            DropdownTimer::SearchDebounce,
            DropdownTimer::TypeAheadReset,
        ]);
        self.search.reset(&self.options);
        self.position.reset();
        self.scroll.reset();
    }

    fn on_hover_intent(&mut self, intent: HoverIntent, now: Instant) {
        match intent {
            HoverIntent::Open if self.state() == OpenState::Closed => self.lifecycle.open_this(now),
            HoverIntent::Close if self.is_open() => {
                self.lifecycle.close_this(now);
            }
            other => log::trace!("{}: stale hover intent {:?}", self.id(), other),
        }
    }

    fn on_timer(&mut self, timer: DropdownTimer, now: Instant) {
        log::trace!("{}: timer {:?}", self.id(), timer);
        match timer {
            DropdownTimer::SearchDebounce => {
                if self.search.settle(&self.options) {
                    self.on_filter_changed(now);
                }
            }
            DropdownTimer::TypeAheadReset => {
                self.timers.cancel(DropdownTimer::SearchDebounce);
                self.search.on_term_change("");
                if self.search.settle(&self.options) {
                    self.on_filter_changed(now);
                }
            }
            DropdownTimer::PositionRetry => self.place(now),
            DropdownTimer::ScrollIntoView => {
                let len = self.search.filtered_len();
                if let Some(index) = self.pending_scroll.take().filter(|&i| i < len) {
                    self.surface.scroll_option_into_view(index);
                }
            }
            DropdownTimer::ScrollMetrics => {
                if let Some(metrics) = self.surface.list_metrics() {
                    self.scroll.update(metrics);
                }
            }
            DropdownTimer::FocusMove => {
                if self.is_open() {
                    self.surface
                        .focus(FocusTarget::for_searchable(self.config.searchable));
                }
            }
            DropdownTimer::FocusCheck => {
                if self.focus.resolve(self.surface.focus_within()) == FocusOutcome::Left {
                    log::debug!("{}: focus left the widget", self.id());
                    self.lifecycle.close_this(now);
                    self.blur(now);
                }
            }
            DropdownTimer::KeyboardModeExit => self.nav.exit_keyboard_mode(),
            DropdownTimer::HighlightReset => {
                if !self.is_open() {
                    self.nav.reset();
                }
            }
            DropdownTimer::ValidationHide => self.validation.hide(),
        }
    }

    fn on_filter_changed(&mut self, now: Instant) {
        if !self.is_open() {
            return;
        }
        let term_active = !self.search.debounced_term().trim().is_empty();
        let selected = self.selected_position();
        self.nav.on_filter_change(
            term_active,
            selected,
            self.search.filtered_len(),
            self.config.auto_highlight_first,
        );
        self.place(now);
        self.timers.schedule(
            DropdownTimer::ScrollMetrics,
            now,
            self.config.timings.scroll_metrics(),
        );
    }

    fn place(&mut self, now: Instant) {
        let viewport = self.surface.viewport();
        self.place_in(viewport, now);
    }

    fn place_in(&mut self, viewport: Size, now: Instant) {
        if !self.is_open() {
            return;
        }
        let outcome = self.position.calculate(
            self.surface.trigger_bounds(),
            self.surface.overlay_content_height(),
            viewport,
        );
        match outcome {
            PlacementOutcome::Placed => {
                self.timers.cancel(DropdownTimer::PositionRetry);
                self.maybe_auto_scroll(now);
            }
            PlacementOutcome::Deferred => {
                log::trace!("{}: placement deferred to next frame", self.id());
                self.timers.schedule(
                    DropdownTimer::PositionRetry,
                    now,
                    self.config.timings.frame(),
                );
            }
        }
    }

    /// Scroll the highlighted (else selected) row into view, once per session.
    fn maybe_auto_scroll(&mut self, now: Instant) {
        if !self.config.auto_scroll
            || self.search.filtered_len() == 0
            || !self.position.is_ready()
            || self.scroll.has_auto_scrolled()
        {
            return;
        }
        let Some(index) = self.nav.highlighted().or_else(|| self.selected_position()) else {
            return;
        };
        self.scroll.take_auto_scroll();
        self.request_scroll_into_view(index, now);
    }

    fn request_scroll_into_view(&mut self, index: usize, now: Instant) {
        self.pending_scroll = Some(index);
        self.timers
            .schedule(DropdownTimer::ScrollIntoView, now, self.config.timings.frame());
    }

    /// Filtered position of the (first) selected option.
    fn selected_position(&self) -> Option<usize> {
        match &self.value {
            SelectionValue::Single(Some(id)) => self.search.position_of(&self.options, id),
            SelectionValue::Single(None) => None,
            SelectionValue::Multiple(ids) => self
                .search
                .filtered(&self.options)
                .iter()
                .position(|option| ids.contains(&option.id)),
        }
    }

    /// Trigger text and whether it is the placeholder.
    fn trigger_text(&self) -> (String, bool) {
        let name_of = |id: &str| self.options.get(id).map(|option| option.name.clone());
        let text = match &self.value {
            SelectionValue::Single(Some(id)) => name_of(id.as_str()),
            SelectionValue::Single(None) => None,
            SelectionValue::Multiple(ids) if ids.len() > 1 => {
                Some(format!("{} selected", ids.len()))
            }
            SelectionValue::Multiple(ids) => {
                ids.iter().next().and_then(|id| name_of(id.as_str()))
            }
        };
        match text {
            Some(text) => (text, false),
            None => (self.config.placeholder.clone(), true),
        }
    }

    fn refresh_label(&mut self) {
        let (text, _) = self.trigger_text();
        let available = self
            .surface
            .trigger_bounds()
            .filter(|bounds| bounds.is_measurable())
            .map(|bounds| bounds.width - self.config.label_padding);
        match available {
            Some(width) => {
                self.label
                    .measure(self.measurer.as_mut(), &text, &self.config.font, width)
            }
            None => self.label.set_unmeasured(&text),
        }
    }
}

impl<Message> Drop for Dropdown<Message> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<Message> std::fmt::Debug for Dropdown<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id())
            .field("state", &self.state())
            .field("value", &self.value)
            .field("options", &self.options.len())
            .field("search", &self.search.raw_term())
            .field("highlighted", &self.nav.highlighted())
            .finish_non_exhaustive()
    }
}
