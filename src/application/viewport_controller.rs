use std::collections::VecDeque;

use crate::application::config::ViewportConfig;
use crate::application::ports::{ChartWidget, QueryStore, SelectorHandles};
use crate::application::query_sync::QuerySync;
use crate::application::reload::{ReloadSequencer, ReloadTicket};
use crate::application::zoom_selector::{ZoomSelector, selector_state};
use crate::domain::errors::{ZoomError, ZoomResult};
use crate::domain::events::{DomainEvent, Transition, ViewportEvent};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::state::ViewportState;
use crate::domain::zoom::{Axis, Extremes, Preset, ZoomCatalog, ZoomRange};
use crate::{log_debug, log_error, log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Viewport");

/// Single source of truth for one chart's zoom.
///
/// Preset clicks, widget gestures/redraws and data reloads all pass through
/// [`handle`](Self::handle). The controller owns its state; nothing is shared
/// between charts on the same page.
pub struct ViewportController<W, Q, S>
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
{
    id: String,
    config: ViewportConfig,
    catalog: ZoomCatalog,
    state: ViewportState,
    widget: W,
    query: QuerySync<Q>,
    selector: ZoomSelector<S>,
    reloads: ReloadSequencer,
    queued: VecDeque<ViewportEvent>,
    /// Set when a reload applied a window; cleared by the next redraw
    selector_refresh_pending: bool,
}

impl<W, Q, S> ViewportController<W, Q, S>
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
{
    pub fn new(id: impl Into<String>, config: ViewportConfig, widget: W, store: Q, handles: S) -> ZoomResult<Self> {
        let catalog = config.catalog()?;
        let query = QuerySync::new(store, config.param.clone(), config.default_zoom.clone());
        Ok(Self {
            id: id.into(),
            state: ViewportState::new(catalog.axis()),
            catalog,
            config,
            widget,
            query,
            selector: ZoomSelector::new(handles),
            reloads: ReloadSequencer::new(),
            queued: VecDeque::new(),
            selector_refresh_pending: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ZoomCatalog {
        &self.catalog
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn query(&self) -> &QuerySync<Q> {
        &self.query
    }

    pub fn selector(&self) -> &ZoomSelector<S> {
        &self.selector
    }

    pub fn is_reloading(&self) -> bool {
        !self.reloads.is_idle()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Resolve the starting window.
    ///
    /// `initial` is the raw query value (preset name or key); `None` or an empty
    /// string falls back to the configured default. Unusable values resolve to `all`.
    pub fn initialize(&mut self, initial: Option<&str>, extremes: Extremes) -> Transition {
        let extremes = self.config.effective_extremes(extremes);
        let value = initial
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_zoom.clone());

        let range = match self.catalog.validate(&value, &extremes) {
            Ok(range) => range,
            Err(e) => {
                log_warn!(COMPONENT, "⚠️ [{}] Cannot initialize zoom: {}", self.id, e);
                return Transition::Ignored;
            }
        };

        self.state.data_extremes = Some(extremes);
        self.state.current_range = Some(range);
        self.state.active_preset = self.catalog.nearest_preset(&range, &extremes);
        self.queued.clear();
        self.selector_refresh_pending = false;

        log_info!(
            COMPONENT,
            "🔍 [{}] Zoom initialized from '{}' -> [{}, {}) ({})",
            self.id,
            value,
            range.start(),
            range.end(),
            self.preset_label()
        );

        self.widget.set_window(&range);
        self.query.persist_state(&self.state);
        self.refresh_selector(extremes);
        Transition::Applied(range)
    }

    /// Initialize from whatever the query string holds
    pub fn initialize_from_query(&mut self, extremes: Extremes) -> Transition {
        let restored = self.query.restore();
        self.initialize(restored.as_deref(), extremes)
    }

    /// Single entry point for widget and UI events
    pub fn handle(&mut self, event: ViewportEvent) -> Transition {
        if self.is_reloading() && event.depends_on_extremes() {
            log_debug!(COMPONENT, "⏳ [{}] {} queued behind reload", self.id, event.event_type());
            self.queued.push_back(event);
            return Transition::Queued;
        }
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: ViewportEvent) -> Transition {
        match event {
            ViewportEvent::PresetSelected(preset) => self.on_preset_selected(preset),
            ViewportEvent::GestureRange { start, end } => self.on_gesture_range(start, end),
            ViewportEvent::Redraw { first_draw, start, end } => self.on_redraw(first_draw, start, end),
            ViewportEvent::DataReload(extremes) => self.on_data_reload(extremes),
        }
    }

    pub fn on_preset_selected(&mut self, preset: Preset) -> Transition {
        let Some(extremes) = self.state.data_extremes else {
            log_debug!(COMPONENT, "[{}] Preset {} before initialization", self.id, preset);
            return Transition::Ignored;
        };
        let range = match self.catalog.preset_range(preset, &extremes) {
            Ok(range) => range,
            Err(e) => {
                log_warn!(COMPONENT, "⚠️ [{}] Preset {} unusable: {}", self.id, preset, e);
                return Transition::Ignored;
            }
        };

        self.state.current_range = Some(range);
        self.state.active_preset = Some(preset);
        log_info!(COMPONENT, "🎯 [{}] Preset {} -> [{}, {})", self.id, preset, range.start(), range.end());

        self.widget.set_window(&range);
        self.query.persist_state(&self.state);
        self.selector.set_active(Some(preset));
        Transition::Applied(range)
    }

    /// The widget reported a new window; it is already on screen
    pub fn on_gesture_range(&mut self, start: f64, end: f64) -> Transition {
        let Some(extremes) = self.state.data_extremes else {
            return Transition::Ignored;
        };
        let Ok(raw) = ZoomRange::new(start, end, self.state.axis) else {
            log_debug!(COMPONENT, "[{}] Ignoring empty gesture [{}, {})", self.id, start, end);
            return Transition::Ignored;
        };
        let Some(range) = raw.intersect(&extremes) else {
            log_debug!(COMPONENT, "[{}] Gesture [{}, {}) outside data", self.id, start, end);
            return Transition::Ignored;
        };
        if self.state.current_range == Some(range) {
            return Transition::Ignored;
        }

        self.state.current_range = Some(range);
        self.state.active_preset = self.catalog.nearest_preset(&range, &extremes);
        log_debug!(COMPONENT, "🖐️ [{}] Gesture -> [{}, {}) ({})", self.id, range.start(), range.end(), self.preset_label());

        self.query.persist_state(&self.state);
        self.selector.set_active(self.state.active_preset);
        Transition::Updated(range)
    }

    /// Redraw callback of the widget.
    ///
    /// Completes a selector refresh left pending by a reload; otherwise only a
    /// changed start (a slide/pan) counts as a gesture.
    pub fn on_redraw(&mut self, first_draw: bool, start: f64, end: f64) -> Transition {
        if self.selector_refresh_pending {
            self.selector_refresh_pending = false;
            let rendered = self
                .widget
                .data_extremes()
                .map(|ex| self.config.effective_extremes(ex))
                .or(self.state.data_extremes);
            if let Some(extremes) = rendered {
                self.refresh_selector(extremes);
            }
        }
        if first_draw || start == end {
            return Transition::Ignored;
        }
        match self.state.current_range {
            Some(current) if current.start() == start => Transition::Ignored,
            _ => self.on_gesture_range(start, end),
        }
    }

    /// New data is in the widget; carry the selection over to it
    pub fn on_data_reload(&mut self, new_extremes: Extremes) -> Transition {
        let new_extremes = self.config.effective_extremes(new_extremes);
        let (Some(old_extremes), Some(current)) = (self.state.data_extremes, self.state.current_range) else {
            return self.initialize_from_query(new_extremes);
        };

        let follow = match self.state.active_preset {
            Some(preset) if self.config.follow_preset_on_reload => Some(preset),
            _ => None,
        };
        let resolved = match follow {
            Some(preset) => self.catalog.preset_range(preset, &new_extremes),
            None => self.catalog.project(&current, &old_extremes, &new_extremes),
        };
        let range = match resolved {
            Ok(range) => range,
            Err(e) => {
                log_warn!(COMPONENT, "⚠️ [{}] Reload left no usable window: {}", self.id, e);
                return Transition::Ignored;
            }
        };

        self.state.data_extremes = Some(new_extremes);
        self.state.current_range = Some(range);
        self.state.active_preset = follow.or_else(|| self.catalog.nearest_preset(&range, &new_extremes));
        log_info!(
            COMPONENT,
            "🔄 [{}] Data [{}, {}] -> window [{}, {}) ({})",
            self.id,
            new_extremes.min,
            new_extremes.max,
            range.start(),
            range.end(),
            self.preset_label()
        );

        self.widget.set_window(&range);
        self.query.persist_state(&self.state);
        self.selector_refresh_pending = true;
        Transition::Applied(range)
    }

    /// Switch between time and height axes; the old window is meaningless there
    pub fn change_axis(&mut self, axis: Axis, extremes: Extremes) -> Transition {
        self.catalog = ZoomCatalog::new(axis, self.catalog.min_size());
        self.config.axis = axis.kind;
        self.state = ViewportState::new(axis);
        self.query.clear();
        self.initialize(None, extremes)
    }

    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.reloads.issue()
    }

    pub fn is_stale(&self, ticket: ReloadTicket) -> bool {
        self.reloads.is_stale(ticket)
    }

    /// Apply a reload response; stale ones are dropped
    pub fn complete_reload(&mut self, ticket: ReloadTicket, extremes: Extremes) -> Transition {
        if let Err(e) = self.reloads.accept(ticket) {
            get_logger().recovered(COMPONENT, &e, "discard");
            return Transition::Ignored;
        }
        let transition = self.on_data_reload(extremes);
        self.drain_if_idle();
        transition
    }

    /// The fetch failed; keep the current window and release queued events
    pub fn fail_reload(&mut self, ticket: ReloadTicket, reason: &str) {
        if let Err(e @ ZoomError::StaleResponse { .. }) = self.reloads.accept(ticket) {
            get_logger().recovered(COMPONENT, &e, "discard");
            return;
        }
        log_error!(COMPONENT, "❌ [{}] Reload #{} failed: {}", self.id, ticket.seq(), reason);
        self.drain_if_idle();
    }

    fn drain_if_idle(&mut self) {
        if !self.reloads.is_idle() {
            return;
        }
        while let Some(event) = self.queued.pop_front() {
            // Redraws seen during the reload describe a window the reload replaced
            if matches!(event, ViewportEvent::Redraw { .. }) {
                continue;
            }
            self.dispatch(event);
        }
    }

    fn refresh_selector(&mut self, extremes: Extremes) {
        let state = selector_state(&extremes, &self.state.axis, self.state.active_preset);
        if !self.selector.refresh(state) {
            log_debug!(COMPONENT, "[{}] Data spans less than a day, selector hidden", self.id);
        }
    }

    fn preset_label(&self) -> String {
        self.state
            .active_preset
            .map(|p| p.to_string())
            .unwrap_or_else(|| "custom".to_string())
    }
}
