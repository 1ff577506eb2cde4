use serde::Serialize;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

use crate::application::ports::SelectorHandles;
use crate::domain::zoom::{Axis, Extremes, Preset};

/// Which preset buttons make sense for the loaded data
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectorState {
    pub visible: BTreeSet<Preset>,
    pub active: Option<Preset>,
    /// False when the data spans less than a day; the whole group is hidden
    pub show_selector: bool,
}

impl SelectorState {
    pub fn is_visible(&self, preset: Preset) -> bool {
        self.visible.contains(&preset)
    }

    /// Active marker restricted to visible buttons
    pub fn with_active(&self, active: Option<Preset>) -> Self {
        Self {
            active: active.filter(|p| self.visible.contains(p)),
            ..self.clone()
        }
    }
}

/// Pure visibility rule: a preset needs at least `min_span_days` of data
pub fn selector_state(extremes: &Extremes, axis: &Axis, active: Option<Preset>) -> SelectorState {
    let days = extremes.span_days(axis);
    let visible: BTreeSet<Preset> = Preset::iter().filter(|p| days >= p.min_span_days()).collect();
    let state = SelectorState { visible, active: None, show_selector: days >= 1.0 };
    state.with_active(active)
}

/// Pushes selector state onto the preset buttons
pub struct ZoomSelector<S: SelectorHandles> {
    handles: S,
    current: SelectorState,
}

impl<S: SelectorHandles> ZoomSelector<S> {
    pub fn new(handles: S) -> Self {
        Self { handles, current: SelectorState::default() }
    }

    pub fn handles(&self) -> &S {
        &self.handles
    }

    pub fn state(&self) -> &SelectorState {
        &self.current
    }

    /// Returns whether the selector group is shown at all
    pub fn refresh(&mut self, state: SelectorState) -> bool {
        for preset in Preset::iter() {
            self.handles.set_visible(preset, state.is_visible(preset));
        }
        self.handles.set_active(state.active);
        self.handles.set_selector_visible(state.show_selector);
        self.current = state;
        self.current.show_selector
    }

    /// Move the active marker without re-evaluating visibility
    pub fn set_active(&mut self, active: Option<Preset>) {
        let next = self.current.with_active(active);
        if next.active != self.current.active {
            self.handles.set_active(next.active);
        }
        self.current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::zoom::DAY_MS;

    #[test]
    fn short_series_hides_long_presets() {
        let ex = Extremes::new(0.0, 10.0 * DAY_MS).unwrap();
        let state = selector_state(&ex, &Axis::time(), Some(Preset::Year));
        assert!(state.is_visible(Preset::Week));
        assert!(!state.is_visible(Preset::Month));
        assert_eq!(state.active, None);
        assert!(state.show_selector);
    }

    #[test]
    fn sub_day_series_hides_everything() {
        let ex = Extremes::new(0.0, DAY_MS / 2.0).unwrap();
        let state = selector_state(&ex, &Axis::time(), Some(Preset::All));
        assert!(state.visible.is_empty());
        assert!(!state.show_selector);
    }
}
