use leptos::*;
use strum::IntoEnumIterator;

use crate::application::ports::SelectorHandles;
use crate::application::zoom_selector::SelectorState;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::zoom::Preset;

/// Selector handles backed by a signal, for pages that render the bar with Leptos
#[derive(Clone, Copy)]
pub struct LeptosSelectorHandles {
    state: RwSignal<SelectorState>,
}

impl LeptosSelectorHandles {
    pub fn new(state: RwSignal<SelectorState>) -> Self {
        Self { state }
    }

    pub fn signal(&self) -> RwSignal<SelectorState> {
        self.state
    }
}

impl SelectorHandles for LeptosSelectorHandles {
    fn set_visible(&mut self, preset: Preset, visible: bool) {
        self.state.update(|s| {
            if visible {
                s.visible.insert(preset);
            } else {
                s.visible.remove(&preset);
            }
        });
    }

    fn set_active(&mut self, active: Option<Preset>) {
        self.state.update(|s| s.active = active);
    }

    fn set_selector_visible(&mut self, visible: bool) {
        self.state.update(|s| s.show_selector = visible);
    }
}

/// 🔍 Preset buttons of one chart
#[component]
pub fn ZoomSelectorBar(#[prop(into)] state: Signal<SelectorState>, #[prop(into)] on_select: Callback<Preset>) -> impl IntoView {
    view! {
        <div class="zoom-selector" class=("d-hide", move || !state.with(|s| s.show_selector))>
            {Preset::iter()
                .map(|preset| {
                    view! {
                        <button
                            class="btn btn-sm"
                            class=("d-hide", move || !state.with(|s| s.is_visible(preset)))
                            class=("active", move || state.with(|s| s.active == Some(preset)))
                            data-option=preset.to_string()
                            on:click=move |_| {
                                get_logger().debug(
                                    LogComponent::Presentation("ZoomSelectorBar"),
                                    &format!("Preset {} clicked", preset),
                                );
                                on_select.call(preset);
                            }
                        >
                            {preset.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::zoom_selector::ZoomSelector;
    use std::collections::BTreeSet;

    #[test]
    fn handles_mirror_selector_refresh() {
        let runtime = create_runtime();
        let signal = create_rw_signal(SelectorState::default());
        let mut selector = ZoomSelector::new(LeptosSelectorHandles::new(signal));

        let state = SelectorState {
            visible: BTreeSet::from([Preset::Day, Preset::Week, Preset::All]),
            active: Some(Preset::Week),
            show_selector: true,
        };
        selector.refresh(state.clone());
        assert_eq!(signal.get_untracked(), state);

        selector.set_active(None);
        assert_eq!(signal.get_untracked().active, None);
        runtime.dispose();
    }
}
