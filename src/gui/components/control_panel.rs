//! Control panel for the gradient parameters
//!
//! Every widget is fully controlled: its value is copied from the store
//! state each frame and a change only ever leaves as a [`PanelEvent`].

use eframe::egui;
use std::ops::RangeInclusive;

use crate::constants::ranges;
use crate::gui::constants::{ITEM_SPACING, SECTION_SPACING};
use crate::store::{Action, Channel, Component, State};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    Dispatch(Action),
    /// Persist the state as it is when the event is handled
    Save,
}

/// Interactive widgets of the panel, as reported to a layout observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PanelWidget {
    Segment(Channel),
    Saturation,
    Flip,
    X,
    Y,
    Opacity,
    Save,
}

/// Renders the panel and returns the events produced by this frame's input
pub fn ui(ui: &mut egui::Ui, state: &State) -> Vec<PanelEvent> {
    show(ui, state, |_, _| {})
}

/// Panel body; `placed` sees the screen rect of every interactive widget
fn show(
    ui: &mut egui::Ui,
    state: &State,
    mut placed: impl FnMut(PanelWidget, egui::Rect),
) -> Vec<PanelEvent> {
    let mut events = Vec::new();
    let channel = state.selected;

    ui.group(|ui| {
        // Channel selector
        ui.horizontal(|ui| {
            let mut selected = channel;
            for option in Channel::ALL {
                let response = ui.selectable_value(&mut selected, option, option.label());
                placed(PanelWidget::Segment(option), response.rect);
                if response.changed() {
                    events.push(PanelEvent::Dispatch(Action::UpdateSelectedColor {
                        channel: selected,
                    }));
                }
            }
        });

        ui.add_space(ITEM_SPACING);

        let (value, rect) = slider_row(
            ui,
            "Saturation:",
            state.component(channel, Component::Saturation),
            ranges::SATURATION,
        );
        placed(PanelWidget::Saturation, rect);
        if let Some(value) = value {
            events.push(color_event(channel, Component::Saturation, value));
        }

        ui.horizontal(|ui| {
            ui.label("Flip:");
            let mut flipped = state.flipped(channel);
            let response = ui.checkbox(&mut flipped, "Swap UV axes");
            placed(PanelWidget::Flip, response.rect);
            if response.changed() {
                events.push(PanelEvent::Dispatch(Action::UpdateFlip { channel }));
            }
        });

        for (widget, label, component) in [
            (PanelWidget::X, "X:", Component::X),
            (PanelWidget::Y, "Y:", Component::Y),
        ] {
            let (value, rect) =
                slider_row(ui, label, state.component(channel, component), ranges::AXIS);
            placed(widget, rect);
            if let Some(value) = value {
                events.push(color_event(channel, component, value));
            }
        }
    });

    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        let (value, rect) = slider_row(ui, "Opacity:", state.alpha, ranges::ALPHA);
        placed(PanelWidget::Opacity, rect);
        if let Some(value) = value {
            events.push(PanelEvent::Dispatch(Action::UpdateAlpha { value }));
        }
    });

    ui.add_space(SECTION_SPACING);

    let response = ui.button("Save");
    placed(PanelWidget::Save, response.rect);
    if response.clicked() {
        events.push(PanelEvent::Save);
    }

    events
}

fn color_event(channel: Channel, component: Component, value: f32) -> PanelEvent {
    PanelEvent::Dispatch(Action::UpdateColors {
        channel,
        component,
        value,
    })
}

/// Labelled slider over a copy of `current`. The value is `Some` only when
/// the user moved it; the rect covers the slider and its value field.
fn slider_row(
    ui: &mut egui::Ui,
    label: &str,
    current: f32,
    range: RangeInclusive<f32>,
) -> (Option<f32>, egui::Rect) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut value = current;
        // clamp only user edits so restored out-of-range values are never rewritten
        let response = ui.add(
            egui::Slider::new(&mut value, range)
                .clamping(egui::SliderClamping::Edits)
                .fixed_decimals(2),
        );
        (response.changed().then_some(value), response.rect)
    })
    .inner
}
