//! Pure state transitions
//!
//! Each reducer owns one slice of [`State`] and returns the previous slice
//! untouched for actions addressed to another slice. Slices are plain arrays,
//! so every reducer works on a copy and the caller's value is never mutated.

use super::action::Action;
use super::state::{Channel, ColorTable, FlipFlags, State};

pub fn update_colors(colors: &ColorTable, action: &Action) -> ColorTable {
    match *action {
        Action::UpdateColors {
            channel,
            component,
            value,
        } => {
            let mut next = *colors;
            next[channel.index()][component.index()] = value;
            next
        }
        _ => *colors,
    }
}

pub fn update_flip(flip: &FlipFlags, action: &Action) -> FlipFlags {
    match *action {
        Action::UpdateFlip { channel } => {
            let mut next = *flip;
            next[channel.index()] = !next[channel.index()];
            next
        }
        Action::SetFlip { channel, value } => {
            let mut next = *flip;
            next[channel.index()] = value;
            next
        }
        _ => *flip,
    }
}

pub fn update_alpha(alpha: f32, action: &Action) -> f32 {
    match *action {
        Action::UpdateAlpha { value } => value,
        _ => alpha,
    }
}

pub fn update_selected_color(selected: Channel, action: &Action) -> Channel {
    match *action {
        Action::UpdateSelectedColor { channel } => channel,
        _ => selected,
    }
}

/// Root reducer combining the four slice reducers
pub fn reduce(state: &State, action: &Action) -> State {
    State {
        colors: update_colors(&state.colors, action),
        flip: update_flip(&state.flip, action),
        alpha: update_alpha(state.alpha, action),
        selected: update_selected_color(state.selected, action),
    }
}
