use super::state::{Channel, Component};

/// Update messages accepted by [`crate::store::Store::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Replace one component of one color slot
    UpdateColors {
        channel: Channel,
        component: Component,
        value: f32,
    },
    /// Toggle the flip flag of a channel
    UpdateFlip { channel: Channel },
    /// Set the flip flag of a channel to an absolute value.
    /// Restore uses this so replaying a snapshot never double-toggles.
    SetFlip { channel: Channel, value: bool },
    UpdateAlpha { value: f32 },
    UpdateSelectedColor { channel: Channel },
}
