//! Store state types and their literal defaults

/// One of the three gradient channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }
}

/// Field of a [`ColorSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    X,
    Y,
    Saturation,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Saturation];

    pub fn index(self) -> usize {
        match self {
            Component::X => 0,
            Component::Y => 1,
            Component::Saturation => 2,
        }
    }
}

/// `[x, y, saturation]` for one channel
pub type ColorSlot = [f32; 3];

/// Color slots indexed by [`Channel::index`]
pub type ColorTable = [ColorSlot; 3];

/// Per-channel UV flip, indexed by [`Channel::index`]
pub type FlipFlags = [bool; 3];

pub const DEFAULT_COLORS: ColorTable = [[-0.5, 1.3, 0.5], [-0.4, 0.7, 0.4], [0.7, 0.9, 0.4]];
pub const DEFAULT_FLIP: FlipFlags = [true, false, false];
pub const DEFAULT_ALPHA: f32 = 0.85;

/// Complete store state
///
/// `selected` is transient UI state and never leaves the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub colors: ColorTable,
    pub flip: FlipFlags,
    pub alpha: f32,
    pub selected: Channel,
}

impl State {
    pub fn color(&self, channel: Channel) -> ColorSlot {
        self.colors[channel.index()]
    }

    pub fn component(&self, channel: Channel, component: Component) -> f32 {
        self.colors[channel.index()][component.index()]
    }

    pub fn flipped(&self, channel: Channel) -> bool {
        self.flip[channel.index()]
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
            flip: DEFAULT_FLIP,
            alpha: DEFAULT_ALPHA,
            selected: Channel::Red,
        }
    }
}
