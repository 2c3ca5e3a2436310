//! Single-writer state store
//!
//! The store is created once by the application shell and handed around by
//! reference. State only changes through [`Store::dispatch`]; listeners are
//! called after every dispatch with the new snapshot.

pub mod action;
pub mod reducers;
pub mod state;

pub use action::Action;
pub use state::{Channel, ColorSlot, ColorTable, Component, FlipFlags, State};

use tracing::trace;

type Listener = Box<dyn FnMut(&State)>;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct Store {
    state: State,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(State::default())
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot
    pub fn state(&self) -> State {
        self.state
    }

    /// Apply an action and notify listeners in subscription order.
    /// Listeners run even when the action left the state unchanged.
    pub fn dispatch(&mut self, action: Action) {
        trace!(?action, "dispatch");
        self.state = reducers::reduce(&self.state, &action);

        let state = self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&State) + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Returns false if the subscription was already removed
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
