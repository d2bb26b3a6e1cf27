//! LessPass client state and its mutation registry.
//!
//! [`State`] is owned by a [`Store`] and changes only through
//! [`Store::commit`]. Each [`Mutation`] is a synchronous, infallible update;
//! the two that read time ([`Mutation::SetPassword`] and
//! [`Mutation::LoadPasswordFirstTime`]) take it from the store's [`Clock`].
//!
//! ```text
//! caller --Mutation--> Store::commit --> apply(state, mutation, clock)
//! ```

mod apply;
mod clock;
mod mutation;
mod persistence;
mod state;

pub use apply::{REUSE_WINDOW, apply};
pub use clock::{Clock, FixedClock, SystemClock};
pub use mutation::{Mutation, MutationError, MutationKind};
pub use persistence::{PersistError, StateSnapshot, load_state, save_state};
pub use state::State;

/// Exclusive owner of a [`State`].
#[derive(Debug)]
pub struct Store<C = SystemClock> {
    state: State,
    clock: C,
}

impl Store<SystemClock> {
    #[must_use]
    pub fn new(state: State) -> Self {
        Self::with_clock(state, SystemClock)
    }
}

impl<C: Clock> Store<C> {
    #[must_use]
    pub fn with_clock(state: State, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn commit(&mut self, mutation: Mutation) {
        tracing::debug!(mutation = mutation.name(), "commit");
        apply(&mut self.state, mutation, &self.clock);
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn into_state(self) -> State {
        self.state
    }
}
