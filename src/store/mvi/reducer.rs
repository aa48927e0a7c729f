use super::intent::Intent;
use super::state::SliceState;

/// The only place state transitions happen.
///
/// Must be pure: no I/O, no notifications. Side effects belong to the
/// thunks and hooks around the dispatch call.
pub trait Reducer {
    type State: SliceState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
