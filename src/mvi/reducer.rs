//! Reducer trait for slice state.

use super::intent::Intent;
use super::state::SliceState;

/// Reducer transforms one slice based on a dispatched action.
///
/// The reducer is the only place where slice transitions happen.
/// It must be a pure function: (State, &Intent) -> State
pub trait Reducer {
    /// The slice this reducer owns.
    type State: SliceState;

    /// The action type this reducer consumes.
    type Intent: Intent;

    /// Process an action and return the new slice value.
    ///
    /// Actions addressed to other slices return `state` unchanged.
    fn reduce(state: Self::State, action: &Self::Intent) -> Self::State;
}
