use crate::action::Action;
use crate::mvi::Reducer;
use crate::slices::friends::{FriendsReducer, FriendsState};
use crate::slices::login::{LoginReducer, LoginState};
use crate::slices::profile::{ProfileReducer, ProfileViewState};
use crate::slices::registration::{RegistrationReducer, RegistrationStatus};

/// Runs one slice reducer over a field of the root state.
macro_rules! reduce_slice {
    ($state:expr, $field:ident, $reducer:ty, $action:expr) => {
        <$reducer>::reduce($state.$field, $action)
    };
}

/// Root snapshot handed to subscribers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub login: LoginState,
    pub registration: RegistrationStatus,
    pub profile: ProfileViewState,
    pub friends: FriendsState,
}

impl AppState {
    /// Start from a restored session, everything else at defaults.
    pub fn with_session(login: LoginState) -> Self {
        Self {
            login,
            ..Self::default()
        }
    }

    /// Feed `action` through every slice reducer.
    pub fn reduce(self, action: &Action) -> Self {
        Self {
            login: reduce_slice!(self, login, LoginReducer, action),
            registration: reduce_slice!(self, registration, RegistrationReducer, action),
            profile: reduce_slice!(self, profile, ProfileReducer, action),
            friends: reduce_slice!(self, friends, FriendsReducer, action),
        }
    }
}
