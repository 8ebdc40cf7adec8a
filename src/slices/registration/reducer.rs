use crate::action::Action;
use crate::mvi::Reducer;

use super::state::RegistrationStatus;

pub struct RegistrationReducer;

impl Reducer for RegistrationReducer {
    type State = RegistrationStatus;
    type Intent = Action;

    fn reduce(state: Self::State, action: &Self::Intent) -> Self::State {
        match action {
            Action::RegisterPending => RegistrationStatus {
                pending: true,
                failed: false,
                error: None,
            },
            Action::RegisterSuccess => RegistrationStatus {
                pending: false,
                failed: false,
                error: None,
            },
            Action::RegisterFail { error } => RegistrationStatus {
                pending: false,
                failed: true,
                error: Some(error.clone()),
            },
            Action::RegisterReset => RegistrationStatus::default(),

            Action::LoginSuccess { .. }
            | Action::Logout
            | Action::EnterProfile
            | Action::ShowTimeline
            | Action::ShowAbout
            | Action::ShowPhotos
            | Action::ShowFriendsRequests
            | Action::LoadingPage
            | Action::AboutFailed { .. }
            | Action::OwnProfileLoaded { .. }
            | Action::FriendRequestSent { .. }
            | Action::FriendRequestAccepted { .. }
            | Action::FriendRequestDeclined { .. }
            | Action::FriendRequestFailed { .. } => state,
        }
    }
}
