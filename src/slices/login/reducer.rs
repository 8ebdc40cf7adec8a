use crate::action::Action;
use crate::mvi::Reducer;

use super::state::LoginState;

pub struct LoginReducer;

impl Reducer for LoginReducer {
    type State = LoginState;
    type Intent = Action;

    fn reduce(state: Self::State, action: &Self::Intent) -> Self::State {
        match action {
            Action::LoginSuccess { user, token } => LoginState::logged_in(user.clone(), token.clone()),
            Action::Logout => LoginState::default(),

            Action::RegisterPending
            | Action::RegisterSuccess
            | Action::RegisterFail { .. }
            | Action::RegisterReset
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
