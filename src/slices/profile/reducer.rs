use crate::action::Action;
use crate::mvi::Reducer;

use super::state::{ProfileTab, ProfileViewState};

/// Navigation between profile tabs.
///
/// Tab changes are last-write-wins: two navigation actions in a row leave
/// the second one's tab.
pub struct ProfileReducer;

impl ProfileReducer {
    fn with_tab(state: ProfileViewState, tab: ProfileTab) -> ProfileViewState {
        ProfileViewState {
            active_tab: tab,
            ..state
        }
    }
}

impl Reducer for ProfileReducer {
    type State = ProfileViewState;
    type Intent = Action;

    fn reduce(state: Self::State, action: &Self::Intent) -> Self::State {
        match action {
            Action::EnterProfile => ProfileViewState {
                active_tab: ProfileTab::Timeline,
                about_error: None,
                ..state
            },
            Action::ShowTimeline => Self::with_tab(state, ProfileTab::Timeline),
            Action::ShowAbout => ProfileViewState {
                active_tab: ProfileTab::About,
                about_error: None,
                ..state
            },
            Action::ShowPhotos => Self::with_tab(state, ProfileTab::Photos),
            Action::ShowFriendsRequests => Self::with_tab(state, ProfileTab::FriendsRequests),
            Action::LoadingPage => ProfileViewState {
                loading: !state.loading,
                ..state
            },
            Action::AboutFailed { message } => ProfileViewState {
                about_error: Some(message.clone()),
                ..state
            },

            Action::LoginSuccess { .. }
            | Action::Logout
            | Action::RegisterPending
            | Action::RegisterSuccess
            | Action::RegisterFail { .. }
            | Action::RegisterReset
            | Action::OwnProfileLoaded { .. }
            | Action::FriendRequestSent { .. }
            | Action::FriendRequestAccepted { .. }
            | Action::FriendRequestDeclined { .. }
            | Action::FriendRequestFailed { .. } => state,
        }
    }
}
