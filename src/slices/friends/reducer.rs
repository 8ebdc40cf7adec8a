use crate::action::Action;
use crate::mvi::Reducer;

use super::state::FriendsState;

pub struct FriendsReducer;

impl FriendsReducer {
    fn without_request(state: FriendsState, username: &str) -> FriendsState {
        let requests = state
            .requests
            .into_iter()
            .filter(|r| r.username != username)
            .collect();
        FriendsState {
            requests,
            last_error: None,
            ..state
        }
    }
}

impl Reducer for FriendsReducer {
    type State = FriendsState;
    type Intent = Action;

    fn reduce(state: Self::State, action: &Self::Intent) -> Self::State {
        match action {
            Action::OwnProfileLoaded {
                profile_picture,
                requests,
            } => FriendsState {
                profile_picture: profile_picture.clone(),
                requests: requests.clone(),
                ..state
            },
            Action::FriendRequestSent { username } => {
                let mut sent = state.sent;
                if !sent.iter().any(|u| u == username) {
                    sent.push(username.clone());
                }
                FriendsState {
                    sent,
                    last_error: None,
                    ..state
                }
            }
            Action::FriendRequestAccepted { username }
            | Action::FriendRequestDeclined { username } => Self::without_request(state, username),
            Action::FriendRequestFailed { message, .. } => FriendsState {
                last_error: Some(message.clone()),
                ..state
            },
            Action::Logout => FriendsState::default(),

            Action::LoginSuccess { .. }
            | Action::RegisterPending
            | Action::RegisterSuccess
            | Action::RegisterFail { .. }
            | Action::RegisterReset
            | Action::EnterProfile
            | Action::ShowTimeline
            | Action::ShowAbout
            | Action::ShowPhotos
            | Action::ShowFriendsRequests
            | Action::LoadingPage
            | Action::AboutFailed { .. } => state,
        }
    }
}
