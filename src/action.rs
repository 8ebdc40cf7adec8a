//! The closed set of actions accepted by [`Store::dispatch`](crate::store::Store::dispatch).

use crate::api::FriendRequest;
use crate::mvi::Intent;
use crate::session::SecureString;

/// Every state change in the application is one of these.
///
/// Reducers match this enum exhaustively, so adding a variant forces
/// each slice to decide whether it cares.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // -- Session ------------------------------------------------------------
    /// A token was issued for `user`.
    LoginSuccess { user: String, token: SecureString },
    /// Session cleared.
    Logout,

    // -- Registration -------------------------------------------------------
    RegisterPending,
    RegisterSuccess,
    RegisterFail { error: String },
    /// User left the registration flow (or logged out).
    RegisterReset,

    // -- Profile view -------------------------------------------------------
    /// A profile page was opened; tab returns to Timeline.
    EnterProfile,
    ShowTimeline,
    ShowAbout,
    ShowPhotos,
    ShowFriendsRequests,
    /// Flips the loading indicator.
    LoadingPage,
    /// The about page could not be loaded.
    AboutFailed { message: String },

    // -- Friends / notifications --------------------------------------------
    /// Own profile fetched: replaces picture and pending request list.
    OwnProfileLoaded {
        profile_picture: Option<String>,
        requests: Vec<FriendRequest>,
    },
    FriendRequestSent { username: String },
    FriendRequestAccepted { username: String },
    FriendRequestDeclined { username: String },
    FriendRequestFailed { username: String, message: String },
}

impl Intent for Action {}

impl Action {
    /// Short stable name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::LoginSuccess { .. } => "LOGIN_SUCCESS",
            Action::Logout => "LOGOUT",
            Action::RegisterPending => "REGISTER_PENDING",
            Action::RegisterSuccess => "REGISTER_SUCCESS",
            Action::RegisterFail { .. } => "REGISTER_FAIL",
            Action::RegisterReset => "REGISTER_RESET",
            Action::EnterProfile => "ENTER_PROFILE",
            Action::ShowTimeline => "SHOW_TIMELINE",
            Action::ShowAbout => "SHOW_ABOUT",
            Action::ShowPhotos => "SHOW_PHOTOS",
            Action::ShowFriendsRequests => "SHOW_FRIENDS_REQUESTS",
            Action::LoadingPage => "LOADING_PAGE",
            Action::AboutFailed { .. } => "ABOUT_FAILED",
            Action::OwnProfileLoaded { .. } => "OWN_PROFILE_LOADED",
            Action::FriendRequestSent { .. } => "FRIEND_REQUEST_SENT",
            Action::FriendRequestAccepted { .. } => "FRIEND_REQUEST_ACCEPTED",
            Action::FriendRequestDeclined { .. } => "FRIEND_REQUEST_DECLINED",
            Action::FriendRequestFailed { .. } => "FRIEND_REQUEST_FAILED",
        }
    }
}
