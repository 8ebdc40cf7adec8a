use crate::api::FriendRequest;
use crate::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FriendsState {
    /// Own profile picture reference, as returned by the server.
    pub profile_picture: Option<String>,
    /// Incoming requests awaiting accept/decline, in server order.
    pub requests: Vec<FriendRequest>,
    /// Usernames this session has sent a request to.
    pub sent: Vec<String>,
    /// Message from the last failed friend-request mutation.
    pub last_error: Option<String>,
}

impl SliceState for FriendsState {}

impl FriendsState {
    pub fn has_pending_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    pub fn has_sent_to(&self, username: &str) -> bool {
        self.sent.iter().any(|u| u == username)
    }
}
