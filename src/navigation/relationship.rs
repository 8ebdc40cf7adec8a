//! Friend status between the viewer and a profile, derived before rendering.

use crate::api::FriendEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Viewer is looking at their own profile.
    OwnProfile,
    Friends,
    /// Viewer has sent a request that is not yet answered.
    Pending,
    None,
}

impl Relationship {
    /// Label for the profile header's action button, if any.
    pub fn action_label(self) -> Option<&'static str> {
        match self {
            Relationship::OwnProfile => None,
            Relationship::Friends => Some("Remove Friend"),
            Relationship::Pending => Some("Request Sent"),
            Relationship::None => Some("Add Friend"),
        }
    }
}

/// Status of `current_user` relative to the profile of `profile_username`.
///
/// `friends` is the viewed profile's friend list; `sent` is the viewer's
/// outgoing requests. Usernames compare exactly.
pub fn relationship(
    current_user: &str,
    profile_username: &str,
    friends: &[FriendEntry],
    sent: &[String],
) -> Relationship {
    if current_user == profile_username {
        return Relationship::OwnProfile;
    }
    if friends.iter().any(|f| f.username() == current_user) {
        return Relationship::Friends;
    }
    if sent.iter().any(|s| s == profile_username) {
        return Relationship::Pending;
    }
    Relationship::None
}
