//! Payload shapes exchanged with the API.

use serde::{Deserialize, Serialize};

/// Incoming friend request as listed on the requester's target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileDetails {
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: Option<String>,
}

/// One row of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
}

impl UserSummary {
    pub fn profile_picture(&self) -> Option<&str> {
        self.profile.as_ref()?.profile_picture.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRef {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEntry {
    pub user: FriendRef,
}

impl FriendEntry {
    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// A fetched profile. Owned by whoever requested it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub friends: Vec<FriendEntry>,
    pub pending_requests: Vec<FriendRequest>,
}

/// Whose profile to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileTarget {
    /// The logged-in user.
    Own,
    User(String),
}

impl std::fmt::Display for ProfileTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileTarget::Own => write!(f, "<own>"),
            ProfileTarget::User(name) => write!(f, "{}", name),
        }
    }
}

// -- Wire shapes ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchPayload {
    Users(Vec<UserSummary>),
    Failure { error: String },
}

/// Profile response; every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfilePayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
    #[serde(default)]
    pub friends: Vec<FriendEntry>,
    #[serde(default)]
    pub request: Vec<FriendRequest>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ProfilePayload> for UserProfile {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            username: payload.username.unwrap_or_default(),
            name: payload.name.unwrap_or_default(),
            profile_picture: payload.profile.and_then(|p| p.profile_picture),
            friends: payload.friends,
            pending_requests: payload.request,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FriendRequestBody<'a> {
    pub username: &'a str,
}
