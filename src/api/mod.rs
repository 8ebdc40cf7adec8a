//! HTTP collaborator: the social-network REST API.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    FriendEntry, FriendRef, FriendRequest, ProfileDetails, ProfileTarget, UserProfile,
    UserSummary,
};
