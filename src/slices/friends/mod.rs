//! Notification-bell data: own picture, incoming requests, outgoing requests.

mod reducer;
mod state;

pub use reducer::FriendsReducer;
pub use state::FriendsState;
