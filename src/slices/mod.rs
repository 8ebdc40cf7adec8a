//! Named, independently reduced portions of application state.
//!
//! Each slice follows the same layout:
//! - `state.rs` - the slice value (immutable snapshot)
//! - `reducer.rs` - pure transitions driven by [`Action`](crate::action::Action)

pub mod friends;
pub mod login;
pub mod profile;
pub mod registration;
