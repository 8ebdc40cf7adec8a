//! Marker trait for dispatched actions.

/// Marker trait for action objects.
///
/// Actions represent:
/// - Completed network operations (login, profile load, friend request)
/// - Navigation between profile tabs
/// - Session lifecycle events
///
/// Every slice reducer receives every action.
pub trait Intent: Send + 'static {}
