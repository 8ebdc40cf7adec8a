//! Async data fetchers.
//!
//! Each fetcher wraps one API call, converts failures into values the view
//! can render, and reconciles the outcome into the store by dispatching an
//! action. Nothing here mutates state directly.

mod coalesce;

pub use coalesce::Coalescer;

use std::sync::Arc;

use crate::action::Action;
use crate::api::{ApiClient, ApiError, ProfileTarget, UserProfile, UserSummary};
use crate::session::SecureString;
use crate::store::Store;

/// Result of a user search. Failure is a value, never a panic or an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Possibly empty; an empty list is not an error.
    Users(Vec<UserSummary>),
    Failed { message: String },
}

struct FetcherInner {
    api: ApiClient,
    store: Store,
    profiles: Coalescer<ProfileTarget, Result<UserProfile, ApiError>>,
}

/// Cloneable handle bundling the API client with the store it reports to.
#[derive(Clone)]
pub struct Fetcher {
    inner: Arc<FetcherInner>,
}

impl Fetcher {
    pub fn new(api: ApiClient, store: Store) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                api,
                store,
                profiles: Coalescer::new(),
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    fn token(&self) -> Option<SecureString> {
        self.inner.store.select(|s| s.login.access_token.clone())
    }

    /// Search users by name prefix.
    ///
    /// Blank input returns an empty list without touching the network.
    pub async fn search_users(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Users(Vec::new());
        }

        let token = self.token();
        match self.inner.api.search_users(query, token.as_ref()).await {
            Ok(users) => {
                tracing::debug!(query = %query, count = users.len(), "Search completed");
                SearchOutcome::Users(users)
            }
            Err(e) => {
                tracing::warn!(
                    query = %query,
                    error_type = e.error_type(),
                    error = %e,
                    "Search failed"
                );
                SearchOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Fetch one profile with its friends and pending requests.
    ///
    /// Concurrent calls for the same target share a single request.
    pub async fn get_user_profile(&self, target: ProfileTarget) -> Result<UserProfile, ApiError> {
        let token = self.token();
        let api = &self.inner.api;
        self.inner
            .profiles
            .run(target.clone(), || async {
                tracing::debug!(profile = %target, "Fetching profile");
                api.get_profile(&target, token.as_ref()).await
            })
            .await
    }

    /// Load the notification bell: own picture and incoming requests.
    pub async fn load_notifications(&self) -> Result<(), ApiError> {
        match self.get_user_profile(ProfileTarget::Own).await {
            Ok(profile) => {
                tracing::debug!(
                    requests = profile.pending_requests.len(),
                    "Notifications loaded"
                );
                self.inner.store.dispatch(Action::OwnProfileLoaded {
                    profile_picture: profile.profile_picture,
                    requests: profile.pending_requests,
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notifications");
                Err(e)
            }
        }
    }

    /// Open the about tab for `target`.
    ///
    /// The loading flag is toggled on for the duration of the fetch and
    /// toggled back even if this future is dropped part-way. Failure is
    /// recorded in the profile slice so the view can offer a retry.
    ///
    /// `LoadingPage` is a toggle, not a counter: two overlapping calls flip
    /// `loading` on and straight back off while both are still in flight.
    pub async fn show_about(&self, target: ProfileTarget) -> Result<UserProfile, ApiError> {
        let loading = LoadingGuard::start(&self.inner.store);
        let result = self.get_user_profile(target).await;
        drop(loading);

        match &result {
            Ok(_) => self.inner.store.dispatch(Action::ShowAbout),
            Err(e) => {
                tracing::warn!(error = %e, "About page failed to load");
                self.inner.store.dispatch(Action::AboutFailed {
                    message: e.to_string(),
                });
            }
        }
        result
    }

    /// Send a friend request to `username`.
    pub async fn send_request(&self, username: &str) -> Result<(), ApiError> {
        let token = self.token();
        let result = self.inner.api.send_request(username, token.as_ref()).await;
        self.settle(
            result,
            username,
            Action::FriendRequestSent {
                username: username.to_string(),
            },
        )
    }

    /// Accept the pending request from `username`.
    pub async fn accept_request(&self, username: &str) -> Result<(), ApiError> {
        let token = self.token();
        let result = self.inner.api.accept_request(username, token.as_ref()).await;
        self.settle(
            result,
            username,
            Action::FriendRequestAccepted {
                username: username.to_string(),
            },
        )
    }

    /// Decline the pending request from `username`.
    pub async fn cancel_request(&self, username: &str) -> Result<(), ApiError> {
        let token = self.token();
        let result = self.inner.api.cancel_request(username, token.as_ref()).await;
        self.settle(
            result,
            username,
            Action::FriendRequestDeclined {
                username: username.to_string(),
            },
        )
    }

    fn settle(
        &self,
        result: Result<(), ApiError>,
        username: &str,
        on_success: Action,
    ) -> Result<(), ApiError> {
        match &result {
            Ok(()) => {
                tracing::info!(username = %username, action = on_success.kind(), "Friend request updated");
                self.inner.store.dispatch(on_success);
            }
            Err(e) => {
                tracing::warn!(
                    username = %username,
                    action = on_success.kind(),
                    error = %e,
                    "Friend request failed"
                );
                self.inner.store.dispatch(Action::FriendRequestFailed {
                    username: username.to_string(),
                    message: e.to_string(),
                });
            }
        }
        result
    }
}

/// Toggles `loading` on creation and back on drop.
struct LoadingGuard<'a> {
    store: &'a Store,
}

impl<'a> LoadingGuard<'a> {
    fn start(store: &'a Store) -> Self {
        store.dispatch(Action::LoadingPage);
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::LoadingPage);
    }
}
