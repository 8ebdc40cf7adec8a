//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use chatconnect::api::ApiClient;
use chatconnect::config::ApiConfig;
use chatconnect::fetch::Fetcher;
use chatconnect::session::SecureString;
use chatconnect::slices::login::LoginState;
use chatconnect::store::{AppState, Store, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

pub use mock_server::{CapturedRequest, MockResponse, MockServer};

pub const TEST_TOKEN: &str = "test-jwt";

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ApiConfig::default()
    }
}

/// Store with `user` already logged in.
pub fn logged_in_store(user: &str) -> Store {
    Store::new(AppState::with_session(LoginState::logged_in(
        user,
        SecureString::new(TEST_TOKEN.to_string()),
    )))
}

/// Fetcher pointed at `server`, logged in as `user`.
pub fn fetcher_for(server: &MockServer, user: &str) -> Fetcher {
    let api = ApiClient::new(&api_config(&server.base_url())).expect("api client");
    Fetcher::new(api, logged_in_store(user))
}

/// Record every snapshot the store publishes.
pub fn record_snapshots(store: &Store) -> (Subscription, Arc<Mutex<Vec<AppState>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let sub = store.subscribe(move |state| sink.lock().push(state.clone()));
    (sub, seen)
}
