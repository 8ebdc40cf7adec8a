//! Live user search behind a debounce.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;

use crate::api::UserSummary;
use crate::fetch::{Fetcher, SearchOutcome};

use super::debounce::Debouncer;

/// Anything that can answer a user search.
pub trait UserSearch: Clone + Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = SearchOutcome> + Send;
}

impl UserSearch for Fetcher {
    fn search(&self, query: &str) -> impl Future<Output = SearchOutcome> + Send {
        let fetcher = self.clone();
        let query = query.to_string();
        async move { fetcher.search_users(&query).await }
    }
}

/// What the search dropdown shows. Results and failure text are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchView {
    #[default]
    Idle,
    Results(Vec<UserSummary>),
    Failed(String),
}

impl From<SearchOutcome> for SearchView {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Users(users) => SearchView::Results(users),
            SearchOutcome::Failed { message } => SearchView::Failed(message),
        }
    }
}

/// Title-case the query: lowercase everything, then uppercase the first
/// character of each whitespace-separated word.
pub fn normalize_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            word_start = true;
            out.push(ch);
        } else if word_start {
            word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// The nav-bar search box.
///
/// Owns its query and results; nothing here goes through the store.
/// Dropping the box cancels both the pending timer and an in-flight search.
pub struct SearchBox<S: UserSearch> {
    source: S,
    query: String,
    debouncer: Debouncer,
    view: watch::Sender<SearchView>,
}

impl<S: UserSearch> SearchBox<S> {
    pub fn new(source: S, quiet: Duration) -> Self {
        let (view, _) = watch::channel(SearchView::Idle);
        Self {
            source,
            query: String::new(),
            debouncer: Debouncer::new(quiet),
            view,
        }
    }

    /// Handle one keystroke's worth of input (the full current text).
    pub fn on_input(&mut self, raw: &str) {
        self.query = normalize_query(raw);

        if self.query.trim().is_empty() {
            self.debouncer.cancel();
            self.view.send_replace(SearchView::Idle);
            return;
        }

        // Stale failure text goes away as soon as the user types.
        self.view.send_if_modified(|view| {
            if matches!(view, SearchView::Failed(_)) {
                *view = SearchView::Idle;
                true
            } else {
                false
            }
        });

        let source = self.source.clone();
        let query = self.query.clone();
        let view = self.view.clone();
        self.debouncer.call(move || async move {
            let outcome = source.search(&query).await;
            tracing::debug!(query = %query, "Search view updated");
            view.send_replace(outcome.into());
        });
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending()
    }
}
