//! Navigation-bar logic: debounced live search and friend status.

mod debounce;
mod relationship;
mod search;

pub use debounce::Debouncer;
pub use relationship::{relationship, Relationship};
pub use search::{normalize_query, SearchBox, SearchView, UserSearch};
