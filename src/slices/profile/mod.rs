//! Profile page view state: which tab is showing, and whether a page is loading.

mod reducer;
mod state;

pub use reducer::ProfileReducer;
pub use state::{ProfileTab, ProfileViewState};
