//! Unidirectional state primitives.
//!
//! ```text
//! Action ──→ dispatch ──→ Reducer ──→ Slice ──→ Subscribers
//!    ↑                                              │
//!    └──────────────── fetchers / view ─────────────┘
//! ```
//!
//! - **Slice**: immutable snapshot of one named portion of state
//! - **Intent**: the closed set of actions a slice may react to
//! - **Reducer**: pure function that computes the next slice value

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
