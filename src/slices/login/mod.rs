//! Session slice: who is logged in and with which token.

mod reducer;
mod state;

pub use reducer::LoginReducer;
pub use state::LoginState;
