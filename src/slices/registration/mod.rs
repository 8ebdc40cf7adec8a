mod reducer;
mod state;

pub use reducer::RegistrationReducer;
pub use state::RegistrationStatus;
