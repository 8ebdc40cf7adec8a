use crate::mvi::SliceState;
use crate::session::SecureString;

/// Current session.
///
/// `user` is present iff a token was issued in this session; the reducer
/// only ever sets or clears both together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginState {
    pub user: Option<String>,
    pub access_token: Option<SecureString>,
}

impl SliceState for LoginState {}

impl LoginState {
    pub fn logged_in(user: impl Into<String>, token: SecureString) -> Self {
        Self {
            user: Some(user.into()),
            access_token: Some(token),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }
}
