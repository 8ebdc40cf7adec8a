use crate::mvi::SliceState;

/// Progress of the registration form. Transient.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationStatus {
    pub pending: bool,
    pub failed: bool,
    pub error: Option<String>,
}

impl SliceState for RegistrationStatus {}
