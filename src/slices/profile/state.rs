use crate::mvi::SliceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Timeline,
    About,
    Photos,
    FriendsRequests,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileViewState {
    pub active_tab: ProfileTab,
    pub loading: bool,
    /// Set when the about page failed to load. Cleared by a successful
    /// `ShowAbout` or by entering a profile.
    pub about_error: Option<String>,
}

impl SliceState for ProfileViewState {}

impl ProfileViewState {
    /// A failed about-page load can be retried by the view.
    pub fn can_retry_about(&self) -> bool {
        self.about_error.is_some()
    }
}
