pub mod details;
pub mod search;

use iced::Task;

use terebi_api::types::ShowSearchResult;

use crate::app;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Search,
    Details,
}

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state — the app interprets them in one place.
pub enum Action {
    /// No side-effect.
    None,
    /// Open the detail page for a show.
    OpenShow(ShowSearchResult),
    /// Go back to the search page.
    Back,
    /// Update the status bar message.
    SetStatus(String),
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
}
