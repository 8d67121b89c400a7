use iced::widget::{column, container, text};
use iced::{Element, Length, Task, Theme};

use terebi_api::ApiClient;

use crate::config::AppConfig;
use crate::poster_cache::{self, PosterCache, PosterState};
use crate::screen::{details, search, Action, Page};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Application state — slim router that delegates to screens.
pub struct Terebi {
    page: Page,
    client: ApiClient,
    scheme: ColorScheme,
    iced_theme: Theme,
    // Screens
    search: search::Search,
    details: Option<details::Details>,
    // Poster images
    posters: PosterCache,
    // App-level chrome
    status_message: String,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    PosterLoaded {
        show_id: i64,
        result: Result<std::path::PathBuf, String>,
    },
    Search(search::Message),
    Details(details::Message),
}

impl Terebi {
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = match ApiClient::new(&config.server.base_url) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(
                    "invalid server base URL {:?}: {e}; using default",
                    config.server.base_url
                );
                ApiClient::new(AppConfig::default().server.base_url.as_str())
                    .expect("built-in default base URL is valid")
            }
        };

        let mode = theme::resolve_mode(config.appearance.mode);
        let scheme = ColorScheme::for_mode(mode);
        let iced_theme = theme::build_theme(&scheme);

        (
            Self {
                page: Page::default(),
                client,
                scheme,
                iced_theme,
                search: search::Search::new(),
                details: None,
                posters: PosterCache::default(),
                status_message: "Ready".into(),
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        match &self.details {
            Some(details) if self.page == Page::Details => {
                format!("{} - Terebi", details.show().name)
            }
            _ => String::from("Terebi"),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PosterLoaded { show_id, result } => {
                match result {
                    Ok(path) => {
                        self.posters.states.insert(show_id, PosterState::Loaded(path));
                    }
                    Err(_) => {
                        self.posters.states.insert(show_id, PosterState::Failed);
                    }
                }
                Task::none()
            }
            Message::Search(msg) => {
                // Kick off poster downloads for freshly arrived results.
                let posters = match &msg {
                    search::Message::ResultsLoaded(_, Ok(results)) => self.batch_request_posters(
                        results
                            .iter()
                            .map(|s| (s.id, s.poster_url.clone()))
                            .collect(),
                    ),
                    _ => Task::none(),
                };
                let action = self.search.update(msg, &self.client);
                Task::batch([posters, self.handle_action(action)])
            }
            Message::Details(msg) => {
                let posters = match &msg {
                    details::Message::DetailsLoaded(show_id, Ok(details)) => {
                        self.request_poster(*show_id, details.poster_url.as_deref())
                    }
                    _ => Task::none(),
                };
                match &mut self.details {
                    Some(details) => {
                        let action = details.update(msg, &self.client);
                        Task::batch([posters, self.handle_action(action)])
                    }
                    // Message for a screen that was already closed.
                    None => Task::none(),
                }
            }
        }
    }

    /// Batch-request poster downloads for a set of (show_id, poster_url) pairs.
    fn batch_request_posters(&mut self, items: Vec<(i64, Option<String>)>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = items
            .into_iter()
            .map(|(id, url)| self.request_poster(id, url.as_deref()))
            .collect();
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    /// Request a poster image download for a show if not already requested.
    fn request_poster(&mut self, show_id: i64, poster_url: Option<&str>) -> Task<Message> {
        let Some(url) = poster_url else {
            // No poster URL available; the placeholder renders.
            self.posters
                .states
                .entry(show_id)
                .or_insert(PosterState::Failed);
            return Task::none();
        };
        if self.posters.states.contains_key(&show_id) {
            return Task::none();
        }
        // Check disk cache first.
        let path = poster_cache::poster_path(show_id);
        if path.exists() {
            self.posters
                .states
                .insert(show_id, PosterState::Loaded(path));
            return Task::none();
        }
        self.posters.states.insert(show_id, PosterState::Loading);
        let url = url.to_string();
        Task::perform(
            async move { poster_cache::fetch_poster(show_id, url).await },
            move |result| Message::PosterLoaded { show_id, result },
        )
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::OpenShow(show) => {
                self.status_message = show.name.clone();
                let (details, task) = details::Details::new(show, &self.client);
                self.details = Some(details);
                self.page = Page::Details;
                task.map(Message::Details)
            }
            Action::Back => {
                self.details = None;
                self.page = Page::Search;
                self.status_message = "Ready".into();
                Task::none()
            }
            Action::SetStatus(msg) => {
                self.status_message = msg;
                Task::none()
            }
            Action::RunTask(task) => task,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = &self.scheme;

        let page_content: Element<'_, Message> = match (&self.page, &self.details) {
            (Page::Details, Some(details)) => {
                details.view(cs, &self.posters).map(Message::Details)
            }
            _ => self.search.view(cs, &self.posters).map(Message::Search),
        };

        let status_bar = container(
            text(&self.status_message)
                .size(style::TEXT_XS)
                .line_height(style::LINE_HEIGHT_LOOSE),
        )
        .style(theme::status_bar(cs))
        .width(Length::Fill)
        .height(Length::Fixed(style::STATUS_BAR_HEIGHT))
        .padding([4.0, style::SPACE_MD]);

        column![container(page_content).height(Length::Fill), status_bar].into()
    }

    pub fn theme(&self) -> Theme {
        self.iced_theme.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terebi_api::types::ShowSearchResult;

    fn app() -> Terebi {
        Terebi::new(AppConfig::default()).0
    }

    fn show() -> ShowSearchResult {
        ShowSearchResult {
            id: 42,
            name: "Breaking Bad".to_string(),
            year: Some(2008),
            poster_url: None,
        }
    }

    #[test]
    fn test_starts_on_search_page() {
        let app = app();
        assert_eq!(app.page, Page::Search);
        assert!(app.details.is_none());
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn test_open_show_routes_to_details() {
        let mut app = app();
        let _ = app.handle_action(Action::OpenShow(show()));

        assert_eq!(app.page, Page::Details);
        assert_eq!(app.status_message, "Breaking Bad");
        assert_eq!(app.details.as_ref().map(|d| d.show().id), Some(42));
        assert_eq!(app.title(), "Breaking Bad - Terebi");
    }

    #[test]
    fn test_back_returns_to_search() {
        let mut app = app();
        let _ = app.handle_action(Action::OpenShow(show()));
        let _ = app.handle_action(Action::Back);

        assert_eq!(app.page, Page::Search);
        assert!(app.details.is_none());
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.title(), "Terebi");
    }

    #[test]
    fn test_message_for_closed_details_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::Details(details::Message::BackPressed));
        assert_eq!(app.page, Page::Search);
    }

    #[test]
    fn test_poster_request_marks_loading_once() {
        let mut app = app();

        let _ = app.request_poster(1, Some("https://img.example/1.jpg"));
        assert!(matches!(app.posters.get(1), Some(PosterState::Loading)));

        // A repeat request must not reset the state.
        let _ = app.update(Message::PosterLoaded {
            show_id: 1,
            result: Ok(std::path::PathBuf::from("/tmp/1.jpg")),
        });
        let _ = app.request_poster(1, Some("https://img.example/1.jpg"));
        assert!(matches!(app.posters.get(1), Some(PosterState::Loaded(_))));
    }

    #[test]
    fn test_poster_without_url_renders_placeholder() {
        let mut app = app();
        let _ = app.request_poster(2, None);
        assert!(matches!(app.posters.get(2), Some(PosterState::Failed)));
    }

    #[test]
    fn test_failed_download_is_recorded() {
        let mut app = app();
        let _ = app.request_poster(3, Some("https://img.example/3.jpg"));
        let _ = app.update(Message::PosterLoaded {
            show_id: 3,
            result: Err("connection refused".into()),
        });
        assert!(matches!(app.posters.get(3), Some(PosterState::Failed)));
    }

    #[test]
    fn test_search_results_trigger_poster_requests() {
        let mut app = app();

        let results = vec![
            ShowSearchResult {
                id: 10,
                name: "The Wire".to_string(),
                year: Some(2002),
                poster_url: Some("https://img.example/10.jpg".to_string()),
            },
            ShowSearchResult {
                id: 11,
                name: "Oz".to_string(),
                year: None,
                poster_url: None,
            },
        ];
        let _ = app.update(Message::Search(search::Message::QueryChanged("w".into())));
        let _ = app.update(Message::Search(search::Message::DebounceElapsed(1)));
        let _ = app.update(Message::Search(search::Message::ResultsLoaded(
            1,
            Ok(results),
        )));

        assert!(matches!(app.posters.get(10), Some(PosterState::Loading)));
        assert!(matches!(app.posters.get(11), Some(PosterState::Failed)));
    }

    #[test]
    fn test_invalid_base_url_falls_back_to_default() {
        let mut config = AppConfig::default();
        config.server.base_url = "not a url".into();
        let (app, _task) = Terebi::new(config);
        assert_eq!(app.client.base_url(), "http://127.0.0.1:8000/api");
    }
}
