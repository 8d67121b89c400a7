pub mod comments;
pub mod insight;
pub mod seasons;

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task};

use terebi_api::types::{ShowSearchResult, ShowWithEpisodes};
use terebi_api::ApiClient;

use crate::app;
use crate::format;
use crate::poster_cache::PosterCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::{self, empty_state, rounded_poster};

const DETAILS_FAILED: &str = "Failed to load show details";

// ── State ─────────────────────────────────────────────────────────

/// Show details screen: fetch-on-open of the full aggregate.
pub struct Details {
    show: ShowSearchResult,
    state: State,
}

enum State {
    Loading,
    Failed,
    Loaded(Loaded),
}

struct Loaded {
    details: ShowWithEpisodes,
    seasons: seasons::Seasons,
    insight: insight::Insight,
    comments: comments::Comments,
}

// ── Messages ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    DetailsLoaded(i64, Result<ShowWithEpisodes, String>),
    Retry,
    BackPressed,
    Seasons(seasons::Message),
    Insight(insight::Message),
    Comments(comments::Message),
}

// ── Implementation ────────────────────────────────────────────────

impl Details {
    /// Create the screen for a selected show and start fetching its
    /// aggregate.
    pub fn new(show: ShowSearchResult, client: &ApiClient) -> (Self, Task<Message>) {
        let task = fetch_details(show.id, client);
        (
            Self {
                show,
                state: State::Loading,
            },
            task,
        )
    }

    pub fn show(&self) -> &ShowSearchResult {
        &self.show
    }

    /// Handle a details message, returning an Action for the app router.
    pub fn update(&mut self, msg: Message, client: &ApiClient) -> Action {
        match msg {
            Message::BackPressed => Action::Back,
            Message::Retry => {
                self.state = State::Loading;
                Action::RunTask(fetch_details(self.show.id, client).map(app::Message::Details))
            }
            Message::DetailsLoaded(show_id, result) => {
                if show_id != self.show.id {
                    // Response for a previously opened show.
                    return Action::None;
                }
                match result {
                    Ok(details) => {
                        let (seasons, seasons_task) =
                            seasons::Seasons::new(show_id, &details, client);
                        let (show_comments, comments_task) =
                            comments::Comments::new(comments::Scope::Show(show_id), client);
                        self.state = State::Loaded(Loaded {
                            details,
                            seasons,
                            insight: insight::Insight::new(insight::Scope::Show(show_id)),
                            comments: show_comments,
                        });
                        Action::RunTask(
                            Task::batch([
                                seasons_task.map(Message::Seasons),
                                comments_task.map(Message::Comments),
                            ])
                            .map(app::Message::Details),
                        )
                    }
                    Err(e) => {
                        tracing::warn!("details load failed for show {show_id}: {e}");
                        self.state = State::Failed;
                        Action::None
                    }
                }
            }
            Message::Seasons(msg) => match &mut self.state {
                State::Loaded(loaded) => Action::RunTask(
                    loaded
                        .seasons
                        .update(msg, client)
                        .map(Message::Seasons)
                        .map(app::Message::Details),
                ),
                _ => Action::None,
            },
            Message::Insight(msg) => match &mut self.state {
                State::Loaded(loaded) => Action::RunTask(
                    loaded
                        .insight
                        .update(msg, client)
                        .map(Message::Insight)
                        .map(app::Message::Details),
                ),
                _ => Action::None,
            },
            Message::Comments(msg) => match &mut self.state {
                State::Loaded(loaded) => Action::RunTask(
                    loaded
                        .comments
                        .update(msg, client)
                        .map(Message::Comments)
                        .map(app::Message::Details),
                ),
                _ => Action::None,
            },
        }
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, posters: &'a PosterCache) -> Element<'a, Message> {
        let back = button(text("\u{2190} Back").size(style::TEXT_SM))
            .padding([style::SPACE_SM, style::SPACE_MD])
            .on_press(Message::BackPressed)
            .style(theme::ghost_button(cs));

        let header = container(back).padding([style::SPACE_SM, style::SPACE_LG]);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => empty_state(cs, "Loading...", None),
            State::Failed => container(
                column![
                    text(DETAILS_FAILED)
                        .size(style::TEXT_SM)
                        .color(cs.error)
                        .line_height(style::LINE_HEIGHT_NORMAL),
                    button(text("Retry").size(style::TEXT_SM))
                        .padding([style::SPACE_SM, style::SPACE_XL])
                        .on_press(Message::Retry)
                        .style(theme::ghost_button(cs)),
                ]
                .spacing(style::SPACE_MD)
                .align_x(Alignment::Center),
            )
            .padding(style::SPACE_3XL)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into(),
            State::Loaded(loaded) => self.loaded_view(loaded, cs, posters),
        };

        column![header, body]
            .spacing(0)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn loaded_view<'a>(
        &'a self,
        loaded: &'a Loaded,
        cs: &'a ColorScheme,
        posters: &'a PosterCache,
    ) -> Element<'a, Message> {
        let details = &loaded.details;

        let poster = rounded_poster(
            cs,
            posters,
            details.id,
            &details.name,
            style::POSTER_WIDTH,
            style::POSTER_HEIGHT,
            style::RADIUS_MD,
        );

        let mut title_row = row![text(details.name.as_str())
            .size(style::TEXT_2XL)
            .line_height(style::LINE_HEIGHT_TIGHT)]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center);
        if let Some(year) = format::year_suffix(details.year) {
            title_row = title_row.push(
                text(year)
                    .size(style::TEXT_XL)
                    .color(cs.outline)
                    .line_height(style::LINE_HEIGHT_TIGHT),
            );
        }

        let mut info = column![title_row].spacing(style::SPACE_SM);

        if !details.genres.is_empty() {
            info = info.push(
                row(details
                    .genres
                    .iter()
                    .map(|genre| genre_badge(cs, genre))
                    .collect::<Vec<_>>())
                .spacing(style::SPACE_XS),
            );
        }

        if let Some(summary) = &details.summary {
            info = info.push(
                text(format::strip_tags(summary))
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
        }

        info = info.push(loaded.insight.view(cs).map(Message::Insight));

        let header_card = container(
            row![poster, info.width(Length::Fill)]
                .spacing(style::SPACE_LG)
                .align_y(Alignment::Start),
        )
        .padding(style::SPACE_LG)
        .width(Length::Fill)
        .style(theme::card(cs));

        let content = column![
            header_card,
            loaded.seasons.view(details, cs).map(Message::Seasons),
            text("Comments")
                .size(style::TEXT_XL)
                .line_height(style::LINE_HEIGHT_TIGHT),
            loaded.comments.view(cs).map(Message::Comments),
        ]
        .spacing(style::SPACE_LG)
        .padding([style::SPACE_SM, style::SPACE_LG]);

        widgets::styled_scrollable(content, cs)
            .height(Length::Fill)
            .into()
    }
}

fn fetch_details(show_id: i64, client: &ApiClient) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move { client.show_details(show_id).await },
        move |r| Message::DetailsLoaded(show_id, r.map_err(|e| e.to_string())),
    )
}

fn genre_badge<'a>(cs: &'a ColorScheme, genre: &'a str) -> Element<'a, Message> {
    container(
        text(genre)
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE),
    )
    .padding([style::SPACE_XXS, style::SPACE_MD])
    .center_y(Length::Fixed(style::BADGE_HEIGHT))
    .style(theme::metadata_badge(cs))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terebi_api::types::Season;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000/api").unwrap()
    }

    fn selected() -> ShowSearchResult {
        ShowSearchResult {
            id: 42,
            name: "Breaking Bad".to_string(),
            year: Some(2008),
            poster_url: None,
        }
    }

    fn aggregate(id: i64) -> ShowWithEpisodes {
        ShowWithEpisodes {
            id,
            name: "Breaking Bad".to_string(),
            year: Some(2008),
            poster_url: None,
            summary: Some("<p>A chemistry teacher.</p>".to_string()),
            genres: vec!["Drama".to_string()],
            seasons: vec![Season {
                season_number: 1,
                episodes: vec![],
            }],
        }
    }

    #[test]
    fn test_starts_loading() {
        let client = client();
        let (details, _task) = Details::new(selected(), &client);
        assert!(matches!(details.state, State::Loading));
    }

    #[test]
    fn test_load_failure_enters_failed_state() {
        let client = client();
        let (mut details, _task) = Details::new(selected(), &client);

        let _ = details.update(Message::DetailsLoaded(42, Err("HTTP 500".into())), &client);
        assert!(matches!(details.state, State::Failed));
    }

    #[test]
    fn test_stale_response_for_other_show_is_ignored() {
        let client = client();
        let (mut details, _task) = Details::new(selected(), &client);

        let _ = details.update(Message::DetailsLoaded(7, Ok(aggregate(7))), &client);
        assert!(matches!(details.state, State::Loading));
    }

    #[test]
    fn test_loaded_aggregate_builds_show_scoped_components() {
        let client = client();
        let (mut details, _task) = Details::new(selected(), &client);

        let action = details.update(Message::DetailsLoaded(42, Ok(aggregate(42))), &client);
        assert!(matches!(action, Action::RunTask(_)));

        let State::Loaded(loaded) = &details.state else {
            panic!("expected loaded state");
        };
        assert_eq!(loaded.insight.scope(), insight::Scope::Show(42));
        assert_eq!(loaded.comments.scope(), comments::Scope::Show(42));
    }

    #[test]
    fn test_retry_returns_to_loading() {
        let client = client();
        let (mut details, _task) = Details::new(selected(), &client);
        let _ = details.update(Message::DetailsLoaded(42, Err("HTTP 500".into())), &client);

        let action = details.update(Message::Retry, &client);
        assert!(matches!(action, Action::RunTask(_)));
        assert!(matches!(details.state, State::Loading));
    }

    #[test]
    fn test_back_action() {
        let client = client();
        let (mut details, _task) = Details::new(selected(), &client);
        let action = details.update(Message::BackPressed, &client);
        assert!(matches!(action, Action::Back));
    }
}
