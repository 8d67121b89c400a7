use std::time::Duration;

use iced::widget::{button, column, container, row, rule, text, text_input};
use iced::{Alignment, Element, Length, Task};

use terebi_api::types::ShowSearchResult;
use terebi_api::ApiClient;

use crate::app;
use crate::debounce::Debouncer;
use crate::format;
use crate::poster_cache::PosterCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::{self, empty_state, rounded_poster};

const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);
const SEARCH_FAILED: &str = "Failed to search. Please try again.";

// ── State ─────────────────────────────────────────────────────────

/// Search screen state.
pub struct Search {
    query: String,
    results: Vec<ShowSearchResult>,
    /// Whether at least one search has settled for the current query.
    settled: bool,
    loading: bool,
    error: Option<String>,
    debouncer: Debouncer,
    /// Sequence tag of the most recently dispatched search. Responses
    /// carrying an older tag are stale and discarded.
    request_seq: u64,
}

// ── Messages ──────────────────────────────────────────────────────

/// Messages handled by the Search screen.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    ClearQuery,
    DebounceElapsed(u64),
    Retry,
    ResultsLoaded(u64, Result<Vec<ShowSearchResult>, String>),
    ShowSelected(usize),
}

// ── Implementation ────────────────────────────────────────────────

impl Search {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            settled: false,
            loading: false,
            error: None,
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            request_seq: 0,
        }
    }

    /// Current search query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Handle a search message, returning an Action for the app router.
    pub fn update(&mut self, msg: Message, client: &ApiClient) -> Action {
        match msg {
            Message::QueryChanged(new_query) => {
                self.query = new_query;
                Action::RunTask(
                    self.debouncer
                        .debounce(|generation| {
                            app::Message::Search(Message::DebounceElapsed(generation))
                        }),
                )
            }
            Message::ClearQuery => {
                self.query.clear();
                Action::RunTask(
                    self.debouncer
                        .debounce(|generation| {
                            app::Message::Search(Message::DebounceElapsed(generation))
                        }),
                )
            }
            Message::DebounceElapsed(generation) => {
                if !self.debouncer.is_current(generation) {
                    return Action::None;
                }
                self.dispatch(client)
            }
            Message::Retry => self.dispatch(client),
            Message::ResultsLoaded(seq, result) => {
                if seq != self.request_seq {
                    // A newer search is in flight; this response is stale.
                    return Action::None;
                }
                self.loading = false;
                self.settled = true;
                match result {
                    Ok(results) => {
                        self.results = results;
                        self.error = None;
                        let n = self.results.len();
                        Action::SetStatus(format!(
                            "{n} {}",
                            if n == 1 { "result" } else { "results" }
                        ))
                    }
                    Err(e) => {
                        tracing::warn!("search failed: {e}");
                        self.results.clear();
                        self.error = Some(SEARCH_FAILED.to_string());
                        Action::None
                    }
                }
            }
            Message::ShowSelected(idx) => {
                let Some(show) = self.results.get(idx).cloned() else {
                    return Action::None;
                };
                self.query.clear();
                self.results.clear();
                self.settled = false;
                self.error = None;
                Action::OpenShow(show)
            }
        }
    }

    /// Fire a search for the current query, tagged with a fresh sequence
    /// number. An empty trimmed query resets to idle instead.
    fn dispatch(&mut self, client: &ApiClient) -> Action {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            self.results.clear();
            self.settled = false;
            self.loading = false;
            self.error = None;
            return Action::None;
        }

        self.request_seq += 1;
        let seq = self.request_seq;
        self.loading = true;
        self.error = None;

        let client = client.clone();
        Action::RunTask(Task::perform(
            async move { client.search(&query).await },
            move |r| {
                app::Message::Search(Message::ResultsLoaded(seq, r.map_err(|e| e.to_string())))
            },
        ))
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, posters: &'a PosterCache) -> Element<'a, Message> {
        let search_input = text_input("Search TV shows...", &self.query)
            .on_input(Message::QueryChanged)
            .size(style::TEXT_BASE)
            .padding([style::SPACE_XS, style::SPACE_SM])
            .width(Length::Fill)
            .style(theme::text_input_borderless(cs));

        let mut search_row = row![search_input]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);

        if !self.query.is_empty() {
            search_row = search_row.push(
                button(text("\u{00D7}").size(style::TEXT_BASE).color(cs.on_surface_variant))
                    .on_press(Message::ClearQuery)
                    .padding([0.0, style::SPACE_XS])
                    .style(theme::ghost_button(cs)),
            );
        }

        let header = container(
            container(search_row)
                .style(theme::search_bar(cs))
                .padding([style::SPACE_SM, style::SPACE_MD])
                .width(Length::Fill),
        )
        .padding([style::SPACE_SM, style::SPACE_LG]);

        let body: Element<'_, Message> = if self.loading {
            empty_state(cs, "Searching...", None)
        } else if let Some(err) = &self.error {
            container(
                column![
                    text(err.as_str())
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
            .into()
        } else if !self.settled {
            empty_state(
                cs,
                "Find a show",
                Some("Start typing to search for TV series."),
            )
        } else if self.results.is_empty() {
            empty_state(cs, "No shows found.", Some("Try a different search."))
        } else {
            let items: Vec<Element<'a, Message>> = self
                .results
                .iter()
                .enumerate()
                .map(|(idx, show)| result_row(cs, posters, show, idx))
                .collect();

            widgets::styled_scrollable(
                column(items)
                    .spacing(style::SPACE_XXS)
                    .padding([style::SPACE_XS, style::SPACE_LG]),
                cs,
            )
            .height(Length::Fill)
            .into()
        };

        column![header, rule::horizontal(1), body]
            .spacing(0)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// A single search result list item.
fn result_row<'a>(
    cs: &'a ColorScheme,
    posters: &'a PosterCache,
    show: &'a ShowSearchResult,
    idx: usize,
) -> Element<'a, Message> {
    let thumb = rounded_poster(
        cs,
        posters,
        show.id,
        &show.name,
        style::THUMB_WIDTH,
        style::THUMB_HEIGHT,
        style::RADIUS_SM,
    );

    let mut title_row = row![text(show.name.as_str())
        .size(style::TEXT_BASE)
        .line_height(style::LINE_HEIGHT_NORMAL)]
    .spacing(style::SPACE_SM)
    .align_y(Alignment::Center);

    if let Some(year) = format::year_suffix(show.year) {
        title_row = title_row.push(
            text(year)
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    let content = row![thumb, title_row.width(Length::Fill)]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center);

    button(content)
        .width(Length::Fill)
        .padding([style::SPACE_XS, style::SPACE_MD])
        .on_press(Message::ShowSelected(idx))
        .style(theme::list_item(false, cs))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000/api").unwrap()
    }

    fn show(id: i64, name: &str, year: Option<i32>) -> ShowSearchResult {
        ShowSearchResult {
            id,
            name: name.to_string(),
            year,
            poster_url: None,
        }
    }

    #[test]
    fn test_stale_debounce_generation_is_ignored() {
        let mut search = Search::new();
        let client = client();

        let _ = search.update(Message::QueryChanged("brea".into()), &client);
        let _ = search.update(Message::QueryChanged("break".into()), &client);

        // Generation 1 is superseded by generation 2; nothing dispatches.
        let action = search.update(Message::DebounceElapsed(1), &client);
        assert!(matches!(action, Action::None));
        assert!(!search.loading);

        // The latest generation dispatches a search task.
        let action = search.update(Message::DebounceElapsed(2), &client);
        assert!(matches!(action, Action::RunTask(_)));
        assert!(search.loading);
    }

    #[test]
    fn test_empty_settled_query_resets_to_idle() {
        let mut search = Search::new();
        let client = client();

        let _ = search.update(Message::QueryChanged("   ".into()), &client);
        let action = search.update(Message::DebounceElapsed(1), &client);
        assert!(matches!(action, Action::None));
        assert!(!search.loading);
        assert!(search.results.is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut search = Search::new();
        let client = client();

        let _ = search.update(Message::QueryChanged("wire".into()), &client);
        let _ = search.update(Message::DebounceElapsed(1), &client);
        let _ = search.update(Message::QueryChanged("wired".into()), &client);
        let _ = search.update(Message::DebounceElapsed(2), &client);
        assert_eq!(search.request_seq, 2);

        // Response for the first request arrives after the second
        // dispatched: it must not be applied.
        let _ = search.update(
            Message::ResultsLoaded(1, Ok(vec![show(1, "The Wire", Some(2002))])),
            &client,
        );
        assert!(search.results.is_empty());
        assert!(search.loading);

        // The current response lands normally.
        let _ = search.update(
            Message::ResultsLoaded(2, Ok(vec![show(2, "Wired", None)])),
            &client,
        );
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].name, "Wired");
        assert!(!search.loading);
    }

    #[test]
    fn test_results_replace_never_merge() {
        let mut search = Search::new();
        let client = client();

        let _ = search.update(Message::QueryChanged("b".into()), &client);
        let _ = search.update(Message::DebounceElapsed(1), &client);
        let _ = search.update(
            Message::ResultsLoaded(1, Ok(vec![show(1, "Breaking Bad", Some(2008))])),
            &client,
        );

        let _ = search.update(Message::QueryChanged("be".into()), &client);
        let _ = search.update(Message::DebounceElapsed(2), &client);
        let _ = search.update(
            Message::ResultsLoaded(2, Ok(vec![show(3, "Better Call Saul", Some(2015))])),
            &client,
        );

        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].name, "Better Call Saul");
    }

    #[test]
    fn test_failure_shows_fixed_message_and_clears_results() {
        let mut search = Search::new();
        let client = client();

        // A successful search first, so there are results to clear.
        let _ = search.update(Message::QueryChanged("wire".into()), &client);
        let _ = search.update(Message::DebounceElapsed(1), &client);
        let _ = search.update(
            Message::ResultsLoaded(1, Ok(vec![show(1, "The Wire", Some(2002))])),
            &client,
        );
        assert_eq!(search.results.len(), 1);

        let _ = search.update(Message::QueryChanged("wired".into()), &client);
        let _ = search.update(Message::DebounceElapsed(2), &client);
        let _ = search.update(
            Message::ResultsLoaded(2, Err("HTTP 500".into())),
            &client,
        );

        assert_eq!(search.error.as_deref(), Some("Failed to search. Please try again."));
        assert!(search.results.is_empty());
        assert!(!search.loading);
    }

    #[test]
    fn test_selection_resets_and_passes_exact_record() {
        let mut search = Search::new();
        let client = client();

        let _ = search.update(Message::QueryChanged("breaking".into()), &client);
        let _ = search.update(Message::DebounceElapsed(1), &client);
        let _ = search.update(
            Message::ResultsLoaded(1, Ok(vec![show(42, "Breaking Bad", Some(2008))])),
            &client,
        );

        let action = search.update(Message::ShowSelected(0), &client);
        match action {
            Action::OpenShow(selected) => {
                assert_eq!(selected.id, 42);
                assert_eq!(selected.name, "Breaking Bad");
                assert_eq!(selected.year, Some(2008));
            }
            _ => panic!("expected OpenShow"),
        }
        assert!(search.query.is_empty());
        assert!(search.results.is_empty());
    }
}
