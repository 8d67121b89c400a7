//! On-demand AI insight blurb, show- or episode-scoped.

use iced::widget::{button, column, container, text};
use iced::{Element, Length, Task};

use terebi_api::ApiClient;

use crate::style;
use crate::theme::{self, ColorScheme};

const INSIGHT_FAILED: &str = "Failed to generate insight";

/// What the insight is about. Decides which endpoint is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Show(i64),
    Episode { show_id: i64, episode_id: i64 },
}

/// Insight component state. Nothing is fetched until the user asks.
pub struct Insight {
    scope: Scope,
    insight: Option<terebi_api::types::Insight>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Requested,
    Loaded(Result<terebi_api::types::Insight, String>),
}

impl Insight {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            insight: None,
            loading: false,
            error: None,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn update(&mut self, msg: Message, client: &ApiClient) -> Task<Message> {
        match msg {
            Message::Requested => {
                if self.loading {
                    return Task::none();
                }
                self.loading = true;
                self.error = None;

                let client = client.clone();
                let scope = self.scope;
                Task::perform(
                    async move {
                        match scope {
                            Scope::Show(show_id) => client.show_insight(show_id).await,
                            Scope::Episode {
                                show_id,
                                episode_id,
                            } => client.episode_insight(show_id, episode_id).await,
                        }
                    },
                    |r| Message::Loaded(r.map_err(|e| e.to_string())),
                )
            }
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(insight) => {
                        self.insight = Some(insight);
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("insight fetch failed: {e}");
                        // A failed refresh keeps the previous text.
                        self.error = Some(INSIGHT_FAILED.to_string());
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let mut content = column![].spacing(style::SPACE_SM);

        if let Some(err) = &self.error {
            content = content.push(
                text(err.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.error)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
        }

        if let Some(insight) = &self.insight {
            content = content.push(
                text(insight.insight.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.on_surface)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
            content = content.push(
                text(format!("Source: {}", insight.source))
                    .size(style::TEXT_XS)
                    .color(cs.outline)
                    .line_height(style::LINE_HEIGHT_LOOSE),
            );
        }

        let label = if self.loading {
            "Generating..."
        } else if self.insight.is_some() {
            "Refresh"
        } else {
            "View insight"
        };
        let action = button(text(label).size(style::TEXT_SM))
            .padding([style::SPACE_XS, style::SPACE_MD])
            .on_press_maybe((!self.loading).then_some(Message::Requested))
            .style(theme::ghost_button(cs));
        content = content.push(action);

        container(content)
            .padding(style::SPACE_MD)
            .width(Length::Fill)
            .style(theme::card(cs))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000/api").unwrap()
    }

    fn blurb(s: &str) -> terebi_api::types::Insight {
        terebi_api::types::Insight {
            insight: s.to_string(),
            source: "ai".to_string(),
        }
    }

    #[test]
    fn test_nothing_fetched_until_requested() {
        let insight = Insight::new(Scope::Show(1));
        assert!(!insight.loading);
        assert!(insight.insight.is_none());
    }

    #[test]
    fn test_first_failure_shows_only_error() {
        let mut insight = Insight::new(Scope::Show(1));
        let client = client();

        let _ = insight.update(Message::Requested, &client);
        assert!(insight.loading);

        let _ = insight.update(Message::Loaded(Err("HTTP 502".into())), &client);
        assert!(!insight.loading);
        assert!(insight.insight.is_none());
        assert_eq!(insight.error.as_deref(), Some("Failed to generate insight"));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_text() {
        let mut insight = Insight::new(Scope::Show(1));
        let client = client();

        let _ = insight.update(Message::Requested, &client);
        let _ = insight.update(Message::Loaded(Ok(blurb("A slow-burn drama."))), &client);
        assert_eq!(
            insight.insight.as_ref().map(|i| i.insight.as_str()),
            Some("A slow-burn drama.")
        );
        assert!(insight.error.is_none());

        let _ = insight.update(Message::Requested, &client);
        let _ = insight.update(Message::Loaded(Err("HTTP 500".into())), &client);
        assert_eq!(
            insight.insight.as_ref().map(|i| i.insight.as_str()),
            Some("A slow-burn drama.")
        );
        assert_eq!(insight.error.as_deref(), Some("Failed to generate insight"));
    }

    #[test]
    fn test_request_while_loading_is_ignored() {
        let mut insight = Insight::new(Scope::Episode {
            show_id: 1,
            episode_id: 2,
        });
        let client = client();

        let _ = insight.update(Message::Requested, &client);
        assert!(insight.loading);
        // A second request while in flight must not clear state or
        // dispatch again.
        let _ = insight.update(Message::Requested, &client);
        assert!(insight.loading);
    }
}
