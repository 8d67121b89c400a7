//! Season/episode accordion with per-episode watched tracking.

use std::collections::HashSet;

use iced::widget::{button, checkbox, column, container, row, text};
use iced::{Alignment, Element, Length, Task};

use terebi_api::types::{Episode, Season, ShowWithEpisodes, WatchedMark};
use terebi_api::ApiClient;

use crate::format;
use crate::screen::details::{comments, insight};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Season list state: one expandable season, one expandable episode,
/// and the watched id-set.
pub struct Seasons {
    show_id: i64,
    expanded_season: Option<u32>,
    expanded_episode: Option<i64>,
    watched: HashSet<i64>,
    /// Components for the currently expanded episode, if any.
    episode_insight: Option<insight::Insight>,
    episode_comments: Option<comments::Comments>,
}

#[derive(Debug, Clone)]
pub enum Message {
    SeasonToggled(u32),
    EpisodeToggled(i64),
    WatchedLoaded(Result<Vec<WatchedMark>, String>),
    WatchedToggled(i64, bool),
    WatchedConfirmed {
        episode_id: i64,
        watched: bool,
        result: Result<(), String>,
    },
    Insight(insight::Message),
    Comments(comments::Message),
}

impl Seasons {
    /// Create the component and start loading watched marks.
    pub fn new(show_id: i64, details: &ShowWithEpisodes, client: &ApiClient) -> (Self, Task<Message>) {
        let seasons = Self {
            show_id,
            expanded_season: details.seasons.first().map(|s| s.season_number),
            expanded_episode: None,
            watched: HashSet::new(),
            episode_insight: None,
            episode_comments: None,
        };

        let client = client.clone();
        let task = Task::perform(
            async move { client.watched_episodes(show_id).await },
            |r| Message::WatchedLoaded(r.map_err(|e| e.to_string())),
        );
        (seasons, task)
    }

    pub fn update(&mut self, msg: Message, client: &ApiClient) -> Task<Message> {
        match msg {
            Message::SeasonToggled(season_number) => {
                if self.expanded_season == Some(season_number) {
                    self.expanded_season = None;
                } else {
                    self.expanded_season = Some(season_number);
                }
                Task::none()
            }
            Message::EpisodeToggled(episode_id) => {
                if self.expanded_episode == Some(episode_id) {
                    self.expanded_episode = None;
                    self.episode_insight = None;
                    self.episode_comments = None;
                    return Task::none();
                }
                self.expanded_episode = Some(episode_id);
                self.episode_insight = Some(insight::Insight::new(insight::Scope::Episode {
                    show_id: self.show_id,
                    episode_id,
                }));
                let (episode_comments, task) = comments::Comments::new(
                    comments::Scope::Episode {
                        show_id: self.show_id,
                        episode_id,
                    },
                    client,
                );
                self.episode_comments = Some(episode_comments);
                task.map(Message::Comments)
            }
            Message::WatchedLoaded(result) => {
                match result {
                    Ok(marks) => {
                        self.watched = marks
                            .into_iter()
                            .filter(|m| m.watched)
                            .map(|m| m.episode_id)
                            .collect();
                    }
                    Err(e) => {
                        // Non-fatal: checkboxes start unchecked.
                        tracing::warn!("watched list load failed: {e}");
                    }
                }
                Task::none()
            }
            Message::WatchedToggled(episode_id, watched) => {
                // Optimistic: flip the set first, revert on failure.
                if watched {
                    self.watched.insert(episode_id);
                } else {
                    self.watched.remove(&episode_id);
                }

                let client = client.clone();
                let show_id = self.show_id;
                Task::perform(
                    async move {
                        if watched {
                            client.mark_watched(show_id, episode_id).await
                        } else {
                            client.unmark_watched(show_id, episode_id).await
                        }
                    },
                    move |r| Message::WatchedConfirmed {
                        episode_id,
                        watched,
                        result: r.map(|_| ()).map_err(|e| e.to_string()),
                    },
                )
            }
            Message::WatchedConfirmed {
                episode_id,
                watched,
                result,
            } => {
                if let Err(e) = result {
                    tracing::warn!("watched toggle failed for episode {episode_id}: {e}");
                    // Revert only this episode's optimistic flip.
                    if watched {
                        self.watched.remove(&episode_id);
                    } else {
                        self.watched.insert(episode_id);
                    }
                }
                Task::none()
            }
            Message::Insight(msg) => match &mut self.episode_insight {
                Some(insight) => insight.update(msg, client).map(Message::Insight),
                None => Task::none(),
            },
            Message::Comments(msg) => match &mut self.episode_comments {
                Some(comments) => comments.update(msg, client).map(Message::Comments),
                None => Task::none(),
            },
        }
    }

    pub fn is_watched(&self, episode_id: i64) -> bool {
        self.watched.contains(&episode_id)
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(
        &'a self,
        details: &'a ShowWithEpisodes,
        cs: &'a ColorScheme,
    ) -> Element<'a, Message> {
        if details.seasons.is_empty() {
            return crate::widgets::empty_state(cs, "No episodes listed.", None);
        }

        column(
            details
                .seasons
                .iter()
                .map(|season| self.season_view(season, cs))
                .collect::<Vec<_>>(),
        )
        .spacing(style::SPACE_SM)
        .into()
    }

    fn season_view<'a>(&'a self, season: &'a Season, cs: &'a ColorScheme) -> Element<'a, Message> {
        let expanded = self.expanded_season == Some(season.season_number);

        let header = button(
            row![
                text(format!("Season {}", season.season_number))
                    .size(style::TEXT_LG)
                    .line_height(style::LINE_HEIGHT_NORMAL)
                    .width(Length::Fill),
                text(format!("{} episodes", season.episodes.len()))
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_LOOSE),
                text(if expanded { "\u{2212}" } else { "+" })
                    .size(style::TEXT_LG)
                    .color(cs.on_surface_variant),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding([style::SPACE_SM, style::SPACE_MD])
        .on_press(Message::SeasonToggled(season.season_number))
        .style(theme::list_item(expanded, cs));

        let mut section = column![header].spacing(style::SPACE_XXS);

        if expanded {
            for episode in &season.episodes {
                section = section.push(self.episode_view(episode, cs));
            }
        }

        container(section)
            .padding(style::SPACE_SM)
            .width(Length::Fill)
            .style(theme::card(cs))
            .into()
    }

    fn episode_view<'a>(&'a self, episode: &'a Episode, cs: &'a ColorScheme) -> Element<'a, Message> {
        let watched_box = checkbox(self.is_watched(episode.id))
            .on_toggle(move |checked| Message::WatchedToggled(episode.id, checked));

        let mut label_row = row![text(format!("{}. {}", episode.number, episode.name))
            .size(style::TEXT_SM)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .width(Length::Fill)]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center);

        if let Some(airdate) = &episode.airdate {
            label_row = label_row.push(
                text(airdate.as_str())
                    .size(style::TEXT_XS)
                    .color(cs.outline)
                    .line_height(style::LINE_HEIGHT_LOOSE),
            );
        }

        let expand_btn = button(label_row)
            .width(Length::Fill)
            .padding([style::SPACE_XS, style::SPACE_SM])
            .on_press(Message::EpisodeToggled(episode.id))
            .style(theme::list_item(self.expanded_episode == Some(episode.id), cs));

        // The checkbox lives outside the expand button, so toggling
        // watched never expands the row.
        let episode_row = row![watched_box, expand_btn]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);

        let mut section = column![episode_row].spacing(style::SPACE_SM);

        if self.expanded_episode == Some(episode.id) {
            let mut detail = column![].spacing(style::SPACE_SM);

            if let Some(summary) = &episode.summary {
                detail = detail.push(
                    text(format::strip_tags(summary))
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant)
                        .line_height(style::LINE_HEIGHT_NORMAL),
                );
            }
            if let Some(insight) = &self.episode_insight {
                detail = detail.push(insight.view(cs).map(Message::Insight));
            }
            if let Some(comments) = &self.episode_comments {
                detail = detail.push(comments.view(cs).map(Message::Comments));
            }

            section = section.push(
                container(detail)
                    .padding([style::SPACE_SM, style::SPACE_XL])
                    .width(Length::Fill),
            );
        }

        section.into()
    }
}
