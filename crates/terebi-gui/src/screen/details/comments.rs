//! Comment list with posting and deletion, show- or episode-scoped.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Task};

use terebi_api::types::Comment;
use terebi_api::ApiClient;

use crate::format;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::empty_state;

const LOAD_FAILED: &str = "Failed to load comments";
const POST_FAILED: &str = "Failed to add comment";
const DELETE_FAILED: &str = "Failed to delete comment";

/// Which comment thread this is. Decides the list and post endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Show(i64),
    Episode { show_id: i64, episode_id: i64 },
}

/// Comments component state.
pub struct Comments {
    scope: Scope,
    comments: Vec<Comment>,
    loading: bool,
    load_error: Option<String>,
    input: String,
    posting: bool,
    /// Error from the last post or delete attempt.
    action_error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<Comment>, String>),
    InputChanged(String),
    Submit,
    Posted(Result<Comment, String>),
    DeleteRequested(i64),
    Deleted(i64, Result<(), String>),
}

impl Comments {
    /// Create the component and start loading the thread.
    pub fn new(scope: Scope, client: &ApiClient) -> (Self, Task<Message>) {
        let comments = Self {
            scope,
            comments: Vec::new(),
            loading: true,
            load_error: None,
            input: String::new(),
            posting: false,
            action_error: None,
        };

        let client = client.clone();
        let task = Task::perform(
            async move {
                match scope {
                    Scope::Show(show_id) => client.show_comments(show_id).await,
                    Scope::Episode { episode_id, .. } => {
                        client.episode_comments(episode_id).await
                    }
                }
            },
            |r| Message::Loaded(r.map_err(|e| e.to_string())),
        );
        (comments, task)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn update(&mut self, msg: Message, client: &ApiClient) -> Task<Message> {
        match msg {
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(comments) => {
                        self.comments = comments;
                        self.load_error = None;
                    }
                    Err(e) => {
                        tracing::warn!("comments load failed: {e}");
                        self.load_error = Some(LOAD_FAILED.to_string());
                    }
                }
                Task::none()
            }
            Message::InputChanged(input) => {
                self.input = input;
                Task::none()
            }
            Message::Submit => {
                let trimmed = self.input.trim().to_string();
                if trimmed.is_empty() || self.posting {
                    return Task::none();
                }
                self.posting = true;
                self.action_error = None;

                let client = client.clone();
                let scope = self.scope;
                Task::perform(
                    async move {
                        match scope {
                            Scope::Show(show_id) => {
                                client.add_show_comment(show_id, &trimmed).await
                            }
                            Scope::Episode {
                                show_id,
                                episode_id,
                            } => {
                                client
                                    .add_episode_comment(show_id, episode_id, &trimmed)
                                    .await
                            }
                        }
                    },
                    |r| Message::Posted(r.map_err(|e| e.to_string())),
                )
            }
            Message::Posted(result) => {
                self.posting = false;
                match result {
                    Ok(comment) => {
                        self.comments.insert(0, comment);
                        self.input.clear();
                        self.action_error = None;
                    }
                    Err(e) => {
                        tracing::warn!("comment post failed: {e}");
                        // Input stays intact so the user can retry.
                        self.action_error = Some(POST_FAILED.to_string());
                    }
                }
                Task::none()
            }
            Message::DeleteRequested(comment_id) => {
                self.action_error = None;
                let client = client.clone();
                Task::perform(
                    async move { client.delete_comment(comment_id).await },
                    move |r| Message::Deleted(comment_id, r.map_err(|e| e.to_string())),
                )
            }
            Message::Deleted(comment_id, result) => {
                match result {
                    Ok(()) => {
                        self.comments.retain(|c| c.id != comment_id);
                    }
                    Err(e) => {
                        tracing::warn!("comment delete failed: {e}");
                        self.action_error = Some(DELETE_FAILED.to_string());
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let input = text_input("Add a comment...", &self.input)
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit)
            .size(style::TEXT_SM)
            .padding([style::SPACE_SM, style::SPACE_MD])
            .width(Length::Fill)
            .style(theme::text_input_style(cs));

        let can_post = !self.input.trim().is_empty() && !self.posting;
        let post = button(text(if self.posting { "Posting..." } else { "Post" }).size(style::TEXT_SM))
            .padding([style::SPACE_SM, style::SPACE_LG])
            .on_press_maybe(can_post.then_some(Message::Submit))
            .style(theme::primary_button(cs));

        let compose = row![input, post]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);

        let mut content = column![compose].spacing(style::SPACE_MD);

        if let Some(err) = &self.action_error {
            content = content.push(
                text(err.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.error)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
        }

        let list: Element<'_, Message> = if self.loading {
            empty_state(cs, "Loading comments...", None)
        } else if let Some(err) = &self.load_error {
            empty_state(cs, err, None)
        } else if self.comments.is_empty() {
            empty_state(cs, "No comments yet. Be the first!", None)
        } else {
            column(
                self.comments
                    .iter()
                    .map(|comment| comment_row(cs, comment))
                    .collect::<Vec<_>>(),
            )
            .spacing(style::SPACE_SM)
            .into()
        };
        content = content.push(list);

        container(content)
            .padding(style::SPACE_MD)
            .width(Length::Fill)
            .style(theme::card(cs))
            .into()
    }
}

fn comment_row<'a>(cs: &'a ColorScheme, comment: &'a Comment) -> Element<'a, Message> {
    let header = row![
        text(format::comment_timestamp(&comment.created_at))
            .size(style::TEXT_XS)
            .color(cs.outline)
            .line_height(style::LINE_HEIGHT_LOOSE)
            .width(Length::Fill),
        button(text("Delete").size(style::TEXT_XS))
            .padding([style::SPACE_XXS, style::SPACE_SM])
            .on_press(Message::DeleteRequested(comment.id))
            .style(theme::danger_ghost_button(cs)),
    ]
    .spacing(style::SPACE_SM)
    .align_y(Alignment::Center);

    column![
        header,
        text(comment.text.as_str())
            .size(style::TEXT_SM)
            .line_height(style::LINE_HEIGHT_NORMAL),
    ]
    .spacing(style::SPACE_XXS)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000/api").unwrap()
    }

    fn comment(id: i64, text: &str) -> Comment {
        Comment {
            id,
            show_id: 1,
            episode_id: None,
            text: text.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
        }
    }

    fn loaded(client: &ApiClient, existing: Vec<Comment>) -> Comments {
        let (mut comments, _task) = Comments::new(Scope::Show(1), client);
        let _ = comments.update(Message::Loaded(Ok(existing)), client);
        comments
    }

    #[test]
    fn test_posted_comment_is_prepended_and_input_cleared() {
        let client = client();
        let mut comments = loaded(&client, vec![comment(1, "older")]);

        let _ = comments.update(Message::InputChanged("hello".into()), &client);
        let _ = comments.update(Message::Submit, &client);
        assert!(comments.posting);

        let _ = comments.update(Message::Posted(Ok(comment(2, "hello"))), &client);
        assert_eq!(comments.comments[0].text, "hello");
        assert_eq!(comments.comments.len(), 2);
        assert!(comments.input.is_empty());
        assert!(!comments.posting);
    }

    #[test]
    fn test_blank_or_inflight_post_is_rejected() {
        let client = client();
        let mut comments = loaded(&client, vec![]);

        let _ = comments.update(Message::InputChanged("   ".into()), &client);
        let _ = comments.update(Message::Submit, &client);
        assert!(!comments.posting);

        let _ = comments.update(Message::InputChanged("real text".into()), &client);
        let _ = comments.update(Message::Submit, &client);
        assert!(comments.posting);
        // Second submit while in flight does nothing.
        let _ = comments.update(Message::Submit, &client);
        assert!(comments.posting);
    }

    #[test]
    fn test_failed_post_keeps_input() {
        let client = client();
        let mut comments = loaded(&client, vec![]);

        let _ = comments.update(Message::InputChanged("my thoughts".into()), &client);
        let _ = comments.update(Message::Submit, &client);
        let _ = comments.update(Message::Posted(Err("HTTP 500".into())), &client);

        assert_eq!(comments.input, "my thoughts");
        assert_eq!(comments.action_error.as_deref(), Some("Failed to add comment"));
        assert!(comments.comments.is_empty());
    }

    #[test]
    fn test_delete_waits_for_confirmation() {
        let client = client();
        let mut comments = loaded(&client, vec![comment(1, "a"), comment(2, "b")]);

        let _ = comments.update(Message::DeleteRequested(1), &client);
        // Nothing removed until the server confirms.
        assert_eq!(comments.comments.len(), 2);

        let _ = comments.update(Message::Deleted(1, Ok(())), &client);
        assert_eq!(comments.comments.len(), 1);
        assert_eq!(comments.comments[0].id, 2);
    }

    #[test]
    fn test_failed_delete_removes_nothing() {
        let client = client();
        let mut comments = loaded(&client, vec![comment(1, "a")]);

        let _ = comments.update(Message::DeleteRequested(1), &client);
        let _ = comments.update(Message::Deleted(1, Err("HTTP 404".into())), &client);

        assert_eq!(comments.comments.len(), 1);
        assert_eq!(
            comments.action_error.as_deref(),
            Some("Failed to delete comment")
        );
    }
}
