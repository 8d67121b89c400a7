use iced::widget::{container, text};
use iced::{ContentFit, Element, Length};

use crate::poster_cache::{PosterCache, PosterState};
use crate::theme::{self, ColorScheme};

/// Rounded poster image with a placeholder fallback.
///
/// Renders the cached image when it has been downloaded; while loading
/// (or after a failed download) the placeholder shows instead, so list
/// rows and the detail header stay visually aligned either way.
pub fn rounded_poster<'a, Message: 'a>(
    cs: &ColorScheme,
    posters: &'a PosterCache,
    show_id: i64,
    title: &str,
    width: f32,
    height: f32,
    radius: f32,
) -> Element<'a, Message> {
    if let Some(PosterState::Loaded(path)) = posters.get(show_id) {
        container(
            iced::widget::image(path.as_path())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .border_radius(radius),
        )
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(theme::poster_placeholder(cs, radius))
        .into()
    } else {
        poster_placeholder(cs, title, width, height, radius)
    }
}

/// Rounded poster placeholder showing the show's initial.
pub fn poster_placeholder<'a, Message: 'a>(
    cs: &ColorScheme,
    title: &str,
    width: f32,
    height: f32,
    radius: f32,
) -> Element<'a, Message> {
    let initial: String = title
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string());

    container(
        text(initial)
            .size(height * 0.3)
            .color(cs.outline),
    )
    .center_x(Length::Fixed(width))
    .center_y(Length::Fixed(height))
    .style(theme::poster_placeholder(cs, radius))
    .into()
}
