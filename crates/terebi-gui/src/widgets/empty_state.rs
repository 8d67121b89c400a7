use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::ColorScheme;

/// Centered placeholder for an empty region: a headline and an optional
/// hint line underneath.
pub fn empty_state<'a, Message: 'a>(
    cs: &ColorScheme,
    headline: &'a str,
    hint: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column![text(headline)
        .size(style::TEXT_BASE)
        .color(cs.on_surface_variant)
        .line_height(style::LINE_HEIGHT_NORMAL)]
    .spacing(style::SPACE_XS)
    .align_x(Alignment::Center);

    if let Some(hint) = hint {
        content = content.push(
            text(hint)
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    container(content)
        .padding(style::SPACE_3XL)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}
