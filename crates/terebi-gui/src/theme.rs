//! Semantic color tokens and style functions.
//!
//! Two built-in variants (dark and light) over an MD3-ish tonal surface
//! hierarchy. Style functions return closures for Iced's `.style()`
//! method, capturing the needed tokens from a [`ColorScheme`].

use iced::widget::{button, container, scrollable, text_input};
use iced::{Background, Border, Color, Theme};

use crate::config::ThemeMode;
use crate::style;

/// All semantic color tokens for the application.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces (low -> high elevation)
    pub surface_container_lowest: Color,
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Primary accent
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_dim: Color,
    pub on_primary: Color,

    // Error
    pub error: Color,
    pub error_container: Color,
    pub on_error_container: Color,
}

impl ColorScheme {
    /// Built-in dark variant.
    pub fn dark() -> Self {
        Self {
            surface_container_lowest: Color::from_rgb8(0x0E, 0x0D, 0x13),
            surface: Color::from_rgb8(0x14, 0x12, 0x18),
            surface_container_low: Color::from_rgb8(0x1C, 0x1A, 0x22),
            surface_container: Color::from_rgb8(0x21, 0x1F, 0x26),
            surface_container_high: Color::from_rgb8(0x2B, 0x29, 0x31),
            surface_bright: Color::from_rgb8(0x3A, 0x38, 0x41),

            on_surface: Color::from_rgb8(0xE6, 0xE0, 0xE9),
            on_surface_variant: Color::from_rgb8(0xCA, 0xC4, 0xD0),
            outline: Color::from_rgb8(0x93, 0x8F, 0x99),
            outline_variant: Color::from_rgb8(0x49, 0x45, 0x4F),

            primary: Color::from_rgb8(0x8E, 0xC5, 0xFF),
            primary_hover: Color::from_rgb8(0xA5, 0xD1, 0xFF),
            primary_dim: Color::from_rgb8(0x6F, 0xA9, 0xE4),
            on_primary: Color::from_rgb8(0x00, 0x32, 0x58),

            error: Color::from_rgb8(0xFF, 0xB4, 0xAB),
            error_container: Color::from_rgb8(0x52, 0x1A, 0x16),
            on_error_container: Color::from_rgb8(0xFF, 0xDA, 0xD6),
        }
    }

    /// Built-in light variant.
    pub fn light() -> Self {
        Self {
            surface_container_lowest: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            surface: Color::from_rgb8(0xFA, 0xF8, 0xFD),
            surface_container_low: Color::from_rgb8(0xF4, 0xF2, 0xF7),
            surface_container: Color::from_rgb8(0xEE, 0xEC, 0xF1),
            surface_container_high: Color::from_rgb8(0xE8, 0xE6, 0xEB),
            surface_bright: Color::from_rgb8(0xE0, 0xDE, 0xE4),

            on_surface: Color::from_rgb8(0x1B, 0x1B, 0x1F),
            on_surface_variant: Color::from_rgb8(0x44, 0x47, 0x4E),
            outline: Color::from_rgb8(0x74, 0x77, 0x7F),
            outline_variant: Color::from_rgb8(0xC4, 0xC6, 0xCF),

            primary: Color::from_rgb8(0x3C, 0x64, 0x8D),
            primary_hover: Color::from_rgb8(0x4A, 0x74, 0x9E),
            primary_dim: Color::from_rgb8(0x2B, 0x4E, 0x72),
            on_primary: Color::from_rgb8(0xFF, 0xFF, 0xFF),

            error: Color::from_rgb8(0xBA, 0x1A, 0x1A),
            error_container: Color::from_rgb8(0xFF, 0xDA, 0xD6),
            on_error_container: Color::from_rgb8(0x41, 0x00, 0x02),
        }
    }

    /// Scheme for a resolved mode (System already resolved).
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        "Terebi",
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.primary,
            warning: cs.primary_hover,
            danger: cs.error,
        },
    )
}

// ── Containers ───────────────────────────────────────────────────

/// A card container: surface background, rounded corners, subtle border.
pub fn card(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// Status bar container style.
pub fn status_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let text = cs.on_surface_variant;
    let bg = cs.surface_container_lowest;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Composite search bar container — pill-shaped with subtle border.
pub fn search_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_FULL.into(),
        },
        ..Default::default()
    }
}

/// Metadata badge (genre pill): tonal surface with outline border.
pub fn metadata_badge(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_FULL.into(),
        },
        ..Default::default()
    }
}

/// Poster placeholder container.
pub fn poster_placeholder(cs: &ColorScheme, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius.into(),
        },
        ..Default::default()
    }
}

// ── Buttons ──────────────────────────────────────────────────────

/// List item button — card-like with selection highlight.
pub fn list_item(
    selected: bool,
    cs: &ColorScheme,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_container_high = cs.surface_container_high;
    let surface_container = cs.surface_container;
    let outline_variant = cs.outline_variant;
    let primary = cs.primary;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let (bg, border_color) = if selected {
            (Some(Background::Color(surface_container_high)), primary)
        } else {
            match status {
                button::Status::Hovered => {
                    (Some(Background::Color(surface_container)), outline_variant)
                }
                _ => (None, Color::TRANSPARENT),
            }
        };

        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                color: border_color,
                width: if selected { 1.0 } else { 0.0 },
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Primary action button (Post, etc.).
pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let primary_dim = cs.primary_dim;
    let on_primary = cs.on_primary;
    let surface_bright = cs.surface_bright;
    let outline = cs.outline;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (primary_hover, on_primary),
            button::Status::Pressed => (primary_dim, on_primary),
            button::Status::Disabled => (surface_bright, outline),
            _ => (primary, on_primary),
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Ghost / outlined button — transparent bg, border outline.
pub fn ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline_variant = cs.outline_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Quiet destructive button — error-colored text, no fill until hovered.
pub fn danger_ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let error = cs.error;
    let error_container = cs.error_container;
    let on_error_container = cs.on_error_container;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered | button::Status::Pressed => {
                (Some(Background::Color(error_container)), on_error_container)
            }
            _ => (None, error),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_SM.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

// ── Inputs ───────────────────────────────────────────────────────

/// Custom text input styling that adapts to theme.
pub fn text_input_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container_low = cs.surface_container_low;
    let on_surface_variant = cs.on_surface_variant;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let border_color = match status {
            text_input::Status::Focused { .. } => primary,
            text_input::Status::Hovered => outline,
            _ => outline_variant,
        };
        text_input::Style {
            background: Background::Color(surface_container_low),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            icon: on_surface_variant,
            placeholder: outline,
            value: on_surface,
            selection: primary,
        }
    }
}

/// Borderless text input for use inside the composite search bar.
pub fn text_input_borderless(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline = cs.outline;
    let primary = cs.primary;

    move |_theme, _status| text_input::Style {
        background: Background::Color(Color::TRANSPARENT),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 0.0.into(),
        },
        icon: on_surface_variant,
        placeholder: outline,
        value: on_surface,
        selection: primary,
    }
}

// ── Scrollables ──────────────────────────────────────────────────

/// Overlay scrollbar: thin transparent rail, pill scroller that becomes
/// more visible on hover/drag.
pub fn overlay_scrollbar(
    cs: &ColorScheme,
) -> impl Fn(&Theme, scrollable::Status) -> scrollable::Style {
    let on_surface = cs.on_surface;
    let primary = cs.primary;

    move |_theme, status| {
        let (scroller_color, scroller_alpha) = match status {
            scrollable::Status::Dragged { .. } => (primary, 0.7),
            scrollable::Status::Hovered {
                is_vertical_scrollbar_hovered: true,
                ..
            } => (on_surface, 0.5),
            scrollable::Status::Hovered { .. } => (on_surface, 0.25),
            _ => (on_surface, 0.15),
        };

        let rail = scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: Background::Color(Color {
                    a: scroller_alpha,
                    ..scroller_color
                }),
                border: Border {
                    radius: style::RADIUS_FULL.into(),
                    ..Border::default()
                },
            },
        };

        scrollable::Style {
            container: container::Style::default(),
            vertical_rail: rail,
            horizontal_rail: rail,
            gap: None,
            auto_scroll: scrollable::AutoScroll {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                shadow: iced::Shadow::default(),
                icon: on_surface,
            },
        }
    }
}
