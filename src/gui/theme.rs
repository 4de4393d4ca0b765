//! Dark neutral theme with blue accents

use iced::widget::{button, container, progress_bar, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Palette ---

pub const NEUTRAL_950: Color = Color::from_rgb(0.039, 0.039, 0.039); // Window
pub const NEUTRAL_900: Color = Color::from_rgb(0.090, 0.090, 0.090); // Cards
pub const NEUTRAL_800: Color = Color::from_rgb(0.149, 0.149, 0.149); // Inputs, hover
pub const NEUTRAL_700: Color = Color::from_rgb(0.251, 0.251, 0.251); // Borders, tracks
pub const NEUTRAL_400: Color = Color::from_rgb(0.639, 0.639, 0.639); // Labels
pub const NEUTRAL_100: Color = Color::from_rgb(0.961, 0.961, 0.961);

pub const BLUE_500: Color = Color::from_rgb(0.231, 0.510, 0.965);
pub const BLUE_600: Color = Color::from_rgb(0.145, 0.388, 0.922);
pub const BLUE_700: Color = Color::from_rgb(0.114, 0.306, 0.847);
pub const BLUE_800: Color = Color::from_rgb(0.118, 0.251, 0.686);

pub const GREEN_500: Color = Color::from_rgb(0.133, 0.773, 0.369);
pub const GREEN_600: Color = Color::from_rgb(0.086, 0.639, 0.290);
pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267);

pub const TEXT_PRIMARY: Color = NEUTRAL_100;
pub const TEXT_SECONDARY: Color = NEUTRAL_400;

pub const ACCENT: Color = BLUE_500;
pub const SUCCESS: Color = GREEN_500;
pub const DANGER: Color = RED_500;

// --- Container Styles ---

pub struct AppBackground;

impl container::StyleSheet for AppBackground {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(NEUTRAL_950)),
            ..Default::default()
        }
    }
}

pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(NEUTRAL_900)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Floating panel for the arguments form
pub struct PanelContainer;

impl container::StyleSheet for PanelContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(NEUTRAL_900)),
            border: Border {
                color: NEUTRAL_800,
                width: 1.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
                offset: Vector::new(0.0, 8.0),
                blur_radius: 16.0,
            },
        }
    }
}

/// Slide indicator dot
pub enum DotStyle {
    Active,
    Inactive,
}

impl container::StyleSheet for DotStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let color = match self {
            Self::Active => BLUE_500,
            Self::Inactive => NEUTRAL_700,
        };
        container::Appearance {
            background: Some(Background::Color(color)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// --- Button Styles ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BLUE_600)),
            text_color: Color::WHITE,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            shadow: Shadow::default(),
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BLUE_700)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BLUE_800)),
            text_color: Color::from_rgba(1.0, 1.0, 1.0, 0.6),
            ..self.active(style)
        }
    }
}

/// Green toggle used for the arguments panel
pub struct ToggleButton;

impl button::StyleSheet for ToggleButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GREEN_500)),
            text_color: Color::WHITE,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GREEN_600)),
            ..self.active(style)
        }
    }
}

/// Borderless button for wizard navigation and small actions
pub struct GhostButton;

impl button::StyleSheet for GhostButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: TEXT_PRIMARY,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(NEUTRAL_800)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: Color::from_rgba(0.961, 0.961, 0.961, 0.5),
            ..self.active(style)
        }
    }
}

// --- Input Styles ---

pub struct InputStyle;

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(NEUTRAL_800),
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: NEUTRAL_700,
            },
            icon_color: NEUTRAL_400,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: BLUE_500,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        NEUTRAL_400
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        TEXT_PRIMARY
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.231, 0.510, 0.965, 0.4)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            background: Background::Color(NEUTRAL_900),
            ..active
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        NEUTRAL_700
    }
}

// --- Scrollable Styles ---

pub struct ScrollableStyle;

impl scrollable::StyleSheet for ScrollableStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: Some(Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: NEUTRAL_700,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(
        &self,
        style: &Self::Style,
        _is_mouse_over_scrollbar: bool,
    ) -> scrollable::Appearance {
        self.active(style)
    }
}

// --- Progress Bar Styles ---

pub struct ProgressBarStyle;

impl progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        progress_bar::Appearance {
            background: Background::Color(NEUTRAL_700),
            bar: Background::Color(BLUE_500),
            border_radius: 4.0.into(),
        }
    }
}
