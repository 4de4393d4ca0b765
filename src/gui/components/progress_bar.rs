//! Progress bar component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::progress_bar as iced_progress_bar;
use iced::{Element, Length};

/// Thin bar for a 0-100 percentage
pub fn progress_bar(percent: f32) -> Element<'static, Message> {
    iced_progress_bar(0.0..=100.0, percent.clamp(0.0, 100.0))
        .height(Length::Fixed(8.0))
        .style(iced::theme::ProgressBar::Custom(Box::new(
            theme::ProgressBarStyle,
        )))
        .into()
}
