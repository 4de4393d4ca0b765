//! URL input component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// URL field with paste and download buttons
pub fn url_input(value: &str, can_submit: bool) -> Element<'static, Message> {
    let submit = can_submit.then_some(Message::DownloadPressed);

    row![
        text_input("Paste YouTube URL here...", value)
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::DownloadPressed)
            .padding([10, 16])
            .width(Length::Fill)
            .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle))),
        tooltip(
            button(text("Paste").size(14))
                .on_press(Message::PasteFromClipboard)
                .padding([10, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::GhostButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Download").size(14))
            .on_press_maybe(submit)
            .padding([10, 24])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(8)
    .align_items(Alignment::Center)
    .into()
}
