//! Download item component

use crate::gui::app::Message;
use crate::gui::components::progress_bar;
use crate::gui::theme;
use crate::queue::{DownloadItem, DownloadStatus};
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

pub fn download_item(item: &DownloadItem) -> Element<'static, Message> {
    let status_color = match item.status {
        DownloadStatus::Downloading => theme::ACCENT,
        DownloadStatus::Completed => theme::SUCCESS,
        DownloadStatus::Error => theme::DANGER,
    };

    let header = row![
        text(&item.title)
            .size(16)
            .width(Length::Fill)
            .style(theme::TEXT_PRIMARY),
        text(item.status.as_str()).size(13).style(status_color),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    let mut content = column![
        header,
        text(&item.url).size(12).style(theme::TEXT_SECONDARY),
    ]
    .spacing(8)
    .width(Length::Fill);

    match item.status {
        DownloadStatus::Downloading => {
            content = content.push(progress_bar(item.progress));
        }
        DownloadStatus::Completed => {
            content = content.push(row![
                Space::with_width(Length::Fill),
                button(text("Show in Folder").size(12))
                    .on_press(Message::OpenLocation(item.id.clone()))
                    .padding([6, 12])
                    .style(iced::theme::Button::Custom(Box::new(theme::GhostButton))),
            ]);
        }
        DownloadStatus::Error => {
            if let Some(error) = &item.error {
                content = content.push(text(error).size(12).style(theme::DANGER));
            }
        }
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)))
        .into()
}
