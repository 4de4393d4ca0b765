//! Main view: URL entry, arguments panel and the download list

use crate::arguments::DownloadArguments;
use crate::gui::app::Message;
use crate::gui::components::{arguments_form, download_item, notice_line, url_input};
use crate::gui::theme;
use crate::queue::DownloadQueue;
use crate::utils::Notice;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};

pub fn main_view(
    queue: &DownloadQueue,
    arguments: &DownloadArguments,
    show_arguments: bool,
    notice: Option<&Notice>,
) -> Element<'static, Message> {
    let toggle_label = if show_arguments {
        "Hide Arguments"
    } else {
        "Arguments"
    };

    let mut form = column![
        url_input(queue.input(), queue.can_submit()),
        row![
            button(text(toggle_label).size(14))
                .on_press(Message::ToggleArguments)
                .padding([8, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::ToggleButton))),
            Space::with_width(Length::Fill),
            notice_line(notice),
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    ]
    .spacing(8);

    if show_arguments {
        form = form.push(arguments_form(arguments));
    }

    let downloads: Element<'static, Message> = if queue.items().is_empty() {
        container(
            text("Your downloads will appear here")
                .size(14)
                .style(theme::TEXT_SECONDARY),
        )
        .width(Length::Fill)
        .padding(24)
        .center_x()
        .into()
    } else {
        let mut list = column![].spacing(8);
        for item in queue.items() {
            list = list.push(download_item(item));
        }

        scrollable(list)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(
                theme::ScrollableStyle,
            )))
            .into()
    };

    let content = column![
        text("YouTube Downloader").size(26).style(theme::TEXT_PRIMARY),
        form,
        text("Downloads").size(18).style(theme::TEXT_PRIMARY),
        downloads,
    ]
    .spacing(20)
    .align_items(Alignment::Center)
    .max_width(672.0)
    .height(Length::Fill);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .center_x()
        .into()
}
