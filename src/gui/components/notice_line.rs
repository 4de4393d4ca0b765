//! Status line for the latest notice

use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::{Notice, NoticeLevel};
use iced::widget::{text, Space};
use iced::Element;

pub fn notice_line(notice: Option<&Notice>) -> Element<'static, Message> {
    match notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Success => theme::SUCCESS,
                NoticeLevel::Error => theme::DANGER,
            };
            text(notice.to_string()).size(14).style(color).into()
        }
        None => Space::with_height(14).into(),
    }
}
