//! Onboarding wizard view

use crate::gui::app::Message;
use crate::gui::components::notice_line;
use crate::gui::theme;
use crate::onboarding::{Onboarding, Slide};
use crate::utils::Notice;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

fn slide_action(flow: &Onboarding) -> Element<'static, Message> {
    match flow.slide() {
        Slide::Welcome => Space::with_height(0).into(),
        Slide::ToolSetup => match flow.ytdlp_install_path() {
            Some(_) => text("All set!").size(16).style(theme::SUCCESS).into(),
            None => {
                let label = if flow.is_installing() {
                    "Installing..."
                } else {
                    "Install yt-dlp"
                };
                button(text(label).size(15))
                    .on_press_maybe((!flow.is_installing()).then_some(Message::InstallYtDlp))
                    .padding([10, 24])
                    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
                    .into()
            }
        },
        Slide::SaveLocation => {
            let mut action = column![button(text("Choose Folder").size(15))
                .on_press(Message::ChooseSaveDirectory)
                .padding([10, 24])
                .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))]
            .spacing(12);

            if let Some(dir) = flow.selected_directory() {
                action = action.push(
                    text(format!("Selected Directory: {}", dir.display()))
                        .size(14)
                        .style(theme::TEXT_SECONDARY),
                );
            }
            action.into()
        }
    }
}

fn slide_dots(current: Slide) -> Element<'static, Message> {
    let mut dots = row![].spacing(8);
    for slide in Slide::ALL {
        let style = if slide == current {
            theme::DotStyle::Active
        } else {
            theme::DotStyle::Inactive
        };
        dots = dots.push(
            container(Space::new(8, 8))
                .style(iced::theme::Container::Custom(Box::new(style))),
        );
    }
    dots.into()
}

pub fn onboarding_view(flow: &Onboarding, notice: Option<&Notice>) -> Element<'static, Message> {
    let previous = button(text("Previous").size(15))
        .on_press_maybe((!flow.is_previous_disabled()).then_some(Message::OnboardingPrevious))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(theme::GhostButton)));

    let next = button(text(flow.next_label()).size(15))
        .on_press_maybe((!flow.is_next_disabled()).then_some(Message::OnboardingNext))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(theme::GhostButton)));

    let card = container(
        column![
            text(flow.heading()).size(26).style(theme::TEXT_PRIMARY),
            text(flow.body()).size(15).style(theme::TEXT_SECONDARY),
            slide_action(flow),
            Space::with_height(16),
            row![
                previous,
                Space::with_width(Length::Fill),
                slide_dots(flow.slide()),
                Space::with_width(Length::Fill),
                next,
            ]
            .align_items(Alignment::Center),
        ]
        .spacing(16),
    )
    .padding(32)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    container(
        column![card, notice_line(notice)]
            .spacing(12)
            .max_width(672.0)
            .align_items(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(24)
    .center_x()
    .center_y()
    .into()
}
