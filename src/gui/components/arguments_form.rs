//! Download arguments form

use crate::arguments::{ArgumentField, DownloadArguments};
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, checkbox, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

fn placeholder(field: ArgumentField) -> &'static str {
    match field {
        ArgumentField::FfmpegLocation => "/path/to/ffmpeg",
        ArgumentField::YtDlpLocation => "/path/to/yt-dlp",
        ArgumentField::Cookies => "/path/to/cookies.txt",
        ArgumentField::SavePath => "/path/to/save-dir",
        ArgumentField::AudioFormat => "mp3, m4a, wav, etc.",
        ArgumentField::AudioQuality => "0-9 (best)",
        ArgumentField::ConvertToAudio => "",
    }
}

fn value(arguments: &DownloadArguments, field: ArgumentField) -> &str {
    let value = match field {
        ArgumentField::FfmpegLocation => &arguments.ffmpeg_location,
        ArgumentField::YtDlpLocation => &arguments.yt_dlp_location,
        ArgumentField::Cookies => &arguments.cookies,
        ArgumentField::SavePath => &arguments.save_path,
        ArgumentField::AudioFormat => &arguments.audio_format,
        ArgumentField::AudioQuality => &arguments.audio_quality,
        ArgumentField::ConvertToAudio => return "",
    };
    value.as_deref().unwrap_or("")
}

fn field_row(arguments: &DownloadArguments, field: ArgumentField) -> Element<'static, Message> {
    let input = text_input(placeholder(field), value(arguments, field))
        .on_input(move |raw| Message::ArgumentChanged(field, raw))
        .padding([6, 8])
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)));

    let input: Element<'static, Message> = if field.is_path() {
        row![
            input,
            button(text("Browse").size(12))
                .on_press(Message::BrowseArgument(field))
                .padding([6, 10])
                .style(iced::theme::Button::Custom(Box::new(theme::GhostButton))),
        ]
        .spacing(6)
        .align_items(Alignment::Center)
        .into()
    } else {
        input.into()
    };

    column![
        text(field.label()).size(13).style(theme::TEXT_SECONDARY),
        input
    ]
    .spacing(4)
    .into()
}

/// Editable view of every download argument
pub fn arguments_form(arguments: &DownloadArguments) -> Element<'static, Message> {
    let mut form = column![].spacing(14);

    for field in ArgumentField::ALL {
        form = if field == ArgumentField::ConvertToAudio {
            form.push(
                checkbox(field.label(), arguments.convert_to_audio.unwrap_or(false))
                    .on_toggle(Message::ConvertToAudioToggled)
                    .size(16)
                    .text_size(13),
            )
        } else {
            form.push(field_row(arguments, field))
        };
    }

    container(form)
        .padding(16)
        .width(Length::Fill)
        .max_width(576.0)
        .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer)))
        .into()
}
