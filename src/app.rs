//! Application window setup

use crate::gui::{AppFlags, QuickripApp};
use anyhow::Result;
use iced::{Application, Settings};

/// Open the main window and block until it is closed
pub fn run_gui(flags: AppFlags) -> Result<()> {
    let mut settings = Settings::with_flags(flags);
    settings.window.size = iced::Size::new(720.0, 640.0);
    settings.window.min_size = Some(iced::Size::new(520.0, 480.0));
    settings.antialiasing = true;

    QuickripApp::run(settings)?;

    Ok(())
}
