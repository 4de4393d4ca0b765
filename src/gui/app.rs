//! Main GUI application

use crate::arguments::{ArgumentField, ArgumentUpdate, DownloadArgumentsModel};
use crate::backend::Backend;
use crate::gui::clipboard;
use crate::gui::views::{main_view, onboarding_view};
use crate::onboarding::{InstallOutcome, NextAction, Onboarding, Slide};
use crate::preferences::{PreferenceStore, ONBOARDING_DONE};
use crate::queue::{self, DownloadQueue, QueueUpdate};
use crate::utils::{AppConfig, NativePicker, Notice, PathPicker, PickRequest};
use iced::{Application, Command, Element, Subscription, Theme};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Everything the GUI needs from `main`
pub struct AppFlags {
    /// Runtime that owns the preference writer; backend work is spawned on it too
    pub runtime: Arc<Runtime>,
    pub store: PreferenceStore,
    pub backend: Arc<dyn Backend>,
    pub config: AppConfig,
}

/// Main application state
pub struct QuickripApp {
    runtime: Arc<Runtime>,
    store: PreferenceStore,
    backend: Arc<dyn Backend>,
    config: AppConfig,
    picker: NativePicker,

    current_view: View,
    onboarding: Onboarding,
    queue: DownloadQueue,
    arguments: DownloadArgumentsModel,
    show_arguments: bool,
    notice: Option<Notice>,

    updates_tx: mpsc::UnboundedSender<QueueUpdate>,
    updates_rx: mpsc::UnboundedReceiver<QueueUpdate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Onboarding,
    Main,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Onboarding
    OnboardingNext,
    OnboardingPrevious,
    InstallationChecked(Option<PathBuf>),
    InstallYtDlp,
    InstallFinished(InstallOutcome),
    ChooseSaveDirectory,

    // Download queue
    UrlInputChanged(String),
    PasteFromClipboard,
    DownloadPressed,
    DownloadFinished(QueueUpdate),
    OpenLocation(String),

    // Arguments
    ToggleArguments,
    ArgumentChanged(ArgumentField, String),
    ConvertToAudioToggled(bool),
    BrowseArgument(ArgumentField),

    // System
    Tick,
}

impl QuickripApp {
    /// Run `future` on the app runtime and resolve to its output
    fn spawn<F, T>(&self, future: F) -> impl Future<Output = Option<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = self.runtime.spawn(future);
        async move {
            match handle.await {
                Ok(output) => Some(output),
                Err(e) => {
                    error!("Background task failed: {}", e);
                    None
                }
            }
        }
    }

    fn check_installation(&self) -> Command<Message> {
        let backend = Arc::clone(&self.backend);
        Command::perform(
            self.spawn(async move { Onboarding::check_installation(backend.as_ref()).await }),
            |path| Message::InstallationChecked(path.flatten()),
        )
    }

    /// Slide change hook: the tool setup slide re-checks the installation on entry
    fn on_slide_entered(&self) -> Command<Message> {
        if self.onboarding.slide() == Slide::ToolSetup {
            self.check_installation()
        } else {
            Command::none()
        }
    }

    fn set_notice(&mut self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            info!("{}", notice);
            self.notice = Some(notice);
        }
    }

    fn set_argument(&mut self, update: ArgumentUpdate) {
        if let Err(e) = self.arguments.set(update) {
            error!("Failed to save download arguments: {}", e);
            self.notice = Some(Notice::error("Failed to save download arguments"));
        }
    }

    fn pick_request(field: ArgumentField) -> PickRequest {
        let title = format!("Select {}", field.label());
        if field == ArgumentField::SavePath {
            PickRequest::directory(Some(&title))
        } else {
            PickRequest::file(title)
        }
    }

    fn start_download(&mut self) -> Command<Message> {
        let Some(pending) = self.queue.submit_input() else {
            return Command::none();
        };

        let (id, request) = pending.into_request(self.arguments.snapshot());
        debug!("Starting download {} with {:?}", id, request.arguments);

        let backend = Arc::clone(&self.backend);
        let updates = self.updates_tx.clone();
        let task_id = id.clone();

        Command::perform(
            self.spawn(queue::execute(backend, id, request, updates)),
            move |update| {
                Message::DownloadFinished(update.unwrap_or_else(|| QueueUpdate::Finished {
                    id: task_id,
                    result: Err("download task aborted".to_string()),
                }))
            },
        )
    }

    fn open_location(&self, id: &str) {
        let fallback = self
            .arguments
            .snapshot()
            .normalized()
            .save_path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.default_save_dir.clone());

        match self.queue.location_to_open(id, Some(&fallback)) {
            Some(folder) => {
                if let Err(e) = open::that(&folder) {
                    warn!("Failed to open {:?}: {}", folder, e);
                }
            }
            None => debug!("Nothing to open for download {}", id),
        }
    }
}

impl Application for QuickripApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppFlags;

    fn new(flags: Self::Flags) -> (Self, Command<Message>) {
        let current_view = if flags.store.read(&ONBOARDING_DONE) {
            View::Main
        } else {
            View::Onboarding
        };
        let arguments = DownloadArgumentsModel::new(flags.store.clone());
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        let app = Self {
            runtime: flags.runtime,
            store: flags.store,
            backend: flags.backend,
            config: flags.config,
            picker: NativePicker,
            current_view,
            onboarding: Onboarding::new(),
            queue: DownloadQueue::new(),
            arguments,
            show_arguments: false,
            notice: None,
            updates_tx,
            updates_rx,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Quickrip")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // Onboarding
            Message::OnboardingNext => match self.onboarding.next(&self.store) {
                Ok(NextAction::Finished) => {
                    self.arguments.reload();
                    self.current_view = View::Main;
                    Command::none()
                }
                Ok(NextAction::Advanced) => self.on_slide_entered(),
                Ok(NextAction::Stay) => Command::none(),
                Err(e) => {
                    error!("Failed to finish onboarding: {}", e);
                    self.notice = Some(Notice::error("Failed to save your preferences"));
                    Command::none()
                }
            },

            Message::OnboardingPrevious => {
                self.onboarding.retreat();
                self.on_slide_entered()
            }

            Message::InstallationChecked(path) => {
                self.onboarding.apply_installation_check(path);
                Command::none()
            }

            Message::InstallYtDlp => {
                if !self.onboarding.begin_install() {
                    return Command::none();
                }
                let backend = Arc::clone(&self.backend);
                Command::perform(
                    self.spawn(async move { Onboarding::run_install(backend.as_ref()).await }),
                    |outcome| {
                        Message::InstallFinished(outcome.unwrap_or_else(|| {
                            InstallOutcome::Failed("install task aborted".to_string())
                        }))
                    },
                )
            }

            Message::InstallFinished(outcome) => {
                let notice = self.onboarding.finish_install(outcome);
                self.set_notice(notice);
                Command::none()
            }

            Message::ChooseSaveDirectory => {
                let picked = self.picker.pick(&PickRequest::directory(None));
                self.onboarding.choose_directory(picked);
                Command::none()
            }

            // Download queue
            Message::UrlInputChanged(url) => {
                self.queue.set_input(url);
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::read_text() {
                    Ok(text) => self.queue.set_input(text),
                    Err(e) => {
                        warn!("{}", e);
                        self.notice = Some(Notice::error(e.to_string()));
                    }
                }
                Command::none()
            }

            Message::DownloadPressed => self.start_download(),

            Message::DownloadFinished(update) => {
                // progress sent before completion must land first
                while let Ok(pending) = self.updates_rx.try_recv() {
                    self.queue.apply(pending);
                }
                let notice = self.queue.apply(update);
                self.set_notice(notice);
                Command::none()
            }

            Message::OpenLocation(id) => {
                self.open_location(&id);
                Command::none()
            }

            // Arguments
            Message::ToggleArguments => {
                self.show_arguments = !self.show_arguments;
                Command::none()
            }

            Message::ArgumentChanged(field, raw) => {
                match field.update_from_str(&raw) {
                    Ok(update) => self.set_argument(update),
                    Err(e) => warn!("Ignoring {} = {:?}: {}", field, raw, e),
                }
                Command::none()
            }

            Message::ConvertToAudioToggled(checked) => {
                self.set_argument(ArgumentUpdate::ConvertToAudio(Some(checked)));
                Command::none()
            }

            Message::BrowseArgument(field) => {
                let picked = self.picker.pick(&Self::pick_request(field));
                if let Err(e) = self.arguments.set_from_picker(field, picked) {
                    error!("Failed to apply picked path for {}: {}", field, e);
                }
                Command::none()
            }

            // System
            Message::Tick => {
                while let Ok(update) = self.updates_rx.try_recv() {
                    self.queue.apply(update);
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        use crate::gui::theme;
        use iced::widget::container;
        use iced::Length;

        let content = match self.current_view {
            View::Onboarding => onboarding_view(&self.onboarding, self.notice.as_ref()),
            View::Main => main_view(
                &self.queue,
                &self.arguments.snapshot(),
                self.show_arguments,
                self.notice.as_ref(),
            ),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::AppBackground)))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Self::Theme {
        Theme::Dark
    }
}
