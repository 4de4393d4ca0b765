//! Quickrip - a small desktop front end for yt-dlp
//!
//! Without a subcommand the GUI is started; the subcommands drive the same
//! preference store and backend headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use path_absolutize::Absolutize;
use quickrip::arguments::{ArgumentField, DownloadArgumentsModel};
use quickrip::backend::{Backend, YtDlpBackend};
use quickrip::onboarding::Onboarding;
use quickrip::preferences::{PreferenceStore, ONBOARDING_DONE};
use quickrip::queue::{self, DownloadQueue, QueueUpdate};
use quickrip::utils::AppConfig;
use quickrip::AppFlags;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "quickrip", version, about = "Download audio and video with yt-dlp")]
struct Args {
    /// Directory holding the preferences database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory yt-dlp is installed into
    #[arg(long, global = true)]
    tools_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Download a URL with the saved arguments
    Download { url: String },
    /// Install yt-dlp unless it is already available
    Install,
    /// Show onboarding state, yt-dlp location and saved arguments
    Status,
    /// Inspect or edit the saved download arguments
    Args {
        #[command(subcommand)]
        action: ArgsAction,
    },
}

#[derive(Subcommand)]
enum ArgsAction {
    Show,
    /// Set one field, e.g. `set savePath ~/Music` or `set convert-to-audio true`
    Set { field: String, value: String },
    Unset { field: String },
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .with_context(|| format!("invalid path {}", path.display()))?
        .into_owned())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let data_dir = args.data_dir.as_deref().map(absolute).transpose()?;
    let tools_dir = args.tools_dir.as_deref().map(absolute).transpose()?;
    let config = AppConfig::resolve(data_dir, tools_dir);

    let runtime = Arc::new(Runtime::new()?);
    let store = runtime.block_on(PreferenceStore::open_at(&config.database_path()));
    let backend: Arc<dyn Backend> = Arc::new(YtDlpBackend::new(config.tools_dir.clone()));

    let outcome = match args.command {
        None => quickrip::app::run_gui(AppFlags {
            runtime: Arc::clone(&runtime),
            store: store.clone(),
            backend,
            config,
        }),
        Some(command) => runtime.block_on(run_command(command, &store, backend)),
    };

    runtime.block_on(store.flush());
    outcome
}

async fn run_command(
    command: CliCommand,
    store: &PreferenceStore,
    backend: Arc<dyn Backend>,
) -> Result<()> {
    match command {
        CliCommand::Download { url } => download_cli(url, store, backend).await,
        CliCommand::Install => {
            let mut flow = Onboarding::new();
            match flow.install(backend.as_ref()).await {
                Some(notice) => {
                    println!("{}", notice);
                    Ok(())
                }
                None => anyhow::bail!("Failed to install yt-dlp, see the log for details"),
            }
        }
        CliCommand::Status => {
            let arguments = DownloadArgumentsModel::new(store.clone());
            let ytdlp = Onboarding::check_installation(backend.as_ref()).await;

            println!("Onboarding done: {}", store.read(&ONBOARDING_DONE));
            match ytdlp {
                Some(path) => println!("yt-dlp: {}", path.display()),
                None => println!("yt-dlp: not installed"),
            }
            println!(
                "Arguments: {}",
                serde_json::to_string_pretty(&arguments.snapshot())?
            );
            Ok(())
        }
        CliCommand::Args { action } => args_cli(action, store),
    }
}

fn args_cli(action: ArgsAction, store: &PreferenceStore) -> Result<()> {
    let mut arguments = DownloadArgumentsModel::new(store.clone());

    match action {
        ArgsAction::Show => {}
        ArgsAction::Set { field, value } => {
            let field: ArgumentField = field.parse()?;
            let value = if field.is_path() {
                absolute(Path::new(&value))?.to_string_lossy().into_owned()
            } else {
                value
            };
            arguments.set(field.update_from_str(&value)?)?;
        }
        ArgsAction::Unset { field } => {
            let field: ArgumentField = field.parse()?;
            arguments.set(field.cleared())?;
        }
    }

    match arguments.current() {
        Some(current) => println!("{}", serde_json::to_string_pretty(current)?),
        None => println!("No download arguments saved"),
    }
    Ok(())
}

async fn download_cli(url: String, store: &PreferenceStore, backend: Arc<dyn Backend>) -> Result<()> {
    let arguments = DownloadArgumentsModel::new(store.clone());
    let mut downloads = DownloadQueue::new();

    let Some(pending) = downloads.submit(&url) else {
        anyhow::bail!("No URL given");
    };
    let (id, request) = pending.into_request(arguments.snapshot());

    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(async move {
        while let Some(update) = updates_rx.recv().await {
            if let QueueUpdate::Progress { percent, .. } = update {
                println!("Progress: {:.1}%", percent);
            }
        }
    });

    let finished = queue::execute(backend, id.clone(), request, updates_tx).await;
    let _ = reporter.await;

    let notice = downloads.apply(finished);
    if let Some(item) = downloads.get(&id) {
        if let Some(path) = &item.file_path {
            println!("Saved to {}", path.display());
        }
        if let Some(error) = &item.error {
            eprintln!("{}", error);
        }
    }

    match notice {
        Some(notice) if notice.is_error() => anyhow::bail!("{}", notice.message),
        Some(notice) => {
            println!("{}", notice);
            Ok(())
        }
        None => Ok(()),
    }
}
