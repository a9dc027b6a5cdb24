//! folder-installer: install every .exe/.msi in a folder with live progress

mod cli;
mod display;

use anyhow::{Context, Result};
use cli::Cli;
use display::{Display, DisplayConfig};
use folder_installer::InstallationRun;
use std::path::Path;
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    let _guard = init_logging(cli.log_dir.as_deref())?;

    tracing::info!(folder = %cli.folder.display(), "folder-installer starting");

    let run = InstallationRun::from_folder(&cli.folder)
        .with_context(|| format!("scan {}", cli.folder.display()))?;
    if run.is_empty() {
        println!("No installers (.exe, .msi) found in {}", cli.folder.display());
        return Ok(ExitCode::SUCCESS);
    }

    let display = Display::new(&DisplayConfig::default(), run.tasks())?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = tokio::spawn(run.execute(cli.monitor_options(), tx));

    while let Some(event) = rx.recv().await {
        display.handle(&event);
    }

    let summary = runner
        .await
        .context("installation run aborted")?
        .context("installation run produced no summary")?;

    tracing::info!(success = summary.success, fail = summary.fail, "folder-installer done");
    Ok(if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize logging to stderr, or to a daily file when `log_dir` is set
fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folder_installer=warn"));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::daily(dir, "folder-installer.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
            Ok(None)
        }
    }
}
