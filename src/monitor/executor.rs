//! Installation monitoring for one installer file.
//!
//! This module provides the main [`monitor`] function that launches an
//! installer, estimates its progress while it runs and reports the outcome.

use super::estimator::ProgressEstimator;
use super::launch::{self, LaunchedInstaller};
use super::output::reports_completion;
use super::{InstallError, InstallProgress, InstallStatus};
use crate::{InstallResult, InstallTask, MonitorOptions};
use std::process::ExitStatus;
use std::time::Instant;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest poll period; `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Install one file and watch it until the process exits.
///
/// This function:
/// 1. Reports `Started` at 0%
/// 2. Checks the file is still there and launches it
/// 3. Polls the process every `poll_interval`, raising the estimate by one
///    point per `tick_interval` up to the ceiling, or straight to the ceiling
///    when the installer prints a line containing "completed"
/// 4. On exit code 0, ramps to 100 and reports `Complete`
/// 5. On any other exit, or any error along the way, reports `Failed` at 0%
///
/// Errors are never returned: they become a failed status whose message
/// carries the error text. The returned [`InstallResult`] is the only
/// result for this task, and no progress is reported after the terminal
/// status.
///
/// # Example
///
/// ```rust,no_run
/// use folder_installer::{monitor, scan_folder, MonitorOptions};
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() {
///     let tasks = scan_folder(Path::new("D:/installers")).unwrap();
///     for task in &tasks {
///         let result = monitor(task, &MonitorOptions::default(), |progress| {
///             println!("{} {}% {}", progress.display_name, progress.percent, progress.status);
///         })
///         .await;
///         println!("success: {}", result.success);
///     }
/// }
/// ```
pub async fn monitor<F>(
    task: &InstallTask,
    options: &MonitorOptions,
    on_progress: F,
) -> InstallResult
where
    F: Fn(InstallProgress) + Send + Sync,
{
    let report = |percent: u8, status: InstallStatus| {
        on_progress(InstallProgress {
            task_id: task.id,
            display_name: task.display_name.clone(),
            percent,
            status,
        })
    };

    report(0, InstallStatus::Started);

    match run_installer(task, options, &report).await {
        Ok((status, mut estimator)) if status.success() => {
            info!(task = %task.id, "{} exited successfully", task.display_name);
            for percent in estimator.finish_ramp() {
                report(percent, InstallStatus::Completing);
                sleep(options.finish_step).await;
            }
            report(100, InstallStatus::Complete);
            InstallResult::succeeded(task.id)
        }
        Ok((status, _)) => {
            warn!(
                task = %task.id,
                exit_code = ?status.code(),
                "{} failed",
                task.display_name
            );
            report(0, InstallStatus::failed());
            InstallResult::failed(task.id)
        }
        Err(e) => {
            warn!(
                task = %task.id,
                error = %e,
                fix = e.fix_suggestion(),
                "{} could not be installed",
                task.display_name
            );
            report(0, InstallStatus::failed_with(e.to_string()));
            InstallResult::failed(task.id)
        }
    }
}

/// Launch the installer and poll it until it exits.
///
/// Returns the exit status together with the estimator so the caller can
/// finish the ramp from wherever the estimate stopped.
async fn run_installer<R>(
    task: &InstallTask,
    options: &MonitorOptions,
    report: &R,
) -> Result<(ExitStatus, ProgressEstimator), InstallError>
where
    R: Fn(u8, InstallStatus),
{
    launch::preflight(&task.path).await?;
    let LaunchedInstaller {
        mut child,
        mut output,
    } = launch::spawn(task)?;

    let mut estimator =
        ProgressEstimator::new(options.ramp_ceiling, options.tick_interval, Instant::now());
    report(estimator.percent(), InstallStatus::Running);

    let mut poll = interval(options.poll_interval.max(MIN_POLL_INTERVAL));
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        poll.tick().await;

        // Output first, so a line printed just before exit still counts
        let completion_reported = drain_completion(&mut output, options.watch_output);

        let exited = child.try_wait().map_err(|e| InstallError::Monitor {
            message: e.to_string(),
            fix: "The installer may still be running; check the task manager".to_string(),
        })?;

        if completion_reported {
            if let Some(percent) = estimator.on_completion_reported() {
                debug!(task = %task.id, percent, "installer reported completion");
                report(percent, InstallStatus::Running);
            }
        }

        if let Some(status) = exited {
            return Ok((status, estimator));
        }

        if !completion_reported {
            if let Some(percent) = estimator.on_tick(Instant::now()) {
                report(percent, InstallStatus::Running);
            }
        }
    }
}

/// Take every line collected so far; true when one of them reports completion.
fn drain_completion(output: &mut UnboundedReceiver<String>, watch_output: bool) -> bool {
    let mut completion_reported = false;
    while let Ok(line) = output.try_recv() {
        if watch_output && reports_completion(&line) {
            completion_reported = true;
        }
    }
    completion_reported
}
