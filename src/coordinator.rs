//! Run coordination: one monitor per task, one aggregated summary per run.

use crate::{
    monitor, scan_folder, InstallProgress, InstallResult, InstallStatus, InstallTask,
    MonitorOptions, ScanError, TaskId,
};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Success and failure counts for a run.
///
/// # Example
///
/// ```rust
/// use folder_installer::RunSummary;
///
/// let summary = RunSummary { success: 2, fail: 1, total: 3 };
/// assert!(summary.is_complete());
/// assert!(!summary.all_succeeded());
/// assert_eq!(summary.to_string(), "Succeeded: 2, Failed: 1");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tasks whose installer exited with code 0.
    pub success: usize,
    /// Tasks that failed for any reason.
    pub fail: usize,
    /// Tasks in the run.
    pub total: usize,
}

impl RunSummary {
    /// Number of tasks that reached a result.
    pub fn finished(&self) -> usize {
        self.success + self.fail
    }

    /// Whether every task reported a result.
    pub fn is_complete(&self) -> bool {
        self.finished() == self.total
    }

    /// Whether the run is complete without failures.
    pub fn all_succeeded(&self) -> bool {
        self.is_complete() && self.fail == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Succeeded: {}, Failed: {}", self.success, self.fail)
    }
}

/// Event delivered to the presentation layer, keyed by task id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A monitor reported progress.
    Progress(InstallProgress),

    /// A task reached its result.
    Finished(InstallResult),

    /// Every task reached its result. Sent once, last.
    Completed(RunSummary),
}

/// Tally of results for one run.
///
/// Knows how many tasks the run has and reports the summary exactly once,
/// when the last result is recorded.
#[derive(Debug, Clone)]
pub struct RunCoordinator {
    tally: RunSummary,
}

impl RunCoordinator {
    /// Start a tally for `total` tasks.
    pub fn new(total: usize) -> Self {
        Self {
            tally: RunSummary {
                success: 0,
                fail: 0,
                total,
            },
        }
    }

    /// Count one result.
    ///
    /// Returns the final summary when this result completes the run.
    pub fn record(&mut self, result: &InstallResult) -> Option<RunSummary> {
        if self.tally.is_complete() {
            warn!(task = %result.task_id, "result recorded after run completed");
        }

        if result.success {
            self.tally.success += 1;
        } else {
            self.tally.fail += 1;
        }

        (self.tally.finished() == self.tally.total).then_some(self.tally)
    }

    /// Counts so far.
    pub fn tally(&self) -> RunSummary {
        self.tally
    }

    /// Whether every task of the run has been counted.
    pub fn is_complete(&self) -> bool {
        self.tally.is_complete()
    }
}

/// All installer tasks of one folder selection.
#[derive(Debug, Clone, Default)]
pub struct InstallationRun {
    tasks: Vec<InstallTask>,
}

impl InstallationRun {
    /// Build a run from already scanned tasks.
    pub fn new(tasks: Vec<InstallTask>) -> Self {
        Self { tasks }
    }

    /// Scan `dir` for installers.
    pub fn from_folder(dir: &Path) -> Result<Self, ScanError> {
        scan_folder(dir).map(Self::new)
    }

    /// Tasks in scan order.
    pub fn tasks(&self) -> &[InstallTask] {
        &self.tasks
    }

    /// Whether the folder held no installer.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Launch every task at once and wait for all of them.
    ///
    /// Each task runs its own [`monitor`] on the tokio runtime. Progress is
    /// forwarded to `events` as it happens; results are funneled through this
    /// single loop, which owns the tally, forwards a `Finished` event per task
    /// and a `Completed` event after the last one. A monitor that panics is
    /// counted as a failure.
    ///
    /// A run without tasks sends nothing and returns `None`. A closed
    /// `events` receiver does not stop the run.
    pub async fn execute(
        self,
        options: MonitorOptions,
        events: UnboundedSender<RunEvent>,
    ) -> Option<RunSummary> {
        if self.tasks.is_empty() {
            return None;
        }

        let options = Arc::new(options);
        info!(total = self.tasks.len(), "starting installation run");

        let monitors: Vec<RunningMonitor> = self
            .tasks
            .into_iter()
            .map(|task| {
                let options = Arc::clone(&options);
                let progress_tx = events.clone();
                RunningMonitor {
                    id: task.id,
                    display_name: task.display_name.clone(),
                    handle: tokio::spawn(async move {
                        monitor(&task, &options, move |progress| {
                            let _ = progress_tx.send(RunEvent::Progress(progress));
                        })
                        .await
                    }),
                }
            })
            .collect();

        collect_results(monitors, &events).await
    }
}

/// A spawned monitor and the task it watches.
struct RunningMonitor {
    id: TaskId,
    display_name: String,
    handle: JoinHandle<InstallResult>,
}

/// Wait for every monitor, tallying results in the order they finish.
///
/// A monitor that panicked or was cancelled counts as a failure and gets a
/// failed status, so every task still ends with exactly one terminal event.
async fn collect_results(
    monitors: Vec<RunningMonitor>,
    events: &UnboundedSender<RunEvent>,
) -> Option<RunSummary> {
    let mut coordinator = RunCoordinator::new(monitors.len());
    let mut pending: FuturesUnordered<_> = monitors
        .into_iter()
        .map(|running| async move {
            let joined = running.handle.await;
            (running.id, running.display_name, joined)
        })
        .collect();

    let mut summary = None;
    while let Some((id, display_name, joined)) = pending.next().await {
        let result = joined.unwrap_or_else(|e| {
            warn!(task = %id, error = %e, "monitor task aborted");
            let _ = events.send(RunEvent::Progress(InstallProgress {
                task_id: id,
                display_name,
                percent: 0,
                status: InstallStatus::failed_with(format!("monitor stopped: {e}")),
            }));
            InstallResult::failed(id)
        });
        let _ = events.send(RunEvent::Finished(result));

        if let Some(done) = coordinator.record(&result) {
            info!(success = done.success, fail = done.fail, "installation run finished");
            let _ = events.send(RunEvent::Completed(done));
            summary = Some(done);
        }
    }

    summary
}

/// Install every installer found directly inside `dir`.
///
/// Returns `Ok(None)` without sending any event when the folder holds no
/// installer.
///
/// # Example
///
/// ```rust,no_run
/// use folder_installer::{run_folder, MonitorOptions, RunEvent};
/// use std::path::Path;
/// use tokio::sync::mpsc;
///
/// #[tokio::main]
/// async fn main() {
///     let (tx, mut rx) = mpsc::unbounded_channel();
///     let printer = tokio::spawn(async move {
///         while let Some(event) = rx.recv().await {
///             if let RunEvent::Progress(p) = event {
///                 println!("{} {}%", p.display_name, p.percent);
///             }
///         }
///     });
///
///     let summary = run_folder(Path::new("D:/installers"), MonitorOptions::default(), tx)
///         .await
///         .unwrap();
///     printer.await.unwrap();
///     if let Some(summary) = summary {
///         println!("{summary}");
///     }
/// }
/// ```
pub async fn run_folder(
    dir: &Path,
    options: MonitorOptions,
    events: UnboundedSender<RunEvent>,
) -> Result<Option<RunSummary>, ScanError> {
    let run = InstallationRun::from_folder(dir)?;
    if run.is_empty() {
        info!(dir = %dir.display(), "no installers found");
        return Ok(None);
    }
    Ok(run.execute(options, events).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_reports_once_at_total() {
        let mut coordinator = RunCoordinator::new(3);
        assert_eq!(coordinator.record(&InstallResult::succeeded(TaskId(0))), None);
        assert_eq!(coordinator.record(&InstallResult::failed(TaskId(2))), None);
        assert!(!coordinator.is_complete());

        let summary = coordinator
            .record(&InstallResult::succeeded(TaskId(1)))
            .unwrap();
        assert_eq!(
            summary,
            RunSummary {
                success: 2,
                fail: 1,
                total: 3
            }
        );
        assert!(coordinator.is_complete());
    }

    #[test]
    fn test_tally_tracks_every_result() {
        let mut coordinator = RunCoordinator::new(5);
        for i in 0..4 {
            coordinator.record(&InstallResult {
                task_id: TaskId(i),
                success: i % 2 == 0,
            });
            assert_eq!(coordinator.tally().finished(), i + 1);
        }
        assert_eq!(coordinator.tally().success, 2);
        assert_eq!(coordinator.tally().fail, 2);
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            success: 3,
            fail: 0,
            total: 3,
        };
        assert_eq!(summary.to_string(), "Succeeded: 3, Failed: 0");
        assert!(summary.all_succeeded());
    }

    #[test]
    fn test_summary_serializes() {
        let summary = RunSummary {
            success: 1,
            fail: 1,
            total: 2,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json, serde_json::json!({"success": 1, "fail": 1, "total": 2}));
    }

    #[tokio::test]
    async fn test_empty_run_sends_nothing() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let summary = InstallationRun::default()
            .execute(MonitorOptions::default(), tx)
            .await;
        assert_eq!(summary, None);
        assert!(rx.recv().await.is_none());
    }

    fn crash() -> InstallResult {
        panic!("monitor crashed");
    }

    fn running(id: usize, handle: JoinHandle<InstallResult>) -> RunningMonitor {
        RunningMonitor {
            id: TaskId(id),
            display_name: format!("setup{id}.exe"),
            handle,
        }
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<RunEvent>) -> Vec<RunEvent> {
        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        received
    }

    #[tokio::test]
    async fn test_panicking_monitor_counts_as_failure() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let monitors = vec![running(0, tokio::spawn(async { crash() }))];

        let summary = collect_results(monitors, &tx).await;

        assert_eq!(
            summary,
            Some(RunSummary {
                success: 0,
                fail: 1,
                total: 1
            })
        );
        let received = drain(&mut rx);
        let finished: Vec<_> = received
            .iter()
            .filter_map(|e| match e {
                RunEvent::Finished(result) => Some(*result),
                _ => None,
            })
            .collect();
        assert_eq!(finished, vec![InstallResult::failed(TaskId(0))]);
        let failed_status = received.iter().any(|e| {
            matches!(e, RunEvent::Progress(p) if p.task_id == TaskId(0)
                && p.status.is_terminal()
                && p.status.message().starts_with("failed: "))
        });
        assert!(failed_status, "got {received:?}");
        assert!(matches!(received.last(), Some(RunEvent::Completed(_))));
    }

    #[tokio::test]
    async fn test_panicking_monitor_does_not_stop_the_others() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let monitors = vec![
            running(0, tokio::spawn(async { crash() })),
            running(1, tokio::spawn(async { InstallResult::succeeded(TaskId(1)) })),
        ];

        let summary = collect_results(monitors, &tx).await.unwrap();

        assert_eq!(summary.success, 1);
        assert_eq!(summary.fail, 1);
        let received = drain(&mut rx);
        let completed = received
            .iter()
            .filter(|e| matches!(e, RunEvent::Completed(_)))
            .count();
        assert_eq!(completed, 1);
        assert_eq!(received.last(), Some(&RunEvent::Completed(summary)));
    }
}
