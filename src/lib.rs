//! # folder-installer
//!
//! Batch-run every Windows installer (`.exe` / `.msi`) found in a folder.
//!
//! Each installer is launched as a subprocess and watched by its own monitor,
//! which reports a synthetic progress percentage and one final result. A run
//! coordinator launches all monitors at once and aggregates their results
//! into a single summary.
//!
//! ## Features
//!
//! - `scan_folder()` lists installer files in a directory (non-recursive)
//! - `monitor()` installs one file with progress reporting
//! - `InstallationRun` / `run_folder()` install a whole folder concurrently,
//!   streaming task-keyed [`RunEvent`]s to the caller
//! - `RunCoordinator` tallies results and reports completion exactly once
//!
//! ## Example
//!
//! ```rust,no_run
//! use folder_installer::{run_folder, MonitorOptions, RunEvent};
//! use std::path::Path;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!     let run = tokio::spawn(async move {
//!         run_folder(Path::new("D:/installers"), MonitorOptions::default(), tx).await
//!     });
//!
//!     while let Some(event) = rx.recv().await {
//!         match event {
//!             RunEvent::Progress(p) => println!("{}: {}% {}", p.display_name, p.percent, p.status),
//!             RunEvent::Finished(r) => println!("task {} success={}", r.task_id, r.success),
//!             RunEvent::Completed(summary) => println!("{summary}"),
//!         }
//!     }
//!     run.await.unwrap().unwrap();
//! }
//! ```

mod coordinator;
mod installer_kind;
mod monitor;
mod options;
mod scan;
mod task;

pub use coordinator::{run_folder, InstallationRun, RunCoordinator, RunEvent, RunSummary};
pub use installer_kind::{InstallerKind, LaunchCommand};
pub use monitor::{monitor, InstallError, InstallProgress, InstallStatus};
pub use options::MonitorOptions;
pub use scan::{scan_folder, ScanError};
pub use task::{InstallResult, InstallTask, TaskId};
