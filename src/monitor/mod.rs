//! Installation monitoring.
//!
//! A monitor owns the lifecycle of one installer subprocess: it launches the
//! file, polls it, turns elapsed time and installer output into a progress
//! estimate, and reports exactly one result.
//!
//! # Example
//!
//! ```rust,no_run
//! use folder_installer::{monitor, InstallerKind, InstallTask, MonitorOptions, TaskId};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() {
//!     let task = InstallTask::new(TaskId(0), PathBuf::from("setup.msi"), InstallerKind::Msi);
//!     let result = monitor(&task, &MonitorOptions::default(), |p| {
//!         println!("{:>3}% {}", p.percent, p.status);
//!     })
//!     .await;
//!     assert_eq!(result.task_id, TaskId(0));
//! }
//! ```

mod errors;
mod estimator;
mod executor;
mod launch;
mod output;
mod progress;

pub use errors::InstallError;
pub use executor::monitor;
pub use progress::{InstallProgress, InstallStatus};
