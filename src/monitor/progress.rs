//! Progress reporting types for installation monitoring.
//!
//! A monitor emits a stream of [`InstallProgress`] values for its task. The
//! [`InstallStatus`] of the last value tells whether the task is still going.

use crate::TaskId;
use std::fmt;

/// Lifecycle stage of one installer.
///
/// # Example
///
/// ```rust
/// use folder_installer::InstallStatus;
///
/// assert_eq!(InstallStatus::Running.message(), "installing...");
/// assert_eq!(InstallStatus::failed_with("exit code 3").message(), "failed: exit code 3");
/// assert!(InstallStatus::Complete.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// Monitoring has begun; the process may not exist yet.
    Started,

    /// The installer process is running.
    Running,

    /// The process exited successfully; the estimate is ramping to 100.
    Completing,

    /// Installation succeeded.
    Complete,

    /// Installation failed.
    Failed {
        /// Error text, when the failure came from an error rather than an
        /// exit code.
        reason: Option<String>,
    },
}

impl InstallStatus {
    /// Failure without further detail (nonzero exit code).
    pub fn failed() -> Self {
        Self::Failed { reason: None }
    }

    /// Failure carrying error text.
    pub fn failed_with(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: Some(reason.into()),
        }
    }

    /// Status line shown next to the progress bar.
    pub fn message(&self) -> String {
        match self {
            Self::Started | Self::Running | Self::Completing => "installing...".to_string(),
            Self::Complete => "complete".to_string(),
            Self::Failed { reason: None } => "failed".to_string(),
            Self::Failed {
                reason: Some(reason),
            } => format!("failed: {reason}"),
        }
    }

    /// No further progress follows a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed { .. })
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// One progress notification for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallProgress {
    /// The task being reported on.
    pub task_id: TaskId,

    /// File name of the installer.
    pub display_name: String,

    /// Estimated completion, 0 to 100.
    pub percent: u8,

    /// Current lifecycle stage.
    pub status: InstallStatus,
}
