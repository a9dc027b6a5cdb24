//! Task and result types for one installer file.

use crate::InstallerKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a task within its run.
///
/// Ids are dense indexes assigned in scan order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One installer file scheduled for installation.
///
/// Tasks are created by the folder scanner and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallTask {
    /// Position of this task within its run.
    pub id: TaskId,

    /// Full path of the installer file.
    pub path: PathBuf,

    /// File name shown to the user.
    pub display_name: String,

    /// Package type, derived from the extension.
    pub kind: InstallerKind,
}

impl InstallTask {
    /// Create a task for `path`, deriving the display name from the file name.
    pub fn new(id: TaskId, path: PathBuf, kind: InstallerKind) -> Self {
        let display_name = display_name_of(&path);
        Self {
            id,
            path,
            display_name,
            kind,
        }
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Final outcome of one task.
///
/// Exactly one result is produced per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResult {
    /// The task this result belongs to.
    pub task_id: TaskId,

    /// Whether the installer exited successfully.
    pub success: bool,
}

impl InstallResult {
    /// Result of an installer that exited with code 0.
    pub fn succeeded(task_id: TaskId) -> Self {
        Self {
            task_id,
            success: true,
        }
    }

    /// Result of a task that failed for any reason.
    pub fn failed(task_id: TaskId) -> Self {
        Self {
            task_id,
            success: false,
        }
    }
}
