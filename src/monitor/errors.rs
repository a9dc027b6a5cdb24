//! Error types for installation monitoring.
//!
//! These errors never leave the monitor: they are turned into a failed
//! status whose message carries the error text. Each variant includes an
//! actionable fix suggestion for logs and front-ends.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while launching or watching an installer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// The installer file no longer exists.
    #[error("Installer not found: {}", path.display())]
    NotFound {
        /// Path of the installer.
        path: PathBuf,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The installer path exists but cannot be used as a file.
    #[error("Cannot access installer {}: {message}", path.display())]
    Inaccessible {
        /// Path of the installer.
        path: PathBuf,
        /// The underlying I/O error text, or why the path is unusable.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Permission was denied reading or executing the installer.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Description of what permission was denied.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The installer process could not be started.
    #[error("Failed to launch installer: {message}")]
    Launch {
        /// Description of the failure.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Checking on the running process failed.
    #[error("Lost track of installer process: {message}")]
    Monitor {
        /// Description of the failure.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl InstallError {
    /// Get an actionable suggestion for fixing this error.
    ///
    /// ```rust
    /// use folder_installer::InstallError;
    ///
    /// let error = InstallError::Launch {
    ///     message: "program not found".to_string(),
    ///     fix: "Check that the installer is a valid executable".to_string(),
    /// };
    /// assert!(error.fix_suggestion().contains("valid executable"));
    /// ```
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::NotFound { fix, .. } => fix,
            Self::Inaccessible { fix, .. } => fix,
            Self::PermissionDenied { fix, .. } => fix,
            Self::Launch { fix, .. } => fix,
            Self::Monitor { fix, .. } => fix,
        }
    }

    /// Classify an I/O error raised while starting the installer.
    pub(crate) fn from_launch(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied {
                message: error.to_string(),
                fix: "Run the installer with an account allowed to execute it".to_string(),
            };
        }
        Self::Launch {
            message: error.to_string(),
            fix: "Check that the installer is a valid executable for this system".to_string(),
        }
    }
}
