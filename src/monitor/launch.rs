//! Pre-flight checks and process launch for one installer.

use super::InstallError;
use crate::InstallTask;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Check that the installer can be launched at all.
///
/// Verifies the path exists and is a regular file, so a stale task fails
/// with a readable message instead of a shell error code. Any I/O error
/// other than a missing file keeps its text in the returned error.
pub(crate) async fn preflight(path: &Path) -> Result<(), InstallError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => match e.kind() {
            ErrorKind::NotFound => {
                return Err(InstallError::NotFound {
                    path: path.to_path_buf(),
                    fix: "The file was moved or deleted after the folder was scanned".to_string(),
                });
            }
            ErrorKind::PermissionDenied => {
                return Err(InstallError::PermissionDenied {
                    message: e.to_string(),
                    fix: format!("Make {} readable by the current user", path.display()),
                });
            }
            _ => {
                return Err(InstallError::Inaccessible {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                    fix: "Check that every directory on the path still exists".to_string(),
                });
            }
        },
    };

    if !metadata.is_file() {
        return Err(InstallError::Inaccessible {
            path: path.to_path_buf(),
            message: "not a regular file".to_string(),
            fix: "Only regular files can be launched as installers".to_string(),
        });
    }

    Ok(())
}

/// A running installer together with the lines it prints.
pub(crate) struct LaunchedInstaller {
    pub(crate) child: Child,
    pub(crate) output: UnboundedReceiver<String>,
}

/// Start the installer with stdout and stderr piped.
///
/// Both streams are read on background tasks; their lines arrive on
/// `output` and can be drained without blocking.
pub(crate) fn spawn(task: &InstallTask) -> Result<LaunchedInstaller, InstallError> {
    let launch = task.kind.launch_command(&task.path);

    let mut command = Command::new(&launch.program);
    command
        .args(&launch.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(InstallError::from_launch)?;
    info!(
        task = %task.id,
        kind = task.kind.display_name(),
        program = %launch.program,
        pid = ?child.id(),
        "launched installer {}",
        task.display_name
    );

    let (tx, rx) = mpsc::unbounded_channel();
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, tx));
    }

    Ok(LaunchedInstaller { child, output: rx })
}

async fn forward_lines<S>(stream: S, tx: UnboundedSender<String>)
where
    S: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "stopped reading installer output");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preflight_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let result = preflight(&tmp.path().join("gone.exe")).await;
        assert!(matches!(result, Err(InstallError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_preflight_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let result = preflight(tmp.path()).await;
        assert!(matches!(result, Err(InstallError::Inaccessible { .. })));
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_keeps_io_error_text() {
        let tmp = tempfile::tempdir().unwrap();
        let plain = tmp.path().join("plain");
        std::fs::write(&plain, b"").unwrap();
        // A regular file used as a directory component
        let path = plain.join("setup.exe");
        let io_text = std::fs::metadata(&path).unwrap_err().to_string();

        let error = preflight(&path).await.unwrap_err();

        assert!(matches!(error, InstallError::Inaccessible { .. }));
        assert!(error.to_string().contains(&io_text), "got {error}");
    }

    #[tokio::test]
    async fn test_preflight_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setup.msi");
        std::fs::write(&path, b"").unwrap();
        assert!(preflight(&path).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_collects_stdout_and_stderr() {
        use crate::{InstallerKind, TaskId};

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("talk.exe");
        std::fs::write(&path, "echo out-line\necho err-line >&2\n").unwrap();
        let task = InstallTask::new(TaskId(0), path, InstallerKind::Exe);

        let mut launched = spawn(&task).unwrap();
        let status = launched.child.wait().await.unwrap();
        assert!(status.success());

        let mut lines = Vec::new();
        while let Some(line) = launched.output.recv().await {
            lines.push(line);
        }
        assert!(lines.iter().any(|l| l.trim() == "out-line"));
        assert!(lines.iter().any(|l| l.trim() == "err-line"));
    }
}
