//! Folder scanning for installer files.

use crate::{InstallTask, InstallerKind, TaskId};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while listing a folder.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// The path does not exist or is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// The path that was given.
        path: PathBuf,
    },

    /// The directory could not be listed.
    #[error("Failed to read {}: {source}", path.display())]
    ReadDir {
        /// The directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Find every installer file directly inside `dir`.
///
/// The listing is not recursive. Regular files whose extension is `.exe` or
/// `.msi` (any case) become tasks; everything else is skipped. Tasks are
/// sorted by file name and numbered from zero in that order.
///
/// # Example
///
/// ```rust,no_run
/// use folder_installer::scan_folder;
/// use std::path::Path;
///
/// let tasks = scan_folder(Path::new("D:/installers")).unwrap();
/// for task in &tasks {
///     println!("{} {}", task.id, task.display_name);
/// }
/// ```
pub fn scan_folder(dir: &Path) -> Result<Vec<InstallTask>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found: Vec<(PathBuf, InstallerKind)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        let Some(kind) = InstallerKind::from_path(&path) else {
            continue;
        };

        // Follows symlinks so a link to an installer still counts.
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file with installer extension");
            continue;
        }

        found.push((path, kind));
    }

    found.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

    let tasks: Vec<InstallTask> = found
        .into_iter()
        .enumerate()
        .map(|(index, (path, kind))| InstallTask::new(TaskId(index), path, kind))
        .collect();

    debug!(dir = %dir.display(), count = tasks.len(), "scanned folder");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b.exe");
        touch(tmp.path(), "a.MSI");
        touch(tmp.path(), "C.Exe");
        touch(tmp.path(), "readme.txt");
        touch(tmp.path(), "setup.exe.bak");
        touch(tmp.path(), "noext");

        let tasks = scan_folder(tmp.path()).unwrap();
        let names: Vec<_> = tasks.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["C.Exe", "a.MSI", "b.exe"]);
        assert_eq!(tasks[1].kind, InstallerKind::Msi);
    }

    #[test]
    fn test_scan_assigns_dense_ids() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "one.exe");
        touch(tmp.path(), "two.exe");
        touch(tmp.path(), "three.msi");

        let tasks = scan_folder(tmp.path()).unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(0), TaskId(1), TaskId(2)]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.exe");
        touch(tmp.path(), "outer.exe");

        let tasks = scan_folder(tmp.path()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].display_name, "outer.exe");
    }

    #[test]
    fn test_scan_skips_directories_with_installer_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("bundle.exe")).unwrap();

        let tasks = scan_folder(tmp.path()).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_scan_empty_folder() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(scan_folder(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let err = scan_folder(&missing).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_scan_file_instead_of_folder() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "setup.exe");
        let err = scan_folder(&tmp.path().join("setup.exe")).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }
}
