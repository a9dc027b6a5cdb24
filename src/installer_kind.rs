//! Installer kind enum identifying supported installer packages.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

/// The type of installer package.
///
/// Each variant corresponds to a file extension recognized by the folder
/// scanner and knows how the host platform launches files of that type.
///
/// # Example
///
/// ```rust
/// use folder_installer::InstallerKind;
/// use std::path::Path;
///
/// assert_eq!(InstallerKind::from_path(Path::new("Setup.EXE")), Some(InstallerKind::Exe));
/// assert_eq!(InstallerKind::from_path(Path::new("readme.txt")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum InstallerKind {
    /// Self-contained executable installer (`.exe`).
    Exe,
    /// Windows Installer package (`.msi`).
    Msi,
}

/// A structured command for launching an installer.
///
/// `program` is run with `args`; no shell quoting is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// The program to execute.
    pub program: String,

    /// Arguments to pass to the program.
    pub args: Vec<String>,
}

impl InstallerKind {
    /// The file extension, without the leading dot, in lowercase.
    ///
    /// ```rust
    /// use folder_installer::InstallerKind;
    ///
    /// assert_eq!(InstallerKind::Exe.extension(), "exe");
    /// assert_eq!(InstallerKind::Msi.extension(), "msi");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Exe => "exe",
            Self::Msi => "msi",
        }
    }

    /// Human-readable description of the package type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Exe => "Executable installer",
            Self::Msi => "Windows Installer package",
        }
    }

    /// Classify a path by its extension, ignoring case.
    ///
    /// Returns `None` for paths without an extension or with an extension
    /// that is not a supported installer type.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::all().find(|kind| ext.eq_ignore_ascii_case(kind.extension()))
    }

    /// Iterator over all supported installer kinds.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Build the command that launches `path` with the platform's handler.
    ///
    /// - Windows `.exe`: the file itself
    /// - Windows `.msi`: `msiexec /i <path>`
    /// - Other hosts: `sh <path>`
    pub fn launch_command(&self, path: &Path) -> LaunchCommand {
        let path = path.to_string_lossy().into_owned();

        #[cfg(windows)]
        let command = match self {
            Self::Exe => LaunchCommand {
                program: path,
                args: vec![],
            },
            Self::Msi => LaunchCommand {
                program: "msiexec".to_string(),
                args: vec!["/i".to_string(), path],
            },
        };

        #[cfg(not(windows))]
        let command = LaunchCommand {
            program: "sh".to_string(),
            args: vec![path],
        };

        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extensions() {
        assert_eq!(InstallerKind::Exe.extension(), "exe");
        assert_eq!(InstallerKind::Msi.extension(), "msi");
    }

    #[test]
    fn test_from_path_case_insensitive() {
        assert_eq!(
            InstallerKind::from_path(Path::new("setup.exe")),
            Some(InstallerKind::Exe)
        );
        assert_eq!(
            InstallerKind::from_path(Path::new("SETUP.EXE")),
            Some(InstallerKind::Exe)
        );
        assert_eq!(
            InstallerKind::from_path(Path::new("C:/pkgs/Tool.MsI")),
            Some(InstallerKind::Msi)
        );
    }

    #[test]
    fn test_from_path_rejects_other_files() {
        assert_eq!(InstallerKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(InstallerKind::from_path(Path::new("archive.exe.zip")), None);
        assert_eq!(InstallerKind::from_path(Path::new("exe")), None);
        assert_eq!(InstallerKind::from_path(Path::new(".msi")), None);
        assert_eq!(InstallerKind::from_path(Path::new("setup.msix")), None);
    }

    #[test]
    fn test_all_iterator() {
        let all: Vec<_> = InstallerKind::all().collect();
        assert_eq!(all, vec![InstallerKind::Exe, InstallerKind::Msi]);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_launch_command_runs_through_shell() {
        let path = PathBuf::from("/tmp/pkgs/setup.msi");
        let cmd = InstallerKind::Msi.launch_command(&path);
        assert_eq!(cmd.program, "sh");
        assert_eq!(cmd.args, vec!["/tmp/pkgs/setup.msi".to_string()]);
    }

    #[cfg(windows)]
    #[test]
    fn test_launch_command_uses_msiexec() {
        let path = PathBuf::from(r"C:\pkgs\setup.msi");
        let cmd = InstallerKind::Msi.launch_command(&path);
        assert_eq!(cmd.program, "msiexec");
        assert_eq!(cmd.args, vec!["/i".to_string(), r"C:\pkgs\setup.msi".to_string()]);

        let path = PathBuf::from(r"C:\pkgs\setup.exe");
        let cmd = InstallerKind::Exe.launch_command(&path);
        assert_eq!(cmd.program, r"C:\pkgs\setup.exe");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&InstallerKind::Msi).unwrap();
        let kind: InstallerKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, InstallerKind::Msi);
    }
}
