//! Command-line arguments for folder-installer

use clap::Parser;
use folder_installer::MonitorOptions;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for folder-installer
#[derive(Parser, Clone, Debug)]
#[command(name = "folder-installer")]
#[command(version, about = "Install every .exe and .msi found in a folder")]
pub struct Cli {
    /// Folder containing the installers (not searched recursively)
    pub folder: PathBuf,

    /// How often each installer process is polled, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub poll_ms: u64,

    /// Time per one-percent step while an installer runs, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub tick_ms: u64,

    /// Delay between steps of the final ramp to 100%, in milliseconds
    #[arg(long, default_value_t = 50)]
    pub finish_step_ms: u64,

    /// Highest percentage shown while an installer is still running
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub ceiling: u8,

    /// Don't jump ahead when an installer prints "completed"
    #[arg(long)]
    pub ignore_output: bool,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Monitor settings selected on the command line
    pub fn monitor_options(&self) -> MonitorOptions {
        MonitorOptions {
            poll_interval: Duration::from_millis(self.poll_ms.max(1)),
            tick_interval: Duration::from_millis(self.tick_ms),
            ramp_ceiling: self.ceiling,
            finish_step: Duration::from_millis(self.finish_step_ms),
            watch_output: !self.ignore_output,
        }
    }
}
