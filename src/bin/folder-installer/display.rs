//! Terminal rendering of a run: one progress bar per installer

use anyhow::{Context, Result};
use folder_installer::{InstallStatus, InstallTask, RunEvent, TaskId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Presentation settings, passed in explicitly when the display is built
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Columns reserved for the file name; longer names are elided in the middle
    pub name_width: usize,
    /// Width of the bar itself
    pub bar_width: usize,
    /// Filled, current and empty bar glyphs, in indicatif's order
    pub progress_chars: String,
    /// Status shown before a monitor reports anything
    pub waiting_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            name_width: 28,
            bar_width: 40,
            progress_chars: "█▓░".to_string(),
            waiting_message: "waiting".to_string(),
        }
    }
}

/// Progress bars keyed by task id
pub struct Display {
    multi: MultiProgress,
    bars: HashMap<TaskId, ProgressBar>,
}

impl Display {
    pub fn new(config: &DisplayConfig, tasks: &[InstallTask]) -> Result<Self> {
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "{{prefix:{}}} [{{bar:{}.cyan/blue}}] {{pos:>3}}%  {{msg}}",
                config.name_width, config.bar_width
            ))
            .context("Invalid progress bar template")?
            .progress_chars(&config.progress_chars);

        let multi = MultiProgress::new();
        let mut bars = HashMap::with_capacity(tasks.len());
        for task in tasks {
            let bar = multi.add(ProgressBar::new(100));
            bar.set_style(style.clone());
            bar.set_prefix(elide_middle(&task.display_name, config.name_width));
            bar.set_message(config.waiting_message.clone());
            bars.insert(task.id, bar);
        }

        Ok(Self { multi, bars })
    }

    pub fn handle(&self, event: &RunEvent) {
        match event {
            RunEvent::Progress(progress) => {
                let Some(bar) = self.bars.get(&progress.task_id) else {
                    return;
                };
                bar.set_position(u64::from(progress.percent));
                bar.set_message(progress.status.message());
                match progress.status {
                    InstallStatus::Complete => bar.finish(),
                    InstallStatus::Failed { .. } => bar.abandon(),
                    _ => {}
                }
            }
            RunEvent::Finished(result) => {
                // A monitor that died before its terminal status still needs closing
                if let Some(bar) = self.bars.get(&result.task_id) {
                    if !bar.is_finished() && !result.success {
                        bar.abandon_with_message("failed");
                    }
                }
            }
            RunEvent::Completed(summary) => {
                let _ = self.multi.println(format!("\n{summary}"));
            }
        }
    }
}

/// Shorten `name` to `width` characters by replacing its middle with `…`
pub fn elide_middle(name: &str, width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= width {
        return name.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let keep = width - 1;
    let head = keep - keep / 2;
    let tail = keep / 2;
    let mut out: String = chars[..head].iter().collect();
    out.push('…');
    out.extend(&chars[chars.len() - tail..]);
    out
}
