//! Progress reporting for TTY and non-TTY environments: item-count bars
//! (papers processed) that degrade to periodic log lines off a TTY.

use std::io::IsTerminal;
use std::sync::Arc;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress bar style with item count and ETA.
fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(
            "{spinner:.green} {prefix:>16.cyan.bold} {bar:24.cyan/blue} {pos}/{len} eta {eta:.dim}  {wide_msg}",
        )
        .expect("invalid template")
        .progress_chars("▰▱")
}

/// Spinner style for stages where the total item count isn't known yet.
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:>16.cyan.bold} {pos} {wide_msg}")
        .expect("invalid template")
        .progress_chars("▰▱")
}

/// Central progress context managing one bar per pipeline stage.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create a new context, detecting TTY automatically.
    pub fn new() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Create a stage progress bar.
    ///
    /// TTY: visible bar, spinner until `total` is known.
    /// Non-TTY: hidden (no-op); callers still log counts at completion.
    pub fn stage_bar(&self, name: &str, total: Option<u64>) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }

        let pb = match total {
            Some(n) => {
                let pb = self.multi.add(ProgressBar::new(n));
                pb.set_style(bar_style());
                pb
            }
            None => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(spinner_style());
                pb.enable_steady_tick(std::time::Duration::from_millis(80));
                pb
            }
        };
        pb.set_prefix(name.to_string());
        pb
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Reference to the `MultiProgress`, for the logging bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle shared across stage workers.
pub type SharedProgress = Arc<ProgressContext>;

/// Format a number with thousands separators (e.g. report tables, §6a).
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_small() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(123), "123");
    }

    #[test]
    fn fmt_num_thousands() {
        assert_eq!(fmt_num(1_000), "1,000");
        assert_eq!(fmt_num(12_345), "12,345");
    }

    #[test]
    fn fmt_num_millions() {
        assert_eq!(fmt_num(1_234_567), "1,234,567");
    }

    #[test]
    fn stage_bar_hidden_when_not_tty() {
        // Under test harnesses stderr is typically not a TTY.
        let ctx = ProgressContext {
            multi: MultiProgress::new(),
            is_tty: false,
        };
        let pb = ctx.stage_bar("ner", Some(10));
        assert!(pb.is_hidden());
    }
}
