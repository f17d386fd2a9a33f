//! Progress bars for CLI operations.

use console::Term;
use indicatif::MultiProgress;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use ziptrack_core::ProgressSink;
use ziptrack_core::ProgressSinks;

/// Bar positions per percent; keeps two decimals of precision.
const SCALE: f64 = 100.0;
const BAR_LEN: u64 = 100 * 100;

/// A single percentage bar that accepts core progress reports.
pub struct PercentBar {
    bar: ProgressBar,
}

impl PercentBar {
    fn new(label: &str) -> Self {
        let bar = ProgressBar::new(BAR_LEN);

        // Template: "   Current [████████░░░░]  42.50%"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>10} [{bar:40.cyan/blue}] {pct}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("pct", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{:>7.2}%", state.pos() as f64 / SCALE).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Current value in percent.
    #[cfg(test)]
    fn percent(&self) -> f64 {
        self.bar.position() as f64 / SCALE
    }
}

impl ProgressSink for PercentBar {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn report(&mut self, percent: f64) {
        let pos = (percent.clamp(0.0, 100.0) * SCALE).round() as u64;
        self.bar.set_position(pos);
    }
}

/// Two stacked bars: the file being copied and the whole operation.
///
/// Hidden when stdout is not a terminal. Cleared on drop.
pub struct CliProgress {
    _multi: MultiProgress,
    item: PercentBar,
    total: PercentBar,
}

impl CliProgress {
    /// Creates the bar pair, labelled with the operation verb.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        let multi = MultiProgress::new();
        let item = PercentBar {
            bar: multi.add(PercentBar::new("Current").bar),
        };
        let total = PercentBar {
            bar: multi.add(PercentBar::new(operation).bar),
        };

        Self {
            _multi: multi,
            item,
            total,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    /// Borrows both bars as core progress sinks.
    pub fn sinks(&mut self) -> ProgressSinks<'_> {
        ProgressSinks::new(Some(&mut self.item), Some(&mut self.total))
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.item.bar.finish_and_clear();
        self.total.bar.finish_and_clear();
    }
}
