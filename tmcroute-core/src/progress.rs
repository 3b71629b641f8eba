//! Progress reporting for long-running passes
//!
//! Reporting is purely cosmetic; the core only calls into the [`Progress`]
//! trait and never depends on how (or whether) it is rendered.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

/// Receiver of progress updates. Implementations must tolerate calls from
/// several worker threads at once.
pub trait Progress: Sync {
    /// Announces the total number of units
    fn begin(&self, _total: u64) {}

    /// Marks `units` more units as done
    fn advance(&self, units: u64);

    fn finish(&self) {}
}

/// Discards all updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&self, _units: u64) {}
}

/// Appearance of a [`BarProgress`]
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub prefix: String,
    pub suffix: String,
    /// Decimal places of the percentage
    pub decimals: usize,
    /// Bar width in characters
    pub length: usize,
    pub fill: char,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            prefix: "Progress:".to_string(),
            suffix: "Complete".to_string(),
            decimals: 1,
            length: 100,
            fill: '█',
        }
    }
}

/// Terminal progress bar rendered as `prefix |████----| 42.0% suffix`
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(config: &ProgressConfig) -> Self {
        let decimals = config.decimals;
        let template = format!(
            "{{prefix}} |{{bar:{}}}| {{percent_fixed}}% {{msg}}",
            config.length
        );
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "percent_fixed",
                move |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.*}", decimals, state.fraction() * 100.0);
                },
            )
            .progress_chars(&format!("{0}{0}-", config.fill));

        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(style)
            .with_prefix(config.prefix.clone())
            .with_message(config.suffix.clone());
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new(&ProgressConfig::default())
    }
}

impl Progress for BarProgress {
    fn begin(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn advance(&self, units: u64) {
        self.bar.inc(units);
    }

    fn finish(&self) {
        self.bar.finish();
    }
}
