use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use soiltemp::engine::progress::{Progress, ProgressCallback};

/// One overall bar for a whole sweep, counting simulated days across all
/// scenarios. Drivers report per-scenario task events; the bar's length is
/// fixed up front, so per-scenario `TaskStart`/`TaskFinish` are ignored and
/// only increments move it. `ProgressBar` is internally synchronized, so the
/// callback can be invoked from rayon workers directly.
pub struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    pub fn new(total_days: u64) -> Self {
        let bar = ProgressBar::new(total_days);
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        bar.set_style(Self::bar_style());
        Self { bar }
    }

    pub fn hidden(total_days: u64) -> Self {
        let bar = ProgressBar::new(total_days);
        bar.set_draw_target(ProgressDrawTarget::hidden());
        bar.set_style(Self::bar_style());
        Self { bar }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event: Progress| match event {
            Progress::TaskIncrement => bar.inc(1),
            Progress::StatusUpdate { text } => bar.set_message(text),
            Progress::Message(msg) => {
                bar.println(format!("  {}", msg));
            }
            Progress::PhaseStart { .. }
            | Progress::PhaseFinish
            | Progress::TaskStart { .. }
            | Progress::TaskFinish => {}
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<32} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Invalid template")
            .progress_chars("━╸ ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_increments_advance_the_overall_bar() {
        let progress = SweepProgress::hidden(10);
        let callback = progress.callback();

        callback(Progress::TaskStart { total_steps: 5 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        callback(Progress::TaskFinish);

        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(10));
    }

    #[test]
    fn status_updates_set_the_bar_message() {
        let progress = SweepProgress::hidden(1);
        let callback = progress.callback();

        callback(Progress::StatusUpdate {
            text: "halle-loam-c2-m3 (swat)".to_string(),
        });

        assert_eq!(progress.bar.message(), "halle-loam-c2-m3 (swat)");
    }
}
