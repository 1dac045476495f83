use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Batch progress: symbols collected in total, how many succeeded, how many failed, and a spinner
/// for the symbol in hand.
pub(crate) struct Progress {
    total: ProgressBar,
    success: ProgressBar,
    fails: ProgressBar,
    current: ProgressBar,
}

impl Progress {
    pub(crate) fn new(len: usize, tui: bool) -> anyhow::Result<Self> {
        if !tui {
            return Ok(Self::hidden());
        }

        // overall multi progress bar
        let multi = MultiProgress::new();

        // total number of symbols to collect
        let total = multi.add(
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.magenta}\n \
                            {msg:>9.white} |{bar:57.white/grey}| {pos:<2} / {human_len} \
                            ({percent_precise}%) [Time: {elapsed}, ETA: {eta}]",
                    )?
                    .progress_chars("## "),
            ),
        );
        total.set_message("total");
        total.enable_steady_tick(Duration::from_millis(100));

        // total successful collections
        let success = multi.insert_after(
            &total,
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(" {msg:>9.green} |{bar:57.green}| {pos:<2.green}")?
                    .progress_chars("## "),
            ),
        );
        success.set_message("successes");

        // total failed collections
        let fails = multi.insert_after(
            &success,
            ProgressBar::new(len as u64).with_style(
                ProgressStyle::default_bar()
                    .template(" {msg:>9.red} |{bar:57.red}| {pos:<2.red}")?
                    .progress_chars("## "),
            ),
        );
        fails.set_message("failures");

        // the symbol in hand
        let current = multi.insert_after(
            &fails,
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner().template("\t   > {msg}")?,
            ),
        );

        Ok(Self {
            total,
            success,
            fails,
            current,
        })
    }

    fn hidden() -> Self {
        Self {
            total: ProgressBar::hidden(),
            success: ProgressBar::hidden(),
            fails: ProgressBar::hidden(),
            current: ProgressBar::hidden(),
        }
    }

    pub(crate) fn step(&self, msg: String) {
        self.current.set_message(msg);
    }

    pub(crate) fn succeeded(&self) {
        self.success.inc(1);
        self.total.inc(1);
    }

    pub(crate) fn failed(&self) {
        self.fails.inc(1);
        self.total.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.current.finish_and_clear();
        self.total.finish();
        self.success.finish();
        self.fails.finish();
    }
}
