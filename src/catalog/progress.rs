// file: src/catalog/progress.rs
// description: progress display and counters for concurrent catalog loading
// reference: uses indicatif for progress bars and tracks load metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    pub indexes_loaded: usize,
    pub indexes_failed: usize,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

impl LoadStats {
    pub fn success_rate(&self) -> f64 {
        let total = self.indexes_loaded + self.indexes_failed;
        if total == 0 {
            return 0.0;
        }
        (self.indexes_loaded as f64 / total as f64) * 100.0
    }

    pub fn megabytes_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.bytes_read as f64 / 1_048_576.0) / (self.duration_ms as f64 / 1000.0)
    }

    pub fn format(&self) -> String {
        format!(
            "{} loaded, {} failed ({:.1}% success) in {}ms, {:.2} MB/sec",
            self.indexes_loaded,
            self.indexes_failed,
            self.success_rate(),
            self.duration_ms,
            self.megabytes_per_second()
        )
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    loaded: AtomicUsize,
    failed: AtomicUsize,
    bytes_read: AtomicU64,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total: usize, colored: bool) -> Self {
        Self::build(MultiProgress::new(), total, colored)
    }

    /// Tracker that counts without drawing anything.
    pub fn hidden(total: usize) -> Self {
        Self::build(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            total,
            false,
        )
    }

    fn build(multi_progress: MultiProgress, total: usize, colored: bool) -> Self {
        let main_bar = multi_progress.add(ProgressBar::new(total as u64));
        main_bar.set_style(bar_style(colored));

        let detail_bar = multi_progress.add(ProgressBar::new(0));
        if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
            detail_bar.set_style(style);
        }

        Self {
            main_bar,
            detail_bar,
            loaded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            bytes_read: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_loaded(&self, version: &str, bytes: u64) {
        self.loaded.fetch_add(1, Ordering::SeqCst);
        self.bytes_read.fetch_add(bytes, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar(version);
    }

    pub fn inc_failed(&self, version: &str) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar(version);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Catalog loaded");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> LoadStats {
        LoadStats {
            indexes_loaded: self.loaded.load(Ordering::SeqCst),
            indexes_failed: self.failed.load(Ordering::SeqCst),
            bytes_read: self.bytes_read.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self, version: &str) {
        let message = format!(
            "Last: {} | Loaded: {} | Failed: {}",
            version,
            self.loaded.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst)
        );
        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn bar_style(colored: bool) -> ProgressStyle {
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            "█▓▒░",
        )
    } else {
        ("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}", "=>-")
    };

    ProgressStyle::default_bar()
        .template(template)
        .map(|style| style.progress_chars(chars))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
