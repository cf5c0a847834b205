//! Progress reporting for long enumerations
//!
//! A [`Progress`] is shared between the code doing the work and whoever
//! watches it (the TUI gauge, batch logging). Cancelling it makes the wrapped
//! iterator stop at the next item.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug)]
pub struct Progress {
    label: String,
    total: usize,
    done: AtomicUsize,
    cancelled: AtomicBool,
}

impl Progress {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Self {
            label: label.into(),
            total,
            done: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    /// Completed fraction in `0.0..=1.0`. An empty job counts as complete.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.done() as f64 / self.total as f64).min(1.0)
        }
    }

    pub fn percent(&self) -> u16 {
        (self.ratio() * 100.0).round() as u16
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn advance(&self) -> usize {
        self.done.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Wrap `iter` so each item advances this progress.
    pub fn wrap<I: Iterator>(&self, iter: I) -> ProgressIter<'_, I> {
        ProgressIter {
            inner: iter,
            progress: self,
            log_step: 0,
        }
    }
}

/// Iterator adapter returned by [`Progress::wrap`].
pub struct ProgressIter<'p, I> {
    inner: I,
    progress: &'p Progress,
    /// Log at every this many percent; 0 disables logging.
    log_step: u16,
}

impl<I> ProgressIter<'_, I> {
    /// Emit an info log line every `step` percent.
    pub fn log_every(mut self, step: u16) -> Self {
        self.log_step = step;
        self
    }
}

impl<I: Iterator> Iterator for ProgressIter<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.progress.is_cancelled() {
            return None;
        }
        let item = self.inner.next()?;
        let done = self.progress.advance();
        if self.log_step > 0 && self.progress.total > 0 {
            let step = (self.progress.total * self.log_step as usize / 100).max(1);
            if done % step == 0 || done == self.progress.total {
                tracing::info!(
                    "{}: {}/{} ({}%)",
                    self.progress.label,
                    done,
                    self.progress.total,
                    self.progress.percent()
                );
            }
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_items() {
        let progress = Progress::new("load", 4);
        let items: Vec<_> = progress.wrap(0..4).collect();

        assert_eq!(items, vec![0, 1, 2, 3]);
        assert_eq!(progress.done(), 4);
        assert_eq!(progress.ratio(), 1.0);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_partial_ratio() {
        let progress = Progress::new("load", 4);
        let mut iter = progress.wrap(0..4);
        iter.next();

        assert_eq!(progress.done(), 1);
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_cancel_stops_iteration() {
        let progress = Progress::new("load", 100);
        let mut taken = Vec::new();
        for item in progress.wrap(0..100) {
            taken.push(item);
            if item == 9 {
                progress.cancel();
            }
        }

        assert_eq!(taken.len(), 10);
        assert!(progress.is_cancelled());
        assert_eq!(progress.done(), 10);
    }

    #[test]
    fn test_empty_total_is_complete() {
        let progress = Progress::new("empty", 0);
        assert_eq!(progress.ratio(), 1.0);
        assert_eq!(progress.wrap(std::iter::empty::<u8>()).count(), 0);
    }

    #[test]
    fn test_logging_does_not_change_items() {
        let progress = Progress::new("logged", 7);
        let sum: i32 = progress.wrap(1..=7).log_every(10).sum();
        assert_eq!(sum, 28);
    }
}
