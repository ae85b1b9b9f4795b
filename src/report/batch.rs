//! Batch aggregation with partial-failure tracking.

use super::ImageReport;
use crate::config::AnalysisConfig;
use crate::image::PixelSource;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Results of a batch run, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    reports: Vec<ImageReport>,
    failed: usize,
    skipped: usize,
    aborted: bool,
}

impl BatchResult {
    /// Returns the per-image reports, one per processed source, in
    /// the order the sources were supplied.
    pub fn reports(&self) -> &[ImageReport] {
        &self.reports
    }

    /// Number of processed sources.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if no source was processed.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Number of sources whose report carries an error.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of sources never processed due to early termination.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Whether the run was cut short by the stop flag.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Number of flagged images.
    pub fn flagged(&self) -> usize {
        self.reports.iter().filter(|r| r.flagged).count()
    }
}

/// Runs the detection pipeline over an ordered set of pixel sources.
///
/// Every source is analyzed independently; a failure on one image is
/// recorded in its report and never aborts the batch. Output order is
/// input order. The optional stop flag supports user aborts: it is
/// checked before each image, so a batch stops queuing new work while
/// already-produced reports are kept.
pub struct BatchAggregator {
    config: AnalysisConfig,
    stop: Option<Arc<AtomicBool>>,
}

impl BatchAggregator {
    /// Creates an aggregator with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config, stop: None }
    }

    /// Creates an aggregator that honors an external stop flag.
    pub fn with_stop_flag(config: AnalysisConfig, stop: Arc<AtomicBool>) -> Self {
        Self {
            config,
            stop: Some(stop),
        }
    }

    /// Returns the aggregator's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes every source and collects the reports.
    pub fn run<S, I>(&self, sources: I) -> BatchResult
    where
        S: PixelSource,
        I: IntoIterator<Item = S>,
    {
        let mut reports = Vec::new();
        let mut failed = 0;
        let mut skipped = 0;
        let mut aborted = false;

        let mut iter = sources.into_iter();
        while let Some(source) = iter.next() {
            if self.should_stop() {
                aborted = true;
                skipped = 1 + iter.count();
                tracing::warn!(processed = reports.len(), skipped, "batch aborted");
                break;
            }

            let outcome = source
                .load()
                .and_then(|grid| ImageReport::analyze(&grid, source.identifier(), &self.config));

            let report = match outcome {
                Ok(report) => report,
                Err(error) => {
                    failed += 1;
                    tracing::warn!(
                        source = source.identifier(),
                        error = %error,
                        "image analysis failed, continuing batch"
                    );
                    ImageReport::from_error(source.identifier(), self.config.channel, error)
                }
            };
            reports.push(report);
        }

        tracing::info!(
            processed = reports.len(),
            failed,
            flagged = reports.iter().filter(|r| r.flagged).count(),
            "batch complete"
        );

        BatchResult {
            reports,
            failed,
            skipped,
            aborted,
        }
    }

    fn should_stop(&self) -> bool {
        self.stop
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{MemorySource, PixelGrid};
    use crate::report::tests::grid_with_blue_payload;

    fn clean_source(name: &str) -> MemorySource {
        let samples: Vec<u8> = (0..300).flat_map(|i| [i as u8, 7, 42]).collect();
        MemorySource::new(name, PixelGrid::new(samples, 30, 10, 3).unwrap())
    }

    #[test]
    fn test_partial_failure_preserves_order() {
        let sources = vec![
            clean_source("a.png"),
            MemorySource::unreadable("b.png", "truncated"),
            clean_source("c.png"),
        ];

        let result = BatchAggregator::new(AnalysisConfig::default()).run(sources);

        assert_eq!(result.len(), 3);
        assert_eq!(result.failed(), 1);
        assert!(!result.aborted());

        let reports = result.reports();
        assert_eq!(reports[0].source, "a.png");
        assert_eq!(reports[1].source, "b.png");
        assert_eq!(reports[2].source, "c.png");

        assert!(reports[0].error.is_none());
        assert!(reports[1].error.is_some());
        assert!(!reports[1].flagged);
        assert!(reports[2].error.is_none());
    }

    #[test]
    fn test_oversized_image_recorded_not_fatal() {
        let mut config = AnalysisConfig::default();
        config.max_pixels = 100;

        let big: Vec<u8> = vec![0u8; 20 * 20 * 3];
        let sources = vec![
            MemorySource::new("big.png", PixelGrid::new(big, 20, 20, 3).unwrap()),
            clean_source("ok.png"),
        ];

        let result = BatchAggregator::new(config).run(sources);
        assert_eq!(result.len(), 2);
        assert_eq!(result.failed(), 1);
        assert!(matches!(
            result.reports()[0].error,
            Some(crate::error::AnalysisError::UnsupportedImage { .. })
        ));
        assert!(result.reports()[1].error.is_none());
    }

    #[test]
    fn test_flagged_count() {
        let sources = vec![
            MemorySource::new("hidden.png", grid_with_blue_payload(b"secret", 64)),
            clean_source("clean.png"),
        ];

        let result = BatchAggregator::new(AnalysisConfig::default()).run(sources);
        assert_eq!(result.flagged(), 1);
        assert!(result.reports()[0].flagged);
    }

    #[test]
    fn test_stop_flag_skips_remaining_sources() {
        let stop = Arc::new(AtomicBool::new(true));
        let aggregator =
            BatchAggregator::with_stop_flag(AnalysisConfig::default(), Arc::clone(&stop));

        let sources = vec![clean_source("a.png"), clean_source("b.png")];
        let result = aggregator.run(sources);

        assert!(result.aborted());
        assert!(result.is_empty());
        assert_eq!(result.skipped(), 2);
    }

    #[test]
    fn test_unset_stop_flag_processes_everything() {
        let stop = Arc::new(AtomicBool::new(false));
        let aggregator =
            BatchAggregator::with_stop_flag(AnalysisConfig::default(), Arc::clone(&stop));

        let result = aggregator.run(vec![clean_source("a.png"), clean_source("b.png")]);
        assert!(!result.aborted());
        assert_eq!(result.len(), 2);
        assert_eq!(result.skipped(), 0);
    }
}
