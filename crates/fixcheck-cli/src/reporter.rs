//! # Run Reporting
//!
//! The run driver announces progress and failures through a [`Reporter`].
//! The binary uses [`TracingReporter`]; tests substitute a recorder.

use std::path::Path;

use crate::enumerate::Candidate;
use crate::error::ValidationError;
use crate::run::RunSummary;

/// Receives run events in order.
pub trait Reporter {
    /// Called once per candidate, before its bytes are read.
    fn validating(&mut self, dir: &Path, candidate: &Candidate);

    /// Called for every failure, including a directory that cannot be listed.
    fn failed(&mut self, error: &ValidationError);

    /// Called after the last candidate unless the directory could not be
    /// listed.
    fn finished(&mut self, _summary: &RunSummary) {}
}

/// Emits run events as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn validating(&mut self, dir: &Path, candidate: &Candidate) {
        tracing::info!(
            directory = %dir.display(),
            file = %candidate.name,
            "validating {}",
            candidate.path.display()
        );
    }

    fn failed(&mut self, error: &ValidationError) {
        tracing::error!(kind = error.kind(), path = %error.path().display(), "{error}");
    }

    fn finished(&mut self, summary: &RunSummary) {
        tracing::debug!(
            checked = summary.checked,
            failed = summary.failures.len(),
            aborted = summary.aborted,
            "run finished"
        );
    }
}
