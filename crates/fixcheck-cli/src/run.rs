//! # Run Driver
//!
//! Enumerates a fixture directory and decodes each candidate as a
//! `TestFile`, in listing order, one file at a time.
//!
//! ```text
//! Start ─▶ list ─┬─▶ for each candidate: validating ─▶ read ─▶ decode ─┬─▶ next
//!                │                                                    └─▶ abort (fail-fast)
//!                └─▶ DirectoryRead (no candidate is touched)
//! ```

use std::path::Path;

use fixcheck_schema::{conformance, DecodeOptions, FieldValue, JsonDecoder, Schema};
use serde::{Deserialize, Serialize};

use crate::enumerate::{list_candidates, FIXTURE_MARKER};
use crate::error::ValidationError;
use crate::reader::FixtureReader;
use crate::reporter::Reporter;

/// What to do after a file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first failure. No later file is read.
    #[default]
    FailFast,
    /// Validate every candidate and report every failure.
    CollectAll,
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub failure_mode: FailureMode,
    /// Substring a file name must contain to be validated.
    pub marker: String,
    pub decode: DecodeOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            marker: FIXTURE_MARKER.to_string(),
            decode: DecodeOptions::default(),
        }
    }
}

/// Outcome of a run over a listable directory.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Candidates attempted, including the one that aborted the run.
    pub checked: usize,
    /// Failures in the order they happened.
    pub failures: Vec<ValidationError>,
    /// Whether fail-fast mode stopped the run early.
    pub aborted: bool,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validates every fixture candidate in `dir`.
///
/// Each candidate is announced to `reporter` before it is read. Failures
/// are reported as they happen and collected in the summary.
///
/// # Errors
///
/// Only [`ValidationError::DirectoryRead`]; per-file failures land in
/// [`RunSummary::failures`].
pub fn run(
    dir: &Path,
    schema: &Schema,
    config: &RunConfig,
    reader: &mut dyn FixtureReader,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, ValidationError> {
    let candidates = match list_candidates(dir, &config.marker) {
        Ok(candidates) => candidates,
        Err(error) => {
            reporter.failed(&error);
            return Err(error);
        }
    };
    tracing::debug!(directory = %dir.display(), candidates = candidates.len(), "listed fixtures");

    let decoder = JsonDecoder::with_options(schema, config.decode);
    let mut summary = RunSummary::default();

    for candidate in &candidates {
        reporter.validating(dir, candidate);
        summary.checked += 1;

        if let Err(error) = validate_file(&candidate.path, &decoder, reader) {
            reporter.failed(&error);
            summary.failures.push(error);
            if config.failure_mode == FailureMode::FailFast {
                summary.aborted = true;
                break;
            }
        }
    }

    reporter.finished(&summary);
    Ok(summary)
}

/// Reads one fixture and decodes it as a `TestFile`.
///
/// # Errors
///
/// [`ValidationError::FileRead`] or [`ValidationError::Deserialization`].
pub fn validate_file(
    path: &Path,
    decoder: &JsonDecoder<'_>,
    reader: &mut dyn FixtureReader,
) -> Result<(), ValidationError> {
    let bytes = reader.read(path).map_err(|source| ValidationError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file = decoder
        .decode_slice(conformance::TEST_FILE, &bytes)
        .map_err(|source| ValidationError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    let tests = file.get(1).and_then(FieldValue::as_list).map_or(0, <[FieldValue]>::len);
    tracing::trace!(path = %path.display(), tests, "fixture decoded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Candidate;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Serves bytes from memory and records every read.
    #[derive(Default)]
    struct MapReader {
        files: HashMap<PathBuf, Vec<u8>>,
        reads: Vec<PathBuf>,
    }

    impl FixtureReader for MapReader {
        fn read(&mut self, path: &Path) -> io::Result<Vec<u8>> {
            self.reads.push(path.to_path_buf());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    #[derive(Default)]
    struct Recorder {
        progress: Vec<String>,
        failures: Vec<String>,
        finished: bool,
    }

    impl Reporter for Recorder {
        fn validating(&mut self, _dir: &Path, candidate: &Candidate) {
            self.progress.push(candidate.name.clone());
        }

        fn failed(&mut self, error: &ValidationError) {
            self.failures.push(error.to_string());
        }

        fn finished(&mut self, _summary: &RunSummary) {
            self.finished = true;
        }
    }

    /// Creates empty placeholder files so the directory listing sees them;
    /// contents come from the returned reader.
    fn fixture_dir(files: &[(&str, &str)]) -> (TempDir, MapReader) {
        let dir = TempDir::new().unwrap();
        let mut reader = MapReader::default();
        for (name, body) in files {
            let path = dir.path().join(name);
            std::fs::write(&path, "").unwrap();
            reader.files.insert(path, body.as_bytes().to_vec());
        }
        (dir, reader)
    }

    #[test]
    fn fail_fast_stops_reading() {
        let (dir, mut reader) = fixture_dir(&[
            ("a.json", "{"),
            ("b.json", "{"),
            ("c.json", "{"),
        ]);
        let schema = Schema::conformance().unwrap();
        let mut recorder = Recorder::default();
        let summary = run(dir.path(), &schema, &RunConfig::default(), &mut reader, &mut recorder).unwrap();

        assert_eq!(reader.reads.len(), 1);
        assert_eq!(summary.checked, 1);
        assert!(summary.aborted);
        assert_eq!(recorder.progress.len(), 1);
        assert_eq!(recorder.failures.len(), 1);
        assert!(recorder.finished);
    }

    #[test]
    fn collect_all_reads_everything() {
        let (dir, mut reader) = fixture_dir(&[
            ("a.json", "{"),
            ("b.json", r#"{"description": "ok"}"#),
            ("c.json", r#"{"description": 1}"#),
        ]);
        let schema = Schema::conformance().unwrap();
        let config = RunConfig {
            failure_mode: FailureMode::CollectAll,
            ..RunConfig::default()
        };
        let mut recorder = Recorder::default();
        let summary = run(dir.path(), &schema, &config, &mut reader, &mut recorder).unwrap();

        assert_eq!(reader.reads.len(), 3);
        assert_eq!(summary.checked, 3);
        assert_eq!(summary.failures.len(), 2);
        assert!(!summary.aborted);
        assert!(!summary.is_success());
    }

    #[test]
    fn unknown_fields_follow_config() {
        let (dir, mut reader) = fixture_dir(&[("a.json", r#"{"extra": true}"#)]);
        let schema = Schema::conformance().unwrap();

        let summary = run(dir.path(), &schema, &RunConfig::default(), &mut reader, &mut Recorder::default()).unwrap();
        assert!(summary.is_success());

        let strict = RunConfig {
            decode: DecodeOptions {
                ignore_unknown_fields: false,
                ..DecodeOptions::default()
            },
            ..RunConfig::default()
        };
        let summary = run(dir.path(), &schema, &strict, &mut reader, &mut Recorder::default()).unwrap();
        assert!(matches!(
            summary.failures.as_slice(),
            [ValidationError::Deserialization { .. }]
        ));
    }

    #[test]
    fn directory_error_is_reported_once() {
        let dir = TempDir::new().unwrap();
        let schema = Schema::conformance().unwrap();
        let mut reader = MapReader::default();
        let mut recorder = Recorder::default();
        let err = run(
            &dir.path().join("missing"),
            &schema,
            &RunConfig::default(),
            &mut reader,
            &mut recorder,
        )
        .unwrap_err();

        assert!(matches!(err, ValidationError::DirectoryRead { .. }));
        assert!(recorder.progress.is_empty());
        assert_eq!(recorder.failures.len(), 1);
        assert!(!recorder.finished);
        assert!(reader.reads.is_empty());
    }

    #[test]
    fn read_failure_is_file_read() {
        let (dir, mut reader) = fixture_dir(&[("a.json", "{}")]);
        reader.files.clear();
        let schema = Schema::conformance().unwrap();
        let summary = run(dir.path(), &schema, &RunConfig::default(), &mut reader, &mut Recorder::default()).unwrap();
        assert!(matches!(summary.failures.as_slice(), [ValidationError::FileRead { .. }]));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"failure_mode": "collect_all"}"#).unwrap();
        assert_eq!(config.failure_mode, FailureMode::CollectAll);
        assert_eq!(config.marker, "json");
        assert!(config.decode.ignore_unknown_fields);
    }
}
