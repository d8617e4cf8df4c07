//! # fixcheck-cli — Conformance Fixture Validator
//!
//! Walks a directory of Firestore conformance fixtures and checks that each
//! one decodes as a `TestFile` under the proto3 JSON mapping.
//!
//! ## Pipeline
//!
//! - [`enumerate`] — lists a directory, keeps names containing `"json"`
//! - [`reader`] — the [`FixtureReader`] seam over file reads
//! - [`mod@run`] — drives decode per candidate, fail-fast or collect-all
//! - [`reporter`] — the [`Reporter`] sink for progress and failures
//!
//! ## Crate Policy
//!
//! - Argument parsing and logging setup live in the binary only.
//! - Files are validated one at a time; nothing is retained between files.
//! - The library never prints. All output goes through a [`Reporter`].

pub mod enumerate;
pub mod error;
pub mod reader;
pub mod reporter;
pub mod run;

pub use enumerate::{list_candidates, Candidate, FIXTURE_MARKER};
pub use error::ValidationError;
pub use reader::{FixtureReader, FsReader};
pub use reporter::{Reporter, TracingReporter};
pub use run::{run, validate_file, FailureMode, RunConfig, RunSummary};
