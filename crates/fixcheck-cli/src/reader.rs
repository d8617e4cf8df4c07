//! Source of fixture bytes.

use std::fs;
use std::io;
use std::path::Path;

/// Reads the contents of a fixture file.
pub trait FixtureReader {
    fn read(&mut self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads fixtures from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FixtureReader for FsReader {
    fn read(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}
