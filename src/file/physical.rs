//! Memory-mapped file backend.
//!
//! GraphML files are mapped read-only, the deserializer and the validator then
//! borrow the mapped bytes directly. The mapping is released when the owning
//! [`crate::File`] is dropped, on every exit path of the calling entry point.

use std::{
    fs,
    path::{Path, PathBuf},
};

use memmap2::Mmap;

use super::Backend;
use crate::{Error, Result};

/// A document file mapped into memory.
#[derive(Debug)]
pub struct Physical {
    path: PathBuf,
    map: Mmap,
}

impl Physical {
    /// Opens and maps the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::FileError`] if the file cannot be opened
    /// - [`crate::Error::Empty`] if the file has no content, which cannot be mapped
    /// - [`crate::Error::Error`] if the mapping fails
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(Error::Empty);
        }

        // Safety: the mapping is read-only and lives no longer than `Physical`.
        let map = unsafe { Mmap::map(&file) }
            .map_err(|error| Error::Error(format!("cannot map {}: {error}", path.display())))?;

        Ok(Physical {
            path: path.to_path_buf(),
            map,
        })
    }

    /// The mapped file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.map
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}
