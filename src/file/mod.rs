//! Input files for GraphML documents.
//!
//! Deserialization from a path goes through a [`File`], which owns one
//! [`Backend`]. [`physical::Physical`] maps the file on disk into memory.
//!
//! The two-pass "validate, then deserialize" entry points need the document
//! twice, the backend hands out the same bytes for both passes without reading
//! the file again.
//!
//! # Examples
//!
//! ```rust
//! use graphml::File;
//!
//! let path = std::env::temp_dir().join("graphml-file-doc.graphml");
//! std::fs::write(&path, b"\xEF\xBB\xBF<graphml/>")?;
//!
//! let file = File::from_file(&path)?;
//! assert_eq!(file.len(), 13);
//! assert_eq!(file.text()?, "<graphml/>");
//! # drop(file);
//! # std::fs::remove_file(&path)?;
//! # Ok::<(), graphml::Error>(())
//! ```

pub mod physical;

use std::path::Path;

use crate::{Error, Result};

use physical::Physical;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Byte access to a loaded document.
pub trait Backend: Send + Sync {
    /// Returns the entire document.
    fn data(&self) -> &[u8];

    /// Where the bytes came from, for log output.
    fn origin(&self) -> String;

    /// Returns the document size in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }
}

/// A GraphML document held by a [`Backend`].
pub struct File {
    backend: Box<dyn Backend>,
}

impl File {
    /// Memory-maps the document at `path`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::FileError`] if the file cannot be opened
    /// - [`crate::Error::Empty`] if the file has no content
    pub fn from_file(path: impl AsRef<Path>) -> Result<File> {
        File::load(Physical::new(path)?)
    }

    fn load<B: Backend + 'static>(backend: B) -> Result<File> {
        if backend.len() == 0 {
            return Err(Error::Empty);
        }
        tracing::debug!(origin = %backend.origin(), bytes = backend.len(), "loaded document");

        Ok(File {
            backend: Box::new(backend),
        })
    }

    /// Returns the raw bytes of the document.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// Returns the document size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Returns `true` if the document has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.len() == 0
    }

    /// Returns the document as text, without a leading byte order mark.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Utf8`] if the document is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        let data = self.data();
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        Ok(std::str::from_utf8(data)?)
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File").field("len", &self.len()).finish()
    }
}
