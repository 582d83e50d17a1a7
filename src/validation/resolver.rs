//! Resolution of DTD and schema references.
//!
//! Validation never touches the network: the GraphML DTD, the GraphML schema
//! set and the XLink schema it imports are compiled into the crate and served
//! by [`GraphMlXmlResolver`]. Anything else is handed to a base resolver,
//! [`NullXmlResolver`] by default, which resolves nothing.

use std::io::Read;

use crate::Result;

/// Embedded documents, by file name.
const RESOURCES: &[(&str, &[u8])] = &[
    ("graphml.dtd", include_bytes!("resources/graphml.dtd")),
    ("graphml.xsd", include_bytes!("resources/graphml.xsd")),
    (
        "graphml-structure.xsd",
        include_bytes!("resources/graphml-structure.xsd"),
    ),
    (
        "graphml-attributes.xsd",
        include_bytes!("resources/graphml-attributes.xsd"),
    ),
    (
        "graphml-parseinfo.xsd",
        include_bytes!("resources/graphml-parseinfo.xsd"),
    ),
    ("xlink.xsd", include_bytes!("resources/xlink.xsd")),
];

/// Maps a DTD system id or a schema location to its content.
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
/// use graphml::validation::{XmlResolver, GraphMlXmlResolver};
///
/// let resolver = GraphMlXmlResolver::new();
/// let mut dtd = String::new();
/// resolver
///     .resolve("http://www.graphdrawing.org/dtds/graphml.dtd")?
///     .expect("embedded")
///     .read_to_string(&mut dtd)?;
/// assert!(dtd.contains("<!ELEMENT graphml"));
/// # Ok::<(), graphml::Error>(())
/// ```
pub trait XmlResolver {
    /// Opens the document at `uri`.
    ///
    /// Returns `Ok(None)` if the resolver does not know the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is known but cannot be read.
    fn resolve(&self, uri: &str) -> Result<Option<Box<dyn Read + '_>>>;
}

impl<R: XmlResolver + ?Sized> XmlResolver for &R {
    fn resolve(&self, uri: &str) -> Result<Option<Box<dyn Read + '_>>> {
        (**self).resolve(uri)
    }
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullXmlResolver;

impl XmlResolver for NullXmlResolver {
    fn resolve(&self, _uri: &str) -> Result<Option<Box<dyn Read + '_>>> {
        Ok(None)
    }
}

/// Serves the embedded GraphML documents, delegates everything else to `B`.
///
/// Documents are matched on the last path segment of the URI, so
/// `http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd`, `graphml.xsd`
/// and `file:///schemas/graphml.xsd` all resolve to the embedded schema.
#[derive(Debug, Clone, Default)]
pub struct GraphMlXmlResolver<B = NullXmlResolver> {
    base: B,
}

impl GraphMlXmlResolver {
    /// Creates a resolver serving only the embedded documents.
    #[must_use]
    pub fn new() -> Self {
        GraphMlXmlResolver {
            base: NullXmlResolver,
        }
    }
}

impl<B: XmlResolver> GraphMlXmlResolver<B> {
    /// Creates a resolver falling back to `base` for unknown documents.
    #[must_use]
    pub fn with_base(base: B) -> Self {
        GraphMlXmlResolver { base }
    }

    /// The fallback resolver.
    #[must_use]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Content of the embedded document named `name`.
    #[must_use]
    pub fn embedded(name: &str) -> Option<&'static [u8]> {
        RESOURCES
            .iter()
            .find(|(resource, _)| *resource == name)
            .map(|(_, data)| *data)
    }

    /// Names of all embedded documents.
    pub fn embedded_names() -> impl Iterator<Item = &'static str> {
        RESOURCES.iter().map(|(name, _)| *name)
    }
}

impl<B: XmlResolver> XmlResolver for GraphMlXmlResolver<B> {
    fn resolve(&self, uri: &str) -> Result<Option<Box<dyn Read + '_>>> {
        let segment = uri
            .trim_end_matches('/')
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(uri);

        match Self::embedded(segment) {
            Some(data) => {
                tracing::trace!(uri = %uri, "resolved embedded document");
                Ok(Some(Box::new(data)))
            }
            None => self.base.resolve(uri),
        }
    }
}
