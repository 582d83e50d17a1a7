//! Writer and validation settings.

use std::io::Write;

use quick_xml::Writer;

/// Output options of [`crate::GraphMlSerializer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root
    pub xml_declaration: bool,

    /// Indentation width in spaces, `None` writes everything on one line
    pub indent: Option<usize>,

    /// Value of the `id` attribute of the `graph` element
    pub graph_id: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent: Some(2),
            graph_id: "G".to_string(),
        }
    }
}

impl WriterSettings {
    /// Single-line output without declaration, suited for embedding.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            xml_declaration: false,
            indent: None,
            ..Self::default()
        }
    }

    /// Wraps `out` in an XML writer honoring the indentation setting.
    pub fn create_writer<W: Write>(&self, out: W) -> Writer<W> {
        match self.indent {
            Some(width) => Writer::new_with_indent(out, b' ', width),
            None => Writer::new(out),
        }
    }
}

/// Options of the "deserialize and validate" entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSettings {
    /// Root schema document, resolved through the XML resolver
    pub schema: String,

    /// Fail when the document's DOCTYPE names a DTD the resolver cannot serve
    pub require_doctype_resolution: bool,

    /// Deepest element nesting accepted
    pub max_nesting_depth: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            schema: "graphml.xsd".to_string(),
            require_doctype_resolution: true,
            max_nesting_depth: 64,
        }
    }
}

impl ValidationSettings {
    /// Accepts documents whose DOCTYPE cannot be resolved.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            require_doctype_resolution: false,
            ..Self::default()
        }
    }
}
