use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// A permanent problem with the attribute declarations of one concrete type.
///
/// Configuration errors are detected the first time a type is compiled into a
/// [`crate::compiler::TypeCodec`]. The result of that compilation is cached, so
/// every later use of the same type reports the identical error again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A marked member lacks its getter or its setter.
    #[error("{type_name}.{member}: attribute property has no {accessor}")]
    MissingAccessor {
        /// The declaring type
        type_name: &'static str,
        /// The member name as declared
        member: &'static str,
        /// `"getter"` or `"setter"`
        accessor: &'static str,
    },

    /// A declared default carries no value.
    #[error("{type_name}.{property}: default value is null")]
    NullDefault {
        /// The declaring type
        type_name: &'static str,
        /// The serialized property name
        property: String,
    },

    /// The runtime type of a declared default differs from the property type.
    #[error("{type_name}.{property}: default value of type {found} does not match property type {expected}")]
    DefaultTypeMismatch {
        /// The declaring type
        type_name: &'static str,
        /// The serialized property name
        property: String,
        /// The property value type
        expected: &'static str,
        /// The type of the declared default
        found: &'static str,
    },

    /// List-shaped properties cannot declare a default.
    #[error("{type_name}.{property}: list properties do not support default values")]
    ListDefault {
        /// The declaring type
        type_name: &'static str,
        /// The serialized property name
        property: String,
    },

    /// No codec is registered for the property's value type.
    #[error("{type_name}.{property}: unsupported type {value_type}")]
    UnsupportedType {
        /// The declaring type
        type_name: &'static str,
        /// The serialized property name
        property: String,
        /// The unsupported value type
        value_type: &'static str,
    },
}

/// The generic Error type, which covers every failure this library can return.
///
/// # Error Categories
///
/// ## Configuration Errors
/// - [`Error::Configuration`] - The attribute declarations of a type are invalid
///
/// ## Document Errors
/// - [`Error::GraphMlNotFound`] - No `graphml` root element in the input
/// - [`Error::GraphNotFound`] - No `graph` element below the root
/// - [`Error::MissingAttribute`] - A required XML attribute is absent
/// - [`Error::VertexNotFound`] - An edge endpoint references an undeclared node
/// - [`Error::UnknownAttributeKey`] - A `data` key matches no property
/// - [`Error::InvalidReaderPosition`] - Unexpected element at graph level
/// - [`Error::Malformed`] - A value could not be parsed
/// - [`Error::Validation`] - The document violates the GraphML schema
///
/// ## Input Errors
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O and External Errors
/// - [`Error::FileError`], [`Error::Xml`], [`Error::XmlAttribute`], [`Error::Utf8`]
///
/// # Examples
///
/// ```rust,no_run
/// use graphml::{prelude::*, Error};
///
/// let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
/// match graph.deserialize_graphml_file(
///     "graph.graphml",
///     |id| id.to_string(),
///     |s, t, _| Edge::new(s.clone(), t.clone()),
/// ) {
///     Ok(()) => println!("loaded {} vertices", graph.vertex_count()),
///     Err(Error::VertexNotFound(id)) => eprintln!("dangling edge endpoint {}", id),
///     Err(e) if e.is_configuration() => eprintln!("bad attribute declaration: {}", e),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The attribute declarations of a vertex, edge or graph type are invalid.
    ///
    /// This class of error is permanent for the offending type.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// A value or structure in the document could not be interpreted.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The input ended before a `graphml` element was found.
    #[error("graphml node not found")]
    GraphMlNotFound,

    /// The input ended before a `graph` element was found below the root.
    #[error("graph node not found")]
    GraphNotFound,

    /// A `node`, `edge` or `data` element lacks a required attribute.
    #[error("{element} element is missing the required '{attribute}' attribute")]
    MissingAttribute {
        /// The element name
        element: &'static str,
        /// The missing attribute name
        attribute: &'static str,
    },

    /// An edge references a vertex id that no preceding `node` declared.
    #[error("could not find vertex {0}")]
    VertexNotFound(String),

    /// A `data` element's key matches none of the target type's properties.
    #[error("unknown attribute key '{key}' for type {type_name}")]
    UnknownAttributeKey {
        /// The value of the `key` attribute
        key: String,
        /// The type the data was read into
        type_name: &'static str,
    },

    /// An element other than `node`, `edge` or `data` appeared inside `graph`.
    #[error("invalid reader position: unexpected element '{0}'")]
    InvalidReaderPosition(String),

    /// The document failed GraphML schema validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The input contains no data.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error reported by the XML reader or writer.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// Error while parsing an XML attribute.
    #[error("{0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Character data or an attribute value contains an invalid escape sequence.
    #[error("{0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),

    /// Element names, namespaces or character data were not valid UTF-8.
    #[error("{0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A graph rejected a mutation, e.g. an edge whose endpoint is not one of its vertices.
    #[error("{0}")]
    GraphError(String),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

impl Error {
    /// Returns `true` when this error stems from an invalid attribute declaration
    /// rather than from the processed document.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
