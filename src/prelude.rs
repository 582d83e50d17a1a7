//! # graphml Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the graphml library. Import this module to get quick access to everything needed
//! to declare attributes and to write and read GraphML documents.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all graphml operations
pub use crate::Error;

/// Invalid attribute declarations of one type
pub use crate::ConfigurationError;

/// The result type used throughout graphml
pub use crate::Result;

// ================================================================================================
// Attribute Declarations
// ================================================================================================

/// Declaring the serializable members of vertex, edge and graph types
pub use crate::attributes::{GraphMlAttributes, Member, PropertyTable};

// ================================================================================================
// Graphs
// ================================================================================================

/// Graph traits the writer and the reader work against
pub use crate::graph::{
    EdgeEndpoints, Graph, MutableVertexAndEdgeListGraph, VertexAndEdgeListGraph,
};

/// The bundled graph implementation and edge types
pub use crate::graph::{AdjacencyGraph, Edge, EdgeId, TaggedEdge, VertexId};

/// Vertex and edge identity helpers
pub use crate::graph::identity::{display_identity, EdgeIndexIdentity, VertexIndexIdentity};

// ================================================================================================
// Serialization
// ================================================================================================

/// Writer and reader with their settings
pub use crate::serialization::{
    GraphMlDeserializer, GraphMlSerializer, ValidationSettings, WriterSettings,
};

/// GraphML methods on graphs
pub use crate::serialization::{DeserializeGraphMlExt, SerializeGraphMlExt};

/// Customization of the written document
pub use crate::serialization::SerializationHooks;

// ================================================================================================
// Validation
// ================================================================================================

/// Resolution of DTD and schema documents
pub use crate::validation::{GraphMlXmlResolver, NullXmlResolver, XmlResolver};
