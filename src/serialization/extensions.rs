//! GraphML entry points as methods on graphs.

use std::{io::Write, path::Path};

use crate::{
    attributes::GraphMlAttributes,
    graph::{MutableVertexAndEdgeListGraph, VertexAndEdgeListGraph},
    serialization::{GraphMlDeserializer, GraphMlSerializer},
    Result,
};

/// Writes any enumerable graph with default [`crate::WriterSettings`].
///
/// # Examples
///
/// ```rust
/// use graphml::prelude::*;
///
/// let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
/// graph.add_vertex("solo".to_string());
///
/// let xml = graph.to_graphml_string(display_identity, |_: &Edge<String>| String::new())?;
/// assert!(xml.contains("<node id=\"solo\">"));
/// # Ok::<(), graphml::Error>(())
/// ```
pub trait SerializeGraphMlExt: VertexAndEdgeListGraph + Sized
where
    Self::Vertex: GraphMlAttributes,
    Self::Edge: GraphMlAttributes,
    Self::Attributes: GraphMlAttributes,
{
    /// Writes the graph to `out`.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    fn serialize_graphml<W, FV, FE>(&self, out: W, vertex_identity: FV, edge_identity: FE) -> Result<W>
    where
        W: Write,
        FV: Fn(&Self::Vertex) -> String,
        FE: Fn(&Self::Edge) -> String,
    {
        GraphMlSerializer::new().serialize_to_writer(out, self, vertex_identity, edge_identity)
    }

    /// Writes the graph to a new file at `path`.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    fn serialize_graphml_file<FV, FE>(
        &self,
        path: impl AsRef<Path>,
        vertex_identity: FV,
        edge_identity: FE,
    ) -> Result<()>
    where
        FV: Fn(&Self::Vertex) -> String,
        FE: Fn(&Self::Edge) -> String,
    {
        GraphMlSerializer::new().serialize_to_file(path, self, vertex_identity, edge_identity)
    }

    /// Writes the graph into a string.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    fn to_graphml_string<FV, FE>(&self, vertex_identity: FV, edge_identity: FE) -> Result<String>
    where
        FV: Fn(&Self::Vertex) -> String,
        FE: Fn(&Self::Edge) -> String,
    {
        GraphMlSerializer::new().serialize_to_string(self, vertex_identity, edge_identity)
    }
}

impl<G> SerializeGraphMlExt for G
where
    G: VertexAndEdgeListGraph,
    G::Vertex: GraphMlAttributes,
    G::Edge: GraphMlAttributes,
    G::Attributes: GraphMlAttributes,
{
}

/// Reads GraphML into any mutable graph, without and with validation.
pub trait DeserializeGraphMlExt: MutableVertexAndEdgeListGraph + Sized
where
    Self::Vertex: GraphMlAttributes + Clone,
    Self::Edge: GraphMlAttributes,
    Self::Attributes: GraphMlAttributes,
{
    /// Reads a document from `data` into the graph.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize`].
    fn deserialize_graphml<FV, FE>(&mut self, data: &[u8], vertex_factory: FV, edge_factory: FE) -> Result<()>
    where
        FV: FnMut(&str) -> Self::Vertex,
        FE: FnMut(&Self::Vertex, &Self::Vertex, &str) -> Self::Edge,
    {
        GraphMlDeserializer::new().deserialize_from_bytes(data, self, vertex_factory, edge_factory)
    }

    /// Reads a document from `text` into the graph.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize`].
    fn deserialize_graphml_str<FV, FE>(&mut self, text: &str, vertex_factory: FV, edge_factory: FE) -> Result<()>
    where
        FV: FnMut(&str) -> Self::Vertex,
        FE: FnMut(&Self::Vertex, &Self::Vertex, &str) -> Self::Edge,
    {
        GraphMlDeserializer::new().deserialize_from_str(text, self, vertex_factory, edge_factory)
    }

    /// Reads the file at `path` into the graph.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize_from_file`].
    fn deserialize_graphml_file<FV, FE>(
        &mut self,
        path: impl AsRef<Path>,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        FV: FnMut(&str) -> Self::Vertex,
        FE: FnMut(&Self::Vertex, &Self::Vertex, &str) -> Self::Edge,
    {
        GraphMlDeserializer::new().deserialize_from_file(path, self, vertex_factory, edge_factory)
    }

    /// Validates `data` against the GraphML schemas, then reads it into the graph.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize_and_validate`].
    fn deserialize_and_validate_graphml<FV, FE>(
        &mut self,
        data: &[u8],
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        FV: FnMut(&str) -> Self::Vertex,
        FE: FnMut(&Self::Vertex, &Self::Vertex, &str) -> Self::Edge,
    {
        GraphMlDeserializer::new().deserialize_and_validate(data, self, vertex_factory, edge_factory)
    }
}

impl<G> DeserializeGraphMlExt for G
where
    G: MutableVertexAndEdgeListGraph,
    G::Vertex: GraphMlAttributes + Clone,
    G::Edge: GraphMlAttributes,
    G::Attributes: GraphMlAttributes,
{
}
