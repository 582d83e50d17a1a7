//! Graph collaborator interface and a reference implementation.
//!
//! The serializer and the deserializer do not depend on a concrete graph type.
//! They consume three traits:
//!
//! - [`Graph`] names the vertex, edge and attribute types and reports directedness
//! - [`VertexAndEdgeListGraph`] enumerates vertices and edges
//! - [`MutableVertexAndEdgeListGraph`] adds vertices and edges while reading
//!
//! Edges expose their endpoints through [`EdgeEndpoints`]. Vertices and edges
//! are named in the document by caller-supplied identity functions, the
//! [`identity`] module has the common ones.
//!
//! [`AdjacencyGraph`] implements all three traits and is what the tests and
//! benchmarks use.
//!
//! # Examples
//!
//! ```rust
//! use graphml::graph::{AdjacencyGraph, Edge, VertexAndEdgeListGraph};
//!
//! let mut graph: AdjacencyGraph<&str, Edge<&str>> = AdjacencyGraph::new();
//! graph.add_vertices_and_edge(Edge::new("a", "b"));
//! graph.add_vertices_and_edge(Edge::new("b", "c"));
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! ```

mod adjacency;
mod edge;
mod id;
pub mod identity;

pub use adjacency::AdjacencyGraph;
pub use edge::{Edge, TaggedEdge};
pub use id::{EdgeId, VertexId};

use crate::Result;

/// Access to the two endpoints of an edge.
pub trait EdgeEndpoints<V> {
    /// The source vertex.
    fn source(&self) -> &V;

    /// The target vertex.
    fn target(&self) -> &V;
}

/// A graph with vertices of type [`Graph::Vertex`] and edges of type [`Graph::Edge`].
pub trait Graph {
    /// Vertex type.
    type Vertex;

    /// Edge type.
    type Edge: EdgeEndpoints<Self::Vertex>;

    /// Graph-level attribute payload, `()` for graphs without attributes.
    type Attributes;

    /// Returns `true` if edges are directed.
    fn is_directed(&self) -> bool;

    /// Returns the graph-level attribute payload.
    fn attributes(&self) -> &Self::Attributes;
}

/// A graph whose vertices and edges can be enumerated.
///
/// Enumeration order must be stable between calls, it decides the order of
/// `node` and `edge` elements in written documents.
pub trait VertexAndEdgeListGraph: Graph {
    /// Iterates the vertices.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex> + '_;

    /// Iterates the edges.
    fn edges(&self) -> impl Iterator<Item = &Self::Edge> + '_;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;
}

/// A graph that accepts new vertices and edges.
pub trait MutableVertexAndEdgeListGraph: VertexAndEdgeListGraph {
    /// Adds a vertex. Returns `false` if the graph already holds it.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Adds an edge between two vertices of the graph.
    ///
    /// Returns `Ok(false)` if the graph declined the edge, e.g. a parallel edge
    /// in a graph that suppresses them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GraphError`] if an endpoint is not a vertex of
    /// the graph.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool>;

    /// Returns the graph-level attribute payload for modification.
    fn attributes_mut(&mut self) -> &mut Self::Attributes;
}
