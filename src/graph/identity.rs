//! Identity functions naming vertices and edges in written documents.
//!
//! The serializer takes a vertex identity `Fn(&V) -> String` and an edge
//! identity `Fn(&E) -> String`. Identities must be unique within one graph,
//! and the vertex identity must be consistent between the `node` element of a
//! vertex and the `source`/`target` attributes of the edges touching it.

use std::{collections::HashMap, fmt::Display, hash::Hash};

use crate::graph::VertexAndEdgeListGraph;

/// Uses the [`Display`] form of a value as its id.
pub fn display_identity<T: Display + ?Sized>(value: &T) -> String {
    value.to_string()
}

/// Names vertices by their position in the graph's enumeration order.
///
/// Vertices are matched by value, which lets edge endpoints (copies held by
/// the edges) resolve to the same id as the enumerated vertex. A vertex that
/// is not part of the graph gets an empty id.
#[derive(Debug)]
pub struct VertexIndexIdentity<'g, V> {
    index: HashMap<&'g V, usize>,
}

impl<'g, V: Hash + Eq> VertexIndexIdentity<'g, V> {
    /// Numbers the vertices of `graph`.
    pub fn new<G>(graph: &'g G) -> Self
    where
        G: VertexAndEdgeListGraph<Vertex = V>,
    {
        let mut index = HashMap::with_capacity(graph.vertex_count());
        for (position, vertex) in graph.vertices().enumerate() {
            index.entry(vertex).or_insert(position);
        }
        VertexIndexIdentity { index }
    }

    /// Returns the id of `vertex`.
    #[must_use]
    pub fn identity(&self, vertex: &V) -> String {
        self.index
            .get(vertex)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Names edges by their position in the graph's enumeration order.
///
/// Edges are matched by address, so the identity only knows the edge
/// references handed out by the graph it was built from. Any other reference
/// gets an empty id.
#[derive(Debug)]
pub struct EdgeIndexIdentity {
    index: HashMap<usize, usize>,
}

impl EdgeIndexIdentity {
    /// Numbers the edges of `graph`.
    pub fn new<G: VertexAndEdgeListGraph>(graph: &G) -> Self {
        let index = graph
            .edges()
            .enumerate()
            .map(|(position, edge)| (address(edge), position))
            .collect();
        EdgeIndexIdentity { index }
    }

    /// Returns the id of `edge`.
    #[must_use]
    pub fn identity<E>(&self, edge: &E) -> String {
        self.index
            .get(&address(edge))
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

fn address<E>(edge: &E) -> usize {
    edge as *const E as usize
}
