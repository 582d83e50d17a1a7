//! Adjacency-list graph.
//!
//! [`AdjacencyGraph`] stores vertices and edges in insertion order, which makes
//! GraphML output deterministic, and keeps a per-vertex list of outgoing edge
//! indices. Vertices are their own keys: a hash index maps each vertex value
//! to its position, so edges name their endpoints by value.

use std::{collections::HashMap, hash::Hash};

use crate::{
    graph::{
        EdgeEndpoints, EdgeId, Graph, MutableVertexAndEdgeListGraph, VertexAndEdgeListGraph,
        VertexId,
    },
    Error, Result,
};

/// A graph over hashable vertices with an attribute payload `A`.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<V, E, A = ()> {
    vertices: Vec<V>,
    index: HashMap<V, VertexId>,
    edges: Vec<E>,
    out_edges: Vec<Vec<EdgeId>>,
    directed: bool,
    allow_parallel_edges: bool,
    attributes: A,
}

impl<V, E, A> Default for AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
    A: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, A> AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
    A: Default,
{
    /// Creates an empty directed graph that allows parallel edges.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(true, true)
    }

    /// Creates an empty undirected graph that allows parallel edges.
    #[must_use]
    pub fn undirected() -> Self {
        Self::with_settings(false, true)
    }

    /// Creates an empty graph.
    #[must_use]
    pub fn with_settings(directed: bool, allow_parallel_edges: bool) -> Self {
        Self::with_attributes(directed, allow_parallel_edges, A::default())
    }
}

impl<V, E, A> AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
{
    /// Creates an empty graph carrying `attributes`.
    #[must_use]
    pub fn with_attributes(directed: bool, allow_parallel_edges: bool, attributes: A) -> Self {
        AdjacencyGraph {
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            out_edges: Vec::new(),
            directed,
            allow_parallel_edges,
            attributes,
        }
    }

    /// Returns `true` if parallel edges are accepted.
    #[must_use]
    pub fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds `vertex` and returns its id, or the id it already had.
    pub fn insert_vertex(&mut self, vertex: V) -> VertexId {
        if let Some(&id) = self.index.get(&vertex) {
            return id;
        }

        let id = VertexId(self.vertices.len());
        self.index.insert(vertex.clone(), id);
        self.vertices.push(vertex);
        self.out_edges.push(Vec::new());
        id
    }

    /// Adds `edge`, adding its endpoints first when they are missing.
    ///
    /// Returns the new edge id, or `None` if the edge is parallel to an
    /// existing one and parallel edges are suppressed.
    pub fn add_vertices_and_edge(&mut self, edge: E) -> Option<EdgeId> {
        let source = self.insert_vertex(edge.source().clone());
        let target = self.insert_vertex(edge.target().clone());
        self.push_edge(source, target, edge)
    }

    fn push_edge(&mut self, source: VertexId, target: VertexId, edge: E) -> Option<EdgeId> {
        if !self.allow_parallel_edges && self.connects(source, target) {
            return None;
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        self.out_edges[source.0].push(id);
        if !self.directed && source != target {
            self.out_edges[target.0].push(id);
        }
        Some(id)
    }

    fn connects(&self, source: VertexId, target: VertexId) -> bool {
        self.out_edges[source.0].iter().any(|id| {
            let edge = &self.edges[id.0];
            let (s, t) = (&self.index[edge.source()], &self.index[edge.target()]);
            (*s == source && *t == target) || (!self.directed && *s == target && *t == source)
        })
    }

    /// Returns `true` if `vertex` is part of the graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Returns `true` if an edge connects `source` to `target`.
    ///
    /// In undirected graphs either orientation matches.
    #[must_use]
    pub fn contains_edge(&self, source: &V, target: &V) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&s), Some(&t)) => self.connects(s, t),
            _ => false,
        }
    }

    /// Returns the id of `vertex`.
    #[must_use]
    pub fn vertex_id(&self, vertex: &V) -> Option<VertexId> {
        self.index.get(vertex).copied()
    }

    /// Returns the vertex with the given id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.vertices.get(id.0)
    }

    /// Returns the edge with the given id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.edges.get(id.0)
    }

    /// Iterates the edges leaving `vertex`, or touching it in undirected graphs.
    pub fn out_edges(&self, vertex: &V) -> impl Iterator<Item = &E> + '_ {
        let ids = self
            .index
            .get(vertex)
            .map_or(&[][..], |id| self.out_edges[id.0].as_slice());
        ids.iter().map(|id| &self.edges[id.0])
    }

    /// Number of edges in [`AdjacencyGraph::out_edges`].
    #[must_use]
    pub fn out_degree(&self, vertex: &V) -> usize {
        self.index
            .get(vertex)
            .map_or(0, |id| self.out_edges[id.0].len())
    }
}

impl<V, E, A> Graph for AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
{
    type Vertex = V;
    type Edge = E;
    type Attributes = A;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn attributes(&self) -> &A {
        &self.attributes
    }
}

impl<V, E, A> VertexAndEdgeListGraph for AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
{
    fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.iter()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<V, E, A> MutableVertexAndEdgeListGraph for AdjacencyGraph<V, E, A>
where
    V: Hash + Eq + Clone,
    E: EdgeEndpoints<V>,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        let before = self.vertices.len();
        self.insert_vertex(vertex);
        self.vertices.len() > before
    }

    fn add_edge(&mut self, edge: E) -> Result<bool> {
        let (Some(&source), Some(&target)) =
            (self.index.get(edge.source()), self.index.get(edge.target()))
        else {
            return Err(Error::GraphError(
                "edge endpoint is not a vertex of the graph".to_string(),
            ));
        };

        Ok(self.push_edge(source, target, edge).is_some())
    }

    fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }
}
