use std::fmt;

use crate::{attributes::GraphMlAttributes, graph::EdgeEndpoints};

/// A plain edge between two vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<V> {
    source: V,
    target: V,
}

impl<V> Edge<V> {
    /// Creates an edge from `source` to `target`.
    #[must_use]
    pub fn new(source: V, target: V) -> Self {
        Edge { source, target }
    }

    /// Returns `true` if source and target are the same vertex.
    #[must_use]
    pub fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source == self.target
    }
}

impl<V> EdgeEndpoints<V> for Edge<V> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: 'static> GraphMlAttributes for Edge<V> {}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// An edge carrying a caller-defined tag.
///
/// The tag is not part of the GraphML output, declare attribute properties on
/// a dedicated edge type when the payload must be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    /// Creates an edge from `source` to `target` carrying `tag`.
    #[must_use]
    pub fn new(source: V, target: V, tag: T) -> Self {
        TaggedEdge {
            source,
            target,
            tag,
        }
    }

    /// The tag.
    #[must_use]
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Replaces the tag, returning the previous one.
    pub fn set_tag(&mut self, tag: T) -> T {
        std::mem::replace(&mut self.tag, tag)
    }
}

impl<V, T> EdgeEndpoints<V> for TaggedEdge<V, T> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: 'static, T: 'static> GraphMlAttributes for TaggedEdge<V, T> {}

impl<V: fmt::Display, T> fmt::Display for TaggedEdge<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}
