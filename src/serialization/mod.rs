//! GraphML document writing and reading.
//!
//! # Wire format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <key id="weight" for="edge" attr.name="weight" attr.type="double">
//!     <default>1</default>
//!   </key>
//!   <graph id="G" edgedefault="directed" parse.nodes="2" parse.edges="1"
//!          parse.order="nodesfirst" parse.nodeids="free" parse.edgeids="free">
//!     <node id="v1"></node>
//!     <node id="v2"></node>
//!     <edge id="0" source="v1" target="v2">
//!       <data key="weight">2.5</data>
//!     </edge>
//!   </graph>
//! </graphml>
//! ```
//!
//! Key ids equal the property names. Keys are declared for the graph
//! attributes first, then for vertices, then for edges. List properties are
//! declared as `string` and encoded as space-terminated tokens, see
//! [`crate::codec`].
//!
//! # Components
//!
//! - [`GraphMlSerializer`] streams a graph to a [`quick_xml::Writer`]
//! - [`GraphMlDeserializer`] fills a graph from a single forward pass over a
//!   [`quick_xml::NsReader`]
//! - [`SerializeGraphMlExt`] and [`DeserializeGraphMlExt`] put both on graphs
//! - [`WriterSettings`] and [`ValidationSettings`] configure them

mod extensions;
mod reader;
mod settings;
mod writer;

pub use extensions::{DeserializeGraphMlExt, SerializeGraphMlExt};
pub use reader::GraphMlDeserializer;
pub use settings::{ValidationSettings, WriterSettings};
pub use writer::{GraphMlSerializer, NoHooks, SerializationHooks};

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Element and attribute names of the GraphML vocabulary.
pub mod names {
    /// The GraphML namespace URI.
    pub const NAMESPACE: &str = "http://graphml.graphdrawing.org/xmlns";

    /// Root element.
    pub const GRAPHML: &str = "graphml";
    /// The `key` element, and the `key` attribute of `data`.
    pub const KEY: &str = "key";
    /// Default value child of `key`.
    pub const DEFAULT: &str = "default";
    /// Graph element.
    pub const GRAPH: &str = "graph";
    /// Node element.
    pub const NODE: &str = "node";
    /// Edge element.
    pub const EDGE: &str = "edge";
    /// Attribute value element.
    pub const DATA: &str = "data";
    /// Description element.
    pub const DESC: &str = "desc";

    /// `id` attribute.
    pub const ID: &str = "id";
    /// `for` attribute of `key`.
    pub const FOR: &str = "for";
    /// `attr.name` attribute of `key`.
    pub const ATTR_NAME: &str = "attr.name";
    /// `attr.type` attribute of `key`.
    pub const ATTR_TYPE: &str = "attr.type";
    /// `source` attribute of `edge`.
    pub const SOURCE: &str = "source";
    /// `target` attribute of `edge`.
    pub const TARGET: &str = "target";
    /// `edgedefault` attribute of `graph`.
    pub const EDGEDEFAULT: &str = "edgedefault";
    /// Node count hint.
    pub const PARSE_NODES: &str = "parse.nodes";
    /// Edge count hint.
    pub const PARSE_EDGES: &str = "parse.edges";
    /// Element order hint.
    pub const PARSE_ORDER: &str = "parse.order";
    /// Node id hint.
    pub const PARSE_NODEIDS: &str = "parse.nodeids";
    /// Edge id hint.
    pub const PARSE_EDGEIDS: &str = "parse.edgeids";

    /// `parse.order` value: all nodes precede all edges.
    pub const ORDER_NODES_FIRST: &str = "nodesfirst";
    /// `parse.nodeids` / `parse.edgeids` value: ids follow no pattern.
    pub const IDS_FREE: &str = "free";
}

/// Value of the `for` attribute of a `key` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum KeyTarget {
    /// Graph attribute.
    Graph,
    /// Vertex attribute.
    Node,
    /// Edge attribute.
    Edge,
}

/// Value of the `edgedefault` attribute of a `graph` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EdgeDefault {
    /// Edges are directed.
    Directed,
    /// Edges are undirected.
    Undirected,
}

impl EdgeDefault {
    /// Maps a directedness flag.
    #[must_use]
    pub fn from_directed(directed: bool) -> Self {
        if directed {
            EdgeDefault::Directed
        } else {
            EdgeDefault::Undirected
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn vocabulary_is_lowercase() {
        assert_eq!(<&str>::from(KeyTarget::Node), "node");
        assert_eq!(EdgeDefault::from_directed(false).to_string(), "undirected");
        assert_eq!(KeyTarget::from_str("edge").unwrap(), KeyTarget::Edge);
        assert!(EdgeDefault::from_str("mixed").is_err());
    }
}
