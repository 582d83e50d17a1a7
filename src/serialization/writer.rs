//! GraphML document writer.
//!
//! [`GraphMlSerializer::serialize`] streams one document in a fixed order:
//! declaration, root, key definitions (graph, node, edge), the `graph` element
//! with its own data, every vertex, every edge. Nothing is buffered beyond
//! what the underlying [`Writer`] does, the first failing write aborts the
//! document.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    attributes::GraphMlAttributes,
    compiler::{codec_for, TypeCodec},
    graph::{EdgeEndpoints, Graph, VertexAndEdgeListGraph},
    serialization::{names, EdgeDefault, KeyTarget, WriterSettings},
    Result,
};

/// Callbacks run after the compiled data of an element has been written.
///
/// Each callback may append its own content, e.g. a `desc` element or
/// foreign-namespace data, before the element is closed.
pub trait SerializationHooks<G: Graph> {
    /// Called inside `graph`, after the graph attributes.
    fn format_graph<W: Write>(&self, xml: &mut Writer<W>, graph: &G) -> Result<()> {
        let _ = (xml, graph);
        Ok(())
    }

    /// Called inside each `node`, after its data.
    fn format_vertex<W: Write>(&self, xml: &mut Writer<W>, vertex: &G::Vertex) -> Result<()> {
        let _ = (xml, vertex);
        Ok(())
    }

    /// Called inside each `edge`, after its data.
    fn format_edge<W: Write>(&self, xml: &mut Writer<W>, edge: &G::Edge) -> Result<()> {
        let _ = (xml, edge);
        Ok(())
    }
}

/// Hooks that add nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<G: Graph> SerializationHooks<G> for NoHooks {}

/// Writes graphs as GraphML documents.
///
/// # Examples
///
/// ```rust
/// use graphml::{
///     graph::{identity::display_identity, AdjacencyGraph, Edge, EdgeEndpoints},
///     GraphMlSerializer, WriterSettings,
/// };
///
/// let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
/// graph.add_vertices_and_edge(Edge::new("v1".to_string(), "v2".to_string()));
///
/// let xml = GraphMlSerializer::with_settings(WriterSettings::compact()).serialize_to_string(
///     &graph,
///     display_identity,
///     |e: &Edge<String>| format!("{}-{}", e.source(), e.target()),
/// )?;
/// assert!(xml.contains(r#"<edge id="v1-v2" source="v1" target="v2"></edge>"#));
/// # Ok::<(), graphml::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphMlSerializer<H = NoHooks> {
    settings: WriterSettings,
    hooks: H,
}

impl GraphMlSerializer<NoHooks> {
    /// Creates a serializer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(WriterSettings::default())
    }

    /// Creates a serializer with the given settings.
    #[must_use]
    pub fn with_settings(settings: WriterSettings) -> Self {
        GraphMlSerializer {
            settings,
            hooks: NoHooks,
        }
    }
}

impl<H> GraphMlSerializer<H> {
    /// Replaces the formatting hooks.
    #[must_use]
    pub fn with_hooks<N>(self, hooks: N) -> GraphMlSerializer<N> {
        GraphMlSerializer {
            settings: self.settings,
            hooks,
        }
    }

    /// The active settings.
    #[must_use]
    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// Writes `graph` as one complete document to `xml`.
    ///
    /// # Arguments
    /// * `xml` - Destination writer
    /// * `graph` - The graph to write
    /// * `vertex_identity` - Names a vertex, used for `node@id`, `edge@source` and `edge@target`
    /// * `edge_identity` - Names an edge, used for `edge@id`
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Configuration`] if a vertex, edge or graph attribute type has invalid declarations
    /// - [`crate::Error::Xml`] or [`crate::Error::FileError`] if writing fails
    pub fn serialize<G, W, FV, FE>(
        &self,
        xml: &mut Writer<W>,
        graph: &G,
        vertex_identity: FV,
        edge_identity: FE,
    ) -> Result<()>
    where
        G: VertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        H: SerializationHooks<G>,
        W: Write,
        FV: Fn(&G::Vertex) -> String,
        FE: Fn(&G::Edge) -> String,
    {
        let graph_codec = codec_for::<G::Attributes>()?;
        let vertex_codec = codec_for::<G::Vertex>()?;
        let edge_codec = codec_for::<G::Edge>()?;

        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();
        tracing::debug!(
            vertices = vertex_count,
            edges = edge_count,
            "serializing GraphML"
        );

        if self.settings.xml_declaration {
            xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let mut root = BytesStart::new(names::GRAPHML);
        root.push_attribute(("xmlns", names::NAMESPACE));
        xml.write_event(Event::Start(root))?;

        write_keys(xml, KeyTarget::Graph, &graph_codec)?;
        write_keys(xml, KeyTarget::Node, &vertex_codec)?;
        write_keys(xml, KeyTarget::Edge, &edge_codec)?;

        let vertex_count = vertex_count.to_string();
        let edge_count = edge_count.to_string();
        let mut element = BytesStart::new(names::GRAPH);
        element.push_attribute((names::ID, self.settings.graph_id.as_str()));
        let edgedefault: &str = EdgeDefault::from_directed(graph.is_directed()).into();
        element.push_attribute((names::EDGEDEFAULT, edgedefault));
        element.push_attribute((names::PARSE_NODES, vertex_count.as_str()));
        element.push_attribute((names::PARSE_EDGES, edge_count.as_str()));
        element.push_attribute((names::PARSE_ORDER, names::ORDER_NODES_FIRST));
        element.push_attribute((names::PARSE_NODEIDS, names::IDS_FREE));
        element.push_attribute((names::PARSE_EDGEIDS, names::IDS_FREE));
        xml.write_event(Event::Start(element))?;

        graph_codec.write_data(xml, graph.attributes())?;
        self.hooks.format_graph(xml, graph)?;

        for vertex in graph.vertices() {
            let id = vertex_identity(vertex);
            tracing::trace!(id = %id, "writing node");

            let mut element = BytesStart::new(names::NODE);
            element.push_attribute((names::ID, id.as_str()));
            xml.write_event(Event::Start(element))?;

            vertex_codec.write_data(xml, vertex)?;
            self.hooks.format_vertex(xml, vertex)?;

            xml.write_event(Event::End(BytesEnd::new(names::NODE)))?;
        }

        for edge in graph.edges() {
            let id = edge_identity(edge);
            let source = vertex_identity(edge.source());
            let target = vertex_identity(edge.target());
            tracing::trace!(id = %id, source = %source, target = %target, "writing edge");

            let mut element = BytesStart::new(names::EDGE);
            element.push_attribute((names::ID, id.as_str()));
            element.push_attribute((names::SOURCE, source.as_str()));
            element.push_attribute((names::TARGET, target.as_str()));
            xml.write_event(Event::Start(element))?;

            edge_codec.write_data(xml, edge)?;
            self.hooks.format_edge(xml, edge)?;

            xml.write_event(Event::End(BytesEnd::new(names::EDGE)))?;
        }

        xml.write_event(Event::End(BytesEnd::new(names::GRAPH)))?;
        xml.write_event(Event::End(BytesEnd::new(names::GRAPHML)))?;

        tracing::debug!("GraphML document complete");
        Ok(())
    }

    /// Writes `graph` to `out` and returns `out`.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    pub fn serialize_to_writer<G, W, FV, FE>(
        &self,
        out: W,
        graph: &G,
        vertex_identity: FV,
        edge_identity: FE,
    ) -> Result<W>
    where
        G: VertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        H: SerializationHooks<G>,
        W: Write,
        FV: Fn(&G::Vertex) -> String,
        FE: Fn(&G::Edge) -> String,
    {
        let mut xml = self.settings.create_writer(out);
        self.serialize(&mut xml, graph, vertex_identity, edge_identity)?;
        Ok(xml.into_inner())
    }

    /// Writes `graph` to a new file at `path`, replacing any existing file.
    ///
    /// The file is flushed and closed before returning, also on failure.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    pub fn serialize_to_file<G, FV, FE>(
        &self,
        path: impl AsRef<Path>,
        graph: &G,
        vertex_identity: FV,
        edge_identity: FE,
    ) -> Result<()>
    where
        G: VertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        H: SerializationHooks<G>,
        FV: Fn(&G::Vertex) -> String,
        FE: Fn(&G::Edge) -> String,
    {
        let file = fs::File::create(path)?;
        let mut out =
            self.serialize_to_writer(BufWriter::new(file), graph, vertex_identity, edge_identity)?;
        out.flush()?;
        Ok(())
    }

    /// Writes `graph` into a string.
    ///
    /// # Errors
    ///
    /// See [`GraphMlSerializer::serialize`].
    pub fn serialize_to_string<G, FV, FE>(
        &self,
        graph: &G,
        vertex_identity: FV,
        edge_identity: FE,
    ) -> Result<String>
    where
        G: VertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        H: SerializationHooks<G>,
        FV: Fn(&G::Vertex) -> String,
        FE: Fn(&G::Edge) -> String,
    {
        let bytes = self.serialize_to_writer(Vec::new(), graph, vertex_identity, edge_identity)?;
        String::from_utf8(bytes).map_err(|error| error.utf8_error().into())
    }
}

fn write_keys<T, W: Write>(xml: &mut Writer<W>, target: KeyTarget, codec: &TypeCodec<T>) -> Result<()> {
    for property in codec.properties() {
        let mut key = BytesStart::new(names::KEY);
        key.push_attribute((names::ID, property.name()));
        key.push_attribute((names::FOR, <&str>::from(target)));
        key.push_attribute((names::ATTR_NAME, property.name()));
        key.push_attribute((names::ATTR_TYPE, <&str>::from(property.kind().attr_type())));
        xml.write_event(Event::Start(key))?;

        if let Some(default) = property.default_text() {
            xml.write_event(Event::Start(BytesStart::new(names::DEFAULT)))?;
            xml.write_event(Event::Text(BytesText::new(default)))?;
            xml.write_event(Event::End(BytesEnd::new(names::DEFAULT)))?;
        }

        xml.write_event(Event::End(BytesEnd::new(names::KEY)))?;
    }

    Ok(())
}
