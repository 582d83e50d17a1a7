//! GraphML document reader.
//!
//! Deserialization is a single forward pass over the XML events, driven by
//! [`ReaderState`]:
//!
//! 1. `SeekGraphMlRoot` skips everything up to the `graphml` element and
//!    records its namespace
//! 2. `SeekGraphElement` skips `key` definitions and other content up to the
//!    first `graph` element in that namespace
//! 3. `StreamChildren` applies the graph defaults, then dispatches every
//!    `node`, `edge` and `data` child of `graph`
//! 4. `Done` drains the remaining input
//!
//! Vertices are remembered by id in a table that lives for one call, edges
//! resolve their endpoints against it. Vertices and edges added before a
//! failure stay in the target graph.

use std::{collections::HashMap, io::BufRead, path::Path};

use quick_xml::{
    events::{BytesStart, Event},
    name::ResolveResult,
    NsReader,
};

use crate::{
    attributes::GraphMlAttributes,
    compiler::{codec_for, TypeCodec},
    file::File,
    graph::MutableVertexAndEdgeListGraph,
    serialization::{names, ValidationSettings},
    validation::{GraphMlXmlResolver, Validator, XmlResolver},
    Error, Result,
};

/// Position of the reader within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    SeekGraphMlRoot,
    SeekGraphElement,
    StreamChildren,
    Done,
}

/// One XML event, detached from the reader's buffers.
enum XmlEvent {
    Start {
        element: BytesStart<'static>,
        namespace: Option<Vec<u8>>,
        empty: bool,
    },
    End,
    Text(String),
    Eof,
    Other,
}

/// Pulls owned events from an [`NsReader`].
struct EventStream<'r, B> {
    reader: &'r mut NsReader<B>,
    buf: Vec<u8>,
    skip: Vec<u8>,
}

impl<'r, B: BufRead> EventStream<'r, B> {
    fn new(reader: &'r mut NsReader<B>) -> Self {
        EventStream {
            reader,
            buf: Vec::new(),
            skip: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<XmlEvent> {
        self.buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;

        let namespace = match resolved {
            ResolveResult::Bound(namespace) => Some(namespace.as_ref().to_vec()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(malformed_error!(
                    "undeclared namespace prefix '{}'",
                    String::from_utf8_lossy(&prefix)
                ))
            }
        };

        Ok(match event {
            Event::Start(element) => XmlEvent::Start {
                element: element.into_owned(),
                namespace,
                empty: false,
            },
            Event::Empty(element) => XmlEvent::Start {
                element: element.into_owned(),
                namespace,
                empty: true,
            },
            Event::End(_) => XmlEvent::End,
            Event::Text(text) => XmlEvent::Text(text.unescape()?.into_owned()),
            Event::CData(data) => {
                XmlEvent::Text(std::str::from_utf8(&data.into_inner())?.to_string())
            }
            Event::Eof => XmlEvent::Eof,
            _ => XmlEvent::Other,
        })
    }

    /// Consumes the content and the end tag of a started element.
    ///
    /// Every event goes through namespace resolution, so the scopes declared
    /// inside the skipped subtree are closed again with their elements.
    fn skip(&mut self) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            self.skip.clear();
            let (_, event) = self.reader.read_resolved_event_into(&mut self.skip)?;
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(malformed_error!("document ends inside a skipped element")),
                _ => {}
            }
        }
        Ok(())
    }

    /// Collects the character data of a started element up to its end tag.
    ///
    /// Nested elements are skipped, their text is not part of the value.
    fn text(&mut self, empty: bool) -> Result<String> {
        let mut text = String::new();
        if empty {
            return Ok(text);
        }

        loop {
            match self.next()? {
                XmlEvent::Text(chunk) => text.push_str(&chunk),
                XmlEvent::Start { empty: false, .. } => self.skip()?,
                XmlEvent::End => return Ok(text),
                XmlEvent::Eof => return Err(malformed_error!("document ends inside a data element")),
                XmlEvent::Start { .. } | XmlEvent::Other => {}
            }
        }
    }
}

fn local_name(element: &BytesStart<'_>) -> Result<String> {
    Ok(std::str::from_utf8(element.local_name().as_ref())?.to_string())
}

fn required_attribute(
    element: &BytesStart<'_>,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<String> {
    match element.try_get_attribute(attribute)? {
        Some(value) => Ok(value.unescape_value()?.into_owned()),
        None => Err(Error::MissingAttribute {
            element: element_name,
            attribute,
        }),
    }
}

/// Reads the `data` children of a `node` or `edge` into `instance`.
fn read_children<B: BufRead, T>(
    events: &mut EventStream<'_, B>,
    namespace: Option<&[u8]>,
    codec: &TypeCodec<T>,
    instance: &mut T,
    element_name: &'static str,
) -> Result<()> {
    loop {
        match events.next()? {
            XmlEvent::Start {
                element,
                namespace: ns,
                empty,
            } => {
                if ns.as_deref() == namespace && element.local_name().as_ref() == names::DATA.as_bytes() {
                    let key = required_attribute(&element, names::DATA, names::KEY)?;
                    let text = events.text(empty)?;
                    codec.read_data(&key, &text, instance)?;
                } else if !empty {
                    events.skip()?;
                }
            }
            XmlEvent::End => return Ok(()),
            XmlEvent::Eof => {
                return Err(malformed_error!(
                    "document ends inside a {} element",
                    element_name
                ))
            }
            XmlEvent::Text(_) | XmlEvent::Other => {}
        }
    }
}

/// Reads GraphML documents into graphs.
///
/// # Examples
///
/// ```rust
/// use graphml::{
///     graph::{AdjacencyGraph, Edge, VertexAndEdgeListGraph},
///     GraphMlDeserializer,
/// };
///
/// let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
///   <graph id="G" edgedefault="directed">
///     <node id="v1"/>
///     <node id="v2"/>
///     <edge id="e1" source="v1" target="v2"/>
///   </graph>
/// </graphml>"#;
///
/// let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
/// GraphMlDeserializer::new().deserialize_from_str(
///     xml,
///     &mut graph,
///     |id| id.to_string(),
///     |s, t, _| Edge::new(s.clone(), t.clone()),
/// )?;
///
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), graphml::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphMlDeserializer<R = GraphMlXmlResolver> {
    settings: ValidationSettings,
    resolver: R,
}

impl GraphMlDeserializer<GraphMlXmlResolver> {
    /// Creates a deserializer validating against the embedded GraphML schemas.
    #[must_use]
    pub fn new() -> Self {
        GraphMlDeserializer {
            settings: ValidationSettings::default(),
            resolver: GraphMlXmlResolver::new(),
        }
    }
}

impl<R: XmlResolver> GraphMlDeserializer<R> {
    /// Creates a deserializer with a custom resolver and settings for the
    /// validating entry points.
    #[must_use]
    pub fn with_resolver(resolver: R, settings: ValidationSettings) -> Self {
        GraphMlDeserializer { settings, resolver }
    }

    /// The validation settings.
    #[must_use]
    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Reads one document from `reader` into `graph`.
    ///
    /// # Arguments
    /// * `reader` - Namespace-aware XML reader positioned before the `graphml` element
    /// * `graph` - Target graph, its attribute payload receives the graph data
    /// * `vertex_factory` - Creates a vertex from a `node` id
    /// * `edge_factory` - Creates an edge from its endpoints and its `edge` id
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if a vertex, edge or graph attribute type has invalid declarations
    /// - [`Error::GraphMlNotFound`] / [`Error::GraphNotFound`] if the document lacks the root or the graph
    /// - [`Error::MissingAttribute`] if a `node`, `edge` or `data` lacks a required attribute
    /// - [`Error::VertexNotFound`] if an edge references an id no earlier `node` declared
    /// - [`Error::UnknownAttributeKey`] if a `data` key matches no property of its owner
    /// - [`Error::InvalidReaderPosition`] if `graph` contains another element
    /// - [`Error::Malformed`] if a value does not parse
    /// - [`Error::Xml`] if the document is not well-formed
    pub fn deserialize<G, B, FV, FE>(
        &self,
        reader: &mut NsReader<B>,
        graph: &mut G,
        mut vertex_factory: FV,
        mut edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        B: BufRead,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        let graph_codec = codec_for::<G::Attributes>()?;
        let vertex_codec = codec_for::<G::Vertex>()?;
        let edge_codec = codec_for::<G::Edge>()?;

        tracing::debug!("deserializing GraphML");

        let mut events = EventStream::new(reader);
        let mut namespace: Option<Vec<u8>> = None;
        let mut vertices: HashMap<String, G::Vertex> = HashMap::new();
        let mut edge_count = 0usize;
        let mut state = ReaderState::SeekGraphMlRoot;

        while state != ReaderState::Done {
            state = match state {
                ReaderState::SeekGraphMlRoot => loop {
                    match events.next()? {
                        XmlEvent::Start {
                            element,
                            namespace: ns,
                            empty,
                        } if element.local_name().as_ref() == names::GRAPHML.as_bytes() => {
                            if empty {
                                return Err(Error::GraphNotFound);
                            }
                            namespace = ns;
                            break ReaderState::SeekGraphElement;
                        }
                        XmlEvent::Eof => return Err(Error::GraphMlNotFound),
                        _ => {}
                    }
                },
                ReaderState::SeekGraphElement => loop {
                    match events.next()? {
                        XmlEvent::Start {
                            element,
                            namespace: ns,
                            empty,
                        } if ns == namespace
                            && element.local_name().as_ref() == names::GRAPH.as_bytes() =>
                        {
                            graph_codec.apply_defaults(graph.attributes_mut());
                            break if empty {
                                ReaderState::Done
                            } else {
                                ReaderState::StreamChildren
                            };
                        }
                        XmlEvent::Eof => return Err(Error::GraphNotFound),
                        _ => {}
                    }
                },
                ReaderState::StreamChildren => loop {
                    let (element, empty) = match events.next()? {
                        XmlEvent::Start {
                            element,
                            namespace: ns,
                            empty,
                        } => {
                            if ns != namespace {
                                if !empty {
                                    events.skip()?;
                                }
                                continue;
                            }
                            (element, empty)
                        }
                        XmlEvent::End | XmlEvent::Eof => break ReaderState::Done,
                        XmlEvent::Text(_) | XmlEvent::Other => continue,
                    };

                    let name = local_name(&element)?;
                    match name.as_str() {
                        names::NODE => {
                            let id = required_attribute(&element, names::NODE, names::ID)?;
                            tracing::trace!(id = %id, "reading node");

                            let mut vertex = vertex_factory(&id);
                            vertex_codec.apply_defaults(&mut vertex);
                            if !empty {
                                read_children(
                                    &mut events,
                                    namespace.as_deref(),
                                    &vertex_codec,
                                    &mut vertex,
                                    names::NODE,
                                )?;
                            }

                            graph.add_vertex(vertex.clone());
                            vertices.insert(id, vertex);
                        }
                        names::EDGE => {
                            let id = required_attribute(&element, names::EDGE, names::ID)?;
                            let source = required_attribute(&element, names::EDGE, names::SOURCE)?;
                            let target = required_attribute(&element, names::EDGE, names::TARGET)?;
                            tracing::trace!(id = %id, source = %source, target = %target, "reading edge");

                            let source_vertex = vertices
                                .get(&source)
                                .ok_or_else(|| Error::VertexNotFound(source.clone()))?;
                            let target_vertex = vertices
                                .get(&target)
                                .ok_or_else(|| Error::VertexNotFound(target.clone()))?;

                            let mut edge = edge_factory(source_vertex, target_vertex, &id);
                            edge_codec.apply_defaults(&mut edge);
                            if !empty {
                                read_children(
                                    &mut events,
                                    namespace.as_deref(),
                                    &edge_codec,
                                    &mut edge,
                                    names::EDGE,
                                )?;
                            }

                            graph.add_edge(edge)?;
                            edge_count += 1;
                        }
                        names::DATA => {
                            let key = required_attribute(&element, names::DATA, names::KEY)?;
                            let text = events.text(empty)?;
                            graph_codec.read_data(&key, &text, graph.attributes_mut())?;
                        }
                        _ => return Err(Error::InvalidReaderPosition(name)),
                    }
                },
                ReaderState::Done => ReaderState::Done,
            };
        }

        while !matches!(events.next()?, XmlEvent::Eof) {}

        tracing::debug!(
            vertices = vertices.len(),
            edges = edge_count,
            "GraphML document read"
        );
        Ok(())
    }

    /// Reads one document from a buffered byte source.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize`].
    pub fn deserialize_from_reader<G, B, FV, FE>(
        &self,
        input: B,
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        B: BufRead,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        let mut reader = NsReader::from_reader(input);
        self.deserialize(&mut reader, graph, vertex_factory, edge_factory)
    }

    /// Reads one document from a string.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize`].
    pub fn deserialize_from_str<G, FV, FE>(
        &self,
        text: &str,
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        self.deserialize_from_reader(text.as_bytes(), graph, vertex_factory, edge_factory)
    }

    /// Reads one document from a byte slice.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize`].
    pub fn deserialize_from_bytes<G, FV, FE>(
        &self,
        data: &[u8],
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        self.deserialize_from_reader(data, graph, vertex_factory, edge_factory)
    }

    /// Reads one document from the file at `path`.
    ///
    /// An empty file reports [`Error::GraphMlNotFound`], like any other input
    /// without a root element.
    ///
    /// # Errors
    ///
    /// [`Error::FileError`] if the file cannot be opened, [`Error::Utf8`] if it
    /// is not UTF-8 text, otherwise see [`GraphMlDeserializer::deserialize`].
    pub fn deserialize_from_file<G, FV, FE>(
        &self,
        path: impl AsRef<Path>,
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        let file = open(path)?;
        self.deserialize_from_str(file.text()?, graph, vertex_factory, edge_factory)
    }

    /// Validates `data` against the GraphML DTD and schemas, then reads it.
    ///
    /// Nothing is added to `graph` when validation fails.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for the first violation found, otherwise see
    /// [`GraphMlDeserializer::deserialize`].
    pub fn deserialize_and_validate<G, FV, FE>(
        &self,
        data: &[u8],
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        Validator::new(&self.resolver, &self.settings)?.validate(data)?;
        self.deserialize_from_bytes(data, graph, vertex_factory, edge_factory)
    }

    /// Validates and reads the file at `path`.
    ///
    /// # Errors
    ///
    /// See [`GraphMlDeserializer::deserialize_and_validate`].
    pub fn deserialize_and_validate_file<G, FV, FE>(
        &self,
        path: impl AsRef<Path>,
        graph: &mut G,
        vertex_factory: FV,
        edge_factory: FE,
    ) -> Result<()>
    where
        G: MutableVertexAndEdgeListGraph,
        G::Vertex: GraphMlAttributes + Clone,
        G::Edge: GraphMlAttributes,
        G::Attributes: GraphMlAttributes,
        FV: FnMut(&str) -> G::Vertex,
        FE: FnMut(&G::Vertex, &G::Vertex, &str) -> G::Edge,
    {
        let file = open(path)?;
        self.deserialize_and_validate(file.text()?.as_bytes(), graph, vertex_factory, edge_factory)
    }
}

fn open(path: impl AsRef<Path>) -> Result<File> {
    match File::from_file(path) {
        Err(Error::Empty) => Err(Error::GraphMlNotFound),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{AdjacencyGraph, Edge, Graph, VertexAndEdgeListGraph},
        test::{create_road, Road, RoadGraph, Town},
    };

    type Plain = AdjacencyGraph<String, Edge<String>>;

    fn read_plain(xml: &str, graph: &mut Plain) -> Result<()> {
        GraphMlDeserializer::new().deserialize_from_str(
            xml,
            graph,
            |id| id.to_string(),
            |s, t, _| Edge::new(s.clone(), t.clone()),
        )
    }

    fn read_roads(xml: &str, graph: &mut RoadGraph) -> Result<()> {
        GraphMlDeserializer::new().deserialize_from_str(xml, graph, Town::named, create_road)
    }

    #[test]
    fn missing_root() {
        let mut graph = Plain::new();
        assert!(matches!(
            read_plain("<root><graph/></root>", &mut graph),
            Err(Error::GraphMlNotFound)
        ));
        assert!(matches!(read_plain("", &mut graph), Err(Error::GraphMlNotFound)));
    }

    #[test]
    fn missing_graph() {
        let mut graph = Plain::new();
        assert!(matches!(
            read_plain("<graphml><key id=\"k\"/></graphml>", &mut graph),
            Err(Error::GraphNotFound)
        ));
        assert!(matches!(read_plain("<graphml/>", &mut graph), Err(Error::GraphNotFound)));
    }

    #[test]
    fn graph_must_share_root_namespace() {
        let mut graph = Plain::new();
        let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
            <g:graph xmlns:g="urn:other"/>
        </graphml>"#;
        assert!(matches!(read_plain(xml, &mut graph), Err(Error::GraphNotFound)));
    }

    #[test]
    fn dangling_source() {
        let mut graph = Plain::new();
        let xml = r#"<graphml><graph>
            <node id="a"/>
            <edge id="e" source="ghost" target="a"/>
        </graph></graphml>"#;

        match read_plain(xml, &mut graph) {
            Err(Error::VertexNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("Expected VertexNotFound, got {:?}", other),
        }
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn required_attributes() {
        let mut graph = Plain::new();
        assert!(matches!(
            read_plain("<graphml><graph><node/></graph></graphml>", &mut graph),
            Err(Error::MissingAttribute {
                element: "node",
                attribute: "id"
            })
        ));

        let xml = r#"<graphml><graph><node id="a"/><edge id="e" source="a"/></graph></graphml>"#;
        assert!(matches!(
            read_plain(xml, &mut graph),
            Err(Error::MissingAttribute {
                element: "edge",
                attribute: "target"
            })
        ));
    }

    #[test]
    fn unexpected_graph_child() {
        let mut graph = Plain::new();
        let xml = "<graphml><graph><hyperedge/></graph></graphml>";
        match read_plain(xml, &mut graph) {
            Err(Error::InvalidReaderPosition(name)) => assert_eq!(name, "hyperedge"),
            other => panic!("Expected InvalidReaderPosition, got {:?}", other),
        }
    }

    #[test]
    fn unknown_key_is_fatal() {
        let mut graph = RoadGraph::new();
        let xml = r#"<graphml><graph>
            <node id="a"><data key="zzz">1</data></node>
        </graph></graphml>"#;
        assert!(matches!(
            read_roads(xml, &mut graph),
            Err(Error::UnknownAttributeKey { .. })
        ));
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn data_and_defaults() {
        let mut graph = RoadGraph::new();
        let xml = r#"<?xml version="1.0"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="Size" for="node" attr.name="Size" attr.type="int"><default>0</default></key>
  <graph id="G" edgedefault="directed">
    <data key="Label">hills &amp; dales</data>
    <node id="a">
      <data key="Size">12</data>
      <data key="Tags">north <![CDATA[east]]> </data>
      <desc>ignored</desc>
    </node>
    <node id="b"><data key="Tags">null</data></node>
    <edge id="r1" source="a" target="b">
      <data key="Lanes">3 4 </data>
    </edge>
  </graph>
</graphml>"#;

        read_roads(xml, &mut graph).unwrap();

        assert_eq!(graph.attributes().label, "hills & dales");
        assert_eq!(graph.attributes().revision, 1);

        let towns: Vec<&Town> = graph.vertices().collect();
        assert_eq!(towns[0].name, "a");
        assert_eq!(towns[0].size, 12);
        assert_eq!(
            towns[0].tags,
            Some(vec!["north".to_string(), "east".to_string()])
        );
        assert_eq!(towns[1].size, 0);
        assert_eq!(towns[1].tags, None);

        let roads: Vec<&Road> = graph.edges().collect();
        assert_eq!(roads[0].id, "r1");
        assert_eq!(roads[0].length, 1.0);
        assert_eq!(roads[0].lanes, vec![3, 4]);
        assert_eq!(roads[0].source.size, 12);
    }

    #[test]
    fn foreign_elements_are_skipped() {
        let mut graph = Plain::new();
        let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="urn:y">
            <graph>
                <y:layout><node id="not-a-node"/></y:layout>
                <node id="a"/>
            </graph>
            <trailing/>
        </graphml>"#;

        read_plain(xml, &mut graph).unwrap();
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn skipped_namespace_scope_is_closed() {
        let mut graph = Plain::new();
        let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
            <graph>
                <y:ext xmlns:y="urn:y" xmlns="urn:other">text<inner/><deep><node id="x"/></deep></y:ext>
                <node id="a"/>
                <node id="b"/>
                <edge id="e" source="a" target="b"/>
            </graph>
        </graphml>"#;

        read_plain(xml, &mut graph).unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn data_after_foreign_element_in_node() {
        let mut graph = RoadGraph::new();
        let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
            <graph>
                <node id="a">
                    <ext xmlns="urn:other"><data key="Size">1</data></ext>
                    <data key="Size">7<note xmlns="urn:other">x</note></data>
                </node>
                <node id="b"><data key="Size">3</data></node>
            </graph>
        </graphml>"#;

        read_roads(xml, &mut graph).unwrap();
        let sizes: Vec<i32> = graph.vertices().map(|t| t.size).collect();
        assert_eq!(sizes, vec![7, 3]);
    }

    #[test]
    fn unterminated_skipped_element() {
        let mut graph = Plain::new();
        let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><graph><y:ext xmlns:y="urn:y">"#;
        assert!(read_plain(xml, &mut graph).is_err());
    }

    #[test]
    fn bad_value_names_property() {
        let mut graph = RoadGraph::new();
        let xml = r#"<graphml><graph><node id="a"><data key="Size">big</data></node></graph></graphml>"#;
        match read_roads(xml, &mut graph) {
            Err(Error::Malformed { message, .. }) => assert!(message.starts_with("Size: ")),
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }
}
