//! Integration tests for writing graphs and reading them back.
//!
//! These tests verify that:
//! - written documents have the expected shape (keys, graph, nodes, edges)
//! - default values are elided on write and restored on read
//! - nullable lists keep `null` and empty apart
//! - a read-then-write cycle reproduces the first document byte for byte

use graphml::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct Person {
    name: String,
    age: i32,
    nicknames: Option<Vec<String>>,
}

impl Person {
    fn named(name: &str) -> Self {
        Person {
            name: name.to_string(),
            ..Person::default()
        }
    }
}

impl GraphMlAttributes for Person {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Age")
                    .getter(|p: &Person| p.age)
                    .setter(|p: &mut Person, v| p.age = v)
                    .attribute()
                    .default_value(0i32),
            )
            .add(
                Member::new("Nicknames")
                    .getter(|p: &Person| p.nicknames.clone())
                    .setter(|p: &mut Person, v| p.nicknames = v)
                    .attribute(),
            );
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Link {
    id: String,
    source: Person,
    target: Person,
    weight: f64,
    hops: Vec<i32>,
}

impl EdgeEndpoints<Person> for Link {
    fn source(&self) -> &Person {
        &self.source
    }

    fn target(&self) -> &Person {
        &self.target
    }
}

impl GraphMlAttributes for Link {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Weight")
                    .getter(|l: &Link| l.weight)
                    .setter(|l: &mut Link, v| l.weight = v)
                    .attribute()
                    .default_value(1.0f64),
            )
            .add(
                Member::new("Hops")
                    .getter(|l: &Link| l.hops.clone())
                    .setter(|l: &mut Link, v| l.hops = v)
                    .attribute(),
            );
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Meta {
    title: String,
    archived: bool,
}

impl GraphMlAttributes for Meta {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Title")
                    .getter(|m: &Meta| m.title.clone())
                    .setter(|m: &mut Meta, v| m.title = v)
                    .attribute(),
            )
            .add(
                Member::new("Archived")
                    .getter(|m: &Meta| m.archived)
                    .setter(|m: &mut Meta, v| m.archived = v)
                    .attribute()
                    .default_value(false),
            );
    }
}

type People = AdjacencyGraph<Person, Link, Meta>;

fn person_id(person: &Person) -> String {
    person.name.clone()
}

fn link_id(link: &Link) -> String {
    link.id.clone()
}

fn create_link(source: &Person, target: &Person, id: &str) -> Link {
    Link {
        id: id.to_string(),
        source: source.clone(),
        target: target.clone(),
        weight: 0.0,
        hops: Vec::new(),
    }
}

/// Factory for a small social graph with every kind of attribute value.
fn create_people() -> People {
    let mut graph = People::with_attributes(
        true,
        true,
        Meta {
            title: "friends & <family>".to_string(),
            archived: false,
        },
    );

    let mut ann = Person::named("ann");
    ann.age = 41;
    ann.nicknames = Some(vec!["annie".to_string(), "a".to_string()]);
    let mut bob = Person::named("bob");
    bob.nicknames = Some(Vec::new());
    let cid = Person::named("cid");

    let mut first = create_link(&ann, &bob, "l1");
    first.weight = 0.25;
    first.hops = vec![3, 1, 4];
    let mut second = create_link(&bob, &cid, "l2");
    second.weight = 1.0;
    let mut third = create_link(&cid, &ann, "l3");
    third.weight = -2.5;

    graph.add_vertices_and_edge(first);
    graph.add_vertices_and_edge(second);
    graph.add_vertices_and_edge(third);
    graph
}

#[test]
fn empty_graph_has_no_children() {
    let graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
    let xml = graph
        .to_graphml_string(display_identity, |_| String::new())
        .unwrap();

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(
        r#"<graph id="G" edgedefault="directed" parse.nodes="0" parse.edges="0" parse.order="nodesfirst" parse.nodeids="free" parse.edgeids="free">"#
    ));
    assert!(!xml.contains("<node"));
    assert!(!xml.contains("<edge"));
    assert!(!xml.contains("<key"));
}

#[test]
fn two_vertices_one_edge() {
    let mut graph: AdjacencyGraph<String, TaggedEdge<String, String>> = AdjacencyGraph::new();
    graph.add_vertices_and_edge(TaggedEdge::new(
        "v1".to_string(),
        "v2".to_string(),
        "e1".to_string(),
    ));

    let xml = graph
        .to_graphml_string(display_identity, |e| e.tag().clone())
        .unwrap();
    assert!(xml.contains(r#"<edge id="e1" source="v1" target="v2">"#));

    let mut copy: AdjacencyGraph<String, TaggedEdge<String, String>> = AdjacencyGraph::new();
    copy.deserialize_graphml_str(
        &xml,
        |id| id.to_string(),
        |s, t, id| TaggedEdge::new(s.clone(), t.clone(), id.to_string()),
    )
    .unwrap();

    assert_eq!(copy.vertex_count(), 2);
    assert_eq!(copy.edge_count(), 1);
    let edge = copy.edges().next().unwrap();
    assert_eq!(edge.source(), "v1");
    assert_eq!(edge.target(), "v2");
    assert_eq!(edge.tag(), "e1");
}

#[test]
fn default_values_are_elided() {
    let mut graph: AdjacencyGraph<Person, Edge<Person>> = AdjacencyGraph::new();
    graph.add_vertex(Person::named("zero"));
    let xml = graph.to_graphml_string(person_id, |_| String::new()).unwrap();
    assert!(!xml.contains(r#"<data key="Age">"#));
    assert!(xml.contains(r#"<key id="Age" for="node" attr.name="Age" attr.type="int">"#));
    assert!(xml.contains("<default>0</default>"));

    let mut graph: AdjacencyGraph<Person, Edge<Person>> = AdjacencyGraph::new();
    let mut five = Person::named("five");
    five.age = 5;
    graph.add_vertex(five);
    let xml = graph.to_graphml_string(person_id, |_| String::new()).unwrap();
    assert_eq!(xml.matches(r#"<data key="Age">5</data>"#).count(), 1);
}

#[test]
fn defaults_are_restored_on_read() {
    let xml = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G" edgedefault="directed">
    <node id="x"/>
    <node id="y"/>
    <edge id="e" source="x" target="y"/>
  </graph>
</graphml>"#;

    let mut graph = People::new();
    graph
        .deserialize_graphml_str(
            xml,
            |id| {
                let mut person = Person::named(id);
                person.age = 99;
                person
            },
            create_link,
        )
        .unwrap();

    assert!(graph.vertices().all(|p| p.age == 0));
    assert!(graph.vertices().all(|p| p.nicknames.is_none()));
    let link = graph.edges().next().unwrap();
    assert_eq!(link.weight, 1.0);
    assert!(link.hops.is_empty());
    assert!(!graph.attributes().archived);
}

#[test]
fn null_and_empty_lists_stay_apart() {
    let mut graph: AdjacencyGraph<Person, Edge<Person>> = AdjacencyGraph::new();
    let mut empty = Person::named("empty");
    empty.nicknames = Some(Vec::new());
    graph.add_vertex(Person::named("none"));
    graph.add_vertex(empty);

    let xml = graph.to_graphml_string(person_id, |_| String::new()).unwrap();
    assert!(xml.contains(r#"<data key="Nicknames">null</data>"#));

    let mut copy: AdjacencyGraph<Person, Edge<Person>> = AdjacencyGraph::new();
    copy.deserialize_graphml_str(&xml, Person::named, |s, t, _| {
        Edge::new(s.clone(), t.clone())
    })
    .unwrap();

    let nicknames: Vec<_> = copy.vertices().map(|p| p.nicknames.clone()).collect();
    assert_eq!(nicknames, vec![None, Some(Vec::new())]);
}

#[test]
fn roundtrip_is_byte_identical() {
    let graph = create_people();
    let first = graph.to_graphml_string(person_id, link_id).unwrap();

    let mut copy = People::new();
    copy.deserialize_graphml_str(&first, Person::named, create_link)
        .unwrap();
    let second = copy.to_graphml_string(person_id, link_id).unwrap();

    assert_eq!(first, second);
    assert_eq!(copy.attributes(), graph.attributes());
    assert_eq!(copy.vertices().collect::<Vec<_>>(), graph.vertices().collect::<Vec<_>>());
    assert_eq!(copy.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
}

#[test]
fn roundtrip_through_file() {
    let dir = std::env::temp_dir().join(format!("graphml-roundtrip-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("people.graphml");

    let graph = create_people();
    graph.serialize_graphml_file(&path, person_id, link_id).unwrap();

    let mut copy = People::new();
    copy.deserialize_graphml_file(&path, Person::named, create_link)
        .unwrap();
    assert_eq!(copy.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());

    let file = graphml::File::from_file(&path).unwrap();
    assert_eq!(
        file.text().unwrap(),
        graph.to_graphml_string(person_id, link_id).unwrap()
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn compact_settings() {
    let graph = create_people();
    let serializer = GraphMlSerializer::with_settings(WriterSettings {
        graph_id: "people".to_string(),
        ..WriterSettings::compact()
    });
    let xml = serializer
        .serialize_to_string(&graph, person_id, link_id)
        .unwrap();

    assert!(!xml.contains('\n'));
    assert!(xml.starts_with("<graphml "));
    assert!(xml.contains(r#"<graph id="people" "#));

    let mut copy = People::new();
    copy.deserialize_graphml_str(&xml, Person::named, create_link)
        .unwrap();
    assert_eq!(copy.edge_count(), 3);
}

#[test]
fn index_identities() {
    let graph = create_people();
    let vertices = VertexIndexIdentity::new(&graph);
    let edges = EdgeIndexIdentity::new(&graph);

    let xml = graph
        .to_graphml_string(|v| vertices.identity(v), |e| edges.identity(e))
        .unwrap();
    assert!(xml.contains(r#"<node id="0">"#));
    assert!(xml.contains(r#"<edge id="2" source="2" target="0">"#));
}

#[test]
fn undirected_graphs() {
    let mut graph: AdjacencyGraph<i32, Edge<i32>> = AdjacencyGraph::undirected();
    graph.add_vertices_and_edge(Edge::new(1, 2));
    let xml = graph
        .to_graphml_string(display_identity, |_| String::new())
        .unwrap();
    assert!(xml.contains(r#"edgedefault="undirected""#));
}
