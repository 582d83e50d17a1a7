//! Shared fixtures for unit tests: a small road network with attributes on
//! vertices, edges and the graph itself.

use crate::{
    attributes::{GraphMlAttributes, Member, PropertyTable},
    graph::{AdjacencyGraph, EdgeEndpoints},
};

/// Vertex fixture. `Size` defaults to `0`, `Tags` is a nullable list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Town {
    pub name: String,
    pub size: i32,
    pub tags: Option<Vec<String>>,
}

impl Town {
    pub fn named(name: &str) -> Self {
        Town {
            name: name.to_string(),
            ..Town::default()
        }
    }
}

impl GraphMlAttributes for Town {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Size")
                    .getter(|t: &Town| t.size)
                    .setter(|t: &mut Town, v| t.size = v)
                    .attribute()
                    .default_value(0i32),
            )
            .add(
                Member::new("Tags")
                    .getter(|t: &Town| t.tags.clone())
                    .setter(|t: &mut Town, v| t.tags = v)
                    .attribute(),
            )
            .add(
                Member::new("Name")
                    .getter(|t: &Town| t.name.clone())
                    .setter(|t: &mut Town, v| t.name = v)
                    .attribute_named("name"),
            );
    }
}

/// Edge fixture. `Length` defaults to `1.0`, `Toll` to `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: String,
    pub source: Town,
    pub target: Town,
    pub length: f64,
    pub lanes: Vec<i32>,
    pub toll: bool,
}

impl Road {
    pub fn new(id: &str, source: Town, target: Town) -> Self {
        Road {
            id: id.to_string(),
            source,
            target,
            length: 1.0,
            lanes: Vec::new(),
            toll: false,
        }
    }
}

impl EdgeEndpoints<Town> for Road {
    fn source(&self) -> &Town {
        &self.source
    }

    fn target(&self) -> &Town {
        &self.target
    }
}

impl GraphMlAttributes for Road {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Length")
                    .getter(|r: &Road| r.length)
                    .setter(|r: &mut Road, v| r.length = v)
                    .attribute()
                    .default_value(1.0f64),
            )
            .add(
                Member::new("Lanes")
                    .getter(|r: &Road| r.lanes.clone())
                    .setter(|r: &mut Road, v| r.lanes = v)
                    .attribute(),
            )
            .add(
                Member::new("Toll")
                    .getter(|r: &Road| r.toll)
                    .setter(|r: &mut Road, v| r.toll = v)
                    .attribute()
                    .default_value(false),
            );
    }
}

/// Graph attribute fixture. `Revision` defaults to `1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub label: String,
    pub revision: i64,
}

impl GraphMlAttributes for Network {
    fn declare(properties: &mut PropertyTable<Self>) {
        properties
            .add(
                Member::new("Label")
                    .getter(|n: &Network| n.label.clone())
                    .setter(|n: &mut Network, v| n.label = v)
                    .attribute(),
            )
            .add(
                Member::new("Revision")
                    .getter(|n: &Network| n.revision)
                    .setter(|n: &mut Network, v| n.revision = v)
                    .attribute()
                    .default_value(1i64),
            );
    }
}

pub type RoadGraph = AdjacencyGraph<Town, Road, Network>;

// Helper function to create a three-town network with two roads
pub fn create_road_graph() -> RoadGraph {
    let mut graph = RoadGraph::with_attributes(
        true,
        true,
        Network {
            label: "valley".to_string(),
            revision: 3,
        },
    );

    let mut a = Town::named("a");
    a.size = 5;
    a.tags = Some(vec!["river".to_string(), "port".to_string()]);
    let b = Town::named("b");
    let mut c = Town::named("c");
    c.tags = Some(Vec::new());

    let mut ab = Road::new("r1", a, b.clone());
    ab.length = 2.5;
    ab.lanes = vec![1, 2];
    let mut bc = Road::new("r2", b, c);
    bc.toll = true;

    graph.add_vertices_and_edge(ab);
    graph.add_vertices_and_edge(bc);
    graph
}

// Helper function to name towns by their name
pub fn town_id(town: &Town) -> String {
    town.name.clone()
}

// Helper function to name roads by their id
pub fn road_id(road: &Road) -> String {
    road.id.clone()
}

// Helper function to rebuild a road from deserialized endpoints
pub fn create_road(source: &Town, target: &Town, id: &str) -> Road {
    Road::new(id, source.clone(), target.clone())
}
