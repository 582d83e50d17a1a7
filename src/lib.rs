// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::type_complexity)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # graphml
//!
//! GraphML serialization and deserialization for generic in-memory graphs.
//!
//! Any graph that can enumerate its vertices and edges is written as a GraphML
//! document, and any graph that accepts vertices and edges is filled from one.
//! Vertex, edge and graph types describe their attributes once, by
//! implementing [`attributes::GraphMlAttributes`]. On first use, each type is
//! compiled into a cached [`compiler::TypeCodec`] of typed read and write
//! closures, so the per-instance work is a sequence of direct calls.
//!
//! ## Features
//!
//! - **Typed attributes** - `bool`, integers, floats, `String` and lists of them, with declared defaults
//! - **Compile once** - Attribute declarations are validated and compiled once per type, process-wide
//! - **Streaming** - Documents are written to and read from `quick-xml` in a single pass
//! - **Offline validation** - The GraphML DTD and schemas ship with the crate
//! - **Bring your own graph** - Small traits in [`graph`], plus the ready-made [`graph::AdjacencyGraph`]
//!
//! ## Quick Start
//!
//! ```rust
//! use graphml::prelude::*;
//!
//! #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
//! struct Station {
//!     name: String,
//!     platforms: i32,
//! }
//!
//! impl GraphMlAttributes for Station {
//!     fn declare(properties: &mut PropertyTable<Self>) {
//!         properties.add(
//!             Member::new("Platforms")
//!                 .getter(|s: &Station| s.platforms)
//!                 .setter(|s: &mut Station, v| s.platforms = v)
//!                 .attribute()
//!                 .default_value(1i32),
//!         );
//!     }
//! }
//!
//! let central = Station { name: "central".into(), platforms: 12 };
//! let harbor = Station { name: "harbor".into(), platforms: 1 };
//!
//! let mut graph: AdjacencyGraph<Station, Edge<Station>> = AdjacencyGraph::new();
//! graph.add_vertices_and_edge(Edge::new(central, harbor));
//!
//! let xml = graph.to_graphml_string(|s| s.name.clone(), |_| String::new())?;
//! assert!(xml.contains(r#"<data key="Platforms">12</data>"#));
//!
//! let mut copy: AdjacencyGraph<Station, Edge<Station>> = AdjacencyGraph::new();
//! copy.deserialize_graphml_str(
//!     &xml,
//!     |id| Station { name: id.to_string(), ..Station::default() },
//!     |s, t, _| Edge::new(s.clone(), t.clone()),
//! )?;
//! assert_eq!(copy.vertex_count(), 2);
//! assert_eq!(copy.vertices().map(|s| s.platforms).sum::<i32>(), 13);
//! # Ok::<(), graphml::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`attributes`] - Member declarations, property discovery and default validation
//! - [`codec`] - Text encoding of attribute values and the codec registry
//! - [`compiler`] - Per-type codec compilation and the process-wide cache
//! - [`graph`] - Graph traits, [`graph::AdjacencyGraph`] and identity helpers
//! - [`serialization`] - The GraphML writer and reader
//! - [`validation`] - Resolver, schema extraction and document validation
//! - [`file`] - Memory-mapped input files
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use graphml::{prelude::*, Error};
//!
//! let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
//! let result = graph.deserialize_graphml_str(
//!     "<nothing/>",
//!     |id| id.to_string(),
//!     |s, t, _| Edge::new(s.clone(), t.clone()),
//! );
//!
//! match result {
//!     Err(Error::GraphMlNotFound) => println!("not a GraphML document"),
//!     Err(Error::Configuration(e)) => println!("invalid attribute declarations: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//!     Ok(()) => println!("loaded"),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` when a type is compiled and when
//! a document is written, read or validated, `trace` for every element. No
//! subscriber is installed.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use graphml::prelude::*;
///
/// let mut graph: AdjacencyGraph<u32, Edge<u32>> = AdjacencyGraph::new();
/// graph.add_vertices_and_edge(Edge::new(1, 2));
/// let xml = graph.to_graphml_string(display_identity, |_| String::new())?;
/// assert!(xml.contains(r#"<edge id="" source="1" target="2">"#));
/// # Ok::<(), graphml::Error>(())
/// ```
pub mod prelude;

pub mod attributes;
pub mod codec;
pub mod compiler;
pub mod file;
pub mod graph;
pub mod serialization;
pub mod validation;

/// `graphml` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use graphml::{prelude::*, Result};
///
/// fn load(text: &str) -> Result<AdjacencyGraph<String, Edge<String>>> {
///     let mut graph = AdjacencyGraph::new();
///     graph.deserialize_graphml_str(text, |id| id.to_string(), |s, t, _| Edge::new(s.clone(), t.clone()))?;
///     Ok(graph)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `graphml` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use graphml::{Error, GraphMlDeserializer, graph::{AdjacencyGraph, Edge}};
///
/// let mut graph: AdjacencyGraph<String, Edge<String>> = AdjacencyGraph::new();
/// let result = GraphMlDeserializer::new().deserialize_from_str(
///     r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><graph><edge id="e" source="a" target="b"/></graph></graphml>"#,
///     &mut graph,
///     |id| id.to_string(),
///     |s, t, _| Edge::new(s.clone(), t.clone()),
/// );
///
/// match result {
///     Err(Error::VertexNotFound(id)) => assert_eq!(id, "a"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub use error::{ConfigurationError, Error};

/// Input backed by a memory-mapped file.
pub use file::File;

/// The GraphML writer and reader with their settings.
pub use serialization::{GraphMlDeserializer, GraphMlSerializer, ValidationSettings, WriterSettings};
