//! Validation of GraphML documents against the GraphML DTD and schemas.
//!
//! Used by the "deserialize and validate" entry points of
//! [`crate::GraphMlDeserializer`]. The schema set is loaded through an
//! [`XmlResolver`], so documents can be validated offline against the
//! embedded copies or against any other schema set a custom resolver serves.
//!
//! # Key Components
//!
//! - [`XmlResolver`] - Maps DTD system ids and schema locations to content
//! - [`GraphMlXmlResolver`] - Serves the embedded GraphML documents
//! - [`NullXmlResolver`] - Resolves nothing
//! - [`Schema`] - Declarations extracted from a schema document set
//! - [`Validator`] - Single-pass structural document check
//!
//! # Examples
//!
//! ```rust
//! use graphml::{
//!     validation::{GraphMlXmlResolver, Validator},
//!     ValidationSettings,
//! };
//!
//! let resolver = GraphMlXmlResolver::new();
//! let settings = ValidationSettings::default();
//! let validator = Validator::new(&resolver, &settings)?;
//!
//! let document = br#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <graph edgedefault="sideways"/>
//! </graphml>"#;
//! assert!(validator.validate(document).is_err());
//! # Ok::<(), graphml::Error>(())
//! ```

mod resolver;
mod schema;
mod validator;

pub use resolver::{GraphMlXmlResolver, NullXmlResolver, XmlResolver};
pub use schema::{ElementDecl, IdentityKey, IdentityKeyRef, Schema, SimpleType, LexicalSpace};
pub use validator::Validator;
