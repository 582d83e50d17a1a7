//! Attribute property declarations.
//!
//! A vertex, edge or graph-attribute type takes part in GraphML serialization
//! by implementing [`GraphMlAttributes`]. Its `declare` function fills a
//! [`PropertyTable`] with the type's public members, in declaration order.
//! Only members carrying the serializable marker ([`Member::attribute`] or
//! [`Member::attribute_named`]) become attribute properties.
//!
//! The declarations are not trusted: they are validated when the type is first
//! compiled into a [`crate::compiler::TypeCodec`], using the same rules the
//! compiler applies to every type:
//!
//! - a marked member needs both a getter and a setter ([`discover`])
//! - a declared default must be non-null, of exactly the member's type, and is
//!   not allowed on list-shaped members ([`default`])
//! - the member type needs a registered codec ([`crate::codec`])
//!
//! # Examples
//!
//! ```rust
//! use graphml::attributes::{GraphMlAttributes, Member, PropertyTable};
//!
//! #[derive(Default)]
//! struct City {
//!     name: String,
//!     population: i64,
//!     capital: bool,
//!     cache_slot: usize,
//! }
//!
//! impl GraphMlAttributes for City {
//!     fn declare(properties: &mut PropertyTable<Self>) {
//!         properties
//!             .add(
//!                 Member::new("Name")
//!                     .getter(|c: &City| c.name.clone())
//!                     .setter(|c: &mut City, v| c.name = v)
//!                     .attribute_named("name"),
//!             )
//!             .add(
//!                 Member::new("Population")
//!                     .getter(|c: &City| c.population)
//!                     .setter(|c: &mut City, v| c.population = v)
//!                     .attribute(),
//!             )
//!             .add(
//!                 Member::new("Capital")
//!                     .getter(|c: &City| c.capital)
//!                     .setter(|c: &mut City, v| c.capital = v)
//!                     .attribute()
//!                     .default_value(false),
//!             )
//!             // Not marked, never serialized
//!             .add(Member::new("CacheSlot").getter(|c: &City| c.cache_slot));
//!     }
//! }
//! ```

pub mod default;
pub mod discover;
mod kind;
mod member;

pub use default::{resolve_default, DeclaredDefault};
pub use discover::{discover, AttributeProperty};
pub use kind::{ScalarKind, ValueKind};
pub use member::{AttributeMarker, Getter, Member, Setter};

pub(crate) use member::ErasedMember;

/// Marker trait for types whose members can be written to and read from
/// GraphML `data` elements.
///
/// The default `declare` registers nothing, which suits vertex and edge types
/// that carry no attributes.
pub trait GraphMlAttributes: Sized + 'static {
    /// Registers the type's members in declaration order.
    fn declare(properties: &mut PropertyTable<Self>) {
        let _ = properties;
    }
}

/// The ordered member table of one type.
pub struct PropertyTable<T> {
    members: Vec<Box<dyn ErasedMember<T>>>,
}

impl<T: GraphMlAttributes> PropertyTable<T> {
    /// Builds the table of `T` by running its declaration.
    #[must_use]
    pub fn of() -> Self {
        let mut table = PropertyTable {
            members: Vec::new(),
        };
        T::declare(&mut table);
        table
    }
}

impl<T: 'static> PropertyTable<T> {
    /// Appends a member declaration.
    pub fn add<V>(&mut self, member: Member<T, V>) -> &mut Self
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        self.members.push(Box::new(member));
        self
    }

    /// Number of declared members, marked or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn members(&self) -> impl Iterator<Item = &dyn ErasedMember<T>> {
        self.members.iter().map(AsRef::as_ref)
    }
}

/// Implements [`GraphMlAttributes`] without any properties.
macro_rules! no_attributes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GraphMlAttributes for $ty {}
        )*
    };
}

no_attributes!((), String, &'static str, bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
