//! Semantic type tags for attribute properties.
//!
//! Every supported Rust value type maps onto one [`ValueKind`]. Scalars map
//! one-to-one onto the GraphML `attr.type` vocabulary; lists have no GraphML
//! counterpart and are declared as `string`.

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A scalar attribute type, named after its GraphML `attr.type` spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    /// `bool`
    Boolean,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// `String`
    String,
}

/// The semantic type of one attribute property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single scalar value.
    Scalar(ScalarKind),
    /// A one-dimensional list of scalars.
    List {
        /// The element type
        item: ScalarKind,
        /// Whether an absent list (`null`) is representable
        nullable: bool,
    },
}

impl ValueKind {
    /// The GraphML `attr.type` used when declaring a `key` for this kind.
    ///
    /// Lists are declared as `string`, GraphML has no list type.
    #[must_use]
    pub fn attr_type(self) -> ScalarKind {
        match self {
            ValueKind::Scalar(kind) => kind,
            ValueKind::List { .. } => ScalarKind::String,
        }
    }

    /// Returns `true` for list-shaped kinds.
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::List { .. })
    }
}
