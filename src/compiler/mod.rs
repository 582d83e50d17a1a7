//! Per-type codec compiler and cache.
//!
//! For every concrete vertex, edge or graph-attribute type, [`codec_for`]
//! builds one [`TypeCodec`] holding type-specialized closures for each
//! attribute property:
//!
//! - a write closure calling the typed getter and the codec's writer function,
//!   with default elision folded in ([`writer`])
//! - a read closure calling the codec's reader function and the typed setter
//!   ([`reader`])
//! - a default setter for properties with a declared default ([`reader`])
//!
//! Discovery, default validation and codec lookup run once per type. After
//! that, serializing an instance is a sequence of direct closure calls.
//!
//! # Caching
//!
//! Codecs live in a process-wide [`DashMap`] keyed by [`TypeId`]. Each entry is
//! an `Arc<OnceLock<..>>`: the map shard is locked only long enough to fetch
//! the cell, and the compilation itself runs inside [`OnceLock::get_or_init`],
//! so concurrent first uses of a type compile it exactly once. Failed
//! compilations are cached too, a type with an invalid declaration fails with
//! the same [`ConfigurationError`] on every use. Entries are never evicted.
//!
//! # Examples
//!
//! ```rust
//! use graphml::{
//!     attributes::{GraphMlAttributes, Member, PropertyTable},
//!     compiler::codec_for,
//! };
//!
//! struct Pin {
//!     label: String,
//! }
//!
//! impl GraphMlAttributes for Pin {
//!     fn declare(properties: &mut PropertyTable<Self>) {
//!         properties.add(
//!             Member::new("Label")
//!                 .getter(|p: &Pin| p.label.clone())
//!                 .setter(|p: &mut Pin, v| p.label = v)
//!                 .attribute(),
//!         );
//!     }
//! }
//!
//! let codec = codec_for::<Pin>()?;
//! assert_eq!(codec.properties().len(), 1);
//!
//! let mut pin = Pin { label: String::new() };
//! codec.read_data("Label", "north", &mut pin)?;
//! assert_eq!(pin.label, "north");
//! # Ok::<(), graphml::Error>(())
//! ```

pub mod reader;
pub mod writer;

use std::{
    any::{Any, TypeId},
    sync::{Arc, OnceLock},
};

use dashmap::DashMap;

use crate::{
    attributes::{discover, GraphMlAttributes, PropertyTable, ValueKind},
    codec::CodecRegistry,
    ConfigurationError, Error, Result,
};

pub(crate) type PropertyWriter<T> = Box<dyn Fn(&T, &mut String) -> bool + Send + Sync>;
pub(crate) type PropertyReader<T> = Box<dyn Fn(&mut T, &str) -> Result<()> + Send + Sync>;
pub(crate) type DefaultSetter<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// One compiled attribute property.
pub struct CompiledProperty<T> {
    pub(crate) name: String,
    pub(crate) kind: ValueKind,
    pub(crate) default_text: Option<String>,
    pub(crate) write: PropertyWriter<T>,
    pub(crate) read: PropertyReader<T>,
    pub(crate) apply_default: Option<DefaultSetter<T>>,
}

impl<T> CompiledProperty<T> {
    /// The serialized name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The semantic type tag.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The canonical text of the declared default, if any.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// Appends the value text of `instance` to `out`.
    ///
    /// Returns `false`, leaving `out` untouched, when the value equals the
    /// declared default.
    pub fn write(&self, instance: &T, out: &mut String) -> bool {
        (self.write)(instance, out)
    }

    /// Parses `text` and stores it into `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `text` does not parse.
    pub fn read(&self, instance: &mut T, text: &str) -> Result<()> {
        (self.read)(instance, text)
    }

    /// Stores the declared default into `instance`, if there is one.
    pub fn apply_default(&self, instance: &mut T) {
        if let Some(apply) = &self.apply_default {
            apply(instance);
        }
    }
}

/// The compiled attribute codec of one concrete type.
pub struct TypeCodec<T> {
    type_name: &'static str,
    properties: Vec<CompiledProperty<T>>,
}

impl<T: GraphMlAttributes> TypeCodec<T> {
    /// Discovers, validates and compiles every attribute property of `T`.
    ///
    /// This bypasses the cache, prefer [`codec_for`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found in `T`'s declarations.
    pub fn compile() -> std::result::Result<TypeCodec<T>, ConfigurationError> {
        let type_name = std::any::type_name::<T>();
        let registry = CodecRegistry::global();
        let table = PropertyTable::<T>::of();

        let properties = discover(&table)?
            .iter()
            .map(|property| {
                property
                    .member()
                    .compile(type_name, property.name(), registry)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            type_name,
            properties = properties.len(),
            "compiled GraphML codec"
        );

        Ok(TypeCodec {
            type_name,
            properties,
        })
    }
}

impl<T> TypeCodec<T> {
    /// The Rust type name the codec was compiled for.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The compiled properties, in discovery order.
    #[must_use]
    pub fn properties(&self) -> &[CompiledProperty<T>] {
        &self.properties
    }
}

type CompiledEntry = std::result::Result<Arc<dyn Any + Send + Sync>, ConfigurationError>;

fn cache() -> &'static DashMap<TypeId, Arc<OnceLock<CompiledEntry>>> {
    static CACHE: OnceLock<DashMap<TypeId, Arc<OnceLock<CompiledEntry>>>> = OnceLock::new();
    CACHE.get_or_init(DashMap::new)
}

/// Returns the cached codec of `T`, compiling it on first use.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when `T`'s declarations are invalid. The
/// error is cached, later calls return an identical error.
pub fn codec_for<T: GraphMlAttributes>() -> Result<Arc<TypeCodec<T>>> {
    let cell = Arc::clone(&*cache().entry(TypeId::of::<T>()).or_default());

    let entry = cell.get_or_init(|| {
        TypeCodec::<T>::compile().map(|codec| Arc::new(codec) as Arc<dyn Any + Send + Sync>)
    });

    match entry {
        Ok(codec) => Arc::clone(codec).downcast::<TypeCodec<T>>().map_err(|_| {
            Error::Error(format!(
                "codec cache entry of {} holds a foreign type",
                std::any::type_name::<T>()
            ))
        }),
        Err(error) => Err(Error::Configuration(error.clone())),
    }
}
