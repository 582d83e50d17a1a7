//! Type codec registry.
//!
//! This module holds the fixed table that maps every supported value type onto
//! a pair of text operations. The table is keyed by [`std::any::TypeId`] and is
//! consulted only while a type's [`crate::compiler::TypeCodec`] is being
//! compiled. The compiled codec keeps plain function pointers, so no lookup
//! happens per serialized value.
//!
//! # Supported Types
//!
//! | Rust type            | [`ValueKind`]                         | `attr.type` |
//! |----------------------|---------------------------------------|-------------|
//! | `bool`               | `Scalar(Boolean)`                     | `boolean`   |
//! | `i32`                | `Scalar(Int)`                         | `int`       |
//! | `i64`                | `Scalar(Long)`                        | `long`      |
//! | `f32`                | `Scalar(Float)`                       | `float`     |
//! | `f64`                | `Scalar(Double)`                      | `double`    |
//! | `String`             | `Scalar(String)`                      | `string`    |
//! | `Vec<T>`             | `List { item, nullable: false }`      | `string`    |
//! | `Option<Vec<T>>`     | `List { item, nullable: true }`       | `string`    |
//!
//! where `T` is any of the scalar types.
//!
//! # Examples
//!
//! ```rust
//! use graphml::codec::CodecRegistry;
//!
//! let registry = CodecRegistry::global();
//! let write = registry.try_get_writer::<Vec<i32>>().unwrap();
//!
//! let mut text = String::new();
//! write(&vec![1, 2], &mut text);
//! assert_eq!(text, "1 2 ");
//!
//! assert!(registry.try_get_reader::<u8>().is_none());
//! ```

mod list;
mod scalar;

pub use list::{read_list, read_nullable_list, write_list, write_nullable_list, NULL_LIST};
pub use scalar::{to_text, ScalarText};

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::OnceLock,
};

use crate::{attributes::ValueKind, Result};

/// Writes the canonical text of a value.
pub type WriteFn<V> = fn(&V, &mut String);

/// Parses a value from its text form.
pub type ReadFn<V> = fn(&str) -> Result<V>;

/// The text operations for one value type.
pub struct Codec<V> {
    /// Semantic type tag
    pub kind: ValueKind,
    /// Writer operation
    pub write: WriteFn<V>,
    /// Reader operation
    pub read: ReadFn<V>,
}

impl<V> Clone for Codec<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Codec<V> {}

impl<V> std::fmt::Debug for Codec<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("kind", &self.kind).finish()
    }
}

/// The fixed table of supported value types.
pub struct CodecRegistry {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CodecRegistry {
    /// Returns the process-wide registry, building it on first use.
    pub fn global() -> &'static CodecRegistry {
        static REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();
        REGISTRY.get_or_init(CodecRegistry::build)
    }

    fn build() -> CodecRegistry {
        let mut registry = CodecRegistry {
            entries: HashMap::new(),
        };

        registry.register_scalar::<bool>();
        registry.register_scalar::<i32>();
        registry.register_scalar::<i64>();
        registry.register_scalar::<f32>();
        registry.register_scalar::<f64>();
        registry.register_scalar::<String>();

        registry
    }

    fn register_scalar<T: ScalarText>(&mut self) {
        self.insert(Codec::<T> {
            kind: ValueKind::Scalar(T::KIND),
            write: T::write_text,
            read: T::read_text,
        });
        self.insert(Codec::<Vec<T>> {
            kind: ValueKind::List {
                item: T::KIND,
                nullable: false,
            },
            write: write_list::<T>,
            read: read_list::<T>,
        });
        self.insert(Codec::<Option<Vec<T>>> {
            kind: ValueKind::List {
                item: T::KIND,
                nullable: true,
            },
            write: write_nullable_list::<T>,
            read: read_nullable_list::<T>,
        });
    }

    fn insert<V: 'static>(&mut self, codec: Codec<V>) {
        self.entries.insert(TypeId::of::<V>(), Box::new(codec));
    }

    /// Looks up both operations of `V`.
    #[must_use]
    pub fn try_get<V: 'static>(&self) -> Option<Codec<V>> {
        self.entries
            .get(&TypeId::of::<V>())
            .and_then(|entry| entry.downcast_ref::<Codec<V>>())
            .copied()
    }

    /// Looks up the writer operation of `V`.
    #[must_use]
    pub fn try_get_writer<V: 'static>(&self) -> Option<WriteFn<V>> {
        self.try_get::<V>().map(|codec| codec.write)
    }

    /// Looks up the reader operation of `V`.
    #[must_use]
    pub fn try_get_reader<V: 'static>(&self) -> Option<ReadFn<V>> {
        self.try_get::<V>().map(|codec| codec.read)
    }

    /// Returns the semantic type tag of `V`, if supported.
    #[must_use]
    pub fn kind_of<V: 'static>(&self) -> Option<ValueKind> {
        self.try_get::<V>().map(|codec| codec.kind)
    }

    /// Number of registered value types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no value types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use strum::EnumCount;

    use super::*;
    use crate::attributes::ScalarKind;

    #[test]
    fn registry_covers_scalars_and_lists() {
        let registry = CodecRegistry::global();
        assert_eq!(registry.len(), ScalarKind::COUNT * 3);

        assert_eq!(
            registry.kind_of::<i64>(),
            Some(ValueKind::Scalar(ScalarKind::Long))
        );
        assert_eq!(
            registry.kind_of::<Option<Vec<f32>>>(),
            Some(ValueKind::List {
                item: ScalarKind::Float,
                nullable: true
            })
        );
        assert_eq!(
            registry.kind_of::<Vec<String>>(),
            Some(ValueKind::List {
                item: ScalarKind::String,
                nullable: false
            })
        );
    }

    #[test]
    fn unsupported_types_are_absent() {
        let registry = CodecRegistry::global();
        assert!(registry.try_get::<u8>().is_none());
        assert!(registry.try_get_writer::<char>().is_none());
        assert!(registry.try_get_reader::<Vec<Vec<i32>>>().is_none());
        assert!(registry.try_get_reader::<Option<i32>>().is_none());
    }

    #[test]
    fn operations_round_trip() {
        let registry = CodecRegistry::global();
        let codec = registry.try_get::<Option<Vec<bool>>>().unwrap();

        let mut text = String::new();
        (codec.write)(&Some(vec![true, false]), &mut text);
        assert_eq!(text, "true false ");
        assert_eq!((codec.read)(&text).unwrap(), Some(vec![true, false]));
    }
}
