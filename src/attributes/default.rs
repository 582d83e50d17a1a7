//! Declared default values.
//!
//! A default is stored type-erased at declaration time and validated when the
//! owning type is compiled. A resolved default has two effects: a property
//! whose current value equals it is not written, and a freshly created
//! instance receives it before any `data` element is read.

use std::any::{Any, TypeId};

use crate::ConfigurationError;

/// A default value as declared, before validation.
pub struct DeclaredDefault {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl DeclaredDefault {
    /// Wraps a declared value. `()` is the null default.
    #[must_use]
    pub fn new<D: Any + Send + Sync>(value: D) -> Self {
        DeclaredDefault {
            value: Box::new(value),
            type_name: std::any::type_name::<D>(),
        }
    }

    /// Returns `true` for the null default.
    #[must_use]
    pub fn is_null(&self) -> bool {
        (*self.value).type_id() == TypeId::of::<()>()
    }

    /// The type name of the declared value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for DeclaredDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredDefault")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Validates and extracts the default of a property with value type `V`.
///
/// Returns `Ok(None)` when no default was declared.
///
/// # Errors
///
/// - [`ConfigurationError::NullDefault`] if the default is `()`
/// - [`ConfigurationError::DefaultTypeMismatch`] if its type is not exactly `V`
/// - [`ConfigurationError::ListDefault`] if the property is list-shaped
pub fn resolve_default<V: Clone + 'static>(
    type_name: &'static str,
    property: &str,
    declared: Option<&DeclaredDefault>,
    is_list: bool,
) -> Result<Option<V>, ConfigurationError> {
    let Some(declared) = declared else {
        return Ok(None);
    };

    if declared.is_null() {
        return Err(ConfigurationError::NullDefault {
            type_name,
            property: property.to_string(),
        });
    }

    let Some(value) = declared.value.downcast_ref::<V>() else {
        return Err(ConfigurationError::DefaultTypeMismatch {
            type_name,
            property: property.to_string(),
            expected: std::any::type_name::<V>(),
            found: declared.type_name,
        });
    };

    if is_list {
        return Err(ConfigurationError::ListDefault {
            type_name,
            property: property.to_string(),
        });
    }

    Ok(Some(value.clone()))
}
