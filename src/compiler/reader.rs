//! Read side of the per-type compiler.
//!
//! Two closures are compiled per property: a reader that parses `data` text
//! with the codec's reader function and hands the value to the typed setter,
//! and, for properties with a declared default, a default setter. The default
//! setters run on every freshly created instance before its `data` elements
//! are read, which restores values the writer elided.

use crate::{
    attributes::Setter,
    codec::ReadFn,
    compiler::{DefaultSetter, PropertyReader, TypeCodec},
    Error, Result,
};

/// Builds the read closure of one property.
pub(crate) fn compile_read<T, V>(property: &str, setter: Setter<T, V>, read: ReadFn<V>) -> PropertyReader<T>
where
    T: 'static,
    V: 'static,
{
    let property = property.to_string();
    Box::new(move |instance: &mut T, text: &str| {
        let value = read(text).map_err(|error| match error {
            Error::Malformed {
                message,
                file,
                line,
            } => Error::Malformed {
                message: format!("{property}: {message}"),
                file,
                line,
            },
            other => other,
        })?;
        setter(instance, value);
        Ok(())
    })
}

/// Builds the closure that stores a validated default.
pub(crate) fn compile_default_setter<T, V>(setter: Setter<T, V>, default: V) -> DefaultSetter<T>
where
    T: 'static,
    V: Clone + Send + Sync + 'static,
{
    Box::new(move |instance: &mut T| setter(instance, default.clone()))
}

impl<T> TypeCodec<T> {
    /// Applies every declared default to `instance`.
    pub fn apply_defaults(&self, instance: &mut T) {
        for property in &self.properties {
            property.apply_default(instance);
        }
    }

    /// Dispatches the content of one `data` element to the property named `key`.
    ///
    /// Keys are compared ordinally against the property names in discovery
    /// order, the first match wins.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownAttributeKey`] if no property is named `key`
    /// - [`Error::Malformed`] if `text` does not parse as the property's type
    pub fn read_data(&self, key: &str, text: &str, instance: &mut T) -> Result<()> {
        match self.properties.iter().find(|property| property.name() == key) {
            Some(property) => property.read(instance, text),
            None => Err(Error::UnknownAttributeKey {
                key: key.to_string(),
                type_name: self.type_name,
            }),
        }
    }
}
