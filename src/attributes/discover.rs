//! Attribute property discovery.

use crate::{
    attributes::{ErasedMember, PropertyTable},
    ConfigurationError,
};

/// One serializable property of a type, as found by [`discover`].
pub struct AttributeProperty<'a, T> {
    name: String,
    member: &'a dyn ErasedMember<T>,
}

impl<'a, T> AttributeProperty<'a, T> {
    /// The serialized name, used as `key` id and `attr.name`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member name as declared.
    #[must_use]
    pub fn member_name(&self) -> &'static str {
        self.member.member_name()
    }

    /// The Rust type name of the member's value.
    #[must_use]
    pub fn value_type_name(&self) -> &'static str {
        self.member.value_type_name()
    }

    pub(crate) fn member(&self) -> &'a dyn ErasedMember<T> {
        self.member
    }
}

/// Returns the serializable properties of a table, in declaration order.
///
/// Members without the marker are skipped. The serialized name is the marker's
/// override when present, the member name otherwise.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingAccessor`] for the first marked member
/// without a getter or a setter.
pub fn discover<T: 'static>(
    table: &PropertyTable<T>,
) -> Result<Vec<AttributeProperty<'_, T>>, ConfigurationError> {
    let type_name = std::any::type_name::<T>();
    let mut properties = Vec::new();

    for member in table.members() {
        let Some(marker) = member.marker() else {
            continue;
        };

        let missing = if !member.has_getter() {
            Some("getter")
        } else if !member.has_setter() {
            Some("setter")
        } else {
            None
        };
        if let Some(accessor) = missing {
            return Err(ConfigurationError::MissingAccessor {
                type_name,
                member: member.member_name(),
                accessor,
            });
        }

        let name = marker
            .name
            .clone()
            .unwrap_or_else(|| member.member_name().to_string());
        properties.push(AttributeProperty { name, member });
    }

    Ok(properties)
}
