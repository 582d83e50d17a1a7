use std::{any::Any, sync::Arc};

use crate::{
    attributes::default::{resolve_default, DeclaredDefault},
    codec::CodecRegistry,
    compiler::{reader, writer, CompiledProperty},
    ConfigurationError,
};

/// Shared getter of a member.
pub type Getter<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;

/// Shared setter of a member.
pub type Setter<T, V> = Arc<dyn Fn(&mut T, V) + Send + Sync>;

/// The serializable marker of a member, with its optional name override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMarker {
    /// Serialized name, replaces the member name when set
    pub name: Option<String>,
}

/// Declaration of one public member of `T` with value type `V`.
///
/// Built with a chain of calls and handed to [`crate::attributes::PropertyTable::add`].
pub struct Member<T, V> {
    name: &'static str,
    getter: Option<Getter<T, V>>,
    setter: Option<Setter<T, V>>,
    marker: Option<AttributeMarker>,
    default: Option<DeclaredDefault>,
}

impl<T, V> Member<T, V>
where
    T: 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Starts a declaration for the member called `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Member {
            name,
            getter: None,
            setter: None,
            marker: None,
            default: None,
        }
    }

    /// Sets the getter.
    #[must_use]
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Sets the setter.
    #[must_use]
    pub fn setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }

    /// Marks the member as serializable under its own name.
    #[must_use]
    pub fn attribute(mut self) -> Self {
        self.marker = Some(AttributeMarker::default());
        self
    }

    /// Marks the member as serializable under `name`.
    #[must_use]
    pub fn attribute_named(mut self, name: impl Into<String>) -> Self {
        self.marker = Some(AttributeMarker {
            name: Some(name.into()),
        });
        self
    }

    /// Declares a default value.
    ///
    /// The value is stored as given and checked against `V` when the owning
    /// type is compiled, the unit value `()` stands for a null default.
    #[must_use]
    pub fn default_value<D: Any + Send + Sync>(mut self, value: D) -> Self {
        self.default = Some(DeclaredDefault::new(value));
        self
    }
}

/// Type-erased view on a [`Member`], used by discovery and compilation.
pub(crate) trait ErasedMember<T>: Send + Sync {
    fn member_name(&self) -> &'static str;

    fn value_type_name(&self) -> &'static str;

    fn marker(&self) -> Option<&AttributeMarker>;

    fn has_getter(&self) -> bool;

    fn has_setter(&self) -> bool;

    fn compile(
        &self,
        type_name: &'static str,
        property: &str,
        registry: &CodecRegistry,
    ) -> Result<CompiledProperty<T>, ConfigurationError>;
}

impl<T, V> ErasedMember<T> for Member<T, V>
where
    T: 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    fn member_name(&self) -> &'static str {
        self.name
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn marker(&self) -> Option<&AttributeMarker> {
        self.marker.as_ref()
    }

    fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    fn compile(
        &self,
        type_name: &'static str,
        property: &str,
        registry: &CodecRegistry,
    ) -> Result<CompiledProperty<T>, ConfigurationError> {
        let missing = |accessor| ConfigurationError::MissingAccessor {
            type_name,
            member: self.name,
            accessor,
        };
        let getter = self.getter.clone().ok_or_else(|| missing("getter"))?;
        let setter = self.setter.clone().ok_or_else(|| missing("setter"))?;

        let is_list = registry.kind_of::<V>().is_some_and(|kind| kind.is_list());
        let default = resolve_default::<V>(type_name, property, self.default.as_ref(), is_list)?;

        let codec = registry
            .try_get::<V>()
            .ok_or_else(|| ConfigurationError::UnsupportedType {
                type_name,
                property: property.to_string(),
                value_type: std::any::type_name::<V>(),
            })?;

        let default_text = default.as_ref().map(|value| {
            let mut text = String::new();
            (codec.write)(value, &mut text);
            text
        });

        Ok(CompiledProperty {
            name: property.to_string(),
            kind: codec.kind,
            default_text,
            write: writer::compile_write(Arc::clone(&getter), codec.write, default.clone()),
            read: reader::compile_read(property, Arc::clone(&setter), codec.read),
            apply_default: default.map(|value| reader::compile_default_setter(setter, value)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Meter {
        level: i32,
    }

    #[test]
    fn builder_records_parts() {
        let member: Member<Meter, i32> = Member::new("Level")
            .getter(|p: &Meter| p.level)
            .attribute_named("lvl");

        assert_eq!(member.member_name(), "Level");
        assert_eq!(member.value_type_name(), "i32");
        assert!(member.has_getter());
        assert!(!member.has_setter());
        assert_eq!(member.marker().unwrap().name.as_deref(), Some("lvl"));
    }

    #[test]
    fn compile_reports_missing_setter() {
        let member: Member<Meter, i32> = Member::new("Level")
            .getter(|p: &Meter| p.level)
            .attribute();

        let result = member.compile("Meter", "Level", CodecRegistry::global());
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingAccessor {
                accessor: "setter",
                ..
            })
        ));
    }

    #[test]
    fn compile_builds_typed_closures() {
        let member: Member<Meter, i32> = Member::new("Level")
            .getter(|p: &Meter| p.level)
            .setter(|p: &mut Meter, v| p.level = v)
            .attribute()
            .default_value(3i32);

        let compiled = member
            .compile("Meter", "Level", CodecRegistry::global())
            .unwrap();
        assert_eq!(compiled.default_text(), Some("3"));

        let mut meter = Meter { level: 0 };
        compiled.apply_default(&mut meter);
        assert_eq!(meter.level, 3);

        compiled.read(&mut meter, "11").unwrap();
        assert_eq!(meter.level, 11);
    }
}
