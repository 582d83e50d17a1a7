//! Extraction of the checkable subset of an XML Schema document set.
//!
//! The GraphML schemas are small and regular, so instead of a general XSD
//! engine the loader collects the facts the validator needs:
//!
//! - top-level element declarations, with the children they reference, whether
//!   they accept wildcard content or text, and their required attributes
//! - named simple types with their restriction base and enumerated values
//! - the type of every locally declared attribute, by attribute name
//! - `xs:key` / `xs:keyref` identity constraints of the form `.//element` / `@attribute`
//!
//! Documents reached through `xs:include`, `xs:import` and `xs:redefine` are
//! loaded through the same resolver, each one once.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
    io::Read,
};

use quick_xml::{events::BytesStart, events::Event, Reader};

use crate::{validation::XmlResolver, Error, Result};

/// Longest chain of simple type restrictions followed when classifying a value.
const MAX_DERIVATION_DEPTH: usize = 16;

/// Declaration of one top-level element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDecl {
    /// Names of the elements allowed as children
    pub children: HashSet<String>,
    /// Children are matched by `xs:any` and not validated
    pub any_children: bool,
    /// Character data is allowed, either a simple type or mixed content
    pub text_allowed: bool,
    /// Attribute names with `use="required"`, possibly prefixed
    pub required: Vec<String>,
}

/// A named simple type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleType {
    /// Restriction base, as written in the schema
    pub base: Option<String>,
    /// Enumerated values, empty if the type is not an enumeration
    pub enumeration: Vec<String>,
}

/// An `xs:key`: `attribute` values of all `element`s are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKey {
    /// Name other constraints refer to
    pub name: String,
    /// Local name of the constrained element
    pub element: String,
    /// Attribute holding the key value
    pub attribute: String,
}

/// An `xs:keyref`: `attribute` values of all `element`s occur in key `refer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKeyRef {
    /// Name of the referenced [`IdentityKey`]
    pub refer: String,
    /// Local name of the referring element
    pub element: String,
    /// Attribute holding the referenced value
    pub attribute: String,
}

/// Lexical space of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalSpace<'s> {
    /// One of the listed tokens
    Enumeration(&'s [String]),
    /// `xs:nonNegativeInteger`
    NonNegativeInteger,
    /// `xs:boolean`
    Boolean,
    /// Anything
    Unrestricted,
}

impl LexicalSpace<'_> {
    /// Returns `true` if `value` is in the lexical space.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            LexicalSpace::Enumeration(values) => values.iter().any(|v| v == value),
            LexicalSpace::NonNegativeInteger => value.parse::<u64>().is_ok(),
            LexicalSpace::Boolean => matches!(value, "true" | "false" | "1" | "0"),
            LexicalSpace::Unrestricted => true,
        }
    }
}

impl fmt::Display for LexicalSpace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalSpace::Enumeration(values) => write!(f, "one of {}", values.join(", ")),
            LexicalSpace::NonNegativeInteger => write!(f, "a non-negative integer"),
            LexicalSpace::Boolean => write!(f, "a boolean"),
            LexicalSpace::Unrestricted => write!(f, "any value"),
        }
    }
}

/// The facts extracted from a schema document set.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    target_namespace: Option<String>,
    elements: HashMap<String, ElementDecl>,
    types: HashMap<String, SimpleType>,
    attribute_types: HashMap<String, String>,
    keys: Vec<IdentityKey>,
    keyrefs: Vec<IdentityKeyRef>,
    documents: usize,
}

/// Identity constraint being collected.
enum PendingIdentity {
    Key(IdentityKey),
    KeyRef(IdentityKeyRef),
}

/// Per-document parsing context.
#[derive(Default)]
struct DocumentScope {
    frames: Vec<String>,
    element: Option<String>,
    attribute: Option<String>,
    simple_type: Option<String>,
    identity: Option<PendingIdentity>,
}

impl Schema {
    /// Loads `root` and every document it includes, imports or redefines.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if a document cannot be resolved or is not
    /// well-formed.
    pub fn load<R: XmlResolver + ?Sized>(resolver: &R, root: &str) -> Result<Schema> {
        let mut schema = Schema::default();
        let mut pending = VecDeque::from([root.to_string()]);
        let mut loaded = HashSet::new();

        while let Some(location) = pending.pop_front() {
            if !loaded.insert(location.clone()) {
                continue;
            }

            let mut source = resolver.resolve(&location)?.ok_or_else(|| {
                Error::Validation(format!("schema document '{location}' could not be resolved"))
            })?;
            let mut data = Vec::new();
            source.read_to_end(&mut data)?;

            let references = schema.parse_document(&data).map_err(|error| match error {
                Error::Validation(message) => {
                    Error::Validation(format!("{location}: {message}"))
                }
                other => Error::Validation(format!("{location}: {other}")),
            })?;
            pending.extend(references);
            schema.documents += 1;
        }

        tracing::debug!(
            documents = schema.documents,
            elements = schema.elements.len(),
            types = schema.types.len(),
            "schema set loaded"
        );
        Ok(schema)
    }

    /// Namespace of the root schema document.
    #[must_use]
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Declaration of the top-level element `name`.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    /// A named simple type.
    #[must_use]
    pub fn simple_type(&self, name: &str) -> Option<&SimpleType> {
        self.types.get(strip_prefix(name))
    }

    /// All `xs:key` constraints, in document order.
    #[must_use]
    pub fn keys(&self) -> &[IdentityKey] {
        &self.keys
    }

    /// All `xs:keyref` constraints, in document order.
    #[must_use]
    pub fn keyrefs(&self) -> &[IdentityKeyRef] {
        &self.keyrefs
    }

    /// Number of documents the set was built from.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Classifies the values of the unprefixed attribute `attribute`.
    #[must_use]
    pub fn value_kind(&self, attribute: &str) -> LexicalSpace<'_> {
        let Some(mut name) = self.attribute_types.get(attribute).map(String::as_str) else {
            return LexicalSpace::Unrestricted;
        };

        for _ in 0..MAX_DERIVATION_DEPTH {
            if is_builtin(name) {
                return match strip_prefix(name) {
                    "nonNegativeInteger" => LexicalSpace::NonNegativeInteger,
                    "boolean" => LexicalSpace::Boolean,
                    _ => LexicalSpace::Unrestricted,
                };
            }

            let Some(simple) = self.simple_type(name) else {
                return LexicalSpace::Unrestricted;
            };
            if !simple.enumeration.is_empty() {
                return LexicalSpace::Enumeration(&simple.enumeration);
            }
            match &simple.base {
                Some(base) => name = base,
                None => return LexicalSpace::Unrestricted,
            }
        }

        LexicalSpace::Unrestricted
    }

    /// Adds the declarations of one document, returns the locations it references.
    fn parse_document(&mut self, data: &[u8]) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(data);
        let mut buf = Vec::new();
        let mut scope = DocumentScope::default();
        let mut references = Vec::new();

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(element)) => {
                    let name = self.open(&element, &mut scope, &mut references)?;
                    scope.frames.push(name);
                }
                Ok(Event::Empty(element)) => {
                    let name = self.open(&element, &mut scope, &mut references)?;
                    scope.frames.push(name);
                    self.close(&mut scope);
                }
                Ok(Event::End(_)) => self.close(&mut scope),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(error) => {
                    return Err(Error::Validation(format!(
                        "schema is not well-formed at byte {}: {error}",
                        reader.buffer_position()
                    )))
                }
            }
        }

        Ok(references)
    }

    /// Handles a start tag. Returns its local name for the frame stack.
    fn open(
        &mut self,
        element: &BytesStart<'_>,
        scope: &mut DocumentScope,
        references: &mut Vec<String>,
    ) -> Result<String> {
        let local = std::str::from_utf8(element.local_name().as_ref())?.to_string();
        let parent = scope.frames.last().map(String::as_str);

        match local.as_str() {
            "schema" => {
                if self.target_namespace.is_none() {
                    self.target_namespace = attribute(element, "targetNamespace")?;
                }
            }
            "include" | "import" | "redefine" => {
                if let Some(location) = attribute(element, "schemaLocation")? {
                    references.push(location);
                }
            }
            "element" => {
                let name = attribute(element, "name")?;
                let reference = attribute(element, "ref")?;

                if parent == Some("schema") {
                    if let Some(name) = name {
                        let decl = self.elements.entry(name.clone()).or_default();
                        if attribute(element, "type")?.is_some() {
                            decl.text_allowed = true;
                        }
                        scope.element = Some(name);
                    }
                } else if let Some(owner) = &scope.element {
                    if let Some(child) = name.or(reference) {
                        self.elements
                            .entry(owner.clone())
                            .or_default()
                            .children
                            .insert(strip_prefix(&child).to_string());
                    }
                }
            }
            "any" => {
                if let Some(owner) = &scope.element {
                    self.elements.entry(owner.clone()).or_default().any_children = true;
                }
            }
            "complexType" => {
                if let Some(owner) = &scope.element {
                    if attribute(element, "mixed")?.as_deref() == Some("true") {
                        self.elements.entry(owner.clone()).or_default().text_allowed = true;
                    }
                }
            }
            "attribute" => {
                let name = attribute(element, "name")?;
                let reference = attribute(element, "ref")?;

                // Global attributes belong to their own namespace and are
                // always prefixed in instance documents.
                if parent != Some("schema") {
                    if let (Some(name), Some(kind)) = (&name, attribute(element, "type")?) {
                        self.attribute_types.entry(name.clone()).or_insert(kind);
                    }
                }

                if attribute(element, "use")?.as_deref() == Some("required") {
                    if let (Some(owner), Some(required)) = (&scope.element, name.clone().or(reference)) {
                        self.elements
                            .entry(owner.clone())
                            .or_default()
                            .required
                            .push(required);
                    }
                }
                scope.attribute = name;
            }
            "simpleType" => {
                let name = match (attribute(element, "name")?, &scope.attribute) {
                    (Some(name), _) => Some(name),
                    (None, Some(owner)) if parent == Some("attribute") => {
                        let synthetic = format!("{owner}#inline");
                        self.attribute_types
                            .entry(owner.clone())
                            .or_insert_with(|| synthetic.clone());
                        Some(synthetic)
                    }
                    (None, _) => None,
                };
                if let Some(name) = &name {
                    self.types.entry(name.clone()).or_default();
                }
                scope.simple_type = name;
            }
            "restriction" => {
                if let Some(name) = &scope.simple_type {
                    if let Some(simple) = self.types.get_mut(name) {
                        simple.base = attribute(element, "base")?;
                    }
                }
            }
            "enumeration" => {
                if let (Some(name), Some(value)) = (&scope.simple_type, attribute(element, "value")?) {
                    if let Some(simple) = self.types.get_mut(name) {
                        simple.enumeration.push(value);
                    }
                }
            }
            "key" => {
                if let Some(name) = attribute(element, "name")? {
                    scope.identity = Some(PendingIdentity::Key(IdentityKey {
                        name,
                        element: String::new(),
                        attribute: String::new(),
                    }));
                }
            }
            "keyref" => {
                if let Some(refer) = attribute(element, "refer")? {
                    scope.identity = Some(PendingIdentity::KeyRef(IdentityKeyRef {
                        refer: strip_prefix(&refer).to_string(),
                        element: String::new(),
                        attribute: String::new(),
                    }));
                }
            }
            "selector" => {
                let path = attribute(element, "xpath")?.unwrap_or_default();
                match (&mut scope.identity, path.strip_prefix(".//")) {
                    (Some(PendingIdentity::Key(key)), Some(target)) => key.element = target.to_string(),
                    (Some(PendingIdentity::KeyRef(keyref)), Some(target)) => {
                        keyref.element = target.to_string()
                    }
                    _ => tracing::debug!(xpath = %path, "unsupported identity selector"),
                }
            }
            "field" => {
                let path = attribute(element, "xpath")?.unwrap_or_default();
                match (&mut scope.identity, path.strip_prefix('@')) {
                    (Some(PendingIdentity::Key(key)), Some(target)) => key.attribute = target.to_string(),
                    (Some(PendingIdentity::KeyRef(keyref)), Some(target)) => {
                        keyref.attribute = target.to_string()
                    }
                    _ => tracing::debug!(xpath = %path, "unsupported identity field"),
                }
            }
            _ => {}
        }

        Ok(local)
    }

    /// Handles an end tag.
    fn close(&mut self, scope: &mut DocumentScope) {
        let Some(local) = scope.frames.pop() else {
            return;
        };

        match local.as_str() {
            "element" if scope.frames.len() == 1 => scope.element = None,
            "attribute" => scope.attribute = None,
            "simpleType" => scope.simple_type = None,
            "key" | "keyref" => match scope.identity.take() {
                Some(PendingIdentity::Key(key)) if !key.element.is_empty() && !key.attribute.is_empty() => {
                    self.keys.push(key);
                }
                Some(PendingIdentity::KeyRef(keyref))
                    if !keyref.element.is_empty() && !keyref.attribute.is_empty() =>
                {
                    self.keyrefs.push(keyref);
                }
                _ => {}
            },
            _ => {}
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(value) => Ok(Some(value.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn strip_prefix(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn is_builtin(name: &str) -> bool {
    name.starts_with("xs:") || name.starts_with("xsd:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::GraphMlXmlResolver;

    // Helper function to load the embedded GraphML schema set
    fn graphml_schema() -> Schema {
        Schema::load(&GraphMlXmlResolver::new(), "graphml.xsd").unwrap()
    }

    #[test]
    fn follows_redefine_and_import() {
        let schema = graphml_schema();
        assert_eq!(schema.document_count(), 5);
        assert_eq!(
            schema.target_namespace(),
            Some("http://graphml.graphdrawing.org/xmlns")
        );
    }

    #[test]
    fn element_declarations() {
        let schema = graphml_schema();

        let graph = schema.element("graph").unwrap();
        assert!(graph.children.contains("node"));
        assert!(graph.children.contains("edge"));
        assert!(!graph.children.contains("key"));
        assert_eq!(graph.required, vec!["edgedefault".to_string()]);
        assert!(!graph.text_allowed);

        let data = schema.element("data").unwrap();
        assert!(data.any_children);
        assert!(data.text_allowed);

        assert!(schema.element("desc").unwrap().text_allowed);
        assert_eq!(
            schema.element("locator").unwrap().required,
            vec!["xlink:href".to_string()]
        );
    }

    #[test]
    fn attribute_value_kinds() {
        let schema = graphml_schema();

        assert!(schema.value_kind("edgedefault").accepts("undirected"));
        assert!(!schema.value_kind("edgedefault").accepts("mixed"));
        assert!(schema.value_kind("attr.type").accepts("double"));
        assert!(!schema.value_kind("attr.type").accepts("short"));
        assert!(schema.value_kind("for").accepts("all"));
        assert!(schema.value_kind("parse.order").accepts("nodesfirst"));
        assert_eq!(
            schema.value_kind("parse.nodes"),
            LexicalSpace::NonNegativeInteger
        );
        assert!(!schema.value_kind("parse.nodes").accepts("-1"));
        assert_eq!(schema.value_kind("directed"), LexicalSpace::Boolean);
        assert_eq!(schema.value_kind("id"), LexicalSpace::Unrestricted);
        assert_eq!(schema.value_kind("no.such"), LexicalSpace::Unrestricted);
    }

    #[test]
    fn identity_constraints() {
        let schema = graphml_schema();

        assert!(schema
            .keys()
            .iter()
            .any(|k| k.element == "node" && k.attribute == "id"));
        assert!(schema
            .keyrefs()
            .iter()
            .any(|r| r.element == "edge" && r.attribute == "target" && r.refer == "node.id.key"));
    }

    #[test]
    fn unresolved_document() {
        match Schema::load(&GraphMlXmlResolver::new(), "missing.xsd") {
            Err(Error::Validation(message)) => assert!(message.contains("missing.xsd")),
            other => panic!("Expected Validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn inline_simple_type() {
        struct Single;

        impl XmlResolver for Single {
            fn resolve(&self, _uri: &str) -> Result<Option<Box<dyn Read + '_>>> {
                let data: &'static [u8] = br#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                    <xs:element name="shape">
                      <xs:complexType>
                        <xs:attribute name="kind" use="required">
                          <xs:simpleType>
                            <xs:restriction base="xs:string">
                              <xs:enumeration value="round"/>
                              <xs:enumeration value="square"/>
                            </xs:restriction>
                          </xs:simpleType>
                        </xs:attribute>
                      </xs:complexType>
                    </xs:element>
                  </xs:schema>"#;
                Ok(Some(Box::new(data)))
            }
        }

        let schema = Schema::load(&Single, "shape.xsd").unwrap();
        assert!(schema.value_kind("kind").accepts("round"));
        assert!(!schema.value_kind("kind").accepts("oval"));
        assert_eq!(schema.element("shape").unwrap().required, vec!["kind".to_string()]);
    }
}
