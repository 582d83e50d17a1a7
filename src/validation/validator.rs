//! Single-pass document validation.

use std::{collections::HashSet, fmt::Display, io::Read};

use quick_xml::{
    events::{BytesStart, Event},
    name::ResolveResult,
    NsReader,
};

use crate::{
    serialization::{names, ValidationSettings},
    validation::{Schema, XmlResolver},
    Error, Result,
};

/// Marker every GraphML DTD declares.
const DTD_ROOT_DECLARATION: &str = "<!ELEMENT graphml";

fn violation(position: impl Display, message: impl Display) -> Error {
    Error::Validation(format!("{message} (at byte {position})"))
}

/// One open element of the document.
struct Frame {
    name: String,
    text_allowed: bool,
    any_children: bool,
    /// Inside wildcard content, nothing is checked
    lax: bool,
}

/// Everything collected while walking one document.
struct DocumentState {
    stack: Vec<Frame>,
    seen_root: bool,
    /// Values seen per `xs:key`, indexed like [`Schema::keys`]
    key_values: Vec<HashSet<String>>,
    references: Vec<PendingReference>,
}

/// A reference waiting for the end of the document.
struct PendingReference {
    keyref: usize,
    value: String,
    position: u64,
}

/// Checks GraphML documents against the schema set served by a resolver.
///
/// The validator checks, in one pass over the document:
///
/// - an optional DOCTYPE names a DTD the resolver can serve
/// - the root is `graphml` in the schema's target namespace
/// - every element is declared and allowed in its parent
/// - required attributes are present
/// - enumerated, boolean and non-negative integer attribute values
/// - structural elements contain no character data
/// - `key` and `node` ids are unique
/// - `data` keys and `edge` endpoints reference declared ids
/// - nesting stays within [`ValidationSettings::max_nesting_depth`]
///
/// The first violation ends validation with [`Error::Validation`].
pub struct Validator<'r, R: ?Sized> {
    resolver: &'r R,
    settings: &'r ValidationSettings,
    schema: Schema,
}

impl<'r, R: XmlResolver + ?Sized> Validator<'r, R> {
    /// Loads the schema set named by `settings` through `resolver`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if a schema document cannot be resolved or parsed.
    pub fn new(resolver: &'r R, settings: &'r ValidationSettings) -> Result<Self> {
        let schema = Schema::load(resolver, &settings.schema)?;
        Ok(Validator {
            resolver,
            settings,
            schema,
        })
    }

    /// The loaded schema set.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates the document in `data`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] describing the first violation.
    pub fn validate(&self, data: &[u8]) -> Result<()> {
        let mut reader = NsReader::from_reader(data);
        let mut buf = Vec::new();
        let mut state = DocumentState {
            stack: Vec::new(),
            seen_root: false,
            key_values: vec![HashSet::new(); self.schema.keys().len()],
            references: Vec::new(),
        };

        loop {
            buf.clear();
            let position = reader.buffer_position();
            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|error| violation(position, format!("document is not well-formed: {error}")))?;

            match event {
                Event::DocType(doctype) => {
                    self.check_doctype(&String::from_utf8_lossy(&doctype), position)?;
                }
                Event::Start(element) => self.start(&element, &resolved, false, &mut state, position)?,
                Event::Empty(element) => self.start(&element, &resolved, true, &mut state, position)?,
                Event::End(_) => {
                    state.stack.pop();
                }
                Event::Text(text) => {
                    self.check_text(&text.unescape()?, state.stack.last(), position)?;
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    self.check_text(&String::from_utf8_lossy(&data), state.stack.last(), position)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !state.seen_root {
            return Err(Error::Validation("document has no root element".to_string()));
        }
        self.check_references(&state)?;

        tracing::debug!(bytes = data.len(), "document is valid GraphML");
        Ok(())
    }

    /// Handles a start or empty-element tag.
    fn start(
        &self,
        element: &BytesStart<'_>,
        resolved: &ResolveResult<'_>,
        empty: bool,
        state: &mut DocumentState,
        position: u64,
    ) -> Result<()> {
        if state.stack.len() >= self.settings.max_nesting_depth {
            return Err(violation(
                position,
                format!(
                    "element nesting exceeds {} levels",
                    self.settings.max_nesting_depth
                ),
            ));
        }

        let name = std::str::from_utf8(element.local_name().as_ref())?.to_string();

        if state.stack.last().is_some_and(|frame| frame.lax || frame.any_children) {
            if !empty {
                state.stack.push(Frame {
                    name,
                    text_allowed: true,
                    any_children: true,
                    lax: true,
                });
            }
            return Ok(());
        }

        self.check_element(resolved, &name, &state.stack, state.seen_root, position)?;
        state.seen_root = true;
        self.check_attributes(element, &name, position, state)?;

        if !empty {
            let decl = self.schema.element(&name);
            state.stack.push(Frame {
                text_allowed: decl.is_some_and(|d| d.text_allowed),
                any_children: decl.is_some_and(|d| d.any_children),
                lax: false,
                name,
            });
        }
        Ok(())
    }

    /// Checks the collected `xs:keyref` values against their keys.
    fn check_references(&self, state: &DocumentState) -> Result<()> {
        for reference in &state.references {
            let keyref = &self.schema.keyrefs()[reference.keyref];
            let Some(key) = self.schema.keys().iter().position(|k| k.name == keyref.refer) else {
                continue;
            };
            if !state.key_values[key].contains(&reference.value) {
                let target = &self.schema.keys()[key];
                return Err(violation(
                    reference.position,
                    format!(
                        "{} {} '{}' does not match any {} {}",
                        keyref.element, keyref.attribute, reference.value, target.element, target.attribute
                    ),
                ));
            }
        }
        Ok(())
    }

    fn check_doctype(&self, doctype: &str, position: u64) -> Result<()> {
        let Some(system_id) = system_id(doctype) else {
            return Ok(());
        };

        match self.resolver.resolve(system_id)? {
            Some(mut source) => {
                let mut dtd = String::new();
                source.read_to_string(&mut dtd)?;
                if !dtd.contains(DTD_ROOT_DECLARATION) {
                    return Err(violation(
                        position,
                        format!("DTD '{system_id}' does not declare the graphml element"),
                    ));
                }
                Ok(())
            }
            None if self.settings.require_doctype_resolution => Err(violation(
                position,
                format!("DTD '{system_id}' could not be resolved"),
            )),
            None => {
                tracing::debug!(system_id = %system_id, "skipping unresolved DTD");
                Ok(())
            }
        }
    }

    fn check_element(
        &self,
        resolved: &ResolveResult<'_>,
        name: &str,
        stack: &[Frame],
        seen_root: bool,
        position: u64,
    ) -> Result<()> {
        let namespace = match resolved {
            ResolveResult::Bound(namespace) => Some(namespace.as_ref()),
            _ => None,
        };
        let expected = self.schema.target_namespace().map(str::as_bytes);

        match stack.last() {
            None => {
                if seen_root {
                    return Err(violation(position, "document has more than one root element"));
                }
                if name != names::GRAPHML || namespace != expected {
                    return Err(violation(
                        position,
                        format!(
                            "root element must be graphml in namespace '{}'",
                            self.schema.target_namespace().unwrap_or_default()
                        ),
                    ));
                }
            }
            Some(parent) => {
                let allowed = namespace == expected
                    && self
                        .schema
                        .element(&parent.name)
                        .is_some_and(|decl| decl.children.contains(name));
                if !allowed {
                    return Err(violation(
                        position,
                        format!("element '{}' is not allowed in '{}'", name, parent.name),
                    ));
                }
            }
        }

        if self.schema.element(name).is_none() {
            return Err(violation(position, format!("element '{name}' is not declared")));
        }
        Ok(())
    }

    fn check_attributes(
        &self,
        element: &BytesStart<'_>,
        name: &str,
        position: u64,
        state: &mut DocumentState,
    ) -> Result<()> {
        let mut present: Vec<(String, String)> = Vec::new();

        for attribute in element.attributes() {
            let attribute = attribute?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }

            let local = std::str::from_utf8(attribute.key.local_name().as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();

            if attribute.key.prefix().is_none() {
                let kind = self.schema.value_kind(&local);
                if !kind.accepts(&value) {
                    return Err(violation(
                        position,
                        format!("value '{value}' of attribute '{local}' on '{name}' is invalid, expected {kind}"),
                    ));
                }
            }
            present.push((local, value));
        }

        let value_of = |attribute: &str| {
            present
                .iter()
                .find(|(local, _)| local == attribute)
                .map(|(_, value)| value.as_str())
        };

        if let Some(decl) = self.schema.element(name) {
            for required in &decl.required {
                let local = required.rsplit(':').next().unwrap_or(required);
                if value_of(local).is_none() {
                    return Err(violation(
                        position,
                        format!("'{name}' is missing the required attribute '{required}'"),
                    ));
                }
            }
        }

        for (index, key) in self.schema.keys().iter().enumerate() {
            if key.element != name {
                continue;
            }
            if let Some(value) = value_of(&key.attribute) {
                if !state.key_values[index].insert(value.to_string()) {
                    return Err(violation(
                        position,
                        format!("duplicate {} {} '{}'", key.element, key.attribute, value),
                    ));
                }
            }
        }

        for (index, keyref) in self.schema.keyrefs().iter().enumerate() {
            if keyref.element != name {
                continue;
            }
            if let Some(value) = value_of(&keyref.attribute) {
                state.references.push(PendingReference {
                    keyref: index,
                    value: value.to_string(),
                    position,
                });
            }
        }

        Ok(())
    }

    fn check_text(&self, text: &str, parent: Option<&Frame>, position: u64) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        match parent {
            Some(frame) if frame.text_allowed || frame.lax => Ok(()),
            Some(frame) => Err(violation(
                position,
                format!("character data is not allowed in '{}'", frame.name),
            )),
            None => Err(violation(position, "character data outside the root element")),
        }
    }
}

/// Extracts the system identifier from the content of a DOCTYPE declaration.
///
/// `graphml SYSTEM "graphml.dtd"` and
/// `graphml PUBLIC "-//GraphML//DTD" "graphml.dtd"` both yield `graphml.dtd`.
/// Internal subsets are ignored.
fn system_id(doctype: &str) -> Option<&str> {
    let external = doctype.split('[').next().unwrap_or(doctype);
    let mut tokens = external.split_whitespace();
    tokens.next()?;

    let literals: Vec<&str> = external
        .split(['"', '\''])
        .skip(1)
        .step_by(2)
        .collect();

    match tokens.next()? {
        "SYSTEM" => literals.first().copied(),
        "PUBLIC" => literals.get(1).copied(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{GraphMlXmlResolver, NullXmlResolver};

    const VALID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE graphml SYSTEM "http://graphml.graphdrawing.org/dtds/graphml.dtd">
<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
         xmlns:y="http://www.yworks.com/xml/graphml">
  <desc>roads</desc>
  <key id="Size" for="node" attr.name="Size" attr.type="int">
    <default>0</default>
  </key>
  <graph id="G" edgedefault="directed" parse.nodes="2" parse.edges="1" parse.order="nodesfirst">
    <node id="a">
      <data key="Size">5<y:Label>ignored <b>markup</b></y:Label></data>
    </node>
    <node id="b"/>
    <edge id="e" source="a" target="b" directed="true"><![CDATA[]]></edge>
  </graph>
</graphml>"#;

    // Helper function to validate with default settings
    fn validate(document: &str) -> Result<()> {
        let resolver = GraphMlXmlResolver::new();
        let settings = ValidationSettings::default();
        Validator::new(&resolver, &settings)?.validate(document.as_bytes())
    }

    // Helper function to assert a violation mentioning `needle`
    fn assert_violation(document: &str, needle: &str) {
        match validate(document) {
            Err(Error::Validation(message)) => {
                assert!(message.contains(needle), "'{message}' does not mention '{needle}'")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    fn wrap(graph: &str) -> String {
        format!(
            r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><key id="k" for="node"/>{graph}</graphml>"#
        )
    }

    #[test]
    fn valid_document() {
        validate(VALID).unwrap();
    }

    #[test]
    fn root_element() {
        assert_violation("<graph/>", "root element must be graphml");
        assert_violation(
            r#"<graphml xmlns="urn:other"/>"#,
            "root element must be graphml",
        );
        assert_violation("", "no root element");
    }

    #[test]
    fn content_model() {
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><key id="x"/></graph>"#),
            "element 'key' is not allowed in 'graph'",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><y:n xmlns:y="urn:y"/></graph>"#),
            "element 'n' is not allowed in 'graph'",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed">text</graph>"#),
            "character data is not allowed in 'graph'",
        );
    }

    #[test]
    fn attributes() {
        assert_violation(&wrap("<graph/>"), "missing the required attribute 'edgedefault'");
        assert_violation(
            &wrap(r#"<graph edgedefault="mixed"/>"#),
            "value 'mixed' of attribute 'edgedefault'",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed" parse.nodes="-1"/>"#),
            "attribute 'parse.nodes'",
        );
        assert_violation(
            r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><key id="k" attr.type="short"/></graphml>"#,
            "attribute 'attr.type'",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><node/></graph>"#),
            "'node' is missing the required attribute 'id'",
        );
    }

    #[test]
    fn identity_constraints() {
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><node id="a"/><node id="a"/></graph>"#),
            "duplicate node id 'a'",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><node id="a"/><edge source="a" target="z"/></graph>"#),
            "edge target 'z' does not match any node id",
        );
        assert_violation(
            &wrap(r#"<graph edgedefault="directed"><node id="a"><data key="nope"/></node></graph>"#),
            "data key 'nope' does not match any key id",
        );
        // References may precede their targets
        validate(&wrap(
            r#"<graph edgedefault="directed"><edge source="a" target="a"/><node id="a"/></graph>"#,
        ))
        .unwrap();
    }

    #[test]
    fn nesting_depth() {
        let resolver = GraphMlXmlResolver::new();
        let settings = ValidationSettings {
            max_nesting_depth: 3,
            ..ValidationSettings::default()
        };
        let validator = Validator::new(&resolver, &settings).unwrap();

        let shallow = wrap(r#"<graph edgedefault="directed"><node id="a"/></graph>"#);
        validator.validate(shallow.as_bytes()).unwrap();

        let deep = wrap(
            r#"<graph edgedefault="directed"><node id="a"><graph edgedefault="directed"/></node></graph>"#,
        );
        match validator.validate(deep.as_bytes()) {
            Err(Error::Validation(message)) => assert!(message.contains("exceeds 3 levels")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn doctype_resolution() {
        assert_violation(
            r#"<!DOCTYPE graphml SYSTEM "http://example.com/unknown.dtd"><graphml xmlns="http://graphml.graphdrawing.org/xmlns"/>"#,
            "could not be resolved",
        );

        let resolver = GraphMlXmlResolver::new();
        let settings = ValidationSettings::lenient();
        Validator::new(&resolver, &settings)
            .unwrap()
            .validate(br#"<!DOCTYPE graphml SYSTEM "unknown.dtd"><graphml xmlns="http://graphml.graphdrawing.org/xmlns"/>"#)
            .unwrap();
    }

    #[test]
    fn dtd_must_declare_graphml() {
        struct Fake(GraphMlXmlResolver);

        impl XmlResolver for Fake {
            fn resolve(&self, uri: &str) -> Result<Option<Box<dyn Read + '_>>> {
                if uri.ends_with(".dtd") {
                    let dtd: &'static [u8] = b"<!ELEMENT other EMPTY>";
                    return Ok(Some(Box::new(dtd)));
                }
                self.0.resolve(uri)
            }
        }

        let settings = ValidationSettings::default();
        let fake = Fake(GraphMlXmlResolver::new());
        match Validator::new(&fake, &settings)
            .unwrap()
            .validate(br#"<!DOCTYPE graphml SYSTEM "graphml.dtd"><graphml xmlns="http://graphml.graphdrawing.org/xmlns"/>"#)
        {
            Err(Error::Validation(message)) => assert!(message.contains("does not declare")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn missing_schema() {
        let settings = ValidationSettings::default();
        assert!(matches!(
            Validator::new(&NullXmlResolver, &settings),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn system_identifiers() {
        assert_eq!(system_id(r#"graphml SYSTEM "graphml.dtd""#), Some("graphml.dtd"));
        assert_eq!(
            system_id(r#"graphml PUBLIC "-//GraphML//DTD" 'http://x/graphml.dtd'"#),
            Some("http://x/graphml.dtd")
        );
        assert_eq!(system_id("graphml [ <!ELEMENT graphml ANY> ]"), None);
    }
}
