//! Write side of the per-type compiler.
//!
//! [`compile_write`] turns a typed getter and a codec writer function into a
//! closure that appends the property's text, or reports that the value equals
//! the declared default and must be elided. [`TypeCodec::write_data`] runs those
//! closures in discovery order and emits one `data` element for every property
//! that was not elided.

use std::io::Write;

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    attributes::Getter,
    codec::WriteFn,
    compiler::{PropertyWriter, TypeCodec},
    serialization::names,
    Result,
};

/// Builds the write closure of one property.
pub(crate) fn compile_write<T, V>(
    getter: Getter<T, V>,
    write: WriteFn<V>,
    default: Option<V>,
) -> PropertyWriter<T>
where
    T: 'static,
    V: PartialEq + Send + Sync + 'static,
{
    match default {
        Some(default) => Box::new(move |instance: &T, out: &mut String| {
            let value = getter(instance);
            if value == default {
                return false;
            }
            write(&value, out);
            true
        }),
        None => Box::new(move |instance: &T, out: &mut String| {
            write(&getter(instance), out);
            true
        }),
    }
}

impl<T> TypeCodec<T> {
    /// Writes one `<data key="..">..</data>` element per non-default property.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying XML writer fails.
    pub fn write_data<W: Write>(&self, xml: &mut Writer<W>, instance: &T) -> Result<()> {
        let mut text = String::new();

        for property in &self.properties {
            text.clear();
            if !property.write(instance, &mut text) {
                continue;
            }

            let mut start = BytesStart::new(names::DATA);
            start.push_attribute((names::KEY, property.name()));
            xml.write_event(Event::Start(start))?;
            xml.write_event(Event::Text(BytesText::new(&text)))?;
            xml.write_event(Event::End(BytesEnd::new(names::DATA)))?;
        }

        Ok(())
    }
}
