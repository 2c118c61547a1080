//! XML parsing utilities for the Office Open XML parts of a workbook
//! Wraps the quick-xml event reader and adds attribute and text helpers

use crate::error::SheetMapperError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// Errors specific to XML parsing operations
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// XML reader wrapper configured for workbook parts
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    /// Creates a new XML reader; empty elements are expanded into start/end pairs
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.expand_empty_elements = true;
        config.trim_text(false);

        XmlReader {
            reader,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Reads the next XML event, `None` at end of input
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, SheetMapperError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(SheetMapperError::XmlError(error)),
        }
    }

    /// Collects the text of `<t>` runs until `end_tag` closes.
    ///
    /// Runs nested inside `skip_tag` (phonetic hints) are left out. When
    /// `is_text_content` is set, bare text directly under the element counts
    /// too, which is how `<v>` values are stored.
    pub(crate) fn read_text(
        &mut self,
        end_tag: &[u8],
        text_tag: &[u8],
        skip_tag: &[u8],
        is_text_content: bool,
    ) -> Result<String, SheetMapperError> {
        let mut is_skipped = false;
        let mut is_text = is_text_content;
        let mut text = String::new();
        crate::match_xml_events!(self => {
            Event::End(event) if event.local_name().as_ref() == end_tag => break,
            Event::Start(event) if event.local_name().as_ref() == skip_tag => is_skipped = true,
            Event::End(event) if event.local_name().as_ref() == skip_tag => is_skipped = false,
            Event::Start(event) if !is_skipped && event.local_name().as_ref() == text_tag => is_text = true,
            Event::End(event) if is_text && event.local_name().as_ref() == text_tag => is_text = false,
            Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
            Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
            Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
        });
        Ok(text)
    }
}

/// Helper trait for XML attributes providing value extraction and parsing
pub(crate) trait XmlAttributeHelper<'a> {
    /// Gets the unescaped attribute value
    fn get_value(&self) -> Result<Cow<'a, str>, SheetMapperError>;

    /// Parses the attribute value to the specified type
    fn parse_value<T: FromStr>(&self) -> Result<T, SheetMapperError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, SheetMapperError> {
        Ok(self.unescape_value()?)
    }

    fn parse_value<T: FromStr>(&self) -> Result<T, SheetMapperError> {
        let value = self.get_value()?;
        value
            .parse()
            .map_err(|_| XmlError::ParseAttributeValueError(value.to_string()).into())
    }
}

/// Helper trait for XML start tags providing attribute lookup by name
pub(crate) trait XmlNodeHelper<'a> {
    /// Gets an attribute value by name
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, SheetMapperError>;

    /// Parses an attribute value to the specified type
    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, SheetMapperError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, SheetMapperError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, SheetMapperError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.parse_value())
            .transpose()
    }
}

/// Helper trait for appending entity and character references to text
pub(crate) trait XmlTextContextHelper {
    /// Appends the text a `BytesRef` event stands for (`&amp;`, `&#65;`, `&#x41;`)
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), SheetMapperError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), SheetMapperError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16)?,
                None => number.parse::<u32>()?,
            };
            if let Some(character) = char::from_u32(code) {
                self.push(character);
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }
        Ok(())
    }
}

/// Drives an `XmlReader` until end of input, dispatching each event to the given arms.
/// Unmatched events are ignored; `break` inside an arm stops early.
#[macro_export]
#[doc(hidden)]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}
