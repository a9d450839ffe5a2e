//! A minimal element tree over the registry XML.
//!
//! The registry mixes text and markup inside a single entry
//! (`typedef unsigned int <name>GLenum</name>;`), so ingestion needs each
//! element's leading text and the text that trails each child. Attributes
//! keep document order; comments, processing instructions and the XML
//! declaration are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::base::{RegistryError, Result};

/// One element of the registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name, prefix included.
    pub tag: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Text between the start tag and the first child (or the end tag).
    pub text: String,
    /// Text between this element's end tag and the next sibling.
    pub tail: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let tag = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| RegistryError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut attributes = Vec::new();
        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| RegistryError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| RegistryError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| RegistryError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            attributes.push((key, value));
        }

        Ok(Self {
            tag,
            attributes,
            ..Self::default()
        })
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Append character data at the current position inside this element.
    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(last) => last.tail.push_str(text),
            None => self.text.push_str(text),
        }
    }
}

/// Parse a whole document and return its root element.
pub fn parse_document(input: &[u8]) -> Result<XmlElement> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            RegistryError::xml(format!(
                "XML parse error at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                stack.push(XmlElement::from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| RegistryError::xml("Unexpected end tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| RegistryError::xml(format!("Text error: {e}")))?;
                    current.push_text(&text);
                }
            }
            Event::CData(ref c) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(c)
                        .map_err(|e| RegistryError::xml(format!("CDATA error: {e}")))?;
                    current.push_text(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(RegistryError::xml(format!(
            "Unexpected end of document inside <{}>",
            open.tag
        )));
    }
    root.ok_or_else(|| RegistryError::xml("Document has no root element"))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(RegistryError::xml(format!(
            "Second root element <{}>",
            element.tag
        ))),
    }
}
