//! XML document handle
//!
//! A small element tree read with quick-xml and rendered compactly.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes (in document order) and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    fn from_start(tag: &BytesStart<'_>) -> Result<Self> {
        let mut element = XmlElement::new(String::from_utf8_lossy(tag.name().as_ref()).into_owned());
        for attr in tag.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", key, escape(value, true)));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.render(out),
                XmlNode::Text(text) => out.push_str(&escape(text, false)),
            }
        }
        out.push_str(&format!("</{}>", self.name));
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Element(el) => collect_text(el, out),
            XmlNode::Text(text) => out.push_str(text),
        }
    }
}

/// A parsed XML document with a single root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parse XML text. Whitespace-only text between elements is dropped.
    pub fn create(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        reader.trim_text(true);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(tag) => stack.push(XmlElement::from_start(&tag)?),
                Event::Empty(tag) => {
                    let element = XmlElement::from_start(&tag)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| Error::Xml {
                        message: "closing tag without matching opening tag".to_string(),
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    push_text(&mut stack, text)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(Error::Xml {
                message: format!("unclosed element <{}>", open.name),
            });
        }
        root.map(Self::new).ok_or_else(|| Error::Xml {
            message: "document has no root element".to_string(),
        })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Compact rendering; re-parsing it yields an equal document.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.root.render(&mut out);
        out
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Xml {
            message: format!("second root element <{}>", element.name),
        });
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: String) -> Result<()> {
    let Some(current) = stack.last_mut() else {
        return Err(Error::Xml {
            message: "text outside the root element".to_string(),
        });
    };
    match current.children.last_mut() {
        Some(XmlNode::Text(existing)) => existing.push_str(&text),
        _ => current.children.push(XmlNode::Text(text)),
    }
    Ok(())
}

fn escape(input: &str, attribute: bool) -> String {
    let escaped = input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    if attribute {
        escaped.replace('"', "&quot;")
    } else {
        escaped
    }
}
