//! A small structured XML document builder.
//!
//! Every EPUB document is assembled as a tree of [`Element`]s and serialized
//! once. Text and attribute values are escaped here and nowhere else, so no
//! title, author or file name can break the markup of the documents that
//! carry it. Pre-rendered fragments (chapter bodies) are inserted with
//! [`Element::raw`] and written verbatim.

use std::borrow::Cow;
use std::fmt::Write;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new<S: ToString>(name: S) -> Element {
        Element {
            name: name.to_string(),
            attributes: Vec::default(),
            children: Vec::default(),
        }
    }

    /// Set an attribute, replacing any previous value with the same name.
    pub fn attr<K: ToString, V: ToString>(mut self, key: K, value: V) -> Element {
        let key = key.to_string();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    pub fn child(mut self, child: Element) -> Element {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Element {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text<S: ToString>(mut self, text: S) -> Element {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Append markup that is already well-formed, without escaping it.
    pub fn raw<S: ToString>(mut self, markup: S) -> Element {
        self.children.push(Node::Raw(markup.to_string()));
        self
    }

    /// Shorthand for an element holding only text.
    pub fn with_text<N: ToString, S: ToString>(name: N, text: S) -> Element {
        Element::new(name).text(text)
    }

    #[cfg(test)]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize the element and its children.
    ///
    /// Elements whose children are all elements are indented one child per
    /// line; anything holding text or raw markup is written inline so that no
    /// whitespace is added to its content.
    #[cfg(test)]
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(1024);
        self.write_to(&mut out, 0);
        out
    }

    /// Serialize as a standalone document, with the XML declaration and an
    /// optional doctype line.
    pub fn to_document(&self, doctype: Option<&str>) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        if let Some(doctype) = doctype {
            out.push_str(doctype);
            out.push('\n');
        }
        self.write_to(&mut out, 0);
        out.push('\n');
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // writing to a String cannot fail
            let _ = write!(out, r#" {}="{}""#, key, escape_attribute(value));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let block = self
            .children
            .iter()
            .all(|child| matches!(child, Node::Element(_)));
        for child in &self.children {
            match child {
                Node::Element(element) if block => {
                    out.push('\n');
                    push_indent(out, depth + 1);
                    element.write_to(out, depth + 1);
                }
                Node::Element(element) => element.write_to(out, depth + 1),
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Raw(markup) => out.push_str(&xml_chars(markup)),
            }
        }
        if block {
            out.push('\n');
            push_indent(out, depth);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Whether XML 1.0 allows `c` anywhere in a document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drop characters XML 1.0 does not allow, such as most C0 controls.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Escape character data.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    match xml_chars(text) {
        Cow::Borrowed(text) => html_escape::encode_text(text),
        Cow::Owned(text) => Cow::Owned(html_escape::encode_text(&text).into_owned()),
    }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    match xml_chars(value) {
        Cow::Borrowed(value) => html_escape::encode_double_quoted_attribute(value),
        Cow::Owned(value) => {
            Cow::Owned(html_escape::encode_double_quoted_attribute(&value).into_owned())
        }
    }
}
