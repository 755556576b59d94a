//! Typed query surface over the order-preserving XML DOM.
//!
//! Every data-model builder walks Doxygen XML through [`Element`]. Missing
//! required attributes or elements are hard errors; elements and attributes
//! that are merely not modelled yet are routed to [`XmlParser`], which
//! records them as diagnostics and lets parsing continue.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::str::FromStr;

/// Pseudo element name addressing the text children of a node.
pub const TEXT: &str = "#text";

/// Parse an XML string into a DOM. Namespaces are ignored by every accessor.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// One child of an element, in document order.
#[derive(Debug, Clone, Copy)]
pub enum Content<'a, 'input> {
    Text(&'a str),
    Element(Element<'a, 'input>),
}

/// A borrowed XML element.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Element<'a, 'input> {
    pub fn root(document: &'a Document<'input>) -> Self {
        Self {
            node: document.root_element(),
        }
    }

    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    // -- Attributes -----------------------------------------------------------

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.has_attribute(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Attributes without a namespace prefix, in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.node
            .attributes()
            .filter(|a| a.namespace().is_none())
            .map(|a| (a.name(), a.value()))
    }

    pub fn attribute_string(&self, name: &str) -> Result<String> {
        self.attribute(name)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
            })
    }

    pub fn attribute_number<T: FromStr>(&self, name: &str) -> Result<T> {
        let raw = self.attribute_string(name)?;
        raw.trim().parse().map_err(|_| self.invalid(name, &raw))
    }

    /// Doxygen encodes booleans as `yes` / `no`.
    pub fn attribute_bool(&self, name: &str) -> Result<bool> {
        let raw = self.attribute_string(name)?;
        match raw.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(self.invalid(name, &raw)),
        }
    }

    pub fn optional_attribute_number<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        if self.has_attribute(name) {
            self.attribute_number(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Absent boolean attributes read as `false`.
    pub fn flag(&self, name: &str) -> Result<bool> {
        if self.has_attribute(name) {
            self.attribute_bool(name)
        } else {
            Ok(false)
        }
    }

    fn invalid(&self, attribute: &str, value: &str) -> Error {
        Error::InvalidAttribute {
            element: self.name().to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    // -- Inner elements -------------------------------------------------------

    /// True if a child element with this name exists. [`TEXT`] asks for
    /// non-blank text content instead.
    pub fn has_inner_element(&self, name: &str) -> bool {
        if name == TEXT {
            return self
                .node
                .children()
                .any(|c| c.is_text() && c.text().is_some_and(|t| !t.trim().is_empty()));
        }
        self.child_elements().any(|e| e.name() == name)
    }

    /// True if the named child holds only text, or nothing at all (an empty
    /// element stands for an empty string).
    pub fn is_inner_element_text(&self, name: &str) -> bool {
        match self.first_inner_element(name) {
            Some(child) => child.child_elements().next().is_none(),
            None => false,
        }
    }

    /// All child elements with this name; fails if there are none.
    pub fn inner_elements(&self, name: &str) -> Result<Vec<Element<'a, 'input>>> {
        let found: Vec<_> = self.child_elements().filter(|e| e.name() == name).collect();
        if found.is_empty() {
            return Err(Error::MissingElement {
                element: self.name().to_string(),
                child: name.to_string(),
            });
        }
        Ok(found)
    }

    pub fn first_inner_element(&self, name: &str) -> Option<Element<'a, 'input>> {
        self.child_elements().find(|e| e.name() == name)
    }

    /// Text of a required text-only child element.
    pub fn inner_text(&self, name: &str) -> Result<String> {
        self.first_inner_element(name)
            .map(|e| e.text())
            .ok_or_else(|| Error::MissingElement {
                element: self.name().to_string(),
                child: name.to_string(),
            })
    }

    pub fn child_elements(&self) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.node
            .children()
            .filter(|c| c.is_element())
            .map(|node| Element { node })
    }

    /// Mixed content: text runs and elements in document order.
    pub fn content(&self) -> Vec<Content<'a, 'input>> {
        self.node
            .children()
            .filter_map(|c| {
                if c.is_element() {
                    Some(Content::Element(Element { node: c }))
                } else if c.is_text() {
                    c.text().map(Content::Text)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        self.node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }
}

/// Parsing context handed to every data-model builder.
pub struct XmlParser<'d> {
    diagnostics: &'d Diagnostics,
}

impl<'d> XmlParser<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &'d Diagnostics {
        self.diagnostics
    }

    pub fn expect_name(&self, element: &Element<'_, '_>, expected: &str) -> Result<()> {
        if element.name() != expected {
            return Err(Error::UnexpectedElement {
                expected: expected.to_string(),
                found: element.name().to_string(),
            });
        }
        Ok(())
    }

    pub fn unknown_element(&self, parent: &Element<'_, '_>, child: &Element<'_, '_>) {
        self.diagnostics
            .unsupported(format!("<{}> inside <{}>", child.name(), parent.name()));
    }

    /// Log every attribute of `element` not listed in `known`.
    pub fn check_attributes(&self, element: &Element<'_, '_>, known: &[&str]) {
        for (name, value) in element.attributes() {
            if !known.contains(&name) {
                self.diagnostics.unsupported(format!(
                    "attribute {}=\"{}\" on <{}>",
                    name,
                    value,
                    element.name()
                ));
            }
        }
    }

    pub fn unknown_value(&self, element: &Element<'_, '_>, attribute: &str, value: &str) {
        self.diagnostics.unsupported(format!(
            "{}=\"{}\" on <{}>",
            attribute,
            value,
            element.name()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="compound.xsd" version="1.10.0">
  <compounddef id="classAB" kind="class" prot="public" final="no" lines="12">
    <compoundname>A::B</compoundname>
    <title></title>
    <briefdescription><para>Some <bold>bold</bold> text.</para></briefdescription>
  </compounddef>
</doxygen>"#;

    fn with_compound<F: FnOnce(Element<'_, '_>)>(f: F) {
        let doc = parse_document(SAMPLE).unwrap();
        let root = Element::root(&doc);
        let compound = root.inner_elements("compounddef").unwrap()[0];
        f(compound);
    }

    #[test]
    fn reads_typed_attributes() {
        with_compound(|c| {
            assert_eq!(c.attribute_string("id").unwrap(), "classAB");
            assert!(!c.attribute_bool("final").unwrap());
            assert_eq!(c.attribute_number::<u32>("lines").unwrap(), 12);
            assert!(!c.flag("abstract").unwrap());
        });
    }

    #[test]
    fn missing_attribute_is_an_error() {
        with_compound(|c| {
            let err = c.attribute_string("language").unwrap_err();
            assert!(matches!(err, Error::MissingAttribute { .. }));
            assert!(c.attribute_bool("kind").is_err());
        });
    }

    #[test]
    fn namespaced_attributes_are_ignored() {
        let doc = parse_document(SAMPLE).unwrap();
        let root = Element::root(&doc);
        let names: Vec<_> = root.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["version"]);
    }

    #[test]
    fn inner_element_queries() {
        with_compound(|c| {
            assert!(c.has_inner_element("compoundname"));
            assert!(!c.has_inner_element("sectiondef"));
            assert!(c.is_inner_element_text("compoundname"));
            assert!(c.is_inner_element_text("title"));
            assert!(!c.is_inner_element_text("briefdescription"));
            assert!(c.inner_elements("sectiondef").is_err());
            assert_eq!(c.inner_text("compoundname").unwrap(), "A::B");
        });
    }

    #[test]
    fn text_pseudo_element() {
        with_compound(|c| {
            let para = c.first_inner_element("briefdescription").unwrap();
            let para = para.first_inner_element("para").unwrap();
            assert!(para.has_inner_element(TEXT));
            assert!(!c.has_inner_element(TEXT));
        });
    }

    #[test]
    fn mixed_content_keeps_order() {
        with_compound(|c| {
            let para = c
                .first_inner_element("briefdescription")
                .and_then(|b| b.first_inner_element("para"))
                .unwrap();
            let kinds: Vec<String> = para
                .content()
                .iter()
                .map(|item| match item {
                    Content::Text(t) => format!("text:{t}"),
                    Content::Element(e) => format!("elem:{}", e.name()),
                })
                .collect();
            assert_eq!(kinds, vec!["text:Some ", "elem:bold", "text: text."]);
            assert_eq!(para.text(), "Some bold text.");
        });
    }

    #[test]
    fn check_attributes_reports_unknown() {
        let diagnostics = Diagnostics::new();
        let parser = XmlParser::new(&diagnostics);
        with_compound(|c| {
            parser.check_attributes(&c, &["id", "kind", "prot", "final"]);
        });
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("lines"));
    }

    #[test]
    fn expect_name_rejects_other_elements() {
        let diagnostics = Diagnostics::new();
        let parser = XmlParser::new(&diagnostics);
        with_compound(|c| {
            assert!(parser.expect_name(&c, "compounddef").is_ok());
            assert!(matches!(
                parser.expect_name(&c, "memberdef"),
                Err(Error::UnexpectedElement { .. })
            ));
        });
    }
}
