//! `linkedTextType`: types and initializers with embedded `<ref>` links.

use super::description::RefKind;
use crate::error::Result;
use crate::xml::{Content, Element, XmlParser};

#[derive(Debug, Clone, PartialEq)]
pub enum LinkedPart {
    Text(String),
    Ref {
        refid: String,
        kind: RefKind,
        external: Option<String>,
        text: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedText(pub Vec<LinkedPart>);

impl LinkedText {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;

        let mut parts = Vec::new();
        for item in element.content() {
            match item {
                Content::Text(text) => parts.push(LinkedPart::Text(text.to_string())),
                Content::Element(child) if child.name() == "ref" => {
                    let kindref = child.attribute_string("kindref")?;
                    match RefKind::from_doxygen(&kindref) {
                        Some(kind) => parts.push(LinkedPart::Ref {
                            refid: child.attribute_string("refid")?,
                            kind,
                            external: child.attribute("external").map(str::to_string),
                            text: child.text(),
                        }),
                        None => {
                            xml.unknown_value(&child, "kindref", &kindref);
                            parts.push(LinkedPart::Text(child.text()));
                        }
                    }
                }
                Content::Element(child) => xml.unknown_element(&element, &child),
            }
        }
        Ok(Self(parts))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self(vec![LinkedPart::Text(text.into())])
    }

    /// The text with links flattened away.
    pub fn plain(&self) -> String {
        self.0
            .iter()
            .map(|part| match part {
                LinkedPart::Text(text) => text.as_str(),
                LinkedPart::Ref { text, .. } => text.as_str(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plain().trim().is_empty()
    }
}
