//! `index.xml`: the manifest of every compound Doxygen emitted.

use crate::error::{Error, Result};
use crate::xml::{Element, XmlParser};

#[derive(Debug, Clone, PartialEq)]
pub struct IndexMember {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexCompound {
    pub refid: String,
    /// Kept as the raw string: the index lists kinds (`example`, `concept`,
    /// `module`, ...) the converter skips.
    pub kind: String,
    pub name: String,
    pub members: Vec<IndexMember>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoxygenIndex {
    pub version: Option<String>,
    pub compounds: Vec<IndexCompound>,
}

impl DoxygenIndex {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["version", "lang"]);

        let mut index = Self {
            version: element.attribute("version").map(str::to_string),
            compounds: Vec::new(),
        };
        for child in element.child_elements() {
            if child.name() != "compound" {
                xml.unknown_element(&element, &child);
                continue;
            }
            xml.check_attributes(&child, &["refid", "kind"]);

            let mut members = Vec::new();
            for member in child.child_elements().filter(|m| m.name() == "member") {
                members.push(IndexMember {
                    refid: member.attribute_string("refid")?,
                    kind: member.attribute_string("kind")?,
                    name: member.inner_text("name")?,
                });
            }
            let compound = IndexCompound {
                refid: child.attribute_string("refid")?,
                kind: child.attribute_string("kind")?,
                name: child.inner_text("name")?,
                members,
            };
            if compound.refid.is_empty() {
                return Err(Error::structural(format!(
                    "index compound {} has an empty refid",
                    compound.name
                )));
            }
            index.compounds.push(compound);
        }
        Ok(index)
    }
}
