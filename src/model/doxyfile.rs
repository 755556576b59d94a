//! `Doxyfile.xml`: the Doxygen configuration, read for project metadata.

use crate::error::{Error, Result};
use crate::xml::{Element, XmlParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Int,
    Bool,
    String,
    StringList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoxyOption {
    pub id: String,
    pub is_default: bool,
    pub kind: OptionType,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doxyfile {
    pub options: Vec<DoxyOption>,
}

impl Doxyfile {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;

        let mut doxyfile = Self::default();
        for child in element.child_elements() {
            if child.name() != "option" {
                xml.unknown_element(&element, &child);
                continue;
            }
            let raw_type = child.attribute_string("type")?;
            let kind = match raw_type.as_str() {
                "int" => OptionType::Int,
                "bool" => OptionType::Bool,
                "string" => OptionType::String,
                "stringlist" => OptionType::StringList,
                other => {
                    return Err(Error::InvalidAttribute {
                        element: "option".to_string(),
                        attribute: "type".to_string(),
                        value: other.to_string(),
                    })
                }
            };
            doxyfile.options.push(DoxyOption {
                id: child.attribute_string("id")?,
                is_default: child.attribute_bool("default")?,
                kind,
                values: child
                    .child_elements()
                    .filter(|v| v.name() == "value")
                    .map(|v| v.text())
                    .collect(),
            });
        }
        Ok(doxyfile)
    }

    pub fn get(&self, id: &str) -> Option<&DoxyOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// First value of a string option, if set and non-empty.
    pub fn string(&self, id: &str) -> Option<&str> {
        self.get(id)
            .and_then(|o| o.values.first())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.string("PROJECT_NAME")
    }

    pub fn project_brief(&self) -> Option<&str> {
        self.string("PROJECT_BRIEF")
    }

    pub fn project_number(&self) -> Option<&str> {
        self.string("PROJECT_NUMBER")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::xml::parse_document;

    #[test]
    fn reads_project_metadata() {
        let diagnostics = Diagnostics::new();
        let xml = XmlParser::new(&diagnostics);
        let doc = parse_document(
            r#"<doxyfile version="1.10.0">
  <option id="PROJECT_NAME" default="no" type="string"><value><![CDATA[Demo]]></value></option>
  <option id="PROJECT_BRIEF" default="yes" type="string"><value><![CDATA[]]></value></option>
  <option id="INPUT" default="no" type="stringlist"><value>src</value><value>include</value></option>
</doxyfile>"#,
        )
        .unwrap();
        let doxyfile = Doxyfile::parse(&xml, Element::root(&doc), "doxyfile").unwrap();

        assert_eq!(doxyfile.project_name(), Some("Demo"));
        assert_eq!(doxyfile.project_brief(), None);
        assert_eq!(doxyfile.get("INPUT").unwrap().values, vec!["src", "include"]);
        assert_eq!(doxyfile.get("INPUT").unwrap().kind, OptionType::StringList);
    }
}
