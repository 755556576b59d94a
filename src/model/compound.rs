//! `compounddef` and the reference types hanging off it.

use super::description::{Description, ProgramListing};
use super::member::{parse_template_params, Location, MemberRef, Param, Protection, SectionDef, Virtualness};
use crate::error::{Error, Result};
use crate::xml::{Element, XmlParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Class,
    Struct,
    Union,
    Interface,
    Exception,
    Namespace,
    File,
    Dir,
    Group,
    Page,
}

impl CompoundKind {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        let kind = match value {
            "class" => Self::Class,
            "struct" => Self::Struct,
            "union" => Self::Union,
            "interface" => Self::Interface,
            "exception" => Self::Exception,
            "namespace" => Self::Namespace,
            "file" => Self::File,
            "dir" => Self::Dir,
            "group" => Self::Group,
            "page" => Self::Page,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Interface => "interface",
            Self::Exception => "exception",
            Self::Namespace => "namespace",
            Self::File => "file",
            Self::Dir => "dir",
            Self::Group => "group",
            Self::Page => "page",
        }
    }

    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Union | Self::Interface | Self::Exception
        )
    }

    /// Word used in page titles ("The Foo Class Reference").
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Struct => "Struct",
            Self::Union => "Union",
            Self::Interface => "Interface",
            Self::Exception => "Exception",
            Self::Namespace => "Namespace",
            Self::File => "File",
            Self::Dir => "Folder",
            Self::Group => "Topic",
            Self::Page => "Page",
        }
    }
}

/// `basecompoundref` / `derivedcompoundref`. The refid is missing for bases
/// outside the documented sources (e.g. `std::exception`).
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRef {
    pub refid: Option<String>,
    pub protection: Protection,
    pub virtualness: Virtualness,
    pub name: String,
}

impl CompoundRef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["refid", "prot", "virt"]);
        Ok(Self {
            refid: element.attribute("refid").map(str::to_string),
            protection: Protection::parse_attribute(&element)?.unwrap_or(Protection::Public),
            virtualness: Virtualness::parse_attribute(&element)?,
            name: element.text(),
        })
    }
}

/// `refType`: `innerclass`, `innernamespace`, `innerdir`, `innerfile`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct InnerRef {
    pub refid: String,
    pub protection: Option<Protection>,
    pub name: String,
}

impl InnerRef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["refid", "prot", "inline"]);
        Ok(Self {
            refid: element.attribute_string("refid")?,
            protection: Protection::parse_attribute(&element)?,
            name: element.text(),
        })
    }
}

/// `incType`: an `#include` line of a file or class.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub name: String,
    pub local: bool,
    pub refid: Option<String>,
}

impl Include {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["refid", "local"]);
        Ok(Self {
            name: element.text(),
            local: element.attribute_bool("local")?,
            refid: element.attribute("refid").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOfContents {
    pub sections: Vec<TocSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocSection {
    pub name: String,
    pub reference: String,
    pub nested: Option<TableOfContents>,
}

impl TableOfContents {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        let mut toc = Self::default();
        for child in element.child_elements() {
            if child.name() != "tocsect" {
                xml.unknown_element(&element, &child);
                continue;
            }
            toc.sections.push(TocSection {
                name: child.inner_text("name")?,
                reference: child.inner_text("reference")?,
                nested: match child.first_inner_element("tableofcontents") {
                    Some(inner) => Some(Self::parse(xml, inner, "tableofcontents")?),
                    None => None,
                },
            });
        }
        Ok(toc)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundDef {
    pub id: String,
    pub kind: CompoundKind,
    pub name: String,
    pub language: Option<String>,
    pub protection: Option<Protection>,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Inline namespace.
    pub is_inline: bool,
    pub title: Option<String>,
    pub brief: Description,
    pub detailed: Description,
    pub base_refs: Vec<CompoundRef>,
    pub derived_refs: Vec<CompoundRef>,
    pub includes: Vec<Include>,
    pub included_by: Vec<Include>,
    pub inner_namespaces: Vec<InnerRef>,
    pub inner_classes: Vec<InnerRef>,
    pub inner_dirs: Vec<InnerRef>,
    pub inner_files: Vec<InnerRef>,
    pub inner_groups: Vec<InnerRef>,
    pub inner_pages: Vec<InnerRef>,
    pub template_params: Option<Vec<Param>>,
    pub sections: Vec<SectionDef>,
    pub location: Option<Location>,
    pub program_listing: Option<ProgramListing>,
    pub all_members: Vec<MemberRef>,
    pub toc: Option<TableOfContents>,
}

impl CompoundDef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(
            &element,
            &["id", "kind", "language", "prot", "final", "inline", "abstract"],
        );

        let id = element.attribute_string("id")?;
        if id.is_empty() {
            return Err(Error::structural("compounddef with an empty id"));
        }
        let raw_kind = element.attribute_string("kind")?;
        let kind = CompoundKind::from_doxygen(&raw_kind).ok_or_else(|| Error::InvalidAttribute {
            element: format!("compounddef {id}"),
            attribute: "kind".to_string(),
            value: raw_kind.clone(),
        })?;

        let mut compound = Self {
            id,
            kind,
            name: String::new(),
            language: element.attribute("language").map(str::to_string),
            protection: Protection::parse_attribute(&element)?,
            is_final: element.flag("final")?,
            is_abstract: element.flag("abstract")?,
            is_inline: element.flag("inline")?,
            title: None,
            brief: Description::default(),
            detailed: Description::default(),
            base_refs: Vec::new(),
            derived_refs: Vec::new(),
            includes: Vec::new(),
            included_by: Vec::new(),
            inner_namespaces: Vec::new(),
            inner_classes: Vec::new(),
            inner_dirs: Vec::new(),
            inner_files: Vec::new(),
            inner_groups: Vec::new(),
            inner_pages: Vec::new(),
            template_params: None,
            sections: Vec::new(),
            location: None,
            program_listing: None,
            all_members: Vec::new(),
            toc: None,
        };

        for child in element.child_elements() {
            match child.name() {
                "compoundname" => compound.name = child.text(),
                "title" => compound.title = Some(child.text()),
                "basecompoundref" => compound
                    .base_refs
                    .push(CompoundRef::parse(xml, child, "basecompoundref")?),
                "derivedcompoundref" => compound
                    .derived_refs
                    .push(CompoundRef::parse(xml, child, "derivedcompoundref")?),
                "includes" => compound.includes.push(Include::parse(xml, child, "includes")?),
                "includedby" => compound
                    .included_by
                    .push(Include::parse(xml, child, "includedby")?),
                "innernamespace" => compound
                    .inner_namespaces
                    .push(InnerRef::parse(xml, child, "innernamespace")?),
                "innerclass" => compound
                    .inner_classes
                    .push(InnerRef::parse(xml, child, "innerclass")?),
                "innerdir" => compound.inner_dirs.push(InnerRef::parse(xml, child, "innerdir")?),
                "innerfile" => compound
                    .inner_files
                    .push(InnerRef::parse(xml, child, "innerfile")?),
                "innergroup" => compound
                    .inner_groups
                    .push(InnerRef::parse(xml, child, "innergroup")?),
                "innerpage" => compound
                    .inner_pages
                    .push(InnerRef::parse(xml, child, "innerpage")?),
                "templateparamlist" => {
                    compound.template_params = Some(parse_template_params(xml, child)?)
                }
                "sectiondef" => compound
                    .sections
                    .push(SectionDef::parse(xml, child, "sectiondef")?),
                "briefdescription" => {
                    compound.brief = Description::parse(xml, child, "briefdescription")?
                }
                "detaileddescription" => {
                    compound.detailed = Description::parse(xml, child, "detaileddescription")?
                }
                "location" => compound.location = Some(Location::parse(xml, child, "location")?),
                "programlisting" => {
                    compound.program_listing =
                        Some(ProgramListing::parse(xml, child, "programlisting")?)
                }
                "listofallmembers" => {
                    for member in child.child_elements() {
                        if member.name() == "member" {
                            compound
                                .all_members
                                .push(MemberRef::parse(xml, member, "member")?);
                        } else {
                            xml.unknown_element(&child, &member);
                        }
                    }
                }
                "tableofcontents" => {
                    compound.toc = Some(TableOfContents::parse(xml, child, "tableofcontents")?)
                }
                // Graphs are not rendered.
                "incdepgraph" | "invincdepgraph" | "inheritancegraph" | "collaborationgraph"
                | "directorydependencygraph" => {}
                _ => xml.unknown_element(&element, &child),
            }
        }

        if compound.name.is_empty() {
            return Err(Error::structural(format!(
                "compounddef {} has no compoundname",
                compound.id
            )));
        }
        Ok(compound)
    }

    /// Last `::`-separated segment of the name (template arguments kept).
    pub fn short_name(&self) -> &str {
        crate::slug::split_qualified(&self.name)
            .last()
            .copied()
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::xml::parse_document;

    fn parse(text: &str, diagnostics: &Diagnostics) -> Result<CompoundDef> {
        let doc = parse_document(text).unwrap();
        let xml = XmlParser::new(diagnostics);
        CompoundDef::parse(&xml, Element::root(&doc), "compounddef")
    }

    #[test]
    fn parses_class_with_bases() {
        let diagnostics = Diagnostics::new();
        let compound = parse(
            r#"<compounddef id="classAB" kind="class" language="C++" prot="public" abstract="yes">
  <compoundname>A::B</compoundname>
  <basecompoundref refid="classBase" prot="public" virt="non-virtual">Base</basecompoundref>
  <basecompoundref prot="public" virt="virtual">std::exception</basecompoundref>
  <includes refid="b_8h" local="no">a/b.h</includes>
  <innerclass refid="classAB_1_1Inner" prot="private">A::B::Inner</innerclass>
  <briefdescription><para>A class.</para></briefdescription>
  <detaileddescription/>
  <location file="a/b.h" line="3"/>
  <listofallmembers>
    <member refid="classAB_1a0f" prot="public" virt="non-virtual"><scope>A::B</scope><name>f</name></member>
  </listofallmembers>
</compounddef>"#,
            &diagnostics,
        )
        .unwrap();

        assert_eq!(compound.kind, CompoundKind::Class);
        assert_eq!(compound.short_name(), "B");
        assert!(compound.is_abstract);
        assert_eq!(compound.base_refs.len(), 2);
        assert_eq!(compound.base_refs[0].refid.as_deref(), Some("classBase"));
        assert_eq!(compound.base_refs[1].virtualness, Virtualness::Virtual);
        assert!(compound.base_refs[1].refid.is_none());
        assert_eq!(compound.includes[0].name, "a/b.h");
        assert!(!compound.includes[0].local);
        assert_eq!(compound.inner_classes[0].protection, Some(Protection::Private));
        assert_eq!(compound.all_members[0].kind, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn sealed_is_reported() {
        let diagnostics = Diagnostics::new();
        let compound = parse(
            r#"<compounddef id="classS" kind="class" final="yes" sealed="yes"><compoundname>S</compoundname></compounddef>"#,
            &diagnostics,
        )
        .unwrap();
        assert!(compound.is_final);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn missing_compoundname_is_fatal() {
        let diagnostics = Diagnostics::new();
        let err = parse(r#"<compounddef id="x" kind="class"/>"#, &diagnostics).unwrap_err();
        assert!(matches!(err, Error::Structural(_)));
    }

    #[test]
    fn unknown_children_are_tolerated() {
        let diagnostics = Diagnostics::new();
        let compound = parse(
            r#"<compounddef id="ns" kind="namespace"><compoundname>ns</compoundname><exports/></compounddef>"#,
            &diagnostics,
        )
        .unwrap();
        assert_eq!(compound.name, "ns");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn nested_table_of_contents() {
        let diagnostics = Diagnostics::new();
        let compound = parse(
            r#"<compounddef id="intro" kind="page"><compoundname>intro</compoundname><title>Intro</title>
<tableofcontents><tocsect><name>One</name><reference>intro_1one</reference>
<tableofcontents><tocsect><name>Sub</name><reference>intro_1sub</reference></tocsect></tableofcontents>
</tocsect></tableofcontents></compounddef>"#,
            &diagnostics,
        )
        .unwrap();
        let toc = compound.toc.unwrap();
        assert_eq!(toc.sections[0].name, "One");
        assert_eq!(toc.sections[0].nested.as_ref().unwrap().sections[0].reference, "intro_1sub");
    }
}
