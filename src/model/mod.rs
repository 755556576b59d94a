//! Data model for Doxygen XML: one typed tree per compound.
//!
//! Builders take the parsing context, an XML element and the element name
//! they expect, and walk the children once. Required fields that are absent
//! fail the parse; optional elements nobody models yet are reported through
//! the diagnostics sink and skipped.

pub mod compound;
pub mod description;
pub mod doxyfile;
pub mod index;
pub mod linked_text;
pub mod member;

pub use compound::{CompoundDef, CompoundKind, CompoundRef, Include, InnerRef, TableOfContents};
pub use description::{Description, DocNode};
pub use doxyfile::Doxyfile;
pub use index::DoxygenIndex;
pub use linked_text::{LinkedPart, LinkedText};
pub use member::{
    MemberDef, MemberKind, MemberRef, Param, Protection, SectionDef, SectionKind, SectionMember,
};

use crate::error::Result;
use crate::xml::{parse_document, Element, XmlParser};
use std::collections::{HashMap, HashSet};

/// Everything read from one Doxygen XML folder.
#[derive(Debug, Default)]
pub struct ParsedXml {
    pub index: DoxygenIndex,
    pub doxyfile: Doxyfile,
    /// Compounds in index order.
    pub compounds: Vec<CompoundDef>,
    /// IDs listed in the index whose kind is not converted.
    pub skipped: HashSet<String>,
}

/// Parse `index.xml`.
pub fn parse_index(xml: &XmlParser, text: &str) -> Result<DoxygenIndex> {
    let document = parse_document(text)?;
    DoxygenIndex::parse(xml, Element::root(&document), "doxygenindex")
}

/// Parse `Doxyfile.xml`.
pub fn parse_doxyfile(xml: &XmlParser, text: &str) -> Result<Doxyfile> {
    let document = parse_document(text)?;
    Doxyfile::parse(xml, Element::root(&document), "doxyfile")
}

/// Parse a `<refid>.xml` file; it may hold several `compounddef`s.
pub fn parse_compound_file(xml: &XmlParser, text: &str) -> Result<Vec<CompoundDef>> {
    let document = parse_document(text)?;
    let root = Element::root(&document);
    xml.expect_name(&root, "doxygen")?;

    let mut compounds = Vec::new();
    for child in root.child_elements() {
        if child.name() == "compounddef" {
            compounds.push(CompoundDef::parse(xml, child, "compounddef")?);
        } else {
            xml.unknown_element(&root, &child);
        }
    }
    Ok(compounds)
}

/// Second pass over the parsed compounds: member references that carry no
/// kind get it from the member definition with the same ID.
pub fn backfill_member_kinds(compounds: &mut [CompoundDef]) {
    let mut kinds: HashMap<String, MemberKind> = HashMap::new();
    for compound in compounds.iter() {
        for section in &compound.sections {
            for def in section.definitions() {
                kinds.entry(def.id.clone()).or_insert(def.kind);
            }
        }
    }

    for compound in compounds.iter_mut() {
        let sections = compound.sections.iter_mut().flat_map(|s| s.members.iter_mut());
        let listed = sections.filter_map(|m| match m {
            SectionMember::Reference(r) => Some(r),
            SectionMember::Definition(_) => None,
        });
        for reference in listed.chain(compound.all_members.iter_mut()) {
            if reference.kind.is_none() {
                reference.kind = kinds.get(&reference.refid).copied();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    const CLASS_FILE: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.10.0">
  <compounddef id="classAB" kind="class" prot="public">
    <compoundname>A::B</compoundname>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="classAB_1a0f" prot="public" static="no">
        <type>void</type><name>f</name><argsstring>()</argsstring>
        <location file="a/b.h" line="5"/>
      </memberdef>
    </sectiondef>
    <location file="a/b.h" line="3"/>
    <listofallmembers>
      <member refid="classAB_1a0f" prot="public" virt="non-virtual"><scope>A::B</scope><name>f</name></member>
    </listofallmembers>
  </compounddef>
</doxygen>"#;

    #[test]
    fn parses_compound_file() {
        let diagnostics = Diagnostics::new();
        let xml = XmlParser::new(&diagnostics);
        let compounds = parse_compound_file(&xml, CLASS_FILE).unwrap();
        assert_eq!(compounds.len(), 1);
        assert_eq!(compounds[0].name, "A::B");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn backfills_listing_kinds() {
        let diagnostics = Diagnostics::new();
        let xml = XmlParser::new(&diagnostics);
        let mut compounds = parse_compound_file(&xml, CLASS_FILE).unwrap();
        assert_eq!(compounds[0].all_members[0].kind, None);

        backfill_member_kinds(&mut compounds);
        assert_eq!(compounds[0].all_members[0].kind, Some(MemberKind::Function));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let diagnostics = Diagnostics::new();
        let xml = XmlParser::new(&diagnostics);
        assert!(parse_compound_file(&xml, "<doxygenindex/>").is_err());
    }
}
