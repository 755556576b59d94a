//! Member ID → (owning compound, in-page anchor).
//!
//! Doxygen repeats a member under every compound that lists it: a function
//! appears in its class and again in the file and topic that mention it.
//! The member ID is `<compound-id>_1<hash>`, so the owner is recovered from
//! the prefix and the other listings are skipped.

use super::{CompoundIdx, ViewModel};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::MemberKind;
use crate::slug::member_anchor;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    pub compound: CompoundIdx,
    pub anchor: String,
    pub name: String,
    /// `None` for enumerators.
    pub kind: Option<MemberKind>,
}

#[derive(Debug, Default)]
pub struct MemberIndex {
    entries: HashMap<String, MemberEntry>,
}

/// Compound ID a member ID was derived from.
pub fn owner_prefix(member_id: &str) -> Option<&str> {
    member_id
        .rsplit_once("_1")
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
}

impl MemberIndex {
    pub fn build(model: &ViewModel, diagnostics: &Diagnostics) -> Self {
        let mut index = Self::default();
        for (idx, compound) in model.compounds.iter().enumerate() {
            let mut anchors = Anchors::default();
            for section in &compound.def.sections {
                for member in section.definitions() {
                    if !owns(model, compound.id(), &member.id) {
                        continue;
                    }
                    if index.entries.contains_key(&member.id) {
                        diagnostics.report(
                            DiagnosticKind::DuplicateId,
                            format!("member {} defined twice in {}", member.id, compound.id()),
                        );
                        continue;
                    }
                    let anchor = anchors.unique(member_anchor(&member.name));
                    index.entries.insert(
                        member.id.clone(),
                        MemberEntry {
                            compound: idx,
                            anchor,
                            name: member.name.clone(),
                            kind: Some(member.kind),
                        },
                    );

                    for value in &member.enum_values {
                        if index.entries.contains_key(&value.id) {
                            continue;
                        }
                        let anchor = anchors.unique(member_anchor(&value.name));
                        index.entries.insert(
                            value.id.clone(),
                            MemberEntry {
                                compound: idx,
                                anchor,
                                name: value.name.clone(),
                                kind: None,
                            },
                        );
                    }
                }
            }
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&MemberEntry> {
        self.entries.get(id)
    }

    pub fn owner(&self, id: &str) -> Option<CompoundIdx> {
        self.entries.get(id).map(|entry| entry.compound)
    }

    /// Whether `compound` renders the full details of member `id`.
    pub fn is_owned_by(&self, id: &str, compound: CompoundIdx) -> bool {
        self.owner(id) == Some(compound)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A listing owns a member when the member ID derives from the listing
/// compound, or when the compound the ID derives from was not converted.
fn owns(model: &ViewModel, compound_id: &str, member_id: &str) -> bool {
    match owner_prefix(member_id) {
        Some(prefix) if prefix == compound_id => true,
        Some(prefix) => model.find(prefix).is_none(),
        None => true,
    }
}

#[derive(Default)]
struct Anchors {
    used: HashSet<String>,
}

impl Anchors {
    /// First use keeps the plain anchor; later ones get `-1`, `-2`, ...
    fn unique(&mut self, anchor: String) -> String {
        if self.used.insert(anchor.clone()) {
            return anchor;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{anchor}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{build, compound};
    use super::*;

    fn function(id: &str, name: &str) -> String {
        format!(
            r#"<memberdef kind="function" id="{id}" prot="public" static="no"><type>void</type><name>{name}</name><argsstring>()</argsstring><location file="x.h" line="1"/></memberdef>"#
        )
    }

    #[test]
    fn owner_prefix_strips_last_anchor() {
        assert_eq!(owner_prefix("classAB_1a0f"), Some("classAB"));
        assert_eq!(owner_prefix("namespaceA_1_1B_1a12"), Some("namespaceA_1_1B"));
        assert_eq!(owner_prefix("plain"), None);
    }

    #[test]
    fn repeated_listing_is_owned_once() {
        let class_body = format!(
            r#"<sectiondef kind="public-func">{}</sectiondef>"#,
            function("classAB_1a0f", "f")
        );
        let file_body = format!(
            r#"<sectiondef kind="func">{}</sectiondef>"#,
            function("classAB_1a0f", "f")
        );
        let (model, diagnostics) = build(&[
            &compound("classAB", "class", "A::B", &class_body),
            &compound("b_8h", "file", "b.h", &file_body),
        ]);
        let class = model.find("classAB").unwrap();
        let entry = model.members.get("classAB_1a0f").unwrap();
        assert_eq!(entry.compound, class);
        assert_eq!(entry.anchor, "f");
        assert!(!model.members.is_owned_by("classAB_1a0f", model.find("b_8h").unwrap()));
        assert_eq!(model.members.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unconverted_owner_falls_back_to_first_listing() {
        let body = format!(
            r#"<sectiondef kind="func">{}</sectiondef>"#,
            function("namespacestd_1a1", "swap")
        );
        let (model, _) = build(&[&compound("b_8h", "file", "b.h", &body)]);
        assert_eq!(model.members.owner("namespacestd_1a1"), model.find("b_8h"));
    }

    #[test]
    fn overloads_get_numbered_anchors() {
        let body = format!(
            r#"<sectiondef kind="public-func">{}{}{}</sectiondef>"#,
            function("classC_1a1", "run"),
            function("classC_1a2", "run"),
            function("classC_1a3", "operator==")
        );
        let (model, _) = build(&[&compound("classC", "class", "C", &body)]);
        assert_eq!(model.members.get("classC_1a1").unwrap().anchor, "run");
        assert_eq!(model.members.get("classC_1a2").unwrap().anchor, "run-1");
        assert_eq!(model.members.get("classC_1a3").unwrap().anchor, "operator-eq");
        assert_eq!(
            model.member_url("classC_1a2").as_deref(),
            Some("/api/classes/c#run-1")
        );
    }

    #[test]
    fn enumerators_are_indexed() {
        let body = r#"<sectiondef kind="public-type">
<memberdef kind="enum" id="classC_1ae" prot="public" static="no" strong="yes">
  <type/><name>Mode</name>
  <enumvalue id="classC_1aeA" prot="public"><name>fast</name></enumvalue>
  <location file="x.h" line="1"/>
</memberdef></sectiondef>"#;
        let (model, _) = build(&[&compound("classC", "class", "C", body)]);
        let value = model.members.get("classC_1aeA").unwrap();
        assert_eq!(value.anchor, "fast");
        assert_eq!(value.kind, None);
    }
}
