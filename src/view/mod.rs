//! View model: the parsed compounds bound into navigable graphs.
//!
//! Construction is arena style. Every compound is registered first (by
//! position in `compounds`, keyed by ID in `by_id`); only then are the ID
//! references between them resolved into index edges, permalinks computed
//! and the member index built. After [`ViewModel::build`] returns the model
//! is read-only.

pub mod hierarchy;
pub mod members;
pub mod permalink;

pub use members::{MemberEntry, MemberIndex};
pub use permalink::PermalinkRegistry;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};
use crate::model::{CompoundDef, CompoundKind, Doxyfile, ParsedXml};
use crate::options::Options;
use std::collections::{HashMap, HashSet};

/// Position of a compound in [`ViewModel::compounds`].
pub type CompoundIdx = usize;

#[derive(Debug)]
pub struct ViewCompound {
    pub def: CompoundDef,
    /// Tree parent (at most one) or, for classes, the base classes.
    pub parents: Vec<CompoundIdx>,
    /// Tree children or, for classes, the derived classes.
    pub children: Vec<CompoundIdx>,
    /// Enclosing namespace or class of a class.
    pub scope: Option<CompoundIdx>,
    /// Classes declared directly inside this namespace or class.
    pub scoped_classes: Vec<CompoundIdx>,
    pub permalink: String,
    pub sidebar_label: String,
    pub sidebar_id: String,
    pub page_title: String,
}

impl ViewCompound {
    fn new(def: CompoundDef) -> Self {
        Self {
            def,
            parents: Vec::new(),
            children: Vec::new(),
            scope: None,
            scoped_classes: Vec::new(),
            permalink: String::new(),
            sidebar_label: String::new(),
            sidebar_id: String::new(),
            page_title: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn kind(&self) -> CompoundKind {
        self.def.kind
    }

    pub fn parent(&self) -> Option<CompoundIdx> {
        self.parents.first().copied()
    }
}

#[derive(Debug)]
pub struct ViewModel {
    pub compounds: Vec<ViewCompound>,
    by_id: HashMap<String, CompoundIdx>,
    pub namespaces: Vec<CompoundIdx>,
    pub classes: Vec<CompoundIdx>,
    pub folders: Vec<CompoundIdx>,
    pub files: Vec<CompoundIdx>,
    pub groups: Vec<CompoundIdx>,
    pub pages: Vec<CompoundIdx>,
    /// The `indexpage` page, rendered as the top-level index.
    pub main_page: Option<CompoundIdx>,
    pub members: MemberIndex,
    pub permalinks: PermalinkRegistry,
    pub doxyfile: Doxyfile,
    skipped: HashSet<String>,
    url_prefix: String,
}

impl ViewModel {
    pub fn build(parsed: ParsedXml, options: &Options, diagnostics: &Diagnostics) -> Result<Self> {
        let mut model = Self::register(parsed, options, diagnostics);
        hierarchy::resolve(&mut model)?;
        permalink::assign(&mut model, options, diagnostics);
        model.members = MemberIndex::build(&model, diagnostics);
        tracing::debug!(
            compounds = model.compounds.len(),
            members = model.members.len(),
            "view model ready"
        );
        Ok(model)
    }

    fn register(parsed: ParsedXml, options: &Options, diagnostics: &Diagnostics) -> Self {
        let mut model = Self {
            compounds: Vec::with_capacity(parsed.compounds.len()),
            by_id: HashMap::new(),
            namespaces: Vec::new(),
            classes: Vec::new(),
            folders: Vec::new(),
            files: Vec::new(),
            groups: Vec::new(),
            pages: Vec::new(),
            main_page: None,
            members: MemberIndex::default(),
            permalinks: PermalinkRegistry::default(),
            doxyfile: parsed.doxyfile,
            skipped: parsed.skipped,
            url_prefix: options.url_prefix(),
        };

        for def in parsed.compounds {
            if model.by_id.contains_key(&def.id) {
                diagnostics.report(
                    DiagnosticKind::DuplicateId,
                    format!("compound {} defined more than once, keeping the first", def.id),
                );
                continue;
            }
            let idx = model.compounds.len();
            model.by_id.insert(def.id.clone(), idx);
            match def.kind {
                CompoundKind::Namespace => model.namespaces.push(idx),
                CompoundKind::Dir => model.folders.push(idx),
                CompoundKind::File => model.files.push(idx),
                CompoundKind::Group => model.groups.push(idx),
                CompoundKind::Page if def.id == "indexpage" => model.main_page = Some(idx),
                CompoundKind::Page => model.pages.push(idx),
                kind if kind.is_class_like() => model.classes.push(idx),
                _ => {}
            }
            model.compounds.push(ViewCompound::new(def));
        }
        model
    }

    pub fn get(&self, idx: CompoundIdx) -> &ViewCompound {
        &self.compounds[idx]
    }

    pub fn find(&self, id: &str) -> Option<CompoundIdx> {
        self.by_id.get(id).copied()
    }

    pub fn compound_by_id(&self, id: &str) -> Option<&ViewCompound> {
        self.find(id).map(|idx| &self.compounds[idx])
    }

    pub fn is_skipped(&self, id: &str) -> bool {
        self.skipped.contains(id)
    }

    /// Look up a referenced compound; unknown IDs are fatal.
    pub(crate) fn require(&self, from: &str, refid: &str) -> Result<CompoundIdx> {
        self.find(refid).ok_or_else(|| Error::UnresolvedReference {
            from: from.to_string(),
            refid: refid.to_string(),
        })
    }

    /// Site URL of a relative permalink. Folder index pages drop `/index`.
    pub fn url_for_permalink(&self, permalink: &str) -> String {
        if permalink == "index" {
            let trimmed = self.url_prefix.trim_end_matches('/');
            return if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            };
        }
        let path = permalink.strip_suffix("/index").unwrap_or(permalink);
        format!("{}{}", self.url_prefix, path)
    }

    pub fn page_url(&self, idx: CompoundIdx) -> String {
        self.url_for_permalink(&self.compounds[idx].permalink)
    }

    pub fn compound_url(&self, id: &str) -> Option<String> {
        self.find(id).map(|idx| self.page_url(idx))
    }

    /// URL of a member anchor. IDs that are not members (page sections,
    /// anchors) fall back to the compound named by their prefix.
    pub fn member_url(&self, id: &str) -> Option<String> {
        if let Some(entry) = self.members.get(id) {
            return Some(format!("{}#{}", self.page_url(entry.compound), entry.anchor));
        }
        let owner = members::owner_prefix(id)?;
        let idx = self.find(owner)?;
        Some(format!("{}#{}", self.page_url(idx), id))
    }

    /// Entries of `list` that have no parent, in encounter order.
    pub fn roots(&self, list: &[CompoundIdx]) -> Vec<CompoundIdx> {
        list.iter()
            .copied()
            .filter(|&idx| self.compounds[idx].parents.is_empty())
            .collect()
    }

    pub fn project_name(&self) -> String {
        self.doxyfile
            .project_name()
            .map(str::to_string)
            .or_else(|| {
                self.main_page
                    .and_then(|idx| self.compounds[idx].def.title.clone())
                    .filter(|t| !t.trim().is_empty())
            })
            .unwrap_or_else(|| "API Reference".to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{build, compound, try_build};
    use super::*;

    #[test]
    fn registers_by_kind() {
        let (model, diagnostics) = build(&[
            &compound("namespaceA", "namespace", "A", ""),
            &compound("classAB", "class", "A::B", ""),
            &compound("structS", "struct", "S", ""),
            &compound("indexpage", "page", "index", "<title>Main</title>"),
            &compound("intro", "page", "intro", "<title>Intro</title>"),
        ]);
        assert_eq!(model.namespaces.len(), 1);
        assert_eq!(model.classes.len(), 2);
        assert_eq!(model.pages.len(), 1);
        assert_eq!(model.main_page, model.find("indexpage"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duplicate_compound_id_is_a_warning() {
        let diagnostics = Diagnostics::new();
        let model = try_build(
            &[
                &compound("classX", "class", "X", ""),
                &compound("classX", "class", "Y", ""),
            ],
            &diagnostics,
        )
        .unwrap();
        assert_eq!(model.classes.len(), 1);
        assert_eq!(model.get(0).def.name, "X");
        assert_eq!(diagnostics.count(DiagnosticKind::DuplicateId), 1);
    }

    #[test]
    fn urls() {
        let (model, _) = build(&[
            &compound("classAB", "class", "A::B", ""),
            &compound("indexpage", "page", "index", ""),
        ]);
        assert_eq!(model.compound_url("classAB").as_deref(), Some("/api/classes/a/b"));
        assert_eq!(model.compound_url("indexpage").as_deref(), Some("/api"));
        assert_eq!(model.url_for_permalink("classes/index"), "/api/classes");
    }

    #[test]
    fn section_anchors_fall_back_to_owner_page() {
        let (model, _) = build(&[&compound("intro", "page", "intro", "<title>Intro</title>")]);
        assert_eq!(
            model.member_url("intro_1setup").as_deref(),
            Some("/api/pages/intro#intro_1setup")
        );
        assert_eq!(model.member_url("nowhere_1x"), None);
    }

    #[test]
    fn project_name_falls_back_to_main_page_title() {
        let (model, _) = build(&[&compound("indexpage", "page", "index", "<title>My Lib</title>")]);
        assert_eq!(model.project_name(), "My Lib");
    }
}
