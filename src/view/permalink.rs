//! Relative permalinks, sidebar labels and page titles.
//!
//! Permalinks are computed per kind from the compound name and its tree
//! ancestry, then claimed in compound order. When several compounds claim
//! the same permalink (two anonymous namespaces, say) every claimant gets a
//! numeric suffix so no link silently points at the wrong page.

use super::hierarchy::ancestry;
use super::{CompoundIdx, ViewModel};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::CompoundKind;
use crate::options::Options;
use crate::slug::{sanitize_path, sanitize_segment, split_qualified, strip_template_args};
use std::collections::{HashMap, HashSet};

/// Permalinks of the generated collection index pages.
pub const COLLECTION_INDEXES: [&str; 6] = [
    "index",
    "classes/index",
    "namespaces/index",
    "files/index",
    "groups/index",
    "pages/index",
];

/// Insertion-ordered permalink claims.
#[derive(Debug, Default)]
pub struct PermalinkRegistry {
    order: Vec<String>,
    claims: HashMap<String, Vec<CompoundIdx>>,
    reserved: HashSet<String>,
}

impl PermalinkRegistry {
    /// Mark a permalink as taken by a page that is not a compound.
    pub fn reserve(&mut self, permalink: &str) {
        self.reserved.insert(permalink.to_string());
    }

    pub fn claim(&mut self, permalink: &str, idx: CompoundIdx) {
        let claimants = self.claims.entry(permalink.to_string()).or_default();
        if claimants.is_empty() {
            self.order.push(permalink.to_string());
        }
        claimants.push(idx);
    }

    pub fn owner(&self, permalink: &str) -> Option<CompoundIdx> {
        match self.claims.get(permalink).map(Vec::as_slice) {
            Some([idx]) => Some(*idx),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn is_taken(&self, permalink: &str) -> bool {
        self.reserved.contains(permalink) || self.claims.contains_key(permalink)
    }

    /// Give every claimant of a shared (or reserved) permalink a `-N`
    /// suffix. Returns the renames, in claim order.
    pub fn deduplicate(&mut self, diagnostics: &Diagnostics) -> Vec<(CompoundIdx, String)> {
        let mut renames = Vec::new();
        let order = std::mem::take(&mut self.order);
        for permalink in &order {
            let claimants = self.claims.get(permalink).cloned().unwrap_or_default();
            let collides = claimants.len() > 1 || self.reserved.contains(permalink);
            if !collides {
                self.order.push(permalink.clone());
                continue;
            }
            self.claims.remove(permalink);
            let message = if claimants.len() > 1 {
                format!("{} compounds share permalink {permalink}", claimants.len())
            } else {
                format!("permalink {permalink} is reserved for an index page")
            };
            diagnostics.report(DiagnosticKind::PermalinkCollision, message);
            let mut suffix = 1;
            for idx in claimants {
                let renamed = loop {
                    let candidate = format!("{permalink}-{suffix}");
                    suffix += 1;
                    if !self.is_taken(&candidate) {
                        break candidate;
                    }
                };
                self.claims.insert(renamed.clone(), vec![idx]);
                self.order.push(renamed.clone());
                renames.push((idx, renamed));
            }
        }
        renames
    }
}

pub(super) fn assign(model: &mut ViewModel, options: &Options, diagnostics: &Diagnostics) {
    let mut registry = PermalinkRegistry::default();
    for permalink in COLLECTION_INDEXES {
        registry.reserve(permalink);
    }

    for idx in 0..model.compounds.len() {
        let permalink = compute_permalink(model, idx);
        let label = sidebar_label(model, idx);
        let title = page_title(model, idx);
        let compound = &mut model.compounds[idx];
        compound.sidebar_label = label;
        compound.page_title = title;
        compound.permalink = permalink;
    }

    for idx in 0..model.compounds.len() {
        // The main page is the top-level index itself.
        if Some(idx) == model.main_page {
            continue;
        }
        registry.claim(&model.compounds[idx].permalink, idx);
    }
    for (idx, renamed) in registry.deduplicate(diagnostics) {
        model.compounds[idx].permalink = renamed;
    }

    let prefix = options.sidebar_prefix();
    for compound in &mut model.compounds {
        compound.sidebar_id = format!("{prefix}{}", compound.permalink);
    }
    model.permalinks = registry;
}

/// Path relative to the API folder, without extension.
pub fn compute_permalink(model: &ViewModel, idx: CompoundIdx) -> String {
    let compound = &model.compounds[idx];
    let def = &compound.def;
    match def.kind {
        CompoundKind::Namespace => {
            format!("namespaces/{}", sanitize_path(split_qualified(&def.name)))
        }
        kind if kind.is_class_like() => {
            let stripped = strip_template_args_per_segment(&def.name);
            format!("classes/{}", sanitize_path(stripped.iter().map(String::as_str)))
        }
        CompoundKind::Dir => format!("folders/{}", folder_path(model, idx)),
        CompoundKind::File => match compound.parent() {
            Some(folder) => format!(
                "files/{}/{}",
                folder_path(model, folder),
                sanitize_segment(&def.name)
            ),
            None => format!("files/{}", sanitize_segment(&def.name)),
        },
        CompoundKind::Group => format!("groups/{}", sanitize_segment(&def.name)),
        CompoundKind::Page if Some(idx) == model.main_page => "index".to_string(),
        CompoundKind::Page => format!("pages/{}", sanitize_segment(&def.name)),
        _ => format!("{}/{}", def.kind.as_str(), sanitize_segment(&def.name)),
    }
}

fn strip_template_args_per_segment(name: &str) -> Vec<String> {
    split_qualified(name)
        .into_iter()
        .map(strip_template_args)
        .collect()
}

/// Sanitized folder names from the outermost folder down to `idx`.
fn folder_path(model: &ViewModel, idx: CompoundIdx) -> String {
    let names: Vec<&str> = ancestry(model, idx)
        .into_iter()
        .filter(|&i| model.compounds[i].kind() == CompoundKind::Dir)
        .map(|i| folder_name(&model.compounds[i].def.name))
        .collect();
    sanitize_path(names)
}

/// Last path component of a folder's compound name.
fn folder_name(name: &str) -> &str {
    let trimmed = name.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

pub fn sidebar_label(model: &ViewModel, idx: CompoundIdx) -> String {
    let def = &model.compounds[idx].def;
    match def.kind {
        CompoundKind::Dir => folder_name(&def.name).to_string(),
        CompoundKind::Group | CompoundKind::Page => title_or_name(def),
        kind if kind.is_class_like() || kind == CompoundKind::Namespace => {
            def.short_name().to_string()
        }
        _ => def.name.clone(),
    }
}

pub fn page_title(model: &ViewModel, idx: CompoundIdx) -> String {
    let def = &model.compounds[idx].def;
    match def.kind {
        CompoundKind::Group | CompoundKind::Page => title_or_name(def),
        CompoundKind::Dir => {
            let names: Vec<&str> = ancestry(model, idx)
                .into_iter()
                .filter(|&i| model.compounds[i].kind() == CompoundKind::Dir)
                .map(|i| folder_name(&model.compounds[i].def.name))
                .collect();
            format!("The {} Folder Reference", names.join("/"))
        }
        kind if kind.is_class_like() && def.template_params.is_some() => {
            format!("The {} {} Template Reference", def.name, kind.display_name())
        }
        kind => format!("The {} {} Reference", def.name, kind.display_name()),
    }
}

fn title_or_name(def: &crate::model::CompoundDef) -> String {
    def.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&def.name)
        .to_string()
}
