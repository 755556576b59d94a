//! Sidebar manifest in the shape Docusaurus expects for a category.

use super::indexes::{collection_roots, COLLECTIONS};
use crate::render::RenderContext;
use crate::view::{CompoundIdx, ViewModel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Category {
        label: String,
        link: DocLink,
        collapsed: bool,
        items: Vec<SidebarItem>,
    },
    Doc {
        label: String,
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl DocLink {
    fn doc(id: impl Into<String>) -> Self {
        Self {
            kind: "doc".to_string(),
            id: id.into(),
        }
    }
}

impl SidebarItem {
    fn category(label: &str, id: &str, items: Vec<SidebarItem>) -> Self {
        Self::Category {
            label: label.to_string(),
            link: DocLink::doc(id),
            collapsed: true,
            items,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The top-level category: the main index, then one sub-category per
/// non-empty collection.
pub fn build_sidebar(ctx: &RenderContext) -> SidebarItem {
    let model = ctx.model;
    let prefix = ctx.options.sidebar_prefix();

    let mut items = Vec::new();
    for &(permalink, title, _) in COLLECTIONS {
        let roots = collection_roots(ctx, permalink);
        if roots.is_empty() {
            continue;
        }
        let children = if permalink == "classes/index" {
            class_items(model)
        } else {
            roots.iter().map(|&idx| tree_node(model, idx)).collect()
        };
        items.push(SidebarItem::category(title, &format!("{prefix}{permalink}"), children));
    }

    SidebarItem::Category {
        label: ctx.options.sidebar_label.clone(),
        link: DocLink::doc(format!("{prefix}index")),
        collapsed: false,
        items,
    }
}

fn doc(model: &ViewModel, idx: CompoundIdx) -> SidebarItem {
    let compound = model.get(idx);
    SidebarItem::Doc {
        label: compound.sidebar_label.clone(),
        id: compound.sidebar_id.clone(),
    }
}

/// Tree compounds become categories when they have children.
fn tree_node(model: &ViewModel, idx: CompoundIdx) -> SidebarItem {
    let compound = model.get(idx);
    if compound.children.is_empty() {
        return doc(model, idx);
    }
    let items = compound
        .children
        .iter()
        .map(|&child| tree_node(model, child))
        .collect();
    SidebarItem::category(&compound.sidebar_label, &compound.sidebar_id, items)
}

/// Classes nested under the namespaces and classes that enclose them.
fn class_items(model: &ViewModel) -> Vec<SidebarItem> {
    let mut items: Vec<SidebarItem> = model
        .roots(&model.namespaces)
        .into_iter()
        .filter_map(|idx| namespace_classes(model, idx))
        .collect();
    items.extend(
        model
            .classes
            .iter()
            .copied()
            .filter(|&idx| model.get(idx).scope.is_none())
            .map(|idx| scoped_class(model, idx)),
    );
    items
}

/// A namespace category holding its classes, or nothing when no class
/// lives anywhere below it.
fn namespace_classes(model: &ViewModel, idx: CompoundIdx) -> Option<SidebarItem> {
    let compound = model.get(idx);
    let mut items: Vec<SidebarItem> = compound
        .children
        .iter()
        .filter_map(|&child| namespace_classes(model, child))
        .collect();
    items.extend(
        compound
            .scoped_classes
            .iter()
            .map(|&class| scoped_class(model, class)),
    );
    if items.is_empty() {
        return None;
    }
    Some(SidebarItem::category(
        &compound.sidebar_label,
        &compound.sidebar_id,
        items,
    ))
}

fn scoped_class(model: &ViewModel, idx: CompoundIdx) -> SidebarItem {
    let compound = model.get(idx);
    if compound.scoped_classes.is_empty() {
        return doc(model, idx);
    }
    let items = compound
        .scoped_classes
        .iter()
        .map(|&inner| scoped_class(model, inner))
        .collect();
    SidebarItem::category(&compound.sidebar_label, &compound.sidebar_id, items)
}
