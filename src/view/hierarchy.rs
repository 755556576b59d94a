//! Parent/child edges between compounds.
//!
//! Namespaces, folders (with their files), topics and pages form trees:
//! a compound has at most one parent. Classes form a DAG through their
//! base classes, and additionally record the namespace or class that
//! encloses them.

use super::{CompoundIdx, ViewModel};
use crate::error::{Error, Result};
use crate::model::{CompoundKind, InnerRef};

pub(super) fn resolve(model: &mut ViewModel) -> Result<()> {
    for idx in 0..model.compounds.len() {
        let def = &model.compounds[idx].def;
        let from = def.id.clone();

        let (tree, scoped): (Vec<&InnerRef>, Vec<&InnerRef>) = match def.kind {
            CompoundKind::Namespace => (
                def.inner_namespaces.iter().collect(),
                def.inner_classes.iter().collect(),
            ),
            CompoundKind::Dir => (
                def.inner_dirs.iter().chain(&def.inner_files).collect(),
                Vec::new(),
            ),
            CompoundKind::Group => (def.inner_groups.iter().collect(), Vec::new()),
            CompoundKind::Page => (def.inner_pages.iter().collect(), Vec::new()),
            kind if kind.is_class_like() => (Vec::new(), def.inner_classes.iter().collect()),
            _ => (Vec::new(), Vec::new()),
        };
        let tree = resolve_refs(model, &from, tree)?;
        let scoped = resolve_refs(model, &from, scoped)?;
        let bases = resolve_bases(model, idx)?;

        for child in tree {
            attach(model, idx, child)?;
        }
        for child in scoped {
            enclose(model, idx, child)?;
        }
        for base in bases {
            derive(model, base, idx);
        }
    }
    Ok(())
}

/// Map inner references to indices. References to compounds of a kind
/// that is not converted are dropped; anything else unknown is fatal.
fn resolve_refs(model: &ViewModel, from: &str, refs: Vec<&InnerRef>) -> Result<Vec<CompoundIdx>> {
    let mut resolved = Vec::with_capacity(refs.len());
    for inner in refs {
        if model.is_skipped(&inner.refid) {
            continue;
        }
        resolved.push(model.require(from, &inner.refid)?);
    }
    Ok(resolved)
}

fn resolve_bases(model: &ViewModel, idx: CompoundIdx) -> Result<Vec<CompoundIdx>> {
    let def = &model.compounds[idx].def;
    if !def.kind.is_class_like() {
        return Ok(Vec::new());
    }
    let mut bases = Vec::new();
    // Bases without a refid live outside the documented sources.
    for base in &def.base_refs {
        let Some(refid) = base.refid.as_deref() else {
            continue;
        };
        if model.is_skipped(refid) {
            continue;
        }
        let base_idx = model.require(&def.id, refid)?;
        if !bases.contains(&base_idx) {
            bases.push(base_idx);
        }
    }
    Ok(bases)
}

fn attach(model: &mut ViewModel, parent: CompoundIdx, child: CompoundIdx) -> Result<()> {
    if let Some(existing) = model.compounds[child].parent() {
        if existing == parent {
            return Ok(());
        }
        return Err(Error::DuplicateParent {
            child: model.compounds[child].def.id.clone(),
            existing: model.compounds[existing].def.id.clone(),
            parent: model.compounds[parent].def.id.clone(),
        });
    }
    model.compounds[child].parents.push(parent);
    model.compounds[parent].children.push(child);
    Ok(())
}

fn enclose(model: &mut ViewModel, scope: CompoundIdx, class: CompoundIdx) -> Result<()> {
    if !model.compounds[class].kind().is_class_like() {
        return Ok(());
    }
    match model.compounds[class].scope {
        Some(existing) if existing == scope => Ok(()),
        Some(existing) => Err(Error::DuplicateParent {
            child: model.compounds[class].def.id.clone(),
            existing: model.compounds[existing].def.id.clone(),
            parent: model.compounds[scope].def.id.clone(),
        }),
        None => {
            model.compounds[class].scope = Some(scope);
            model.compounds[scope].scoped_classes.push(class);
            Ok(())
        }
    }
}

fn derive(model: &mut ViewModel, base: CompoundIdx, derived: CompoundIdx) {
    model.compounds[derived].parents.push(base);
    model.compounds[base].children.push(derived);
}

/// Chain of tree ancestors, outermost first, ending with `idx` itself.
pub fn ancestry(model: &ViewModel, idx: CompoundIdx) -> Vec<CompoundIdx> {
    let mut chain = vec![idx];
    let mut current = idx;
    while let Some(parent) = model.compounds[current].parent() {
        if chain.contains(&parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}
