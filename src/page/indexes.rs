//! The top-level index and the per-collection index pages.

use super::Page;
use crate::render::{push_block, render_brief, render_description, RenderContext};
use crate::slug::{compare_names, index_letter};
use crate::view::CompoundIdx;
use std::collections::BTreeMap;

/// Collection index pages, in sidebar order: permalink, title and what the
/// page lists.
pub(super) const COLLECTIONS: &[(&str, &str, &str)] = &[
    ("groups/index", "Topics", "The topics, with brief descriptions."),
    ("namespaces/index", "Namespaces", "The namespaces, with brief descriptions."),
    (
        "classes/index",
        "Classes",
        "The classes, structs, unions and interfaces, with brief descriptions.",
    ),
    ("files/index", "Files", "The folders and files, with brief descriptions."),
    ("pages/index", "Pages", "The documentation pages."),
];

pub fn index_pages(ctx: &RenderContext) -> Vec<Page> {
    let mut pages = vec![main_index(ctx)];
    for &(permalink, title, description) in COLLECTIONS {
        let roots = collection_roots(ctx, permalink);
        if roots.is_empty() {
            continue;
        }
        let mut body = vec![description.to_string()];
        if permalink == "classes/index" {
            push_block(&mut body, alphabetical_index(ctx));
            push_block(&mut body, vec!["## Class Hierarchy".to_string()]);
        }
        push_block(&mut body, tree(ctx, &roots));
        pages.push(Page {
            permalink: permalink.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind: "index".to_string(),
            body,
        });
    }
    pages
}

/// Top-level compounds of a collection. Pages hanging off the main page
/// count as top-level too.
pub(super) fn collection_roots(ctx: &RenderContext, permalink: &str) -> Vec<CompoundIdx> {
    let model = ctx.model;
    match permalink {
        "groups/index" => model.roots(&model.groups),
        "namespaces/index" => model.roots(&model.namespaces),
        "classes/index" => model.roots(&model.classes),
        "files/index" => {
            let mut roots = model.roots(&model.folders);
            roots.extend(model.roots(&model.files));
            roots
        }
        "pages/index" => model
            .pages
            .iter()
            .copied()
            .filter(|&idx| {
                let parent = model.get(idx).parent();
                parent.is_none() || parent == model.main_page
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn main_index(ctx: &RenderContext) -> Page {
    let model = ctx.model;
    let title = model.project_name();
    let brief = model.doxyfile.project_brief().map(str::to_string);

    let mut body = Vec::new();
    if let Some(brief) = &brief {
        body.push(ctx.escape(brief));
    }
    if let Some(number) = model.doxyfile.project_number() {
        push_block(&mut body, vec![format!("Version {}.", ctx.escape(number))]);
    }
    if let Some(main) = model.main_page {
        let main_ctx = ctx.for_compound(main);
        let def = &model.get(main).def;
        push_block(&mut body, render_description(&main_ctx, &def.brief));
        push_block(&mut body, render_description(&main_ctx, &def.detailed));
    }

    let links: Vec<String> = COLLECTIONS
        .iter()
        .filter(|(permalink, _, _)| !collection_roots(ctx, permalink).is_empty())
        .map(|(permalink, title, _)| {
            format!("- {}", ctx.link(&model.url_for_permalink(permalink), title))
        })
        .collect();
    if !links.is_empty() {
        push_block(&mut body, vec!["## Reference".to_string()]);
        push_block(&mut body, links);
    }

    Page {
        permalink: "index".to_string(),
        description: brief.unwrap_or_else(|| format!("The {title} reference.")),
        title,
        kind: "index".to_string(),
        body,
    }
}

fn entry(ctx: &RenderContext, idx: CompoundIdx) -> String {
    let compound = ctx.model.get(idx);
    let link = ctx.compound_link(idx, &ctx.escape(&compound.sidebar_label));
    let brief = render_brief(ctx, &compound.def.brief);
    if brief.is_empty() {
        link
    } else {
        format!("{link}<br/>{brief}")
    }
}

/// Nested list following the children edges, in encounter order.
fn tree(ctx: &RenderContext, roots: &[CompoundIdx]) -> Vec<String> {
    let mut out = Vec::new();
    for &idx in roots {
        tree_item(ctx, idx, 0, &mut out);
    }
    out
}

fn tree_item(ctx: &RenderContext, idx: CompoundIdx, depth: usize, out: &mut Vec<String>) {
    out.push(format!("{}- {}", "  ".repeat(depth), entry(ctx, idx)));
    for &child in &ctx.model.get(idx).children {
        tree_item(ctx, child, depth + 1, out);
    }
}

/// Classes bucketed by the first letter of their unqualified name.
fn alphabetical_index(ctx: &RenderContext) -> Vec<String> {
    let model = ctx.model;
    let mut letters: BTreeMap<char, Vec<CompoundIdx>> = BTreeMap::new();
    for &idx in &model.classes {
        let label = &model.get(idx).sidebar_label;
        letters.entry(index_letter(label)).or_default().push(idx);
    }

    let mut out = vec!["## Alphabetical Index".to_string()];
    for (letter, mut classes) in letters {
        classes.sort_by(|&a, &b| {
            let (a, b) = (model.get(a), model.get(b));
            compare_names(&a.sidebar_label, &b.sidebar_label)
                .then_with(|| compare_names(&a.def.name, &b.def.name))
        });
        let items = classes
            .into_iter()
            .map(|idx| {
                let compound = model.get(idx);
                let link = ctx.compound_link(idx, &ctx.escape(&compound.sidebar_label));
                match compound.scope {
                    Some(scope) => {
                        format!("- {link} ({})", ctx.escape(&model.get(scope).def.name))
                    }
                    None => format!("- {link}"),
                }
            })
            .collect();
        push_block(&mut out, vec![format!("### {letter}")]);
        push_block(&mut out, items);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::view::test_support::{build, compound};
    use pretty_assertions::assert_eq;

    fn pages(files: &[&str]) -> Vec<Page> {
        let (model, diagnostics) = build(files);
        let options = Options::default();
        let ctx = RenderContext::new(&model, &options, &diagnostics);
        index_pages(&ctx)
    }

    #[test]
    fn main_index_links_present_collections() {
        let pages = pages(&[
            &compound("indexpage", "page", "index", "<title>My Lib</title><detaileddescription><para>Welcome.</para></detaileddescription>"),
            &compound("classX", "class", "X", ""),
        ]);
        assert_eq!(pages.len(), 2);
        let main = &pages[0];
        assert_eq!(main.permalink, "index");
        assert_eq!(main.title, "My Lib");
        assert_eq!(
            main.body.join("\n"),
            "Welcome.\n\n## Reference\n\n- [Classes](/api/classes)"
        );
        assert_eq!(pages[1].permalink, "classes/index");
    }

    #[test]
    fn class_index_has_letters_and_hierarchy() {
        let pages = pages(&[
            &compound("namespaceN", "namespace", "N", r#"<innerclass refid="classN_1_1Base" prot="public">N::Base</innerclass>"#),
            &compound("classN_1_1Base", "class", "N::Base", ""),
            &compound(
                "classDerived",
                "class",
                "Derived",
                r#"<basecompoundref refid="classN_1_1Base" prot="public" virt="non-virtual">N::Base</basecompoundref>
<briefdescription><para>Child.</para></briefdescription>"#,
            ),
            &compound("classalpha", "class", "alpha", ""),
        ]);
        let classes = pages.iter().find(|p| p.permalink == "classes/index").unwrap();
        assert_eq!(
            classes.body.join("\n"),
            "The classes, structs, unions and interfaces, with brief descriptions.

## Alphabetical Index

### A

- [alpha](/api/classes/alpha)

### B

- [Base](/api/classes/n/base) (N)

### D

- [Derived](/api/classes/derived)

## Class Hierarchy

- [Base](/api/classes/n/base)
  - [Derived](/api/classes/derived)<br/>Child.
- [alpha](/api/classes/alpha)"
        );
        assert!(pages.iter().any(|p| p.permalink == "namespaces/index"));
        assert!(!pages.iter().any(|p| p.permalink == "files/index"));
    }

    #[test]
    fn subpages_of_the_main_page_are_roots() {
        let pages = pages(&[
            &compound("indexpage", "page", "index", r#"<innerpage refid="intro">intro</innerpage>"#),
            &compound("intro", "page", "intro", "<title>Introduction</title>"),
        ]);
        let index = pages.iter().find(|p| p.permalink == "pages/index").unwrap();
        assert_eq!(
            index.body.join("\n"),
            "The documentation pages.\n\n- [Introduction](/api/pages/intro)"
        );
    }
}
