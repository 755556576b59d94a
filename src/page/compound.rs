//! One page per compound. The layout depends on the compound kind; the
//! member parts are shared through [`super::members`].

use super::members::{member_details, summary_sections, template_line};
use super::Page;
use crate::model::{CompoundDef, CompoundKind, CompoundRef, InnerRef};
use crate::render::description::plain_text;
use crate::render::escape::{code_fence, code_span};
use crate::render::{push_block, render_brief, render_description, render_listing, RenderContext};
use crate::slug::compare_names;
use crate::view::CompoundIdx;

pub fn compound_page(ctx: &RenderContext, idx: CompoundIdx) -> Page {
    let compound = ctx.model.get(idx);
    let def = &compound.def;
    let body = match compound.kind() {
        kind if kind.is_class_like() => class_body(ctx, idx),
        CompoundKind::Namespace => namespace_body(ctx, idx),
        CompoundKind::File => file_body(ctx, idx),
        CompoundKind::Dir => folder_body(ctx, idx),
        CompoundKind::Group => group_body(ctx, idx),
        _ => page_body(ctx, def),
    };

    let brief = plain_text(&def.brief.children)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    Page {
        permalink: compound.permalink.clone(),
        title: compound.page_title.clone(),
        description: if brief.is_empty() {
            compound.page_title.clone()
        } else {
            brief
        },
        kind: compound.kind().as_str().to_string(),
        body,
    }
}

fn brief_block(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    let brief = render_brief(ctx, &def.brief);
    if brief.is_empty() {
        return Vec::new();
    }
    if def.detailed.is_empty() {
        vec![brief]
    } else {
        vec![format!("{brief} [More...](#details)")]
    }
}

fn detailed_block(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    if def.detailed.is_empty() {
        return Vec::new();
    }
    let mut out = vec!["## Description {#details}".to_string()];
    push_block(&mut out, render_description(ctx, &def.detailed));
    out
}

/// `## <title>` and one entry per inner compound, sorted by name.
fn inner_list(ctx: &RenderContext, title: &str, refs: &[InnerRef]) -> Vec<String> {
    if refs.is_empty() {
        return Vec::new();
    }
    let mut refs: Vec<&InnerRef> = refs.iter().collect();
    refs.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut items = Vec::new();
    for inner in refs {
        let name = ctx.escape(&inner.name);
        let Some(idx) = ctx.model.find(&inner.refid) else {
            items.push(format!("- {name}"));
            continue;
        };
        let target = ctx.model.get(idx);
        let link = ctx.compound_link(idx, &name);
        let mut item = match target.kind() {
            kind if kind.is_class_like() || kind == CompoundKind::Namespace => {
                format!("- {} {link}", kind.as_str())
            }
            _ => format!("- {link}"),
        };
        let brief = render_brief(ctx, &target.def.brief);
        if !brief.is_empty() {
            item.push_str("<br/>");
            item.push_str(&brief);
        }
        items.push(item);
    }

    let mut out = vec![format!("## {title}")];
    push_block(&mut out, items);
    out
}

fn inheritance_list(ctx: &RenderContext, title: &str, refs: &[CompoundRef]) -> Vec<String> {
    if refs.is_empty() {
        return Vec::new();
    }
    let items = refs
        .iter()
        .map(|base| {
            let name = ctx.escape(&base.name);
            let target = base
                .refid
                .as_deref()
                .and_then(|refid| ctx.model.compound_url(refid));
            let name = match target {
                Some(url) => ctx.link(&url, &name),
                None => name,
            };
            format!("- {} {name}", base.protection.as_str())
        })
        .collect();
    let mut out = vec![format!("## {title}")];
    push_block(&mut out, items);
    out
}

fn declaration_block(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    let mut lines = Vec::new();
    for include in &def.includes {
        if include.local {
            lines.push(format!("#include \"{}\"", include.name));
        } else {
            lines.push(format!("#include <{}>", include.name));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    if let Some(params) = &def.template_params {
        lines.push(template_line(params));
    }
    let final_ = if def.is_final { " final" } else { "" };
    lines.push(format!("{} {}{final_}", def.kind.as_str(), def.name));

    let text = lines.join("\n");
    let fence = code_fence(&text);
    let mut out = vec![format!("{fence}{}", ctx.options.language)];
    out.extend(lines);
    out.push(fence);
    out
}

/// `abstract` and `inline` markers shown under the page brief.
fn compound_labels(def: &CompoundDef) -> Vec<String> {
    let labels: Vec<String> = [(def.is_abstract, "abstract"), (def.is_inline, "inline")]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| code_span(label))
        .collect();
    if labels.is_empty() {
        Vec::new()
    } else {
        vec![labels.join(" ")]
    }
}

/// Collapsible list of every member, inherited ones included.
fn all_members_block(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    if def.all_members.is_empty() {
        return Vec::new();
    }
    let mut members: Vec<_> = def.all_members.iter().collect();
    members.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut out = vec![
        "<details>".to_string(),
        "<summary>All Members</summary>".to_string(),
        String::new(),
    ];
    for member in members {
        let name = ctx.escape(&member.name);
        let name = match ctx.model.member_url(&member.refid) {
            Some(url) => ctx.link(&url, &name),
            None => name,
        };
        match &member.scope {
            Some(scope) if *scope != def.name => {
                out.push(format!("- {name} ({})", ctx.escape(scope)))
            }
            _ => out.push(format!("- {name}")),
        }
    }
    out.push(String::new());
    out.push("</details>".to_string());
    out
}

fn class_body(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut out = Vec::new();
    push_block(&mut out, brief_block(ctx, def));
    push_block(&mut out, declaration_block(ctx, def));
    push_block(&mut out, compound_labels(def));
    push_block(&mut out, inheritance_list(ctx, "Base Classes", &def.base_refs));
    push_block(&mut out, inheritance_list(ctx, "Derived Classes", &def.derived_refs));
    push_block(&mut out, inner_list(ctx, "Classes", &def.inner_classes));
    push_block(&mut out, summary_sections(ctx, idx));
    push_block(&mut out, detailed_block(ctx, def));
    push_block(&mut out, member_details(ctx, idx));
    push_block(&mut out, all_members_block(ctx, def));
    out
}

fn namespace_body(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut out = Vec::new();
    push_block(&mut out, brief_block(ctx, def));
    push_block(&mut out, compound_labels(def));
    push_block(&mut out, inner_list(ctx, "Namespaces", &def.inner_namespaces));
    push_block(&mut out, inner_list(ctx, "Classes", &def.inner_classes));
    push_block(&mut out, summary_sections(ctx, idx));
    push_block(&mut out, detailed_block(ctx, def));
    push_block(&mut out, member_details(ctx, idx));
    out
}

fn include_list(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    if def.includes.is_empty() {
        return Vec::new();
    }
    let items = def
        .includes
        .iter()
        .map(|include| {
            let name = ctx.escape(&include.name);
            let name = match include.refid.as_deref().and_then(|id| ctx.model.compound_url(id)) {
                Some(url) => ctx.link(&url, &name),
                None => name,
            };
            let (open, close) = if include.local {
                ("\"".to_string(), "\"".to_string())
            } else {
                (ctx.escape("<"), ctx.escape(">"))
            };
            format!("- #include {open}{name}{close}")
        })
        .collect();
    let mut out = vec!["## Included Headers".to_string()];
    push_block(&mut out, items);
    out
}

fn file_body(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut out = Vec::new();
    push_block(&mut out, brief_block(ctx, def));
    push_block(&mut out, include_list(ctx, def));
    push_block(&mut out, inner_list(ctx, "Namespaces", &def.inner_namespaces));
    push_block(&mut out, inner_list(ctx, "Classes", &def.inner_classes));
    push_block(&mut out, summary_sections(ctx, idx));
    push_block(&mut out, detailed_block(ctx, def));
    push_block(&mut out, member_details(ctx, idx));
    if let Some(listing) = &def.program_listing {
        let mut block = vec!["## File Listing".to_string()];
        push_block(&mut block, render_listing(ctx, listing));
        push_block(&mut out, block);
    }
    out
}

fn folder_body(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut out = Vec::new();
    push_block(&mut out, brief_block(ctx, def));
    push_block(&mut out, inner_list(ctx, "Folders", &def.inner_dirs));
    push_block(&mut out, inner_list(ctx, "Files", &def.inner_files));
    push_block(&mut out, detailed_block(ctx, def));
    out
}

fn group_body(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut out = Vec::new();
    push_block(&mut out, brief_block(ctx, def));
    push_block(&mut out, inner_list(ctx, "Topics", &def.inner_groups));
    push_block(&mut out, inner_list(ctx, "Namespaces", &def.inner_namespaces));
    push_block(&mut out, inner_list(ctx, "Classes", &def.inner_classes));
    push_block(&mut out, inner_list(ctx, "Files", &def.inner_files));
    push_block(&mut out, inner_list(ctx, "Pages", &def.inner_pages));
    push_block(&mut out, summary_sections(ctx, idx));
    push_block(&mut out, detailed_block(ctx, def));
    push_block(&mut out, member_details(ctx, idx));
    out
}

/// Free-standing pages show their text as-is.
fn page_body(ctx: &RenderContext, def: &CompoundDef) -> Vec<String> {
    let mut out = render_description(ctx, &def.brief);
    push_block(&mut out, render_description(ctx, &def.detailed));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::view::test_support::{build, compound};

    fn page_of(files: &[&str], id: &str) -> Page {
        let (model, diagnostics) = build(files);
        let options = Options::default();
        let ctx = RenderContext::new(&model, &options, &diagnostics);
        let idx = model.find(id).unwrap();
        compound_page(&ctx.for_compound(idx), idx)
    }

    #[test]
    fn class_page_layout() {
        let page = page_of(
            &[
                &compound(
                    "classAB",
                    "class",
                    "A::B",
                    r#"<basecompoundref refid="classBase" prot="public" virt="non-virtual">Base</basecompoundref>
<basecompoundref prot="protected" virt="non-virtual">std::exception</basecompoundref>
<includes local="no">a/b.h</includes>
<briefdescription><para>The B class.</para></briefdescription>
<detaileddescription><para>Longer text.</para></detaileddescription>
<location file="a/b.h" line="3"/>"#,
                ),
                &compound("classBase", "class", "Base", r#"<derivedcompoundref refid="classAB" prot="public" virt="non-virtual">A::B</derivedcompoundref>"#),
            ],
            "classAB",
        );
        assert_eq!(page.permalink, "classes/a/b");
        assert_eq!(page.title, "The A::B Class Reference");
        assert_eq!(page.description, "The B class.");
        assert_eq!(page.kind, "class");
        let body = page.body.join("\n");
        assert!(body.starts_with("The B class. [More...](#details)\n\n```cpp\n#include <a/b.h>\n\nclass A::B\n```"));
        assert!(body.contains("## Base Classes\n\n- public [Base](/api/classes/base)\n- protected std::exception"));
        assert!(body.contains("## Description {#details}\n\nLonger text."));
    }

    #[test]
    fn class_and_namespace_specifiers() {
        let class = page_of(
            &[r#"<doxygen version="1.10.0"><compounddef id="classS" kind="class" final="yes" abstract="yes"><compoundname>S</compoundname></compounddef></doxygen>"#],
            "classS",
        );
        assert_eq!(class.body.join("\n"), "```cpp\nclass S final\n```\n\n`abstract`");

        let namespace = page_of(
            &[r#"<doxygen version="1.10.0"><compounddef id="namespacev1" kind="namespace" inline="yes"><compoundname>v1</compoundname></compounddef></doxygen>"#],
            "namespacev1",
        );
        assert_eq!(namespace.body, vec!["`inline`"]);
    }

    #[test]
    fn namespace_lists_inner_compounds() {
        let page = page_of(
            &[
                &compound(
                    "namespaceA",
                    "namespace",
                    "A",
                    r#"<innerclass refid="classAB" prot="public">A::B</innerclass>"#,
                ),
                &compound(
                    "classAB",
                    "class",
                    "A::B",
                    "<briefdescription><para>Bee.</para></briefdescription>",
                ),
            ],
            "namespaceA",
        );
        assert_eq!(page.description, "The A Namespace Reference");
        assert_eq!(
            page.body.join("\n"),
            "## Classes\n\n- class [A::B](/api/classes/a/b)<br/>Bee."
        );
    }

    #[test]
    fn folder_lists_files() {
        let page = page_of(
            &[
                &compound(
                    "dir_src",
                    "dir",
                    "src",
                    r#"<innerfile refid="main_8c">main.c</innerfile><location file="src/"/>"#,
                ),
                &compound("main_8c", "file", "main.c", r#"<location file="src/main.c"/>"#),
            ],
            "dir_src",
        );
        assert_eq!(page.permalink, "folders/src");
        assert_eq!(
            page.body.join("\n"),
            "## Files\n\n- [main.c](/api/files/src/main-c)"
        );
    }

    #[test]
    fn pages_render_their_text() {
        let page = page_of(
            &[&compound(
                "intro",
                "page",
                "intro",
                "<title>Introduction</title><detaileddescription><para>Hello <bold>world</bold>.</para></detaileddescription>",
            )],
            "intro",
        );
        assert_eq!(page.permalink, "pages/intro");
        assert_eq!(page.title, "Introduction");
        assert_eq!(page.body, vec!["Hello **world**."]);
    }
}
