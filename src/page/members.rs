//! Member sections of a compound page: summaries and detailed entries.

use crate::model::member::{EnumValue, Virtualness};
use crate::model::{LinkedText, MemberDef, MemberKind, Param, Protection, SectionDef, SectionMember};
use crate::render::escape::{code_fence, code_span, escape_attribute};
use crate::render::{push_block, render_brief, render_description, render_linked_text, RenderContext};
use crate::slug::{compare_names, member_anchor};
use crate::view::CompoundIdx;
use std::collections::BTreeMap;

/// `## <section title>` followed by one list entry per member, sorted by
/// name. Sections appear in their fixed display order.
pub fn summary_sections(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let def = &ctx.model.get(idx).def;
    let mut sections: Vec<&SectionDef> = def.sections.iter().collect();
    sections.sort_by_key(|section| section.kind.order());

    let mut out = Vec::new();
    for section in sections {
        if section.members.is_empty() {
            continue;
        }
        let mut members: Vec<&SectionMember> = section.members.iter().collect();
        members.sort_by(|a, b| compare_names(a.name(), b.name()));

        let mut block = vec![format!("## {}", ctx.escape(&section.title()))];
        if let Some(description) = &section.description {
            push_block(&mut block, render_description(ctx, description));
        }
        let items = members
            .into_iter()
            .map(|member| summary_item(ctx, idx, member))
            .collect();
        push_block(&mut block, items);
        push_block(&mut out, block);
    }
    out
}

fn summary_item(ctx: &RenderContext, idx: CompoundIdx, member: &SectionMember) -> String {
    match member {
        SectionMember::Definition(def) => {
            let url = if ctx.model.members.is_owned_by(&def.id, idx) {
                ctx.model.members.get(&def.id).map(|entry| format!("#{}", entry.anchor))
            } else {
                ctx.model.member_url(&def.id)
            };
            let brief = render_brief(ctx, &def.brief);
            let signature = signature(ctx, def, url);
            if brief.is_empty() {
                format!("- {signature}")
            } else {
                format!("- {signature}<br/>{brief}")
            }
        }
        SectionMember::Reference(reference) => {
            let name = format!("**{}**", ctx.escape(&reference.name));
            match ctx.model.member_url(&reference.refid) {
                Some(url) => format!("- {}", ctx.link(&url, &name)),
                None => format!("- {name}"),
            }
        }
    }
}

/// One-line signature with the member name linked to `url`.
pub fn signature(ctx: &RenderContext, def: &MemberDef, url: Option<String>) -> String {
    let name = format!("**{}**", ctx.escape(&def.name));
    let name = match url {
        Some(url) => ctx.link(&url, &name),
        None => name,
    };
    let type_ = render_linked_text(ctx, &def.type_);
    let type_ = type_.trim();
    let args = def.args.as_deref().map(|a| ctx.escape(a)).unwrap_or_default();

    match def.kind {
        MemberKind::Define => format!("#define {name}{}", define_params(&def.params)),
        MemberKind::Enum => {
            let class = if def.is_strong { "class " } else { "" };
            format!("enum {class}{name}")
        }
        MemberKind::Typedef if is_alias(def) => format!("using {name} = {type_}"),
        MemberKind::Typedef => format!("typedef {type_} {name}{args}"),
        _ => {
            let mut out = String::new();
            if def.is_static {
                out.push_str("static ");
            }
            if def.virtualness != Virtualness::NonVirtual {
                out.push_str("virtual ");
            }
            if !type_.is_empty() {
                out.push_str(type_);
                out.push(' ');
            }
            out.push_str(&name);
            out.push_str(&args);
            out
        }
    }
}

fn is_alias(def: &MemberDef) -> bool {
    def.definition
        .as_deref()
        .is_some_and(|d| d.trim_start().starts_with("using "))
}

fn define_params(params: &[Param]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params
        .iter()
        .filter_map(|p| p.defname.as_deref().or(p.declname.as_deref()))
        .collect();
    format!("({})", names.join(", "))
}

fn plain(text: &Option<LinkedText>) -> String {
    text.as_ref().map(LinkedText::plain).unwrap_or_default()
}

/// `template <typename T, int N = 4>`
pub fn template_line(params: &[Param]) -> String {
    let params: Vec<String> = params
        .iter()
        .map(|p| {
            let mut out = plain(&p.type_).trim().to_string();
            if let Some(name) = p.declname.as_deref().or(p.defname.as_deref()) {
                out.push(' ');
                out.push_str(name);
            }
            if let Some(array) = &p.array {
                out.push_str(array);
            }
            let default = plain(&p.defval);
            if !default.trim().is_empty() {
                out.push_str(" = ");
                out.push_str(default.trim());
            }
            out
        })
        .collect();
    format!("template <{}>", params.join(", "))
}

/// The C++ declaration shown at the top of a member's details.
pub fn declaration(def: &MemberDef) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(params) = &def.template_params {
        lines.push(template_line(params));
    }
    let line = match def.kind {
        MemberKind::Define => {
            let mut out = format!("#define {}{}", def.name, define_params(&def.params));
            let value = plain(&def.initializer);
            if !value.trim().is_empty() {
                out.push(' ');
                out.push_str(value.trim());
            }
            out
        }
        MemberKind::Enum => {
            let class = if def.is_strong { "class " } else { "" };
            let name = def.qualified_name.as_deref().unwrap_or(&def.name);
            let mut out = format!("enum {class}{name}");
            let underlying = def.type_.plain();
            if !underlying.trim().is_empty() {
                out.push_str(" : ");
                out.push_str(underlying.trim());
            }
            out
        }
        _ => {
            let mut out = def.definition.clone().unwrap_or_else(|| {
                format!("{} {}", def.type_.plain().trim(), def.name)
                    .trim()
                    .to_string()
            });
            if let Some(args) = &def.args {
                out.push_str(args);
            }
            if let Some(bits) = &def.bitfield {
                out.push_str(" : ");
                out.push_str(bits);
            }
            let value = plain(&def.initializer);
            if !value.trim().is_empty() && def.kind != MemberKind::Typedef {
                out.push(' ');
                out.push_str(value.trim());
            }
            out
        }
    };
    lines.push(line);
    lines
}

fn labels(def: &MemberDef) -> Vec<&'static str> {
    let mut labels = Vec::new();
    let flags = [
        (def.is_inline, "inline"),
        (def.is_static, "static"),
        (def.is_constexpr, "constexpr"),
        (def.is_consteval, "consteval"),
        (def.is_constinit, "constinit"),
        (def.is_explicit, "explicit"),
        (def.is_noexcept, "noexcept"),
        (def.is_mutable, "mutable"),
        (def.is_volatile, "volatile"),
        (def.is_nodiscard, "nodiscard"),
    ];
    labels.extend(flags.iter().filter(|(set, _)| *set).map(|(_, label)| *label));
    match def.virtualness {
        Virtualness::Virtual => labels.push("virtual"),
        Virtualness::PureVirtual => labels.push("pure virtual"),
        Virtualness::NonVirtual => {}
    }
    if def.is_final {
        labels.push("final");
    }
    if def.kind != MemberKind::Define {
        match def.protection {
            Protection::Public => {}
            other => labels.push(other.as_str()),
        }
    }
    labels
}

/// Heading rank and title of the detail group a member belongs to.
fn detail_group(kind: MemberKind, class_like: bool) -> (u8, &'static str) {
    match kind {
        MemberKind::Define => (0, "Macro Definition Documentation"),
        MemberKind::Typedef if class_like => (1, "Member Typedef Documentation"),
        MemberKind::Typedef => (1, "Typedef Documentation"),
        MemberKind::Enum if class_like => (2, "Member Enumeration Documentation"),
        MemberKind::Enum => (2, "Enumeration Type Documentation"),
        kind if kind.is_callable() && class_like => (3, "Member Function Documentation"),
        kind if kind.is_callable() => (3, "Function Documentation"),
        MemberKind::Variable | MemberKind::Property | MemberKind::Event if class_like => {
            (4, "Member Data Documentation")
        }
        MemberKind::Variable | MemberKind::Property | MemberKind::Event => {
            (4, "Variable Documentation")
        }
        MemberKind::Friend => (5, "Friends And Related Symbol Documentation"),
        _ => (6, "Member Documentation"),
    }
}

/// Detailed entries for every member this compound owns.
pub fn member_details(ctx: &RenderContext, idx: CompoundIdx) -> Vec<String> {
    let compound = ctx.model.get(idx);
    let class_like = compound.kind().is_class_like();

    let mut groups: BTreeMap<u8, (&'static str, Vec<&MemberDef>)> = BTreeMap::new();
    for section in &compound.def.sections {
        for member in section.definitions() {
            if !ctx.model.members.is_owned_by(&member.id, idx) {
                continue;
            }
            let (rank, title) = detail_group(member.kind, class_like);
            groups.entry(rank).or_insert((title, Vec::new())).1.push(member);
        }
    }

    let mut out = Vec::new();
    for (_, (title, mut members)) in groups {
        members.sort_by(|a, b| compare_names(&a.name, &b.name));
        push_block(&mut out, vec![format!("## {title}")]);
        for member in members {
            push_block(&mut out, member_detail(ctx, member));
        }
    }
    out
}

fn member_detail(ctx: &RenderContext, def: &MemberDef) -> Vec<String> {
    let anchor = ctx
        .model
        .members
        .get(&def.id)
        .map(|entry| entry.anchor.clone())
        .unwrap_or_else(|| member_anchor(&def.name));
    let parens = if def.kind.is_callable() { "()" } else { "" };
    let mut out = vec![format!("### {}{parens} {{#{anchor}}}", ctx.escape(&def.name))];

    let declaration = declaration(def).join("\n");
    let fence = code_fence(&declaration);
    let mut code = vec![format!("{fence}{}", ctx.options.language)];
    code.extend(declaration.lines().map(str::to_string));
    code.push(fence);
    push_block(&mut out, code);

    let labels = labels(def);
    if !labels.is_empty() {
        let line = labels
            .iter()
            .map(|label| code_span(label))
            .collect::<Vec<_>>()
            .join(" ");
        push_block(&mut out, vec![line]);
    }

    push_block(&mut out, render_description(ctx, &def.brief));
    push_block(&mut out, render_description(ctx, &def.detailed));
    push_block(&mut out, render_description(ctx, &def.in_body));
    if !def.enum_values.is_empty() {
        push_block(&mut out, enumerators(ctx, &def.enum_values));
    }
    push_block(&mut out, cross_links(ctx, def));
    push_block(&mut out, vec![location_line(ctx, def)]);
    out
}

fn enumerators(ctx: &RenderContext, values: &[EnumValue]) -> Vec<String> {
    let mut out = vec!["**Enumerators**".to_string(), String::new()];
    for value in values {
        let anchor = ctx
            .model
            .members
            .get(&value.id)
            .map(|entry| entry.anchor.clone())
            .unwrap_or_else(|| member_anchor(&value.name));
        let mut line = format!(
            r#"- <a id="{}"></a>{}"#,
            escape_attribute(&anchor),
            code_span(&value.name)
        );
        let initializer = plain(&value.initializer);
        if !initializer.trim().is_empty() {
            line.push(' ');
            line.push_str(&code_span(initializer.trim()));
        }
        let brief = render_brief(ctx, &value.brief);
        if !brief.is_empty() {
            line.push(' ');
            line.push_str(&brief);
        }
        out.push(line);
    }
    out
}

fn cross_links(ctx: &RenderContext, def: &MemberDef) -> Vec<String> {
    let link = |refid: &str, name: &str| {
        let text = ctx.escape(name);
        match ctx.model.member_url(refid) {
            Some(url) => ctx.link(&url, &text),
            None => text,
        }
    };
    let mut out = Vec::new();
    if !def.reimplements.is_empty() {
        let links: Vec<String> = def.reimplements.iter().map(|r| link(&r.refid, &r.name)).collect();
        out.push(format!("Reimplements {}.", links.join(", ")));
    }
    if !def.reimplemented_by.is_empty() {
        let links: Vec<String> = def
            .reimplemented_by
            .iter()
            .map(|r| link(&r.refid, &r.name))
            .collect();
        if !out.is_empty() {
            out.push(String::new());
        }
        out.push(format!("Reimplemented in {}.", links.join(", ")));
    }
    out
}

fn location_line(ctx: &RenderContext, def: &MemberDef) -> String {
    let location = &def.location;
    let file = ctx
        .model
        .files
        .iter()
        .copied()
        .find(|&idx| {
            ctx.model
                .get(idx)
                .def
                .location
                .as_ref()
                .is_some_and(|l| l.file == location.file)
        })
        .map(|idx| ctx.compound_link(idx, &ctx.escape(&location.file)))
        .unwrap_or_else(|| ctx.escape(&location.file));
    match location.line {
        Some(line) => format!("Declaration at line {line} of file {file}."),
        None => format!("Declared in file {file}."),
    }
}
