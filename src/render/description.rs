//! Description trees to Markdown/MDX.

use super::escape::{code_fence, code_span, escape_attribute, escape_code};
use super::{code, indent, push_block, table, RenderContext};
use crate::model::description::{
    DocNode, DocRef, DocSection, Image, ParameterList, ParameterListKind, SimpleSect,
    SimpleSectKind, TextStyle, VarListEntry, Direction,
};
use crate::model::Description;

/// Title (if any) followed by the body blocks.
pub fn render_description(ctx: &RenderContext, description: &Description) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(title) = description.title.as_deref().map(str::trim) {
        if !title.is_empty() {
            out.push(format!("**{}**", ctx.escape(title)));
        }
    }
    push_block(&mut out, render_blocks(ctx, &description.children));
    out
}

/// A brief description squeezed onto one line, for summaries and tables.
pub fn render_brief(ctx: &RenderContext, description: &Description) -> String {
    render_blocks(ctx, &description.children)
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a sequence of nodes in block context. Runs of inline nodes
/// become paragraphs of their own.
pub fn render_blocks(ctx: &RenderContext, nodes: &[DocNode]) -> Vec<String> {
    let mut out = Vec::new();
    let mut run: Vec<&DocNode> = Vec::new();
    for node in nodes {
        if node.is_block() {
            flush_paragraph(ctx, &mut run, &mut out);
            push_block(&mut out, render_block(ctx, node));
        } else {
            run.push(node);
        }
    }
    flush_paragraph(ctx, &mut run, &mut out);
    out
}

fn flush_paragraph(ctx: &RenderContext, run: &mut Vec<&DocNode>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let text: String = run.drain(..).map(|node| render_node(ctx, node)).collect();
    let lines: Vec<String> = text
        .trim()
        .lines()
        .map(|line| line.trim_start().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    push_block(out, lines);
}

/// Render a sequence of nodes in inline context.
pub fn render_inline(ctx: &RenderContext, nodes: &[DocNode]) -> String {
    nodes.iter().map(|node| render_node(ctx, node)).collect()
}

fn render_node(ctx: &RenderContext, node: &DocNode) -> String {
    match node {
        DocNode::Text(text) => ctx.escape(text),
        DocNode::Style { style, children } => render_style(ctx, *style, children),
        DocNode::Ref(reference) => render_ref(ctx, reference),
        DocNode::Ulink { url, children } => {
            let text = render_inline(ctx, children);
            let text = if text.trim().is_empty() {
                ctx.escape(url)
            } else {
                text
            };
            ctx.link(url, &text)
        }
        DocNode::Anchor(id) => format!(r#"<a id="{}"></a>"#, escape_attribute(id)),
        DocNode::LineBreak => "<br/>".to_string(),
        DocNode::Symbol(symbol) => symbol.to_string(),
        DocNode::Emoji { name, unicode } => {
            unicode.clone().unwrap_or_else(|| format!(":{name}:"))
        }
        DocNode::Formula(formula) => format!("<code>{}</code>", escape_code(formula)),
        DocNode::Image(image) => render_image(ctx, image),
        DocNode::RawHtml(html) => html.clone(),
        block => {
            let separator = if ctx.html { "<br/>" } else { " " };
            render_block(ctx, block)
                .into_iter()
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(separator)
        }
    }
}

fn render_style(ctx: &RenderContext, style: TextStyle, children: &[DocNode]) -> String {
    if style == TextStyle::ComputerOutput && !ctx.html {
        if let Some(raw) = plain_text_only(children) {
            if !raw.trim().is_empty() {
                return code_span(raw.trim());
            }
        }
    }

    let content = render_inline(ctx, children);
    let core = content.trim();
    if core.is_empty() {
        return content;
    }
    let lead = &content[..content.len() - content.trim_start().len()];
    let trail = &content[content.trim_end().len()..];
    let wrapped = match (style, ctx.html) {
        (TextStyle::Bold, false) => format!("**{core}**"),
        (TextStyle::Bold, true) => format!("<b>{core}</b>"),
        (TextStyle::Emphasis, false) => format!("*{core}*"),
        (TextStyle::Emphasis, true) => format!("<em>{core}</em>"),
        (TextStyle::Strike, false) => format!("~~{core}~~"),
        (TextStyle::Strike, true) => format!("<s>{core}</s>"),
        (TextStyle::ComputerOutput, _) => format!("<code>{core}</code>"),
        (TextStyle::Underline, _) => format!("<u>{core}</u>"),
        (TextStyle::Subscript, _) => format!("<sub>{core}</sub>"),
        (TextStyle::Superscript, _) => format!("<sup>{core}</sup>"),
        (TextStyle::Small, _) => format!("<small>{core}</small>"),
        (TextStyle::Center, _) => format!("<center>{core}</center>"),
        (TextStyle::Cite, _) => format!("<cite>{core}</cite>"),
    };
    format!("{lead}{wrapped}{trail}")
}

/// The concatenated text when every node is a plain text run.
fn plain_text_only(nodes: &[DocNode]) -> Option<String> {
    nodes
        .iter()
        .map(|node| match node {
            DocNode::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn render_ref(ctx: &RenderContext, reference: &DocRef) -> String {
    let text = render_inline(ctx, &reference.children);
    // Targets from tag files live on other sites.
    if reference.external.is_some() {
        return text;
    }
    match ctx.resolve_or_report(&reference.refid, reference.kind) {
        Some(url) => ctx.link(&url, &text),
        None => text,
    }
}

fn render_image(ctx: &RenderContext, image: &Image) -> String {
    // Doxygen emits one <image> per output format.
    if image.kind != "html" {
        return String::new();
    }
    let Some(name) = image.name.as_deref() else {
        return String::new();
    };
    let alt = image
        .alt
        .clone()
        .unwrap_or_else(|| plain_text(&image.caption).trim().to_string());
    if ctx.html {
        format!(
            r#"<img src="{}" alt="{}"/>"#,
            escape_attribute(name),
            escape_attribute(&alt)
        )
    } else {
        format!("![{}]({name})", ctx.escape(&alt))
    }
}

fn render_block(ctx: &RenderContext, node: &DocNode) -> Vec<String> {
    match node {
        DocNode::Para(children) => render_blocks(ctx, children),
        DocNode::Ruler => vec!["<hr/>".to_string()],
        DocNode::List {
            ordered,
            start,
            items,
        } => render_list(ctx, ordered.then(|| start.unwrap_or(1)), items),
        DocNode::VariableList(entries) => render_variable_list(ctx, entries),
        DocNode::SimpleSect(sect) => render_simple_sect(ctx, sect),
        DocNode::ParameterList(list) => render_parameter_list(ctx, list),
        DocNode::ProgramListing(listing) => code::render_listing(ctx, listing),
        DocNode::Verbatim(text) => fenced(text, ""),
        DocNode::Preformatted(children) => fenced(&plain_text(children), ""),
        DocNode::Table(t) => table::render_table(ctx, t),
        DocNode::Heading { level, children } => {
            let level = (*level as usize + 1).clamp(1, 6);
            let title = render_inline(ctx, children);
            vec![format!("{} {}", "#".repeat(level), title.trim())]
        }
        DocNode::Section(section) => render_section(ctx, section),
        DocNode::XRefSect {
            title, children, ..
        } => admonition("note", Some(&ctx.escape(title)), render_blocks(ctx, children)),
        DocNode::BlockQuote(children) => render_blocks(ctx, children)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect(),
        DocNode::Details { summary, children } => {
            let mut out = vec![
                "<details>".to_string(),
                format!("<summary>{}</summary>", render_inline(ctx, summary).trim()),
            ];
            push_block(&mut out, render_blocks(ctx, children));
            out.push(String::new());
            out.push("</details>".to_string());
            out
        }
        DocNode::TocList(items) => items
            .iter()
            .map(|item| {
                let text = render_inline(ctx, &item.children);
                format!("- {}", ctx.link(&format!("#{}", item.id), text.trim()))
            })
            .collect(),
        inline => vec![render_node(ctx, inline)],
    }
}

/// `start` is the first number of an ordered list, `None` for bullets.
fn render_list(ctx: &RenderContext, start: Option<u32>, items: &[Vec<DocNode>]) -> Vec<String> {
    let mut out = Vec::new();
    for (n, item) in (0u32..).zip(items) {
        let marker = match start {
            Some(first) => format!("{}. ", first + n),
            None => "- ".to_string(),
        };
        let lines = render_blocks(ctx, item);
        push_item(&mut out, &marker, lines);
    }
    out
}

/// One list item: the marker on the first line, the rest indented under it.
fn push_item(out: &mut Vec<String>, marker: &str, lines: Vec<String>) {
    let mut lines = lines.into_iter();
    match lines.next() {
        Some(first) => out.push(format!("{marker}{first}")),
        None => out.push(marker.trim_end().to_string()),
    }
    out.extend(indent(lines.collect(), &" ".repeat(marker.len())));
}

fn render_variable_list(ctx: &RenderContext, entries: &[VarListEntry]) -> Vec<String> {
    let mut out = Vec::new();
    for entry in entries {
        let term = render_inline(ctx, &entry.term);
        let mut lines = vec![format!("**{}**", term.trim())];
        push_block(&mut lines, render_blocks(ctx, &entry.children));
        push_item(&mut out, "- ", lines);
    }
    out
}

fn simple_sect_title(kind: SimpleSectKind) -> &'static str {
    match kind {
        SimpleSectKind::See => "See Also",
        SimpleSectKind::Return => "Returns",
        SimpleSectKind::Author => "Author",
        SimpleSectKind::Authors => "Authors",
        SimpleSectKind::Version => "Version",
        SimpleSectKind::Since => "Since",
        SimpleSectKind::Date => "Date",
        SimpleSectKind::Note => "Note",
        SimpleSectKind::Warning => "Warning",
        SimpleSectKind::Pre => "Precondition",
        SimpleSectKind::Post => "Postcondition",
        SimpleSectKind::Copyright => "Copyright",
        SimpleSectKind::Invariant => "Invariant",
        SimpleSectKind::Remark => "Remarks",
        SimpleSectKind::Attention => "Attention",
        SimpleSectKind::Important => "Important",
        SimpleSectKind::Par => "",
        SimpleSectKind::Rcs => "RCS",
    }
}

fn render_simple_sect(ctx: &RenderContext, sect: &SimpleSect) -> Vec<String> {
    let body = render_blocks(ctx, &sect.children);
    match sect.kind {
        SimpleSectKind::Note => admonition("info", None, body),
        SimpleSectKind::Warning => admonition("warning", None, body),
        SimpleSectKind::Attention => admonition("danger", None, body),
        SimpleSectKind::Important => admonition("tip", Some("Important"), body),
        kind => {
            let title = match sect.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => ctx.escape(title),
                _ => simple_sect_title(kind).to_string(),
            };
            titled(&title, body)
        }
    }
}

/// A Docusaurus admonition block.
fn admonition(kind: &str, title: Option<&str>, body: Vec<String>) -> Vec<String> {
    let open = match title {
        Some(title) => format!(":::{kind}[{title}]"),
        None => format!(":::{kind}"),
    };
    let mut out = vec![open, String::new()];
    out.extend(body);
    out.push(String::new());
    out.push(":::".to_string());
    out
}

fn titled(title: &str, body: Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    if !title.is_empty() {
        out.push(format!("**{title}**"));
    }
    push_block(&mut out, body);
    out
}

fn render_parameter_list(ctx: &RenderContext, list: &ParameterList) -> Vec<String> {
    let title = match list.kind {
        ParameterListKind::Param => "Parameters",
        ParameterListKind::RetVal => "Return Values",
        ParameterListKind::Exception => "Exceptions",
        ParameterListKind::TemplateParam => "Template Parameters",
    };
    let mut items = Vec::new();
    for item in &list.items {
        let names = item
            .names
            .iter()
            .map(|name| {
                let direction = match name.direction {
                    Some(Direction::In) => " [in]",
                    Some(Direction::Out) => " [out]",
                    Some(Direction::InOut) => " [in,out]",
                    None => "",
                };
                format!("<code>{}</code>{direction}", render_inline(ctx, &name.children).trim())
            })
            .collect::<Vec<_>>()
            .join(", ");
        let types = item
            .types
            .iter()
            .map(|t| render_inline(ctx, t).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let mut head = names;
        if !types.is_empty() {
            head.push_str(&format!(" ({})", types.join(", ")));
        }

        let mut lines = render_blocks(ctx, &item.description);
        match lines.first_mut() {
            Some(first) => *first = format!("{head} {first}"),
            None => lines.push(head),
        }
        push_item(&mut items, "- ", lines);
    }
    titled(title, items)
}

fn render_section(ctx: &RenderContext, section: &DocSection) -> Vec<String> {
    let mut out = Vec::new();
    let title = render_inline(ctx, &section.title);
    let title = title.trim();
    if !title.is_empty() {
        let level = (section.level as usize + 2).min(6);
        let id = section
            .id
            .as_deref()
            .map(|id| format!(" {{#{id}}}"))
            .unwrap_or_default();
        out.push(format!("{} {title}{id}", "#".repeat(level)));
    }
    push_block(&mut out, render_blocks(ctx, &section.children));
    out
}

fn fenced(text: &str, language: &str) -> Vec<String> {
    let text = text.trim_matches('\n');
    let fence = code_fence(text);
    let mut out = vec![format!("{fence}{language}")];
    out.extend(text.lines().map(|line| line.trim_end().to_string()));
    out.push(fence);
    out
}

/// Text content with every bit of markup dropped.
pub fn plain_text(nodes: &[DocNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            DocNode::Text(text) | DocNode::Verbatim(text) => out.push_str(text),
            DocNode::Symbol(symbol) => out.push_str(symbol),
            DocNode::LineBreak => out.push('\n'),
            DocNode::Para(children)
            | DocNode::Preformatted(children)
            | DocNode::BlockQuote(children)
            | DocNode::Style { children, .. }
            | DocNode::Ulink { children, .. }
            | DocNode::Heading { children, .. } => out.push_str(&plain_text(children)),
            DocNode::Ref(reference) => out.push_str(&plain_text(&reference.children)),
            _ => {}
        }
    }
    out
}
