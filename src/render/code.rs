//! Linked text and program listings.

use super::escape::{code_fence, escape_attribute, escape_code};
use super::RenderContext;
use crate::model::description::{CodeLine, CodePiece, ProgramListing};
use crate::model::{LinkedPart, LinkedText};

/// A type, initializer or default value with its embedded links.
pub fn render_linked_text(ctx: &RenderContext, text: &LinkedText) -> String {
    let mut out = String::new();
    for part in &text.0 {
        match part {
            LinkedPart::Text(text) => out.push_str(&ctx.escape(text)),
            LinkedPart::Ref {
                refid,
                kind,
                external,
                text,
            } => {
                let label = ctx.escape(text);
                let url = match external {
                    Some(_) => None,
                    None => ctx.resolve_or_report(refid, *kind),
                };
                match url {
                    Some(url) => out.push_str(&ctx.link(&url, &label)),
                    None => out.push_str(&label),
                }
            }
        }
    }
    out
}

/// Fence language for a listing, from its file name or the default.
pub fn listing_language(filename: Option<&str>, default: &str) -> String {
    let extension = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    let language = match extension.as_deref() {
        Some("c") => "c",
        Some("cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "ipp" | "tpp") => "cpp",
        Some("py") => "python",
        Some("sh" | "bash") => "bash",
        Some("java") => "java",
        Some("cs") => "csharp",
        Some("js") => "javascript",
        Some("rs") => "rust",
        Some("cmake") => "cmake",
        Some("md" | "markdown") => "markdown",
        _ => default,
    };
    language.to_string()
}

/// A listing renders as a fenced block unless some token links somewhere;
/// then it becomes a single-line `<pre>` so neither Markdown nor MDX
/// touches its content.
pub fn render_listing(ctx: &RenderContext, listing: &ProgramListing) -> Vec<String> {
    let linked = listing.lines.iter().any(|line| {
        line.highlights
            .iter()
            .flat_map(|h| &h.pieces)
            .any(|piece| matches!(piece, CodePiece::Ref { refid, kind, .. } if ctx.resolve(refid, *kind).is_some()))
    });

    if !linked {
        let text = listing
            .lines
            .iter()
            .map(plain_line)
            .collect::<Vec<_>>()
            .join("\n");
        let fence = code_fence(&text);
        let language = listing_language(listing.filename.as_deref(), &ctx.options.language);
        let mut out = vec![format!("{fence}{language}")];
        out.extend(text.lines().map(str::to_string));
        out.push(fence);
        return out;
    }

    let body = listing
        .lines
        .iter()
        .map(|line| linked_line(ctx, line))
        .collect::<Vec<_>>()
        .join("<br/>");
    vec![format!("<pre><code>{body}</code></pre>")]
}

fn plain_line(line: &CodeLine) -> String {
    let mut out = String::new();
    for piece in line.highlights.iter().flat_map(|h| &h.pieces) {
        match piece {
            CodePiece::Text(text) => out.push_str(text),
            CodePiece::Space(n) => out.push_str(&" ".repeat(*n)),
            CodePiece::Ref { text, .. } => out.push_str(text),
        }
    }
    out.trim_end().to_string()
}

fn linked_line(ctx: &RenderContext, line: &CodeLine) -> String {
    let mut out = String::new();
    for piece in line.highlights.iter().flat_map(|h| &h.pieces) {
        match piece {
            CodePiece::Text(text) => out.push_str(&escape_code(text)),
            CodePiece::Space(n) => out.push_str(&" ".repeat(*n)),
            CodePiece::Ref { refid, kind, text } => match ctx.resolve(refid, *kind) {
                Some(url) => out.push_str(&format!(
                    r#"<a href="{}">{}</a>"#,
                    escape_attribute(&url),
                    escape_code(text)
                )),
                None => out.push_str(&escape_code(text)),
            },
        }
    }
    out.trim_end().to_string()
}
