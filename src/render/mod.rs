//! Markup rendering: description trees, linked text, listings and tables.
//!
//! Two contracts, chosen by [`DocNode::is_block`](crate::model::DocNode::is_block):
//! inline nodes render to a `String`, block nodes render to output lines.
//! Every call takes the [`RenderContext`] explicitly.

pub mod code;
pub mod description;
pub mod escape;
pub mod table;

pub use code::{render_linked_text, render_listing};
pub use description::{render_blocks, render_brief, render_description, render_inline};

use crate::diagnostics::Diagnostics;
use crate::model::description::RefKind;
use crate::options::Options;
use crate::view::{CompoundIdx, ViewModel};
use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Output dialect of the generated pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    Mdx,
    Md,
}

impl PageFormat {
    /// Parse a format name given on the command line.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "mdx" => Ok(Self::Mdx),
            "md" | "markdown" => Ok(Self::Md),
            _ => Err(anyhow!("unknown format: {}. Use mdx or md", name)),
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Mdx => "mdx",
            Self::Md => "md",
        }
    }

    /// A comment the page renderer leaves alone.
    pub fn comment(self, text: &str) -> String {
        match self {
            Self::Mdx => format!("{{/* {text} */}}"),
            Self::Md => format!("<!-- {text} -->"),
        }
    }

    /// Attribute name for a table cell span (JSX spells it in camel case).
    pub fn span_attribute(self, name: &'static str) -> &'static str {
        match (self, name) {
            (Self::Mdx, "colspan") => "colSpan",
            (Self::Mdx, "rowspan") => "rowSpan",
            _ => name,
        }
    }
}

/// Everything a renderer needs besides the node itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub model: &'a ViewModel,
    pub options: &'a Options,
    pub diagnostics: &'a Diagnostics,
    /// Compound whose page is being rendered.
    pub current: Option<CompoundIdx>,
    /// Inside raw HTML (tables, listings) Markdown syntax is not parsed.
    pub html: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(model: &'a ViewModel, options: &'a Options, diagnostics: &'a Diagnostics) -> Self {
        Self {
            model,
            options,
            diagnostics,
            current: None,
            html: false,
        }
    }

    pub fn for_compound(self, idx: CompoundIdx) -> Self {
        Self {
            current: Some(idx),
            ..self
        }
    }

    pub fn in_html(self) -> Self {
        Self { html: true, ..self }
    }

    pub fn format(&self) -> PageFormat {
        self.options.format
    }

    pub fn escape(&self, text: &str) -> String {
        if self.html {
            escape::escape_html_text(text, self.options.format)
        } else {
            escape::escape_text(text, self.options.format)
        }
    }

    /// URL of a referenced compound or member, if it was converted.
    pub fn resolve(&self, refid: &str, kind: RefKind) -> Option<String> {
        match kind {
            RefKind::Compound => self
                .model
                .compound_url(refid)
                .or_else(|| self.model.member_url(refid)),
            RefKind::Member => self.model.member_url(refid),
        }
    }

    /// Same as [`resolve`](Self::resolve), but records a diagnostic when
    /// the target is unknown.
    pub fn resolve_or_report(&self, refid: &str, kind: RefKind) -> Option<String> {
        let url = self.resolve(refid, kind);
        if url.is_none() {
            let page = self
                .current
                .map(|idx| self.model.get(idx).id().to_string())
                .unwrap_or_else(|| "index".to_string());
            self.diagnostics
                .unresolved_link(format!("{page}: no target for ref {refid}"));
        }
        url
    }

    /// A link in whichever syntax the current context understands.
    pub fn link(&self, url: &str, text: &str) -> String {
        if self.html {
            format!(r#"<a href="{}">{}</a>"#, escape::escape_attribute(url), text)
        } else {
            format!("[{text}]({url})")
        }
    }

    pub fn compound_link(&self, idx: CompoundIdx, text: &str) -> String {
        self.link(&self.model.page_url(idx), text)
    }
}

/// Append a block, keeping one blank line between blocks.
pub fn push_block(out: &mut Vec<String>, block: Vec<String>) {
    if block.is_empty() {
        return;
    }
    if out.last().is_some_and(|line| !line.is_empty()) {
        out.push(String::new());
    }
    out.extend(block);
}

/// Indent every non-empty line.
pub fn indent(lines: Vec<String>, prefix: &str) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}
