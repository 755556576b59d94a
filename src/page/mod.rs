//! Page assembly: one page per compound, the collection index pages and
//! the sidebar manifest.

pub mod compound;
pub mod indexes;
pub mod members;
pub mod sidebar;

use crate::render::{PageFormat, RenderContext};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static RE_BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

const DO_NOT_EDIT: &str = "DO NOT EDIT! Automatically generated from the Doxygen XML files.";

/// A rendered page waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Path relative to the API folder, without extension.
    pub permalink: String,
    pub title: String,
    pub description: String,
    /// Compound kind (or `index`), added to the keywords.
    pub kind: String,
    pub body: Vec<String>,
}

impl Page {
    pub fn file_path(&self, format: PageFormat) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.permalink, format.file_extension()))
    }

    /// Front matter, the do-not-edit comment and the body.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let options = ctx.options;
        let slug_path = if self.permalink == "index" {
            ""
        } else {
            self.permalink
                .strip_suffix("/index")
                .unwrap_or(&self.permalink)
        };
        let slug = format!("/{}{}", options.sidebar_prefix(), slug_path);
        let slug = if slug.len() > 1 { slug.trim_end_matches('/') } else { &slug };

        let mut out = String::from("---\n");
        out.push_str(&format!("slug: {}\n", yaml_string(slug)));
        out.push_str(&format!("title: {}\n", yaml_string(&self.title)));
        if !self.description.is_empty() {
            out.push_str(&format!("description: {}\n", yaml_string(&self.description)));
        }
        out.push_str("custom_edit_url: null\n");
        out.push_str("keywords:\n");
        let mut keywords = vec!["doxygen".to_string(), "reference".to_string()];
        keywords.push(self.kind.clone());
        keywords.extend(options.keywords.iter().cloned());
        keywords.dedup();
        for keyword in keywords {
            out.push_str(&format!("  - {}\n", yaml_string(&keyword)));
        }
        out.push_str("---\n\n");
        out.push_str(&ctx.format().comment(DO_NOT_EDIT));
        out.push_str("\n\n");

        let body = self.body.join("\n");
        out.push_str(body.trim());
        out.push('\n');
        RE_BLANK_RUNS.replace_all(&out, "\n\n").into_owned()
    }
}

/// Double-quoted YAML scalar.
fn yaml_string(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Every page of the site: compounds first, then the collection indexes.
pub fn build_pages(ctx: &RenderContext) -> Vec<Page> {
    let model = ctx.model;
    let mut pages = Vec::with_capacity(model.compounds.len() + 6);
    for idx in 0..model.compounds.len() {
        if Some(idx) == model.main_page {
            continue;
        }
        pages.push(compound::compound_page(&ctx.for_compound(idx), idx));
    }
    pages.extend(indexes::index_pages(ctx));
    tracing::debug!(pages = pages.len(), "pages rendered");
    pages
}
