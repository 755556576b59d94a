//! Run configuration: defaults, optional JSON config file, CLI overrides.

use crate::render::PageFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Folder with `index.xml` and the compound files.
    pub input_folder: PathBuf,
    /// Folder receiving the generated pages.
    pub output_folder: PathBuf,
    /// Site base URL, as configured in the static site generator.
    pub base_url: String,
    /// Docs sub-folder the pages live in; prefixes slugs and sidebar ids.
    pub api_folder: String,
    pub sidebar_label: String,
    pub sidebar_file: String,
    /// Language tag for fenced code blocks.
    pub language: String,
    pub format: PageFormat,
    /// Remove and recreate the output folder before writing.
    pub clean_output: bool,
    pub keywords: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("doxygen/xml"),
            output_folder: PathBuf::from("docs/api"),
            base_url: "/".to_string(),
            api_folder: "api".to_string(),
            sidebar_label: "API Reference".to_string(),
            sidebar_file: "sidebar-category.json".to_string(),
            language: "cpp".to_string(),
            format: PageFormat::Mdx,
            clean_output: true,
            keywords: Vec::new(),
        }
    }
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// URL prefix of every generated page, e.g. `/api/` or `/docs/api/`.
    pub fn url_prefix(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let folder = self.api_folder.trim_matches('/');
        if folder.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{folder}/")
        }
    }

    /// Prefix of sidebar doc ids (`api/` for the default layout).
    pub fn sidebar_prefix(&self) -> String {
        let folder = self.api_folder.trim_matches('/');
        if folder.is_empty() {
            String::new()
        } else {
            format!("{folder}/")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.url_prefix(), "/api/");
        assert_eq!(options.sidebar_prefix(), "api/");
        assert_eq!(options.format, PageFormat::Mdx);
    }

    #[test]
    fn json_overrides_some_fields() {
        let options = Options::from_json(
            r#"{ "baseUrl": "/micro-os-plus/", "apiFolder": "reference", "format": "md" }"#,
        )
        .unwrap();
        assert_eq!(options.url_prefix(), "/micro-os-plus/reference/");
        assert_eq!(options.format, PageFormat::Md);
        assert_eq!(options.sidebar_label, "API Reference");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Options::from_json(r#"{ "format": "html" }"#).is_err());
    }

    #[test]
    fn empty_api_folder() {
        let options = Options {
            api_folder: String::new(),
            ..Options::default()
        };
        assert_eq!(options.url_prefix(), "/");
        assert_eq!(options.sidebar_prefix(), "");
    }
}
