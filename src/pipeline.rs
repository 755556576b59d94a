//! One conversion run: read the XML folder, resolve, render, write.

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::Error;
use crate::model::{self, CompoundKind, Doxyfile, ParsedXml};
use crate::options::Options;
use crate::page::build_pages;
use crate::page::sidebar::build_sidebar;
use crate::render::RenderContext;
use crate::view::ViewModel;
use crate::xml::XmlParser;
use anyhow::{Context, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What a run produced.
#[derive(Debug)]
pub struct Summary {
    pub pages_written: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Summary {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pages written", self.pages_written)?;
        if !self.diagnostics.is_empty() {
            write!(f, ", {} diagnostics", self.diagnostics.len())?;
        }
        Ok(())
    }
}

async fn read_xml(path: &Path) -> crate::error::Result<String> {
    fs::read_to_string(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `index.xml`, `Doxyfile.xml` and every listed compound file.
pub async fn read_input(options: &Options, diagnostics: &Diagnostics) -> Result<ParsedXml> {
    let folder = &options.input_folder;
    let xml = XmlParser::new(diagnostics);

    let index_path = folder.join("index.xml");
    let text = read_xml(&index_path)
        .await
        .context("failed to read the Doxygen index")?;
    let index = model::parse_index(&xml, &text)
        .with_context(|| format!("failed to parse {}", index_path.display()))?;
    tracing::info!(
        compounds = index.compounds.len(),
        folder = %folder.display(),
        "reading Doxygen XML"
    );

    let doxyfile_path = folder.join("Doxyfile.xml");
    let doxyfile = match read_xml(&doxyfile_path).await {
        Ok(text) => model::parse_doxyfile(&xml, &text)
            .with_context(|| format!("failed to parse {}", doxyfile_path.display()))?,
        Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            diagnostics.report(
                DiagnosticKind::MissingInput,
                format!("{} not found, project details unavailable", doxyfile_path.display()),
            );
            Doxyfile::default()
        }
        Err(err) => return Err(err).context("failed to read the Doxyfile"),
    };

    let mut parsed = ParsedXml {
        doxyfile,
        ..ParsedXml::default()
    };
    for entry in &index.compounds {
        if CompoundKind::from_doxygen(&entry.kind).is_none() {
            diagnostics.unsupported(format!("compound {} of kind {} skipped", entry.refid, entry.kind));
            parsed.skipped.insert(entry.refid.clone());
            continue;
        }
        let path = folder.join(format!("{}.xml", entry.refid));
        let text = read_xml(&path)
            .await
            .with_context(|| format!("failed to read compound {}", entry.refid))?;
        let compounds = model::parse_compound_file(&xml, &text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        parsed.compounds.extend(compounds);
    }
    model::backfill_member_kinds(&mut parsed.compounds);
    parsed.index = index;
    Ok(parsed)
}

/// Convert the Doxygen XML in `options.input_folder` into pages and a
/// sidebar under `options.output_folder`.
pub async fn run(options: &Options) -> Result<Summary> {
    let diagnostics = Diagnostics::new();
    let parsed = read_input(options, &diagnostics).await?;

    let model = ViewModel::build(parsed, options, &diagnostics)
        .context("failed to resolve the compound hierarchy")?;
    let ctx = RenderContext::new(&model, options, &diagnostics);
    let rendered: Vec<(PathBuf, String)> = build_pages(&ctx)
        .iter()
        .map(|page| (page.file_path(options.format), page.render(&ctx)))
        .collect();
    let sidebar = build_sidebar(&ctx)
        .to_json()
        .context("failed to serialize the sidebar")?;

    write_output(options, &rendered, &sidebar).await?;
    tracing::info!(
        pages = rendered.len(),
        output = %options.output_folder.display(),
        "conversion finished"
    );
    Ok(Summary {
        pages_written: rendered.len(),
        diagnostics: diagnostics.into_entries(),
    })
}

async fn write_output(options: &Options, pages: &[(PathBuf, String)], sidebar: &str) -> Result<()> {
    let output = &options.output_folder;
    if options.clean_output && fs::try_exists(output).await.unwrap_or(false) {
        fs::remove_dir_all(output)
            .await
            .with_context(|| format!("failed to clean output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .await
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;

    for (relative, text) in pages {
        let path = output.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, text)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "page written");
    }

    let sidebar_path = output.join(&options.sidebar_file);
    fs::write(&sidebar_path, sidebar)
        .await
        .with_context(|| format!("failed to write {}", sidebar_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_index_is_fatal() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            input_folder: dir.path().join("xml"),
            output_folder: dir.path().join("out"),
            ..Options::default()
        };
        let err = run(&options).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to read the Doxygen index"));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn empty_index_still_writes_the_main_page() {
        let dir = TempDir::new().unwrap();
        let xml = dir.path().join("xml");
        std::fs::create_dir(&xml).unwrap();
        std::fs::write(xml.join("index.xml"), r#"<doxygenindex version="1.10.0"/>"#).unwrap();
        let options = Options {
            input_folder: xml,
            output_folder: dir.path().join("out"),
            ..Options::default()
        };

        let summary = run(&options).await.unwrap();
        assert_eq!(summary.pages_written, 1);
        assert_eq!(summary.count(DiagnosticKind::MissingInput), 1);
        assert!(dir.path().join("out/index.mdx").exists());
        assert!(dir.path().join("out/sidebar-category.json").exists());
        assert_eq!(summary.to_string(), "1 pages written, 1 diagnostics");
    }
}
