//! doxymdx: generate Docusaurus API reference pages from Doxygen XML.
//!
//! `doxymdx -i build/doxygen/xml -o website/docs/api`

use anyhow::Result;
use clap::{ArgAction, Parser};
use doxymdx::{Options, PageFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "doxymdx",
    about = "Convert Doxygen XML into Markdown/MDX pages and a sidebar"
)]
struct Cli {
    /// Folder with the Doxygen XML output (index.xml and compound files)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output folder for the generated pages
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSON configuration file; flags given here override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Page format: mdx (default) or md
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Base URL of the documentation site
    #[arg(long)]
    base_url: Option<String>,

    /// Docs sub-folder holding the API pages
    #[arg(long)]
    api_folder: Option<String>,

    /// Label of the top sidebar category
    #[arg(long)]
    sidebar_label: Option<String>,

    /// Language tag for code blocks
    #[arg(long)]
    language: Option<String>,

    /// Do not remove the output folder before writing
    #[arg(long)]
    keep_output: bool,

    /// More logging; repeat for debug output
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(input) = &self.input {
            options.input_folder = input.clone();
        }
        if let Some(output) = &self.output {
            options.output_folder = output.clone();
        }
        if let Some(format) = &self.format {
            options.format = PageFormat::from_name(format)?;
        }
        if let Some(base_url) = &self.base_url {
            options.base_url = base_url.clone();
        }
        if let Some(api_folder) = &self.api_folder {
            options.api_folder = api_folder.clone();
        }
        if let Some(label) = &self.sidebar_label {
            options.sidebar_label = label.clone();
        }
        if let Some(language) = &self.language {
            options.language = language.clone();
        }
        if self.keep_output {
            options.clean_output = false;
        }
        Ok(options)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options()?;
    let summary = doxymdx::run(&options).await?;
    println!("{summary}");
    Ok(())
}
