//! doxymdx: convert Doxygen XML output into Markdown/MDX reference pages
//! and a sidebar for a static documentation site.
//!
//! The run goes through four stages:
//!
//! - [`model`] parses `index.xml`, `Doxyfile.xml` and every compound file
//!   into typed trees.
//! - [`view`] binds them into trees and DAGs and assigns permalinks.
//! - [`render`] turns description markup into page text.
//! - [`page`] assembles the pages and the sidebar; [`pipeline`] drives the
//!   file I/O.

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod options;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod slug;
pub mod view;
pub mod xml;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{Error, Result};
pub use options::Options;
pub use pipeline::{run, Summary};
pub use render::PageFormat;
