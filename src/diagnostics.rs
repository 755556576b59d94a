//! Non-fatal diagnostics sink.
//!
//! Unknown schema elements, dangling description links and permalink
//! collisions never abort a run. They are recorded here (and logged through
//! `tracing`) so callers and tests can inspect how degraded a run was.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An element, attribute or value the converter does not model.
    UnsupportedConstruct,
    /// A `ref` inside a description whose target is unknown.
    UnresolvedLink,
    /// The same compound or member ID was defined more than once.
    DuplicateId,
    /// Several compounds computed the same permalink and were suffixed.
    PermalinkCollision,
    /// An optional input file was not found.
    MissingInput,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedConstruct => "unsupported",
            Self::UnresolvedLink => "unresolved-link",
            Self::DuplicateId => "duplicate-id",
            Self::PermalinkCollision => "permalink-collision",
            Self::MissingInput => "missing-input",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects diagnostics for one run.
///
/// Interior mutability lets every stage share a `&Diagnostics` while the
/// pipeline stays single-threaded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            DiagnosticKind::PermalinkCollision => tracing::debug!(%kind, "{message}"),
            _ => tracing::warn!(%kind, "{message}"),
        }
        self.entries.borrow_mut().push(Diagnostic { kind, message });
    }

    pub fn unsupported(&self, message: impl Into<String>) {
        self.report(DiagnosticKind::UnsupportedConstruct, message);
    }

    pub fn unresolved_link(&self, message: impl Into<String>) {
        self.report(DiagnosticKind::UnresolvedLink, message);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.borrow().iter().filter(|d| d.kind == kind).count()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let diagnostics = Diagnostics::new();
        diagnostics.unsupported("<dot> in detaileddescription");
        diagnostics.unresolved_link("classMissing");
        diagnostics.unsupported("<msc> in para");

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedConstruct), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::UnresolvedLink), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::DuplicateId), 0);
    }

    #[test]
    fn display_includes_kind() {
        let d = Diagnostic {
            kind: DiagnosticKind::DuplicateId,
            message: "classFoo".to_string(),
        };
        assert_eq!(d.to_string(), "[duplicate-id] classFoo");
    }
}
