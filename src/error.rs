//! Library error type.
//!
//! Everything here is fatal: a malformed or inconsistent Doxygen export
//! stops the run. Recoverable conditions go to [`crate::diagnostics`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("<{element}> has no `{attribute}` attribute")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> attribute `{attribute}` has unexpected value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("<{element}> has no <{child}> element")]
    MissingElement { element: String, child: String },

    #[error("expected <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },

    #[error("{0}")]
    Structural(String),

    #[error("{from} references unknown compound {refid}")]
    UnresolvedReference { from: String, refid: String },

    #[error("{child} already has parent {existing}, cannot attach it to {parent}")]
    DuplicateParent {
        child: String,
        existing: String,
        parent: String,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
