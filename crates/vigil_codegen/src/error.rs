//! Error types for the processor.
//!
//! Signature problems in user code are never errors here: they are reported
//! as [`Diagnostic`](crate::diagnostics::Diagnostic)s. [`ProcessorError`]
//! covers inputs a host should never produce.

use thiserror::Error;

/// Host misuse detected while processing.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// A class, method or adapter name is not a Rust identifier.
    #[error("invalid identifier '{name}': {source}")]
    InvalidIdentifier {
        /// The offending name.
        name: String,
        /// Parser error.
        #[source]
        source: syn::Error,
    },

    /// The configured runtime path does not parse as a Rust path.
    #[error("invalid runtime crate path '{path}': {source}")]
    InvalidRuntimePath {
        /// The configured path.
        path: String,
        /// Parser error.
        #[source]
        source: syn::Error,
    },

    /// A class reference with an empty type name.
    #[error("class reference has an empty type name")]
    EmptyClassName,
}

impl ProcessorError {
    /// Creates an [`InvalidIdentifier`](Self::InvalidIdentifier).
    pub fn invalid_identifier(name: impl Into<String>, source: syn::Error) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            source,
        }
    }
}
