//! Error type for model construction and contract violations.
//!
//! Errors fall into two groups:
//! - **Input errors**: contradictory declarations such as two classes with the
//!   same qualified name or a package declared with conflicting modifiers.
//! - **Contract violations**: callers asking for something the model promised
//!   it would not provide, such as the value of an unknown default.
//!
//! Lookup misses are not errors; they are `None` results.

use thiserror::Error;

/// Errors raised while building or querying a codebase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A class with this qualified name is already registered.
    #[error("duplicate class '{name}': defined at {duplicate}, previously defined at {existing}")]
    DuplicateClass {
        name: String,
        existing: String,
        duplicate: String,
    },

    /// A package was declared twice with different modifiers.
    #[error("package '{name}' declared with conflicting modifiers: {existing} vs {declared}")]
    ConflictingPackageModifiers {
        name: String,
        existing: String,
        declared: String,
    },

    /// Packages are always public.
    #[error("package '{name}' must be public, found {visibility}")]
    NonPublicPackage { name: String, visibility: String },

    /// A default value was requested but is present without being retrievable.
    #[error("default value of {item} is not known")]
    UnknownDefaultValue { item: String },

    /// A default value was requested from an item that has none.
    #[error("{item} has no default value")]
    MissingDefaultValue { item: String },

    /// Retention was requested from a class that is not an annotation type.
    #[error("{class} is not an annotation type")]
    NotAnAnnotation { class: String },

    /// Type-parameter bounds were read before they were populated.
    #[error("bounds of type parameter '{name}' have not been resolved")]
    UnresolvedBounds { name: String },

    /// Type-parameter bounds were populated twice.
    #[error("bounds of type parameter '{name}' were already resolved")]
    BoundsAlreadyResolved { name: String },

    /// A literal could not be read against its declared type.
    #[error("invalid literal '{text}': {reason}")]
    InvalidLiteral { text: String, reason: String },

    /// A pluggable class assembler failed.
    #[error("failed to assemble class '{name}': {message}")]
    Assembler { name: String, message: String },
}

impl ModelError {
    pub(crate) fn invalid_literal(text: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::InvalidLiteral {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModelError>;
