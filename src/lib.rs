//! # surface-base
//!
//! In-memory model of a Java/Kotlin API surface: packages, classes and their
//! members, with the structural algorithms API tooling needs and a value
//! subsystem that keeps literal values consistent across input backends.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! value   → Constant values, literal parsing, default/field value providers
//!   ↕
//! model   → Items, codebase, factory, hierarchy algorithms
//!   ↓
//! config  → Per-codebase settings
//!   ↓
//! base    → Primitives (FileId, FileLocation)
//! ```
//!
//! Loaders build a [`Codebase`](model::Codebase) through its
//! [`ItemFactory`](model::ItemFactory); writers walk it with an
//! [`ItemVisitor`](model::ItemVisitor).

/// Foundation types: FileId, locations
pub mod base;

/// Codebase settings
pub mod config;

/// Error type shared by the whole crate
pub mod error;

/// Item graph and structural algorithms
pub mod model;

/// Literal values and their providers
pub mod value;

pub use base::{FileId, FileLocation, LineCol};
pub use config::{CodebaseConfig, SuperMethodFilter};
pub use error::{ModelError, Result};
pub use model::{Codebase, ItemFactory, ItemId};
