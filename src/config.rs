//! Codebase configuration.

use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::model::{CallableId, Codebase, Language};

/// Decides whether a structurally matching ancestor method must be ignored
/// when computing super methods. Called with `(method, candidate)`; returning
/// `true` excludes the candidate.
///
/// This is the hook for working around known resolver discrepancies in a
/// particular input without special-casing names inside the algorithm.
pub type SuperMethodFilter = Rc<dyn Fn(&Codebase, CallableId, CallableId) -> bool>;

/// Settings fixed for the lifetime of one codebase.
#[derive(Clone, Default)]
pub struct CodebaseConfig {
    /// Human readable name used in logs, e.g. "public API from sources".
    pub description: String,
    /// Language stamped on items when a loader does not say otherwise.
    pub default_language: Language,
    /// Annotations whose presence makes an item originally hidden.
    pub hide_annotations: Vec<SmolStr>,
    pub super_method_filter: Option<SuperMethodFilter>,
}

impl CodebaseConfig {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_hide_annotation(mut self, qualified_name: impl Into<SmolStr>) -> Self {
        self.hide_annotations.push(qualified_name.into());
        self
    }

    pub fn with_super_method_filter(
        mut self,
        filter: impl Fn(&Codebase, CallableId, CallableId) -> bool + 'static,
    ) -> Self {
        self.super_method_filter = Some(Rc::new(filter));
        self
    }

    pub fn is_hide_annotation(&self, qualified_name: &str) -> bool {
        self.hide_annotations.iter().any(|a| a == qualified_name)
    }
}

impl fmt::Debug for CodebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodebaseConfig")
            .field("description", &self.description)
            .field("default_language", &self.default_language)
            .field("hide_annotations", &self.hide_annotations)
            .field("super_method_filter", &self.super_method_filter.is_some())
            .finish()
    }
}
