//! State shared by every kind of item.
//!
//! Rather than a class hierarchy, each entity struct embeds one [`ItemData`]
//! and keeps its kind-specific fields next to it. Behaviour common to all
//! kinds is written once against `ItemData` (see the `Codebase::item_*`
//! accessors) and dispatched through [`ItemId`](super::ItemId).

use std::fmt;

use crate::base::FileLocation;

use super::documentation::Documentation;
use super::modifiers::ModifierList;
use super::selectors::ApiVariantSelectors;

/// Source language an item was declared in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    Java,
    Kotlin,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Java => f.write_str("Java"),
            Language::Kotlin => f.write_str("Kotlin"),
        }
    }
}

/// Identity, modifiers and documentation of an item.
#[derive(Clone, Debug)]
pub struct ItemData {
    pub location: FileLocation,
    pub modifiers: ModifierList,
    pub documentation: Documentation,
    pub language: Language,
    pub(crate) selectors: ApiVariantSelectors,
}

impl ItemData {
    pub fn new(
        location: FileLocation,
        modifiers: ModifierList,
        documentation: Documentation,
        language: Language,
        selectors: ApiVariantSelectors,
    ) -> Self {
        Self {
            location,
            modifiers,
            documentation,
            language,
            selectors,
        }
    }

    /// Deprecated by its own modifiers or doc comment, ignoring containers.
    pub fn is_explicitly_deprecated(&self) -> bool {
        self.modifiers.is_deprecated() || self.documentation.is_deprecated()
    }

    /// A copy for a duplicated item: same modifiers and docs, fresh selectors.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            location: self.location,
            modifiers: self.modifiers.clone(),
            documentation: self.documentation.clone(),
            language: self.language,
            selectors: self.selectors.duplicate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_deprecation_from_docs() {
        let data = ItemData::new(
            FileLocation::UNKNOWN,
            ModifierList::public(),
            Documentation::new("/** @deprecated */"),
            Language::Java,
            ApiVariantSelectors::new(),
        );
        assert!(data.is_explicitly_deprecated());
        assert!(data.duplicate().is_explicitly_deprecated());
    }
}
