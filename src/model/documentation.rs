//! Documentation comments and the tags the model reacts to.

use std::sync::Arc;

/// The doc comment attached to an item, kept as written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Documentation {
    text: Arc<str>,
}

impl Documentation {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the comment contains the block or inline tag `tag`
    /// (for example `@hide`), as a whole word.
    pub fn has_tag(&self, tag: &str) -> bool {
        let mut rest = self.text.as_ref();
        while let Some(pos) = rest.find(tag) {
            let after = &rest[pos + tag.len()..];
            let ends_word = after
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_');
            if ends_word {
                return true;
            }
            rest = after;
        }
        false
    }

    pub fn is_deprecated(&self) -> bool {
        self.has_tag("@deprecated")
    }

    pub fn is_hidden(&self) -> bool {
        self.has_tag("@hide") || self.has_tag("@pending")
    }

    pub fn is_removed(&self) -> bool {
        self.has_tag("@removed")
    }

    pub fn is_doc_only(&self) -> bool {
        self.has_tag("@doconly")
    }
}

impl From<&str> for Documentation {
    fn from(text: &str) -> Self {
        Documentation::new(text)
    }
}

impl From<String> for Documentation {
    fn from(text: String) -> Self {
        Documentation::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let doc = Documentation::new("/** Does things.\n * @deprecated use other\n * @hide */");
        assert!(doc.is_deprecated());
        assert!(doc.is_hidden());
        assert!(!doc.is_removed());
    }

    #[test]
    fn test_tag_must_be_whole_word() {
        let doc = Documentation::new("/** @hidefoo @removedX */");
        assert!(!doc.is_hidden());
        assert!(!doc.is_removed());
        assert!(Documentation::none().is_empty());
    }
}
