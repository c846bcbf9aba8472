//! Visibility, keyword flags and annotations of an item.

use std::fmt;

use super::annotation::AnnotationItem;

/// Access level, ordered from least to most visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Private,
    #[default]
    PackagePrivate,
    /// Kotlin `internal`.
    Internal,
    Protected,
    Public,
}

impl Visibility {
    /// The keyword written in source, empty for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::PackagePrivate => "",
            Visibility::Internal => "internal",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::PackagePrivate => f.write_str("package-private"),
            other => f.write_str(other.keyword()),
        }
    }
}

/// Keyword-like modifiers. Java and Kotlin flags share one set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags {
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_default: bool,
    pub is_sealed: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    pub is_strictfp: bool,
    pub is_deprecated: bool,
    pub is_varargs: bool,
    pub is_const: bool,
    pub is_inline: bool,
    pub is_suspend: bool,
    pub is_operator: bool,
    pub is_infix: bool,
    pub is_data: bool,
    pub is_companion: bool,
    pub is_fun: bool,
    pub is_value: bool,
    pub is_expect: bool,
    pub is_actual: bool,
}

impl ModifierFlags {
    /// Keywords for the flags that are set, in Java declaration order.
    pub fn keywords(&self) -> Vec<&'static str> {
        let table = [
            (self.is_abstract, "abstract"),
            (self.is_default, "default"),
            (self.is_static, "static"),
            (self.is_final, "final"),
            (self.is_sealed, "sealed"),
            (self.is_transient, "transient"),
            (self.is_volatile, "volatile"),
            (self.is_synchronized, "synchronized"),
            (self.is_native, "native"),
            (self.is_strictfp, "strictfp"),
            (self.is_const, "const"),
            (self.is_inline, "inline"),
            (self.is_suspend, "suspend"),
            (self.is_operator, "operator"),
            (self.is_infix, "infix"),
            (self.is_data, "data"),
            (self.is_companion, "companion"),
            (self.is_fun, "fun"),
            (self.is_value, "value"),
            (self.is_expect, "expect"),
            (self.is_actual, "actual"),
        ];
        table
            .into_iter()
            .filter_map(|(set, keyword)| set.then_some(keyword))
            .collect()
    }
}

/// The full modifier state of an item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierList {
    pub visibility: Visibility,
    pub flags: ModifierFlags,
    pub annotations: Vec<AnnotationItem>,
}

impl ModifierList {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn public() -> Self {
        Self::new(Visibility::Public)
    }

    pub fn with_flags(mut self, update: impl FnOnce(&mut ModifierFlags)) -> Self {
        update(&mut self.flags);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationItem) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    pub fn is_static(&self) -> bool {
        self.flags.is_static
    }

    pub fn is_default(&self) -> bool {
        self.flags.is_default
    }

    pub fn find_annotation(&self, qualified_name: &str) -> Option<&AnnotationItem> {
        self.annotations
            .iter()
            .find(|a| a.qualified_name == qualified_name)
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.find_annotation(qualified_name).is_some()
    }

    /// Deprecated through the flag or a deprecation annotation.
    pub fn is_deprecated(&self) -> bool {
        self.flags.is_deprecated || self.annotations.iter().any(AnnotationItem::is_deprecated)
    }

    /// Structural equivalence: same visibility and flags, and the same
    /// annotations with equal attribute values regardless of order.
    pub fn equivalent_to(&self, other: &ModifierList) -> bool {
        self.visibility == other.visibility
            && self.flags == other.flags
            && self.annotations.len() == other.annotations.len()
            && self.annotations_pair_up(other)
    }

    /// Every annotation of `self` matched to a distinct one of `other`.
    fn annotations_pair_up(&self, other: &ModifierList) -> bool {
        let mut unmatched: Vec<&AnnotationItem> = other.annotations.iter().collect();
        self.annotations.iter().all(|a| {
            match unmatched.iter().position(|b| a.equivalent_to(b)) {
                Some(index) => {
                    unmatched.swap_remove(index);
                    true
                }
                None => false,
            }
        })
    }
}

impl fmt::Display for ModifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.annotations.iter().map(AnnotationItem::to_source).collect();
        if self.visibility != Visibility::PackagePrivate {
            parts.push(self.visibility.keyword().to_string());
        }
        parts.extend(self.flags.keywords().into_iter().map(str::to_string));
        if parts.is_empty() {
            f.write_str("<none>")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::annotation::JAVA_DEPRECATED;

    #[test]
    fn test_visibility_order() {
        assert!(Visibility::Private < Visibility::PackagePrivate);
        assert!(Visibility::Protected < Visibility::Public);
        assert_eq!(Visibility::default(), Visibility::PackagePrivate);
    }

    #[test]
    fn test_deprecated_from_flag_or_annotation() {
        let flagged = ModifierList::public().with_flags(|f| f.is_deprecated = true);
        let annotated = ModifierList::public().with_annotation(AnnotationItem::new(JAVA_DEPRECATED));

        assert!(flagged.is_deprecated());
        assert!(annotated.is_deprecated());
        assert!(!ModifierList::public().is_deprecated());
    }

    #[test]
    fn test_equivalence_ignores_annotation_order() {
        let a = ModifierList::public()
            .with_annotation(AnnotationItem::new("a.X"))
            .with_annotation(AnnotationItem::new("a.Y"));
        let b = ModifierList::public()
            .with_annotation(AnnotationItem::new("a.Y"))
            .with_annotation(AnnotationItem::new("a.X"));
        let c = ModifierList::public().with_flags(|f| f.is_final = true);

        assert!(a.equivalent_to(&b));
        assert!(!ModifierList::public().equivalent_to(&c));
    }

    #[test]
    fn test_equivalence_counts_repeated_annotations() {
        let twice = ModifierList::public()
            .with_annotation(AnnotationItem::new("a.A"))
            .with_annotation(AnnotationItem::new("a.A"));
        let mixed = ModifierList::public()
            .with_annotation(AnnotationItem::new("a.A"))
            .with_annotation(AnnotationItem::new("a.B"));

        assert!(!twice.equivalent_to(&mixed));
        assert!(!mixed.equivalent_to(&twice));
        assert!(twice.equivalent_to(&twice.clone()));
    }

    #[test]
    fn test_display() {
        let modifiers = ModifierList::public()
            .with_flags(|f| {
                f.is_static = true;
                f.is_final = true;
            })
            .with_annotation(AnnotationItem::new("a.X"));
        assert_eq!(modifiers.to_string(), "@a.X public static final");
        assert_eq!(ModifierList::default().to_string(), "<none>");
    }
}
