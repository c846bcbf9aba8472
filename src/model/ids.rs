//! Typed handles into the codebase arenas.
//!
//! Every item lives in an arena owned by [`Codebase`](super::Codebase) and is
//! referenced by a small copyable id. Ids are only minted by the codebase, so
//! holding a `ClassId` guarantees the slot really is a class.

use std::fmt;

macro_rules! item_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the raw arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

item_id!(
    /// Handle for a package.
    PackageId,
    "pkg"
);
item_id!(
    /// Handle for a class, interface, enum, annotation type or object.
    ClassId,
    "class"
);
item_id!(
    /// Handle for a constructor or method.
    CallableId,
    "callable"
);
item_id!(
    /// Handle for a field or enum constant.
    FieldId,
    "field"
);
item_id!(
    /// Handle for a Kotlin property.
    PropertyId,
    "property"
);
item_id!(
    /// Handle for a callable parameter.
    ParameterId,
    "param"
);
item_id!(
    /// Handle for a class or callable type parameter.
    TypeParameterId,
    "typaram"
);

/// A handle to any item, used by operations common to every kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ItemId {
    Package(PackageId),
    Class(ClassId),
    Callable(CallableId),
    Field(FieldId),
    Property(PropertyId),
    Parameter(ParameterId),
    TypeParameter(TypeParameterId),
}

impl From<PackageId> for ItemId {
    fn from(id: PackageId) -> Self {
        ItemId::Package(id)
    }
}

impl From<ClassId> for ItemId {
    fn from(id: ClassId) -> Self {
        ItemId::Class(id)
    }
}

impl From<CallableId> for ItemId {
    fn from(id: CallableId) -> Self {
        ItemId::Callable(id)
    }
}

impl From<FieldId> for ItemId {
    fn from(id: FieldId) -> Self {
        ItemId::Field(id)
    }
}

impl From<PropertyId> for ItemId {
    fn from(id: PropertyId) -> Self {
        ItemId::Property(id)
    }
}

impl From<ParameterId> for ItemId {
    fn from(id: ParameterId) -> Self {
        ItemId::Parameter(id)
    }
}

impl From<TypeParameterId> for ItemId {
    fn from(id: TypeParameterId) -> Self {
        ItemId::TypeParameter(id)
    }
}
