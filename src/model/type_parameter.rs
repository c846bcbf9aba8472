//! Type parameters of classes and callables.

use smol_str::SmolStr;

use crate::error::{ModelError, Result};

use super::ids::{ItemId, TypeParameterId};
use super::item::ItemData;
use super::types::TypeItem;

/// Bounds are filled in after every parameter of a list exists, because
/// bounds may mention sibling parameters (`<T extends Comparable<T>>`).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TypeParameterBounds {
    #[default]
    Pending,
    Resolved(Vec<TypeItem>),
}

#[derive(Debug)]
pub struct TypeParameterItem {
    pub(crate) data: ItemData,
    pub(crate) name: SmolStr,
    pub(crate) owner: ItemId,
    pub(crate) is_reified: bool,
    pub(crate) bounds: TypeParameterBounds,
}

impl TypeParameterItem {
    pub(crate) fn new(data: ItemData, name: SmolStr, owner: ItemId, is_reified: bool) -> Self {
        Self {
            data,
            name,
            owner,
            is_reified,
            bounds: TypeParameterBounds::Pending,
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class or callable declaring this parameter.
    pub fn owner(&self) -> ItemId {
        self.owner
    }

    /// Kotlin `reified`.
    pub fn is_reified(&self) -> bool {
        self.is_reified
    }

    pub fn resolved_bounds(&self) -> Option<&[TypeItem]> {
        match &self.bounds {
            TypeParameterBounds::Resolved(bounds) => Some(bounds),
            TypeParameterBounds::Pending => None,
        }
    }

    pub fn bounds(&self) -> Result<&[TypeItem]> {
        self.resolved_bounds().ok_or_else(|| ModelError::UnresolvedBounds {
            name: self.name.to_string(),
        })
    }

    pub(crate) fn set_bounds(&mut self, bounds: Vec<TypeItem>) -> Result<()> {
        if let TypeParameterBounds::Resolved(_) = self.bounds {
            return Err(ModelError::BoundsAlreadyResolved {
                name: self.name.to_string(),
            });
        }
        self.bounds = TypeParameterBounds::Resolved(bounds);
        Ok(())
    }

    /// A type use of this parameter.
    pub fn as_type(&self, id: TypeParameterId) -> TypeItem {
        TypeItem::Variable {
            name: self.name.clone(),
            parameter: id,
        }
    }
}
