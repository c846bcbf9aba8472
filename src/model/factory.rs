//! Construction of items.
//!
//! [`ItemFactory`] is the only way loaders add items to a [`Codebase`]. It
//! threads the default language and variant-selector policy through every
//! creation call, links the new item into its container and, for classes,
//! registers it by qualified name.
//!
//! Construction is two-phase where children refer back to their parent:
//! a callable is created first and its parameters are attached afterwards
//! with [`ItemFactory::create_parameter_item`]; type parameters are created
//! with pending bounds that are filled in by
//! [`ItemFactory::set_type_parameter_bounds`] once the whole list exists.

use std::rc::Rc;

use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::base::FileLocation;
use crate::error::{ModelError, Result};
use crate::value::{DefaultValue, FieldValue};

use super::callable::{CallableItem, CallableKind};
use super::class::{ClassContainer, ClassItem, ClassKind, ClassOrigin};
use super::codebase::Codebase;
use super::documentation::Documentation;
use super::field::FieldItem;
use super::ids::{CallableId, ClassId, FieldId, ItemId, PackageId, ParameterId, PropertyId, TypeParameterId};
use super::item::{ItemData, Language};
use super::modifiers::{ModifierList, Visibility};
use super::package::{PackageItem, containing_package_name};
use super::parameter::ParameterItem;
use super::property::{PropertyAccessors, PropertyItem};
use super::selectors::ApiVariantSelectors;
use super::type_parameter::TypeParameterItem;
use super::types::TypeItem;

/// The per-item inputs every creation call takes.
#[derive(Clone, Debug)]
pub struct ItemDetails {
    pub location: FileLocation,
    pub modifiers: ModifierList,
    pub documentation: Documentation,
}

impl ItemDetails {
    pub fn new(location: FileLocation, modifiers: ModifierList) -> Self {
        Self {
            location,
            modifiers,
            documentation: Documentation::none(),
        }
    }

    /// Public, undocumented, without a location.
    pub fn public() -> Self {
        Self::new(FileLocation::UNKNOWN, ModifierList::public())
    }

    pub fn with_documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.documentation = documentation.into();
        self
    }
}

pub struct ItemFactory<'a> {
    codebase: &'a mut Codebase,
    language: Language,
    selectors: fn() -> ApiVariantSelectors,
}

impl<'a> ItemFactory<'a> {
    pub fn new(codebase: &'a mut Codebase) -> Self {
        let language = codebase.config().default_language;
        Self {
            codebase,
            language,
            selectors: ApiVariantSelectors::new,
        }
    }

    /// Language stamped on items created from now on.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Selector policy for items created from now on.
    pub fn with_selectors(mut self, selectors: fn() -> ApiVariantSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn codebase(&self) -> &Codebase {
        self.codebase
    }

    pub fn codebase_mut(&mut self) -> &mut Codebase {
        self.codebase
    }

    fn data(&self, details: ItemDetails) -> ItemData {
        ItemData::new(
            details.location,
            details.modifiers,
            details.documentation,
            self.language,
            (self.selectors)(),
        )
    }

    // ========================================================================
    // PACKAGES
    // ========================================================================

    /// Fetch the package called `name`, creating it and every missing
    /// container on the way.
    ///
    /// Containers created only to complete the chain are undeclared and not
    /// emitted. A `declaration` (from a package-info file or package docs)
    /// supplies modifiers and docs: the first one is adopted, later ones must
    /// be equivalent to it.
    pub fn find_or_create_package(
        &mut self,
        name: &str,
        declaration: Option<ItemDetails>,
    ) -> Result<PackageId> {
        if let Some(id) = self.codebase.find_package(name) {
            if let Some(declaration) = declaration {
                self.declare_package(id, declaration)?;
            }
            return Ok(id);
        }

        let parent = match containing_package_name(name) {
            Some(parent) => Some(self.find_or_create_package(parent, None)?),
            None => None,
        };

        let declared = declaration.is_some();
        let details = declaration.unwrap_or_else(ItemDetails::public);
        require_public(name, &details.modifiers)?;

        let data = self.data(details);
        let id = self
            .codebase
            .alloc_package(PackageItem::new(data, SmolStr::from(name), false, declared));
        let _ = self.codebase.packages[id.index()].containing_package.set(parent);
        debug!(package = name, declared, "created package");
        Ok(id)
    }

    fn declare_package(&mut self, id: PackageId, declaration: ItemDetails) -> Result<()> {
        let package = &mut self.codebase.packages[id.index()];
        if package.declared {
            if !package.data.modifiers.equivalent_to(&declaration.modifiers) {
                return Err(ModelError::ConflictingPackageModifiers {
                    name: package.qualified_name.to_string(),
                    existing: package.data.modifiers.to_string(),
                    declared: declaration.modifiers.to_string(),
                });
            }
            if package.data.documentation.is_empty() {
                package.data.documentation = declaration.documentation;
            }
            return Ok(());
        }

        require_public(&package.qualified_name, &declaration.modifiers)?;
        trace!(package = %package.qualified_name, "adopted package declaration");
        package.data.location = declaration.location;
        package.data.modifiers = declaration.modifiers;
        package.data.documentation = declaration.documentation;
        package.declared = true;
        Ok(())
    }

    // ========================================================================
    // CLASSES
    // ========================================================================

    /// Create a class inside a package or another class and register it.
    ///
    /// Fails without changing the codebase when the qualified name is
    /// already taken.
    pub fn create_class_item(
        &mut self,
        container: ClassContainer,
        simple_name: &str,
        kind: ClassKind,
        origin: ClassOrigin,
        details: ItemDetails,
    ) -> Result<ClassId> {
        let (package, full_name) = match container {
            ClassContainer::Package(package) => (package, SmolStr::from(simple_name)),
            ClassContainer::Class(outer) => {
                let outer = self.codebase.class(outer);
                (outer.package(), SmolStr::from(format!("{}.{simple_name}", outer.full_name())))
            }
        };
        let package_name = self.codebase.package(package).qualified_name();
        let qualified_name = if package_name.is_empty() {
            full_name.clone()
        } else {
            SmolStr::from(format!("{package_name}.{full_name}"))
        };

        let data = self.data(details);
        let item = ClassItem::new(
            data,
            qualified_name,
            SmolStr::from(simple_name),
            full_name,
            kind,
            origin,
            container,
            package,
        );
        let id = self.codebase.alloc_class(item);
        if let Err(err) = self.codebase.register_class(id) {
            self.codebase.classes.pop();
            return Err(err);
        }

        match container {
            ClassContainer::Package(package) => {
                self.codebase.packages[package.index()].top_level_classes.push(id)
            }
            ClassContainer::Class(outer) => self.codebase.class_mut(outer).nested_classes.push(id),
        }
        if origin.is_emittable() {
            let package = &mut self.codebase.packages[package.index()];
            if !package.emit {
                trace!(package = %package.qualified_name, "package emitted");
                package.emit = true;
            }
        }

        debug!(class = %self.codebase.class(id).qualified_name(), ?kind, ?origin, "created class");
        Ok(id)
    }

    // ========================================================================
    // TYPE PARAMETERS
    // ========================================================================

    /// Create a type parameter of a class or callable with pending bounds.
    pub fn create_type_parameter_item(
        &mut self,
        owner: ItemId,
        name: &str,
        is_reified: bool,
        details: ItemDetails,
    ) -> TypeParameterId {
        let data = self.data(details);
        let id = self
            .codebase
            .alloc_type_parameter(TypeParameterItem::new(data, SmolStr::from(name), owner, is_reified));
        match owner {
            ItemId::Class(class) => self.codebase.class_mut(class).type_parameters.push(id),
            ItemId::Callable(callable) => self.codebase.callable_mut(callable).type_parameters.push(id),
            other => warn!(?other, name, "type parameter owner cannot declare type parameters"),
        }
        id
    }

    /// Second construction phase of a type parameter.
    pub fn set_type_parameter_bounds(&mut self, id: TypeParameterId, bounds: Vec<TypeItem>) -> Result<()> {
        self.codebase.type_parameters[id.index()].set_bounds(bounds)
    }

    // ========================================================================
    // MEMBERS
    // ========================================================================

    /// Create a constructor and append it to `class`. Its return type is the
    /// class type, so class type parameters should exist first.
    pub fn create_constructor_item(
        &mut self,
        class: ClassId,
        details: ItemDetails,
        is_implicit: bool,
    ) -> CallableId {
        let name = SmolStr::from(self.codebase.class(class).simple_name());
        let return_type = self.codebase.class_type(class);
        let data = self.data(details);
        let id = self.codebase.alloc_callable(CallableItem::new(
            data,
            name,
            CallableKind::Constructor { is_implicit },
            class,
            return_type,
        ));
        self.codebase.class_mut(class).constructors.push(id);
        id
    }

    /// Create a method and append it to `class`.
    pub fn create_method_item(
        &mut self,
        class: ClassId,
        name: &str,
        return_type: TypeItem,
        details: ItemDetails,
    ) -> CallableId {
        let data = self.data(details);
        let id = self.codebase.alloc_callable(CallableItem::new(
            data,
            SmolStr::from(name),
            CallableKind::Method,
            class,
            return_type,
        ));
        self.codebase.class_mut(class).methods.push(id);
        id
    }

    /// Append a parameter to an existing callable; its index is the number
    /// of parameters created before it.
    pub fn create_parameter_item(
        &mut self,
        callable: CallableId,
        name: Option<&str>,
        ty: TypeItem,
        default_value: Rc<dyn DefaultValue>,
        details: ItemDetails,
    ) -> ParameterId {
        let index = self.codebase.callable(callable).parameters().len();
        let data = self.data(details);
        let id = self.codebase.alloc_parameter(ParameterItem::new(
            data,
            name.map(SmolStr::from),
            index,
            callable,
            ty,
            default_value,
        ));
        self.codebase.callable_mut(callable).parameters.push(id);
        id
    }

    /// Create a field or enum constant and append it to `class`.
    pub fn create_field_item(
        &mut self,
        class: ClassId,
        name: &str,
        ty: TypeItem,
        is_enum_constant: bool,
        value: Option<Rc<dyn FieldValue>>,
        details: ItemDetails,
    ) -> FieldId {
        let data = self.data(details);
        let id = self.codebase.alloc_field(FieldItem::new(
            data,
            SmolStr::from(name),
            class,
            ty,
            is_enum_constant,
            value,
        ));
        self.codebase.class_mut(class).fields.push(id);
        id
    }

    /// Create a property and append it to `class`.
    pub fn create_property_item(
        &mut self,
        class: ClassId,
        name: &str,
        ty: TypeItem,
        accessors: PropertyAccessors,
        details: ItemDetails,
    ) -> PropertyId {
        let data = self.data(details);
        let id = self.codebase.alloc_property(PropertyItem::new(
            data,
            SmolStr::from(name),
            class,
            ty,
            accessors,
        ));
        self.codebase.class_mut(class).properties.push(id);
        id
    }
}

fn require_public(name: &str, modifiers: &ModifierList) -> Result<()> {
    if modifiers.visibility == Visibility::Public {
        return Ok(());
    }
    Err(ModelError::NonPublicPackage {
        name: name.to_string(),
        visibility: modifiers.visibility.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodebaseConfig;

    #[test]
    fn test_package_chain_is_not_emitted() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let c = factory.find_or_create_package("a.b.c", None).unwrap();

        let a = codebase.find_package("a").unwrap();
        let b = codebase.find_package("a.b").unwrap();
        assert_eq!(codebase.containing_package(c), Some(b));
        assert_eq!(codebase.containing_package(b), Some(a));
        assert_eq!(codebase.containing_package(a), Some(codebase.root_package()));
        assert!(!codebase.package(a).emit());
        assert!(!codebase.package(c).emit());
    }

    #[test]
    fn test_non_public_package_rejected() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let declaration = ItemDetails::new(FileLocation::UNKNOWN, ModifierList::new(Visibility::Private));
        let err = codebase
            .factory()
            .find_or_create_package("a", Some(declaration))
            .unwrap_err();
        assert!(matches!(err, ModelError::NonPublicPackage { .. }));
        assert!(codebase.find_package("a").is_none());
    }

    #[test]
    fn test_emittable_class_flips_package_emit() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "FromPath",
                ClassKind::Class,
                ClassOrigin::SourcePath,
                ItemDetails::public(),
            )
            .unwrap();
        assert!(!factory.codebase().package(pkg).emit());

        factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "Api",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        assert!(factory.codebase().package(pkg).emit());
    }

    #[test]
    fn test_parameters_are_indexed_in_order() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let class = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "C",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let method = factory.create_method_item(
            class,
            "m",
            TypeItem::primitive(crate::model::PrimitiveKind::Void),
            ItemDetails::public(),
        );
        let no_default: Rc<dyn DefaultValue> = Rc::new(crate::value::NoDefaultValue);
        let first = factory.create_parameter_item(
            method,
            Some("a"),
            TypeItem::string(),
            no_default.clone(),
            ItemDetails::public(),
        );
        let second = factory.create_parameter_item(method, None, TypeItem::string(), no_default, ItemDetails::public());

        assert_eq!(codebase.parameter(first).index(), 0);
        assert_eq!(codebase.parameter(second).index(), 1);
        assert_eq!(codebase.parameter(second).name(), None);
        assert_eq!(codebase.callable(method).parameters(), &[first, second]);
    }
}
