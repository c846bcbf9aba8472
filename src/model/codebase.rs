//! The codebase: owner of every item of one analyzed API surface.
//!
//! # Architecture
//!
//! Items are stored in one arena per kind and referenced by typed ids (see
//! [`ids`](super::ids)). Name-keyed tables index the arenas:
//!
//! - classes by qualified name, in registration order
//! - packages by qualified name (via the package tracker)
//!
//! The codebase is populated by loaders through an
//! [`ItemFactory`](super::ItemFactory) and is read-mostly afterwards. Lazy
//! caches (super methods, interface closures, variant flags) live on the
//! items and are filled on first query; nothing here is thread-safe.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::FileLocation;
use crate::config::CodebaseConfig;
use crate::error::{ModelError, Result};
use crate::value::Value;

use super::annotation::{JAVA_RETENTION, KOTLIN_RETENTION};
use super::callable::CallableItem;
use super::class::{ClassItem, RetentionPolicy};
use super::documentation::Documentation;
use super::factory::ItemFactory;
use super::field::FieldItem;
use super::ids::{
    CallableId, ClassId, FieldId, ItemId, PackageId, ParameterId, PropertyId, TypeParameterId,
};
use super::item::{ItemData, Language};
use super::modifiers::ModifierList;
use super::package::{PackageItem, containing_package_name};
use super::packages::PackageTracker;
use super::parameter::ParameterItem;
use super::property::PropertyItem;
use super::selectors::ApiVariantSelectors;
use super::sources::SourceRoot;
use super::type_parameter::TypeParameterItem;

/// Materializes classes the codebase does not contain yet, for example by
/// reading them from a class path on demand.
pub trait ClassAssembler {
    /// Create the class named `qualified_name` through `factory`, returning
    /// `Ok(None)` when the underlying model does not know it either.
    fn assemble(&mut self, factory: &mut ItemFactory<'_>, qualified_name: &str)
    -> Result<Option<ClassId>>;
}

pub struct Codebase {
    config: CodebaseConfig,
    sources: SourceRoot,
    pub(crate) packages: Vec<PackageItem>,
    pub(crate) classes: Vec<ClassItem>,
    pub(crate) callables: Vec<CallableItem>,
    pub(crate) fields: Vec<FieldItem>,
    pub(crate) properties: Vec<PropertyItem>,
    pub(crate) parameters: Vec<ParameterItem>,
    pub(crate) type_parameters: Vec<TypeParameterItem>,
    pub(crate) package_tracker: PackageTracker,
    classes_by_name: IndexMap<SmolStr, ClassId>,
    assembler: Option<Box<dyn ClassAssembler>>,
}

impl Codebase {
    /// Create an empty codebase holding only the root package.
    pub fn new(config: CodebaseConfig) -> Self {
        let language = config.default_language;
        let mut codebase = Self {
            config,
            sources: SourceRoot::new(),
            packages: Vec::new(),
            classes: Vec::new(),
            callables: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            package_tracker: PackageTracker::default(),
            classes_by_name: IndexMap::new(),
            assembler: None,
        };
        let root = ItemData::new(
            FileLocation::UNKNOWN,
            ModifierList::public(),
            Documentation::none(),
            language,
            ApiVariantSelectors::new(),
        );
        let root = codebase.alloc_package(PackageItem::new(root, SmolStr::default(), false, false));
        let _ = codebase.packages[root.index()].containing_package.set(None);
        codebase
    }

    pub fn config(&self) -> &CodebaseConfig {
        &self.config
    }

    pub fn sources(&self) -> &SourceRoot {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceRoot {
        &mut self.sources
    }

    /// Start building items into this codebase.
    pub fn factory(&mut self) -> ItemFactory<'_> {
        ItemFactory::new(self)
    }

    pub fn set_assembler(&mut self, assembler: Box<dyn ClassAssembler>) {
        self.assembler = Some(assembler);
    }

    // ========================================================================
    // ARENA ACCESS
    // ========================================================================

    pub fn package(&self, id: PackageId) -> &PackageItem {
        &self.packages[id.index()]
    }

    pub fn class(&self, id: ClassId) -> &ClassItem {
        &self.classes[id.index()]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassItem {
        &mut self.classes[id.index()]
    }

    pub fn callable(&self, id: CallableId) -> &CallableItem {
        &self.callables[id.index()]
    }

    pub fn callable_mut(&mut self, id: CallableId) -> &mut CallableItem {
        &mut self.callables[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldItem {
        &self.fields[id.index()]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FieldItem {
        &mut self.fields[id.index()]
    }

    pub fn property(&self, id: PropertyId) -> &PropertyItem {
        &self.properties[id.index()]
    }

    pub fn property_mut(&mut self, id: PropertyId) -> &mut PropertyItem {
        &mut self.properties[id.index()]
    }

    pub fn parameter(&self, id: ParameterId) -> &ParameterItem {
        &self.parameters[id.index()]
    }

    pub fn parameter_mut(&mut self, id: ParameterId) -> &mut ParameterItem {
        &mut self.parameters[id.index()]
    }

    pub fn type_parameter(&self, id: TypeParameterId) -> &TypeParameterItem {
        &self.type_parameters[id.index()]
    }

    /// The data shared by every kind of item.
    pub fn item_data(&self, id: ItemId) -> &ItemData {
        match id {
            ItemId::Package(id) => &self.package(id).data,
            ItemId::Class(id) => &self.class(id).data,
            ItemId::Callable(id) => &self.callable(id).data,
            ItemId::Field(id) => &self.field(id).data,
            ItemId::Property(id) => &self.property(id).data,
            ItemId::Parameter(id) => &self.parameter(id).data,
            ItemId::TypeParameter(id) => &self.type_parameter(id).data,
        }
    }

    pub(crate) fn item_data_mut(&mut self, id: ItemId) -> &mut ItemData {
        match id {
            ItemId::Package(id) => &mut self.packages[id.index()].data,
            ItemId::Class(id) => &mut self.classes[id.index()].data,
            ItemId::Callable(id) => &mut self.callables[id.index()].data,
            ItemId::Field(id) => &mut self.fields[id.index()].data,
            ItemId::Property(id) => &mut self.properties[id.index()].data,
            ItemId::Parameter(id) => &mut self.parameters[id.index()].data,
            ItemId::TypeParameter(id) => &mut self.type_parameters[id.index()].data,
        }
    }

    pub fn language(&self, id: ItemId) -> Language {
        self.item_data(id).language
    }

    /// The item directly containing `id`: the enclosing class or package of a
    /// class, the class of a member, the callable of a parameter, the owner
    /// of a type parameter. Packages have no parent item.
    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        match id {
            ItemId::Package(_) => None,
            ItemId::Class(id) => Some(match self.class(id).container() {
                super::ClassContainer::Package(p) => ItemId::Package(p),
                super::ClassContainer::Class(c) => ItemId::Class(c),
            }),
            ItemId::Callable(id) => Some(self.callable(id).containing_class.into()),
            ItemId::Field(id) => Some(self.field(id).containing_class.into()),
            ItemId::Property(id) => Some(self.property(id).containing_class.into()),
            ItemId::Parameter(id) => Some(self.parameter(id).containing_callable.into()),
            ItemId::TypeParameter(id) => Some(self.type_parameter(id).owner),
        }
    }

    /// Items directly contained in `id`, in declaration order.
    pub fn children(&self, id: ItemId) -> Vec<ItemId> {
        match id {
            ItemId::Package(id) => self.package(id).top_level_classes().iter().map(|&c| c.into()).collect(),
            ItemId::Class(id) => {
                let class = self.class(id);
                let type_parameters = class.type_parameters().iter().map(|&t| ItemId::from(t));
                let constructors = class.constructors().iter().map(|&c| ItemId::from(c));
                let methods = class.methods().iter().map(|&m| ItemId::from(m));
                let fields = class.fields().iter().map(|&f| ItemId::from(f));
                let properties = class.properties().iter().map(|&p| ItemId::from(p));
                let nested = class.nested_classes().iter().map(|&c| ItemId::from(c));
                type_parameters
                    .chain(constructors)
                    .chain(methods)
                    .chain(fields)
                    .chain(properties)
                    .chain(nested)
                    .collect()
            }
            ItemId::Callable(id) => {
                let callable = self.callable(id);
                let type_parameters = callable.type_parameters().iter().map(|&t| ItemId::from(t));
                let parameters = callable.parameters().iter().map(|&p| ItemId::from(p));
                type_parameters.chain(parameters).collect()
            }
            ItemId::Field(_) | ItemId::Property(_) | ItemId::Parameter(_) | ItemId::TypeParameter(_) => {
                Vec::new()
            }
        }
    }

    /// The nearest class enclosing `id` (not `id` itself).
    pub fn containing_class(&self, id: ItemId) -> Option<ClassId> {
        let mut current = self.parent(id)?;
        loop {
            match current {
                ItemId::Class(class) => return Some(class),
                ItemId::Package(_) => return None,
                other => current = self.parent(other)?,
            }
        }
    }

    pub(crate) fn alloc_package(&mut self, item: PackageItem) -> PackageId {
        let id = PackageId::from_index(self.packages.len());
        self.package_tracker.insert(item.qualified_name.clone(), id);
        self.packages.push(item);
        id
    }

    pub(crate) fn alloc_class(&mut self, item: ClassItem) -> ClassId {
        let id = ClassId::from_index(self.classes.len());
        self.classes.push(item);
        id
    }

    pub(crate) fn alloc_callable(&mut self, item: CallableItem) -> CallableId {
        let id = CallableId::from_index(self.callables.len());
        self.callables.push(item);
        id
    }

    pub(crate) fn alloc_field(&mut self, item: FieldItem) -> FieldId {
        let id = FieldId::from_index(self.fields.len());
        self.fields.push(item);
        id
    }

    pub(crate) fn alloc_property(&mut self, item: PropertyItem) -> PropertyId {
        let id = PropertyId::from_index(self.properties.len());
        self.properties.push(item);
        id
    }

    pub(crate) fn alloc_parameter(&mut self, item: ParameterItem) -> ParameterId {
        let id = ParameterId::from_index(self.parameters.len());
        self.parameters.push(item);
        id
    }

    pub(crate) fn alloc_type_parameter(&mut self, item: TypeParameterItem) -> TypeParameterId {
        let id = TypeParameterId::from_index(self.type_parameters.len());
        self.type_parameters.push(item);
        id
    }

    // ========================================================================
    // LOOKUP & REGISTRATION
    // ========================================================================

    pub fn root_package(&self) -> PackageId {
        PackageId(0)
    }

    pub fn find_package(&self, name: &str) -> Option<PackageId> {
        self.package_tracker.get(name)
    }

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.classes_by_name.get(name).copied()
    }

    /// Look a class up locally, falling back to the assembler.
    ///
    /// Returns `Ok(None)` when neither knows the class; assembler failures are
    /// propagated.
    pub fn resolve_class(&mut self, name: &str) -> Result<Option<ClassId>> {
        if let Some(id) = self.find_class(name) {
            return Ok(Some(id));
        }
        let Some(mut assembler) = self.assembler.take() else {
            return Ok(None);
        };
        debug!(class = name, "delegating class lookup to assembler");
        let assembled = {
            let mut factory = ItemFactory::new(self);
            assembler.assemble(&mut factory, name)
        };
        self.assembler = Some(assembler);
        let assembled = assembled?;
        if assembled.is_none() {
            trace!(class = name, "class not found by assembler");
        }
        Ok(assembled)
    }

    /// Add a class to the qualified-name table.
    ///
    /// Fails if another class already holds the name; the existing entry is
    /// never replaced.
    pub fn register_class(&mut self, id: ClassId) -> Result<()> {
        let class = self.class(id);
        if let Some(&existing) = self.classes_by_name.get(class.qualified_name()) {
            return Err(ModelError::DuplicateClass {
                name: class.qualified_name().to_string(),
                existing: self.sources.display(&self.class(existing).data.location),
                duplicate: self.sources.display(&class.data.location),
            });
        }
        let name = class.qualified_name.clone();
        trace!(class = %name, "registered class");
        self.classes_by_name.insert(name, id);
        Ok(())
    }

    /// All packages, sorted by qualified name (the root package first).
    pub fn packages(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = (0..self.packages.len()).map(PackageId::from_index).collect();
        ids.sort_by(|a, b| self.package(*a).qualified_name.cmp(&self.package(*b).qualified_name));
        ids
    }

    /// All registered classes in registration order, nested ones included.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes_by_name.values().copied()
    }

    pub fn class_count(&self) -> usize {
        self.classes_by_name.len()
    }

    /// Top-level classes that did not come from the class path.
    pub fn top_level_classes_from_source(&self) -> Vec<ClassId> {
        self.classes()
            .filter(|&id| {
                let class = self.class(id);
                class.is_top_level() && class.origin() != super::ClassOrigin::ClassPath
            })
            .collect()
    }

    /// The package containing `id`, resolved from the dotted name on first
    /// access and cached.
    pub fn containing_package(&self, id: PackageId) -> Option<PackageId> {
        *self.package(id).containing_package.get_or_init(|| {
            containing_package_name(self.package(id).qualified_name())
                .and_then(|name| self.find_package(name))
        })
    }

    // ========================================================================
    // ANNOTATION TYPES
    // ========================================================================

    /// Retention of an annotation type, from its `@Retention` annotation or
    /// the language default (CLASS for Java, RUNTIME for Kotlin).
    pub fn retention(&self, id: ClassId) -> Result<RetentionPolicy> {
        let class = self.class(id);
        if !class.is_annotation_type() {
            return Err(ModelError::NotAnAnnotation {
                class: class.qualified_name().to_string(),
            });
        }
        Ok(*class.retention.get_or_init(|| {
            let modifiers = &class.data.modifiers;
            let declared = modifiers
                .find_annotation(JAVA_RETENTION)
                .or_else(|| modifiers.find_annotation(KOTLIN_RETENTION))
                .and_then(|a| a.find_attribute("value"))
                .and_then(|attribute| match &attribute.value {
                    Value::Enum { constant, .. } => RetentionPolicy::from_constant(constant),
                    _ => None,
                });
            declared.unwrap_or(match class.data.language {
                Language::Java => RetentionPolicy::Class,
                Language::Kotlin => RetentionPolicy::Runtime,
            })
        }))
    }
}

impl fmt::Debug for Codebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codebase")
            .field("description", &self.config.description)
            .field("packages", &self.packages.len())
            .field("classes", &self.classes_by_name.len())
            .field("has_assembler", &self.assembler.is_some())
            .finish()
    }
}
