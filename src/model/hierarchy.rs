//! Class hierarchy queries: superclasses, interface closures and type
//! variable mapping across the supertype graph.

use std::collections::VecDeque;

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::codebase::Codebase;
use super::ids::ClassId;
use super::types::{TypeItem, TypeVariableMap};

impl Codebase {
    /// The type of `class` as used inside its own body: the class applied to
    /// its own type parameters.
    pub fn class_type(&self, class: ClassId) -> TypeItem {
        let item = self.class(class);
        let arguments = item
            .type_parameters()
            .iter()
            .map(|&id| self.type_parameter(id).as_type(id))
            .collect();
        TypeItem::generic(item.qualified_name(), arguments)
    }

    /// The superclass, if its type names a class in this codebase. Cached
    /// until [`ClassItem::set_super_class_type`](super::ClassItem::set_super_class_type).
    pub fn super_class(&self, class: ClassId) -> Option<ClassId> {
        let item = self.class(class);
        *item.super_class.get_or_init(|| {
            item.super_class_type()
                .and_then(TypeItem::class_name)
                .and_then(|name| self.find_class(name))
        })
    }

    /// Directly implemented (or, for interfaces, extended) interfaces that
    /// resolve to classes in this codebase, in declaration order.
    pub fn direct_interfaces(&self, class: ClassId) -> Vec<ClassId> {
        self.class(class)
            .interface_types()
            .iter()
            .filter_map(TypeItem::class_name)
            .filter_map(|name| self.find_class(name))
            .collect()
    }

    /// Superclasses from the direct one up to the root.
    pub fn all_super_classes(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        seen.insert(class);
        let mut result = Vec::new();
        let mut current = self.super_class(class);
        while let Some(ancestor) = current {
            if !seen.insert(ancestor) {
                break;
            }
            result.push(ancestor);
            current = self.super_class(ancestor);
        }
        result
    }

    /// Every interface `class` implements, directly or through its
    /// superclasses and super-interfaces, without duplicates.
    ///
    /// The class's own interfaces come first, breadth first, followed by
    /// those contributed by each superclass in turn.
    pub fn all_interfaces(&self, class: ClassId) -> &[ClassId] {
        self.class(class).all_interfaces.get_or_init(|| {
            let mut result = IndexSet::new();
            let chain = std::iter::once(class).chain(self.all_super_classes(class));
            for current in chain {
                let mut queue: VecDeque<ClassId> = self.direct_interfaces(current).into();
                while let Some(interface) = queue.pop_front() {
                    if interface != class && result.insert(interface) {
                        queue.extend(self.direct_interfaces(interface));
                    }
                }
            }
            result.into_iter().collect()
        })
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn is_subtype_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        class == ancestor
            || self.all_super_classes(class).contains(&ancestor)
            || self.all_interfaces(class).contains(&ancestor)
    }

    /// Bindings of `source`'s type parameters as seen from `target`, found by
    /// following supertype references from `target` up to `source`.
    ///
    /// For `class B extends A<String>` and `class A<T>`, mapping `B` to `A`
    /// binds `T` to `String`. Raw supertypes bind nothing, and an unrelated
    /// `source` gives an empty map.
    pub fn map_type_variables(&self, target: ClassId, source: ClassId) -> TypeVariableMap {
        if target == source {
            return TypeVariableMap::default();
        }
        let mut visited = FxHashSet::default();
        self.map_type_variables_from(target, &TypeVariableMap::default(), source, &mut visited)
            .unwrap_or_default()
    }

    fn map_type_variables_from(
        &self,
        class: ClassId,
        bindings: &TypeVariableMap,
        source: ClassId,
        visited: &mut FxHashSet<ClassId>,
    ) -> Option<TypeVariableMap> {
        if !visited.insert(class) {
            return None;
        }
        let item = self.class(class);
        for super_type in item.super_class_type().into_iter().chain(item.interface_types()) {
            let TypeItem::Class(super_type) = super_type.substitute(bindings) else {
                continue;
            };
            let Some(super_class) = self.find_class(&super_type.qualified_name) else {
                continue;
            };
            let super_bindings: TypeVariableMap = self
                .class(super_class)
                .type_parameters()
                .iter()
                .copied()
                .zip(super_type.arguments)
                .collect();
            if super_class == source {
                return Some(super_bindings);
            }
            if let Some(found) = self.map_type_variables_from(super_class, &super_bindings, source, visited) {
                return Some(found);
            }
        }
        None
    }
}
