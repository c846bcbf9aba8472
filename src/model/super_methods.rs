//! Super-method resolution.
//!
//! A method's super methods are the ancestor methods it overrides: at most
//! one from the superclass chain plus one per branch of the implemented
//! interfaces. Two methods match structurally when they share a name and
//! their parameter types agree after the ancestor's type variables are
//! mapped into the subclass and both sides are erased. Return types, throws
//! lists and parameter names play no part.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::codebase::Codebase;
use super::ids::{CallableId, ClassId};
use super::types::erased_type_string;

impl Codebase {
    /// The methods `method` overrides: the superclass match first, then
    /// interface matches in declared-interface order, without duplicates.
    ///
    /// Computed on first call and cached on the method; later changes to the
    /// hierarchy are not observed.
    pub fn super_methods(&self, method: CallableId) -> &[CallableId] {
        self.callable(method)
            .super_methods
            .get_or_init(|| self.compute_super_methods(method))
    }

    fn compute_super_methods(&self, method: CallableId) -> Vec<CallableId> {
        let callable = self.callable(method);
        if callable.is_constructor() {
            return Vec::new();
        }
        let class = callable.containing_class();
        let signature = self.erased_parameter_types(method);
        let mut found = IndexSet::new();

        // The superclass chain stops at the first structural match, even one
        // that cannot be overridden.
        for ancestor in self.all_super_classes(class) {
            if let Some(candidate) = self.find_structural_match(class, ancestor, method, &signature) {
                if self.callable(candidate).is_overrideable() && !self.is_excluded_super_method(method, candidate) {
                    found.insert(candidate);
                }
                break;
            }
        }

        let mut visited = FxHashSet::default();
        for interface in self.direct_interfaces(class) {
            self.collect_interface_super_methods(class, interface, method, &signature, &mut visited, &mut found);
        }

        trace!(
            method = %callable.name(),
            class = %self.class(class).qualified_name(),
            count = found.len(),
            "computed super methods"
        );
        found.into_iter().collect()
    }

    fn collect_interface_super_methods(
        &self,
        class: ClassId,
        interface: ClassId,
        method: CallableId,
        signature: &[String],
        visited: &mut FxHashSet<ClassId>,
        found: &mut IndexSet<CallableId>,
    ) {
        if !visited.insert(interface) {
            return;
        }
        match self.find_structural_match(class, interface, method, signature) {
            Some(candidate) => {
                if self.callable(candidate).is_overrideable() && !self.is_excluded_super_method(method, candidate) {
                    found.insert(candidate);
                }
            }
            None => {
                for parent in self.direct_interfaces(interface) {
                    self.collect_interface_super_methods(class, parent, method, signature, visited, found);
                }
            }
        }
    }

    /// A method declared in `ancestor` whose parameters, seen from `class`,
    /// erase to `signature`.
    fn find_structural_match(
        &self,
        class: ClassId,
        ancestor: ClassId,
        method: CallableId,
        signature: &[String],
    ) -> Option<CallableId> {
        let name = self.callable(method).name();
        let bindings = self.map_type_variables(class, ancestor);
        self.class(ancestor).methods().iter().copied().find(|&candidate| {
            let candidate_item = self.callable(candidate);
            candidate != method
                && candidate_item.name() == name
                && candidate_item.parameters().len() == signature.len()
                && candidate_item.parameters().iter().zip(signature).all(|(&param, expected)| {
                    let ty = self.parameter(param).ty().substitute(&bindings);
                    erased_type_string(self, &ty) == *expected
                })
        })
    }

    fn is_excluded_super_method(&self, method: CallableId, candidate: CallableId) -> bool {
        self.config()
            .super_method_filter
            .as_ref()
            .is_some_and(|filter| filter(self, method, candidate))
    }
}
