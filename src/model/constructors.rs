//! Default constructor synthesis.

use tracing::debug;

use super::callable::{CallableItem, CallableKind};
use super::codebase::Codebase;
use super::documentation::Documentation;
use super::ids::{CallableId, ClassId};
use super::item::ItemData;
use super::modifiers::ModifierList;
use super::selectors::ApiVariantSelectors;

impl Codebase {
    /// Give `class` the constructor the compiler would if it declares none.
    ///
    /// The constructor has the class's visibility, no parameters and no
    /// throws list, and reuses the class location since it has no source of
    /// its own. Interfaces and classes that already have a constructor are
    /// left alone. Loaders that read an implicit constructor from source
    /// create it themselves with `is_implicit` set; a synthesized one is
    /// never implicit.
    pub fn add_default_constructor_if_missing(&mut self, class: ClassId) -> Option<CallableId> {
        let item = self.class(class);
        if item.is_interface() || !item.constructors().is_empty() {
            return None;
        }

        let data = ItemData::new(
            item.data.location,
            ModifierList::new(item.data.modifiers.visibility),
            Documentation::none(),
            item.data.language,
            ApiVariantSelectors::new(),
        );
        let constructor = CallableItem::new(
            data,
            item.simple_name.clone(),
            CallableKind::Constructor { is_implicit: false },
            class,
            self.class_type(class),
        );
        let id = self.alloc_callable(constructor);
        self.class_mut(class).constructors.push(id);
        debug!(class = %self.class(class).qualified_name(), "synthesized default constructor");
        Some(id)
    }
}
