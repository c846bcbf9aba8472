//! Name index for packages.
//!
//! The tracker only maps names to ids. Creating packages, including the
//! chain of containers implied by a dotted name, goes through
//! [`ItemFactory::find_or_create_package`](super::ItemFactory::find_or_create_package)
//! so that every package is built with the factory's defaults.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::PackageId;

#[derive(Debug, Default)]
pub struct PackageTracker {
    by_name: FxHashMap<SmolStr, PackageId>,
}

impl PackageTracker {
    pub fn get(&self, name: &str) -> Option<PackageId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Names are case-sensitive; the first id tracked for a name is kept.
    pub(crate) fn insert(&mut self, name: SmolStr, id: PackageId) {
        self.by_name.entry(name).or_insert(id);
    }
}
