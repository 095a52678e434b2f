//! Built-in exercise catalog references.
//!
//! The full catalog subsystem (search, photo import, GIF rendering)
//! lives outside this crate; the domain model only ever holds opaque
//! `CatalogRef` entries. This module carries a small built-in set so a
//! fresh install has entries to reference.

use crate::types::CatalogRef;
use once_cell::sync::Lazy;

/// Cached built-in catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Vec<CatalogRef>> = Lazy::new(build_default_catalog);

/// The built-in catalog entries
pub fn default_catalog() -> &'static [CatalogRef] {
    &DEFAULT_CATALOG
}

/// Look up a built-in catalog entry by id
pub fn find_catalog_ref(id: &str) -> Option<&'static CatalogRef> {
    DEFAULT_CATALOG.iter().find(|entry| entry.id == id)
}

fn build_default_catalog() -> Vec<CatalogRef> {
    [
        ("back_squat", "Back Squat"),
        ("front_squat", "Front Squat"),
        ("deadlift", "Deadlift"),
        ("romanian_deadlift", "Romanian Deadlift"),
        ("bench_press", "Bench Press"),
        ("overhead_press", "Overhead Press"),
        ("barbell_row", "Barbell Row"),
        ("pull_up", "Pull-up"),
        ("dip", "Dip"),
        ("kettlebell_swing", "Kettlebell Swing"),
        ("walking_lunge", "Walking Lunge"),
        ("plank", "Plank"),
    ]
    .iter()
    .map(|(id, name)| CatalogRef::new(*id, *name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_entry() {
        let entry = find_catalog_ref("back_squat").unwrap();
        assert_eq!(entry.name, "Back Squat");
    }

    #[test]
    fn test_unknown_entry_is_none() {
        assert!(find_catalog_ref("underwater_basket_weaving").is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
