//! Sets derived from the catalog and the tag set.
//!
//! Nothing here is cached. Both functions recompute from their inputs on each
//! call, so the accessible set and the tag list can never drift from the
//! catalog or the tags.

use std::collections::BTreeSet;

use formkit_model::{Catalog, SelectOption};
use serde::Serialize;

/// Catalog entries that are not tagged, in catalog order.
pub fn derive_accessible<'a>(
    catalog: &'a Catalog,
    tagged: &BTreeSet<String>,
) -> Vec<&'a SelectOption> {
    catalog
        .iter()
        .filter(|option| !tagged.contains(&option.value))
        .collect()
}

/// A tagged option as shown in the tag strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub title: String,
    pub value: String,
    pub chip: String,
    pub active: bool,
}

impl From<&SelectOption> for TagChip {
    fn from(option: &SelectOption) -> Self {
        Self {
            title: option.title.clone(),
            value: option.value.clone(),
            chip: option.chip_label().to_string(),
            active: option.active,
        }
    }
}

/// Tagged catalog entries in catalog order, one chip per value.
///
/// When a value occurs more than once, the entry the catalog resolves it to
/// is used.
pub fn tagged_chips(catalog: &Catalog, tagged: &BTreeSet<String>) -> Vec<TagChip> {
    catalog
        .iter()
        .enumerate()
        .filter(|(position, option)| {
            tagged.contains(&option.value) && catalog.position(&option.value) == Some(*position)
        })
        .map(|(_, option)| TagChip::from(option))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            SelectOption::new("Red", "r", "R"),
            SelectOption::new("Blue", "b", "B"),
            SelectOption::new("Green", "g", "").inactive(),
        ])
        .unwrap()
    }

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn accessible_excludes_tagged() {
        let catalog = catalog();
        let accessible = derive_accessible(&catalog, &tags(&["r"]));
        let titles: Vec<&str> = accessible.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Blue", "Green"]);
    }

    #[test]
    fn chips_follow_catalog_order() {
        let catalog = catalog();
        let chips = tagged_chips(&catalog, &tags(&["g", "r"]));
        let values: Vec<&str> = chips.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["r", "g"]);
        assert_eq!(chips[1].chip, "Green");
        assert!(!chips[1].active);
    }

    #[test]
    fn duplicate_values_yield_one_chip() {
        let catalog = Catalog::new(vec![
            SelectOption::new("Red", "r", "R"),
            SelectOption::new("Crimson", "r", "C"),
        ])
        .unwrap();
        let chips = tagged_chips(&catalog, &tags(&["r"]));
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].title, "Crimson");
        assert!(derive_accessible(&catalog, &tags(&["r"])).is_empty());
    }
}
