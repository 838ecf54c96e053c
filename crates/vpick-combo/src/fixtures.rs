#![forbid(unsafe_code)]

//! Deterministic demo data.
//!
//! A fixed city list large enough to make virtualization meaningful. No
//! randomness and no clock: the same call always yields the same 1000
//! items, which keeps snapshot-style assertions stable.

use crate::item::Item;

const BASES: [&str; 25] = [
    "Spring", "Shelby", "Oak", "River", "Lake", "Cedar", "Maple", "Pine", "Iron", "Stone",
    "Ash", "Birch", "Clay", "Elm", "Fern", "Gold", "Hazel", "Ivy", "Juniper", "Kings",
    "Laurel", "Mill", "North", "Quarry", "Willow",
];

const SUFFIXES: [&str; 8] = [
    "field", "ville", "ton", " Falls", " Heights", " Harbor", " Ridge", "port",
];

const REGIONS: [&str; 5] = ["", " East", " West", " Springs", " Junction"];

/// Number of items produced by [`city_items`].
pub const CITY_COUNT: usize = BASES.len() * SUFFIXES.len() * REGIONS.len();

/// Deterministic list of `CITY_COUNT` unique cities, ids `0..CITY_COUNT`.
#[must_use]
pub fn city_items() -> Vec<Item> {
    let mut items = Vec::with_capacity(CITY_COUNT);
    let mut id = 0u64;
    for region in REGIONS {
        for base in BASES {
            for suffix in SUFFIXES {
                items.push(Item::new(id, format!("{base}{suffix}{region}")));
                id += 1;
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn produces_exactly_city_count_items() {
        assert_eq!(city_items().len(), CITY_COUNT);
        assert_eq!(CITY_COUNT, 1000);
    }

    #[test]
    fn names_and_ids_are_unique() {
        let items = city_items();
        let names: HashSet<&str> = items.iter().map(|i| i.name.as_str()).collect();
        let ids: HashSet<u64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(names.len(), items.len());
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(city_items(), city_items());
    }
}
