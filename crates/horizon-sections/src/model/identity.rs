//! Stable per-item identities that survive duplicate entries.
//!
//! A section may list the same logical entity more than once (a song queued
//! twice, say). Views that animate changes need every row to have a distinct
//! id, so the raw id of the entity cannot be used directly. [`IdMap`] walks a
//! sequence once, counts how often each base id has already been seen, and
//! combines the base id with that occurrence count.
//!
//! ```
//! use horizon_sections::model::{IdMap, IdScheme};
//!
//! let songs = [7_u64, 9, 7, 7];
//! let ids = IdMap::build(&songs, |&song| song, IdScheme::Mixed);
//!
//! assert_ne!(ids.get(0), ids.get(2));
//! assert_ne!(ids.get(2), ids.get(3));
//! ```

use std::collections::HashMap;

use horizon_sections_core::PerfSpan;
use horizon_sections_core::logging::targets;

/// An item id that is unique within one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(u64);

impl StableId {
    /// Creates a stable id from a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// How a base id and its occurrence count are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdScheme {
    /// Mixes `base ^ occurrence * φ` through the splitmix64 finalizer.
    ///
    /// Both steps are bijections, so for a fixed base every occurrence maps
    /// to a different id.
    #[default]
    Mixed,
    /// `base * 7^occurrence` with wrapping arithmetic.
    ///
    /// Distinct for small odd bases, but even bases and zero can collide.
    PowerOfSeven,
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl IdScheme {
    /// Combines a base id with the number of times it was already seen.
    pub fn combine(self, base: u64, occurrence: u32) -> StableId {
        match self {
            Self::Mixed => {
                StableId(splitmix64(base ^ u64::from(occurrence).wrapping_mul(GOLDEN_GAMMA)))
            }
            Self::PowerOfSeven => StableId(base.wrapping_mul(7_u64.wrapping_pow(occurrence))),
        }
    }
}

/// Per-position stable ids for one section's backing sequence.
///
/// The map is a pure function of the sequence contents and order: rebuilding
/// it from the same sequence always yields the same ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    ids: Vec<StableId>,
    scheme: IdScheme,
}

impl IdMap {
    /// Creates an empty map using the given scheme.
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            ids: Vec::new(),
            scheme,
        }
    }

    /// Builds a map for `items` in one pass.
    pub fn build<T>(items: &[T], base_id: impl Fn(&T) -> u64, scheme: IdScheme) -> Self {
        let mut map = Self::new(scheme);
        map.rebuild(items, base_id);
        map
    }

    /// Recomputes every id from scratch.
    ///
    /// Call this whenever the backing sequence is replaced wholesale.
    pub fn rebuild<T>(&mut self, items: &[T], base_id: impl Fn(&T) -> u64) {
        let _span = PerfSpan::new("id_map_rebuild");

        let mut occurrences: HashMap<u64, u32> = HashMap::with_capacity(items.len());
        self.ids.clear();
        self.ids.reserve(items.len());

        for item in items {
            let base = base_id(item);
            let seen = occurrences.entry(base).or_insert(0);
            self.ids.push(self.scheme.combine(base, *seen));
            *seen += 1;
        }

        tracing::trace!(
            target: targets::IDENTITY,
            items = self.ids.len(),
            distinct = occurrences.len(),
            "rebuilt id map"
        );
    }

    /// Returns the id at `index`.
    pub fn get(&self, index: usize) -> Option<StableId> {
        self.ids.get(index).copied()
    }

    /// Swaps the ids at two positions, following an item swap in the sequence.
    ///
    /// Out-of-range positions are ignored.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.ids.len() && b < self.ids.len() {
            self.ids.swap(a, b);
        }
    }

    /// Moves the id at `from` to `to`, shifting the ids in between.
    ///
    /// Out-of-range positions are ignored.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from >= self.ids.len() || to >= self.ids.len() || from == to {
            return;
        }
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
    }

    /// Returns the scheme used to combine ids.
    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Returns the number of ids in the map.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the map holds no ids.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns all ids in sequence order.
    pub fn as_slice(&self) -> &[StableId] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_duplicates_get_distinct_ids() {
        let items = [42_u64, 42, 42];
        let map = IdMap::build(&items, |&id| id, IdScheme::Mixed);

        let unique: HashSet<_> = map.as_slice().iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let items = [5_u64, 1, 5, 3, 5];
        let mut map = IdMap::build(&items, |&id| id, IdScheme::Mixed);
        let first = map.clone();

        map.rebuild(&items, |&id| id);
        map.rebuild(&items, |&id| id);
        assert_eq!(map, first);
    }

    #[test]
    fn test_power_of_seven_matches_reference_formula() {
        let items = [3_u64, 3, 3];
        let map = IdMap::build(&items, |&id| id, IdScheme::PowerOfSeven);

        assert_eq!(map.get(0), Some(StableId::new(3)));
        assert_eq!(map.get(1), Some(StableId::new(21)));
        assert_eq!(map.get(2), Some(StableId::new(147)));
    }

    #[test]
    fn test_occurrences_count_per_base() {
        let items = [1_u64, 2, 1];
        let map = IdMap::build(&items, |&id| id, IdScheme::PowerOfSeven);

        assert_eq!(map.get(0), Some(StableId::new(1)));
        assert_eq!(map.get(1), Some(StableId::new(2)));
        assert_eq!(map.get(2), Some(StableId::new(7)));
    }

    #[test]
    fn test_swap_follows_items() {
        let items = [10_u64, 20];
        let mut map = IdMap::build(&items, |&id| id, IdScheme::Mixed);
        let (a, b) = (map.get(0), map.get(1));

        map.swap(0, 1);
        assert_eq!(map.get(0), b);
        assert_eq!(map.get(1), a);

        map.swap(0, 5);
        assert_eq!(map.get(0), b);
    }

    #[test]
    fn test_move_item_shifts_between() {
        let items = [1_u64, 2, 3, 4];
        let mut map = IdMap::build(&items, |&id| id, IdScheme::PowerOfSeven);

        map.move_item(0, 2);
        let raw: Vec<u64> = map.as_slice().iter().map(|id| id.raw()).collect();
        assert_eq!(raw, vec![2, 3, 1, 4]);

        map.move_item(3, 9);
        assert_eq!(map.get(3), Some(StableId::new(4)));
    }

    #[test]
    fn test_empty_sequence() {
        let map = IdMap::build::<u64>(&[], |&id| id, IdScheme::Mixed);
        assert!(map.is_empty());
        assert_eq!(map.get(0), None);
    }

    proptest! {
        #[test]
        fn mixed_ids_are_distinct_per_base(base in any::<u64>(), repeats in 1usize..64) {
            let items = vec![base; repeats];
            let map = IdMap::build(&items, |&id| id, IdScheme::Mixed);
            let unique: HashSet<_> = map.as_slice().iter().collect();
            prop_assert_eq!(unique.len(), repeats);
        }

        #[test]
        fn rebuild_is_a_pure_function(items in proptest::collection::vec(0u64..8, 0..40)) {
            let a = IdMap::build(&items, |&id| id, IdScheme::Mixed);
            let b = IdMap::build(&items, |&id| id, IdScheme::Mixed);
            prop_assert_eq!(a, b);
        }
    }
}
