//! Layout and position-mapping tests for the section adapter.

use horizon_sections::model::{
    BasicEmptyState, Coordinate, EmptyContent, IdScheme, ItemView, ListSection, SingletonSection,
    TypeTag,
};
use horizon_sections::{AdapterConfig, OutOfRangePolicy, SectionAdapter};
use proptest::prelude::*;

const HEADER: TypeTag = TypeTag::new(1);
const SONGS: TypeTag = TypeTag::new(2);

#[derive(Default)]
struct Row;

impl ItemView for Row {
    type Item = u64;
    fn bind(&mut self, _item: &u64, _local_index: usize) {}
}

#[derive(Default)]
struct Placeholder;

impl ItemView for Placeholder {
    type Item = EmptyContent;
    fn bind(&mut self, _item: &EmptyContent, _local_index: usize) {}
}

fn list(tag: TypeTag, size: usize) -> ListSection<u64, Row> {
    ListSection::new(tag, Row::default).with_data((0..size as u64).collect())
}

fn header() -> SingletonSection<u64, Row> {
    SingletonSection::new(HEADER, 0, Row::default).with_dependency(SONGS)
}

fn empty_state() -> BasicEmptyState<Placeholder> {
    BasicEmptyState::new(Placeholder::default).with_message("No songs")
}

fn adapter_with_sizes(sizes: &[usize]) -> SectionAdapter {
    let mut adapter =
        SectionAdapter::with_config(AdapterConfig::new().with_out_of_range(OutOfRangePolicy::Ignore));
    for (i, &size) in sizes.iter().enumerate() {
        adapter
            .add_section(list(TypeTag::new(100 + i as u32), size))
            .expect("distinct tags");
    }
    adapter
}

#[test]
fn test_header_with_empty_songs_shows_empty_state() {
    let mut adapter = SectionAdapter::new();
    adapter.add_section(header()).unwrap();
    adapter.add_section(list(SONGS, 0)).unwrap();
    adapter.set_empty_state(empty_state());

    assert_eq!(adapter.item_count(), 1);
    assert_eq!(adapter.type_at(0).unwrap(), TypeTag::EMPTY_STATE);
    assert_ne!(adapter.type_at(0).unwrap(), HEADER);
}

#[test]
fn test_header_inserted_before_songs() {
    let mut adapter = SectionAdapter::new();
    adapter.add_section(list(SONGS, 5)).unwrap();
    adapter.add_section_at(0, header()).unwrap();

    assert_eq!(adapter.item_count(), 6);
    assert_eq!(adapter.resolve_position(0).unwrap(), Coordinate::new(0, 0));
    assert_eq!(adapter.section_tag_at(0), Some(HEADER));
    assert_eq!(adapter.resolve_position(1).unwrap(), Coordinate::new(1, 0));
    assert_eq!(adapter.section_tag_at(1), Some(SONGS));
}

#[test]
fn test_dependency_visibility_follows_size() {
    for (size, visible) in [(0, false), (1, true), (7, true)] {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        adapter.add_section(list(SONGS, size)).unwrap();

        assert_eq!(adapter.is_section_visible(HEADER), visible, "songs size {size}");
        assert_eq!(adapter.item_count(), size + usize::from(visible));
    }
}

#[test]
fn test_visibility_is_recomputed_after_update() {
    let mut adapter = SectionAdapter::new();
    adapter.add_section(header()).unwrap();
    adapter.add_section(list(SONGS, 0)).unwrap();
    assert_eq!(adapter.item_count(), 0);

    adapter
        .update_section::<ListSection<u64, Row>, _>(SONGS, |songs| songs.set_data(vec![1, 2]))
        .unwrap();
    assert_eq!(adapter.item_count(), 3);
    assert_eq!(adapter.type_at(0).unwrap(), HEADER);

    adapter
        .update_section::<ListSection<u64, Row>, _>(SONGS, |songs| songs.set_shown(false))
        .unwrap();
    assert_eq!(adapter.item_count(), 0);
}

#[test]
fn test_no_empty_state_means_zero_items() {
    let adapter = adapter_with_sizes(&[0, 0]);
    assert_eq!(adapter.item_count(), 0);
    assert!(adapter.type_at(0).is_err());
}

#[test]
fn test_identities_are_scoped_by_section() {
    let mut adapter = SectionAdapter::new();
    adapter
        .add_section(list(HEADER, 1).with_ids(|&n| n, IdScheme::Mixed))
        .unwrap();
    adapter
        .add_section(list(SONGS, 1).with_ids(|&n| n, IdScheme::Mixed))
        .unwrap();

    let a = adapter.identity_at(0).unwrap().unwrap();
    let b = adapter.identity_at(1).unwrap().unwrap();
    assert_eq!(a.id, b.id);
    assert_ne!(a, b);
}

#[test]
fn test_repeated_entities_have_distinct_ids() {
    let mut adapter = SectionAdapter::new();
    adapter
        .add_section(
            ListSection::new(SONGS, Row::default)
                .with_ids(|&n| n, IdScheme::Mixed)
                .with_data(vec![9, 9, 9]),
        )
        .unwrap();

    let ids: Vec<_> = (0..3).map(|p| adapter.identity_at(p).unwrap().unwrap()).collect();
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);

    let again: Vec<_> = (0..3).map(|p| adapter.identity_at(p).unwrap().unwrap()).collect();
    assert_eq!(ids, again);
}

#[test]
fn test_section_names_for_fast_scroll() {
    let mut adapter = SectionAdapter::new();
    adapter.add_section(header()).unwrap();
    adapter
        .add_section(list(SONGS, 3).with_section_names(|n| format!("{n}")))
        .unwrap();

    assert_eq!(adapter.section_name_at(0).unwrap(), None);
    assert_eq!(adapter.section_name_at(3).unwrap().as_deref(), Some("2"));
}

proptest! {
    #[test]
    fn total_is_sum_of_sizes(sizes in proptest::collection::vec(0usize..6, 0..8)) {
        let adapter = adapter_with_sizes(&sizes);
        prop_assert_eq!(adapter.item_count(), sizes.iter().sum::<usize>());
    }

    #[test]
    fn empty_state_adds_one_item_only_when_empty(sizes in proptest::collection::vec(0usize..3, 0..5)) {
        let mut adapter = adapter_with_sizes(&sizes);
        adapter.set_empty_state(empty_state());
        let total: usize = sizes.iter().sum();
        prop_assert_eq!(adapter.item_count(), if total == 0 { 1 } else { total });
    }

    #[test]
    fn resolve_agrees_with_leading_count(sizes in proptest::collection::vec(0usize..6, 1..8)) {
        let adapter = adapter_with_sizes(&sizes);
        for position in 0..adapter.item_count() {
            let coordinate = adapter.resolve_position(position).unwrap();
            let tag = adapter.section_tag_at(coordinate.section).unwrap();
            prop_assert!(coordinate.local < adapter.section_size(tag));
            prop_assert_eq!(adapter.leading_count(tag) + coordinate.local, position);
        }
        prop_assert!(adapter.resolve_position(adapter.item_count()).is_err());
    }
}
