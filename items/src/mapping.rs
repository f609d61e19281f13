// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::cache::LookupCache;
use crate::protocol::item::{ItemData, ItemEntry};
use crate::Diagnostics;

pub const AIR: &str = "minecraft:air";
pub const ARROW: &str = "minecraft:arrow";

/// Java items that share a bedrock representation with some other item.
/// Translating from bedrock must never produce one of these.
pub const JAVA_ONLY_ITEMS: &[&str] = &[
    "minecraft:spectral_arrow",
    "minecraft:debug_stick",
    "minecraft:knowledge_book",
    "minecraft:tipped_arrow",
    "minecraft:furnace_minecart",
];

lazy_static! {
    static ref AIR_MAPPING: ItemMapping = ItemMapping {
        java_identifier: AIR.to_owned(),
        java_id: 0,
        bedrock_identifier: AIR.to_owned(),
        bedrock_id: 0,
        bedrock_data: 0,
        block: false,
        stack_size: 64,
        tool_type: None,
        tool_tier: None,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMapping {
    pub java_identifier: String,
    pub java_id: usize,
    pub bedrock_identifier: String,
    pub bedrock_id: i32,
    pub bedrock_data: i32,
    pub block: bool,
    pub stack_size: i32,
    pub tool_type: Option<String>,
    pub tool_tier: Option<String>,
}

impl ItemMapping {
    /// The stand-in returned whenever a lookup finds nothing.
    pub fn air() -> &'static ItemMapping {
        &AIR_MAPPING
    }

    pub fn is_air(&self) -> bool {
        self.java_identifier == AIR
    }

    pub fn is_tool(&self) -> bool {
        self.tool_type.is_some()
    }

    /// Potions and tipped arrows keep their variant in the damage value,
    /// so it doesn't identify the java item.
    fn has_variable_data(&self) -> bool {
        self.java_identifier.ends_with("potion") || self.java_identifier == ARROW
    }

    fn matches_bedrock(&self, id: i32, data: i32) -> bool {
        self.bedrock_id == id
            && (self.bedrock_data == data || self.has_variable_data())
            && !JAVA_ONLY_ITEMS.contains(&self.java_identifier.as_str())
    }
}

/// The item tables for one bedrock protocol version. Everything except the
/// lookup caches is frozen once built.
pub struct ItemMappings {
    items: Vec<ItemMapping>,
    creative_items: Vec<ItemData>,
    item_entries: Vec<ItemEntry>,
    stored_items: HashMap<String, usize>,
    item_names: Vec<String>,
    bucket_ids: Vec<i32>,
    boat_ids: Vec<i32>,

    cached_java: LookupCache<String, Option<usize>>,
    cached_bedrock: LookupCache<(i32, i32), Option<usize>>,
    diagnostics: Arc<dyn Diagnostics>,
}

#[derive(Default)]
pub struct ItemMappingsBuilder {
    pub items: Vec<ItemMapping>,
    pub creative_items: Vec<ItemData>,
    pub item_entries: Vec<ItemEntry>,
    pub stored_items: HashMap<String, usize>,
    pub item_names: Vec<String>,
    pub bucket_ids: Vec<i32>,
    pub boat_ids: Vec<i32>,
}

impl ItemMappingsBuilder {
    pub fn build(self, cache_capacity: usize, diagnostics: Arc<dyn Diagnostics>) -> ItemMappings {
        ItemMappings {
            items: self.items,
            creative_items: self.creative_items,
            item_entries: self.item_entries,
            stored_items: self.stored_items,
            item_names: self.item_names,
            bucket_ids: self.bucket_ids,
            boat_ids: self.boat_ids,
            cached_java: LookupCache::new(cache_capacity),
            cached_bedrock: LookupCache::new(cache_capacity),
            diagnostics,
        }
    }
}

impl ItemMappings {
    /// Gets the mapping for a java edition item identifier, or air.
    pub fn mapping_by_java_identifier(&self, java_identifier: &str) -> &ItemMapping {
        let index = self.cached_java.get_or_insert_with(java_identifier, || {
            self.items
                .iter()
                .position(|mapping| mapping.java_identifier == java_identifier)
        });
        self.resolve(index)
    }

    /// Gets the mapping for a bedrock runtime id and damage value, or air.
    /// The first matching definition wins.
    pub fn mapping_by_bedrock(&self, id: i32, data: i32) -> &ItemMapping {
        let index = self.cached_bedrock.get_or_insert_with(&(id, data), || {
            let found = self
                .items
                .iter()
                .position(|mapping| mapping.matches_bedrock(id, data));
            // An empty hand is (0, 0) and isn't worth reporting
            if found.is_none() && (id != 0 || data != 0) {
                self.diagnostics
                    .debug(&format!("Missing mapping for bedrock item {}:{}", id, data));
            }
            found
        });
        self.resolve(index)
    }

    pub fn mapping_for_item_data(&self, item: &ItemData) -> &ItemMapping {
        self.mapping_by_bedrock(item.id, item.damage)
    }

    pub fn mapping_by_java_id(&self, java_id: usize) -> Option<&ItemMapping> {
        self.items.get(java_id)
    }

    /// Only the items in `STORED_ITEMS` can be fetched here.
    pub fn stored(&self, java_identifier: &str) -> Option<&ItemMapping> {
        self.stored_items
            .get(java_identifier)
            .and_then(|index| self.items.get(*index))
    }

    fn resolve(&self, index: Option<usize>) -> &ItemMapping {
        index
            .and_then(|index| self.items.get(index))
            .unwrap_or_else(|| ItemMapping::air())
    }

    pub fn items(&self) -> &[ItemMapping] {
        &self.items
    }

    pub fn creative_items(&self) -> &[ItemData] {
        &self.creative_items
    }

    pub fn item_entries(&self) -> &[ItemEntry] {
        &self.item_entries
    }

    pub fn item_names(&self) -> &[String] {
        &self.item_names
    }

    pub fn boat_ids(&self) -> &[i32] {
        &self.boat_ids
    }

    pub fn bucket_ids(&self) -> &[i32] {
        &self.bucket_ids
    }

    pub fn is_boat(&self, bedrock_id: i32) -> bool {
        self.boat_ids.contains(&bedrock_id)
    }

    pub fn is_bucket(&self, bedrock_id: i32) -> bool {
        self.bucket_ids.contains(&bedrock_id)
    }

    pub fn clear_caches(&self) {
        self.cached_java.clear();
        self.cached_bedrock.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::RecordingDiagnostics;

    fn mapping(java: &str, bedrock: &str, id: i32, data: i32) -> ItemMapping {
        ItemMapping {
            java_identifier: java.to_owned(),
            java_id: 0,
            bedrock_identifier: bedrock.to_owned(),
            bedrock_id: id,
            bedrock_data: data,
            block: false,
            stack_size: 64,
            tool_type: None,
            tool_tier: None,
        }
    }

    fn build(items: Vec<ItemMapping>) -> (ItemMappings, Arc<RecordingDiagnostics>) {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(java_id, mut mapping)| {
                mapping.java_id = java_id;
                mapping
            })
            .collect::<Vec<_>>();
        let mut stored_items = HashMap::new();
        for (index, mapping) in items.iter().enumerate() {
            if mapping.java_identifier == "minecraft:egg" {
                stored_items.insert(mapping.java_identifier.clone(), index);
            }
        }
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mappings = ItemMappingsBuilder {
            items,
            stored_items,
            ..Default::default()
        }
        .build(64, diagnostics.clone());
        (mappings, diagnostics)
    }

    fn fixture() -> (ItemMappings, Arc<RecordingDiagnostics>) {
        build(vec![
            mapping("minecraft:stick", "minecraft:stick", 280, 0),
            mapping("minecraft:debug_stick", "minecraft:stick", 280, 0),
            mapping("minecraft:potion", "minecraft:potion", 373, 0),
            mapping("minecraft:splash_potion", "minecraft:splash_potion", 438, 0),
            mapping("minecraft:spectral_arrow", "minecraft:arrow", 262, 0),
            mapping("minecraft:arrow", "minecraft:arrow", 262, 0),
            mapping("minecraft:tipped_arrow", "minecraft:arrow", 262, 0),
            mapping("minecraft:oak_planks", "minecraft:planks", 5, 0),
            mapping("minecraft:spruce_planks", "minecraft:planks", 5, 1),
            mapping("minecraft:egg", "minecraft:egg", 344, 0),
        ])
    }

    #[test]
    fn java_lookup_is_memoized_and_idempotent() {
        let (mappings, _) = fixture();
        let first = mappings.mapping_by_java_identifier("minecraft:spruce_planks");
        assert_eq!(first.bedrock_id, 5);
        assert_eq!(first.bedrock_data, 1);
        let again = mappings.mapping_by_java_identifier("minecraft:spruce_planks");
        assert!(std::ptr::eq(first, again));
        let fresh = mappings
            .items()
            .iter()
            .find(|m| m.java_identifier == "minecraft:spruce_planks")
            .unwrap();
        assert_eq!(again, fresh);

        mappings.clear_caches();
        assert_eq!(
            mappings.mapping_by_java_identifier("minecraft:spruce_planks"),
            fresh
        );
    }

    #[test]
    fn unknown_java_identifier_is_air() {
        let (mappings, _) = fixture();
        let mapping = mappings.mapping_by_java_identifier("minecraft:netherite_ingot");
        assert!(mapping.is_air());
        assert_eq!(mapping.bedrock_id, 0);
    }

    #[test]
    fn bedrock_lookup_matches_data() {
        let (mappings, _) = fixture();
        assert_eq!(
            mappings.mapping_by_bedrock(5, 0).java_identifier,
            "minecraft:oak_planks"
        );
        assert_eq!(
            mappings.mapping_by_bedrock(5, 1).java_identifier,
            "minecraft:spruce_planks"
        );
        assert!(mappings.mapping_by_bedrock(5, 7).is_air());
    }

    #[test]
    fn potions_and_arrows_ignore_data() {
        let (mappings, _) = fixture();
        assert_eq!(
            mappings.mapping_by_bedrock(373, 21).java_identifier,
            "minecraft:potion"
        );
        assert_eq!(
            mappings.mapping_by_bedrock(438, 5).java_identifier,
            "minecraft:splash_potion"
        );
        assert_eq!(
            mappings.mapping_by_bedrock(262, 19).java_identifier,
            "minecraft:arrow"
        );
    }

    #[test]
    fn java_only_items_are_never_returned() {
        let (mappings, _) = fixture();
        assert_eq!(
            mappings.mapping_by_bedrock(280, 0).java_identifier,
            "minecraft:stick"
        );
        for data in 0..40 {
            let mapping = mappings.mapping_by_bedrock(262, data);
            assert!(!JAVA_ONLY_ITEMS.contains(&mapping.java_identifier.as_str()));
        }
        // Still reachable from the java side
        assert_eq!(
            mappings
                .mapping_by_java_identifier("minecraft:debug_stick")
                .bedrock_id,
            280
        );
    }

    #[test]
    fn misses_are_reported_except_empty_hand() {
        let (mappings, diagnostics) = fixture();
        assert!(mappings.mapping_by_bedrock(0, 0).is_air());
        assert!(diagnostics.debug.lock().is_empty());

        assert!(mappings.mapping_by_bedrock(999, 0).is_air());
        assert!(mappings.mapping_by_bedrock(0, 3).is_air());
        assert_eq!(
            *diagnostics.debug.lock(),
            vec![
                "Missing mapping for bedrock item 999:0".to_owned(),
                "Missing mapping for bedrock item 0:3".to_owned(),
            ]
        );

        // Cached misses are not reported twice
        mappings.mapping_by_bedrock(999, 0);
        assert_eq!(diagnostics.debug.lock().len(), 2);
    }

    #[test]
    fn stored_items_only() {
        let (mappings, _) = fixture();
        assert_eq!(
            mappings.stored("minecraft:egg").map(|m| m.bedrock_id),
            Some(344)
        );
        assert!(mappings.stored("minecraft:stick").is_none());
        assert!(mappings.stored("minecraft:barrier").is_none());
    }

    #[test]
    fn item_data_lookup() {
        let (mappings, _) = fixture();
        let item = ItemData::of(5, 1, 64, None);
        assert_eq!(
            mappings.mapping_for_item_data(&item).java_identifier,
            "minecraft:spruce_planks"
        );
        assert_eq!(
            mappings.mapping_by_java_id(1).map(|m| m.java_identifier.as_str()),
            Some("minecraft:debug_stick")
        );
    }

    #[test]
    fn shared_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ItemMappings>();

        let (mappings, _) = fixture();
        let mappings = Arc::new(mappings);
        let handles = (0..4)
            .map(|_| {
                let mappings = mappings.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .map(|data| mappings.mapping_by_bedrock(373, data).java_id)
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert!(handle.join().unwrap().iter().all(|id| *id == 2));
        }
    }
}
