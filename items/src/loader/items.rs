// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::sync::Arc;

use serde::Deserialize;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::mapping::{ItemMapping, ItemMappings, ItemMappingsBuilder};
use crate::protocol::item::ItemEntry;
use crate::protocol::types::FNVHashMap;
use crate::resources::{read_json, Diagnostics, ResourceProvider};
use crate::shared::{PaletteVersion, PALETTE_VERSIONS};
use crate::Error;

use super::creative;

pub const ITEMS_FILE: &str = "mappings/items.json";

/// Items other parts of the proxy fetch by name.
pub const STORED_ITEMS: &[&str] = &[
    "minecraft:barrier",
    "minecraft:bamboo",
    "minecraft:egg",
    "minecraft:gold_ingot",
    "minecraft:shield",
    "minecraft:milk_bucket",
    "minecraft:wheat",
    "minecraft:writable_book",
];

// Classification is by substring, so any identifier containing "boat"
// counts as a boat.
const BOAT_MARKER: &str = "boat";
const BUCKET_MARKER: &str = "bucket";
const MILK_MARKER: &str = "milk";

/// Exists on bedrock only, but item translation needs a mapping for it.
pub const LODESTONE_COMPASS: &str = "minecraft:lodestone_compass";

/// Runtime id given to the lodestone compass when the palette lacks it.
pub const UNRESOLVED_ID: i32 = -1;

/// One entry of `mappings/items.json`, keyed by java identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    pub bedrock_identifier: String,
    pub bedrock_data: i32,
    pub is_block: bool,
    #[serde(default = "default_stack_size")]
    pub stack_size: i32,
    #[serde(default)]
    pub tool_type: Option<String>,
    #[serde(default)]
    pub tool_tier: Option<String>,
}

fn default_stack_size() -> i32 {
    64
}

#[derive(Deserialize)]
struct PaletteItem {
    name: String,
    id: i32,
}

pub struct ItemsRegistryLoader {
    palettes: Vec<PaletteVersion>,
    cache_capacity: usize,
}

impl Default for ItemsRegistryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemsRegistryLoader {
    pub fn new() -> ItemsRegistryLoader {
        ItemsRegistryLoader {
            palettes: PALETTE_VERSIONS.to_vec(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    pub fn palettes(mut self, palettes: &[PaletteVersion]) -> Self {
        self.palettes = palettes.to_vec();
        self
    }

    pub fn cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Builds the item tables of every registered palette version, keyed by
    /// protocol version. Fails if any java item has no bedrock counterpart.
    pub fn load(
        &self,
        resources: &dyn ResourceProvider,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<HashMap<i32, ItemMappings>, Error> {
        let definitions = load_definitions(resources)?;

        let mut registered = HashMap::new();
        for palette in &self.palettes {
            let mappings =
                self.load_palette(palette, &definitions, resources, diagnostics.clone())?;
            diagnostics.info(&format!(
                "Loaded {} item mappings and {} creative items for protocol {}",
                mappings.items().len(),
                mappings.creative_items().len(),
                palette.protocol_version
            ));
            registered.insert(palette.protocol_version, mappings);
        }
        Ok(registered)
    }

    fn load_palette(
        &self,
        palette: &PaletteVersion,
        definitions: &[(String, RawItemDefinition)],
        resources: &dyn ResourceProvider,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<ItemMappings, Error> {
        let palette_entries: Vec<PaletteItem> =
            read_json(resources, &palette.runtime_states_file())?;

        let mut mappings = ItemMappingsBuilder::default();
        let mut bedrock_ids: FNVHashMap<String, i32> = FNVHashMap::default();
        for entry in palette_entries {
            // The join packet carries palette ids as shorts. Wider ids still
            // resolve definitions but can't be announced to the client.
            match i16::try_from(entry.id) {
                Ok(id) => mappings.item_entries.push(ItemEntry::new(&entry.name, id)),
                Err(_) => diagnostics.warn(&format!(
                    "Palette entry {} has id {} outside the short range, leaving it out of the item list",
                    entry.name, entry.id
                )),
            }
            bedrock_ids.insert(entry.name, entry.id);
        }

        mappings.creative_items = creative::load_creative_items(
            resources,
            &palette.creative_items_file(),
            diagnostics.as_ref(),
        )?;

        for (java_identifier, definition) in definitions {
            let bedrock_id = *bedrock_ids
                .get(&definition.bedrock_identifier)
                .ok_or_else(|| Error::MissingBedrockId {
                    protocol_version: palette.protocol_version,
                    java_identifier: java_identifier.clone(),
                    bedrock_identifier: definition.bedrock_identifier.clone(),
                })?;
            let java_id = mappings.items.len();

            if STORED_ITEMS.contains(&java_identifier.as_str()) {
                mappings
                    .stored_items
                    .insert(java_identifier.clone(), java_id);
            }
            if java_identifier.contains(BOAT_MARKER) {
                mappings.boat_ids.push(bedrock_id);
            } else if java_identifier.contains(BUCKET_MARKER)
                && !java_identifier.contains(MILK_MARKER)
            {
                mappings.bucket_ids.push(bedrock_id);
            }

            mappings.items.push(ItemMapping {
                java_identifier: java_identifier.clone(),
                java_id,
                bedrock_identifier: definition.bedrock_identifier.clone(),
                bedrock_id,
                bedrock_data: definition.bedrock_data,
                block: definition.is_block,
                stack_size: definition.stack_size,
                tool_type: definition.tool_type.clone(),
                tool_tier: definition.tool_tier.clone(),
            });
            mappings.item_names.push(java_identifier.clone());
        }

        // Unlike every other item, a missing lodestone compass isn't fatal
        let java_id = mappings.items.len();
        mappings.items.push(ItemMapping {
            java_identifier: LODESTONE_COMPASS.to_owned(),
            java_id,
            bedrock_identifier: LODESTONE_COMPASS.to_owned(),
            bedrock_id: bedrock_ids
                .get(LODESTONE_COMPASS)
                .copied()
                .unwrap_or(UNRESOLVED_ID),
            bedrock_data: 0,
            block: false,
            stack_size: 1,
            tool_type: None,
            tool_tier: None,
        });

        Ok(mappings.build(self.cache_capacity, diagnostics))
    }
}

/// Reads the java item definitions, keeping file order.
fn load_definitions(
    resources: &dyn ResourceProvider,
) -> Result<Vec<(String, RawItemDefinition)>, Error> {
    let items: serde_json::Map<String, serde_json::Value> = read_json(resources, ITEMS_FILE)?;
    items
        .into_iter()
        .map(|(java_identifier, value)| {
            serde_json::from_value::<RawItemDefinition>(value)
                .map(|definition| (java_identifier, definition))
                .map_err(|err| Error::Json {
                    resource: ITEMS_FILE.to_owned(),
                    err,
                })
        })
        .collect()
}
