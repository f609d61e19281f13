// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Item and record registries translating between java and bedrock
//! representations, built once at startup.

extern crate leafbridge_protocol as protocol;
extern crate leafbridge_shared as shared;

use std::collections::HashMap;
use std::sync::Arc;

pub mod cache;
mod error;
pub mod loader;
pub mod mapping;
mod resources;

pub use self::error::Error;
pub use self::mapping::{ItemMapping, ItemMappings};
pub use self::resources::{Diagnostics, LogDiagnostics, ResourceProvider};

use self::loader::effects::EFFECTS_FILE;
use self::loader::{EffectFiles, ItemsRegistryLoader, RecordsRegistryLoader};
use protocol::sound::SoundEvent;

pub struct RegistryConfig {
    pub effects_file: String,
    pub cache_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            effects_file: EFFECTS_FILE.to_owned(),
            cache_capacity: cache::DEFAULT_CACHE_CAPACITY,
        }
    }
}

pub struct Registries {
    items: HashMap<i32, ItemMappings>,
    records: HashMap<i32, SoundEvent>,
}

impl Registries {
    /// Loads every registry. Any error here means the proxy can't start.
    pub fn load(
        resources: &dyn ResourceProvider,
        diagnostics: Arc<dyn Diagnostics>,
        config: &RegistryConfig,
    ) -> Result<Registries, Error> {
        let items = ItemsRegistryLoader::new()
            .cache_capacity(config.cache_capacity)
            .load(resources, diagnostics.clone())?;

        let effect_files = EffectFiles::new();
        let records = RecordsRegistryLoader::new(&effect_files).load(
            resources,
            &config.effects_file,
            diagnostics.as_ref(),
        )?;

        Ok(Registries { items, records })
    }

    /// The item tables for a bedrock protocol version.
    pub fn items_for(&self, protocol_version: i32) -> Option<&ItemMappings> {
        self.items.get(&protocol_version)
    }

    pub fn items(&self) -> &HashMap<i32, ItemMappings> {
        &self.items
    }

    pub fn records(&self) -> &HashMap<i32, SoundEvent> {
        &self.records
    }

    pub fn record(&self, legacy_id: i32) -> Option<SoundEvent> {
        self.records.get(&legacy_id).copied()
    }
}
