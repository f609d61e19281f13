// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loaders reading `mappings/effects.json`. The file is parsed once and
//! shared; each loader then picks out the entries of its own type.

use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::protocol::sound::SoundEvent;
use crate::resources::{read_json, Diagnostics, ResourceProvider};
use crate::Error;

pub const EFFECTS_FILE: &str = "mappings/effects.json";
pub const RECORD_TYPE: &str = "record";

/// Parsed effect files by resource name.
#[derive(Default)]
pub struct EffectFiles {
    loaded: Mutex<HashMap<String, Arc<Value>>>,
}

impl EffectFiles {
    pub fn new() -> EffectFiles {
        Default::default()
    }

    pub fn load_file(
        &self,
        resources: &dyn ResourceProvider,
        name: &str,
    ) -> Result<Arc<Value>, Error> {
        if let Some(tree) = self.loaded.lock().get(name) {
            return Ok(tree.clone());
        }
        let tree: Arc<Value> = Arc::new(read_json(resources, name)?);
        self.loaded.lock().insert(name.to_owned(), tree.clone());
        Ok(tree)
    }
}

/// Walks the top level entries whose `type` is `type_tag` and collects what
/// `extract` returns for each. An entry that fails is reported and skipped
/// as a whole; only a tree that isn't an object fails the load.
pub fn load_effect_entries<K, V, I, F>(
    tree: &Value,
    type_tag: &str,
    diagnostics: &dyn Diagnostics,
    mut extract: F,
) -> Result<HashMap<K, V>, Error>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
    F: FnMut(&Value) -> Result<I, Error>,
{
    let entries = tree
        .as_object()
        .ok_or_else(|| Error::Err("effect mappings must be a JSON object".to_owned()))?;

    let mut out = HashMap::new();
    for (key, node) in entries {
        let extracted = effect_type(node).and_then(|ty| {
            if ty == type_tag {
                extract(node).map(Some)
            } else {
                Ok(None)
            }
        });
        match extracted {
            Ok(Some(values)) => out.extend(values),
            Ok(None) => {}
            Err(err) => {
                diagnostics.warn(&format!("Failed to map sound effect {} : {}", key, err));
            }
        }
    }
    Ok(out)
}

fn effect_type(node: &Value) -> Result<&str, Error> {
    node.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Err("missing effect type".to_owned()))
}

/// Maps java legacy record ids onto the bedrock sound event that plays the
/// disc.
pub struct RecordsRegistryLoader<'a> {
    files: &'a EffectFiles,
}

impl<'a> RecordsRegistryLoader<'a> {
    pub fn new(files: &'a EffectFiles) -> RecordsRegistryLoader<'a> {
        RecordsRegistryLoader { files }
    }

    pub fn load(
        &self,
        resources: &dyn ResourceProvider,
        name: &str,
        diagnostics: &dyn Diagnostics,
    ) -> Result<HashMap<i32, SoundEvent>, Error> {
        let tree = self.files.load_file(resources, name)?;
        let records = load_effect_entries(&tree, RECORD_TYPE, diagnostics, extract_records)?;
        diagnostics.info(&format!("Loaded {} record mappings", records.len()));
        Ok(records)
    }
}

fn extract_records(node: &Value) -> Result<Vec<(i32, SoundEvent)>, Error> {
    let records = node
        .get("records")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Err("record effect without records".to_owned()))?;
    records
        .iter()
        .map(|(legacy_id, event)| {
            let legacy_id = legacy_id
                .parse::<i32>()
                .map_err(|err| Error::Err(format!("invalid record id {:?}: {}", legacy_id, err)))?;
            let event = event
                .as_str()
                .ok_or_else(|| Error::Err(format!("record {} is not a string", legacy_id)))?;
            Ok((legacy_id, SoundEvent::from_str(event)?))
        })
        .collect()
}
