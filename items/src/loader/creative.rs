// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::protocol::item::ItemData;
use crate::protocol::nbt::NamedTag;
use crate::resources::{read_json, Diagnostics, ResourceProvider};
use crate::Error;

#[derive(Deserialize)]
struct CreativeItems {
    items: Vec<CreativeItemSource>,
}

/// A creative item in the format ProxyPass dumps them.
#[derive(Deserialize)]
struct CreativeItemSource {
    id: i32,
    #[serde(default)]
    damage: i32,
    #[serde(default = "default_count")]
    count: i32,
    #[serde(default)]
    nbt_b64: Option<String>,
}

fn default_count() -> i32 {
    1
}

/// Loads the creative inventory in file order. Network ids start at 1.
pub fn load_creative_items(
    resources: &dyn ResourceProvider,
    name: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<ItemData>, Error> {
    let source: CreativeItems = read_json(resources, name)?;
    let mut creative_items = Vec::with_capacity(source.items.len());
    for (net_id, item) in (1..).zip(source.items) {
        let tag = match item.nbt_b64 {
            Some(ref encoded) => decode_tag(name, encoded, diagnostics)?,
            None => None,
        };
        creative_items.push(ItemData::from_net(
            net_id, item.id, item.damage, item.count, tag,
        ));
    }
    Ok(creative_items)
}

fn decode_tag(
    resource: &str,
    encoded: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<Option<NamedTag>, Error> {
    let bytes = STANDARD.decode(encoded).map_err(|err| Error::Base64 {
        resource: resource.to_owned(),
        err,
    })?;
    match NamedTag::read_from(&mut Cursor::new(bytes)) {
        Ok(tag) if tag.1.is_compound() => Ok(Some(tag)),
        Ok(_) => {
            diagnostics.warn(&format!(
                "Creative item tag in {} is not a compound, dropping it",
                resource
            ));
            Ok(None)
        }
        Err(err) => {
            diagnostics.warn(&format!(
                "Failed to read creative item tag in {}: {}",
                resource, err
            ));
            Ok(None)
        }
    }
}
