// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;

use serde::de::DeserializeOwned;

use crate::Error;

/// Supplies the raw bytes of mapping resources by their relative name,
/// e.g. `mappings/items.json`.
pub trait ResourceProvider {
    fn open(&self, name: &str) -> Option<Box<dyn io::Read>>;
}

/// Where load time diagnostics go. Loaders never talk to a global logger
/// themselves.
pub trait Diagnostics: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        log::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(
    resources: &dyn ResourceProvider,
    name: &str,
) -> Result<T, Error> {
    let reader = resources
        .open(name)
        .ok_or_else(|| Error::MissingResource(name.to_owned()))?;
    serde_json::from_reader(io::BufReader::new(reader)).map_err(|err| Error::Json {
        resource: name.to_owned(),
        err,
    })
}
