// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

pub mod creative;
pub mod effects;
pub mod items;

pub use self::effects::{EffectFiles, RecordsRegistryLoader};
pub use self::items::ItemsRegistryLoader;
