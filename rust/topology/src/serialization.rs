// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON output for query results.
//!
//! Field order follows struct declaration order; absent optional values are
//! written as `null` except where a field is documented as omitted.

use serde::Serialize;

use crate::discovery::LoopCatalog;
use crate::error::{Error, Result};
use crate::network::Topology;

fn compact<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))
}

impl Topology {
    /// Serialize to a single-line JSON string.
    pub fn to_json(&self) -> Result<String> {
        compact(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        pretty(self)
    }
}

impl LoopCatalog {
    pub fn to_json(&self) -> Result<String> {
        compact(self)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        pretty(self)
    }
}
