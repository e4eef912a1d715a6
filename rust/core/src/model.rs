// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only object store over an epJSON document.
//!
//! An epJSON document maps an object type (`"PlantLoop"`, `"Branch"`, ...) to
//! a collection of named objects, and each object to its attribute map:
//!
//! ```json
//! {
//!   "Branch": {
//!     "Heating Supply Inlet Branch": {
//!       "components": [ { "component_object_type": "Pump:VariableSpeed", ... } ]
//!     }
//!   }
//! }
//! ```
//!
//! Type lookup is hashed; objects inside a collection keep their declaration
//! order so that discovery output follows the source document.

use std::io::Read;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Attribute map of a single object (field name → value).
pub type Attributes = serde_json::Map<String, Value>;

/// All objects of one type, keyed by object name in declaration order.
pub type Collection = IndexMap<String, Attributes>;

/// An immutable, fully materialized building model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    collections: FxHashMap<String, Collection>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an epJSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Parses an epJSON document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Builds a model from an already parsed JSON value.
    ///
    /// Top-level entries that are not object maps (and objects that are not
    /// attribute maps) are skipped; only a non-object document is an error.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(Error::InvalidModel(
                "top-level epJSON value must be an object".to_string(),
            ));
        };

        let mut model = Model::new();
        for (object_type, objects) in root {
            let Value::Object(objects) = objects else {
                tracing::warn!(object_type = %object_type, "skipping non-object collection");
                continue;
            };
            let collection = model.collections.entry(object_type.clone()).or_default();
            for (name, attrs) in objects {
                match attrs {
                    Value::Object(attrs) => {
                        collection.insert(name, attrs);
                    }
                    _ => {
                        tracing::warn!(
                            object_type = %object_type,
                            name = %name,
                            "skipping object without attribute map"
                        );
                    }
                }
            }
        }
        Ok(model)
    }

    /// Adds (or replaces) an object. Intended for hosts assembling a model
    /// programmatically before handing it to read-only queries.
    pub fn insert(&mut self, object_type: &str, name: &str, attrs: Attributes) {
        self.collections
            .entry(object_type.to_string())
            .or_default()
            .insert(name.to_string(), attrs);
    }

    /// Returns the collection for an object type, if the model declares it.
    pub fn collection(&self, object_type: &str) -> Option<&Collection> {
        self.collections.get(object_type)
    }

    /// Iterates the objects of a type in declaration order.
    ///
    /// An undeclared type reads as an empty collection.
    pub fn objects<'a>(
        &'a self,
        object_type: &str,
    ) -> impl Iterator<Item = (&'a str, &'a Attributes)> + 'a {
        self.collections
            .get(object_type)
            .into_iter()
            .flat_map(|c| c.iter().map(|(name, attrs)| (name.as_str(), attrs)))
    }

    /// Returns the attribute map of a named object.
    pub fn object(&self, object_type: &str, name: &str) -> Result<&Attributes> {
        self.collections
            .get(object_type)
            .and_then(|c| c.get(name))
            .ok_or_else(|| Error::not_found(object_type, name))
    }

    /// Returns true if the named object exists.
    pub fn contains(&self, object_type: &str, name: &str) -> bool {
        self.collections
            .get(object_type)
            .is_some_and(|c| c.contains_key(name))
    }

    /// Number of objects of a type.
    pub fn count(&self, object_type: &str) -> usize {
        self.collections.get(object_type).map_or(0, |c| c.len())
    }

    /// Object types declared by the model (unordered).
    pub fn object_types(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(|k| k.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Model::from_value(value).map_err(serde::de::Error::custom)
    }
}
