// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed field reads over an object's attribute map.
//!
//! epJSON leaves optional fields out entirely or writes them as empty
//! strings; both read as "absent" here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Attributes;

/// A scalar field value: numeric, or text such as `"Autosize"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

/// Read helpers for attribute maps.
pub trait FieldAccess {
    /// Returns a non-empty string field.
    fn text(&self, key: &str) -> Option<&str>;

    /// Returns the first non-empty string among several field aliases.
    fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.text(k))
    }

    /// Returns the record maps of an array-of-objects field.
    ///
    /// Non-object array items are skipped; an absent field yields no records.
    fn records(&self, key: &str) -> Vec<&Attributes>;

    /// Returns a numeric or non-empty text field.
    fn scalar(&self, key: &str) -> Option<Scalar>;
}

impl FieldAccess for Attributes {
    fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    fn records(&self, key: &str) -> Vec<&Attributes> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
            _ => Vec::new(),
        }
    }

    fn scalar(&self, key: &str) -> Option<Scalar> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) if !s.is_empty() => Some(Scalar::Text(s.clone())),
            _ => None,
        }
    }
}
