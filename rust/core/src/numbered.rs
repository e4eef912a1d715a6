// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numbered-field scan.
//!
//! Several object types flatten a repeated sub-structure into fields that
//! carry an increasing index: `component_1_name`, `component_2_name`, ...
//! The first entry may also be written without its index
//! (`component_name`). Scans start at index 1 and stop at the first index
//! whose field is absent or empty, so a gap truncates the sequence.
//!
//! Every scan is capped at a fixed number of indices so malformed input
//! cannot cause unbounded work.

use serde::{Deserialize, Serialize};

use crate::fields::FieldAccess;
use crate::model::Attributes;

/// Default cap on the number of indices a scan will visit.
pub const DEFAULT_SCAN_LIMIT: usize = 50;

/// A field-name pattern with a `{}` placeholder for the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedField<'a> {
    pattern: &'a str,
}

impl<'a> NumberedField<'a> {
    pub const fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }

    /// Field name for a 1-based index, e.g. `component_3_name`.
    pub fn numbered(&self, index: usize) -> String {
        self.pattern.replacen("{}", &index.to_string(), 1)
    }

    /// Field name with the index dropped, e.g. `component_name`.
    pub fn unnumbered(&self) -> String {
        self.pattern.replacen("_{}", "", 1).replacen("{}", "", 1)
    }

    /// Reads the value at an index; index 1 falls back to the unnumbered alias.
    pub fn read<'v>(&self, attrs: &'v Attributes, index: usize) -> Option<&'v str> {
        let value = attrs.text(&self.numbered(index));
        if index == 1 {
            value.or_else(|| attrs.text(&self.unnumbered()))
        } else {
            value
        }
    }
}

/// A `{type, name}` reference to another object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
}

impl ObjectRef {
    pub fn new(object_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            name: name.into(),
        }
    }
}

/// Scans paired name/type fields into object references.
///
/// Stops at the first index where either field is absent or empty.
pub fn scan_components(
    attrs: &Attributes,
    name_field: NumberedField<'_>,
    type_field: NumberedField<'_>,
    limit: usize,
) -> Vec<ObjectRef> {
    let mut components = Vec::new();
    for index in 1..=limit {
        match (name_field.read(attrs, index), type_field.read(attrs, index)) {
            (Some(name), Some(object_type)) => {
                components.push(ObjectRef::new(object_type, name));
            }
            _ => break,
        }
    }
    components
}

/// Scans a single numbered field into an ordered list of node names.
pub fn scan_nodes(attrs: &Attributes, node_field: NumberedField<'_>, limit: usize) -> Vec<String> {
    (1..=limit)
        .map_while(|index| node_field.read(attrs, index).map(str::to_string))
        .collect()
}
