// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # EPlus-Lite Core
//!
//! Read-only object store for EnergyPlus epJSON building models.
//!
//! ## Overview
//!
//! - **Model**: object type → object name → attribute map, loaded once and
//!   never mutated by queries
//! - **Field access**: string/record/scalar reads that treat empty strings
//!   as absent
//! - **Numbered-field scan**: the single decoder for fields flattened as
//!   `component_1_name`, `component_2_name`, ...
//!
//! ## Quick Start
//!
//! ```rust
//! use eplus_lite_core::{FieldAccess, Model};
//!
//! let model = Model::from_json_str(
//!     r#"{ "PlantLoop": { "Hot Water Loop": { "fluid_type": "Water" } } }"#,
//! )
//! .unwrap();
//!
//! let hw = model.object("PlantLoop", "Hot Water Loop").unwrap();
//! assert_eq!(hw.text("fluid_type"), Some("Water"));
//! ```

pub mod error;
pub mod fields;
pub mod model;
pub mod numbered;

pub use error::{Error, Result};
pub use fields::{FieldAccess, Scalar};
pub use model::{Attributes, Collection, Model};
pub use numbered::{scan_components, scan_nodes, NumberedField, ObjectRef, DEFAULT_SCAN_LIMIT};
