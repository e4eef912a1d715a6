// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # EPlus-Lite Topology
//!
//! Loop discovery and topology resolution for EnergyPlus epJSON models.
//!
//! A loop object names its branch lists, connector lists and key nodes.
//! This crate follows those references and returns a self-contained
//! [`Topology`]: supply and demand sides with their branches, components
//! and connectors for plant and condenser loops, or supply branches plus
//! supply/return paths, zone splitters, mixers, plenums and terminal
//! equipment for air loops.
//!
//! ## Quick Start
//!
//! ```rust
//! use eplus_lite_core::Model;
//! use eplus_lite_topology::TopologyEngine;
//!
//! let model = Model::from_json_str(r#"{
//!     "PlantLoop": { "Heating Loop": { "plant_side_inlet_node_name": "HW Inlet" } }
//! }"#).unwrap();
//!
//! let engine = TopologyEngine::new(&model);
//! assert_eq!(engine.discover().counts.plant, 1);
//!
//! let topology = engine.topology("Heating Loop").unwrap();
//! let (supply, _demand) = topology.branched().unwrap();
//! assert_eq!(supply.inlet_node.as_deref(), Some("HW Inlet"));
//! ```
//!
//! ## Partial results
//!
//! Only an unknown loop name is an error. A branch, connector or path
//! component that is missing or malformed is left out of the result and
//! recorded in [`Topology::diagnostics`].

pub mod air;
pub mod branches;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod kinds;
pub mod network;
pub mod plant;
pub mod resolver;
pub mod serialization;
pub mod zone_equipment;

pub use discovery::{discover_loops, find_loop, LoopCatalog, LoopCounts, LoopSummary};
pub use engine::{loop_topology, TopologyConfig, TopologyEngine};
pub use error::{Error, Result};
pub use kinds::{ConnectorKind, LoopKind, PathComponentKind};
pub use network::{
    AirDemandSide, AirPath, AirSupplySide, Branch, Component, Connector, ConnectorFlow,
    Diagnostic, DiagnosticKind, Network, ReturnPlenum, Side, Topology, ZoneEquipment, ZoneMixer,
    ZoneSplitter,
};
pub use resolver::Resolver;
pub use zone_equipment::ZoneEquipmentIndex;
