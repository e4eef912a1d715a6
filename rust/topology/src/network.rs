// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolved loop topology.
//!
//! A [`Topology`] is built fresh per query and only owns strings; nothing in
//! it borrows from the model. Node linkage is by name, never by identity.

use eplus_lite_core::ObjectRef;
use serde::Serialize;

use crate::error::Error;
use crate::kinds::{ConnectorKind, LoopKind};

/// One component on a branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    pub inlet_node: Option<String>,
    pub outlet_node: Option<String>,
}

/// An ordered chain of components; order is flow order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub name: String,
    pub components: Vec<Component>,
}

/// Branch wiring of a splitter or mixer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorFlow {
    Splitter {
        inlet_branch: Option<String>,
        outlet_branches: Vec<String>,
    },
    Mixer {
        inlet_branches: Vec<String>,
        outlet_branch: Option<String>,
    },
}

impl ConnectorFlow {
    pub fn kind(&self) -> ConnectorKind {
        match self {
            ConnectorFlow::Splitter { .. } => ConnectorKind::Splitter,
            ConnectorFlow::Mixer { .. } => ConnectorKind::Mixer,
        }
    }
}

/// A splitter or mixer joining branches of a plant or condenser side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(flatten)]
    pub flow: ConnectorFlow,
}

/// Supply or demand side of a plant or condenser loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Side {
    pub inlet_node: Option<String>,
    pub outlet_node: Option<String>,
    pub branches: Vec<Branch>,
    pub connectors: Vec<Connector>,
}

/// Supply side of an air loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirSupplySide {
    pub inlet_node: Option<String>,
    pub outlet_node: Option<String>,
    pub branches: Vec<Branch>,
    /// All branch components concatenated in branch order.
    pub components: Vec<Component>,
}

/// An `AirLoopHVAC:SupplyPath` or `AirLoopHVAC:ReturnPath`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirPath {
    pub name: String,
    /// The node the path was matched on: inlet for supply paths, outlet for
    /// return paths.
    pub node: String,
    pub components: Vec<ObjectRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSplitter {
    pub name: String,
    pub inlet_node: Option<String>,
    pub outlet_nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMixer {
    pub name: String,
    pub inlet_nodes: Vec<String>,
    pub outlet_node: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPlenum {
    pub name: String,
    pub zone_name: Option<String>,
    pub zone_node_name: Option<String>,
    pub inlet_nodes: Vec<String>,
    pub outlet_node: Option<String>,
    pub induced_air_outlet_node: Option<String>,
}

/// A zone terminal unit fed by a zone-splitter outlet node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEquipment {
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    pub inlet_node: String,
    pub outlet_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
}

/// Demand side of an air loop, discovered by node matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirDemandSide {
    pub inlet_node: Option<String>,
    pub outlet_node: Option<String>,
    pub supply_paths: Vec<AirPath>,
    pub return_paths: Vec<AirPath>,
    pub zone_splitters: Vec<ZoneSplitter>,
    pub zone_mixers: Vec<ZoneMixer>,
    pub return_plenums: Vec<ReturnPlenum>,
    pub zone_equipment: Vec<ZoneEquipment>,
}

/// The two sides of a loop; shape depends on the loop family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Network {
    Branched {
        supply_side: Side,
        demand_side: Side,
    },
    Air {
        supply_side: AirSupplySide,
        demand_side: AirDemandSide,
    },
}

/// Why an item is missing from a partial topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    NotFound,
    Malformed,
}

/// An item omitted from the topology, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        let kind = if err.is_malformed() {
            DiagnosticKind::Malformed
        } else {
            DiagnosticKind::NotFound
        };
        Diagnostic {
            kind,
            message: err.to_string(),
        }
    }
}

/// Topology of a single loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topology {
    pub loop_name: String,
    pub loop_type: LoopKind,
    #[serde(flatten)]
    pub network: Network,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Topology {
    /// Plant/condenser sides, if this is a branched loop.
    pub fn branched(&self) -> Option<(&Side, &Side)> {
        match &self.network {
            Network::Branched {
                supply_side,
                demand_side,
            } => Some((supply_side, demand_side)),
            Network::Air { .. } => None,
        }
    }

    /// Air-loop sides, if this is an air loop.
    pub fn air(&self) -> Option<(&AirSupplySide, &AirDemandSide)> {
        match &self.network {
            Network::Air {
                supply_side,
                demand_side,
            } => Some((supply_side, demand_side)),
            Network::Branched { .. } => None,
        }
    }
}
