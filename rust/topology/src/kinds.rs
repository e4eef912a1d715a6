// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discriminants for loop, connector and path-component object types.
//!
//! epJSON identifies kinds by object-type strings. Each string family is
//! parsed once into an enum here so that resolvers dispatch with exhaustive
//! matches.

use serde::{Deserialize, Serialize};

/// The three loop families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoopKind {
    #[serde(rename = "PlantLoop")]
    Plant,
    #[serde(rename = "CondenserLoop")]
    Condenser,
    #[serde(rename = "AirLoopHVAC")]
    Air,
}

impl LoopKind {
    /// All kinds in discovery (and lookup precedence) order.
    pub const ALL: [LoopKind; 3] = [LoopKind::Plant, LoopKind::Condenser, LoopKind::Air];

    /// The epJSON collection holding loops of this kind.
    pub fn object_type(&self) -> &'static str {
        match self {
            LoopKind::Plant => "PlantLoop",
            LoopKind::Condenser => "CondenserLoop",
            LoopKind::Air => "AirLoopHVAC",
        }
    }

    /// Field prefix of the supply side (`plant_side_inlet_node_name`, ...).
    pub fn supply_prefix(&self) -> &'static str {
        match self {
            LoopKind::Plant => "plant_side",
            LoopKind::Condenser => "condenser_side",
            LoopKind::Air => "supply_side",
        }
    }

    /// Field prefix of the demand side, shared by every kind.
    pub fn demand_prefix(&self) -> &'static str {
        "demand_side"
    }
}

impl std::fmt::Display for LoopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.object_type())
    }
}

/// Splitter or mixer, classified from a connector's declared object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Splitter,
    Mixer,
}

impl ConnectorKind {
    /// Classifies by case-insensitive suffix (`*splitter`, `*mixer`).
    pub fn from_object_type(object_type: &str) -> Option<Self> {
        let lower = object_type.to_ascii_lowercase();
        if lower.ends_with("splitter") {
            Some(ConnectorKind::Splitter)
        } else if lower.ends_with("mixer") {
            Some(ConnectorKind::Mixer)
        } else {
            None
        }
    }

    /// The epJSON collection holding connectors of this kind.
    pub fn object_type(&self) -> &'static str {
        match self {
            ConnectorKind::Splitter => "Connector:Splitter",
            ConnectorKind::Mixer => "Connector:Mixer",
        }
    }
}

/// Components of an air-loop supply or return path that expand into
/// zone-level structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathComponentKind {
    ZoneSplitter,
    ZoneMixer,
    ReturnPlenum,
    /// Anything else (supply plenums, ...) is kept on the path but not expanded.
    Other,
}

impl PathComponentKind {
    pub fn from_object_type(object_type: &str) -> Self {
        [
            PathComponentKind::ZoneSplitter,
            PathComponentKind::ZoneMixer,
            PathComponentKind::ReturnPlenum,
        ]
        .into_iter()
        .find(|kind| {
            kind.object_type()
                .is_some_and(|t| t.eq_ignore_ascii_case(object_type))
        })
        .unwrap_or(PathComponentKind::Other)
    }

    pub fn object_type(&self) -> Option<&'static str> {
        match self {
            PathComponentKind::ZoneSplitter => Some("AirLoopHVAC:ZoneSplitter"),
            PathComponentKind::ZoneMixer => Some("AirLoopHVAC:ZoneMixer"),
            PathComponentKind::ReturnPlenum => Some("AirLoopHVAC:ReturnPlenum"),
            PathComponentKind::Other => None,
        }
    }
}
