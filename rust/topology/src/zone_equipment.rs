// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone terminal equipment lookup by inlet node.
//!
//! Terminal units do not name the air loop that feeds them; they are found
//! by matching their inlet node against zone-splitter outlet nodes. Inlet
//! and outlet fields are spelled differently across object types, so each
//! is read as the first non-empty of a list of aliases.

use eplus_lite_core::{FieldAccess, Model};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::network::ZoneEquipment;

/// Object types scanned for zone terminal equipment, in match order.
pub const ZONE_EQUIPMENT_TYPES: [&str; 17] = [
    "AirTerminal:SingleDuct:Uncontrolled",
    "AirTerminal:SingleDuct:VAV:Reheat",
    "AirTerminal:SingleDuct:VAV:NoReheat",
    "AirTerminal:SingleDuct:ConstantVolume:Reheat",
    "AirTerminal:SingleDuct:ConstantVolume:NoReheat",
    "AirTerminal:DualDuct:VAV",
    "AirTerminal:DualDuct:ConstantVolume",
    "ZoneHVAC:Baseboard:Convective:Electric",
    "ZoneHVAC:Baseboard:Convective:Water",
    "ZoneHVAC:PackagedTerminalAirConditioner",
    "ZoneHVAC:PackagedTerminalHeatPump",
    "ZoneHVAC:WindowAirConditioner",
    "ZoneHVAC:UnitHeater",
    "ZoneHVAC:UnitVentilator",
    "ZoneHVAC:EnergyRecoveryVentilator",
    "ZoneHVAC:FourPipeFanCoil",
    "ZoneHVAC:IdealLoadsAirSystem",
];

/// Inlet-node field aliases, highest priority first.
pub const INLET_NODE_FIELDS: [&str; 4] = [
    "air_inlet_node_name",
    "air_inlet_node",
    "supply_air_inlet_node_name",
    "zone_supply_air_node_name",
];

/// Outlet-node field aliases, highest priority first.
pub const OUTLET_NODE_FIELDS: [&str; 3] = [
    "air_outlet_node_name",
    "air_outlet_node",
    "zone_air_node_name",
];

/// Zone equipment grouped by inlet node.
///
/// Built with one pass over the catalogue; each node's list keeps catalogue
/// order, then declaration order within a type.
#[derive(Debug, Default)]
pub struct ZoneEquipmentIndex {
    by_inlet: FxHashMap<String, Vec<ZoneEquipment>>,
}

impl ZoneEquipmentIndex {
    pub fn build(model: &Model) -> Self {
        let mut by_inlet: FxHashMap<String, Vec<ZoneEquipment>> = FxHashMap::default();

        for object_type in ZONE_EQUIPMENT_TYPES {
            for (name, attrs) in model.objects(object_type) {
                let Some(inlet) = attrs.first_text(&INLET_NODE_FIELDS) else {
                    continue;
                };
                by_inlet
                    .entry(inlet.to_string())
                    .or_default()
                    .push(ZoneEquipment {
                        object_type: object_type.to_string(),
                        name: name.to_string(),
                        inlet_node: inlet.to_string(),
                        outlet_node: attrs.first_text(&OUTLET_NODE_FIELDS).map(str::to_string),
                        // Present-but-empty zone names are kept.
                        zone_name: attrs
                            .get("zone_name")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    });
            }
        }

        Self { by_inlet }
    }

    /// Equipment whose inlet node equals `node` exactly.
    pub fn for_node(&self, node: &str) -> &[ZoneEquipment] {
        self.by_inlet.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
