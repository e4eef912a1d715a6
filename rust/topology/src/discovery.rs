// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop discovery: which plant, condenser and air loops a model declares.

use eplus_lite_core::{Attributes, FieldAccess, Model, Scalar};
use serde::Serialize;

use crate::air::{DEMAND_INLET_FIELDS, DEMAND_OUTLET_FIELDS, SUPPLY_OUTLET_FIELDS};
use crate::kinds::LoopKind;

/// Key nodes and basic properties of one loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopSummary {
    pub name: String,
    pub kind: LoopKind,
    pub supply_inlet_node: Option<String>,
    pub supply_outlet_node: Option<String>,
    pub demand_inlet_node: Option<String>,
    pub demand_outlet_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluid_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_loop_flow_rate: Option<Scalar>,
}

impl LoopSummary {
    fn new(kind: LoopKind, name: &str, attrs: &Attributes) -> Self {
        let text = |key: &str| attrs.text(key).map(str::to_string);
        let supply = kind.supply_prefix();
        let demand = kind.demand_prefix();

        match kind {
            LoopKind::Plant | LoopKind::Condenser => LoopSummary {
                name: name.to_string(),
                kind,
                supply_inlet_node: text(&format!("{supply}_inlet_node_name")),
                supply_outlet_node: text(&format!("{supply}_outlet_node_name")),
                demand_inlet_node: text(&format!("{demand}_inlet_node_name")),
                demand_outlet_node: text(&format!("{demand}_outlet_node_name")),
                fluid_type: text("fluid_type"),
                maximum_loop_flow_rate: attrs.scalar("maximum_loop_flow_rate"),
            },
            LoopKind::Air => LoopSummary {
                name: name.to_string(),
                kind,
                supply_inlet_node: text(&format!("{supply}_inlet_node_name")),
                supply_outlet_node: attrs.first_text(&SUPPLY_OUTLET_FIELDS).map(str::to_string),
                demand_inlet_node: attrs.first_text(&DEMAND_INLET_FIELDS).map(str::to_string),
                demand_outlet_node: attrs.first_text(&DEMAND_OUTLET_FIELDS).map(str::to_string),
                fluid_type: None,
                maximum_loop_flow_rate: None,
            },
        }
    }
}

/// Number of loops per family, plus the model's zone count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopCounts {
    pub plant: usize,
    pub condenser: usize,
    pub air: usize,
    pub zones: usize,
}

impl LoopCounts {
    /// Loops across all three families; zones are not counted.
    pub fn total(&self) -> usize {
        self.plant + self.condenser + self.air
    }
}

/// All loops declared by a model, grouped by family in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopCatalog {
    pub plant_loops: Vec<LoopSummary>,
    pub condenser_loops: Vec<LoopSummary>,
    pub air_loops: Vec<LoopSummary>,
    pub counts: LoopCounts,
}

impl LoopCatalog {
    /// Iterates every loop, plant first, then condenser, then air.
    pub fn iter(&self) -> impl Iterator<Item = &LoopSummary> {
        self.plant_loops
            .iter()
            .chain(&self.condenser_loops)
            .chain(&self.air_loops)
    }

    /// The first loop in discovery order.
    pub fn first_loop(&self) -> Option<&LoopSummary> {
        self.iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.total() == 0
    }
}

/// Enumerates the PlantLoop, CondenserLoop and AirLoopHVAC collections.
pub fn discover_loops(model: &Model) -> LoopCatalog {
    let summarize = |kind: LoopKind| -> Vec<LoopSummary> {
        model
            .objects(kind.object_type())
            .map(|(name, attrs)| LoopSummary::new(kind, name, attrs))
            .collect()
    };

    let plant_loops = summarize(LoopKind::Plant);
    let condenser_loops = summarize(LoopKind::Condenser);
    let air_loops = summarize(LoopKind::Air);
    let counts = LoopCounts {
        plant: plant_loops.len(),
        condenser: condenser_loops.len(),
        air: air_loops.len(),
        zones: model.count("Zone"),
    };

    tracing::debug!(
        plant = counts.plant,
        condenser = counts.condenser,
        air = counts.air,
        zones = counts.zones,
        "discovered loops"
    );

    LoopCatalog {
        plant_loops,
        condenser_loops,
        air_loops,
        counts,
    }
}

/// Finds a loop by name. When several families declare the same name, the
/// first in plant → condenser → air order wins.
pub fn find_loop<'m>(model: &'m Model, name: &str) -> Option<(LoopKind, &'m Attributes)> {
    LoopKind::ALL.into_iter().find_map(|kind| {
        model
            .object(kind.object_type(), name)
            .ok()
            .map(|attrs| (kind, attrs))
    })
}
