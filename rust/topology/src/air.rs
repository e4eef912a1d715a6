// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air loop sides.
//!
//! The supply side of an `AirLoopHVAC` references a branch list by name like
//! a plant loop. The demand side does not: supply and return paths are found
//! by matching their inlet/outlet node against the loop's demand nodes, and
//! zone equipment by matching its inlet node against zone-splitter outlets.
//!
//! Resolution order:
//! 1. supply branches and their flattened component list
//! 2. supply paths (demand inlet node) and return paths (demand outlet node)
//! 3. zone splitters, zone mixers and return plenums named on those paths
//! 4. zone equipment fed by each splitter outlet

use eplus_lite_core::{
    scan_components, scan_nodes, Attributes, FieldAccess, NumberedField, ObjectRef,
};

use crate::error::Result;
use crate::kinds::PathComponentKind;
use crate::network::{
    AirDemandSide, AirPath, AirSupplySide, Network, ReturnPlenum, ZoneMixer, ZoneSplitter,
};
use crate::resolver::Resolver;
use crate::zone_equipment::ZoneEquipmentIndex;

const SUPPLY_PATH: &str = "AirLoopHVAC:SupplyPath";
const RETURN_PATH: &str = "AirLoopHVAC:ReturnPath";

const COMPONENT_NAME: NumberedField<'static> = NumberedField::new("component_{}_name");
const COMPONENT_TYPE: NumberedField<'static> = NumberedField::new("component_{}_object_type");
const INLET_NODE: NumberedField<'static> = NumberedField::new("inlet_{}_node_name");
const OUTLET_NODE: NumberedField<'static> = NumberedField::new("outlet_{}_node_name");

// The AirLoopHVAC schema names this field `branch_list_name`; some
// converters emit the plant-loop spelling instead.
const BRANCH_LIST_FIELDS: [&str; 2] = ["branch_list_name", "plant_side_branch_list_name"];
const SUPPLY_INLET_FIELDS: [&str; 1] = ["supply_side_inlet_node_name"];
pub(crate) const SUPPLY_OUTLET_FIELDS: [&str; 2] = [
    "supply_side_outlet_node_names",
    "supply_side_outlet_node_name",
];
pub(crate) const DEMAND_INLET_FIELDS: [&str; 2] = [
    "demand_side_inlet_node_names",
    "demand_side_inlet_node_name",
];
pub(crate) const DEMAND_OUTLET_FIELDS: [&str; 2] = [
    "demand_side_outlet_node_name",
    "demand_side_outlet_node_names",
];

impl<'m> Resolver<'m> {
    /// Builds both sides of an air loop.
    pub fn air_network(&mut self, loop_obj: &Attributes) -> Network {
        let supply_side = self.air_supply_side(loop_obj);
        let demand_side = self.air_demand_side(loop_obj);
        Network::Air {
            supply_side,
            demand_side,
        }
    }

    fn air_supply_side(&mut self, loop_obj: &Attributes) -> AirSupplySide {
        let mut side = AirSupplySide {
            inlet_node: loop_obj.first_text(&SUPPLY_INLET_FIELDS).map(str::to_string),
            outlet_node: loop_obj.first_text(&SUPPLY_OUTLET_FIELDS).map(str::to_string),
            ..AirSupplySide::default()
        };

        if let Some(list) = loop_obj.first_text(&BRANCH_LIST_FIELDS) {
            side.branches = self.branches_from_list(list);
            side.components = side
                .branches
                .iter()
                .flat_map(|b| b.components.iter().cloned())
                .collect();
        }

        tracing::debug!(
            branches = side.branches.len(),
            components = side.components.len(),
            "resolved air supply side"
        );
        side
    }

    fn air_demand_side(&mut self, loop_obj: &Attributes) -> AirDemandSide {
        let mut side = AirDemandSide {
            inlet_node: loop_obj.first_text(&DEMAND_INLET_FIELDS).map(str::to_string),
            outlet_node: loop_obj.first_text(&DEMAND_OUTLET_FIELDS).map(str::to_string),
            ..AirDemandSide::default()
        };

        if let Some(node) = side.inlet_node.as_deref() {
            side.supply_paths = self.supply_paths(node);
        }
        if let Some(node) = side.outlet_node.as_deref() {
            side.return_paths = self.return_paths(node);
        }

        for path in &side.supply_paths {
            for component in &path.components {
                match PathComponentKind::from_object_type(&component.object_type) {
                    PathComponentKind::ZoneSplitter => {
                        let splitter = self.zone_splitter(&component.name);
                        side.zone_splitters.extend(self.keep(splitter));
                    }
                    PathComponentKind::ZoneMixer
                    | PathComponentKind::ReturnPlenum
                    | PathComponentKind::Other => {}
                }
            }
        }

        for path in &side.return_paths {
            for component in &path.components {
                match PathComponentKind::from_object_type(&component.object_type) {
                    PathComponentKind::ZoneMixer => {
                        let mixer = self.zone_mixer(&component.name);
                        side.zone_mixers.extend(self.keep(mixer));
                    }
                    PathComponentKind::ReturnPlenum => {
                        let plenum = self.return_plenum(&component.name);
                        side.return_plenums.extend(self.keep(plenum));
                    }
                    PathComponentKind::ZoneSplitter | PathComponentKind::Other => {}
                }
            }
        }

        if !side.zone_splitters.is_empty() {
            let index = ZoneEquipmentIndex::build(self.model);
            side.zone_equipment = side
                .zone_splitters
                .iter()
                .flat_map(|s| s.outlet_nodes.iter())
                .flat_map(|node| index.for_node(node).iter().cloned())
                .collect();
        }

        tracing::debug!(
            supply_paths = side.supply_paths.len(),
            return_paths = side.return_paths.len(),
            zone_splitters = side.zone_splitters.len(),
            zone_equipment = side.zone_equipment.len(),
            "resolved air demand side"
        );
        side
    }

    /// Supply paths whose inlet node equals `inlet_node` exactly.
    pub fn supply_paths(&self, inlet_node: &str) -> Vec<AirPath> {
        self.paths_matching(SUPPLY_PATH, "supply_air_path_inlet_node_name", inlet_node)
    }

    /// Return paths whose outlet node equals `outlet_node` exactly.
    pub fn return_paths(&self, outlet_node: &str) -> Vec<AirPath> {
        self.paths_matching(RETURN_PATH, "return_air_path_outlet_node_name", outlet_node)
    }

    fn paths_matching(&self, path_type: &str, node_field: &str, node: &str) -> Vec<AirPath> {
        self.model
            .objects(path_type)
            .filter(|(_, attrs)| attrs.text(node_field) == Some(node))
            .map(|(name, attrs)| AirPath {
                name: name.to_string(),
                node: node.to_string(),
                components: self.path_components(attrs),
            })
            .collect()
    }

    /// Numbered `component_{i}_*` fields, or the `components` record array
    /// when no numbered fields are present.
    fn path_components(&self, attrs: &Attributes) -> Vec<ObjectRef> {
        let numbered = scan_components(attrs, COMPONENT_NAME, COMPONENT_TYPE, self.scan_limit);
        if !numbered.is_empty() {
            return numbered;
        }
        attrs
            .records("components")
            .into_iter()
            .take(self.scan_limit)
            .map_while(|r| {
                Some(ObjectRef::new(
                    r.text("component_object_type")?,
                    r.text("component_name")?,
                ))
            })
            .collect()
    }

    /// Numbered node fields, or one field of each `nodes` record.
    fn path_nodes(&self, attrs: &Attributes, field: NumberedField<'_>) -> Vec<String> {
        let numbered = scan_nodes(attrs, field, self.scan_limit);
        if !numbered.is_empty() {
            return numbered;
        }
        let record_field = field.unnumbered();
        attrs
            .records("nodes")
            .into_iter()
            .take(self.scan_limit)
            .map_while(|r| r.text(&record_field).map(str::to_string))
            .collect()
    }

    /// Expands an `AirLoopHVAC:ZoneSplitter`.
    pub fn zone_splitter(&self, name: &str) -> Result<ZoneSplitter> {
        let attrs = self.path_object(PathComponentKind::ZoneSplitter, name)?;
        Ok(ZoneSplitter {
            name: name.to_string(),
            inlet_node: attrs.text("inlet_node_name").map(str::to_string),
            outlet_nodes: self.path_nodes(attrs, OUTLET_NODE),
        })
    }

    /// Expands an `AirLoopHVAC:ZoneMixer`.
    pub fn zone_mixer(&self, name: &str) -> Result<ZoneMixer> {
        let attrs = self.path_object(PathComponentKind::ZoneMixer, name)?;
        Ok(ZoneMixer {
            name: name.to_string(),
            inlet_nodes: self.path_nodes(attrs, INLET_NODE),
            outlet_node: attrs.text("outlet_node_name").map(str::to_string),
        })
    }

    /// Expands an `AirLoopHVAC:ReturnPlenum`.
    pub fn return_plenum(&self, name: &str) -> Result<ReturnPlenum> {
        let attrs = self.path_object(PathComponentKind::ReturnPlenum, name)?;
        Ok(ReturnPlenum {
            name: name.to_string(),
            zone_name: attrs.text("zone_name").map(str::to_string),
            zone_node_name: attrs.text("zone_node_name").map(str::to_string),
            inlet_nodes: self.path_nodes(attrs, INLET_NODE),
            outlet_node: attrs.text("outlet_node_name").map(str::to_string),
            induced_air_outlet_node: attrs
                .text("induced_air_outlet_node_or_nodelist_name")
                .map(str::to_string),
        })
    }

    fn path_object(&self, kind: PathComponentKind, name: &str) -> Result<&'m Attributes> {
        let model = self.model;
        // Only called with expandable kinds.
        let object_type = kind.object_type().unwrap_or_default();
        Ok(model.object(object_type, name)?)
    }
}
