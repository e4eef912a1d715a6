// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plant and condenser loop sides.
//!
//! Both families reference their branches and connectors by name. Supply
//! fields carry a kind-specific prefix (`plant_side_*`, `condenser_side_*`);
//! demand fields share `demand_side_*`.

use eplus_lite_core::{Attributes, FieldAccess};

use crate::kinds::LoopKind;
use crate::network::{Network, Side};
use crate::resolver::Resolver;

impl<'m> Resolver<'m> {
    /// Builds both sides of a plant or condenser loop.
    pub fn plant_network(&mut self, kind: LoopKind, loop_obj: &Attributes) -> Network {
        let supply_side = self.branched_side(loop_obj, kind.supply_prefix());
        let demand_side = self.branched_side(loop_obj, kind.demand_prefix());
        Network::Branched {
            supply_side,
            demand_side,
        }
    }

    fn branched_side(&mut self, loop_obj: &Attributes, prefix: &str) -> Side {
        let field = |suffix: &str| loop_obj.text(&format!("{prefix}_{suffix}")).map(str::to_string);

        let mut side = Side {
            inlet_node: field("inlet_node_name"),
            outlet_node: field("outlet_node_name"),
            ..Side::default()
        };

        if let Some(list) = field("branch_list_name") {
            side.branches = self.branches_from_list(&list);
        }
        if let Some(list) = field("connector_list_name") {
            side.connectors = self.connectors_from_list(&list);
        }

        tracing::debug!(
            prefix,
            branches = side.branches.len(),
            connectors = side.connectors.len(),
            "resolved loop side"
        );
        side
    }
}
