// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end queries against small in-memory models.

use eplus_lite_core::Model;
use eplus_lite_topology::{
    discover_loops, loop_topology, Component, DiagnosticKind, Error, LoopCounts, LoopKind,
    Resolver, TopologyConfig, TopologyEngine,
};
use serde_json::json;

#[test_log::test]
fn demand_branch_with_single_pipe() {
    let model = Model::from_value(json!({
        "PlantLoop": {
            "HeatingLoop": { "demand_side_branch_list_name": "HeatingDemandBranches" }
        },
        "BranchList": {
            "HeatingDemandBranches": { "branches": [ { "branch_name": "B1" } ] }
        },
        "Branch": {
            "B1": {
                "components": [{
                    "component_object_type": "Pipe:Adiabatic",
                    "component_name": "P1",
                    "component_inlet_node_name": "N1",
                    "component_outlet_node_name": "N2"
                }]
            }
        }
    }))
    .unwrap();

    let topology = loop_topology(&model, "HeatingLoop").unwrap();
    assert_eq!(topology.loop_type, LoopKind::Plant);

    let (supply, demand) = topology.branched().unwrap();
    assert!(supply.branches.is_empty());
    assert_eq!(demand.branches.len(), 1);
    assert_eq!(demand.branches[0].name, "B1");
    assert_eq!(
        demand.branches[0].components,
        vec![Component {
            object_type: "Pipe:Adiabatic".into(),
            name: "P1".into(),
            inlet_node: Some("N1".into()),
            outlet_node: Some("N2".into()),
        }]
    );
    assert!(topology.diagnostics.is_empty());

    let value = serde_json::to_value(&topology).unwrap();
    assert_eq!(
        value["demand_side"]["branches"],
        json!([{
            "name": "B1",
            "components": [
                { "type": "Pipe:Adiabatic", "name": "P1", "inlet_node": "N1", "outlet_node": "N2" }
            ]
        }])
    );
}

#[test_log::test]
fn discovery_counts_each_family() {
    let model = Model::from_value(json!({
        "PlantLoop": { "HW": {} },
        "CondenserLoop": { "CW": {} },
        "AirLoopHVAC": { "AHU 1": {}, "AHU 2": {} },
        "Zone": { "Z1": {}, "Z2": {} }
    }))
    .unwrap();

    let catalog = discover_loops(&model);
    assert_eq!(
        catalog.counts,
        LoopCounts {
            plant: 1,
            condenser: 1,
            air: 2,
            zones: 2
        }
    );
    assert_eq!(catalog.counts.total(), 4);
    let value = serde_json::to_value(&catalog).unwrap();
    assert_eq!(
        value["counts"],
        json!({ "plant": 1, "condenser": 1, "air": 2, "zones": 2 })
    );
}

#[test_log::test]
fn zone_splitter_outlets_stop_at_first_gap() {
    let model = Model::from_value(json!({
        "AirLoopHVAC:ZoneSplitter": {
            "Splitter": {
                "inlet_node_name": "S_in",
                "outlet_1_node_name": "Z1",
                "outlet_2_node_name": "Z2",
                "outlet_3_node_name": "Z3",
                "outlet_5_node_name": "Z5"
            }
        }
    }))
    .unwrap();

    let splitter = Resolver::new(&model).zone_splitter("Splitter").unwrap();
    assert_eq!(splitter.inlet_node.as_deref(), Some("S_in"));
    assert_eq!(splitter.outlet_nodes, vec!["Z1", "Z2", "Z3"]);
}

#[test_log::test]
fn unknown_loop_returns_no_topology() {
    let model = Model::from_value(json!({
        "PlantLoop": { "HW": {} },
        "Branch": { "Ghost": {} }
    }))
    .unwrap();

    let err = loop_topology(&model, "Ghost").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, Error::LoopNotFound(_)));
    assert_eq!(
        err.to_string(),
        "loop 'Ghost' not found in PlantLoop, CondenserLoop or AirLoopHVAC"
    );
}

#[test_log::test]
fn dangling_references_degrade_to_diagnostics() {
    let model = Model::from_value(json!({
        "PlantLoop": {
            "HW": {
                "plant_side_branch_list_name": "Supply Branches",
                "plant_side_connector_list_name": "Odd Connectors",
                "demand_side_branch_list_name": "Nowhere"
            }
        },
        "BranchList": {
            "Supply Branches": {
                "branches": [ { "branch_name": "Real" }, { "branch_name": "Missing" } ]
            }
        },
        "Branch": { "Real": { "components": [] } },
        "ConnectorList": {
            "Odd Connectors": {
                "connector_1_object_type": "Connector:Splitter",
                "connector_1_name": "S",
                "connector_2_object_type": "Connector:Mixer"
            }
        }
    }))
    .unwrap();

    let topology = loop_topology(&model, "HW").unwrap();
    let (supply, demand) = topology.branched().unwrap();

    assert_eq!(supply.branches.len(), 1);
    assert_eq!(supply.branches[0].name, "Real");
    assert!(supply.connectors.is_empty());
    assert!(demand.branches.is_empty());

    let kinds: Vec<DiagnosticKind> = topology.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::NotFound,
            DiagnosticKind::Malformed,
            DiagnosticKind::NotFound
        ]
    );
}

#[test_log::test]
fn scan_limit_caps_numbered_fields() {
    let model = Model::from_value(json!({
        "AirLoopHVAC": {
            "AHU": { "demand_side_inlet_node_names": "Demand Inlet" }
        },
        "AirLoopHVAC:SupplyPath": {
            "Path": {
                "supply_air_path_inlet_node_name": "Demand Inlet",
                "component_1_object_type": "AirLoopHVAC:ZoneSplitter",
                "component_1_name": "Splitter"
            }
        },
        "AirLoopHVAC:ZoneSplitter": {
            "Splitter": {
                "outlet_1_node_name": "Z1",
                "outlet_2_node_name": "Z2",
                "outlet_3_node_name": "Z3"
            }
        }
    }))
    .unwrap();

    let engine = TopologyEngine::with_config(&model, TopologyConfig { scan_limit: 2 });
    let topology = engine.topology("AHU").unwrap();
    let (_, demand) = topology.air().unwrap();
    assert_eq!(demand.zone_splitters[0].outlet_nodes, vec!["Z1", "Z2"]);
}
