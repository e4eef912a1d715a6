// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Branch and connector resolution.
//!
//! Plant and condenser loops (and the supply side of air loops) reference
//! their structure by name: loop → `BranchList` → `Branch` → components, and
//! loop → `ConnectorList` → `Connector:Splitter` / `Connector:Mixer` →
//! branch names.

use eplus_lite_core::{scan_nodes, Attributes, FieldAccess, NumberedField};

use crate::error::{Error, Result};
use crate::kinds::ConnectorKind;
use crate::network::{Branch, Component, Connector, ConnectorFlow};
use crate::resolver::Resolver;

const BRANCH_LIST: &str = "BranchList";
const BRANCH: &str = "Branch";
const CONNECTOR_LIST: &str = "ConnectorList";

const CONNECTOR_NAME: NumberedField<'static> = NumberedField::new("connector_{}_name");
const CONNECTOR_TYPE: NumberedField<'static> = NumberedField::new("connector_{}_object_type");
const BRANCH_NAME: NumberedField<'static> = NumberedField::new("branch_{}_name");

impl<'m> Resolver<'m> {
    /// Returns the branch names a `BranchList` declares, in order.
    pub fn resolve_branch_list(&mut self, list_name: &str) -> Result<Vec<String>> {
        let model = self.model;
        let list = model.object(BRANCH_LIST, list_name)?;
        let records = list.records("branches");

        if records.is_empty() {
            return Ok(scan_nodes(list, BRANCH_NAME, self.scan_limit));
        }

        let mut names = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            match record.text("branch_name") {
                Some(name) => names.push(name.to_string()),
                None => self.omit(&Error::malformed(
                    BRANCH_LIST,
                    list_name,
                    format!("branch entry {} has no branch_name", i + 1),
                )),
            }
        }
        Ok(names)
    }

    /// Resolves a `Branch` into its ordered components.
    pub fn resolve_branch(&mut self, name: &str) -> Result<Branch> {
        let model = self.model;
        let branch = model.object(BRANCH, name)?;

        let mut components = Vec::new();
        for (i, record) in branch.records("components").into_iter().enumerate() {
            match (
                record.text("component_object_type"),
                record.text("component_name"),
            ) {
                (Some(object_type), Some(component_name)) => components.push(Component {
                    object_type: object_type.to_string(),
                    name: component_name.to_string(),
                    inlet_node: record
                        .text("component_inlet_node_name")
                        .map(str::to_string),
                    outlet_node: record
                        .text("component_outlet_node_name")
                        .map(str::to_string),
                }),
                _ => self.omit(&Error::malformed(
                    BRANCH,
                    name,
                    format!("component {} lacks an object type or name", i + 1),
                )),
            }
        }

        Ok(Branch {
            name: name.to_string(),
            components,
        })
    }

    /// Resolves a `ConnectorList` into splitters and mixers.
    ///
    /// The list is a flat run of `connector_{i}_name` /
    /// `connector_{i}_object_type` pairs. An odd key count, a missing pair
    /// field, or a type that is neither a splitter nor a mixer fails the
    /// whole list. A pair whose connector object is missing is left out.
    pub fn resolve_connector_list(&mut self, list_name: &str) -> Result<Vec<Connector>> {
        let model = self.model;
        let list = model.object(CONNECTOR_LIST, list_name)?;
        let pairs = classify_connectors(list_name, list)?;

        let mut connectors = Vec::with_capacity(pairs.len());
        for (name, object_type, kind) in pairs {
            let connector = model
                .object(kind.object_type(), name)
                .map_err(Error::from)
                .map(|attrs| Connector {
                    name: name.to_string(),
                    object_type: object_type.to_string(),
                    flow: connector_flow(kind, attrs),
                });
            if let Some(connector) = self.keep(connector) {
                connectors.push(connector);
            }
        }
        Ok(connectors)
    }

    /// Resolves every branch of a list, leaving out the ones that fail.
    pub(crate) fn branches_from_list(&mut self, list_name: &str) -> Vec<Branch> {
        let result = self.resolve_branch_list(list_name);
        let Some(names) = self.keep(result) else {
            return Vec::new();
        };

        let mut branches = Vec::with_capacity(names.len());
        for name in &names {
            let branch = self.resolve_branch(name);
            if let Some(branch) = self.keep(branch) {
                branches.push(branch);
            }
        }
        tracing::debug!(
            branch_list = list_name,
            declared = names.len(),
            resolved = branches.len(),
            "resolved branch list"
        );
        branches
    }

    /// Resolves a connector list, or nothing if the list fails.
    pub(crate) fn connectors_from_list(&mut self, list_name: &str) -> Vec<Connector> {
        let result = self.resolve_connector_list(list_name);
        self.keep(result).unwrap_or_default()
    }
}

/// Validates the key layout of a connector list and classifies each pair.
fn classify_connectors<'a>(
    list_name: &str,
    list: &'a Attributes,
) -> Result<Vec<(&'a str, &'a str, ConnectorKind)>> {
    let key_count = list.keys().filter(|k| k.as_str() != "name").count();
    if key_count % 2 != 0 {
        return Err(Error::malformed(
            CONNECTOR_LIST,
            list_name,
            format!("odd key count ({key_count})"),
        ));
    }

    (1..=key_count / 2)
        .map(|i| {
            let name_key = CONNECTOR_NAME.numbered(i);
            let type_key = CONNECTOR_TYPE.numbered(i);
            let name = list.text(&name_key).ok_or_else(|| {
                Error::malformed(CONNECTOR_LIST, list_name, format!("missing {name_key}"))
            })?;
            let object_type = list.text(&type_key).ok_or_else(|| {
                Error::malformed(CONNECTOR_LIST, list_name, format!("missing {type_key}"))
            })?;
            let kind = ConnectorKind::from_object_type(object_type).ok_or_else(|| {
                Error::malformed(
                    CONNECTOR_LIST,
                    list_name,
                    format!("connector '{name}' has type '{object_type}', expected a splitter or mixer"),
                )
            })?;
            Ok((name, object_type, kind))
        })
        .collect()
}

fn connector_flow(kind: ConnectorKind, attrs: &Attributes) -> ConnectorFlow {
    let branch_refs = |field: &str| -> Vec<String> {
        attrs
            .records("branches")
            .into_iter()
            .filter_map(|r| r.text(field).map(str::to_string))
            .collect()
    };

    match kind {
        ConnectorKind::Splitter => ConnectorFlow::Splitter {
            inlet_branch: attrs.text("inlet_branch_name").map(str::to_string),
            outlet_branches: branch_refs("outlet_branch_name"),
        },
        ConnectorKind::Mixer => ConnectorFlow::Mixer {
            inlet_branches: branch_refs("inlet_branch_name"),
            outlet_branch: attrs.text("outlet_branch_name").map(str::to_string),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::DiagnosticKind;
    use eplus_lite_core::Model;
    use serde_json::json;

    fn model() -> Model {
        Model::from_value(json!({
            "BranchList": {
                "Supply Branches": {
                    "branches": [
                        { "branch_name": "Inlet Branch" },
                        { "branch_name": "Boiler Branch" },
                        { "branch_name": "Ghost Branch" },
                        { "branch_name": "Outlet Branch" }
                    ]
                },
                "Legacy Branches": {
                    "branch_1_name": "Inlet Branch",
                    "branch_2_name": "Outlet Branch"
                }
            },
            "Branch": {
                "Inlet Branch": {
                    "components": [{
                        "component_object_type": "Pump:VariableSpeed",
                        "component_name": "HW Pump",
                        "component_inlet_node_name": "HW Supply Inlet",
                        "component_outlet_node_name": "HW Pump Outlet"
                    }]
                },
                "Boiler Branch": {
                    "components": [
                        {
                            "component_object_type": "Boiler:HotWater",
                            "component_name": "Boiler",
                            "component_inlet_node_name": "Boiler Inlet",
                            "component_outlet_node_name": "Boiler Outlet"
                        },
                        { "component_name": "No Type" },
                        {
                            "component_object_type": "Pipe:Adiabatic",
                            "component_name": "Boiler Bypass",
                            "component_inlet_node_name": "Bypass Inlet",
                            "component_outlet_node_name": "Bypass Outlet"
                        }
                    ]
                },
                "Outlet Branch": {
                    "components": [{
                        "component_object_type": "Pipe:Adiabatic",
                        "component_name": "Outlet Pipe",
                        "component_inlet_node_name": "Pipe Inlet",
                        "component_outlet_node_name": "HW Supply Outlet"
                    }]
                }
            },
            "ConnectorList": {
                "Supply Connectors": {
                    "connector_1_object_type": "Connector:Splitter",
                    "connector_1_name": "Supply Splitter",
                    "connector_2_object_type": "Connector:Mixer",
                    "connector_2_name": "Supply Mixer"
                },
                "Odd Connectors": {
                    "connector_1_object_type": "Connector:Splitter",
                    "connector_1_name": "Supply Splitter",
                    "connector_2_object_type": "Connector:Mixer"
                },
                "Valve Connectors": {
                    "connector_1_object_type": "Connector:Splitter",
                    "connector_1_name": "Supply Splitter",
                    "connector_2_object_type": "Connector:Valve",
                    "connector_2_name": "Valve"
                },
                "Dangling Connectors": {
                    "connector_1_object_type": "Connector:Splitter",
                    "connector_1_name": "Missing Splitter",
                    "connector_2_object_type": "Connector:Mixer",
                    "connector_2_name": "Supply Mixer"
                }
            },
            "Connector:Splitter": {
                "Supply Splitter": {
                    "inlet_branch_name": "Inlet Branch",
                    "branches": [
                        { "outlet_branch_name": "Boiler Branch" },
                        { "outlet_branch_name": "Bypass Branch" }
                    ]
                }
            },
            "Connector:Mixer": {
                "Supply Mixer": {
                    "outlet_branch_name": "Outlet Branch",
                    "branches": [
                        { "inlet_branch_name": "Boiler Branch" },
                        { "inlet_branch_name": "Bypass Branch" }
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn branch_list_in_declared_order() {
        let model = model();
        let mut r = Resolver::new(&model);
        assert_eq!(
            r.resolve_branch_list("Supply Branches").unwrap(),
            vec!["Inlet Branch", "Boiler Branch", "Ghost Branch", "Outlet Branch"]
        );
    }

    #[test]
    fn numbered_branch_list() {
        let model = model();
        let mut r = Resolver::new(&model);
        assert_eq!(
            r.resolve_branch_list("Legacy Branches").unwrap(),
            vec!["Inlet Branch", "Outlet Branch"]
        );
    }

    #[test]
    fn missing_branch_list_is_not_found() {
        let model = model();
        let mut r = Resolver::new(&model);
        assert!(r.resolve_branch_list("Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn branch_components_keep_flow_order() {
        let model = model();
        let mut r = Resolver::new(&model);
        let branch = r.resolve_branch("Boiler Branch").unwrap();
        let names: Vec<&str> = branch.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Boiler", "Boiler Bypass"]);
        assert_eq!(branch.components[0].inlet_node.as_deref(), Some("Boiler Inlet"));
        assert_eq!(r.diagnostics().len(), 1);
        assert_eq!(r.diagnostics()[0].kind, DiagnosticKind::Malformed);
    }

    #[test]
    fn missing_branch_is_omitted() {
        let model = model();
        let mut r = Resolver::new(&model);
        let branches = r.branches_from_list("Supply Branches");
        let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Inlet Branch", "Boiler Branch", "Outlet Branch"]);
        assert!(r
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::NotFound && d.message.contains("Ghost Branch")));
    }

    #[test]
    fn connector_list_yields_one_connector_per_pair() {
        let model = model();
        let mut r = Resolver::new(&model);
        let connectors = r.resolve_connector_list("Supply Connectors").unwrap();
        assert_eq!(connectors.len(), 2);

        assert_eq!(
            connectors[0].flow,
            ConnectorFlow::Splitter {
                inlet_branch: Some("Inlet Branch".into()),
                outlet_branches: vec!["Boiler Branch".into(), "Bypass Branch".into()],
            }
        );
        assert_eq!(
            connectors[1].flow,
            ConnectorFlow::Mixer {
                inlet_branches: vec!["Boiler Branch".into(), "Bypass Branch".into()],
                outlet_branch: Some("Outlet Branch".into()),
            }
        );
        assert_eq!(connectors[1].object_type, "Connector:Mixer");
    }

    #[test]
    fn odd_connector_list_fails() {
        let model = model();
        let mut r = Resolver::new(&model);
        let err = r.resolve_connector_list("Odd Connectors").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("odd key count (3)"));
    }

    #[test]
    fn unknown_connector_type_fails_the_list() {
        let model = model();
        let mut r = Resolver::new(&model);
        let err = r.resolve_connector_list("Valve Connectors").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("Connector:Valve"));

        assert!(r.connectors_from_list("Valve Connectors").is_empty());
        assert_eq!(r.diagnostics().len(), 1);
    }

    #[test]
    fn gap_in_connector_numbering_fails_the_list() {
        let mut model = model();
        model.insert(
            "ConnectorList",
            "Skewed Connectors",
            json!({
                "connector_1_object_type": "Connector:Mixer",
                "connector_1_name": "Supply Mixer",
                "connector_3_object_type": "Connector:Mixer",
                "connector_3_name": "Supply Mixer"
            })
            .as_object()
            .cloned()
            .unwrap(),
        );

        let mut r = Resolver::new(&model);
        let err = r.resolve_connector_list("Skewed Connectors").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("missing connector_2_name"));

        assert!(r.connectors_from_list("Skewed Connectors").is_empty());
        assert_eq!(r.diagnostics().len(), 1);
        assert_eq!(r.diagnostics()[0].kind, DiagnosticKind::Malformed);
    }

    #[test]
    fn missing_connector_object_is_omitted() {
        let model = model();
        let mut r = Resolver::new(&model);
        let connectors = r.resolve_connector_list("Dangling Connectors").unwrap();
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].name, "Supply Mixer");
        assert_eq!(r.diagnostics()[0].kind, DiagnosticKind::NotFound);
    }

    #[test]
    fn name_key_is_not_counted() {
        let mut model = model();
        model.insert(
            "ConnectorList",
            "Named",
            json!({
                "name": "Named",
                "connector_1_object_type": "Connector:Mixer",
                "connector_1_name": "Supply Mixer"
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        let mut r = Resolver::new(&model);
        assert_eq!(r.resolve_connector_list("Named").unwrap().len(), 1);
    }
}
