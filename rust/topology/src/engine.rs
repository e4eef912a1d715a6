// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Query entry points.
//!
//! [`TopologyEngine`] wraps a loaded model and answers loop queries. Every
//! query builds a fresh [`Resolver`], so queries share nothing but the
//! read-only model and can run on separate threads.

use eplus_lite_core::{Attributes, Model, DEFAULT_SCAN_LIMIT};
use rayon::prelude::*;

use crate::discovery::{discover_loops, find_loop, LoopCatalog};
use crate::error::{Error, Result};
use crate::kinds::LoopKind;
use crate::network::Topology;
use crate::resolver::Resolver;

/// Tunables for topology resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyConfig {
    /// Highest index probed by numbered-field scans.
    pub scan_limit: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

/// Answers loop discovery and topology queries against one model.
#[derive(Debug, Clone, Copy)]
pub struct TopologyEngine<'m> {
    model: &'m Model,
    config: TopologyConfig,
}

impl<'m> TopologyEngine<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self::with_config(model, TopologyConfig::default())
    }

    pub fn with_config(model: &'m Model, config: TopologyConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    pub fn config(&self) -> TopologyConfig {
        self.config
    }

    /// Lists every plant, condenser and air loop.
    pub fn discover(&self) -> LoopCatalog {
        discover_loops(self.model)
    }

    /// Resolves the topology of the loop called `loop_name`.
    ///
    /// Fails only when no loop has that name. Anything missing or malformed
    /// below the loop object is left out and reported in
    /// [`Topology::diagnostics`].
    pub fn topology(&self, loop_name: &str) -> Result<Topology> {
        let (kind, loop_obj) = find_loop(self.model, loop_name)
            .ok_or_else(|| Error::LoopNotFound(loop_name.to_string()))?;
        Ok(self.resolve(kind, loop_name, loop_obj))
    }

    /// Resolves every discovered loop in parallel, keeping discovery order.
    ///
    /// Loops are looked up by family as well as name, so a name shared by a
    /// plant and an air loop yields one topology of each.
    pub fn all_topologies(&self) -> Vec<(String, Result<Topology>)> {
        let loops: Vec<(LoopKind, String)> = self
            .discover()
            .iter()
            .map(|summary| (summary.kind, summary.name.clone()))
            .collect();

        loops
            .par_iter()
            .map(|(kind, name)| {
                let result = self
                    .model
                    .object(kind.object_type(), name)
                    .map(|loop_obj| self.resolve(*kind, name, loop_obj))
                    .map_err(Error::from);
                (name.clone(), result)
            })
            .collect()
    }

    fn resolve(&self, kind: LoopKind, loop_name: &str, loop_obj: &Attributes) -> Topology {
        let _span = tracing::debug_span!("topology", loop_name, %kind).entered();

        let mut resolver = Resolver::with_scan_limit(self.model, self.config.scan_limit);
        let network = match kind {
            LoopKind::Plant | LoopKind::Condenser => resolver.plant_network(kind, loop_obj),
            LoopKind::Air => resolver.air_network(loop_obj),
        };
        let diagnostics = resolver.into_diagnostics();

        if !diagnostics.is_empty() {
            tracing::info!(
                loop_name,
                omitted = diagnostics.len(),
                "resolved partial topology"
            );
        }

        Topology {
            loop_name: loop_name.to_string(),
            loop_type: kind,
            network,
            diagnostics,
        }
    }
}

/// Resolves one loop with the default configuration.
pub fn loop_topology(model: &Model, loop_name: &str) -> Result<Topology> {
    TopologyEngine::new(model).topology(loop_name)
}
