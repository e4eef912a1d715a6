// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use eplus_lite_core::DEFAULT_SCAN_LIMIT;
use eplus_lite_topology::TopologyConfig;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Highest index probed for numbered fields.
    pub scan_limit: usize,
    /// Print single-line JSON instead of indented JSON.
    pub compact_json: bool,
    /// Tracing filter directives.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            scan_limit: lookup("EPLUS_SCAN_LIMIT")
                .and_then(|v| v.parse().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_SCAN_LIMIT),
            compact_json: lookup("EPLUS_COMPACT_JSON")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "warn".into()),
        }
    }

    pub fn topology(&self) -> TopologyConfig {
        TopologyConfig {
            scan_limit: self.scan_limit,
        }
    }
}
