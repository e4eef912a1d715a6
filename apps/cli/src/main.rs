// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: loop discovery and topology queries for epJSON models.
//!
//! Usage:
//!   eplus-topology loops <model.epJSON> [--compact]
//!   eplus-topology topology <model.epJSON> [LOOP] [--compact]
//!   eplus-topology all <model.epJSON> [--compact]
//!
//! JSON goes to stdout; logs go to stderr.

mod config;

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use eplus_lite_core::Model;
use eplus_lite_topology::TopologyEngine;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Loops { path: PathBuf },
    Topology { path: PathBuf, loop_name: Option<String> },
    All { path: PathBuf },
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    command: Command,
    compact: bool,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut compact = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--compact" => compact = true,
            "--help" | "-h" => {
                return Ok(Invocation {
                    command: Command::Help,
                    compact,
                })
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        ["loops", path] => Command::Loops { path: path.into() },
        ["topology", path] => Command::Topology {
            path: path.into(),
            loop_name: None,
        },
        ["topology", path, loop_name] => Command::Topology {
            path: path.into(),
            loop_name: Some(loop_name.to_string()),
        },
        ["all", path] => Command::All { path: path.into() },
        [command, ..] => bail!("unrecognised arguments for '{command}'"),
    };

    Ok(Invocation { command, compact })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  eplus-topology loops <model.epJSON> [--compact]");
    eprintln!("  eplus-topology topology <model.epJSON> [LOOP] [--compact]");
    eprintln!("  eplus-topology all <model.epJSON> [--compact]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EPLUS_SCAN_LIMIT    highest numbered field index probed (default 50)");
    eprintln!("  EPLUS_COMPACT_JSON  print single-line JSON (default false)");
    eprintln!("  RUST_LOG            log filter for stderr (default warn)");
}

fn load_model(path: &Path) -> Result<Model> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let model = Model::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot load epJSON model from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded model");
    Ok(model)
}

fn render(value: &Value, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

fn run(invocation: Invocation, config: &Config) -> Result<Option<Value>> {
    let value = match invocation.command {
        Command::Help => return Ok(None),
        Command::Loops { path } => {
            let model = load_model(&path)?;
            let catalog = TopologyEngine::with_config(&model, config.topology()).discover();
            serde_json::to_value(&catalog)?
        }
        Command::Topology { path, loop_name } => {
            let model = load_model(&path)?;
            let engine = TopologyEngine::with_config(&model, config.topology());
            let loop_name = match loop_name {
                Some(name) => name,
                None => match engine.discover().first_loop() {
                    Some(summary) => summary.name.clone(),
                    None => bail!("{} declares no loops", path.display()),
                },
            };
            let topology = engine.topology(&loop_name)?;
            serde_json::to_value(&topology)?
        }
        Command::All { path } => {
            let model = load_model(&path)?;
            let engine = TopologyEngine::with_config(&model, config.topology());
            let results = engine
                .all_topologies()
                .into_iter()
                .map(|(name, result)| match result {
                    Ok(topology) => serde_json::to_value(&topology),
                    Err(err) => Ok(json!({ "loop_name": name, "error": err.to_string() })),
                })
                .collect::<serde_json::Result<Vec<_>>>()?;
            Value::Array(results)
        }
    };
    Ok(Some(value))
}

fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("Error: {err}");
            print_usage();
            std::process::exit(2);
        }
    };
    let compact = invocation.compact || config.compact_json;

    match run(invocation, &config)? {
        Some(value) => println!("{}", render(&value, compact)?),
        None => print_usage(),
    }
    Ok(())
}
