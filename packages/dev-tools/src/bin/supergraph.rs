//! Development CLI for the supergraph engine
//!
//! Runs one aggregation operation over JSON files and prints the resulting
//! graph to stdout. Handy for reproducing what the matrix view receives
//! without starting the frontend.
//!
//! # Usage
//!
//! ```bash
//! supergraph attribute <graph.json> <attribute>
//! supergraph schema <graph.json> <schema.json> <label_field> <label>...
//! supergraph expand <flat.json> <aggregated.json> <supernode_id>
//! supergraph retract <flat.json> <aggregated.json> <supernode_id>
//! ```
//!
//! # Configuration
//!
//! Uses the `SUPERGRAPH_CONFIG` environment variable as the path to a JSON
//! `AggregationConfig`; defaults apply when it is not set. Log verbosity
//! follows `RUST_LOG` (default `supergraph=info,supergraph_core=info`).

use anyhow::{bail, Context};
use std::path::Path;
use supergraph_core::{AggregationConfig, Graph, GraphAggregationService, SchemaTable};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  supergraph attribute <graph.json> <attribute>
  supergraph schema <graph.json> <schema.json> <label_field> <label>...
  supergraph expand <flat.json> <aggregated.json> <supernode_id>
  supergraph retract <flat.json> <aggregated.json> <supernode_id>";

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supergraph=info,supergraph_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let service = GraphAggregationService::new(load_config()?)?;

    let graph = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["attribute", graph, attribute] => {
            let flat = read_graph(graph)?;
            service.build_attribute_supergraph(&flat, attribute)?
        }
        ["schema", graph, schema, label_field, labels @ ..] if !labels.is_empty() => {
            let flat = read_graph(graph)?;
            let schema: SchemaTable = serde_json::from_str(&read(schema)?)
                .with_context(|| format!("parsing schema table {}", schema))?;
            let labels: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
            service.build_schema_supergraph(&flat, &labels, &schema, label_field)?
        }
        [command @ ("expand" | "retract"), flat, aggregated, supernode_id] => {
            let flat = read_graph(flat)?;
            let aggregated = read_graph(aggregated)?;
            let toggled = if *command == "expand" {
                service.expand(&flat, &aggregated, supernode_id)?
            } else {
                service.retract(&flat, &aggregated, supernode_id)?
            };
            toggled.unwrap_or_else(|| {
                tracing::warn!("No supernode '{}', graph unchanged", supernode_id);
                aggregated
            })
        }
        _ => bail!("{}", USAGE),
    };

    println!("{}", graph.to_json_string()?);
    Ok(())
}

fn load_config() -> anyhow::Result<AggregationConfig> {
    match std::env::var("SUPERGRAPH_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            AggregationConfig::from_json_file(&path)
                .with_context(|| format!("loading config {}", path))
        }
        Err(_) => Ok(AggregationConfig::default()),
    }
}

fn read(path: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("reading {}", path))
}

fn read_graph(path: &str) -> anyhow::Result<Graph> {
    Graph::from_json_str(&read(path)?).with_context(|| format!("parsing graph {}", path))
}
