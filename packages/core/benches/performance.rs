//! Performance benchmarks for supergraph core operations
//!
//! Run with: `cargo bench -p supergraph-core`
//!
//! These benchmarks measure the interactive paths:
//! - Attribute aggregation of a medium flat graph
//! - Schema aggregation with a multi-level hierarchy
//! - Expand followed by retract of one supernode

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use supergraph_core::config::AggregationConfig;
use supergraph_core::models::{Graph, Link, Node, SchemaTable};
use supergraph_core::operations::{
    expand_super_network, retract_super_network, schema_graph, super_graph,
};

/// Generate a flat graph with `count` nodes spread over `groups` groups
fn generate_graph(count: usize, groups: usize) -> Graph {
    let nodes = (0..count)
        .map(|i| {
            Node::new(
                format!("nodes/{}", i),
                json!({
                    "group": format!("G{}", i % groups),
                    "class": format!("LEAF{}", i % 20),
                }),
            )
        })
        .collect();
    let links = (0..count)
        .flat_map(|i| {
            (1..=3).map(move |step| {
                Link::new(
                    format!("nodes/{}", i),
                    format!("nodes/{}", (i * 31 + step * 17) % count),
                )
            })
        })
        .collect();
    Graph::new(nodes, links)
}

fn bench_attribute_aggregation(c: &mut Criterion) {
    let flat = generate_graph(1000, 25);
    let config = AggregationConfig::default();

    c.bench_function("super_graph 1000 nodes / 25 groups", |b| {
        b.iter(|| super_graph(black_box(&flat.nodes), black_box(&flat.links), "group", &config))
    });
}

fn bench_schema_aggregation(c: &mut Criterion) {
    let flat = generate_graph(1000, 25);
    let config = AggregationConfig::default();
    let mut schema = SchemaTable::new();
    for i in 0..20 {
        schema.insert(format!("LEAF{}", i), format!("BRANCH{}", i % 5));
    }
    for i in 0..5 {
        schema.insert(format!("BRANCH{}", i), format!("TRUNK{}", i % 2));
    }
    let selected = vec!["TRUNK0".to_string(), "BRANCH1".to_string()];

    c.bench_function("schema_graph 1000 nodes / 3-level hierarchy", |b| {
        b.iter(|| {
            schema_graph(
                black_box(&flat.nodes),
                black_box(&flat.links),
                &selected,
                &schema,
                "class",
                &config,
            )
        })
    });
}

fn bench_expand_retract(c: &mut Criterion) {
    let flat = generate_graph(1000, 25);
    let collapsed = super_graph(&flat.nodes, &flat.links, "group", &AggregationConfig::default());

    c.bench_function("expand + retract one supernode", |b| {
        b.iter(|| {
            let expanded = expand_super_network(
                &flat.nodes,
                &flat.links,
                &collapsed.nodes,
                &collapsed.links,
                black_box("supernodes/G7"),
            )
            .unwrap();
            retract_super_network(
                &flat.nodes,
                &expanded.nodes,
                &expanded.links,
                "supernodes/G7",
            )
        })
    });
}

criterion_group!(
    benches,
    bench_attribute_aggregation,
    bench_schema_aggregation,
    bench_expand_retract
);
criterion_main!(benches);
