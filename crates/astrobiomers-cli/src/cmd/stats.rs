//! `astrobiomers stats` - query the graph and print node/edge counts by
//! kind/type (§6 "CLI commands").

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use neo4rs::query;

use astrobiomers_graph::{GraphConfig, GraphLoader};
use astrobiomers_model::{EntityKind, RelationType};
use astrobiomers_pipeline::config::EnvConfig;

#[derive(Args, Debug)]
pub struct StatsArgs {}

pub async fn run(_args: StatsArgs, env: &EnvConfig) -> Result<()> {
    let config = GraphConfig::new(env.graph_uri.clone(), env.graph_user.clone(), env.graph_password.clone(), env.graph_database.clone());
    let loader = GraphLoader::connect(&config).await?;
    let graph = loader.graph();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Count"]);

    table.add_row(vec!["Paper".to_string(), count_nodes(graph, "Paper").await?.to_string()]);
    for kind in EntityKind::all() {
        let label = kind.node_label();
        table.add_row(vec![label.to_string(), count_nodes(graph, label).await?.to_string()]);
    }
    table.add_row(vec!["Topic".to_string(), count_nodes(graph, "Topic").await?.to_string()]);

    println!("{table}");

    let mut edges = Table::new();
    edges.load_preset(UTF8_FULL);
    edges.set_header(vec!["Edge type", "Count"]);
    edges.add_row(vec!["MENTIONS".to_string(), count_rel(graph, "MENTIONS").await?.to_string()]);
    edges.add_row(vec!["HAS_TOPIC".to_string(), count_rel(graph, "HAS_TOPIC").await?.to_string()]);
    for rel in RelationType::all() {
        let rel_type = rel.as_str();
        edges.add_row(vec![rel_type.to_string(), count_rel(graph, rel_type).await?.to_string()]);
    }

    println!("{edges}");

    Ok(())
}

async fn count_nodes(graph: &neo4rs::Graph, label: &str) -> Result<i64> {
    let q = query(&format!("MATCH (n:{label}) RETURN count(n) AS c"));
    let mut result = graph.execute(q).await?;
    match result.next().await? {
        Some(row) => Ok(row.get::<i64>("c").unwrap_or(0)),
        None => Ok(0),
    }
}

async fn count_rel(graph: &neo4rs::Graph, rel_type: &str) -> Result<i64> {
    let q = query(&format!("MATCH ()-[r:{rel_type}]->() RETURN count(r) AS c"));
    let mut result = graph.execute(q).await?;
    match result.next().await? {
        Some(row) => Ok(row.get::<i64>("c").unwrap_or(0)),
        None => Ok(0),
    }
}
