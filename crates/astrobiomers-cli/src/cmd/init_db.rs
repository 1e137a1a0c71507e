//! `astrobiomers init-db` - create constraints and indexes, idempotent
//! (§6 "CLI commands", §4.9a).

use anyhow::Result;

use astrobiomers_graph::{GraphConfig, GraphLoader};
use astrobiomers_pipeline::config::EnvConfig;

pub async fn run(env: &EnvConfig) -> Result<()> {
    let config = GraphConfig::new(env.graph_uri.clone(), env.graph_user.clone(), env.graph_password.clone(), env.graph_database.clone());
    let loader = GraphLoader::connect(&config).await?;
    loader.init_schema().await?;
    println!("schema initialized on database {}", env.graph_database);
    Ok(())
}
