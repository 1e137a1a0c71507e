//! `astrobiomers status` - report readiness (§6 "CLI commands").

use anyhow::Result;
use clap::Args;

use astrobiomers_graph::{GraphConfig, GraphLoader};
use astrobiomers_pipeline::config::EnvConfig;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, env: &EnvConfig) -> Result<()> {
    println!("config:");
    println!("  data_dir:      {}", env.data_dir);
    println!("  batch_size:    {}", env.batch_size);
    println!("  use_gpu:       {}", env.use_gpu);
    println!("  resolution:    {}", if env.resolution_enabled { "enabled" } else { "demo mode" });
    println!("  alignment:     {}", if env.alignment_enabled { "enabled" } else { "demo mode" });

    let config = GraphConfig::new(env.graph_uri.clone(), env.graph_user.clone(), env.graph_password.clone(), env.graph_database.clone());
    print!("graph ({}): ", env.graph_uri);
    match GraphLoader::connect(&config).await {
        Ok(_) => println!("reachable"),
        Err(e) => println!("unreachable ({e})"),
    }

    Ok(())
}
