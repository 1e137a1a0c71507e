//! `astrobiomers acquire-curated` - run only the acquisition stage
//! (§6 "CLI commands").

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use astrobiomers_acquisition::{AcquisitionConfig, Source};
use astrobiomers_core::atomic_write_json;
use astrobiomers_model::RawPapersArtifact;
use astrobiomers_pipeline::config::EnvConfig;

#[derive(Args, Debug)]
pub struct AcquireCuratedArgs {
    /// Maximum number of papers to acquire
    #[arg(long, default_value_t = 100)]
    pub papers: usize,

    /// Directory for pipeline artifacts
    #[arg(long, default_value = "./data")]
    pub output_dir: PathBuf,
}

pub async fn run(args: AcquireCuratedArgs, env: &EnvConfig) -> Result<()> {
    std::fs::create_dir_all(&args.output_dir)?;

    let config = AcquisitionConfig {
        sources: vec![Source::Curated],
        max_papers: args.papers,
        curated_manifest_url: String::new(),
        pubmed_query: "spaceflight AND microgravity".to_string(),
        pubmed_api_key: env.pubmed_api_key.clone(),
    };

    let client = reqwest::Client::new();
    let papers = astrobiomers_acquisition::acquire(&client, &config).await?;

    println!("acquired {} papers", papers.len());

    let path = args.output_dir.join("raw_papers.json");
    atomic_write_json(&path, &RawPapersArtifact { papers })?;
    println!("wrote {}", path.display());

    Ok(())
}
