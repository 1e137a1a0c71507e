//! `astrobiomers build` - run the pipeline (§4.1, §6).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use astrobiomers_acquisition::Source;
use astrobiomers_core::is_stale;
use astrobiomers_pipeline::config::EnvConfig;
use astrobiomers_pipeline::{RunOptions, SkipFlags};

const STAGE_ARTIFACTS: &[(&str, &str, &str)] = &[
    ("acquisition", "raw_papers.json", "raw_papers.json"),
    ("preprocess", "preprocessed_papers.json", "raw_papers.json"),
    ("ner", "extracted_entities.json", "preprocessed_papers.json"),
    ("relation", "extracted_relationships.json", "extracted_entities.json"),
    ("topics", "topics.json", "preprocessed_papers.json"),
    ("resolution", "resolved_entities.json", "extracted_entities.json"),
    ("alignment", "aligned_entities.json", "resolved_entities.json"),
];

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Maximum number of papers to acquire
    #[arg(long, default_value_t = 100)]
    pub papers: usize,

    /// Include the curated manifest source
    #[arg(long)]
    pub use_curated: bool,

    /// Include the PubMed search source
    #[arg(long)]
    pub use_pubmed: bool,

    /// Load results into the graph database
    #[arg(long, conflicts_with = "skip_graph")]
    pub load_graph: bool,

    /// Skip the graph load stage even if otherwise configured
    #[arg(long, conflicts_with = "load_graph")]
    pub skip_graph: bool,

    /// Directory for pipeline artifacts
    #[arg(long, default_value = "./data")]
    pub output_dir: PathBuf,

    /// Show the stage execution plan without running anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: BuildArgs, env: &EnvConfig) -> Result<()> {
    let mut sources = Vec::new();
    if args.use_curated || !args.use_pubmed {
        sources.push(Source::Curated);
    }
    if args.use_pubmed {
        sources.push(Source::PubmedSearch);
    }

    let options = RunOptions {
        sources,
        max_papers: args.papers,
        output_dir: args.output_dir.clone(),
        load_graph: args.load_graph,
        skip: SkipFlags { graph: args.skip_graph, ..SkipFlags::default() },
        curated_manifest_url: String::new(),
        pubmed_query: "spaceflight AND microgravity".to_string(),
    };

    if args.dry_run {
        print_dry_run(&options);
        return Ok(());
    }

    let client = reqwest::Client::new();
    let results = astrobiomers_pipeline::run(env, &options, &client).await?;

    println!("status: {:?}", results.status);
    for stage in &results.stages {
        println!("  {:<12} {:>6} in  {:>6} out  {:>6}ms{}", stage.stage, stage.input_count, stage.output_count, stage.duration_ms, stage.error.as_deref().map(|e| format!("  ERROR: {e}")).unwrap_or_default());
    }

    if results.status != astrobiomers_model::PipelineStatus::Complete {
        anyhow::bail!("pipeline did not complete successfully");
    }

    Ok(())
}

fn print_dry_run(options: &RunOptions) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stage", "Output", "Plan"]);

    for (name, output, input) in STAGE_ARTIFACTS {
        let output_path = options.output_dir.join(output);
        let input_path = options.output_dir.join(input);
        let status = if output_path.exists() && !is_stale(&output_path, &[input_path.as_path()]) {
            Cell::new("cached").fg(Color::Green)
        } else {
            Cell::new("run").fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(name), Cell::new(output), status]);
    }

    table.add_row(vec![
        Cell::new("graph"),
        Cell::new("(neo4j)"),
        if options.load_graph { Cell::new("run").fg(Color::Yellow) } else { Cell::new("skipped").fg(Color::DarkGrey) },
    ]);

    println!("{table}");
}
