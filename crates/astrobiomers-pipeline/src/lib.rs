//! Astrobiomers Pipeline - the orchestrator (§4.1).
//!
//! Sequences the eight stages through a working directory of JSON
//! artifacts, skipping a stage when its flag is set or its output is
//! already fresh relative to its input (§4.1 "Algorithm"), and halting only
//! on `ConfigError`, `FatalError`, or a stage producing zero outputs from a
//! non-empty input (§7 "Propagation policy").

pub mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use astrobiomers_acquisition::{AcquisitionConfig, Source};
use astrobiomers_core::{atomic_write_json, is_shutdown_requested, is_stale, read_json, FatalError, Lockfile};
use astrobiomers_enrich::EnrichConfig;
use astrobiomers_graph::{GraphConfig, GraphLoader};
use astrobiomers_model::{
    AlignedEntitiesArtifact, ExtractedEntitiesArtifact, ExtractedRelationshipsArtifact, Mention,
    Paper, PipelineResults, PipelineStatus, PreprocessedPaper, PreprocessedPapersArtifact,
    RawPapersArtifact, Relation, ResolvedEntitiesArtifact, StageReport, TopicsArtifact, Totals,
};
use astrobiomers_ner::{Ensemble, NerConfig};
use astrobiomers_relation::RelationConfig;
use astrobiomers_topics::TopicConfig;

use config::EnvConfig;

#[derive(Debug, Clone, Default)]
pub struct SkipFlags {
    pub acquisition: bool,
    pub preprocess: bool,
    pub ner: bool,
    pub relation: bool,
    pub topics: bool,
    pub resolution: bool,
    pub alignment: bool,
    pub graph: bool,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sources: Vec<Source>,
    pub max_papers: usize,
    pub output_dir: PathBuf,
    pub load_graph: bool,
    pub skip: SkipFlags,
    pub curated_manifest_url: String,
    pub pubmed_query: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sources: vec![Source::Curated],
            max_papers: 100,
            output_dir: PathBuf::from("./data"),
            load_graph: false,
            skip: SkipFlags::default(),
            curated_manifest_url: String::new(),
            pubmed_query: "spaceflight AND microgravity".to_string(),
        }
    }
}

struct Run<'a> {
    env: &'a EnvConfig,
    options: &'a RunOptions,
    client: &'a reqwest::Client,
    stages: Vec<StageReport>,
}

impl<'a> Run<'a> {
    fn path(&self, filename: &str) -> PathBuf {
        self.options.output_dir.join(filename)
    }

    fn record(&mut self, stage: &str, started: Instant, input_count: usize, output_count: usize, error: Option<String>) {
        let duration_ms = started.elapsed().as_millis() as u64;
        log::info!("{stage}: {input_count} in, {output_count} out ({duration_ms}ms)");
        self.stages.push(StageReport { stage: stage.to_string(), duration_ms, input_count, output_count, error });
    }

    fn write_artifact<T: serde::Serialize>(&self, path: &Path, value: &T) {
        if let Err(e) = atomic_write_json(path, value) {
            log::warn!("failed to persist {}: {e}", path.display());
        }
    }
}

/// Runs the full pipeline and returns the structured report written to
/// `pipeline_results.json` (§6 "Persisted artifacts").
pub async fn run(env: &EnvConfig, options: &RunOptions, client: &reqwest::Client) -> Result<PipelineResults, FatalError> {
    std::fs::create_dir_all(&options.output_dir).map_err(|e| FatalError::DatabaseUnreachable(format!("cannot create output dir: {e}")))?;
    let _lock = Lockfile::acquire(&options.output_dir).map_err(|e| FatalError::LockHeld(e.to_string()))?;

    let mut run = Run { env, options, client, stages: Vec::new() };

    let result = run_stages(&mut run).await;

    let status = if result.is_ok() { PipelineStatus::Complete } else { PipelineStatus::Failed };
    let totals = result.as_ref().map(|t| t.clone()).unwrap_or_default();
    let results = PipelineResults { status, stages: run.stages.clone(), totals };

    run.write_artifact(&run.path("pipeline_results.json"), &results);

    match result {
        Ok(_) => Ok(results),
        Err(e) => Err(e),
    }
}

async fn run_stages(run: &mut Run<'_>) -> Result<Totals, FatalError> {
    let papers = stage_acquisition(run).await?;
    bail_if_shutdown()?;

    let preprocessed = stage_preprocess(run, &papers)?;
    bail_if_shutdown()?;

    let mentions = stage_ner(run, &preprocessed)?;
    bail_if_shutdown()?;

    let relations = stage_relation(run, &preprocessed, &mentions)?;
    bail_if_shutdown()?;

    let topics_artifact = stage_topics(run, &preprocessed)?;
    bail_if_shutdown()?;

    let resolved = stage_resolution(run, mentions).await?;
    bail_if_shutdown()?;

    let aligned = stage_alignment(run, resolved).await?;
    bail_if_shutdown()?;

    if run.options.load_graph && !run.options.skip.graph {
        stage_graph(run, &papers, &preprocessed, &aligned, &relations, &topics_artifact).await?;
    }

    Ok(build_totals(&papers, &aligned, &relations, &topics_artifact))
}

fn bail_if_shutdown() -> Result<(), FatalError> {
    if is_shutdown_requested() {
        return Err(FatalError::ShutdownRequested);
    }
    Ok(())
}

fn check_empty_output(stage: &str, input_count: usize, output_count: usize) -> Result<(), FatalError> {
    if input_count > 0 && output_count == 0 {
        return Err(FatalError::EmptyStageOutput { stage: stage.to_string(), input_count });
    }
    Ok(())
}

async fn stage_acquisition(run: &mut Run<'_>) -> Result<Vec<Paper>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("raw_papers.json");

    if run.options.skip.acquisition && output_path.exists() {
        let artifact: RawPapersArtifact = read_json(&output_path).unwrap_or_default();
        run.record("acquisition", started, 0, artifact.papers.len(), None);
        return Ok(artifact.papers);
    }

    let config = AcquisitionConfig {
        sources: run.options.sources.clone(),
        max_papers: run.options.max_papers,
        curated_manifest_url: run.options.curated_manifest_url.clone(),
        pubmed_query: run.options.pubmed_query.clone(),
        pubmed_api_key: run.env.pubmed_api_key.clone(),
    };

    // AcquisitionError is contained per-source (§7 propagation policy); a
    // failure here means every configured source was unavailable, not that
    // the pipeline should halt.
    let papers = match astrobiomers_acquisition::acquire(run.client, &config).await {
        Ok(papers) => papers,
        Err(e) => {
            log::warn!("acquisition produced no papers: {e}");
            run.record("acquisition", started, 0, 0, Some(e.to_string()));
            Vec::new()
        }
    };

    run.write_artifact(&output_path, &RawPapersArtifact { papers: papers.clone() });
    run.record("acquisition", started, 0, papers.len(), None);
    Ok(papers)
}

fn stage_preprocess(run: &mut Run<'_>, papers: &[Paper]) -> Result<Vec<PreprocessedPaper>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("preprocessed_papers.json");
    let input_path = run.path("raw_papers.json");

    if (run.options.skip.preprocess || !is_stale(&output_path, &[&input_path])) && output_path.exists() {
        let artifact: PreprocessedPapersArtifact = read_json(&output_path).unwrap_or_default();
        run.record("preprocess", started, papers.len(), artifact.papers.len(), None);
        return Ok(artifact.papers);
    }

    let preprocessed = astrobiomers_preprocess::preprocess_papers(papers);
    check_empty_output("preprocess", papers.len(), preprocessed.len())?;
    run.write_artifact(&output_path, &PreprocessedPapersArtifact { papers: preprocessed.clone() });
    run.record("preprocess", started, papers.len(), preprocessed.len(), None);
    Ok(preprocessed)
}

fn stage_ner(run: &mut Run<'_>, preprocessed: &[PreprocessedPaper]) -> Result<Vec<Mention>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("extracted_entities.json");
    let input_path = run.path("preprocessed_papers.json");

    if (run.options.skip.ner || !is_stale(&output_path, &[&input_path])) && output_path.exists() {
        let artifact: ExtractedEntitiesArtifact = read_json(&output_path).unwrap_or_default();
        run.record("ner", started, preprocessed.len(), artifact.mentions.len(), None);
        return Ok(artifact.mentions);
    }

    let ensemble = Ensemble::new(NerConfig { confidence_threshold: run.env.entity_confidence_threshold, use_secondary: true });
    let mentions = astrobiomers_ner::extract_mentions(preprocessed, &ensemble);
    check_empty_output("ner", preprocessed.len(), mentions.len())?;
    run.write_artifact(&output_path, &ExtractedEntitiesArtifact { mentions: mentions.clone() });
    run.record("ner", started, preprocessed.len(), mentions.len(), None);
    Ok(mentions)
}

fn stage_relation(run: &mut Run<'_>, preprocessed: &[PreprocessedPaper], mentions: &[Mention]) -> Result<Vec<Relation>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("extracted_relationships.json");
    let input_path = run.path("extracted_entities.json");

    if (run.options.skip.relation || !is_stale(&output_path, &[&input_path])) && output_path.exists() {
        let artifact: ExtractedRelationshipsArtifact = read_json(&output_path).unwrap_or_default();
        run.record("relation", started, mentions.len(), artifact.relations.len(), None);
        return Ok(artifact.relations);
    }

    let config = RelationConfig { confidence_floor: run.env.relation_confidence_threshold };
    let relations = astrobiomers_relation::extract_relations(preprocessed, mentions, &config);
    check_empty_output("relation", mentions.len(), relations.len())?;
    run.write_artifact(&output_path, &ExtractedRelationshipsArtifact { relations: relations.clone() });
    run.record("relation", started, mentions.len(), relations.len(), None);
    Ok(relations)
}

fn stage_topics(run: &mut Run<'_>, preprocessed: &[PreprocessedPaper]) -> Result<TopicsArtifact, FatalError> {
    let started = Instant::now();
    let output_path = run.path("topics.json");
    let input_path = run.path("preprocessed_papers.json");

    if (run.options.skip.topics || !is_stale(&output_path, &[&input_path])) && output_path.exists() {
        let artifact: TopicsArtifact = read_json(&output_path).unwrap_or_default();
        run.record("topics", started, preprocessed.len(), artifact.topics.len(), None);
        return Ok(artifact);
    }

    let config = TopicConfig { min_corpus: run.env.topic_min_corpus, ..TopicConfig::default() };
    let artifact = astrobiomers_topics::run_topics(preprocessed, &config);
    run.write_artifact(&output_path, &artifact);
    run.record("topics", started, preprocessed.len(), artifact.topics.len(), None);
    Ok(artifact)
}

async fn stage_resolution(run: &mut Run<'_>, mut mentions: Vec<Mention>) -> Result<Vec<Mention>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("resolved_entities.json");

    if run.options.skip.resolution && output_path.exists() {
        let artifact: ResolvedEntitiesArtifact = read_json(&output_path).unwrap_or_default();
        run.record("resolution", started, mentions.len(), artifact.mentions.len(), None);
        return Ok(artifact.mentions);
    }

    let config = EnrichConfig { demo_mode: !run.env.resolution_enabled, cache_dir: PathBuf::from(&run.env.data_dir).join(".cache") };
    let input_count = mentions.len();
    astrobiomers_enrich::run_resolution(&mut mentions, run.client, &config).await;
    check_empty_output("resolution", input_count, mentions.len())?;
    run.write_artifact(&output_path, &ResolvedEntitiesArtifact { mentions: mentions.clone() });
    run.record("resolution", started, mentions.len(), mentions.len(), None);
    Ok(mentions)
}

async fn stage_alignment(run: &mut Run<'_>, mut mentions: Vec<Mention>) -> Result<Vec<Mention>, FatalError> {
    let started = Instant::now();
    let output_path = run.path("aligned_entities.json");

    if run.options.skip.alignment && output_path.exists() {
        let artifact: AlignedEntitiesArtifact = read_json(&output_path).unwrap_or_default();
        run.record("alignment", started, mentions.len(), artifact.mentions.len(), None);
        return Ok(artifact.mentions);
    }

    let config = EnrichConfig { demo_mode: !run.env.alignment_enabled, cache_dir: PathBuf::from(&run.env.data_dir).join(".cache") };
    let input_count = mentions.len();
    astrobiomers_enrich::run_alignment(&mut mentions, run.client, &config).await;
    check_empty_output("alignment", input_count, mentions.len())?;
    run.write_artifact(&output_path, &AlignedEntitiesArtifact { mentions: mentions.clone() });
    run.record("alignment", started, mentions.len(), mentions.len(), None);
    Ok(mentions)
}

async fn stage_graph(
    run: &mut Run<'_>,
    papers: &[Paper],
    preprocessed: &[PreprocessedPaper],
    mentions: &[Mention],
    relations: &[Relation],
    topics: &TopicsArtifact,
) -> Result<(), FatalError> {
    let started = Instant::now();

    let graph_config = GraphConfig::new(&run.env.graph_uri, &run.env.graph_user, &run.env.graph_password, &run.env.graph_database);
    let loader = GraphLoader::connect(&graph_config)
        .await
        .map_err(|e| FatalError::DatabaseUnreachable(e.to_string()))?;
    loader.init_schema().await.map_err(|e| FatalError::DatabaseUnreachable(e.to_string()))?;

    let report = loader.load(papers, preprocessed, mentions, relations, &topics.topics, &topics.assignments).await;
    let written = report.papers_written + report.entities_written + report.relation_edges_written;
    let error = (report.batches_failed > 0).then(|| format!("{} batches failed, {} records skipped", report.batches_failed, report.records_failed));
    run.stages.push(StageReport {
        stage: "graph".to_string(),
        duration_ms: started.elapsed().as_millis() as u64,
        input_count: papers.len(),
        output_count: written,
        error,
    });
    Ok(())
}

fn build_totals(papers: &[Paper], mentions: &[Mention], relations: &[Relation], topics: &TopicsArtifact) -> Totals {
    let mut entities_by_kind = std::collections::HashMap::new();
    for m in mentions {
        *entities_by_kind.entry(m.kind.as_str().to_string()).or_insert(0) += 1;
    }
    let mut relations_by_type = std::collections::HashMap::new();
    for r in relations {
        *relations_by_type.entry(r.relation_type.as_str().to_string()).or_insert(0) += 1;
    }
    Totals { papers: papers.len(), entities_by_kind, relations_by_type, topics: topics.topics.len() }
}

pub fn status_path(output_dir: &Path) -> PathBuf {
    output_dir.join("pipeline_results.json")
}
