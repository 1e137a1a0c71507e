//! Astrobiomers Graph - stage 8, the terminal graph load (§4.9).
//!
//! `Entity` is never an independent pipeline artifact (§2, §3): this crate
//! aggregates the `Mention` records carried out of stages 3/6/7 into
//! `Entity` nodes itself, then writes Paper/Entity/Topic nodes and their
//! edges in fixed-size batches, each inside its own transaction so a batch
//! failure rolls back only that batch (§4.9 "Error semantics").

pub mod aggregate;
pub mod schema;
pub mod upsert;

use astrobiomers_core::LoaderError;
use astrobiomers_model::{Mention, Paper, PreprocessedPaper, Relation, Topic};
use neo4rs::{ConfigBuilder, Graph};

const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub batch_size: usize,
}

impl GraphConfig {
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>, database: impl Into<String>) -> Self {
        Self { uri: uri.into(), user: user.into(), password: password.into(), database: database.into(), batch_size: DEFAULT_BATCH_SIZE }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub papers_written: usize,
    pub entities_written: usize,
    pub mention_edges_written: usize,
    pub relation_edges_written: usize,
    pub topics_written: usize,
    pub has_topic_edges_written: usize,
    pub batches_failed: usize,
    pub records_failed: usize,
}

pub struct GraphLoader {
    graph: Graph,
    batch_size: usize,
}

impl GraphLoader {
    /// Connects with the database name applied on the connection itself, so
    /// a misconfigured name fails loudly instead of silently falling back
    /// to the server default (§4.9 "Database selection").
    pub async fn connect(config: &GraphConfig) -> Result<Self, LoaderError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .build()
            .map_err(|e| LoaderError::Unreachable { database: config.database.clone(), message: e.to_string() })?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| LoaderError::Unreachable { database: config.database.clone(), message: e.to_string() })?;

        Ok(Self { graph, batch_size: config.batch_size.max(1) })
    }

    pub async fn init_schema(&self) -> Result<(), LoaderError> {
        schema::init_schema(&self.graph).await
    }

    /// The underlying connection, for ad hoc queries (`stats`, `status`)
    /// that don't warrant a dedicated loader method.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Writes papers, aggregated entities, their MENTIONS edges, typed
    /// relation edges, topics, and HAS_TOPIC edges, in that order, each
    /// group batched independently (§4.9).
    pub async fn load(
        &self,
        papers: &[Paper],
        preprocessed: &[PreprocessedPaper],
        mentions: &[Mention],
        relations: &[Relation],
        topics: &[Topic],
        topic_assignments: &std::collections::HashMap<String, i64>,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for batch in papers.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().filter_map(|p| match upsert::upsert_paper(p) {
                Ok(q) => Some(q),
                Err(e) => {
                    log::warn!("skipping paper with invalid key: {e}");
                    None
                }
            }).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.papers_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        let (entities, mention_edges) = aggregate::aggregate_entities(mentions);

        for batch in entities.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().filter_map(|e| match upsert::upsert_entity(e) {
                Ok(q) => Some(q),
                Err(e) => {
                    log::warn!("skipping entity with invalid key: {e}");
                    None
                }
            }).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.entities_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        for batch in mention_edges.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().map(upsert::upsert_mention_edge).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.mention_edges_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        for batch in relations.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().map(upsert::upsert_relation_edge).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.relation_edges_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        for batch in topics.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().map(upsert::upsert_topic).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.topics_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        let has_topic: Vec<_> = preprocessed
            .iter()
            .filter_map(|p| topic_assignments.get(&p.paper_id).map(|t| (p.paper_id.clone(), *t)))
            .filter(|(_, topic_id)| *topic_id != astrobiomers_model::UNASSIGNED_TOPIC_ID)
            .collect();

        for batch in has_topic.chunks(self.batch_size) {
            let queries: Vec<_> = batch.iter().map(|(paper_id, topic_id)| upsert::upsert_has_topic_edge(paper_id, *topic_id)).collect();
            let written = queries.len();
            if self.run_batch(queries).await {
                report.has_topic_edges_written += written;
            } else {
                report.batches_failed += 1;
                report.records_failed += written;
            }
        }

        report
    }

    /// Runs one batch inside its own transaction; a failure rolls back only
    /// this batch (§4.9 "a batch failure rolls back only that batch's
    /// transaction; other batches in the run are unaffected").
    async fn run_batch(&self, queries: Vec<neo4rs::Query>) -> bool {
        if queries.is_empty() {
            return true;
        }

        let mut txn = match self.graph.start_txn().await {
            Ok(txn) => txn,
            Err(e) => {
                log::warn!("failed to start transaction: {e}");
                return false;
            }
        };

        for q in queries {
            if let Err(e) = txn.run(q).await {
                log::warn!("batch query failed, rolling back: {e}");
                let _ = txn.rollback().await;
                return false;
            }
        }

        match txn.commit().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("batch commit failed: {e}");
                false
            }
        }
    }
}
