//! Flat key/value deployment configuration (§6 "Configuration"), parsed
//! with `dotenvy`'s line parser.

use std::collections::HashMap;
use std::path::Path;

use astrobiomers_core::ConfigError;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub data_dir: String,
    pub pubmed_email: String,
    pub pubmed_api_key: Option<String>,
    pub graph_uri: String,
    pub graph_user: String,
    pub graph_password: String,
    pub graph_database: String,
    pub entity_confidence_threshold: f64,
    pub relation_confidence_threshold: f64,
    pub topic_min_corpus: usize,
    pub batch_size: usize,
    pub use_gpu: bool,
    pub resolution_enabled: bool,
    pub alignment_enabled: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            pubmed_email: String::new(),
            pubmed_api_key: None,
            graph_uri: "bolt://localhost:7687".to_string(),
            graph_user: "neo4j".to_string(),
            graph_password: String::new(),
            graph_database: "neo4j".to_string(),
            entity_confidence_threshold: 0.75,
            relation_confidence_threshold: 0.70,
            topic_min_corpus: 100,
            batch_size: 500,
            use_gpu: false,
            resolution_enabled: false,
            alignment_enabled: false,
        }
    }
}

impl EnvConfig {
    /// Loads `path` (if it exists) as `KEY=VALUE` lines, falling back to
    /// already-set process environment variables, then to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut values: HashMap<String, String> = HashMap::new();

        if path.exists() {
            for item in dotenvy::from_path_iter(path).map_err(|e| ConfigError::Unreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            })? {
                let (key, value) = item.map_err(|e| ConfigError::Unreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                values.insert(key, value);
            }
        }

        let lookup = |key: &str| -> Option<String> {
            values.get(key).cloned().or_else(|| std::env::var(key).ok())
        };

        let mut config = Self::default();

        if let Some(v) = lookup("DATA_DIR") {
            config.data_dir = v;
        }
        if let Some(v) = lookup("PUBMED_EMAIL") {
            config.pubmed_email = v;
        }
        config.pubmed_api_key = lookup("PUBMED_API_KEY");
        if let Some(v) = lookup("GRAPH_URI") {
            config.graph_uri = v;
        }
        if let Some(v) = lookup("GRAPH_USER") {
            config.graph_user = v;
        }
        if let Some(v) = lookup("GRAPH_PASSWORD") {
            config.graph_password = v;
        }
        if let Some(v) = lookup("GRAPH_DATABASE") {
            config.graph_database = v;
        }
        if let Some(v) = lookup("ENTITY_CONFIDENCE_THRESHOLD") {
            config.entity_confidence_threshold = parse_f64("ENTITY_CONFIDENCE_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("RELATION_CONFIDENCE_THRESHOLD") {
            config.relation_confidence_threshold = parse_f64("RELATION_CONFIDENCE_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("TOPIC_MIN_CORPUS") {
            config.topic_min_corpus = parse_usize("TOPIC_MIN_CORPUS", &v)?;
        }
        if let Some(v) = lookup("BATCH_SIZE") {
            config.batch_size = parse_usize("BATCH_SIZE", &v)?;
        }
        if let Some(v) = lookup("USE_GPU") {
            config.use_gpu = parse_bool("USE_GPU", &v)?;
        }
        if let Some(v) = lookup("RESOLUTION_ENABLED") {
            config.resolution_enabled = parse_bool("RESOLUTION_ENABLED", &v)?;
        }
        if let Some(v) = lookup("ALIGNMENT_ENABLED") {
            config.alignment_enabled = parse_bool("ALIGNMENT_ENABLED", &v)?;
        }

        Ok(config)
    }

    /// §4.8/§4.7 "demo mode": disabled unless both resolution and alignment
    /// are explicitly turned on.
    pub fn demo_mode(&self) -> bool {
        !(self.resolution_enabled || self.alignment_enabled)
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = EnvConfig::load(Path::new("/nonexistent/path/.env")).unwrap();
        assert_eq!(config.batch_size, 500);
        assert!(config.demo_mode());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "BATCH_SIZE=250").unwrap();
        writeln!(f, "RESOLUTION_ENABLED=true").unwrap();
        drop(f);

        let config = EnvConfig::load(&path).unwrap();
        assert_eq!(config.batch_size, 250);
        assert!(config.resolution_enabled);
        assert!(!config.demo_mode());
    }

    #[test]
    fn invalid_numeric_value_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "BATCH_SIZE=not-a-number\n").unwrap();
        assert!(EnvConfig::load(&path).is_err());
    }

    #[test]
    fn both_resolution_and_alignment_disabled_is_demo_mode() {
        let config = EnvConfig::default();
        assert!(config.demo_mode());
    }
}
