use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::embedding::EmbedderConfig;
use crate::domain::gate::GateConfig;
use crate::domain::ingestion::ChunkingConfig;
use crate::domain::query::QueryConfig;
use crate::domain::retrieval::KeywordHint;
use crate::domain::DomainError;
use crate::infrastructure::observability::MetricsConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Embedding service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Root of an OpenAI-compatible API
    pub base_url: String,
    pub model: String,
    /// Vector dimension D shared by every chunk and query
    pub dimensions: usize,
    /// Environment variable holding the API key; unset means no auth header
    pub api_key_env: String,
    pub timeout_ms: u64,
    /// Embedding calls in flight during an index build
    pub max_concurrency: usize,
    pub max_retries: u32,
}

/// Answer generation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub system_prompt: String,
    pub max_context_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub min_similarity: f32,
    pub hints: Vec<KeywordHint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub directory: PathBuf,
    pub corpus_id: String,
    /// Seconds between background rebuilds; 0 disables them
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// JSON-lines file to append to; without one exchanges are only logged
    pub path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_ms: 10_000,
            max_concurrency: 8,
            max_retries: 1,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_ms: 30_000,
            system_prompt: "Answer the customer's question using only the provided knowledge. \
                            Keep replies short and friendly."
                .to_string(),
            max_context_chars: 12_000,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            min_similarity: 0.5,
            hints: Vec::new(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("corpus"),
            corpus_id: String::new(),
            refresh_interval_secs: 0,
        }
    }
}

fn read_api_key(env_var: &str) -> Option<String> {
    if env_var.is_empty() {
        return None;
    }
    std::env::var(env_var).ok().filter(|key| !key.is_empty())
}

impl EmbeddingSettings {
    pub fn embedder_config(&self) -> EmbedderConfig {
        EmbedderConfig {
            model: self.model.clone(),
            dimensions: self.dimensions,
            timeout: self.timeout(),
            max_retries: self.max_retries,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn api_key(&self) -> Option<String> {
        read_api_key(&self.api_key_env)
    }
}

impl GenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn api_key(&self) -> Option<String> {
        read_api_key(&self.api_key_env)
    }
}

impl CorpusConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the pipeline cannot run with. Called before serving.
    pub fn validate(&self) -> Result<(), DomainError> {
        // Re-checked here for configs assembled in code
        ChunkingConfig::new(self.chunking.chunk_size(), self.chunking.chunk_overlap())?;

        if self.retrieval.top_k == 0 {
            return Err(DomainError::invalid_configuration("retrieval.top_k must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.retrieval.min_similarity) {
            return Err(DomainError::invalid_configuration(format!(
                "retrieval.min_similarity must be within [0, 1], got {}",
                self.retrieval.min_similarity
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(DomainError::invalid_configuration(
                "embedding.dimensions must be greater than 0",
            ));
        }

        if self.embedding.max_concurrency == 0 {
            return Err(DomainError::invalid_configuration(
                "embedding.max_concurrency must be at least 1",
            ));
        }

        if self.embedding.timeout_ms == 0 || self.generation.timeout_ms == 0 {
            return Err(DomainError::invalid_configuration("timeouts must be greater than 0"));
        }

        self.gate.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gate::ExclusivePair;

    fn from_json(json: &str) -> Result<AppConfig, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.chunking.chunk_size(), 800);
        assert_eq!(config.chunking.chunk_overlap(), 100);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.retrieval.min_similarity, 0.5);
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.embedding.max_concurrency, 8);
        assert_eq!(config.generation.max_context_chars, 12_000);
        assert_eq!(config.corpus.refresh_interval(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = from_json(
            r#"{
                "retrieval": { "top_k": 6 },
                "chunking": { "chunk_size": 400 },
                "gate": { "exclusive_terms": [{ "first": "RUKVEST", "second": "RUKSAK" }] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.retrieval.top_k, 6);
        assert_eq!(config.retrieval.min_similarity, 0.5);
        assert_eq!(config.chunking.chunk_size(), 400);
        assert_eq!(config.chunking.chunk_overlap(), 100);
        assert_eq!(config.gate.exclusive_terms.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_not_below_size_fails_to_load() {
        let result = from_json(r#"{ "chunking": { "chunk_size": 100, "chunk_overlap": 100 } }"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.retrieval.min_similarity = -0.1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.embedding.dimensions = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.embedding.max_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.gate.exclusive_terms = vec![ExclusivePair::new("X", "x")];
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_embedder_config_conversion() {
        let settings = EmbeddingSettings {
            timeout_ms: 250,
            ..Default::default()
        };

        let embedder = settings.embedder_config();

        assert_eq!(embedder.timeout, Duration::from_millis(250));
        assert_eq!(embedder.dimensions, 1536);
    }

    #[test]
    fn test_refresh_interval() {
        let corpus = CorpusConfig {
            refresh_interval_secs: 30,
            ..Default::default()
        };

        assert_eq!(corpus.refresh_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_missing_api_key_env() {
        let settings = EmbeddingSettings {
            api_key_env: "RAG_GATE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };

        assert_eq!(settings.api_key(), None);
    }
}
