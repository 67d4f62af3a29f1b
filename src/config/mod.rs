//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuditConfig, CorpusConfig, EmbeddingSettings, GenerationSettings, LogFormat,
    LoggingConfig, RetrievalConfig, ServerConfig,
};
