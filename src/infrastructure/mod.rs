//! Infrastructure layer - External service implementations

pub mod audit;
pub mod corpus;
pub mod embedding;
pub mod generation;
pub mod http_client;
pub mod ingestion;
pub mod logging;
pub mod observability;
pub mod services;
