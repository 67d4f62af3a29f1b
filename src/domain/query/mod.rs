//! Query preprocessing

mod normalizer;

pub use normalizer::{QueryConfig, QueryNormalizer};
