//! Annotation normalization engine
//!
//! This module is organized into the following submodules:
//! - `constants`: Annotator names and the entity-type / pronoun lookup sets
//! - `annotators`: Annotator vocabulary and requested-annotator sets
//! - `config`: YAML configuration (NormalizerConfig)
//! - `dependencies`: Dependency edge extraction, dedup and enrichment
//! - `mentions`: Entity mention filtering and indexing
//! - `normalizer`: AnnotationNormalizer, span recovery, parse normalization
//! - `batch`: Parallel normalization of many records and JSON array output

pub mod annotators;
pub mod batch;
pub mod config;
pub mod constants;
pub mod dependencies;
pub mod mentions;
pub mod normalizer;

// Re-export main types for convenience
pub use annotators::{Annotator, AnnotatorSet};
pub use batch::write_documents;
pub use config::NormalizerConfig;
pub use normalizer::{normalize_document, normalize_parse, recover_span, AnnotationNormalizer};
