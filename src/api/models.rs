use serde::{Deserialize, Serialize};

use crate::data::raw::RawDocument;
use crate::types::NormalizedDocument;

/// Request model for normalizing one annotated text
#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    /// The text the payload was produced from
    pub text: String,
    /// Raw CoreNLP payload for `text`
    pub annotation: RawDocument,
    /// Annotators the payload was requested with (server default if omitted)
    #[serde(default)]
    pub annotators: Option<Vec<String>>,
}

/// Response model for a normalized document
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    /// Normalization duration in seconds
    pub duration: f32,
    /// Number of sentences in the document
    pub sentence_count: usize,
    /// Annotators used to interpret the payload
    pub annotators: Vec<String>,
    /// The normalized document
    pub document: NormalizedDocument,
}

/// Error response model
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error type
    pub error_type: String,
    /// Index of the malformed sentence, when the payload was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
}

/// Annotator vocabulary response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotatorsResponse {
    /// Annotator names that affect the normalized output
    pub supported: Vec<String>,
    /// Annotators assumed when a request names none
    pub default: Vec<String>,
}
