//! Errors raised while normalizing a raw annotation payload.
//!
//! Every variant carries the index of the offending sentence so callers can
//! point at the exact record in the upstream payload. Absent optional
//! analyses (POS, lemmas, NER, parse) are never errors; they simply leave
//! the corresponding output field out.

use thiserror::Error;

/// Errors that can occur while normalizing a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("sentence {sentence}: missing 'tokens' field")]
    MissingTokens { sentence: usize },

    #[error("sentence {sentence}: missing '{field}' on a non-empty token list")]
    MissingOffset { sentence: usize, field: &'static str },

    #[error("sentence {sentence}: token {token} is missing '{field}'")]
    MissingTokenField {
        sentence: usize,
        token: usize,
        field: &'static str,
    },

    #[error("sentence {sentence}: character span {begin}..{end} is outside the input text ({len} chars)")]
    SpanOutOfBounds {
        sentence: usize,
        begin: usize,
        end: usize,
        len: usize,
    },

    #[error("sentence {sentence}: dependency {governor}->{dependent} is out of range (token count: {tokens})")]
    DependencyOutOfRange {
        sentence: usize,
        governor: usize,
        dependent: usize,
        tokens: usize,
    },
}

impl NormalizeError {
    /// Index of the sentence that failed to normalize
    pub fn sentence(&self) -> usize {
        match self {
            NormalizeError::MissingTokens { sentence }
            | NormalizeError::MissingOffset { sentence, .. }
            | NormalizeError::MissingTokenField { sentence, .. }
            | NormalizeError::SpanOutOfBounds { sentence, .. }
            | NormalizeError::DependencyOutOfRange { sentence, .. } => *sentence,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
