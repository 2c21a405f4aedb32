pub mod error;
pub mod types;
pub mod data;
pub mod engine;
pub mod api;

pub use error::NormalizeError;
pub use engine::{normalize_document, write_documents, AnnotationNormalizer, Annotator, AnnotatorSet, NormalizerConfig};
pub use types::{Dependencies, Dependency, MentionRecord, NormalizedDocument, NormalizedSentence, TokenSpan};
pub use data::{AnnotatedText, PayloadParser, RawDocument, RawSentence};
pub use api::{start_server, ApiConfig};
