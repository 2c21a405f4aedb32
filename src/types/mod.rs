pub mod span;
pub mod normalized;

pub use span::TokenSpan;
pub use normalized::{
    Dependencies, Dependency, EnrichedDependency, MentionIndex, MentionRecord,
    NormalizedDocument, NormalizedSentence, TokenRef,
};
