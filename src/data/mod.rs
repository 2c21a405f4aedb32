pub mod raw;
pub mod parser;
pub mod document;

pub use raw::{AnnotatedText, RawDependency, RawDocument, RawMention, RawSentence, RawToken};
pub use parser::PayloadParser;
pub use document::{Document, Field, Sentence};
