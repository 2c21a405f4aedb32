//! Raw CoreNLP JSON payload, as returned by the annotation service.
//!
//! Every analysis-specific field is optional: a field is only present when
//! the corresponding annotator ran, and its absence is not an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One token of a raw sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToken {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub lemma: Option<String>,
    #[serde(default)]
    pub ner: Option<String>,
    #[serde(default)]
    pub character_offset_begin: Option<usize>,
    #[serde(default)]
    pub character_offset_end: Option<usize>,
}

/// A dependency edge with 1-based indices; governor 0 is the synthetic root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDependency {
    #[serde(rename = "dep")]
    pub relation: String,
    pub governor: usize,
    pub dependent: usize,
}

/// An entity mention spanning `[tokenBegin, tokenEnd)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMention {
    #[serde(rename = "tokenBegin")]
    pub token_start: usize,
    #[serde(rename = "tokenEnd")]
    pub token_end: usize,
    pub text: String,
    #[serde(rename = "ner")]
    pub ner_type: String,
}

/// One sentence of a raw payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSentence {
    #[serde(default)]
    pub tokens: Option<Vec<RawToken>>,
    #[serde(
        rename = "enhancedPlusPlusDependencies",
        alias = "enhancedDependencies",
        default
    )]
    pub dependencies: Option<Vec<RawDependency>>,
    #[serde(rename = "entitymentions", default)]
    pub entity_mentions: Option<Vec<RawMention>>,
    #[serde(rename = "parse", default)]
    pub parse_string: Option<String>,
}

/// A complete raw payload for one text span
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub sentences: Vec<RawSentence>,
    #[serde(default)]
    pub corefs: Option<Value>,
}

/// A raw payload bundled with the text it was produced from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    pub annotation: RawDocument,
}
