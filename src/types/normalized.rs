use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::TokenSpan;

/// A dependency edge with 0-based token indices.
/// Serialized as `[governor, relation, dependent]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, String, usize)", into = "(usize, String, usize)")]
pub struct Dependency {
    pub governor: usize,
    pub relation: String,
    pub dependent: usize,
}

impl Dependency {
    pub fn new(governor: usize, relation: impl Into<String>, dependent: usize) -> Self {
        Self {
            governor,
            relation: relation.into(),
            dependent,
        }
    }
}

impl From<(usize, String, usize)> for Dependency {
    fn from((governor, relation, dependent): (usize, String, usize)) -> Self {
        Self::new(governor, relation, dependent)
    }
}

impl From<Dependency> for (usize, String, usize) {
    fn from(dep: Dependency) -> Self {
        (dep.governor, dep.relation, dep.dependent)
    }
}

/// A token index enriched with its word and POS tag: `[index, word, pos]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, String, String)", into = "(usize, String, String)")]
pub struct TokenRef {
    pub index: usize,
    pub word: String,
    pub pos: String,
}

impl From<(usize, String, String)> for TokenRef {
    fn from((index, word, pos): (usize, String, String)) -> Self {
        Self { index, word, pos }
    }
}

impl From<TokenRef> for (usize, String, String) {
    fn from(token: TokenRef) -> Self {
        (token.index, token.word, token.pos)
    }
}

/// A dependency edge whose endpoints carry word and POS tag.
/// Serialized as `[[i, word, pos], relation, [j, word, pos]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(TokenRef, String, TokenRef)", into = "(TokenRef, String, TokenRef)")]
pub struct EnrichedDependency {
    pub governor: TokenRef,
    pub relation: String,
    pub dependent: TokenRef,
}

impl From<(TokenRef, String, TokenRef)> for EnrichedDependency {
    fn from((governor, relation, dependent): (TokenRef, String, TokenRef)) -> Self {
        Self {
            governor,
            relation,
            dependent,
        }
    }
}

impl From<EnrichedDependency> for (TokenRef, String, TokenRef) {
    fn from(dep: EnrichedDependency) -> Self {
        (dep.governor, dep.relation, dep.dependent)
    }
}

/// Sorted, deduplicated dependency edges of one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    Plain(Vec<Dependency>),
    Enriched(Vec<EnrichedDependency>),
}

impl Dependencies {
    /// Edges as plain `(governor, relation, dependent)` index triples
    pub fn edges(&self) -> Vec<(usize, &str, usize)> {
        match self {
            Dependencies::Plain(deps) => deps
                .iter()
                .map(|d| (d.governor, d.relation.as_str(), d.dependent))
                .collect(),
            Dependencies::Enriched(deps) => deps
                .iter()
                .map(|d| (d.governor.index, d.relation.as_str(), d.dependent.index))
                .collect(),
        }
    }
}

impl Default for Dependencies {
    fn default() -> Self {
        Dependencies::Plain(Vec::new())
    }
}

/// An entity mention kept after type and pronoun filtering.
/// `link` and `entity` are filled by a later entity-linking stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub ner: String,
    pub link: Option<String>,
    pub entity: Option<String>,
}

/// Mentions keyed by their token span
pub type MentionIndex = BTreeMap<TokenSpan, MentionRecord>;

/// One normalized sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSentence {
    /// Exact substring of the input text covered by the sentence
    pub text: String,
    /// Surface forms, or lemmas when lemmatization was requested
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_tags: Option<Vec<String>>,
    #[serde(default)]
    pub dependencies: Dependencies,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ner_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<MentionIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
}

impl NormalizedSentence {
    pub fn num_tokens(&self) -> usize {
        self.words.len()
    }

    /// Look up a mention by its token boundaries
    pub fn mention(&self, start: usize, end: usize) -> Option<&MentionRecord> {
        self.mentions.as_ref()?.get(&TokenSpan::new(start, end))
    }
}

/// Normalized form of one annotated text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    pub sentences: Vec<NormalizedSentence>,
    /// Coreference chains passed through from the upstream payload untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corefs: Option<Value>,
}

impl NormalizedDocument {
    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }
}
