//! Annotator vocabulary and the requested-annotator set

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::engine::constants::*;

/// Analysis passes of the annotation service that affect the normalized output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Annotator {
    Tokenize,
    Ssplit,
    Pos,
    Lemma,
    Ner,
    Parse,
    Coref,
}

impl Annotator {
    pub const ALL: [Annotator; 7] = [
        Annotator::Tokenize,
        Annotator::Ssplit,
        Annotator::Pos,
        Annotator::Lemma,
        Annotator::Ner,
        Annotator::Parse,
        Annotator::Coref,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Annotator::Tokenize => ANNOTATOR_TOKENIZE,
            Annotator::Ssplit => ANNOTATOR_SSPLIT,
            Annotator::Pos => ANNOTATOR_POS,
            Annotator::Lemma => ANNOTATOR_LEMMA,
            Annotator::Ner => ANNOTATOR_NER,
            Annotator::Parse => ANNOTATOR_PARSE,
            Annotator::Coref => ANNOTATOR_COREF,
        }
    }
}

impl fmt::Display for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annotator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Annotator::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown annotator: {}", s))
    }
}

/// Names of the annotators requested from the service.
///
/// Membership is all that matters; order and duplicates are irrelevant.
/// Names outside the known vocabulary are kept verbatim and simply produce
/// no output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotatorSet {
    names: BTreeSet<String>,
}

impl AnnotatorSet {
    /// Parse a comma-separated list such as `"tokenize,ssplit,pos"`
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn has(&self, annotator: Annotator) -> bool {
        self.names.contains(annotator.as_str())
    }

    /// Requested names that have no meaning to the normalizer
    pub fn unknown(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| name.parse::<Annotator>().is_err())
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for AnnotatorSet {
    fn default() -> Self {
        DEFAULT_ANNOTATORS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AnnotatorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for AnnotatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        f.write_str(&names.join(","))
    }
}
