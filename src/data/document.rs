//! Odinson document export for graph-indexing consumers

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{NormalizedDocument, NormalizedSentence};

/// Represents a complete document with metadata and sentences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub metadata: Vec<String>,
    pub sentences: Vec<Sentence>,
}

/// Represents a single sentence with its fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "numTokens")]
    pub num_tokens: u32,
    pub fields: Vec<Field>,
}

/// Represents a field in a sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Field {
    #[serde(rename = "ai.lum.odinson.TokensField")]
    TokensField {
        name: String,
        tokens: Vec<String>,
    },
    #[serde(rename = "ai.lum.odinson.GraphField")]
    GraphField {
        name: String,
        edges: Vec<(u32, u32, String)>, // (from, to, relation)
        roots: Vec<u32>,
    },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::TokensField { name, .. } | Field::GraphField { name, .. } => name,
        }
    }
}

impl Document {
    /// Convert a normalized document into Odinson fields, one sentence per
    /// normalized sentence
    pub fn from_normalized(id: impl Into<String>, doc: &NormalizedDocument) -> Result<Self> {
        let sentences = doc
            .sentences
            .iter()
            .enumerate()
            .map(|(idx, sentence)| {
                Sentence::from_normalized(sentence)
                    .map_err(|e| anyhow!("Sentence {}: {}", idx, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: id.into(),
            metadata: Vec::new(),
            sentences,
        })
    }

    /// Get a specific field by name from a sentence
    pub fn get_field(&self, sentence_idx: usize, field_name: &str) -> Option<&Field> {
        self.sentences
            .get(sentence_idx)?
            .fields
            .iter()
            .find(|field| field.name() == field_name)
    }

    /// Get tokens from a specific field
    pub fn get_tokens(&self, sentence_idx: usize, field_name: &str) -> Option<&[String]> {
        match self.get_field(sentence_idx, field_name)? {
            Field::TokensField { tokens, .. } => Some(tokens),
            _ => None,
        }
    }
}

impl Sentence {
    /// Fails when a token index does not fit Odinson's `u32` indices
    pub fn from_normalized(sentence: &NormalizedSentence) -> Result<Self> {
        let mut fields = vec![tokens_field("word", &sentence.words)];
        let optional = [
            ("lemma", &sentence.lemmas),
            ("tag", &sentence.pos_tags),
            ("entity", &sentence.ner_tags),
        ];
        for (name, tokens) in optional {
            if let Some(tokens) = tokens {
                fields.push(tokens_field(name, tokens));
            }
        }

        let edges = sentence
            .dependencies
            .edges()
            .into_iter()
            .map(|(from, rel, to)| -> Result<(u32, u32, String)> {
                Ok((token_index(from)?, token_index(to)?, rel.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        // Root edges were dropped during normalization, so roots are the
        // tokens that take part in the graph without a governor.
        let governed: HashSet<u32> = edges.iter().map(|(_, to, _)| *to).collect();
        let mut roots: Vec<u32> = edges
            .iter()
            .map(|(from, _, _)| *from)
            .filter(|from| !governed.contains(from))
            .collect();
        roots.sort_unstable();
        roots.dedup();

        fields.push(Field::GraphField {
            name: "dependencies".to_string(),
            edges,
            roots,
        });

        Ok(Self {
            num_tokens: token_index(sentence.num_tokens())?,
            fields,
        })
    }
}

fn token_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| anyhow!("Token index {} exceeds u32 range", index))
}

fn tokens_field(name: &str, tokens: &[String]) -> Field {
    Field::TokensField {
        name: name.to_string(),
        tokens: tokens.to_vec(),
    }
}
