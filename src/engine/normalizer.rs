//! Raw annotation payload in, normalized document out.
//!
//! `AnnotationNormalizer` is stateless apart from the set of annotators the
//! payload was requested with. Sentences are processed independently and in
//! order; the first malformed sentence aborts the whole document.

use once_cell::sync::Lazy;
use regex::Regex;
use std::iter;

use crate::data::raw::{AnnotatedText, RawDocument, RawSentence, RawToken};
use crate::engine::annotators::{Annotator, AnnotatorSet};
use crate::engine::dependencies::{enrich_dependencies, extract_dependencies};
use crate::engine::mentions::{filter_mentions, index_mentions};
use crate::error::{NormalizeError, Result};
use crate::types::{Dependencies, NormalizedDocument, NormalizedSentence};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalizes raw payloads produced with a given set of annotators
#[derive(Debug, Clone, Default)]
pub struct AnnotationNormalizer {
    annotators: AnnotatorSet,
}

impl AnnotationNormalizer {
    pub fn new(annotators: AnnotatorSet) -> Self {
        Self { annotators }
    }

    pub fn annotators(&self) -> &AnnotatorSet {
        &self.annotators
    }

    /// Normalize every sentence of `raw`, preserving order, and attach the
    /// coreference chains when `coref` was requested
    pub fn normalize_document(&self, raw: &RawDocument, text: &str) -> Result<NormalizedDocument> {
        let boundaries = CharBoundaries::new(text);
        let sentences = raw
            .sentences
            .iter()
            .enumerate()
            .map(|(idx, sentence)| self.normalize_sentence_in(sentence, &boundaries, idx))
            .collect::<Result<Vec<_>>>()?;

        let corefs = if self.annotators.has(Annotator::Coref) {
            if raw.corefs.is_none() {
                log::warn!("coref requested but payload has no 'corefs'");
            }
            raw.corefs.clone()
        } else {
            None
        };

        log::debug!(
            "Normalized {} sentence(s), corefs attached: {}",
            sentences.len(),
            corefs.is_some()
        );

        Ok(NormalizedDocument { sentences, corefs })
    }

    pub fn normalize_annotated(&self, annotated: &AnnotatedText) -> Result<NormalizedDocument> {
        self.normalize_document(&annotated.annotation, &annotated.text)
    }

    /// Normalize one sentence; `index` is its position in the document and
    /// is only used for error reporting
    pub fn normalize_sentence(
        &self,
        raw: &RawSentence,
        text: &str,
        index: usize,
    ) -> Result<NormalizedSentence> {
        self.normalize_sentence_in(raw, &CharBoundaries::new(text), index)
    }

    fn normalize_sentence_in(
        &self,
        raw: &RawSentence,
        boundaries: &CharBoundaries<'_>,
        index: usize,
    ) -> Result<NormalizedSentence> {
        let tokens = raw
            .tokens
            .as_deref()
            .ok_or(NormalizeError::MissingTokens { sentence: index })?;

        let span = recover_span_in(tokens, boundaries, index)?;

        let surface = tokens
            .iter()
            .enumerate()
            .map(|(token, t)| {
                t.word.clone().ok_or(NormalizeError::MissingTokenField {
                    sentence: index,
                    token,
                    field: "word",
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = extract_dependencies(raw.dependencies.as_deref().unwrap_or(&[]), tokens.len(), index)?;

        let pos_tags = self.token_field(Annotator::Pos, tokens, index, |t| t.pos.as_ref());
        let dependencies = match &pos_tags {
            Some(tags) => Dependencies::Enriched(enrich_dependencies(edges, &surface, tags)),
            None => Dependencies::Plain(edges),
        };

        let lemmas = self.token_field(Annotator::Lemma, tokens, index, |t| t.lemma.as_ref());
        let words = lemmas.clone().unwrap_or(surface);

        let (ner_tags, mentions) = if self.annotators.has(Annotator::Ner) {
            let ner_tags = self.token_field(Annotator::Ner, tokens, index, |t| t.ner.as_ref());
            let mentions = match &raw.entity_mentions {
                Some(raw_mentions) => Some(index_mentions(filter_mentions(raw_mentions))),
                None => {
                    log::warn!("sentence {}: ner requested but payload has no 'entitymentions'", index);
                    None
                }
            };
            (ner_tags, mentions)
        } else {
            (None, None)
        };

        let parse = if self.annotators.has(Annotator::Parse) {
            if raw.parse_string.is_none() {
                log::warn!("sentence {}: parse requested but payload has no 'parse'", index);
            }
            raw.parse_string.as_deref().map(normalize_parse)
        } else {
            None
        };

        Ok(NormalizedSentence {
            text: span,
            words,
            lemmas,
            pos_tags,
            dependencies,
            ner_tags,
            mentions,
            parse,
        })
    }

    /// Collect a per-token field when its annotator was requested. If any
    /// token lacks the value, the whole field is left out.
    fn token_field<F>(
        &self,
        annotator: Annotator,
        tokens: &[RawToken],
        index: usize,
        field: F,
    ) -> Option<Vec<String>>
    where
        F: Fn(&RawToken) -> Option<&String>,
    {
        if !self.annotators.has(annotator) {
            return None;
        }
        let values: Option<Vec<String>> = tokens.iter().map(|t| field(t).cloned()).collect();
        if values.is_none() {
            log::warn!(
                "sentence {}: {} requested but some tokens have no value; omitting field",
                index,
                annotator
            );
        }
        values
    }
}

/// Normalize `raw` with the given annotators
pub fn normalize_document(
    raw: &RawDocument,
    text: &str,
    annotators: &AnnotatorSet,
) -> Result<NormalizedDocument> {
    AnnotationNormalizer::new(annotators.clone()).normalize_document(raw, text)
}

/// Exact substring of `text` covered by the sentence's tokens, from the
/// first token's begin offset to the last token's end offset. Offsets count
/// characters, not bytes. An empty token list yields an empty string.
pub fn recover_span(tokens: &[RawToken], text: &str, sentence: usize) -> Result<String> {
    recover_span_in(tokens, &CharBoundaries::new(text), sentence)
}

fn recover_span_in(tokens: &[RawToken], boundaries: &CharBoundaries<'_>, sentence: usize) -> Result<String> {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(String::new()),
    };

    let begin = first.character_offset_begin.ok_or(NormalizeError::MissingOffset {
        sentence,
        field: "characterOffsetBegin",
    })?;
    let end = last.character_offset_end.ok_or(NormalizeError::MissingOffset {
        sentence,
        field: "characterOffsetEnd",
    })?;

    boundaries
        .slice(begin, end)
        .map(str::to_string)
        .ok_or(NormalizeError::SpanOutOfBounds {
            sentence,
            begin,
            end,
            len: boundaries.num_chars(),
        })
}

/// Byte position of every character boundary of a text, end included.
/// Built once per document so span recovery never rescans the text.
#[derive(Debug, Clone)]
pub struct CharBoundaries<'a> {
    text: &'a str,
    bytes: Vec<usize>,
}

impl<'a> CharBoundaries<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(iter::once(text.len()))
            .collect();
        Self { text, bytes }
    }

    pub fn num_chars(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Substring covering characters `[begin, end)`
    pub fn slice(&self, begin: usize, end: usize) -> Option<&'a str> {
        if begin > end {
            return None;
        }
        let begin_byte = *self.bytes.get(begin)?;
        let end_byte = *self.bytes.get(end)?;
        self.text.get(begin_byte..end_byte)
    }
}

/// Collapse every whitespace run, newlines included, to a single space
pub fn normalize_parse(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::raw::{RawDependency, RawMention};
    use crate::types::{Dependency, TokenSpan};
    use serde_json::json;

    const TEXT: &str = "Barack Obama met he in Paris.";

    fn token(word: &str, begin: usize, end: usize) -> RawToken {
        RawToken {
            word: Some(word.to_string()),
            pos: Some(format!("P{}", word.len())),
            lemma: Some(word.to_lowercase()),
            ner: Some("O".to_string()),
            character_offset_begin: Some(begin),
            character_offset_end: Some(end),
        }
    }

    fn sentence() -> RawSentence {
        RawSentence {
            tokens: Some(vec![
                token("Barack", 0, 6),
                token("Obama", 7, 12),
                token("met", 13, 16),
                token("he", 17, 19),
                token("in", 20, 22),
                token("Paris", 23, 28),
                token(".", 28, 29),
            ]),
            dependencies: Some(vec![
                RawDependency { relation: "ROOT".into(), governor: 0, dependent: 3 },
                RawDependency { relation: "nsubj".into(), governor: 3, dependent: 2 },
                RawDependency { relation: "compound".into(), governor: 2, dependent: 1 },
                RawDependency { relation: "obl:in".into(), governor: 3, dependent: 6 },
                RawDependency { relation: "nsubj".into(), governor: 3, dependent: 2 },
            ]),
            entity_mentions: Some(vec![
                RawMention { token_start: 0, token_end: 2, text: "Barack Obama".into(), ner_type: "PERSON".into() },
                RawMention { token_start: 3, token_end: 4, text: "he".into(), ner_type: "PERSON".into() },
                RawMention { token_start: 5, token_end: 6, text: "Paris".into(), ner_type: "CITY".into() },
            ]),
            parse_string: Some("(ROOT\n  (S  (NP)))".to_string()),
        }
    }

    fn normalizer(list: &str) -> AnnotationNormalizer {
        AnnotationNormalizer::new(AnnotatorSet::parse_list(list))
    }

    #[test]
    fn test_recover_span() {
        let tokens = sentence().tokens.unwrap();
        assert_eq!(recover_span(&tokens, TEXT, 0).unwrap(), TEXT);
        assert_eq!(recover_span(&tokens[1..3], TEXT, 0).unwrap(), "Obama met");
        assert_eq!(recover_span(&[], TEXT, 0).unwrap(), "");
    }

    #[test]
    fn test_recover_span_counts_characters() {
        let text = "Café Müller öffnet.";
        let tokens = vec![token("Café", 0, 4), token("Müller", 5, 11)];
        assert_eq!(recover_span(&tokens, text, 0).unwrap(), "Café Müller");
        let tail = vec![token(".", 18, 19)];
        assert_eq!(recover_span(&tail, text, 0).unwrap(), ".");
    }

    #[test]
    fn test_recover_span_errors() {
        let mut tokens = vec![token("Hi", 0, 2)];
        tokens[0].character_offset_end = None;
        assert_eq!(
            recover_span(&tokens, "Hi", 5).unwrap_err(),
            NormalizeError::MissingOffset { sentence: 5, field: "characterOffsetEnd" }
        );
        let tokens = vec![token("Hi", 0, 10)];
        assert!(matches!(
            recover_span(&tokens, "Hi", 0).unwrap_err(),
            NormalizeError::SpanOutOfBounds { len: 2, .. }
        ));
    }

    #[test]
    fn test_char_boundaries() {
        let boundaries = CharBoundaries::new("naïve café");
        assert_eq!(boundaries.num_chars(), 10);
        assert_eq!(boundaries.slice(0, 5), Some("naïve"));
        assert_eq!(boundaries.slice(6, 10), Some("café"));
        assert_eq!(boundaries.slice(10, 10), Some(""));
        assert_eq!(boundaries.slice(6, 11), None);
        assert_eq!(boundaries.slice(5, 4), None);

        let empty = CharBoundaries::new("");
        assert_eq!(empty.num_chars(), 0);
        assert_eq!(empty.slice(0, 0), Some(""));
    }

    #[test]
    fn test_many_sentences_share_one_text() {
        let text: String = (0..500).map(|i| format!("Ünit {}. ", i % 10)).collect();
        let sentences = (0..500)
            .map(|i| {
                let begin = i * 8;
                RawSentence {
                    tokens: Some(vec![token("Ünit", begin, begin + 4), token(".", begin + 6, begin + 7)]),
                    ..RawSentence::default()
                }
            })
            .collect();
        let raw = RawDocument { sentences, corefs: None };
        let doc = normalizer("tokenize").normalize_document(&raw, &text).unwrap();
        assert_eq!(doc.sentences.len(), 500);
        assert_eq!(doc.sentences[0].text, "Ünit 0.");
        assert_eq!(doc.sentences[499].text, "Ünit 9.");
    }

    #[test]
    fn test_normalize_parse() {
        assert_eq!(normalize_parse("(ROOT\n  (S  (NP)))"), "(ROOT (S (NP)))");
        assert_eq!(normalize_parse("(A\t\r\n(B))"), "(A (B))");
    }

    #[test]
    fn test_tokenize_only_leaves_optional_fields_out() {
        let out = normalizer("tokenize,ssplit").normalize_sentence(&sentence(), TEXT, 0).unwrap();
        assert_eq!(out.text, TEXT);
        assert_eq!(out.words[0], "Barack");
        assert!(out.pos_tags.is_none());
        assert!(out.lemmas.is_none());
        assert!(out.ner_tags.is_none());
        assert!(out.mentions.is_none());
        assert!(out.parse.is_none());
        assert_eq!(
            out.dependencies,
            Dependencies::Plain(vec![
                Dependency::new(1, "compound", 0),
                Dependency::new(2, "nsubj", 1),
                Dependency::new(2, "obl:in", 5),
            ])
        );

        let value = serde_json::to_value(&out).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["posTags", "nerTags", "mentions", "parse", "lemmas"] {
            assert!(!obj.contains_key(key), "unexpected key {}", key);
        }
    }

    #[test]
    fn test_pos_enriches_dependencies_with_surface_words() {
        let out = normalizer("tokenize,ssplit,pos,lemma").normalize_sentence(&sentence(), TEXT, 0).unwrap();
        assert_eq!(out.words[0], "barack");
        assert_eq!(out.lemmas.as_ref().unwrap()[1], "obama");
        assert_eq!(out.pos_tags.as_ref().unwrap().len(), 7);
        let value = serde_json::to_value(&out.dependencies).unwrap();
        assert_eq!(value[0], json!([[1, "Obama", "P5"], "compound", [0, "Barack", "P6"]]));
    }

    #[test]
    fn test_ner_filters_and_indexes_mentions() {
        let out = normalizer("tokenize,ssplit,ner").normalize_sentence(&sentence(), TEXT, 0).unwrap();
        assert_eq!(out.ner_tags.as_ref().unwrap().len(), out.words.len());
        let mentions = out.mentions.as_ref().unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(out.mention(0, 2).unwrap().text, "Barack Obama");
        assert!(mentions.get(&TokenSpan::new(3, 4)).is_none());
        assert_eq!(out.mention(5, 6).unwrap().ner, "CITY");
    }

    #[test]
    fn test_parse_requested() {
        let out = normalizer("tokenize,parse").normalize_sentence(&sentence(), TEXT, 0).unwrap();
        assert_eq!(out.parse.as_deref(), Some("(ROOT (S (NP)))"));
    }

    #[test]
    fn test_requested_but_absent_fields_are_omitted() {
        let mut raw = sentence();
        raw.entity_mentions = None;
        raw.parse_string = None;
        raw.dependencies = None;
        if let Some(tokens) = raw.tokens.as_mut() {
            tokens[2].pos = None;
        }
        let out = normalizer("tokenize,pos,ner,parse").normalize_sentence(&raw, TEXT, 0).unwrap();
        assert!(out.pos_tags.is_none());
        assert!(out.mentions.is_none());
        assert!(out.parse.is_none());
        assert!(out.ner_tags.is_some());
        assert_eq!(out.dependencies, Dependencies::Plain(vec![]));
    }

    #[test]
    fn test_malformed_sentence_reports_index() {
        let raw = RawDocument {
            sentences: vec![sentence(), RawSentence::default()],
            corefs: None,
        };
        let err = normalizer("tokenize").normalize_document(&raw, TEXT).unwrap_err();
        assert_eq!(err, NormalizeError::MissingTokens { sentence: 1 });
        assert_eq!(err.sentence(), 1);
    }

    #[test]
    fn test_missing_word_is_malformed() {
        let mut raw = sentence();
        if let Some(tokens) = raw.tokens.as_mut() {
            tokens[4].word = None;
        }
        assert_eq!(
            normalizer("tokenize").normalize_sentence(&raw, TEXT, 2).unwrap_err(),
            NormalizeError::MissingTokenField { sentence: 2, token: 4, field: "word" }
        );
    }

    #[test]
    fn test_corefs_attached_only_when_requested() {
        let raw = RawDocument {
            sentences: vec![sentence()],
            corefs: Some(json!({"1": [{"id": 1, "text": "Barack Obama"}]})),
        };
        let with = normalize_document(&raw, TEXT, &AnnotatorSet::parse_list("tokenize,coref")).unwrap();
        assert_eq!(with.corefs, raw.corefs);

        let without = normalize_document(&raw, TEXT, &AnnotatorSet::parse_list("tokenize")).unwrap();
        assert!(without.corefs.is_none());
        assert!(serde_json::to_value(&without).unwrap().get("corefs").is_none());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let raw = RawDocument {
            sentences: vec![sentence(), sentence()],
            corefs: None,
        };
        let n = normalizer("tokenize,ssplit,pos,ner");
        let first = n.normalize_document(&raw, TEXT).unwrap();
        let second = n.normalize_document(&raw, TEXT).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
