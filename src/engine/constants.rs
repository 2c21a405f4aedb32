//! Annotator names and the fixed lookup sets used for mention filtering

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const ANNOTATOR_TOKENIZE: &str = "tokenize";
pub const ANNOTATOR_SSPLIT: &str = "ssplit";
pub const ANNOTATOR_POS: &str = "pos";
pub const ANNOTATOR_LEMMA: &str = "lemma";
pub const ANNOTATOR_NER: &str = "ner";
pub const ANNOTATOR_PARSE: &str = "parse";
pub const ANNOTATOR_COREF: &str = "coref";

/// Annotators requested when the caller names none
pub const DEFAULT_ANNOTATORS: [&str; 6] = [
    ANNOTATOR_TOKENIZE,
    ANNOTATOR_SSPLIT,
    ANNOTATOR_POS,
    ANNOTATOR_LEMMA,
    ANNOTATOR_NER,
    ANNOTATOR_COREF,
];

/// Relation label of the synthetic root edge
pub const ROOT_RELATION: &str = "ROOT";

/// Entity types whose mentions are kept
pub static ACCEPTED_ENTITY_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "CITY",
        "ORGANIZATION",
        "COUNTRY",
        "STATE_OR_PROVINCE",
        "LOCATION",
        "NATIONALITY",
        "PERSON",
    ]
    .into_iter()
    .collect()
});

/// Mention texts dropped as pronouns. Membership is exact; both "i" and "I"
/// and both "themself" and "themselves" are listed on purpose.
pub static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "I", "me", "my", "mine", "myself",
        "we", "us", "our", "ours", "ourselves",
        "you", "your", "yours",
        "yourself", "yourselves",
        "he", "him", "his", "himself",
        "she", "her", "hers", "herself",
        "it", "its", "itself",
        "they", "them", "their", "theirs", "themself", "themselves",
    ]
    .into_iter()
    .collect()
});
