//! Entity mention filtering and indexing

use crate::data::raw::RawMention;
use crate::engine::constants::{ACCEPTED_ENTITY_TYPES, PRONOUNS};
use crate::types::{MentionIndex, MentionRecord, TokenSpan};

/// Whether a mention survives the entity-type allowlist and pronoun filter
pub fn is_accepted(mention: &RawMention) -> bool {
    ACCEPTED_ENTITY_TYPES.contains(mention.ner_type.as_str())
        && !PRONOUNS.contains(mention.text.to_lowercase().trim())
}

/// Keep accepted mentions, preserving input order
pub fn filter_mentions(raw: &[RawMention]) -> Vec<&RawMention> {
    raw.iter().filter(|m| is_accepted(m)).collect()
}

/// Index mentions by `(start, end)`; a later mention with the same span
/// replaces an earlier one
pub fn index_mentions<'a, I>(mentions: I) -> MentionIndex
where
    I: IntoIterator<Item = &'a RawMention>,
{
    let mut index = MentionIndex::new();
    for mention in mentions {
        index.insert(
            TokenSpan::new(mention.token_start, mention.token_end),
            MentionRecord {
                start: mention.token_start,
                end: mention.token_end,
                text: mention.text.clone(),
                ner: mention.ner_type.clone(),
                link: None,
                entity: None,
            },
        );
    }
    index
}
