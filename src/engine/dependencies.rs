//! Dependency edge extraction: root filtering, re-indexing, dedup and sort

use std::collections::HashSet;

use crate::data::raw::RawDependency;
use crate::engine::constants::ROOT_RELATION;
use crate::error::{NormalizeError, Result};
use crate::types::{Dependency, EnrichedDependency, TokenRef};

/// Convert raw 1-based edges into sorted, deduplicated 0-based triples.
///
/// Edges labelled `ROOT` are dropped. Dedup is keyed on the full
/// `(governor, relation, dependent)` triple, so two different relations
/// between the same pair of tokens both survive. The result is sorted by
/// `(governor, dependent)`; triples sharing that pair keep a stable order
/// by relation label.
pub fn extract_dependencies(
    raw: &[RawDependency],
    num_tokens: usize,
    sentence: usize,
) -> Result<Vec<Dependency>> {
    let mut unique = HashSet::new();

    for relation in raw {
        if relation.relation == ROOT_RELATION {
            continue;
        }
        let (governor, dependent) = match (
            to_token_index(relation.governor, num_tokens),
            to_token_index(relation.dependent, num_tokens),
        ) {
            (Some(g), Some(d)) => (g, d),
            _ => {
                return Err(NormalizeError::DependencyOutOfRange {
                    sentence,
                    governor: relation.governor,
                    dependent: relation.dependent,
                    tokens: num_tokens,
                })
            }
        };
        unique.insert(Dependency::new(governor, relation.relation.as_str(), dependent));
    }

    let mut dependencies: Vec<Dependency> = unique.into_iter().collect();
    dependencies.sort_by(|a, b| {
        (a.governor, a.dependent, &a.relation).cmp(&(b.governor, b.dependent, &b.relation))
    });
    Ok(dependencies)
}

/// 1-based raw index to 0-based token index, if it names a real token
fn to_token_index(raw_index: usize, num_tokens: usize) -> Option<usize> {
    raw_index.checked_sub(1).filter(|&i| i < num_tokens)
}

/// Attach word and POS tag to both endpoints of each edge.
/// Must run after sorting so ordering stays on the integer indices.
pub fn enrich_dependencies(
    dependencies: Vec<Dependency>,
    words: &[String],
    pos_tags: &[String],
) -> Vec<EnrichedDependency> {
    let token = |index: usize| TokenRef {
        index,
        word: words[index].clone(),
        pos: pos_tags[index].clone(),
    };

    dependencies
        .into_iter()
        .map(|dep| EnrichedDependency {
            governor: token(dep.governor),
            relation: dep.relation,
            dependent: token(dep.dependent),
        })
        .collect()
}
