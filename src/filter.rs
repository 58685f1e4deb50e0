// 🔎 Filter Engine
//
// Two predicates per record, text and type. When `invert` is set each
// predicate is negated on its own and the results are ANDed; this is not
// the same as negating the combined expression. A blank text query always
// holds and is never negated. The type predicate is always negated, so
// inverting with nothing selected hides every record.

use crate::catalog::Catalog;
use crate::entities::Pokemon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current filter inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Free text, matched against name and decimal id
    pub text: String,

    /// Selected type labels (empty = no type constraint)
    pub types: BTreeSet<String>,

    /// Negate each predicate individually
    pub invert: bool,
}

impl FilterQuery {
    pub fn new(text: impl Into<String>) -> Self {
        FilterQuery {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }

    /// Inclusion test for a single record, `needle` already trimmed and lowercased
    fn matches(&self, pokemon: &Pokemon, needle: &str) -> bool {
        let text = needle.is_empty() || text_matches(pokemon, needle) != self.invert;
        let types = (self.types.is_empty() || types_match(pokemon, &self.types)) != self.invert;
        text && types
    }
}

/// Needle is a substring of the name or of the decimal id
fn text_matches(pokemon: &Pokemon, needle: &str) -> bool {
    pokemon.name.contains(needle) || pokemon.id.to_string().contains(needle)
}

/// Any selected label is on the record
fn types_match(pokemon: &Pokemon, selected: &BTreeSet<String>) -> bool {
    selected.iter().any(|t| pokemon.has_type(t))
}

/// Records matching `query`, in catalog order
pub fn filter<'a>(catalog: &'a Catalog, query: &FilterQuery) -> Vec<&'a Pokemon> {
    filter_records(catalog.records(), query)
}

/// Same as `filter`, over a plain slice
pub fn filter_records<'a>(records: &'a [Pokemon], query: &FilterQuery) -> Vec<&'a Pokemon> {
    let needle = query.needle();
    records
        .iter()
        .filter(|p| query.matches(p, &needle))
        .collect()
}
