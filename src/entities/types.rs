// 🏷️ Type Registry - upstream type identifiers → display labels
//
// Upstream types arrive as English identifiers ("grass", "fire").
// The catalog stores display labels ("planta", "fuego"); anything the
// registry does not know becomes "unknown".

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label for records with no types, or with types missing from the registry
pub const UNKNOWN_TYPE: &str = "unknown";

/// Colour used for labels the registry does not know
const UNKNOWN_COLOR: &str = "#68A090";

// ============================================================================
// TYPE LABEL
// ============================================================================

/// One entry of the translation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLabel {
    /// Upstream identifier (e.g., "grass")
    pub key: String,

    /// Display label stored on records (e.g., "planta")
    pub label: String,

    /// Badge colour for presenters (e.g., "#78C850")
    pub color: String,
}

impl TypeLabel {
    pub fn new(key: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        TypeLabel {
            key: key.into(),
            label: label.into(),
            color: color.into(),
        }
    }
}

// ============================================================================
// TYPE REGISTRY
// ============================================================================

/// Fixed lookup from upstream type identifiers to display labels
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Entries in registration order
    entries: Vec<TypeLabel>,

    /// key → index into entries
    by_key: HashMap<String, usize>,

    /// label → index into entries
    by_label: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Create new empty registry (every type translates to "unknown")
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with the Spanish label table pre-loaded
    pub fn with_defaults() -> Self {
        let mut registry = TypeRegistry::new();
        registry.register_default_types();
        registry
    }

    fn register_default_types(&mut self) {
        let defaults = [
            ("grass", "planta", "#78C850"),
            ("poison", "veneno", "#A040A0"),
            ("fire", "fuego", "#F08030"),
            ("water", "agua", "#6890F0"),
            ("electric", "electrico", "#F8D030"),
            ("normal", "normal", "#A8A878"),
            ("fighting", "lucha", "#C03028"),
            ("flying", "volador", "#A890F0"),
            ("ground", "tierra", "#E0C068"),
            ("rock", "roca", "#B8A038"),
            ("bug", "bicho", "#A8B820"),
            ("ghost", "fantasma", "#705898"),
            ("steel", "acero", "#B8B8D0"),
            ("ice", "hielo", "#98D8D8"),
            ("dragon", "dragon", "#7038F8"),
            ("dark", "siniestro", "#705848"),
            ("fairy", "hada", "#EE99AC"),
            ("psychic", "psiquico", "#F85888"),
        ];

        for (key, label, color) in defaults {
            self.register(TypeLabel::new(key, label, color));
        }
    }

    /// Register (or replace) a translation
    pub fn register(&mut self, entry: TypeLabel) {
        if let Some(&idx) = self.by_key.get(&entry.key) {
            self.entries[idx] = entry;
            self.reindex_labels();
            return;
        }

        let idx = self.entries.len();
        self.by_key.insert(entry.key.clone(), idx);
        self.by_label.insert(entry.label.clone(), idx);
        self.entries.push(entry);
    }

    /// Translate an upstream identifier; unmapped → "unknown"
    pub fn translate(&self, key: &str) -> &str {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].label.as_str())
            .unwrap_or(UNKNOWN_TYPE)
    }

    /// Badge colour for a display label
    pub fn color_for_label(&self, label: &str) -> &str {
        self.by_label
            .get(label)
            .map(|&idx| self.entries[idx].color.as_str())
            .unwrap_or(UNKNOWN_COLOR)
    }

    /// Rebuild label → entry; later entries win when labels are shared
    fn reindex_labels(&mut self) {
        self.by_label = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.label.clone(), idx))
            .collect();
    }
}
