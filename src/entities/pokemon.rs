// Pokémon record - the normalized catalog entry
//
// Only the fields the viewer consumes survive normalization:
// id, name, image, types.

use serde::{Deserialize, Serialize};

/// Normalized catalog record
///
/// Invariants (established by `normalize`):
/// - `image` is never empty
/// - `types` has at least one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Upstream identifier (e.g., 1 for bulbasaur)
    pub id: u32,

    /// Lowercase upstream name (e.g., "bulbasaur")
    pub name: String,

    /// Artwork, sprite, or placeholder URL
    pub image: String,

    /// Display labels (e.g., ["planta", "veneno"])
    pub types: Vec<String>,
}

impl Pokemon {
    pub fn new(id: u32, name: impl Into<String>, image: impl Into<String>, types: Vec<String>) -> Self {
        Pokemon {
            id,
            name: name.into(),
            image: image.into(),
            types,
        }
    }

    /// "bulbasaur" → "Bulbasaur"
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// 1 → "#001", 1025 → "#1025"
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    pub fn has_type(&self, label: &str) -> bool {
        self.types.iter().any(|t| t == label)
    }
}

/// Uppercase the first character, leave the rest alone
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
