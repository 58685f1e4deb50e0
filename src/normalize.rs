// Normalizer - raw upstream detail → Pokemon record
// Pure, never fails: missing data falls back to defaults

use crate::api::RawPokemon;
use crate::entities::{Pokemon, TypeRegistry, UNKNOWN_TYPE};

/// Map one raw detail record into a catalog record.
///
/// - image: official artwork → default sprite → `placeholder`
///   (empty strings count as missing)
/// - types: each translated through `registry`, unmapped → "unknown";
///   no types at all → ["unknown"]
pub fn normalize(raw: &RawPokemon, registry: &TypeRegistry, placeholder: &str) -> Pokemon {
    let image = raw
        .artwork()
        .filter(|url| !url.is_empty())
        .or_else(|| raw.sprite().filter(|url| !url.is_empty()))
        .unwrap_or(placeholder)
        .to_string();

    let mut types: Vec<String> = raw
        .type_names()
        .map(|name| registry.translate(name).to_string())
        .collect();

    if types.is_empty() {
        types.push(UNKNOWN_TYPE.to_string());
    }

    Pokemon {
        id: raw.id,
        name: raw.name.clone(),
        image,
        types,
    }
}

/// Normalize a whole batch, keeping upstream order
pub fn normalize_all(raws: &[RawPokemon], registry: &TypeRegistry, placeholder: &str) -> Vec<Pokemon> {
    raws.iter()
        .map(|raw| normalize(raw, registry, placeholder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawArtwork, RawOtherSprites, RawSprites, RawTypeRef, RawTypeSlot};
    use crate::config::DEFAULT_PLACEHOLDER_IMAGE;

    fn raw_with(artwork: Option<&str>, sprite: Option<&str>, types: &[&str]) -> RawPokemon {
        RawPokemon {
            id: 1,
            name: "bulbasaur".to_string(),
            sprites: RawSprites {
                front_default: sprite.map(str::to_string),
                other: Some(RawOtherSprites {
                    official_artwork: Some(RawArtwork {
                        front_default: artwork.map(str::to_string),
                    }),
                }),
            },
            types: types
                .iter()
                .map(|t| RawTypeSlot {
                    type_: RawTypeRef { name: t.to_string() },
                })
                .collect(),
        }
    }

    #[test]
    fn test_copies_identity() {
        let registry = TypeRegistry::with_defaults();
        let p = normalize(&raw_with(Some("art"), None, &["grass"]), &registry, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "bulbasaur");
    }

    #[test]
    fn test_image_fallback_chain() {
        let registry = TypeRegistry::with_defaults();

        let p = normalize(&raw_with(Some("art.png"), Some("sprite.png"), &[]), &registry, "ph.png");
        assert_eq!(p.image, "art.png");

        let p = normalize(&raw_with(None, Some("sprite.png"), &[]), &registry, "ph.png");
        assert_eq!(p.image, "sprite.png");

        let p = normalize(&raw_with(None, None, &[]), &registry, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(p.image, DEFAULT_PLACEHOLDER_IMAGE);

        // No "other" block at all
        let mut bare = raw_with(None, None, &[]);
        bare.sprites = RawSprites::default();
        assert_eq!(normalize(&bare, &registry, "ph.png").image, "ph.png");
    }

    #[test]
    fn test_empty_image_strings_count_as_missing() {
        let registry = TypeRegistry::with_defaults();
        let p = normalize(&raw_with(Some(""), Some("sprite.png"), &[]), &registry, "ph.png");
        assert_eq!(p.image, "sprite.png");

        let p = normalize(&raw_with(Some(""), Some(""), &[]), &registry, "ph.png");
        assert_eq!(p.image, "ph.png");
    }

    #[test]
    fn test_types_translated_in_slot_order() {
        let registry = TypeRegistry::with_defaults();
        let p = normalize(&raw_with(None, None, &["grass", "poison"]), &registry, "ph.png");
        assert_eq!(p.types, vec!["planta", "veneno"]);
    }

    #[test]
    fn test_unmapped_type_becomes_unknown() {
        let registry = TypeRegistry::with_defaults();
        let p = normalize(&raw_with(None, None, &["stellar", "fire"]), &registry, "ph.png");
        assert_eq!(p.types, vec![UNKNOWN_TYPE, "fuego"]);
    }

    #[test]
    fn test_no_types_becomes_single_unknown() {
        let registry = TypeRegistry::with_defaults();
        let p = normalize(&raw_with(None, None, &[]), &registry, "ph.png");
        assert_eq!(p.types, vec![UNKNOWN_TYPE]);
    }

    #[test]
    fn test_batch_invariants_hold() {
        let registry = TypeRegistry::with_defaults();
        let raws = vec![
            raw_with(None, None, &[]),
            raw_with(Some("a.png"), None, &["ghost"]),
            raw_with(None, Some(""), &["shadow", "dark"]),
        ];

        let records = normalize_all(&raws, &registry, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(records.len(), 3);
        for r in &records {
            assert!(!r.types.is_empty());
            assert!(!r.image.is_empty());
        }
    }
}
