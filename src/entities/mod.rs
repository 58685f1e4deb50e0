// Entity Models
// Pokémon records plus the type translation table they are labelled with

pub mod pokemon;
pub mod types;

pub use pokemon::{capitalize, Pokemon};
pub use types::{TypeLabel, TypeRegistry, UNKNOWN_TYPE};
