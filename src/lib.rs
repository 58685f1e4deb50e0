// Pokédex - Core Library
// Fetch → normalize → filter pipeline, shared by the TUI and the CLI

pub mod api;
pub mod catalog;
pub mod config;
pub mod console;
pub mod controller;
pub mod entities;
pub mod error;
pub mod filter;
pub mod logging;
pub mod normalize;

// Re-export commonly used types
pub use api::{fetch_all, HttpSource, IndexEntry, PokemonSource, RawPokemon};
pub use catalog::Catalog;
pub use config::Config;
pub use console::ConsolePresenter;
pub use controller::{Controller, Presenter, UiEvent};
pub use entities::{capitalize, Pokemon, TypeLabel, TypeRegistry, UNKNOWN_TYPE};
pub use error::{ConfigError, LoadError, LOAD_FAILURE_MESSAGE};
pub use filter::{filter, FilterQuery};
pub use logging::{init_logging, LogTarget};
pub use normalize::normalize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
