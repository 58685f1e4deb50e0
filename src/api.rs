// 🌐 Fetch Layer - PokéAPI index + detail requests
//
// One index request, then one detail request per entry. Detail requests run
// concurrently and are joined all-or-nothing: a single failure fails the load.

use crate::config::Config;
use crate::error::LoadError;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

// ============================================================================
// RAW UPSTREAM SHAPES (only the fields we read)
// ============================================================================

/// GET /pokemon?limit=N
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexResponse {
    #[serde(default)]
    pub results: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexEntry {
    pub name: String,
    pub url: String,
}

/// GET /pokemon/{id}
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_: RawTypeRef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTypeRef {
    pub name: String,
}

impl RawPokemon {
    /// Official artwork URL, if present
    pub fn artwork(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
    }

    /// Default sprite URL, if present
    pub fn sprite(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }

    /// Upstream type identifiers in slot order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.type_.name.as_str())
    }
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// Where raw records come from (HTTP in production)
#[async_trait]
pub trait PokemonSource {
    /// Fetch the capped index
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, LoadError>;

    /// Fetch one detail record
    async fn fetch_detail(&self, entry: &IndexEntry) -> Result<RawPokemon, LoadError>;
}

/// Index, then every detail concurrently. All-or-nothing.
pub async fn fetch_all<S>(source: &S) -> Result<Vec<RawPokemon>, LoadError>
where
    S: PokemonSource + Sync + ?Sized,
{
    let index = source.fetch_index().await?;
    info!(count = index.len(), "fetched index");

    let details = try_join_all(index.iter().map(|entry| source.fetch_detail(entry))).await?;
    info!(count = details.len(), "fetched details");

    Ok(details)
}

// ============================================================================
// HTTP SOURCE
// ============================================================================

/// reqwest-backed PokéAPI client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    index_url: String,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = config.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            index_url: config.index_url(),
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// GET + status check + JSON parse
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "request failed");
            LoadError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "non-success status");
            return Err(LoadError::NetworkFailure(format!("{} returned HTTP {}", url, status)));
        }

        response.json().await.map_err(|e| {
            warn!(url, error = %e, "undecodable body");
            LoadError::NetworkFailure(format!("failed to parse {}: {}", url, e))
        })
    }
}

#[async_trait]
impl PokemonSource for HttpSource {
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, LoadError> {
        let index: IndexResponse = self.get_json(&self.index_url).await?;
        Ok(index.results)
    }

    async fn fetch_detail(&self, entry: &IndexEntry) -> Result<RawPokemon, LoadError> {
        self.get_json(&entry.url).await
    }
}
