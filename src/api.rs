use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ApiError;
use crate::evolution::ChainNode;
use crate::sprite::{self, SpriteData};
use crate::state::{PokemonAbility, PokemonDetail, PokemonSpecies, PokemonStat, Summary};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Read-only view of the catalog. `PokeClient` talks to PokeAPI; tests plug
/// in their own.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_summaries(&self, limit: usize) -> Result<Vec<Summary>, ApiError>;
    async fn fetch_detail(&self, name: &str) -> Result<PokemonDetail, ApiError>;
    async fn fetch_species(&self, url: &str) -> Result<PokemonSpecies, ApiError>;
    async fn fetch_chain(&self, url: &str) -> Result<ChainNode, ApiError>;
    async fn fetch_sprite(&self, url: &str) -> Result<SpriteData, ApiError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u16,
    weight: u16,
    species: NamedResource,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    name: String,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainNode,
}

pub struct PokeClient {
    http: reqwest::Client,
    api_base: String,
    sprite_base: String,
}

impl PokeClient {
    pub fn new(api_base: impl Into<String>, sprite_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            sprite_base: sprite_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for PokeClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_SPRITE_BASE)
    }
}

#[async_trait]
impl CatalogSource for PokeClient {
    async fn fetch_summaries(&self, limit: usize) -> Result<Vec<Summary>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.api_base);
        let response: ListResponse = self.fetch_json(&url).await?;
        Ok(summaries_from(response, &self.sprite_base))
    }

    async fn fetch_detail(&self, name: &str) -> Result<PokemonDetail, ApiError> {
        let url = format!("{}/pokemon/{name}", self.api_base);
        let response: PokemonResponse = self.fetch_json(&url).await?;
        Ok(detail_from(response))
    }

    async fn fetch_species(&self, url: &str) -> Result<PokemonSpecies, ApiError> {
        let response: PokemonSpeciesResponse = self.fetch_json(url).await?;
        Ok(PokemonSpecies {
            name: response.name,
            evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
        })
    }

    async fn fetch_chain(&self, url: &str) -> Result<ChainNode, ApiError> {
        let response: EvolutionChainResponse = self.fetch_json(url).await?;
        Ok(response.chain)
    }

    async fn fetch_sprite(&self, url: &str) -> Result<SpriteData, ApiError> {
        let bytes = self.fetch_bytes(url).await?;
        sprite::decode_sprite(&bytes)
    }
}

fn summaries_from(response: ListResponse, sprite_base: &str) -> Vec<Summary> {
    response
        .results
        .into_iter()
        .filter_map(|entry| {
            let Some(id) = id_from_url(&entry.url) else {
                tracing::warn!(
                    name = %entry.name,
                    url = %entry.url,
                    "summary without numeric id skipped"
                );
                return None;
            };
            Some(Summary {
                id,
                sprite: format!("{sprite_base}/{id}.png"),
                name: entry.name,
                url: entry.url,
            })
        })
        .collect()
}

fn detail_from(response: PokemonResponse) -> PokemonDetail {
    PokemonDetail {
        id: response.id,
        name: response.name,
        sprite: pointer_string(&response.sprites, "/front_default"),
        species_url: response.species.url,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|slot| PokemonStat {
                name: slot.stat.name,
                base_value: slot.base_stat,
            })
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| PokemonAbility {
                name: slot.ability.name,
                is_hidden: slot.is_hidden,
            })
            .collect(),
        height: response.height,
        weight: response.weight,
    }
}

/// `https://pokeapi.co/api/v2/pokemon/25/` -> 25
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
