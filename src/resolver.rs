//! Detail resolution: entity detail, then species, then evolution chain, then
//! one detail lookup per stage for its sprite.

use crate::api::CatalogSource;
use crate::error::ApiError;
use crate::evolution;
use crate::state::{EvolutionStage, PokemonDetail, Summary};

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub detail: PokemonDetail,
    /// `None` when any step after the detail failed. Never partial.
    pub stages: Option<Vec<EvolutionStage>>,
}

pub async fn resolve<S>(source: &S, summary: &Summary) -> Result<Resolution, ApiError>
where
    S: CatalogSource + ?Sized,
{
    let detail = source.fetch_detail(&summary.name).await?;
    let stages = match resolve_stages(source, &detail).await {
        Ok(stages) => Some(stages),
        Err(error) => {
            tracing::warn!(name = %summary.name, %error, "evolution chain unavailable");
            None
        }
    };
    Ok(Resolution { detail, stages })
}

pub async fn resolve_stages<S>(
    source: &S,
    detail: &PokemonDetail,
) -> Result<Vec<EvolutionStage>, ApiError>
where
    S: CatalogSource + ?Sized,
{
    let species = source.fetch_species(&detail.species_url).await?;
    let chain_url = species
        .evolution_chain_url
        .ok_or(ApiError::MissingField("evolution_chain"))?;
    let chain = source.fetch_chain(&chain_url).await?;

    let skipped = chain.skipped_branches();
    if skipped > 0 {
        tracing::debug!(species = %species.name, skipped, "alternate evolution branches not shown");
    }

    let mut stages = Vec::new();
    for plan in evolution::linearize(&chain) {
        let stage_detail = source.fetch_detail(&plan.name).await?;
        stages.push(EvolutionStage {
            name: plan.name,
            sprite: stage_detail.sprite,
            min_level: plan.min_level,
        });
    }
    Ok(stages)
}
