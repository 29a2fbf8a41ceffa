//! Evolution chain records and their linearisation.
//!
//! The catalog returns the chain as a tree. Only the first child of every
//! node is followed, so branching families (eevee, tyrogue, ...) show their
//! first listed evolution path.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTrigger {
    #[serde(default)]
    pub min_level: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    pub species: SpeciesRef,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionTrigger>,
    #[serde(default)]
    pub evolves_to: Vec<ChainNode>,
}

/// A stage before its sprite has been looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagePlan {
    pub name: String,
    pub min_level: Option<u32>,
}

impl ChainNode {
    pub fn min_level(&self) -> Option<u32> {
        self.evolution_details
            .first()
            .and_then(|trigger| trigger.min_level)
    }

    /// Number of sibling branches that `linearize` skips.
    pub fn skipped_branches(&self) -> usize {
        let mut skipped = 0;
        let mut node = self;
        while let Some(next) = node.evolves_to.first() {
            skipped += node.evolves_to.len() - 1;
            node = next;
        }
        skipped
    }
}

/// Walks root to leaf along `evolves_to[0]`.
pub fn linearize(root: &ChainNode) -> Vec<StagePlan> {
    let mut stages = Vec::new();
    let mut node = Some(root);
    while let Some(current) = node {
        stages.push(StagePlan {
            name: current.species.name.clone(),
            min_level: current.min_level(),
        });
        node = current.evolves_to.first();
    }
    stages
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn node(name: &str, min_level: Option<u32>, evolves_to: Vec<ChainNode>) -> ChainNode {
        ChainNode {
            species: SpeciesRef {
                name: name.to_string(),
            },
            evolution_details: min_level
                .map(|level| {
                    vec![EvolutionTrigger {
                        min_level: Some(level),
                    }]
                })
                .unwrap_or_default(),
            evolves_to,
        }
    }

    #[test]
    fn bulbasaur_line_is_three_stages() {
        let chain = node(
            "bulbasaur",
            None,
            vec![node(
                "ivysaur",
                Some(16),
                vec![node("venusaur", Some(32), vec![])],
            )],
        );
        let stages = linearize(&chain);
        assert_eq!(
            stages,
            vec![
                StagePlan {
                    name: "bulbasaur".into(),
                    min_level: None
                },
                StagePlan {
                    name: "ivysaur".into(),
                    min_level: Some(16)
                },
                StagePlan {
                    name: "venusaur".into(),
                    min_level: Some(32)
                },
            ]
        );
    }

    #[test]
    fn leaf_root_is_single_stage() {
        let stages = linearize(&node("tauros", None, vec![]));
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].name, "tauros");
    }

    #[test]
    fn only_first_branch_is_followed() {
        let chain = node(
            "eevee",
            None,
            vec![
                node("vaporeon", None, vec![]),
                node("jolteon", None, vec![]),
                node("flareon", None, vec![]),
            ],
        );
        let names: Vec<_> = linearize(&chain).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["eevee", "vaporeon"]);
        assert_eq!(chain.skipped_branches(), 2);
    }

    #[test]
    fn trigger_without_level_yields_none() {
        let chain: ChainNode = serde_json::from_str(
            r#"{
                "species": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/"},
                "evolution_details": [],
                "evolves_to": [{
                    "species": {"name": "raichu", "url": "x"},
                    "evolution_details": [{"min_level": null, "trigger": {"name": "use-item"}}],
                    "evolves_to": []
                }]
            }"#,
        )
        .unwrap();
        let stages = linearize(&chain);
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].min_level, None);
    }
}
