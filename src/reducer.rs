use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, EntityModal, PreviewSprite, SpriteTarget, Summary};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init | Action::ListLoad => {
            state.list_loading = true;
            state.list_error = None;
            DispatchResult::changed_with(Effect::LoadList {
                limit: state.page_size,
            })
        }

        Action::ListDidLoad(summaries) => {
            state.summaries = summaries;
            state.list_loading = false;
            state.list_error = None;
            state.cursor = 0;
            state.preview = None;
            with_effects(preview_follow_up(state))
        }

        Action::ListDidError(error) => {
            state.list_loading = false;
            state.list_error = Some(error);
            DispatchResult::changed()
        }

        Action::GridMove(delta) => move_cursor(state, i64::from(delta)),

        Action::GridMoveRow(delta) => {
            let step = state.grid_columns() as i64;
            move_cursor(state, i64::from(delta) * step)
        }

        Action::GridPage(delta) => {
            let step = (state.grid_columns() * state.grid_rows_visible()) as i64;
            move_cursor(state, i64::from(delta) * step)
        }

        Action::GridJumpTop => {
            if !state.set_cursor(0) {
                return DispatchResult::unchanged();
            }
            with_effects(preview_follow_up(state))
        }

        Action::GridJumpBottom => {
            let last = state.summaries.len().saturating_sub(1);
            if !state.set_cursor(last) {
                return DispatchResult::unchanged();
            }
            with_effects(preview_follow_up(state))
        }

        Action::GridSelect(index) => {
            if !state.set_cursor(index) {
                return DispatchResult::unchanged();
            }
            with_effects(preview_follow_up(state))
        }

        Action::EntitySelect(summary) => select_entity(state, summary),

        Action::EntityOpenHighlighted => {
            let Some(summary) = state.highlighted().cloned() else {
                return DispatchResult::unchanged();
            };
            select_entity(state, summary)
        }

        Action::ResolveDidLoad {
            generation,
            detail,
            stages,
        } => {
            let Some(modal) = current_modal(state, generation) else {
                tracing::debug!(generation, "stale resolution dropped");
                return DispatchResult::unchanged();
            };
            modal.resolving = false;
            modal.detail = Some(detail);
            modal.stages = stages;
            let effects = modal
                .sprite_urls()
                .into_iter()
                .map(|url| Effect::LoadSprite {
                    target: SpriteTarget::Modal { generation },
                    url,
                })
                .collect();
            with_effects(effects)
        }

        Action::ResolveDidError { generation, .. } => {
            let Some(modal) = current_modal(state, generation) else {
                tracing::debug!(generation, "stale resolution dropped");
                return DispatchResult::unchanged();
            };
            modal.resolving = false;
            modal.detail = None;
            modal.stages = None;
            DispatchResult::changed()
        }

        Action::ModalClose => {
            if state.modal.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SpriteDidLoad {
            target,
            url,
            sprite,
        } => match target {
            SpriteTarget::Preview => {
                if !preview_wanted(state, &url) {
                    return DispatchResult::unchanged();
                }
                state.preview_loading = false;
                state.preview = Some(PreviewSprite { url, sprite });
                DispatchResult::changed()
            }
            SpriteTarget::Modal { generation } => {
                let Some(modal) = current_modal(state, generation) else {
                    return DispatchResult::unchanged();
                };
                modal.sprites.insert(url, sprite);
                DispatchResult::changed()
            }
        },

        Action::SpriteDidError { target, url, .. } => match target {
            SpriteTarget::Preview if preview_wanted(state, &url) => {
                state.preview_loading = false;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            if !state.is_busy() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn with_effects(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

fn move_cursor(state: &mut AppState, delta: i64) -> DispatchResult<Effect> {
    let target = (state.cursor as i64 + delta).max(0) as usize;
    if !state.set_cursor(target) {
        return DispatchResult::unchanged();
    }
    with_effects(preview_follow_up(state))
}

fn select_entity(state: &mut AppState, summary: Summary) -> DispatchResult<Effect> {
    state.resolve_generation = state.resolve_generation.wrapping_add(1);
    let generation = state.resolve_generation;
    state.modal = Some(EntityModal::new(summary.clone(), generation));
    DispatchResult::changed_with(Effect::ResolveEntity {
        summary,
        generation,
    })
}

/// The open modal, but only if it belongs to `generation`.
fn current_modal(state: &mut AppState, generation: u64) -> Option<&mut EntityModal> {
    state
        .modal
        .as_mut()
        .filter(|modal| modal.generation == generation)
}

fn preview_wanted(state: &AppState, url: &str) -> bool {
    state
        .highlighted()
        .is_some_and(|summary| summary.sprite == url)
}

fn preview_follow_up(state: &mut AppState) -> Vec<Effect> {
    let Some(url) = state.highlighted().map(|summary| summary.sprite.clone()) else {
        state.preview = None;
        state.preview_loading = false;
        return Vec::new();
    };
    if state
        .preview
        .as_ref()
        .is_some_and(|preview| preview.url == url)
    {
        return Vec::new();
    }
    state.preview = None;
    state.preview_loading = true;
    vec![Effect::LoadSprite {
        target: SpriteTarget::Preview,
        url,
    }]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sprite::SpriteData;
    use crate::state::{EvolutionStage, PokemonDetail};

    fn summary(id: u32, name: &str) -> Summary {
        Summary {
            id,
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
            sprite: format!("https://sprites.test/{id}.png"),
        }
    }

    fn detail(id: u32, name: &str) -> PokemonDetail {
        PokemonDetail {
            id,
            name: name.to_string(),
            sprite: Some(format!("https://front.test/{id}.png")),
            species_url: format!("https://pokeapi.co/api/v2/pokemon-species/{id}/"),
            types: vec!["grass".into()],
            stats: Vec::new(),
            abilities: Vec::new(),
            height: 7,
            weight: 69,
        }
    }

    fn stage(name: &str, id: u32, min_level: Option<u32>) -> EvolutionStage {
        EvolutionStage {
            name: name.to_string(),
            sprite: Some(format!("https://front.test/{id}.png")),
            min_level,
        }
    }

    fn sprite() -> SpriteData {
        SpriteData {
            payload: String::new(),
            width: 96,
            height: 96,
            format: 100,
        }
    }

    fn loaded_state(count: u32) -> AppState {
        let mut state = AppState::with_page_size(count as usize);
        state.terminal_size = (112, 24);
        state.summaries = (1..=count).map(|id| summary(id, &format!("mon{id}"))).collect();
        state
    }

    #[test]
    fn init_requests_one_page() {
        let mut state = AppState::with_page_size(20);
        let result = reducer(&mut state, Action::Init);
        assert!(result.changed);
        assert!(state.list_loading);
        assert_eq!(result.effects, vec![Effect::LoadList { limit: 20 }]);
    }

    #[test]
    fn list_error_keeps_previous_collection() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::ListLoad);
        reducer(&mut state, Action::ListDidError("boom".into()));
        assert!(!state.list_loading);
        assert_eq!(state.list_error.as_deref(), Some("boom"));
        assert_eq!(state.summaries.len(), 3);
    }

    #[test]
    fn list_load_clears_error_and_requests_preview() {
        let mut state = AppState::with_page_size(2);
        reducer(&mut state, Action::ListDidError("boom".into()));
        let result = reducer(
            &mut state,
            Action::ListDidLoad(vec![summary(1, "bulbasaur"), summary(2, "ivysaur")]),
        );
        assert_eq!(state.list_error, None);
        assert!(state.preview_loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadSprite {
                target: SpriteTarget::Preview,
                url: "https://sprites.test/1.png".into(),
            }]
        );
    }

    #[test]
    fn row_moves_follow_grid_columns() {
        let mut state = loaded_state(20);
        assert_eq!(state.grid_columns(), 4);
        reducer(&mut state, Action::GridMoveRow(1));
        assert_eq!(state.cursor, 4);
        reducer(&mut state, Action::GridMove(-10));
        assert_eq!(state.cursor, 0);
        let result = reducer(&mut state, Action::GridMove(-1));
        assert!(!result.changed);
        reducer(&mut state, Action::GridJumpBottom);
        assert_eq!(state.cursor, 19);
        reducer(&mut state, Action::GridPage(1));
        assert_eq!(state.cursor, 19);
    }

    #[test]
    fn select_opens_modal_and_bumps_generation() {
        let mut state = loaded_state(3);
        let result = reducer(&mut state, Action::EntitySelect(summary(1, "bulbasaur")));
        assert_eq!(state.resolve_generation, 1);
        let modal = state.modal.as_ref().unwrap();
        assert!(modal.resolving);
        assert_eq!(
            result.effects,
            vec![Effect::ResolveEntity {
                summary: summary(1, "bulbasaur"),
                generation: 1,
            }]
        );
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntitySelect(summary(1, "bulbasaur")));
        reducer(&mut state, Action::EntitySelect(summary(4, "charmander")));

        let result = reducer(
            &mut state,
            Action::ResolveDidLoad {
                generation: 1,
                detail: detail(1, "bulbasaur"),
                stages: None,
            },
        );
        assert!(!result.changed);
        let modal = state.modal.as_ref().unwrap();
        assert_eq!(modal.summary.name, "charmander");
        assert!(modal.detail.is_none());
        assert!(modal.resolving);
    }

    #[test]
    fn resolution_requests_every_sprite_once() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntitySelect(summary(1, "bulbasaur")));
        let result = reducer(
            &mut state,
            Action::ResolveDidLoad {
                generation: 1,
                detail: detail(1, "bulbasaur"),
                stages: Some(vec![
                    stage("bulbasaur", 1, None),
                    stage("ivysaur", 2, Some(16)),
                    stage("venusaur", 3, Some(32)),
                ]),
            },
        );
        let urls: Vec<_> = result
            .effects
            .iter()
            .map(|effect| match effect {
                Effect::LoadSprite { url, .. } => url.as_str(),
                other => panic!("unexpected effect {other:?}"),
            })
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://front.test/1.png",
                "https://front.test/2.png",
                "https://front.test/3.png"
            ]
        );
        assert!(state.modal.as_ref().unwrap().evolution_visible());
    }

    #[test]
    fn resolve_error_degrades_silently() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntitySelect(summary(1, "bulbasaur")));
        reducer(
            &mut state,
            Action::ResolveDidError {
                generation: 1,
                error: "timeout".into(),
            },
        );
        let modal = state.modal.as_ref().unwrap();
        assert!(!modal.resolving);
        assert!(modal.detail.is_none());
        assert_eq!(state.list_error, None);
    }

    #[test]
    fn close_discards_everything() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntitySelect(summary(1, "bulbasaur")));
        reducer(
            &mut state,
            Action::ResolveDidLoad {
                generation: 1,
                detail: detail(1, "bulbasaur"),
                stages: Some(vec![stage("bulbasaur", 1, None)]),
            },
        );
        assert!(reducer(&mut state, Action::ModalClose).changed);
        assert!(state.modal.is_none());
        assert!(state.current_detail().is_none());
        assert!(!reducer(&mut state, Action::ModalClose).changed);

        // late sprite from the closed session
        let result = reducer(
            &mut state,
            Action::SpriteDidLoad {
                target: SpriteTarget::Modal { generation: 1 },
                url: "https://front.test/1.png".into(),
                sprite: sprite(),
            },
        );
        assert!(!result.changed);
    }

    #[test]
    fn preview_sprite_only_lands_for_highlighted_card() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::GridSelect(1));
        let stale = reducer(
            &mut state,
            Action::SpriteDidLoad {
                target: SpriteTarget::Preview,
                url: "https://sprites.test/1.png".into(),
                sprite: sprite(),
            },
        );
        assert!(!stale.changed);
        assert!(state.preview.is_none());

        reducer(
            &mut state,
            Action::SpriteDidLoad {
                target: SpriteTarget::Preview,
                url: "https://sprites.test/2.png".into(),
                sprite: sprite(),
            },
        );
        assert!(!state.preview_loading);
        assert_eq!(state.preview.as_ref().unwrap().url, "https://sprites.test/2.png");
    }

    #[test]
    fn tick_only_animates_while_busy() {
        let mut state = loaded_state(3);
        assert!(!reducer(&mut state, Action::Tick).changed);
        state.list_loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
