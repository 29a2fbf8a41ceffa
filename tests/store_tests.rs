//! Store flows driven through `EffectStoreTestHarness`.

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId};
use pokedex_cards::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{AppState, EvolutionStage, PokemonDetail, SpriteTarget, Summary},
    ui::CatalogUi,
};

fn summary(id: u32, name: &str) -> Summary {
    Summary {
        id,
        name: name.into(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
        sprite: format!("https://sprites.test/{id}.png"),
    }
}

fn page(count: u32) -> Vec<Summary> {
    (1..=count).map(|id| summary(id, &format!("mon{id}"))).collect()
}

fn detail(id: u32, name: &str) -> PokemonDetail {
    PokemonDetail {
        id,
        name: name.into(),
        sprite: None,
        species_url: format!("https://pokeapi.co/api/v2/pokemon-species/{id}/"),
        types: vec!["normal".into()],
        stats: Vec::new(),
        abilities: Vec::new(),
        height: 10,
        weight: 100,
    }
}

#[test]
fn successful_load_fills_one_page() {
    let mut harness = EffectStoreTestHarness::new(AppState::with_page_size(151), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.list_loading && s.list_error.is_none());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadList { limit: 151 }));

    harness.complete_action(Action::ListDidLoad(page(151)));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| s.summaries.len() == 151);
    harness.assert_state(|s| !s.list_loading && s.list_error.is_none());
    harness.assert_state(|s| s.cursor == 0);
}

#[test]
fn failed_first_load_leaves_collection_empty() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::ListLoad);
    harness.complete_action(Action::ListDidError("request failed: connection refused".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.summaries.is_empty());
    harness.assert_state(|s| !s.list_loading);
    harness.assert_state(|s| s.list_error.as_deref() == Some("request failed: connection refused"));
}

#[test]
fn retry_clears_error_before_reloading() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::ListDidError("boom".into()));

    let result = store.dispatch(Action::ListLoad);
    assert!(result.changed);
    assert!(store.state().list_error.is_none());
    assert!(store.state().list_loading);
    assert!(matches!(result.effects[0], Effect::LoadList { .. }));
}

#[test]
fn only_latest_selection_lands() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::ListDidLoad(page(10)));
    harness.drain_effects();

    harness.dispatch_collect(Action::EntitySelect(summary(1, "bulbasaur")));
    harness.dispatch_collect(Action::EntitySelect(summary(4, "charmander")));
    let effects = harness.drain_effects();
    effects.effects_count(2);

    // responses arrive out of order
    harness.complete_action(Action::ResolveDidLoad {
        generation: 2,
        detail: detail(4, "charmander"),
        stages: None,
    });
    harness.complete_action(Action::ResolveDidLoad {
        generation: 1,
        detail: detail(1, "bulbasaur"),
        stages: None,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 2));

    harness.assert_state(|s| s.current_detail().is_some_and(|d| d.name == "charmander"));
}

#[test]
fn resolving_same_summary_twice_gives_same_view() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let stages = vec![
        EvolutionStage {
            name: "charmander".into(),
            sprite: None,
            min_level: None,
        },
        EvolutionStage {
            name: "charmeleon".into(),
            sprite: None,
            min_level: Some(16),
        },
    ];

    let mut views = Vec::new();
    for generation in 1..=2 {
        store.dispatch(Action::EntitySelect(summary(4, "charmander")));
        store.dispatch(Action::ResolveDidLoad {
            generation,
            detail: detail(4, "charmander"),
            stages: Some(stages.clone()),
        });
        let modal = store.state().modal.clone().unwrap();
        views.push((modal.detail, modal.stages));
        store.dispatch(Action::ModalClose);
    }
    assert_eq!(views[0], views[1]);
}

#[test]
fn close_after_failure_resets_everything() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let results = harness.dispatch_all([
        Action::EntitySelect(summary(7, "squirtle")),
        Action::ResolveDidError {
            generation: 1,
            error: "unexpected status 500".into(),
        },
        Action::ModalClose,
    ]);
    assert_eq!(results, vec![true, true, true]);
    harness.assert_state(|s| s.modal.is_none() && s.current_detail().is_none());
    harness.assert_state(|s| s.list_error.is_none());
}

#[test]
fn modal_sprites_are_tagged_with_generation() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::EntitySelect(summary(1, "bulbasaur")));
    let mut resolved = detail(1, "bulbasaur");
    resolved.sprite = Some("https://front.test/1.png".into());

    let result = store.dispatch(Action::ResolveDidLoad {
        generation: 1,
        detail: resolved,
        stages: None,
    });
    assert_eq!(
        result.effects,
        vec![Effect::LoadSprite {
            target: SpriteTarget::Modal { generation: 1 },
            url: "https://front.test/1.png".into(),
        }]
    );
}

#[test]
fn keys_drive_the_grid() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::ListDidLoad(page(12)));
    harness.drain_effects();
    let mut ui = CatalogUi::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l", |state, event| {
        ui.handle_grid_event(&event.kind, state).actions
    });
    actions.assert_count(1);
    actions.assert_first(Action::GridMove(1));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.cursor == 1);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::LoadSprite { target: SpriteTarget::Preview, url }
                if url == "https://sprites.test/2.png"
        )
    });
}
