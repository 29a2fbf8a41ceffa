use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{EvolutionStage, PokemonDetail, SpriteTarget, Summary};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    ListLoad,
    ListDidLoad(Vec<Summary>),
    ListDidError(String),

    GridMove(i16),
    GridMoveRow(i16),
    GridPage(i16),
    GridJumpTop,
    GridJumpBottom,
    GridSelect(usize),

    EntitySelect(Summary),
    EntityOpenHighlighted,
    ResolveDidLoad {
        generation: u64,
        detail: PokemonDetail,
        stages: Option<Vec<EvolutionStage>>,
    },
    ResolveDidError {
        generation: u64,
        error: String,
    },
    ModalClose,

    SpriteDidLoad {
        target: SpriteTarget,
        url: String,
        sprite: SpriteData,
    },
    SpriteDidError {
        target: SpriteTarget,
        url: String,
        error: String,
    },

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
