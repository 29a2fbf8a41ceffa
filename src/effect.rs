use crate::state::{SpriteTarget, Summary};

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadList { limit: usize },
    ResolveEntity { summary: Summary, generation: u64 },
    LoadSprite { target: SpriteTarget, url: String },
}
