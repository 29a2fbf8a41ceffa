use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::display;
use crate::sprite::SpriteData;

pub const DEFAULT_PAGE_SIZE: usize = 151;

/// One grid entry. `id` comes from the resource url, not the list position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: u32,
    pub name: String,
    pub url: String,
    pub sprite: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub base_value: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub species_url: String,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub abilities: Vec<PokemonAbility>,
    pub height: u16,
    pub weight: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub evolution_chain_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub name: String,
    pub sprite: Option<String>,
    pub min_level: Option<u32>,
}

/// Where a fetched sprite should land once it arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteTarget {
    Preview,
    Modal { generation: u64 },
}

/// Everything shown by the detail overlay. Dropped as a whole on close.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityModal {
    pub summary: Summary,
    pub generation: u64,
    pub resolving: bool,
    pub detail: Option<PokemonDetail>,
    pub stages: Option<Vec<EvolutionStage>>,
    pub sprites: HashMap<String, SpriteData>,
}

impl EntityModal {
    pub fn new(summary: Summary, generation: u64) -> Self {
        Self {
            summary,
            generation,
            resolving: true,
            detail: None,
            stages: None,
            sprites: HashMap::new(),
        }
    }

    /// Single-stage chains are not worth a section.
    pub fn evolution_visible(&self) -> bool {
        self.stages.as_ref().is_some_and(|stages| stages.len() > 1)
    }

    pub fn sprite(&self, url: Option<&str>) -> Option<&SpriteData> {
        url.and_then(|url| self.sprites.get(url))
    }

    /// Every sprite url the overlay can display, detail first.
    pub fn sprite_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let detail_sprite = self.detail.as_ref().and_then(|detail| detail.sprite.clone());
        let stage_sprites = self
            .stages
            .iter()
            .flatten()
            .filter_map(|stage| stage.sprite.clone());
        for url in detail_sprite.into_iter().chain(stage_sprites) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewSprite {
    pub url: String,
    pub sprite: SpriteData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub page_size: usize,

    pub summaries: Vec<Summary>,
    pub list_loading: bool,
    pub list_error: Option<String>,
    pub cursor: usize,

    pub modal: Option<EntityModal>,
    pub resolve_generation: u64,

    pub preview: Option<PreviewSprite>,
    pub preview_loading: bool,

    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            page_size: DEFAULT_PAGE_SIZE,
            summaries: Vec::new(),
            list_loading: false,
            list_error: None,
            cursor: 0,
            modal: None,
            resolve_generation: 0,
            preview: None,
            preview_loading: false,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn highlighted(&self) -> Option<&Summary> {
        self.summaries.get(self.cursor)
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        if self.summaries.is_empty() {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(self.summaries.len() - 1);
        if bounded != self.cursor {
            self.cursor = bounded;
            return true;
        }
        false
    }

    pub fn grid_columns(&self) -> usize {
        display::grid_columns(self.terminal_size.0)
    }

    pub fn grid_rows_visible(&self) -> usize {
        display::grid_rows_visible(self.terminal_size.1)
    }

    pub fn current_detail(&self) -> Option<&PokemonDetail> {
        self.modal.as_ref()?.detail.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.list_loading || self.modal.as_ref().is_some_and(|modal| modal.resolving)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let modal_name = self.modal.as_ref().map(|modal| modal.summary.name.clone());
        let stage_count = self
            .modal
            .as_ref()
            .and_then(|modal| modal.stages.as_ref())
            .map(|stages| stages.len());
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.summaries.len()))
                .entry("page_size", ron_string(&self.page_size))
                .entry("cursor", ron_string(&self.cursor))
                .entry("highlighted", ron_string(&self.highlighted().map(|s| s.name.clone()))),
            DebugSection::new("Modal")
                .entry("open", ron_string(&modal_name))
                .entry("generation", ron_string(&self.resolve_generation))
                .entry(
                    "resolving",
                    ron_string(&self.modal.as_ref().map(|modal| modal.resolving)),
                )
                .entry("stages", ron_string(&stage_count)),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("list_error", ron_string(&self.list_error))
                .entry("preview_loading", ron_string(&self.preview_loading))
                .entry("terminal", ron_string(&self.terminal_size)),
        ]
    }
}
