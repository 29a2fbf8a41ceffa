//! Presentation rules that do not need a terminal: colours, labels, units and
//! grid geometry.

use ratatui::style::Color;

use crate::sprite::SpriteData;
use crate::state::PokemonAbility;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;
pub const PREVIEW_WIDTH: u16 = 30;
pub const CARD_WIDTH: u16 = 20;
pub const CARD_HEIGHT: u16 = 3;
pub const STAT_MAX: f64 = 255.0;
pub const EVOLUTION_SEPARATOR: &str = "→";
const CELL_ASPECT: f32 = 2.0;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub const DEFAULT_TYPE_COLOR: Color = Color::Rgb(0x77, 0x77, 0x77);

const TYPE_COLORS: [(&str, Color); 18] = [
    ("normal", Color::Rgb(0xA8, 0xA8, 0x78)),
    ("fire", Color::Rgb(0xF0, 0x80, 0x30)),
    ("water", Color::Rgb(0x68, 0x90, 0xF0)),
    ("electric", Color::Rgb(0xF8, 0xD0, 0x30)),
    ("grass", Color::Rgb(0x78, 0xC8, 0x50)),
    ("ice", Color::Rgb(0x98, 0xD8, 0xD8)),
    ("fighting", Color::Rgb(0xC0, 0x30, 0x28)),
    ("poison", Color::Rgb(0xA0, 0x40, 0xA0)),
    ("ground", Color::Rgb(0xE0, 0xC0, 0x68)),
    ("flying", Color::Rgb(0xA8, 0x90, 0xF0)),
    ("psychic", Color::Rgb(0xF8, 0x58, 0x88)),
    ("bug", Color::Rgb(0xA8, 0xB8, 0x20)),
    ("rock", Color::Rgb(0xB8, 0xA0, 0x38)),
    ("ghost", Color::Rgb(0x70, 0x58, 0x98)),
    ("dragon", Color::Rgb(0x70, 0x38, 0xF8)),
    ("dark", Color::Rgb(0x70, 0x58, 0x48)),
    ("steel", Color::Rgb(0xB8, 0xB8, 0xD0)),
    ("fairy", Color::Rgb(0xEE, 0x99, 0xAC)),
];

pub fn type_color(name: &str) -> Color {
    TYPE_COLORS
        .iter()
        .find(|(type_name, _)| *type_name == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatBand {
    High,
    Mid,
    Low,
}

impl StatBand {
    pub fn of(value: u16) -> Self {
        if value > 150 {
            StatBand::High
        } else if value > 100 {
            StatBand::Mid
        } else {
            StatBand::Low
        }
    }

    pub fn color(self) -> Color {
        match self {
            StatBand::High => Color::Rgb(0x4C, 0xAF, 0x50),
            StatBand::Mid => Color::Rgb(0x21, 0x96, 0xF3),
            StatBand::Low => Color::Rgb(0xFF, 0x98, 0x00),
        }
    }
}

/// Fraction of the bar to fill, clamped even if the data leaves 0..=255.
pub fn stat_fill(value: u16) -> f64 {
    (f64::from(value) / STAT_MAX).clamp(0.0, 1.0)
}

/// Splits a bar of `width` cells into (filled, empty).
pub fn stat_cells(value: u16, width: usize) -> (usize, usize) {
    let filled = ((stat_fill(value) * width as f64).round() as usize).min(width);
    (filled, width - filled)
}

pub fn format_dex_id(id: u32) -> String {
    format!("#{id:03}")
}

pub fn format_label(name: &str) -> String {
    name.replace('-', " ")
}

pub fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ability_label(ability: &PokemonAbility) -> String {
    let label = format_label(&ability.name);
    if ability.is_hidden {
        format!("{label} (Hidden)")
    } else {
        label
    }
}

pub fn level_label(min_level: Option<u32>) -> Option<String> {
    min_level.map(|level| format!("Level {level}"))
}

/// Decimetres to metres.
pub fn height_m(height: u16) -> f64 {
    f64::from(height) / 10.0
}

/// Hectograms to kilograms.
pub fn weight_kg(weight: u16) -> f64 {
    f64::from(weight) / 10.0
}

pub fn format_height(height: u16) -> String {
    format!("Height: {}m", height_m(height))
}

pub fn format_weight(weight: u16) -> String {
    format!("Weight: {}kg", weight_kg(weight))
}

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

pub fn grid_columns(terminal_width: u16) -> usize {
    let inner = terminal_width.saturating_sub(PREVIEW_WIDTH).saturating_sub(2);
    usize::from(inner / CARD_WIDTH).max(1)
}

pub fn grid_rows_visible(terminal_height: u16) -> usize {
    let inner = terminal_height
        .saturating_sub(HEADER_HEIGHT)
        .saturating_sub(FOOTER_HEIGHT)
        .saturating_sub(2);
    usize::from(inner / CARD_HEIGHT).max(1)
}

/// First grid row to draw so that `cursor` stays on screen.
pub fn grid_scroll(cursor: usize, columns: usize, rows_visible: usize) -> usize {
    let row = cursor / columns.max(1);
    row.saturating_sub(rows_visible.saturating_sub(1))
}

/// Largest (cols, rows) cell box that keeps the sprite's aspect ratio.
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.height == 0 {
        return (max_cols, max_rows);
    }
    let image_ratio = sprite.width as f32 / sprite.height as f32;
    let cols_for_max_rows = image_ratio * max_rows as f32 * CELL_ASPECT;
    if cols_for_max_rows <= max_cols as f32 {
        let cols = cols_for_max_rows.max(1.0).round() as u16;
        return (cols.max(1), max_rows.max(1));
    }
    let rows_for_max_cols = max_cols as f32 / (image_ratio * CELL_ASPECT);
    let rows = rows_for_max_cols.max(1.0).round() as u16;
    (max_cols.max(1), rows.min(max_rows).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_their_own_colour() {
        assert_eq!(type_color("fire"), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(type_color("fairy"), Color::Rgb(0xEE, 0x99, 0xAC));
        let distinct: std::collections::HashSet<_> =
            TYPE_COLORS.iter().map(|(name, _)| *name).collect();
        assert_eq!(distinct.len(), 18);
    }

    #[test]
    fn unknown_type_falls_back_to_grey() {
        assert_eq!(type_color("shadow"), DEFAULT_TYPE_COLOR);
        assert_eq!(type_color(""), DEFAULT_TYPE_COLOR);
    }

    #[test]
    fn stat_fill_is_clamped() {
        assert_eq!(stat_fill(0), 0.0);
        assert_eq!(stat_fill(255), 1.0);
        assert_eq!(stat_fill(300), 1.0);
        assert!((stat_fill(51) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn stat_cells_never_overflow() {
        assert_eq!(stat_cells(255, 20), (20, 0));
        assert_eq!(stat_cells(400, 20), (20, 0));
        assert_eq!(stat_cells(0, 20), (0, 20));
        assert_eq!(stat_cells(45, 20), (4, 16));
    }

    #[test]
    fn stat_bands_use_strict_thresholds() {
        assert_eq!(StatBand::of(151), StatBand::High);
        assert_eq!(StatBand::of(150), StatBand::Mid);
        assert_eq!(StatBand::of(101), StatBand::Mid);
        assert_eq!(StatBand::of(100), StatBand::Low);
    }

    #[test]
    fn units_are_divided_by_ten() {
        assert_eq!(format_height(7), "Height: 0.7m");
        assert_eq!(format_height(20), "Height: 2m");
        assert_eq!(format_weight(69), "Weight: 6.9kg");
        assert_eq!(format_weight(1000), "Weight: 100kg");
    }

    #[test]
    fn labels() {
        assert_eq!(format_dex_id(1), "#001");
        assert_eq!(format_dex_id(1010), "#1010");
        assert_eq!(format_label("special-attack"), "special attack");
        assert_eq!(capitalize("mr mime"), "Mr Mime");
        assert_eq!(
            ability_label(&PokemonAbility {
                name: "solar-power".into(),
                is_hidden: true,
            }),
            "solar power (Hidden)"
        );
        assert_eq!(level_label(Some(16)).as_deref(), Some("Level 16"));
        assert_eq!(level_label(None), None);
    }

    #[test]
    fn grid_geometry() {
        assert_eq!(grid_columns(112), 4);
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_rows_visible(24), 5);
        assert_eq!(grid_scroll(0, 4, 5), 0);
        assert_eq!(grid_scroll(19, 4, 5), 0);
        assert_eq!(grid_scroll(20, 4, 5), 1);
    }

    #[test]
    fn sprite_fit_keeps_aspect() {
        let sprite = SpriteData {
            payload: String::new(),
            width: 96,
            height: 96,
            format: 100,
        };
        assert_eq!(sprite_fit(&sprite, 40, 10), (20, 10));
        assert_eq!(sprite_fit(&sprite, 10, 10), (10, 5));
    }
}
