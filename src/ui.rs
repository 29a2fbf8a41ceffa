use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::display::{self, StatBand, CARD_HEIGHT, CARD_WIDTH, EVOLUTION_SEPARATOR};
use crate::sprite::{self, SpriteData};
use crate::sprite_backend::{self, Placement};
use crate::state::{AppState, EntityModal, EvolutionStage, PokemonDetail, PokemonStat};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(224, 96, 88);

const MODAL_MAX_WIDTH: u16 = 72;
const MODAL_MAX_HEIGHT: u16 = 40;
const MODAL_SPRITE_WIDTH: u16 = 20;
const MODAL_HEADER_HEIGHT: u16 = 7;
const STAGE_MAX_WIDTH: u16 = 18;
const STAGE_SPRITE_ROWS: u16 = 4;
const STAT_LABEL_WIDTH: usize = 16;
const CLOSE_LABEL: &str = "[x]";

const PREVIEW_IMAGE_ID: u32 = 1;
const MODAL_IMAGE_ID: u32 = 2;
const STAGE_IMAGE_ID: u32 = 3;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CatalogComponentId {
    Grid,
    Modal,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogContext {
    Grid,
    Modal,
}

impl EventRoutingState<CatalogComponentId, CatalogContext> for AppState {
    fn focused(&self) -> Option<CatalogComponentId> {
        if self.modal.is_some() {
            Some(CatalogComponentId::Modal)
        } else {
            Some(CatalogComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<CatalogComponentId> {
        self.modal.as_ref().map(|_| CatalogComponentId::Modal)
    }

    fn binding_context(&self, id: CatalogComponentId) -> CatalogContext {
        match id {
            CatalogComponentId::Grid => CatalogContext::Grid,
            CatalogComponentId::Modal => CatalogContext::Modal,
        }
    }

    fn default_context(&self) -> CatalogContext {
        CatalogContext::Grid
    }
}

/// Where the last frame put the clickable things.
#[derive(Clone, Copy, Debug, Default)]
struct GridGeometry {
    area: Rect,
    columns: usize,
    rows_visible: usize,
    first_row: usize,
}

pub struct CatalogUi {
    status_bar: StatusBar,
    grid: Option<GridGeometry>,
    modal_area: Option<Rect>,
    close_area: Option<Rect>,
    placements: Vec<Placement>,
}

impl Default for CatalogUi {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogUi {
    pub fn new() -> Self {
        Self {
            status_bar: StatusBar::new(),
            grid: None,
            modal_area: None,
            close_area: None,
            placements: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<CatalogComponentId>,
    ) {
        self.draw(frame, area, state);
        if let Some(grid) = self.grid {
            event_ctx.set_component_area(CatalogComponentId::Grid, grid.area);
        }
        if state.modal.is_some() {
            // the backdrop belongs to the modal too
            event_ctx.set_component_area(CatalogComponentId::Modal, area);
        }
    }

    /// Draws a full frame and publishes the sprite placements it produced.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.placements.clear();
        self.grid = None;
        self.modal_area = None;
        self.close_area = None;

        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(display::HEADER_HEIGHT),
                Constraint::Min(CARD_HEIGHT + 2),
                Constraint::Length(display::FOOTER_HEIGHT),
            ])
            .split(area);

        render_header(frame, layout[0], state);
        self.render_body(frame, layout[1], state);
        self.render_footer(frame, layout[2], state);

        if let Some(modal) = state.modal.as_ref() {
            // kitty images sit above text, so nothing from underneath may leak
            self.placements.clear();
            self.render_modal(frame, area, modal, state.tick);
        }

        sprite_backend::show_sprites(self.placements.clone());
    }

    pub fn handle_grid_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Left | KeyCode::Char('h') => vec![Action::GridMove(-1)],
                KeyCode::Right | KeyCode::Char('l') => vec![Action::GridMove(1)],
                KeyCode::Up | KeyCode::Char('k') => vec![Action::GridMoveRow(-1)],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::GridMoveRow(1)],
                KeyCode::PageUp => vec![Action::GridPage(-1)],
                KeyCode::PageDown => vec![Action::GridPage(1)],
                KeyCode::Home | KeyCode::Char('g') => vec![Action::GridJumpTop],
                KeyCode::End | KeyCode::Char('G') => vec![Action::GridJumpBottom],
                KeyCode::Enter => vec![Action::EntityOpenHighlighted],
                KeyCode::Char('r') if state.list_error.is_some() && !state.list_loading => {
                    vec![Action::ListLoad]
                }
                _ => vec![],
            },
            EventKind::Scroll { delta, .. } if *delta != 0 => {
                vec![Action::GridMoveRow(delta.signum() as i16)]
            }
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                match self.card_at(mouse.column, mouse.row, state) {
                    Some(index) => vec![Action::GridSelect(index), Action::EntityOpenHighlighted],
                    None => vec![],
                }
            }
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_modal_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        match event {
            EventKind::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Esc | KeyCode::Char('x') => HandlerResponse::action(Action::ModalClose),
                _ => HandlerResponse::ignored(),
            },
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let at = Position::new(mouse.column, mouse.row);
                let on_close = self.close_area.is_some_and(|rect| rect.contains(at));
                let inside = self.modal_area.is_some_and(|rect| rect.contains(at));
                if on_close || !inside {
                    HandlerResponse::action(Action::ModalClose)
                } else {
                    HandlerResponse {
                        actions: vec![],
                        consumed: true,
                        needs_render: false,
                    }
                }
            }
            _ => HandlerResponse::ignored(),
        }
    }

    fn card_at(&self, column: u16, row: u16, state: &AppState) -> Option<usize> {
        let grid = self.grid?;
        if !grid.area.contains(Position::new(column, row)) {
            return None;
        }
        let col = usize::from((column - grid.area.x) / CARD_WIDTH);
        if col >= grid.columns {
            return None;
        }
        // leftover strip under the last whole card row is not part of any card
        let visible_row = usize::from((row - grid.area.y) / CARD_HEIGHT);
        if visible_row >= grid.rows_visible {
            return None;
        }
        let index = (visible_row + grid.first_row) * grid.columns + col;
        (index < state.summaries.len()).then_some(index)
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(CARD_WIDTH + 2),
                Constraint::Length(display::PREVIEW_WIDTH),
            ])
            .split(area);
        self.render_grid(frame, layout[0], state);
        self.render_preview(frame, layout[1], state);
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("CATALOG")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(error) = state.list_error.as_deref() {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    format!("Error: {error}"),
                    Style::default().fg(ACCENT_RED),
                )),
                Line::default(),
                Line::from(Span::styled("Press r to retry", Style::default().fg(TEXT_DIM))),
            ]);
            render_centered(frame, inner, text);
            return;
        }
        if state.list_loading {
            let text = Text::from(Line::from(vec![
                Span::styled(
                    display::spinner_frame(state.tick),
                    Style::default().fg(ACCENT_GOLD),
                ),
                Span::raw(" Loading Pokémon..."),
            ]));
            render_centered(frame, inner, text);
            return;
        }
        if state.summaries.is_empty() {
            render_centered(
                frame,
                inner,
                Text::from(Span::styled("No Pokémon found", Style::default().fg(TEXT_DIM))),
            );
            return;
        }

        let columns = usize::from(inner.width / CARD_WIDTH).max(1);
        let rows_visible = usize::from(inner.height / CARD_HEIGHT).max(1);
        let first_row = display::grid_scroll(state.cursor, columns, rows_visible);
        self.grid = Some(GridGeometry {
            area: inner,
            columns,
            rows_visible,
            first_row,
        });

        let first = first_row * columns;
        let last = (first + columns * rows_visible).min(state.summaries.len());
        for index in first..last {
            let offset = index - first;
            let card = Rect {
                x: inner.x + (offset % columns) as u16 * CARD_WIDTH,
                y: inner.y + (offset / columns) as u16 * CARD_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: CARD_HEIGHT.min(inner.height),
            };
            let summary = &state.summaries[index];
            let highlighted = index == state.cursor;
            let (bg, border) = if highlighted {
                (BG_HIGHLIGHT, ACCENT_GOLD)
            } else {
                (BG_PANEL, TEXT_DIM)
            };
            let line = Line::from(vec![
                Span::styled(
                    display::format_dex_id(summary.id),
                    Style::default().fg(ACCENT_GOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    display::capitalize(&summary.name),
                    Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
                ),
            ]);
            let paragraph = Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(bg))
                    .border_style(Style::default().fg(border)),
            );
            frame.render_widget(paragraph, card);
        }
    }

    fn render_preview(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("PREVIEW")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(summary) = state.highlighted() else {
            return;
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let title = Text::from(vec![
            Line::from(Span::styled(
                display::format_dex_id(summary.id),
                Style::default().fg(ACCENT_GOLD),
            )),
            Line::from(Span::styled(
                display::capitalize(&summary.name),
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            )),
        ]);
        frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), layout[0]);

        match state.preview.as_ref().filter(|preview| preview.url == summary.sprite) {
            Some(preview) => self.place_sprite(&preview.sprite, layout[1], PREVIEW_IMAGE_ID),
            None => {
                let placeholder = if state.preview_loading {
                    "[loading sprite]"
                } else {
                    "[no sprite]"
                };
                render_centered(
                    frame,
                    layout[1],
                    Text::from(Span::styled(placeholder, Style::default().fg(TEXT_DIM))),
                );
            }
        }

        frame.render_widget(
            Paragraph::new(Span::styled("Enter: details", Style::default().fg(TEXT_DIM)))
                .alignment(Alignment::Center),
            layout[2],
        );
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = status_text(state);
        let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];
        let hints = status_hints(state);
        let quit = [StatusBarHint::new("q", "Quit")];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::hints(&quit).with_separator("  "),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }

    fn render_modal(&mut self, frame: &mut Frame, area: Rect, modal: &EntityModal, tick: u64) {
        let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
        let height = area.height.saturating_sub(2).min(MODAL_MAX_HEIGHT);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        self.modal_area = Some(rect);

        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_GOLD));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let close_width = CLOSE_LABEL.len() as u16;
        if rect.width > close_width + 2 {
            let close = Rect {
                x: rect.x + rect.width - close_width - 1,
                y: rect.y,
                width: close_width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    CLOSE_LABEL,
                    Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
                )),
                close,
            );
            self.close_area = Some(close);
        }

        let Some(detail) = modal.detail.as_ref() else {
            let mut lines = vec![Line::from(Span::styled(
                display::capitalize(&modal.summary.name),
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            ))];
            if modal.resolving {
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled(display::spinner_frame(tick), Style::default().fg(ACCENT_GOLD)),
                    Span::raw(" Loading details..."),
                ]));
            }
            frame.render_widget(Paragraph::new(Text::from(lines)), inner);
            return;
        };

        let stages = modal.stages.as_deref().filter(|_| modal.evolution_visible());
        let mut constraints = vec![
            Constraint::Length(MODAL_HEADER_HEIGHT),
            Constraint::Length(detail.stats.len() as u16 + 2),
            Constraint::Length(3),
        ];
        if stages.is_some() {
            constraints.push(Constraint::Length(STAGE_SPRITE_ROWS + 4));
        }
        constraints.push(Constraint::Length(4));
        constraints.push(Constraint::Min(0));
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        self.render_modal_header(frame, sections[0], modal, detail);
        render_stats(frame, sections[1], &detail.stats);
        render_abilities(frame, sections[2], detail);
        let mut next = 3;
        if let Some(stages) = stages {
            self.render_evolution(frame, sections[next], modal, stages);
            next += 1;
        }
        render_physical(frame, sections[next], detail);
    }

    fn render_modal_header(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        modal: &EntityModal,
        detail: &PokemonDetail,
    ) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MODAL_SPRITE_WIDTH), Constraint::Min(1)])
            .split(area);

        match modal.sprite(detail.sprite.as_deref()) {
            Some(sprite) => self.place_sprite(sprite, layout[0], MODAL_IMAGE_ID),
            None => render_centered(
                frame,
                layout[0],
                Text::from(Span::styled("[no sprite]", Style::default().fg(TEXT_DIM))),
            ),
        }

        let mut badges = Vec::new();
        for type_name in &detail.types {
            badges.push(Span::styled(
                format!(" {} ", type_name.to_ascii_uppercase()),
                Style::default()
                    .bg(display::type_color(type_name))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
            badges.push(Span::raw(" "));
        }
        let text = Text::from(vec![
            Line::default(),
            Line::from(vec![
                Span::styled(
                    display::capitalize(&detail.name),
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(display::format_dex_id(detail.id), Style::default().fg(ACCENT_GOLD)),
            ]),
            Line::default(),
            Line::from(badges),
        ]);
        frame.render_widget(Paragraph::new(text), layout[1]);
    }

    fn render_evolution(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        modal: &EntityModal,
        stages: &[EvolutionStage],
    ) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        frame.render_widget(section_title("Evolution Chain"), layout[0]);

        let count = stages.len() as u16;
        let arrows = count.saturating_sub(1) * 3;
        let stage_width =
            (layout[1].width.saturating_sub(arrows) / count.max(1)).min(STAGE_MAX_WIDTH);
        let mut constraints = Vec::new();
        for index in 0..stages.len() {
            if index > 0 {
                constraints.push(Constraint::Length(3));
            }
            constraints.push(Constraint::Length(stage_width));
        }
        constraints.push(Constraint::Min(0));
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(layout[1]);

        for (index, stage) in stages.iter().enumerate() {
            if index > 0 {
                let arrow = cells[index * 2 - 1];
                let arrow = Rect {
                    y: arrow.y + STAGE_SPRITE_ROWS / 2,
                    height: arrow.height.min(1),
                    ..arrow
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        EVOLUTION_SEPARATOR,
                        Style::default().fg(ACCENT_GOLD),
                    ))
                    .alignment(Alignment::Center),
                    arrow,
                );
            }
            let cell = cells[index * 2];
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(STAGE_SPRITE_ROWS),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(cell);
            if let Some(sprite) = modal.sprite(stage.sprite.as_deref()) {
                self.place_sprite(sprite, parts[0], STAGE_IMAGE_ID + index as u32);
            }
            frame.render_widget(
                Paragraph::new(display::capitalize(&stage.name)).alignment(Alignment::Center),
                parts[1],
            );
            if let Some(level) = display::level_label(stage.min_level) {
                frame.render_widget(
                    Paragraph::new(Span::styled(level, Style::default().fg(TEXT_DIM)))
                        .alignment(Alignment::Center),
                    parts[2],
                );
            }
        }
    }

    fn place_sprite(&mut self, sprite: &SpriteData, area: Rect, id: u32) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (cols, rows) = display::sprite_fit(sprite, area.width, area.height);
        let x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
        let y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
        self.placements.push(Placement {
            x,
            y,
            data: sprite::kitty_sequence(sprite, cols, rows, id),
        });
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let count = if state.summaries.is_empty() {
        String::new()
    } else {
        format!("{} Pokémon", state.summaries.len())
    };
    let line = Line::from(vec![
        Span::styled(
            "Pokédex",
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(ACCENT_GOLD)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &[PokemonStat]) {
    let bar_width = usize::from(area.width).saturating_sub(STAT_LABEL_WIDTH + 6);
    let mut lines = vec![section_title_line("Base Stats")];
    for stat in stats {
        let band = StatBand::of(stat.base_value);
        let (filled, empty) = display::stat_cells(stat.base_value, bar_width);
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{:<width$}",
                    display::capitalize(&display::format_label(&stat.name)),
                    width = STAT_LABEL_WIDTH
                ),
                Style::default().fg(TEXT_DIM),
            ),
            Span::styled(format!("{:>4} ", stat.base_value), Style::default().fg(TEXT_MAIN)),
            Span::styled("█".repeat(filled), Style::default().fg(band.color())),
            Span::styled("░".repeat(empty), Style::default().fg(TEXT_DIM)),
        ]));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_abilities(frame: &mut Frame, area: Rect, detail: &PokemonDetail) {
    let mut badges = Vec::new();
    for ability in &detail.abilities {
        badges.push(Span::styled(
            format!("[{}]", display::ability_label(ability)),
            Style::default().fg(ACCENT_TEAL),
        ));
        badges.push(Span::raw(" "));
    }
    let text = Text::from(vec![section_title_line("Abilities"), Line::from(badges)]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

fn render_physical(frame: &mut Frame, area: Rect, detail: &PokemonDetail) {
    let text = Text::from(vec![
        section_title_line("Physical Characteristics"),
        Line::from(display::format_height(detail.height)),
        Line::from(display::format_weight(detail.weight)),
    ]);
    frame.render_widget(Paragraph::new(text), area);
}

fn section_title(title: &'static str) -> Paragraph<'static> {
    Paragraph::new(section_title_line(title))
}

fn section_title_line(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
    ))
}

fn render_centered(frame: &mut Frame, area: Rect, text: Text<'_>) {
    let height = (text.lines.len() as u16).min(area.height);
    let centered = Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    };
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        centered,
    );
}

fn status_text(state: &AppState) -> String {
    if state.list_loading {
        return "Loading Pokémon...".to_string();
    }
    if let Some(error) = state.list_error.as_deref() {
        return format!("Error: {error}");
    }
    match state.modal.as_ref() {
        Some(modal) if modal.resolving => {
            format!("Loading {}...", display::capitalize(&modal.summary.name))
        }
        _ => format!("{} loaded", state.summaries.len()),
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.modal.is_some() {
        return vec![StatusBarHint::new("Esc/x", "Close")];
    }
    if state.list_error.is_some() {
        return vec![StatusBarHint::new("r", "Retry")];
    }
    vec![
        StatusBarHint::new("hjkl", "Move"),
        StatusBarHint::new("PgUp/PgDn", "Page"),
        StatusBarHint::new("Enter", "Details"),
    ]
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}
