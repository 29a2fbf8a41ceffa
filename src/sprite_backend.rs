use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

const DELETE_ALL: &str = "\x1b_Ga=d,d=a\x1b\\";

/// A kitty image sequence anchored at a terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub data: String,
}

/// Images requested by the last render pass.
#[derive(Default, Debug, Clone)]
pub struct SpriteRegistry {
    placements: Vec<Placement>,
}

impl SpriteRegistry {
    pub fn replace(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

static REGISTRY: OnceLock<Arc<Mutex<SpriteRegistry>>> = OnceLock::new();

pub fn sprite_registry() -> Arc<Mutex<SpriteRegistry>> {
    REGISTRY
        .get_or_init(|| Arc::new(Mutex::new(SpriteRegistry::default())))
        .clone()
}

// A panic mid-render leaves plain data behind, safe to keep using.
fn lock(registry: &Mutex<SpriteRegistry>) -> MutexGuard<'_, SpriteRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn show_sprites(placements: Vec<Placement>) {
    let registry = sprite_registry();
    lock(&registry).replace(placements);
}

pub fn clear_sprites() {
    let registry = sprite_registry();
    lock(&registry).clear();
}

/// Crossterm backend that paints registered kitty images after each frame.
#[derive(Debug, Clone)]
pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    registry: Arc<Mutex<SpriteRegistry>>,
    shown: Vec<Placement>,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, registry: Arc<Mutex<SpriteRegistry>>) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            registry,
            shown: Vec::new(),
        }
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut content = content.peekable();
        let cells_changed = content.peek().is_some();
        self.inner.draw(content)?;

        let placements = lock(&self.registry).placements().to_vec();
        if !cells_changed && placements == self.shown {
            return Ok(());
        }
        if !self.shown.is_empty() {
            queue!(self.inner, Print(DELETE_ALL))?;
        }
        for placement in &placements {
            queue!(
                self.inner,
                MoveTo(placement.x, placement.y),
                Print(&placement.data)
            )?;
        }
        self.shown = placements;
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
