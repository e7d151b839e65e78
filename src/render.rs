use std::io::Write;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Facing, GhostColor, GhostFace, Pos};
use crate::config::GlyphSet;
use crate::error::Result;
use crate::game::{FrameSink, Snapshot};
use crate::level::{Tile, GRID_H, GRID_W};

const CELL_W: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player(Facing),
    Ghost(GhostFace),
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

impl Glyph {
    pub fn text(self, set: GlyphSet) -> &'static str {
        match set {
            GlyphSet::Ascii => match self {
                Glyph::Player(Facing::Neutral) => " o",
                Glyph::Player(Facing::Up) => " v",
                Glyph::Player(Facing::Left) => " >",
                Glyph::Player(Facing::Down) => " ^",
                Glyph::Player(Facing::Right) => " <",
                Glyph::Ghost(GhostFace::Left) => "&~",
                Glyph::Ghost(GhostFace::Right) => "~&",
                Glyph::Ghost(GhostFace::Caught) => "XX",
                Glyph::Wall => "[]",
                Glyph::Empty => "  ",
                Glyph::Pellet => " .",
                Glyph::Power => " *",
            },
            GlyphSet::Unicode => match self {
                Glyph::Player(Facing::Neutral) => "😃",
                Glyph::Player(Facing::Up) => "ᗢ",
                Glyph::Player(Facing::Left) => "ᗤ",
                Glyph::Player(Facing::Down) => "ᗣ",
                Glyph::Player(Facing::Right) => "ᗧ",
                Glyph::Ghost(GhostFace::Left) => "ᗝ~",
                Glyph::Ghost(GhostFace::Right) => "~ᗝ",
                Glyph::Ghost(GhostFace::Caught) => "😱",
                Glyph::Wall => "██",
                Glyph::Empty => "  ",
                Glyph::Pellet => "· ",
                Glyph::Power => "● ",
            },
        }
    }
}

fn ghost_color(color: GhostColor) -> Color {
    match color {
        GhostColor::Red => Color::Red,
        GhostColor::Cyan => Color::Cyan,
        GhostColor::Magenta => Color::Magenta,
        GhostColor::Green => Color::Green,
    }
}

/// Ghosts draw over the player; vulnerable ghosts lose their colour.
pub fn cell_for(snapshot: &Snapshot<'_>, pos: Pos) -> Cell {
    if let Some(ghost) = snapshot.ghosts.iter().find(|g| g.pos == pos) {
        let color = if snapshot.vulnerable() {
            Color::White
        } else {
            ghost_color(ghost.color)
        };
        return Cell {
            glyph: Glyph::Ghost(ghost.face),
            color,
        };
    }
    if pos == snapshot.player.pos {
        return Cell {
            glyph: Glyph::Player(snapshot.player.facing),
            color: Color::Yellow,
        };
    }
    match snapshot.maze.tile(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Empty | Tile::Consumed => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        Tile::Pellet => Cell {
            glyph: Glyph::Pellet,
            color: Color::Yellow,
        },
        Tile::Power => Cell {
            glyph: Glyph::Power,
            color: Color::Yellow,
        },
    }
}

pub fn hud_line(snapshot: &Snapshot<'_>, quit_key: char) -> String {
    let mut hud = format!("SCORE: {}", snapshot.score);
    if snapshot.vulnerable() {
        hud.push_str(&format!("  POWER: {}", snapshot.power_timer));
    }
    hud.push_str(&format!(
        "  Left: {}  ({} to quit)",
        snapshot.remaining(),
        quit_key
    ));
    hud
}

/// Full-screen renderer. Only cells that changed since the last frame are
/// redrawn.
pub struct Renderer<W: Write> {
    out: W,
    glyphs: GlyphSet,
    quit_key: char,
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, glyphs: GlyphSet, quit_key: char) -> Self {
        Self {
            out,
            glyphs,
            quit_key,
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                GRID_W * GRID_H
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(EnterAlternateScreen)?;
        self.out.queue(Hide)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        self.out.queue(Show)?;
        self.out.queue(LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clears the screen and prints `lines`, one per row.
    pub fn message(&mut self, lines: &[&str]) -> Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            self.out.queue(MoveTo(0, row as u16))?;
            self.out.queue(Print(line))?;
        }
        self.out.flush()?;
        self.needs_full = true;
        Ok(())
    }

    /// Prints a line under the board, keeping the last frame visible.
    pub fn footer(&mut self, text: &str) -> Result<()> {
        self.out
            .queue(MoveTo(self.origin_x, self.origin_y + GRID_H as u16 + 1))?;
        self.out.queue(SetForegroundColor(Color::White))?;
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn draw(&mut self, snapshot: &Snapshot<'_>, term_size: (u16, u16)) -> Result<()> {
        let needed_h = (GRID_H + 3) as u16;
        let needed_w = (GRID_W * CELL_W) as u16;
        let (term_w, term_h) = term_size;

        self.out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            self.out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            self.out.queue(Print(msg))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(snapshot, self.quit_key);
        if self.needs_full || hud != self.last_hud {
            self.out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            self.out.queue(SetForegroundColor(Color::White))?;
            self.out.queue(Clear(ClearType::CurrentLine))?;
            self.out.queue(Print(&hud))?;
            self.out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..GRID_H {
            for x in 0..GRID_W {
                let cell = cell_for(snapshot, Pos { x, y });
                let idx = y * GRID_W + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        // The popup overlaps neighbouring cells, so the next frame repaints.
        if let Some(popup) = snapshot.popup {
            let x = popup.pos.x.saturating_sub(1);
            let y = popup.pos.y.saturating_sub(1);
            self.out.queue(MoveTo(
                self.origin_x + (x * CELL_W) as u16,
                self.origin_y + y as u16,
            ))?;
            self.out.queue(SetForegroundColor(Color::White))?;
            self.out.queue(Print(format!("+{}", popup.amount)))?;
            self.out.queue(ResetColor)?;
            self.needs_full = true;
        }

        self.out.flush()?;
        Ok(())
    }

    fn draw_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let text = cell.glyph.text(self.glyphs);
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(cell.color))?;
        self.out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.out.queue(Print(' '))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> FrameSink for Renderer<W> {
    fn frame(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let size = terminal::size()?;
        self.draw(snapshot, size)
    }
}
