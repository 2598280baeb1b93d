use comfy_table::{Cell, Color};
use console::{style, StyledObject};

use gamevault_core::models::game::GameStatus;

/// Colours for terminal output, picked by the stored theme preference.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    dark: bool,
}

impl Palette {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn status(&self, status: GameStatus) -> Color {
        match (status, self.dark) {
            (GameStatus::Playing, true) => Color::Green,
            (GameStatus::Playing, false) => Color::DarkGreen,
            (GameStatus::Completed, true) => Color::Magenta,
            (GameStatus::Completed, false) => Color::DarkMagenta,
            (GameStatus::Backlog, true) => Color::Yellow,
            (GameStatus::Backlog, false) => Color::DarkYellow,
            (GameStatus::Dropped, true) => Color::Red,
            (GameStatus::Dropped, false) => Color::DarkRed,
        }
    }

    pub fn status_cell(&self, status: GameStatus) -> Cell {
        Cell::new(status).fg(self.status(status))
    }

    pub fn heading<D>(&self, text: D) -> StyledObject<D> {
        if self.dark {
            style(text).cyan().bold()
        } else {
            style(text).blue().bold()
        }
    }

    /// Header cells in the theme's accent colour.
    pub fn header(&self, names: &[&str]) -> Vec<Cell> {
        let accent = if self.dark { Color::Cyan } else { Color::Blue };
        names.iter().map(|n| Cell::new(n).fg(accent)).collect()
    }
}
