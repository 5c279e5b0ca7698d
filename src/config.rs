use crate::error::{ConfigError, Result};

/// Board geometry and mine count for one game.
///
/// Always satisfies `mines < rows * cols`, so mine placement terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    rows: u16,
    cols: u16,
    mines: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
        }
    }
}

impl GameConfig {
    pub fn new(rows: u16, cols: u16, mines: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        let cells = rows as u32 * cols as u32;
        if mines >= cells {
            return Err(ConfigError::TooManyMines { mines, cells });
        }
        Ok(Self { rows, cols, mines })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn mines(&self) -> u32 {
        self.mines
    }

    pub fn total_cells(&self) -> u32 {
        self.rows as u32 * self.cols as u32
    }

    /// Number of safe cells that must be revealed to win.
    pub fn safe_cells(&self) -> u32 {
        self.total_cells() - self.mines
    }
}
