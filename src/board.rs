use crate::cell_content::CellContent;
use crate::cell_content::CellContent::*;
use crate::config::GameConfig;
use crate::util::{DIRS_8, Pos, i_pos, pos_i, valid_neighbors};
use rand::Rng;

/// Mine layout plus neighbor counts, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    cols: u16,
    mines: u32,
    cells: Vec<CellContent>,
}

impl Board {
    /// Places `config.mines()` mines by rejection sampling, then counts
    /// neighbors for every safe cell.
    pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let rows = config.rows();
        let cols = config.cols();
        let mut cells = vec![CellContent::default(); config.total_cells() as usize];

        if config.mines() == 0 {
            log::warn!("Generating a {rows}x{cols} board without mines");
        }

        let mut placed = 0;
        let mut draws = 0u64;
        while placed < config.mines() {
            let row = rng.random_range(0..=rows - 1);
            let col = rng.random_range(0..=cols - 1);
            draws += 1;
            // in bounds by construction
            let i = row as usize * cols as usize + col as usize;
            if cells[i] != Mine {
                cells[i] = Mine;
                placed += 1;
            }
        }
        log::debug!("Placed {placed} mines in {draws} draws");

        let mut board = Self {
            rows,
            cols,
            mines: placed,
            cells,
        };
        board.count_neighbors();
        board
    }

    /// Builds a board with mines exactly at `mines`. Out of range or repeated
    /// positions are skipped.
    pub fn with_mines(config: GameConfig, mines: &[Pos]) -> Self {
        let rows = config.rows();
        let cols = config.cols();
        let mut cells = vec![CellContent::default(); config.total_cells() as usize];
        let mut placed = 0;
        for &pos in mines {
            let Some(i) = pos_i(pos, rows, cols) else {
                continue;
            };
            if cells[i] != Mine {
                cells[i] = Mine;
                placed += 1;
            }
        }

        let mut board = Self {
            rows,
            cols,
            mines: placed,
            cells,
        };
        board.count_neighbors();
        board
    }

    fn count_neighbors(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        for i in 0..self.cells.len() {
            if self.cells[i] == Mine {
                continue;
            }
            let Some(pos) = i_pos(i, rows, cols) else {
                continue;
            };
            let count = valid_neighbors(&DIRS_8, pos, rows, cols)
                .filter(|&n| self.get(n) == Some(Mine))
                .count();
            self.cells[i] = Clear(count as u8);
        }
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
        self.cells.len() as u32
    }

    pub fn get(&self, pos: Pos) -> Option<CellContent> {
        pos_i(pos, self.rows, self.cols).map(|i| self.cells[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellContent)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (((i / cols) as u16, (i % cols) as u16), c))
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter()
            .filter(|&(_, content)| content == Mine)
            .map(|(pos, _)| pos)
    }
}
