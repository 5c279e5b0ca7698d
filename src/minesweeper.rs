use crate::action::Action;
use crate::action::Gesture::*;
use crate::board::Board;
use crate::cell::Cell;
use crate::cell_content::CellContent::*;
use crate::config::GameConfig;
use crate::error::Result;
use crate::flag::Flag;
use crate::tile_visibility::TileVisibility;
use crate::tile_visibility::TileVisibility::*;
use crate::util::{DIRS_9, Pos, pos_i, valid_neighbors};
use crate::view::{Label, View};
use crate::win_state::WinState;
use crate::win_state::WinState::*;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoOp,
    Continued,
    HitMine,
    Won,
}

/// One game session: the board, what the player uncovered, and where in the
/// menu/play/finished cycle it is.
#[derive(Debug)]
pub struct Minesweeper {
    config: GameConfig,
    board: Board,
    cells: Vec<TileVisibility>,
    win_state: WinState,
    revealed_count: u32,
    // reused between reveals so the worklist is only allocated once
    point_queue: VecDeque<Pos>,
}

impl Default for Minesweeper {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Minesweeper {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::with_mines(config, &[]),
            cells: vec![TileVisibility::default(); config.total_cells() as usize],
            win_state: Menu,
            revealed_count: 0,
            point_queue: VecDeque::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> WinState {
        self.win_state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed_count(&self) -> u32 {
        self.revealed_count
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        let i = self.index(pos)?;
        Some(Cell {
            visibility: self.cells[i],
            content: self.board.get(pos)?,
        })
    }

    // geometry always comes from the installed board, which `cells` mirrors
    fn index(&self, pos: Pos) -> Option<usize> {
        pos_i(pos, self.board.rows(), self.board.cols())
    }

    fn safe_cells(&self) -> u32 {
        self.board.total_cells() - self.board.mines()
    }

    /// Brings a freshly attached view in line with the current state.
    pub fn attach(&self, view: &mut impl View) {
        match self.win_state {
            Menu => {
                view.board_hidden();
                view.restart_control_hidden();
                view.start_control_shown();
            }
            Playing | Won | Lost => {
                view.start_control_hidden();
                view.board_shown();
                if self.win_state.is_finished() {
                    view.restart_control_shown();
                } else {
                    view.restart_control_hidden();
                }
            }
        }
    }

    /// Routes a user action, ignoring anything the current state does not
    /// accept.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
        view: &mut impl View,
    ) -> Option<RevealResult> {
        match (action, self.win_state) {
            (Action::Start, Menu) => {
                if let Err(err) = self.start(rng, view) {
                    log::warn!("Cannot start: {err}");
                }
                None
            }
            (Action::Restart, Won | Lost) => {
                self.restart(view);
                None
            }
            (Action::Cell(pos, Primary), Playing) => Some(self.reveal(pos, view)),
            (Action::Cell(pos, Secondary), Playing) => {
                self.toggle_flag(pos, view);
                None
            }
            (action, state) => {
                log::debug!("Ignoring {action:?} while {state:?}");
                None
            }
        }
    }

    /// Generates a new minefield and begins play.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        view: &mut impl View,
    ) -> Result<()> {
        let board = Board::generate(self.config, rng);
        self.start_with(board, view)
    }

    /// Begins play on a prepared minefield.
    ///
    /// A board without a safe cell is rejected and the session is left as is.
    pub fn start_with(&mut self, board: Board, view: &mut impl View) -> Result<()> {
        self.config = GameConfig::new(board.rows(), board.cols(), board.mines())?;
        self.cells = vec![TileVisibility::default(); board.total_cells() as usize];
        self.board = board;
        self.revealed_count = 0;
        self.point_queue.clear();

        for (pos, _) in self.board.iter() {
            view.cell_reset(pos);
        }
        view.board_shown();
        self.win_state = Playing;
        view.start_control_hidden();
        log::info!(
            "New game {}x{} with {} mines",
            self.board.rows(),
            self.board.cols(),
            self.board.mines()
        );
        log::debug!("Minefield:\n{}", self.board_dump());
        Ok(())
    }

    /// Back to the menu. Does not start a new game by itself.
    pub fn restart(&mut self, view: &mut impl View) {
        self.win_state = Menu;
        view.start_control_shown();
        view.board_hidden();
        view.restart_control_hidden();
        log::info!("Back to menu");
    }

    /// Uncovers `pos`, flooding outwards from blank cells.
    ///
    /// Out of range, already revealed and flagged cells are ignored, as is
    /// everything outside of play.
    pub fn reveal(&mut self, pos: Pos, view: &mut impl View) -> RevealResult {
        if self.win_state != Playing {
            return RevealResult::NoOp;
        }
        let Some(i) = self.index(pos) else {
            return RevealResult::NoOp;
        };
        let visibility = self.cells[i];
        if visibility.is_revealed() || visibility.is_flagged() {
            return RevealResult::NoOp;
        }

        if let Some(Mine) = self.board.get(pos) {
            self.cells[i] = Show;
            view.cell_label_changed(pos, Label::Mine);
            view.cell_input_disabled(pos);
            log::info!("Hit a mine at {pos:?}");
            self.finish(false, view);
            return RevealResult::HitMine;
        }

        let rows = self.board.rows();
        let cols = self.board.cols();
        let before = self.revealed_count;
        self.point_queue.push_back(pos);

        while let Some(p) = self.point_queue.pop_front() {
            let Some(i) = pos_i(p, rows, cols) else {
                continue;
            };
            let Hidden(Flag::None) = self.cells[i] else {
                continue;
            };
            // blank cells never border a mine, so the flood cannot reach one
            let Some(Clear(n)) = self.board.get(p) else {
                continue;
            };

            self.cells[i] = Show;
            self.revealed_count += 1;
            let label = if n == 0 {
                Label::Empty
            } else {
                Label::Number(n)
            };
            view.cell_label_changed(p, label);
            view.cell_input_disabled(p);

            if n == 0 {
                self.point_queue.extend(valid_neighbors(&DIRS_9, p, rows, cols));
            }
        }
        log::debug!(
            "Revealed {} cells from {pos:?}, {}/{} safe cells open",
            self.revealed_count - before,
            self.revealed_count,
            self.safe_cells()
        );

        if self.revealed_count == self.safe_cells() {
            self.finish(true, view);
            RevealResult::Won
        } else {
            RevealResult::Continued
        }
    }

    /// Flips the flag on a hidden cell and returns whether it is now flagged.
    pub fn toggle_flag(&mut self, pos: Pos, view: &mut impl View) -> bool {
        let Some(i) = self.index(pos) else {
            return false;
        };
        let visibility = self.cells[i];
        if self.win_state != Playing {
            return visibility.is_flagged();
        }
        let Hidden(flag) = visibility else {
            return false;
        };

        let flag = flag.toggled();
        self.cells[i] = Hidden(flag);
        let label = if flag.is_set() {
            Label::Flag
        } else {
            Label::Empty
        };
        view.cell_label_changed(pos, label);
        log::debug!("Flag at {pos:?} is now {flag:?}");
        flag.is_set()
    }

    /// Ends the game: shows every mine and locks the whole board.
    pub fn finish(&mut self, won: bool, view: &mut impl View) {
        self.win_state = if won { Won } else { Lost };
        for pos in self.board.mine_positions() {
            view.cell_label_changed(pos, Label::Mine);
        }
        for (pos, _) in self.board.iter() {
            view.cell_input_disabled(pos);
        }
        view.restart_control_shown();
        log::info!("Game over, {:?}\n{}", self.win_state, self);
    }

    fn board_dump(&self) -> String {
        let mut out = String::new();
        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                let content = self.board.get((row, col)).unwrap_or_default();
                out.push_str(
                    &Cell {
                        visibility: Show,
                        content,
                    }
                    .to_string(),
                );
            }
            out.push('\n');
        }
        out
    }
}

impl Display for Minesweeper {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                if let Some(cell) = self.cell((row, col)) {
                    write!(f, "{cell}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
