use crate::action::{Action, Gesture};
use crate::args::MinesweeperArgs;
use crate::input_state::InputState;
use crate::minesweeper::Minesweeper;
use crate::util::{Pos, pos_i};
use crate::view::{Label, View};
use crate::win_state::WinState;
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::style::Color::*;
use ratatui::{
    DefaultTerminal, Frame,
    style::Stylize,
    text::Line,
    widgets::{Block, Paragraph},
};

const CELL_WIDTH: u16 = 3;
const START: &str = "[ Start Game ]";
const RESTART: &str = "[ Restart ]";

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = std::io::stdout().execute(event::DisableMouseCapture);
    }
}

pub fn main(args: MinesweeperArgs) -> Result<()> {
    color_eyre::install()?;
    let _guard = TerminalGuard;
    let terminal = ratatui::init();
    let result = App::new(&args).run(terminal);
    ratatui::restore();
    result
}

/// Display handle of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellHandle {
    pub label: Label,
    pub enabled: bool,
}

impl Default for CellHandle {
    fn default() -> Self {
        Self {
            label: Label::Empty,
            enabled: true,
        }
    }
}

impl CellHandle {
    fn glyph(self) -> (char, Color, Color) {
        const HIDDEN_COLOR: Color = Reset;
        const WARN_COLOR: Color = LightYellow;
        const NUM_COLOR: Color = Black;

        match (self.label, self.enabled) {
            (Label::Empty, true) => ('#', Reset, HIDDEN_COLOR),
            (Label::Empty, false) => (' ', Black, Reset),
            (Label::Flag, _) => ('!', LightRed, WARN_COLOR),
            (Label::Mine, _) => ('*', Black, LightRed),
            (Label::Number(n), _) => {
                let bg = match n {
                    1 => LightBlue,
                    2 => LightCyan,
                    3 => LightGreen,
                    4 => LightYellow,
                    5 => LightMagenta,
                    6 => Gray,
                    7 => White,
                    _ => LightRed,
                };
                ((b'0' + n.min(9)) as char, bg, NUM_COLOR)
            }
        }
    }
}

/// Everything the terminal shows. Kept in sync only through [`View`].
#[derive(Debug)]
pub struct Screen {
    rows: u16,
    cols: u16,
    cells: Vec<CellHandle>,
    board_visible: bool,
    start_visible: bool,
    restart_visible: bool,
}

impl Screen {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellHandle::default(); rows as usize * cols as usize],
            board_visible: false,
            start_visible: false,
            restart_visible: false,
        }
    }

    pub fn handle(&self, pos: Pos) -> Option<CellHandle> {
        pos_i(pos, self.rows, self.cols).map(|i| self.cells[i])
    }

    fn handle_mut(&mut self, pos: Pos) -> Option<&mut CellHandle> {
        pos_i(pos, self.rows, self.cols).map(|i| &mut self.cells[i])
    }
}

impl View for Screen {
    fn cell_label_changed(&mut self, pos: Pos, label: Label) {
        if let Some(handle) = self.handle_mut(pos) {
            handle.label = label;
        }
    }
    fn cell_input_disabled(&mut self, pos: Pos) {
        if let Some(handle) = self.handle_mut(pos) {
            handle.enabled = false;
        }
    }
    fn cell_reset(&mut self, pos: Pos) {
        if let Some(handle) = self.handle_mut(pos) {
            *handle = CellHandle::default();
        }
    }
    fn board_shown(&mut self) {
        self.board_visible = true;
    }
    fn board_hidden(&mut self) {
        self.board_visible = false;
    }
    fn start_control_shown(&mut self) {
        self.start_visible = true;
    }
    fn start_control_hidden(&mut self) {
        self.start_visible = false;
    }
    fn restart_control_shown(&mut self) {
        self.restart_visible = true;
    }
    fn restart_control_hidden(&mut self) {
        self.restart_visible = false;
    }
}

/// Where the window, the grid and the control sit on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    window: Rect,
    grid: Rect,
    button: Rect,
}

impl Layout {
    pub fn new(area: Rect, rows: u16, cols: u16) -> Self {
        let grid_width = cols * CELL_WIDTH;
        let inner_width = grid_width.max(START.len() as u16);
        // border, grid, spacer, control, border
        let window = area.clamp(Rect::new(0, 0, inner_width + 2, rows + 4));
        let grid = Rect::new(
            window.x + 1 + (inner_width - grid_width) / 2,
            window.y + 1,
            grid_width,
            rows,
        )
        .intersection(window);
        let button = Rect::new(window.x + 1, window.y + rows + 2, inner_width, 1)
            .intersection(window);
        Self {
            window,
            grid,
            button,
        }
    }

    pub fn cell_at(&self, column: u16, row: u16) -> Option<Pos> {
        if !self.grid.contains(Position { x: column, y: row }) {
            return None;
        }
        Some((row - self.grid.y, (column - self.grid.x) / CELL_WIDTH))
    }

    pub fn on_button(&self, column: u16, row: u16) -> bool {
        self.button.contains(Position { x: column, y: row })
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    game: Minesweeper,
    screen: Screen,
    rng: StdRng,
    input_state: InputState,
    layout: Layout,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(args: &MinesweeperArgs) -> Self {
        let config = args.config();
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Seeding mine placement with {seed}");

        let game = Minesweeper::new(config);
        let mut screen = Screen::new(config.rows(), config.cols());
        game.attach(&mut screen);
        Self {
            running: false,
            game,
            screen,
            rng: StdRng::seed_from_u64(seed),
            input_state: InputState::default(),
            layout: Layout::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        std::io::stdout().execute(event::EnableMouseCapture)?;

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.update();
        }

        std::io::stdout().execute(event::DisableMouseCapture)?;
        Ok(())
    }

    fn update(&mut self) {
        let Some(action) = self.input_state.action.take() else {
            return;
        };
        self.game.dispatch(action, &mut self.rng, &mut self.screen);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let config = self.game.config();
        self.layout = Layout::new(frame.area(), config.rows(), config.cols());
        let Layout {
            window,
            grid,
            button,
        } = self.layout;

        let title = match self.game.state() {
            WinState::Won => Line::from("You won!").bold().light_green().centered(),
            WinState::Lost => Line::from("Boom!").bold().light_red().centered(),
            WinState::Menu | WinState::Playing => {
                Line::from("Minesweeper").bold().light_blue().centered()
            }
        };
        let bottom = if self.screen.board_visible && !self.game.state().is_finished() {
            Line::from(format!(
                "{}/{} open, {} mines",
                self.game.revealed_count(),
                config.safe_cells(),
                self.game.board().mines()
            ))
            .centered()
        } else {
            Line::from("(Q)uit").centered()
        };

        frame.render_widget(
            Paragraph::new("").block(Block::bordered().title(title).title_bottom(bottom)),
            window,
        );

        if self.screen.board_visible {
            for y in grid.y..grid.bottom() {
                for x in grid.x..grid.right() {
                    let Some(pos) = self.layout.cell_at(x, y) else {
                        continue;
                    };
                    let Some(handle) = self.screen.handle(pos) else {
                        continue;
                    };
                    let (char, bg, fg) = handle.glyph();
                    // glyph in the middle column, padding around it
                    let char = if (x - grid.x) % CELL_WIDTH == 1 {
                        char
                    } else {
                        ' '
                    };
                    if let Some(c) = frame.buffer_mut().cell_mut((x, y)) {
                        c.set_char(char).set_fg(fg).set_bg(bg);
                    }
                }
            }

            let (row, col) = self.input_state.cursor;
            let cursor = Position {
                x: grid.x + col * CELL_WIDTH + 1,
                y: grid.y + row,
            };
            if grid.contains(cursor) {
                frame.set_cursor_position(cursor);
            }
        }

        let control = if self.screen.start_visible {
            Some(START)
        } else if self.screen.restart_visible {
            Some(RESTART)
        } else {
            None
        };
        if let Some(text) = control {
            frame.render_widget(Line::from(text).bold().centered(), button);
        }
    }

    fn handle_crossterm_events(&mut self) -> Result<()> {
        match event::read()? {
            // it's important to check KeyEventKind::Press to avoid handling key release events
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(m) => self.on_mouse_event(m),
            _ => {}
        }
        Ok(())
    }

    fn on_mouse_event(&mut self, m: MouseEvent) {
        let MouseEventKind::Down(button) = m.kind else {
            return;
        };

        if self.layout.on_button(m.column, m.row) {
            self.press_control();
            return;
        }

        if !self.screen.board_visible {
            return;
        }
        let Some(pos) = self.layout.cell_at(m.column, m.row) else {
            return;
        };
        if !self.screen.handle(pos).is_some_and(|h| h.enabled) {
            return;
        }
        self.input_state.cursor = pos;
        let gesture = match button {
            MouseButton::Left => {
                Gesture::from_modifier(m.modifiers.contains(KeyModifiers::CONTROL))
            }
            MouseButton::Right | MouseButton::Middle => Gesture::Secondary,
        };
        self.input_state.action = Some(Action::Cell(pos, gesture));
    }

    fn press_control(&mut self) {
        if self.screen.start_visible {
            self.input_state.action = Some(Action::Start);
        } else if self.screen.restart_visible {
            self.input_state.action = Some(Action::Restart);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let cursor = self.input_state.cursor;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Enter | KeyCode::Char('s')) if self.screen.start_visible => {
                self.input_state.action = Some(Action::Start);
            }
            (_, KeyCode::Enter | KeyCode::Char('r')) if self.screen.restart_visible => {
                self.input_state.action = Some(Action::Restart);
            }
            (_, KeyCode::Char('x' | ' ')) if self.screen.board_visible => {
                self.input_state.action = Some(Action::Cell(cursor, Gesture::Primary));
            }
            (_, KeyCode::Char('z' | 'f')) if self.screen.board_visible => {
                self.input_state.action = Some(Action::Cell(cursor, Gesture::Secondary));
            }
            (_, KeyCode::Left) => self.move_cursor(0, -1),
            (_, KeyCode::Right) => self.move_cursor(0, 1),
            (_, KeyCode::Up) => self.move_cursor(-1, 0),
            (_, KeyCode::Down) => self.move_cursor(1, 0),
            _ => {}
        }
    }

    fn move_cursor(&mut self, dr: i16, dc: i16) {
        let config = self.game.config();
        let (row, col) = &mut self.input_state.cursor;
        *row = row.saturating_add_signed(dr).min(config.rows() - 1);
        *col = col.saturating_add_signed(dc).min(config.cols() - 1);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let args = MinesweeperArgs {
            seed: Some(42),
            ..MinesweeperArgs::default()
        };
        let mut app = App::new(&args);
        app.layout = Layout::new(Rect::new(0, 0, 80, 24), 10, 10);
        app
    }

    fn click(app: &mut App, column: u16, row: u16, button: MouseButton, modifiers: KeyModifiers) {
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers,
        });
        app.update();
    }

    fn key(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
        app.update();
    }

    /// Screen coordinates of the middle of a grid cell.
    fn cell_point(app: &App, (row, col): Pos) -> (u16, u16) {
        (app.layout.grid.x + col * CELL_WIDTH + 1, app.layout.grid.y + row)
    }

    #[test]
    fn layout_hit_testing() {
        let layout = Layout::new(Rect::new(0, 0, 80, 24), 10, 10);
        assert_eq!(layout.grid, Rect::new(1, 1, 30, 10));
        assert_eq!(layout.cell_at(1, 1), Some((0, 0)));
        assert_eq!(layout.cell_at(3, 1), Some((0, 0)));
        assert_eq!(layout.cell_at(4, 1), Some((0, 1)));
        assert_eq!(layout.cell_at(30, 10), Some((9, 9)));
        assert_eq!(layout.cell_at(31, 10), None);
        assert_eq!(layout.cell_at(0, 0), None);
        assert!(layout.on_button(5, 12));
        assert!(!layout.on_button(5, 11));
    }

    #[test]
    fn glyphs_follow_handle_state() {
        let handle = |label, enabled| CellHandle { label, enabled }.glyph().0;
        assert_eq!(handle(Label::Empty, true), '#');
        assert_eq!(handle(Label::Empty, false), ' ');
        assert_eq!(handle(Label::Flag, true), '!');
        assert_eq!(handle(Label::Mine, false), '*');
        assert_eq!(handle(Label::Number(4), false), '4');
    }

    #[test]
    fn menu_shows_only_start() {
        let app = app();
        assert!(app.screen.start_visible);
        assert!(!app.screen.board_visible);
        assert!(!app.screen.restart_visible);
    }

    #[test]
    fn clicking_start_shows_board() {
        let mut app = app();
        let button = app.layout.button;
        click(&mut app, button.x + 2, button.y, MouseButton::Left, KeyModifiers::NONE);
        assert_eq!(app.game.state(), WinState::Playing);
        assert!(app.screen.board_visible);
        assert!(!app.screen.start_visible);
    }

    #[test]
    fn grid_clicks_ignored_in_menu() {
        let mut app = app();
        let (x, y) = cell_point(&app, (4, 4));
        click(&mut app, x, y, MouseButton::Left, KeyModifiers::NONE);
        assert_eq!(app.game.state(), WinState::Menu);
        assert_eq!(app.game.revealed_count(), 0);
    }

    #[test]
    fn right_click_and_ctrl_click_flag() {
        let mut app = app();
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.game.state(), WinState::Playing);

        let (x, y) = cell_point(&app, (2, 3));
        click(&mut app, x, y, MouseButton::Right, KeyModifiers::NONE);
        assert_eq!(app.screen.handle((2, 3)).unwrap().label, Label::Flag);

        click(&mut app, x, y, MouseButton::Left, KeyModifiers::CONTROL);
        assert_eq!(app.screen.handle((2, 3)).unwrap().label, Label::Empty);
        assert!(app.screen.handle((2, 3)).unwrap().enabled);
    }

    #[test]
    fn playing_to_the_end_offers_restart() {
        let mut app = app();
        key(&mut app, KeyCode::Char('s'));

        // open every safe cell, or stop early on a mine
        let cells: Vec<_> = app.game.board().iter().collect();
        for (pos, content) in cells {
            if app.game.state().is_finished() {
                break;
            }
            if content == crate::cell_content::CellContent::Mine {
                continue;
            }
            let (x, y) = cell_point(&app, pos);
            click(&mut app, x, y, MouseButton::Left, KeyModifiers::NONE);
        }
        assert_eq!(app.game.state(), WinState::Won);
        assert!(app.screen.restart_visible);
        assert!(app.screen.cells.iter().all(|h| !h.enabled));
        assert_eq!(
            app.screen.cells.iter().filter(|h| h.label == Label::Mine).count(),
            10
        );

        key(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.state(), WinState::Menu);
        assert!(app.screen.start_visible);
        assert!(!app.screen.board_visible);
        assert!(!app.screen.restart_visible);
    }

    #[test]
    fn keyboard_reveal_follows_cursor() {
        let mut app = app();
        key(&mut app, KeyCode::Enter);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Right);
        key(&mut app, KeyCode::Right);
        assert_eq!(app.input_state.cursor, (1, 2));
        key(&mut app, KeyCode::Char('f'));
        assert_eq!(app.screen.handle((1, 2)).unwrap().label, Label::Flag);

        for _ in 0..20 {
            key(&mut app, KeyCode::Left);
            key(&mut app, KeyCode::Up);
        }
        assert_eq!(app.input_state.cursor, (0, 0));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        app.running = true;
        key(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
