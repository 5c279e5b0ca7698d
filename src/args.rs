use crate::config::GameConfig;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Terminal minesweeper
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct MinesweeperArgs {
    /// rows
    #[arg(short = 'y', long, default_value_t = 10)]
    pub rows: u16,
    /// columns
    #[arg(short = 'x', long, default_value_t = 10)]
    pub cols: u16,
    /// amount of mines
    #[arg(short, long, default_value_t = 10)]
    pub mines: u32,
    /// seed for mine placement, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// log verbosity
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Default for MinesweeperArgs {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
            seed: None,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl MinesweeperArgs {
    pub const MIN_SIDE: u16 = 2;
    pub const MAX_SIDE: u16 = 64;

    pub fn clamped(mut self) -> Self {
        self.rows = self.rows.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        self.cols = self.cols.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        // leave at least one safe cell, otherwise placement never terminates
        let max_mines = self.rows as u32 * self.cols as u32 - 1;
        self.mines = self.mines.min(max_mines);
        self
    }

    pub fn config(&self) -> GameConfig {
        let args = self.clone().clamped();
        GameConfig::new(args.rows, args.cols, args.mines)
            .unwrap_or_else(|_| GameConfig::default())
    }
}
