use args::MinesweeperArgs;
use clap::Parser;
use color_eyre::Result;
use simplelog::{Config, WriteLogger};
use std::fs::File;

mod action;
mod args;
mod board;
mod cell;
mod cell_content;
mod config;
mod error;
mod flag;
mod input_state;
mod minesweeper;
mod tile_visibility;
mod ui;
mod util;
mod view;
mod win_state;

/// The terminal belongs to the UI, so logs only go to a file when asked for.
fn init_logging(args: &MinesweeperArgs) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    WriteLogger::init(args.log_level, Config::default(), File::create(path)?)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = MinesweeperArgs::parse();
    init_logging(&args)?;
    log::info!("Starting with {:?}", args.config());
    ui::main(args)
}
