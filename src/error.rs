use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but the board has {cells} cells")]
    TooManyMines { mines: u32, cells: u32 },
}

pub type Result<T> = core::result::Result<T, ConfigError>;
