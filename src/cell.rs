use crate::cell_content::CellContent;
use crate::cell_content::CellContent::*;
use crate::flag::Flag;
use crate::tile_visibility::TileVisibility;
use crate::tile_visibility::TileVisibility::*;
use std::fmt;
use std::fmt::{Display, Formatter, Write};

/// Snapshot of one cell: what it holds and what the player has done to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub visibility: TileVisibility,
    pub content: CellContent,
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match self.visibility {
            Hidden(Flag::None) => '#',
            Hidden(Flag::Flagged) => '!',
            Show => match self.content {
                Clear(0) => '.',
                Clear(n) => (b'0' + n) as char,
                Mine => '*',
            },
        };

        f.write_char(c)
    }
}
