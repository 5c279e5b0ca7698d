/// Static content of a board cell, fixed once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// Safe cell with the number of mines among its neighbors, `0..=8`.
    Clear(u8),
    Mine,
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Clear(0)
    }
}
