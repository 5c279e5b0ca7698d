use crate::flag::Flag;

/// Mutable per-cell state. Only hidden cells carry a flag, so a cell can
/// never be revealed and flagged at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileVisibility {
    Hidden(Flag),
    Show,
}

impl Default for TileVisibility {
    fn default() -> Self {
        Self::Hidden(Flag::None)
    }
}

impl TileVisibility {
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Show)
    }

    pub fn is_flagged(self) -> bool {
        matches!(self, Self::Hidden(flag) if flag.is_set())
    }
}
