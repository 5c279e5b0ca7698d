use crate::util::Pos;

/// Which kind of click hit a cell. Secondary comes from a real right click
/// or from a modifier held during a primary click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    Primary,
    Secondary,
}

impl Gesture {
    pub fn from_modifier(held: bool) -> Self {
        if held { Self::Secondary } else { Self::Primary }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Restart,
    Cell(Pos, Gesture),
}
