#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Flag {
    #[default]
    None,
    Flagged,
}

impl Flag {
    pub fn toggled(self) -> Self {
        match self {
            Self::None => Self::Flagged,
            Self::Flagged => Self::None,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
