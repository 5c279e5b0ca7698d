/// Lifecycle of a game session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WinState {
    #[default]
    Menu,
    Playing,
    Won,
    Lost,
}

impl WinState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
