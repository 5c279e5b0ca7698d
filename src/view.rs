use crate::util::Pos;

/// What a cell's display handle should show.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Label {
    #[default]
    Empty,
    Number(u8),
    Mine,
    Flag,
}

/// Display side of the game. The engine drives it, it never drives the engine.
pub trait View {
    fn cell_label_changed(&mut self, pos: Pos, label: Label);
    fn cell_input_disabled(&mut self, pos: Pos);
    /// Fresh board: the handle shows nothing and accepts input again.
    fn cell_reset(&mut self, pos: Pos);
    fn board_shown(&mut self);
    fn board_hidden(&mut self);
    fn start_control_shown(&mut self);
    fn start_control_hidden(&mut self);
    fn restart_control_shown(&mut self);
    fn restart_control_hidden(&mut self);
}

#[cfg(test)]
pub use recorder::Recorder;

#[cfg(test)]
mod recorder {
    use super::*;
    use std::collections::HashMap;

    /// Folds notifications into final per-handle state so tests never depend
    /// on emission order.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub labels: HashMap<Pos, Label>,
        pub disabled: HashMap<Pos, bool>,
        pub board_visible: bool,
        pub start_visible: bool,
        pub restart_visible: bool,
        pub label_events: usize,
        pub disable_events: usize,
    }

    impl Recorder {
        pub fn label(&self, pos: Pos) -> Label {
            self.labels.get(&pos).copied().unwrap_or_default()
        }

        pub fn is_disabled(&self, pos: Pos) -> bool {
            self.disabled.get(&pos).copied().unwrap_or(false)
        }

        pub fn disabled_count(&self) -> usize {
            self.disabled.values().filter(|&&d| d).count()
        }

        pub fn count_labels(&self, label: Label) -> usize {
            self.labels.values().filter(|&&l| l == label).count()
        }

        pub fn clear_events(&mut self) {
            self.label_events = 0;
            self.disable_events = 0;
        }
    }

    impl View for Recorder {
        fn cell_label_changed(&mut self, pos: Pos, label: Label) {
            self.label_events += 1;
            self.labels.insert(pos, label);
        }
        fn cell_input_disabled(&mut self, pos: Pos) {
            self.disable_events += 1;
            self.disabled.insert(pos, true);
        }
        fn cell_reset(&mut self, pos: Pos) {
            self.labels.insert(pos, Label::Empty);
            self.disabled.insert(pos, false);
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
}
