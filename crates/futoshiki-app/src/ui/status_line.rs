use eframe::egui::{Align, Label, Layout, RichText, Ui, Widget as _};

pub(crate) const TITLE: &str = "Futoshiki";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameStatus {
    /// No board is loaded yet.
    Idle,
    Playing,
    Editing { alt_mode: bool },
    Solved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLineViewModel {
    status: GameStatus,
    level_name: Option<String>,
}

impl StatusLineViewModel {
    #[must_use]
    pub(crate) fn new(status: GameStatus, level_name: Option<String>) -> Self {
        Self { status, level_name }
    }

    #[must_use]
    pub(crate) fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub(crate) fn level_name(&self) -> Option<&str> {
        self.level_name.as_deref()
    }
}

impl GameStatus {
    #[must_use]
    pub(crate) fn hint(self) -> &'static str {
        match self {
            Self::Idle => "Enter = Load Level | Escape = Close",
            Self::Playing => "L = Toggle Level Selection | R = Reset | E = Editor",
            Self::Editing { alt_mode: false } => {
                "Digits = Lock | Ctrl+Digit = Resize | F = Save | P = Play"
            }
            Self::Editing { alt_mode: true } => {
                "Ctrl+Arrows = Toggle Constraint | Ctrl+Digit = Resize | Ctrl+R = New Board"
            }
            Self::Solved => "Solved! R = Play Again | L = Level Selection",
        }
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &StatusLineViewModel, text_size: f32) {
    ui.horizontal(|ui| {
        let mut title = TITLE.to_owned();
        if let Some(name) = vm.level_name() {
            title.push_str(" - ");
            title.push_str(name);
        }
        if matches!(vm.status(), GameStatus::Editing { .. }) {
            title.push_str(" [Editor]");
        }
        Label::new(RichText::new(title).strong().size(text_size)).ui(ui);

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let color = if vm.status() == GameStatus::Solved {
                ui.visuals().warn_fg_color
            } else {
                ui.visuals().weak_text_color()
            };
            Label::new(
                RichText::new(vm.status().hint())
                    .color(color)
                    .size(text_size * 0.8),
            )
            .halign(Align::Max)
            .ui(ui);
        });
    });
}
