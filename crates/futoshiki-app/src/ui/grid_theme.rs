use eframe::egui::{Color32, Visuals};

/// Color palette for Futoshiki grid rendering.
///
/// Kept apart from `egui::Visuals` so that grid semantics (locked cells,
/// rule violations, constraint arrows) can be tuned on their own.
#[derive(Debug, Clone)]
pub(crate) struct GridPalette {
    pub(crate) cell_bg_default: Color32,
    pub(crate) cell_bg_selected: Color32,
    pub(crate) cell_bg_locked: Color32,

    pub(crate) border_inactive: Color32,
    pub(crate) border_selected: Color32,
    pub(crate) border_conflict: Color32,

    pub(crate) text_normal: Color32,
    pub(crate) text_locked: Color32,
    pub(crate) text_guess: Color32,
    pub(crate) text_conflict: Color32,

    pub(crate) constraint: Color32,
}

impl GridPalette {
    pub(crate) fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            cell_bg_default: visuals.text_edit_bg_color(),
            cell_bg_selected: visuals.selection.bg_fill,
            cell_bg_locked: visuals.widgets.inactive.bg_fill,

            border_inactive: visuals.widgets.inactive.fg_stroke.color,
            border_selected: visuals.selection.stroke.color,
            border_conflict: visuals.error_fg_color,

            text_normal: visuals.text_color(),
            text_locked: visuals.strong_text_color(),
            text_guess: visuals.weak_text_color(),
            text_conflict: visuals.error_fg_color,

            constraint: visuals.strong_text_color(),
        }
    }
}

/// Holds light/dark palettes and selects one based on current visuals.
#[derive(Debug, Clone)]
pub(crate) struct GridTheme {
    pub(crate) light: GridPalette,
    pub(crate) dark: GridPalette,
}

impl GridTheme {
    /// Uses the light and dark egui defaults, with the active visuals taking
    /// the place of the matching one.
    pub(crate) fn from_visuals(visuals: &Visuals) -> Self {
        let current = GridPalette::from_visuals(visuals);
        if visuals.dark_mode {
            Self {
                light: GridPalette::from_visuals(&Visuals::light()),
                dark: current,
            }
        } else {
            Self {
                light: current,
                dark: GridPalette::from_visuals(&Visuals::dark()),
            }
        }
    }

    pub(crate) fn palette_for(&self, visuals: &Visuals) -> &GridPalette {
        if visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}
