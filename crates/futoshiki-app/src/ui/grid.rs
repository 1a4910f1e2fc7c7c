use std::sync::Arc;

use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui, Vec2,
};
use futoshiki_core::{Digit, DigitSet, GreaterThan, Position};
use futoshiki_game::CellState;

use crate::ui::{
    grid_theme::{GridPalette, GridTheme},
    layout::LayoutScale,
};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct GridVisualState: u8 {
        const SELECTED = 0b0000_0001;
        const LOCKED = 0b0000_0010;
        const CONFLICT = 0b0000_0100;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GridCell {
    pub(crate) content: CellState,
    pub(crate) visual_state: GridVisualState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GridViewModel {
    size: u8,
    cells: Vec<GridCell>,
    constraints: Vec<GreaterThan>,
    error_rows: Vec<u8>,
    error_columns: Vec<u8>,
}

impl GridViewModel {
    #[must_use]
    pub(crate) fn new(
        size: u8,
        cells: Vec<GridCell>,
        constraints: Vec<GreaterThan>,
        error_rows: Vec<u8>,
        error_columns: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(cells.len(), usize::from(size) * usize::from(size));
        Self {
            size,
            cells,
            constraints,
            error_rows,
            error_columns,
        }
    }

    #[must_use]
    pub(crate) fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub(crate) fn cell(&self, pos: Position) -> &GridCell {
        &self.cells[pos.index(self.size)]
    }

    #[must_use]
    pub(crate) fn error_rows(&self) -> &[u8] {
        &self.error_rows
    }

    #[must_use]
    pub(crate) fn error_columns(&self) -> &[u8] {
        &self.error_columns
    }
}

const BORDER_WIDTH_RATIO: f32 = 0.03;
const SELECTED_BORDER_WIDTH_RATIO: f32 = 3.0;
const ERROR_OUTLINE_WIDTH_RATIO: f32 = 2.0;
const ARROW_LENGTH_RATIO: f32 = 0.16;
const ARROW_WIDTH_RATIO: f32 = 0.30;

impl GridVisualState {
    fn cell_fill_color(self, palette: &GridPalette) -> Color32 {
        if self.contains(Self::LOCKED) {
            return palette.cell_bg_locked;
        }
        if self.contains(Self::SELECTED) {
            return palette.cell_bg_selected;
        }
        palette.cell_bg_default
    }

    fn text_color(self, palette: &GridPalette) -> Color32 {
        if self.contains(Self::CONFLICT) {
            return palette.text_conflict;
        }
        if self.contains(Self::LOCKED) {
            palette.text_locked
        } else {
            palette.text_normal
        }
    }

    fn cell_border(self, palette: &GridPalette, block_size: f32) -> Stroke {
        let base = f32::max(block_size * BORDER_WIDTH_RATIO, 1.0);
        if self.contains(Self::SELECTED) {
            Stroke::new(base * SELECTED_BORDER_WIDTH_RATIO, palette.border_selected)
        } else {
            Stroke::new(base, palette.border_inactive)
        }
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &GridViewModel, scale: &LayoutScale) {
    if vm.size() == 0 {
        return;
    }
    let style = Arc::clone(ui.style());
    let visuals = &style.visuals;
    let grid_theme = GridTheme::from_visuals(visuals);
    let palette = grid_theme.palette_for(visuals);

    let (rect, _response) =
        ui.allocate_exact_size(Vec2::splat(scale.grid_side(vm.size)), Sense::hover());
    let painter = ui.painter();
    let geometry = Geometry {
        origin: rect.min,
        pitch: scale.cell_pitch,
        block: scale.block_size,
    };

    for y in 0..vm.size {
        for x in 0..vm.size {
            let pos = Position::new(x, y);
            let cell = vm.cell(pos);
            let vs = cell.visual_state;
            let block = geometry.block_rect(pos);

            painter.rect_filled(block, 0.0, vs.cell_fill_color(palette));
            match cell.content {
                CellState::Empty => {}
                CellState::Guesses(guesses) => draw_guesses(painter, block, guesses, palette),
                CellState::Locked(digit) | CellState::Filled(digit) => {
                    painter.text(
                        block.center(),
                        Align2::CENTER_CENTER,
                        digit.as_str(),
                        FontId::proportional(block.height() * 0.7),
                        vs.text_color(palette),
                    );
                }
            }
            painter.rect_stroke(
                block,
                0.0,
                vs.cell_border(palette, geometry.block),
                StrokeKind::Inside,
            );
        }
    }

    for &constraint in &vm.constraints {
        draw_constraint(painter, &geometry, constraint, palette.constraint);
    }

    let outline = Stroke::new(
        f32::max(geometry.block * BORDER_WIDTH_RATIO, 1.0) * ERROR_OUTLINE_WIDTH_RATIO,
        palette.border_conflict,
    );
    let last = vm.size - 1;
    for &y in vm.error_rows() {
        let span = geometry
            .block_rect(Position::new(0, y))
            .union(geometry.block_rect(Position::new(last, y)));
        painter.rect_stroke(span, 0.0, outline, StrokeKind::Outside);
    }
    for &x in vm.error_columns() {
        let span = geometry
            .block_rect(Position::new(x, 0))
            .union(geometry.block_rect(Position::new(x, last)));
        painter.rect_stroke(span, 0.0, outline, StrokeKind::Outside);
    }
}

struct Geometry {
    origin: Pos2,
    pitch: f32,
    block: f32,
}

impl Geometry {
    fn cell_center(&self, pos: Position) -> Pos2 {
        self.origin
            + Vec2::new(
                (f32::from(pos.x()) + 0.5) * self.pitch,
                (f32::from(pos.y()) + 0.5) * self.pitch,
            )
    }

    fn block_rect(&self, pos: Position) -> Rect {
        Rect::from_center_size(self.cell_center(pos), Vec2::splat(self.block))
    }
}

/// Draws a triangle in the gap between the two cells, pointing at the lesser one.
fn draw_constraint(painter: &Painter, geometry: &Geometry, constraint: GreaterThan, color: Color32) {
    let greater = geometry.cell_center(constraint.greater());
    let lesser = geometry.cell_center(constraint.lesser());
    let center = greater + (lesser - greater) * 0.5;
    let dir = (lesser - greater).normalized();
    let perp = dir.rot90();

    let half_length = geometry.pitch * ARROW_LENGTH_RATIO * 0.5;
    let half_width = geometry.pitch * ARROW_WIDTH_RATIO * 0.5;
    let apex = center + dir * half_length;
    let base = center - dir * half_length;
    painter.add(Shape::convex_polygon(
        vec![apex, base + perp * half_width, base - perp * half_width],
        color,
        Stroke::NONE,
    ));
}

fn draw_guesses(painter: &Painter, rect: Rect, guesses: DigitSet, palette: &GridPalette) {
    let font = FontId::proportional(rect.height() / 3.5);
    let cell_w = rect.width() / 3.0;
    let cell_h = rect.height() / 3.0;

    for digit in Digit::ALL {
        if !guesses.contains(digit) {
            continue;
        }
        let idx = digit.value() - 1;
        let y = f32::from(idx / 3);
        let x = f32::from(idx % 3);
        let center = rect.min + Vec2::new((x + 0.5) * cell_w, (y + 0.5) * cell_h);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            digit.as_str(),
            font.clone(),
            palette.text_guess,
        );
    }
}
