use eframe::egui::{
    Align2, Color32, Context, FontId, Id, LayerId, Order, Pos2, Rect, Stroke, StrokeKind, Vec2,
};

use crate::ui::easing::{ease_in_out_cubic, lerp};

const WIDTH_FRACTION: f32 = 0.75;
const HEIGHT_FRACTION: f32 = 0.75;
const PADDING: f32 = 12.0;
const TITLE_SIZE: f32 = 30.0;
const TITLE_GAP: f32 = 14.0;
const ITEM_HEIGHT: f32 = 36.0;
const ITEM_SEPARATION: f32 = 4.0;
const FONT_SIZE: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BrowserViewModel {
    names: Vec<String>,
    selected: usize,
    /// Eased slide progress, 0 when hidden.
    slide: f32,
}

impl BrowserViewModel {
    #[must_use]
    pub(crate) fn new(names: Vec<String>, selected: usize, slide_fraction: f32) -> Self {
        Self {
            names,
            selected,
            slide: ease_in_out_cubic(slide_fraction),
        }
    }

    #[must_use]
    pub(crate) fn is_visible(&self) -> bool {
        self.slide > 0.0
    }

    #[must_use]
    pub(crate) fn slide(&self) -> f32 {
        self.slide
    }
}

/// First item of a `visible` long window keeping `selected` in view,
/// roughly centered when there is room.
#[must_use]
pub(crate) fn scroll_offset(selected: usize, count: usize, visible: usize) -> usize {
    if visible == 0 || count <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(count - visible)
}

pub(crate) fn show(ctx: &Context, area: Rect, vm: &BrowserViewModel) {
    if !vm.is_visible() {
        return;
    }
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("level_browser")));
    let visuals = ctx.style().visuals.clone();

    let size = area.size() * Vec2::new(WIDTH_FRACTION, HEIGHT_FRACTION);
    let target_x = area.min.x + 0.5 * (area.width() - size.x);
    let x = lerp(area.max.x, target_x, vm.slide);
    let y = area.min.y + 0.5 * (area.height() - size.y);
    let panel = Rect::from_min_size(Pos2::new(x, y), size);

    painter.rect_filled(panel, 4.0, visuals.extreme_bg_color);
    painter.rect_stroke(
        panel,
        4.0,
        Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
        StrokeKind::Inside,
    );

    let client = panel.shrink(PADDING);
    painter.text(
        client.min,
        Align2::LEFT_TOP,
        "Select Level",
        FontId::proportional(TITLE_SIZE),
        visuals.strong_text_color(),
    );

    let list_top = client.min.y + TITLE_SIZE + TITLE_GAP;
    let pitch = ITEM_HEIGHT + ITEM_SEPARATION;
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let visible = ((client.max.y - list_top + ITEM_SEPARATION) / pitch).floor().max(0.0) as usize;
    let first = scroll_offset(vm.selected, vm.names.len(), visible);

    for (row, (index, name)) in vm
        .names
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        #[expect(clippy::cast_precision_loss)]
        let top = list_top + row as f32 * pitch;
        let item = Rect::from_min_size(
            Pos2::new(client.min.x, top),
            Vec2::new(client.width(), ITEM_HEIGHT),
        );
        let (bg, fg) = if index == vm.selected {
            (visuals.selection.bg_fill, visuals.selection.stroke.color)
        } else {
            (visuals.faint_bg_color, visuals.text_color())
        };
        painter.rect_filled(item, 2.0, bg);
        painter.text(
            Pos2::new(item.min.x + 10.0, item.center().y),
            Align2::LEFT_CENTER,
            name,
            FontId::proportional(FONT_SIZE),
            fg,
        );
    }

    if vm.names.is_empty() {
        painter.text(
            Pos2::new(client.min.x, list_top),
            Align2::LEFT_TOP,
            "No levels",
            FontId::proportional(FONT_SIZE),
            Color32::GRAY,
        );
    }
}
