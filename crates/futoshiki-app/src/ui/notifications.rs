use eframe::egui::{Align2, Color32, Context, FontId, Id, LayerId, Order, Pos2, Rect, Vec2};
use futoshiki_game::Severity;

use crate::ui::easing::{ease_in_out_cubic, ease_out_cubic, lerp};

const OFFSET_X: f32 = 0.5;
const OFFSET_Y: f32 = 0.99;
const ITEM_HEIGHT: f32 = 32.0;
const SEPARATION: f32 = 4.0;
const STATUS_WIDTH: f32 = 8.0;
const FONT_SIZE: f32 = 16.0;
const BACKGROUND: Color32 = Color32::from_rgb(40, 40, 40);
const TEXT: Color32 = Color32::from_rgb(235, 235, 235);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ToastViewModel {
    pub(crate) severity: Severity,
    pub(crate) message: String,
    /// Eased slide progress, 1 when fully in.
    pub(crate) slide: f32,
    pub(crate) alpha: f32,
}

impl ToastViewModel {
    #[must_use]
    pub(crate) fn new(
        severity: Severity,
        message: String,
        slide_fraction: f32,
        fade_fraction: f32,
    ) -> Self {
        Self {
            severity,
            message,
            slide: ease_in_out_cubic(slide_fraction),
            alpha: ease_out_cubic(fade_fraction),
        }
    }
}

/// Toasts from oldest to newest.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NotificationsViewModel {
    pub(crate) toasts: Vec<ToastViewModel>,
}

#[must_use]
pub(crate) fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => Color32::from_rgb(84, 168, 111),
        Severity::Warning => Color32::from_rgb(255, 231, 71),
        Severity::Error => Color32::from_rgb(166, 60, 60),
    }
}

fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Stacks the toasts upwards from the bottom right of `area`, newest lowest.
pub(crate) fn show(ctx: &Context, area: Rect, vm: &NotificationsViewModel) {
    if vm.toasts.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("notifications")));
    let width = (1.0 - OFFSET_X) * area.width();
    let mut y = area.min.y + OFFSET_Y * area.height() - ITEM_HEIGHT;

    for toast in vm.toasts.iter().rev() {
        let x = area.min.x + area.width() * lerp(1.0, OFFSET_X, toast.slide);
        let rect = Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, ITEM_HEIGHT));
        painter.rect_filled(rect, 0.0, with_alpha(BACKGROUND, toast.alpha));
        let status = Rect::from_min_size(rect.min, Vec2::new(STATUS_WIDTH, ITEM_HEIGHT));
        painter.rect_filled(status, 0.0, with_alpha(severity_color(toast.severity), toast.alpha));
        painter.text(
            Pos2::new(rect.min.x + STATUS_WIDTH + 10.0, rect.center().y),
            Align2::LEFT_CENTER,
            &toast.message,
            FontId::proportional(FONT_SIZE),
            with_alpha(TEXT, toast.alpha),
        );
        y -= ITEM_HEIGHT + SEPARATION;
    }
}
