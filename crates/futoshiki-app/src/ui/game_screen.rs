use eframe::egui::{Align, CentralPanel, Context, Layout, TopBottomPanel, Vec2};

use crate::ui::{
    browser::{self, BrowserViewModel},
    grid::{self, GridViewModel},
    layout::LayoutScale,
    notifications::{self, NotificationsViewModel},
    status_line::{self, StatusLineViewModel},
};

const STATUS_TEXT_SIZE: f32 = 18.0;

#[derive(Debug, Clone)]
pub(crate) struct GameScreenViewModel {
    pub(crate) status: StatusLineViewModel,
    pub(crate) grid: GridViewModel,
    pub(crate) browser: BrowserViewModel,
    pub(crate) notifications: NotificationsViewModel,
}

impl GameScreenViewModel {
    /// Whether anything on screen is still moving.
    #[must_use]
    pub(crate) fn is_animating(&self) -> bool {
        let browser_moving = self.browser.is_visible() && self.browser.slide() < 1.0;
        browser_moving || !self.notifications.toasts.is_empty()
    }
}

pub(crate) fn show(ctx: &Context, vm: &GameScreenViewModel) {
    TopBottomPanel::top("status_line").show(ctx, |ui| {
        status_line::show(ui, &vm.status, STATUS_TEXT_SIZE);
    });

    let central = CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let scale = LayoutScale::fit(available, vm.grid.size());
        let side = scale.grid_side(vm.grid.size());
        let top = ((available.y - side) * 0.5).max(0.0);
        ui.add_space(top);
        ui.allocate_ui_with_layout(
            Vec2::new(available.x, side),
            Layout::top_down(Align::Center),
            |ui| grid::show(ui, &vm.grid, &scale),
        );
    });

    let area = central.response.rect;
    browser::show(ctx, area, &vm.browser);
    notifications::show(ctx, area, &vm.notifications);
}
