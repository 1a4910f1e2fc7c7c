use futoshiki_game::Grid;

use crate::{
    browser::LevelBrowser,
    notifications::Notifications,
    session::Session,
    ui::{
        browser::BrowserViewModel,
        game_screen::GameScreenViewModel,
        grid::{GridCell, GridViewModel, GridVisualState},
        notifications::{NotificationsViewModel, ToastViewModel},
        status_line::{GameStatus, StatusLineViewModel},
    },
};

#[must_use]
pub(crate) fn build_grid_vm(grid: &Grid) -> GridViewModel {
    let errors = grid.errors();
    let selection = grid.selection();
    let cells = grid
        .positions()
        .map(|pos| {
            let content = grid.cell(pos);
            let mut visual_state = GridVisualState::empty();
            visual_state.set(GridVisualState::SELECTED, pos == selection);
            visual_state.set(GridVisualState::LOCKED, content.is_locked());
            visual_state.set(GridVisualState::CONFLICT, errors.cell_has_error(pos));
            GridCell {
                content,
                visual_state,
            }
        })
        .collect();
    let size = grid.size();
    GridViewModel::new(
        size,
        cells,
        grid.constraints().to_vec(),
        (0..size).filter(|&y| errors.row_has_error(y)).collect(),
        (0..size).filter(|&x| errors.column_has_error(x)).collect(),
    )
}

#[must_use]
pub(crate) fn build_status_vm(grid: &Grid, browser: &LevelBrowser) -> StatusLineViewModel {
    let state = grid.state();
    let status = if !grid.has_valid_data() {
        GameStatus::Idle
    } else if state.edit_mode {
        GameStatus::Editing {
            alt_mode: state.alt_mode,
        }
    } else if grid.player_won() {
        GameStatus::Solved
    } else {
        GameStatus::Playing
    };
    StatusLineViewModel::new(status, browser.last_loaded_name().map(str::to_owned))
}

#[must_use]
pub(crate) fn build_browser_vm(browser: &LevelBrowser) -> BrowserViewModel {
    BrowserViewModel::new(
        browser.names().to_vec(),
        browser.selected_index(),
        browser.slide_fraction(),
    )
}

#[must_use]
pub(crate) fn build_notifications_vm(notifications: &Notifications) -> NotificationsViewModel {
    let toasts = notifications
        .iter()
        .map(|item| {
            ToastViewModel::new(
                item.severity(),
                item.message().to_owned(),
                notifications.slide_fraction(item),
                notifications.fade_fraction(item),
            )
        })
        .collect();
    NotificationsViewModel { toasts }
}

#[must_use]
pub(crate) fn build_game_screen_view_model(session: &Session) -> GameScreenViewModel {
    GameScreenViewModel {
        status: build_status_vm(session.grid(), session.browser()),
        grid: build_grid_vm(session.grid()),
        browser: build_browser_vm(session.browser()),
        notifications: build_notifications_vm(session.notifications()),
    }
}
