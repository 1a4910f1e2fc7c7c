use eframe::egui::Vec2;

/// Pixel sizes derived from the space available to the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutScale {
    /// Distance between the centers of neighbouring cells.
    pub(crate) cell_pitch: f32,
    /// Side of the drawn cell block; the rest of the pitch holds constraint arrows.
    pub(crate) block_size: f32,
}

impl LayoutScale {
    pub(crate) const BLOCK_FACTOR: f32 = 0.78;
    pub(crate) const PADDING_FACTOR: Vec2 = Vec2::new(0.20, 0.30);
    pub(crate) const MAX_PITCH: f32 = 110.0;

    #[must_use]
    pub(crate) fn new(cell_pitch: f32) -> Self {
        Self {
            cell_pitch,
            block_size: cell_pitch * Self::BLOCK_FACTOR,
        }
    }

    /// The largest scale that fits a `grid_size` grid into `available`.
    #[must_use]
    pub(crate) fn fit(available: Vec2, grid_size: u8) -> Self {
        let cells = f32::from(grid_size.max(1));
        let units = Vec2::splat(cells) + Vec2::splat(2.0) * Self::PADDING_FACTOR;
        let pitch = (available / units).min_elem().clamp(1.0, Self::MAX_PITCH);
        Self::new(pitch)
    }

    #[must_use]
    pub(crate) fn grid_side(&self, grid_size: u8) -> f32 {
        self.cell_pitch * f32::from(grid_size)
    }
}
