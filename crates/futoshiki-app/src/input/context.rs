bitflags::bitflags! {
    /// Input modes gating which bindings are evaluated.
    ///
    /// [`MappingContext::ALWAYS_ON`] is part of every active context, so
    /// bindings tagged with it fire regardless of the current mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MappingContext: u8 {
        const ALWAYS_ON = 0b0000_0001;
        const GAME = 0b0000_0010;
        const POST_GAME = 0b0000_0100;
        const EDITOR = 0b0000_1000;
        const LEVEL_SELECTION = 0b0001_0000;
    }
}

impl MappingContext {
    /// Returns `true` if a binding tagged with `self` may fire while `active` is current.
    #[must_use]
    pub fn admits(self, active: Self) -> bool {
        self.intersects(active) || self.contains(Self::ALWAYS_ON)
    }
}
