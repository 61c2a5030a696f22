//! Click-to-resize text scale.

/// Direction of a click resize. Left click grows, right click shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Increase,
    Decrease,
}

/// Font scale of a text overlay, in rem.
///
/// Changes in fixed steps and never drops below [`TextSize::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TextSize(f32);

impl TextSize {
    pub const STEP: f32 = 0.25;
    pub const MIN: TextSize = TextSize(1.0);

    pub const GREETING_DEFAULT: TextSize = TextSize(6.0);
    pub const FESTIVAL_TITLE_DEFAULT: TextSize = TextSize(4.5);
    pub const CUSTOM_TEXT_DEFAULT: TextSize = TextSize(1.5);

    /// Create a size, raised to the floor if needed.
    pub fn new(rem: f32) -> Self {
        TextSize(rem.max(Self::MIN.0))
    }

    pub fn rem(self) -> f32 {
        self.0
    }

    /// One step in `direction`. Only a decrease can hit the floor.
    pub fn step(self, direction: ResizeDirection) -> Self {
        match direction {
            ResizeDirection::Increase => TextSize(self.0 + Self::STEP),
            ResizeDirection::Decrease => TextSize((self.0 - Self::STEP).max(Self::MIN.0)),
        }
    }
}

impl Default for TextSize {
    fn default() -> Self {
        Self::CUSTOM_TEXT_DEFAULT
    }
}
