//! Overlay editor for the composed banner.
//!
//! Tracks where movable overlays sit relative to their default layout and how
//! large the clickable text elements are. Pointer gestures arrive as
//! [`PointerEvent`] values; the editor turns them into offset and scale
//! updates. [`render`] composes the final banner document.

mod geometry;
mod overlay;
pub mod render;
mod sizing;

pub use geometry::{Point, Rect};
pub use overlay::{ActiveDrag, DragTarget, OverlayEditor, PointerEvent, SizeTarget};
pub use render::{render_banner_html, BannerMedia, BannerView};
pub use sizing::{ResizeDirection, TextSize};
