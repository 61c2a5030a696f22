//! OverlayEditor - drag and click-resize state for banner overlays.

use crate::banner::CustomTextList;

use super::geometry::{Point, Rect};
use super::sizing::{ResizeDirection, TextSize};

/// Overlay that can be dragged around the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The shop/contact footer block.
    Footer,
    /// A custom text item by id.
    CustomText(u64),
}

/// Text element that can be resized by clicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTarget {
    /// The "Happy" greeting line.
    Greeting,
    /// The (translated) festival name.
    FestivalTitle,
    CustomText(u64),
}

/// Pointer input delivered to the editor.
///
/// Coordinates are client-space; the editor converts them using the
/// container rectangle passed to [`OverlayEditor::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { target: DragTarget, at: Point },
    Move { at: Point },
    Up,
    /// Pointer left the banner container.
    Leave,
    /// Primary click on a text element.
    Click { target: SizeTarget },
    /// Secondary click. The context menu is suppressed.
    ContextMenu { target: SizeTarget },
}

/// The drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub target: DragTarget,
    /// Pointer position minus the item's position at grab time.
    pub grab_offset: Point,
}

/// Positions and sizes of the movable banner overlays.
///
/// Custom text positions and sizes live on the items themselves; the editor
/// only owns the fixed overlays and the drag in progress.
#[derive(Debug, Clone)]
pub struct OverlayEditor {
    footer_position: Point,
    greeting_size: TextSize,
    festival_size: TextSize,
    active: Option<ActiveDrag>,
}

impl Default for OverlayEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayEditor {
    pub fn new() -> Self {
        Self {
            footer_position: Point::default(),
            greeting_size: TextSize::GREETING_DEFAULT,
            festival_size: TextSize::FESTIVAL_TITLE_DEFAULT,
            active: None,
        }
    }

    pub fn footer_position(&self) -> Point {
        self.footer_position
    }

    pub fn greeting_size(&self) -> TextSize {
        self.greeting_size
    }

    pub fn festival_size(&self) -> TextSize {
        self.festival_size
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Dispatch one pointer event. Returns true if any state changed.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        container: Rect,
        texts: &mut CustomTextList,
    ) -> bool {
        match event {
            PointerEvent::Down { target, at } => self.begin_drag(target, at, container, texts),
            PointerEvent::Move { at } => self.drag_to(at, container, texts),
            PointerEvent::Up | PointerEvent::Leave => self.end_drag(),
            PointerEvent::Click { target } => self
                .resize(target, ResizeDirection::Increase, texts)
                .is_some(),
            PointerEvent::ContextMenu { target } => self
                .resize(target, ResizeDirection::Decrease, texts)
                .is_some(),
        }
    }

    /// Start dragging `target` from client point `at`.
    ///
    /// The grab offset is stored so later moves keep the grab point under the
    /// pointer. Ignored while another drag is active or if the target no
    /// longer exists.
    pub fn begin_drag(
        &mut self,
        target: DragTarget,
        at: Point,
        container: Rect,
        texts: &CustomTextList,
    ) -> bool {
        if self.active.is_some() {
            log::debug!("Ignoring drag start on {:?}: drag already active", target);
            return false;
        }

        let Some(position) = self.position_of(target, texts) else {
            log::debug!("Ignoring drag start on missing {:?}", target);
            return false;
        };

        self.active = Some(ActiveDrag {
            target,
            grab_offset: container.to_local(at) - position,
        });
        true
    }

    /// Move the dragged item so the grab point follows the pointer.
    ///
    /// No clamping: items may leave the visible banner.
    pub fn drag_to(&mut self, at: Point, container: Rect, texts: &mut CustomTextList) -> bool {
        let Some(drag) = self.active else {
            return false;
        };

        let position = container.to_local(at) - drag.grab_offset;
        match drag.target {
            DragTarget::Footer => {
                self.footer_position = position;
                true
            }
            DragTarget::CustomText(id) => match texts.get_mut(id) {
                Some(item) => {
                    item.position = position;
                    true
                }
                None => false,
            },
        }
    }

    /// Finish the current drag, if any.
    pub fn end_drag(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Step the size of a text element. Returns the new size.
    pub fn resize(
        &mut self,
        target: SizeTarget,
        direction: ResizeDirection,
        texts: &mut CustomTextList,
    ) -> Option<TextSize> {
        let size = match target {
            SizeTarget::Greeting => &mut self.greeting_size,
            SizeTarget::FestivalTitle => &mut self.festival_size,
            SizeTarget::CustomText(id) => &mut texts.get_mut(id)?.size,
        };
        *size = size.step(direction);
        Some(*size)
    }

    fn position_of(&self, target: DragTarget, texts: &CustomTextList) -> Option<Point> {
        match target {
            DragTarget::Footer => Some(self.footer_position),
            DragTarget::CustomText(id) => texts.get(id).map(|item| item.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rect {
        Rect::new(40.0, 20.0, 600.0, 800.0)
    }

    #[test]
    fn test_drag_preserves_grab_point() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();

        editor.handle(
            PointerEvent::Down {
                target: DragTarget::Footer,
                at: Point::new(140.0, 720.0),
            },
            container(),
            &mut texts,
        );
        editor.handle(
            PointerEvent::Move {
                at: Point::new(150.0, 700.0),
            },
            container(),
            &mut texts,
        );

        // Moved by the pointer delta, not snapped to the pointer.
        assert_eq!(editor.footer_position(), Point::new(10.0, -20.0));
    }

    #[test]
    fn test_drag_end_position_is_start_plus_pointer_delta() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        let id = texts.add_at("Sale", 1).unwrap();
        texts.get_mut(id).unwrap().position = Point::new(5.0, 7.0);

        let start = Point::new(200.0, 300.0);
        let end = Point::new(260.0, 250.0);
        editor.begin_drag(DragTarget::CustomText(id), start, container(), &texts);
        for i in 0..25 {
            let wobble = Point::new((i * 13 % 17) as f64, -(i as f64) * 3.0);
            editor.drag_to(start + wobble, container(), &mut texts);
        }
        editor.drag_to(end, container(), &mut texts);
        editor.end_drag();

        let expected = Point::new(5.0, 7.0) + (end - start);
        assert_eq!(texts.get(id).unwrap().position, expected);
    }

    #[test]
    fn test_drag_is_not_clamped() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        editor.begin_drag(DragTarget::Footer, Point::new(50.0, 50.0), container(), &texts);
        editor.drag_to(Point::new(-2000.0, 5000.0), container(), &mut texts);
        assert_eq!(editor.footer_position(), Point::new(-2050.0, 4950.0));
    }

    #[test]
    fn test_second_drag_start_is_ignored() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        let id = texts.add_at("x", 1).unwrap();

        assert!(editor.begin_drag(DragTarget::Footer, Point::new(0.0, 0.0), container(), &texts));
        assert!(!editor.begin_drag(
            DragTarget::CustomText(id),
            Point::new(0.0, 0.0),
            container(),
            &texts
        ));
        assert_eq!(editor.active_drag().unwrap().target, DragTarget::Footer);
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        assert!(!editor.handle(
            PointerEvent::Move {
                at: Point::new(99.0, 99.0)
            },
            container(),
            &mut texts
        ));
        assert_eq!(editor.footer_position(), Point::default());
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        editor.begin_drag(DragTarget::Footer, Point::new(0.0, 0.0), container(), &texts);
        assert!(editor.handle(PointerEvent::Leave, container(), &mut texts));
        assert!(!editor.is_dragging());
        assert!(!editor.handle(PointerEvent::Up, container(), &mut texts));
    }

    #[test]
    fn test_drag_unknown_text_is_ignored() {
        let mut editor = OverlayEditor::new();
        let texts = CustomTextList::new();
        assert!(!editor.begin_drag(
            DragTarget::CustomText(42),
            Point::new(0.0, 0.0),
            container(),
            &texts
        ));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_drag_of_removed_text_is_noop() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        let id = texts.add_at("x", 1).unwrap();
        editor.begin_drag(DragTarget::CustomText(id), Point::new(0.0, 0.0), container(), &texts);
        texts.remove(id);
        assert!(!editor.drag_to(Point::new(10.0, 10.0), container(), &mut texts));
    }

    #[test]
    fn test_click_and_context_menu_resize() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();

        editor.handle(
            PointerEvent::Click {
                target: SizeTarget::Greeting,
            },
            container(),
            &mut texts,
        );
        assert_eq!(editor.greeting_size().rem(), 6.25);

        editor.handle(
            PointerEvent::ContextMenu {
                target: SizeTarget::FestivalTitle,
            },
            container(),
            &mut texts,
        );
        assert_eq!(editor.festival_size().rem(), 4.25);
    }

    #[test]
    fn test_resize_custom_text_respects_floor() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        let id = texts.add_at("x", 1).unwrap();

        for _ in 0..10 {
            editor.resize(SizeTarget::CustomText(id), ResizeDirection::Decrease, &mut texts);
        }
        assert_eq!(texts.get(id).unwrap().size, TextSize::MIN);
    }

    #[test]
    fn test_resize_unknown_text_is_noop() {
        let mut editor = OverlayEditor::new();
        let mut texts = CustomTextList::new();
        assert_eq!(
            editor.resize(SizeTarget::CustomText(7), ResizeDirection::Increase, &mut texts),
            None
        );
    }
}
