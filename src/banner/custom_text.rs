//! Custom text annotations placed freely on the banner.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::editor::{Point, TextSize};

/// A user-added line of text with its own offset and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTextItem {
    /// Creation timestamp in milliseconds, bumped when needed to stay unique.
    pub id: u64,
    pub text: String,
    /// Pixel offset from the default layout position.
    pub position: Point,
    pub size: TextSize,
}

/// Ordered list of custom texts for the current session.
#[derive(Debug, Clone, Default)]
pub struct CustomTextList {
    items: Vec<CustomTextItem>,
    last_id: u64,
}

impl CustomTextList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text item stamped with the current time.
    ///
    /// Returns the new id, or `None` when the text is blank.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        self.add_at(text, now_millis())
    }

    /// Add a text item using `now_ms` as the candidate id.
    ///
    /// Ids are strictly increasing: two adds within the same millisecond (or
    /// a clock that steps backwards) get `last + 1` instead of colliding.
    pub fn add_at(&mut self, text: &str, now_ms: u64) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = if now_ms > self.last_id {
            now_ms
        } else {
            self.last_id + 1
        };
        self.last_id = id;

        self.items.push(CustomTextItem {
            id,
            text: text.to_string(),
            position: Point::default(),
            size: TextSize::CUSTOM_TEXT_DEFAULT,
        });
        log::debug!("Added custom text {}: {:?}", id, text);
        Some(id)
    }

    /// Remove an item by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&CustomTextItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut CustomTextItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomTextItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
