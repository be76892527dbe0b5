//! # Composer
//!
//! Draft text plus the rendered height of the input area.
//!
//! The composer knows nothing about terminals: the input box measures how
//! many wrapped lines the draft occupies and feeds that number to
//! [`Composer::on_content_changed`], which clamps it into the configured
//! height bounds. Past `max_height` the input box scrolls internally.

use log::debug;

/// Rows consumed by the top and bottom border of the input box.
pub const HEIGHT_PADDING: u16 = 2;
/// One line of text plus borders.
pub const DEFAULT_MIN_HEIGHT: u16 = 1 + HEIGHT_PADDING;
/// Five lines of text plus borders.
pub const DEFAULT_MAX_HEIGHT: u16 = 5 + HEIGHT_PADDING;

/// Inclusive height range for the input area, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightBounds {
    pub min: u16,
    pub max: u16,
}

impl Default for HeightBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_HEIGHT,
            max: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl HeightBounds {
    pub fn clamp(&self, height: u16) -> u16 {
        height.clamp(self.min, self.max)
    }

    /// Text lines visible before internal scrolling kicks in.
    pub fn max_visible_lines(&self) -> u16 {
        self.max.saturating_sub(HEIGHT_PADDING).max(1)
    }
}

#[derive(Debug)]
pub struct Composer {
    /// Current draft. Edited in place by the input box.
    pub draft: String,
    height: u16,
    bounds: HeightBounds,
    locked: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(HeightBounds::default())
    }
}

impl Composer {
    pub fn new(bounds: HeightBounds) -> Self {
        Self {
            draft: String::new(),
            height: bounds.min,
            bounds,
            locked: false,
        }
    }

    /// Takes the trimmed draft if it is non-blank and clears the composer.
    ///
    /// Blank drafts and submissions while locked return `None` and leave the
    /// draft exactly as it was.
    pub fn submit(&mut self) -> Option<String> {
        if self.locked {
            debug!("Composer locked, submission ignored");
            return None;
        }
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.draft.clear();
        Some(text)
    }

    /// Recompute height from the number of wrapped content lines.
    /// Returns the new height only when it actually changed.
    pub fn on_content_changed(&mut self, content_lines: u16) -> Option<u16> {
        let height = self
            .bounds
            .clamp(content_lines.saturating_add(HEIGHT_PADDING));
        if height == self.height {
            return None;
        }
        debug!("Composer height {} -> {}", self.height, height);
        self.height = height;
        Some(height)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locking blocks submission only; the draft stays editable.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}
