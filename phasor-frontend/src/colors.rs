//! Color Tracker
//!
//! Maps color keys to palette entries, first-seen key gets the next color.
//! Lives for a single `/tiles` request; nothing is remembered across requests.

use std::collections::HashMap;

/// Returned for every key when the palette is empty
pub const FALLBACK_COLOR: &str = "#667eea";

#[derive(Debug)]
pub struct ColorTracker<'a> {
    palette: &'a [String],
    assigned: HashMap<String, usize>,
    cursor: usize,
}

impl<'a> ColorTracker<'a> {
    pub fn new(palette: &'a [String]) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
            cursor: 0,
        }
    }

    /// Same key, same color. New keys walk the palette round-robin.
    pub fn color_for(&mut self, key: &str) -> &'a str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }

        if let Some(&idx) = self.assigned.get(key) {
            return &self.palette[idx];
        }

        let idx = self.cursor % self.palette.len();
        self.assigned.insert(key.to_owned(), idx);
        self.cursor += 1;
        &self.palette[idx]
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}
