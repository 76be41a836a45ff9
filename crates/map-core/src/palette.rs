//! Category → color mapping used by markers, popups, and the legend.

/// Color applied to any category missing from the palette.
pub const FALLBACK_COLOR: &str = "#808080";

/// Ordered category palette. Insertion order is the legend display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryPalette {
    entries: Vec<(String, String)>,
    fallback: String,
}

impl CategoryPalette {
    /// Build a palette from `(category, color)` pairs.
    ///
    /// A category listed twice keeps its first position and takes the later color.
    pub fn new<I, C, V>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<String>,
    {
        let mut palette = Self {
            entries: Vec::new(),
            fallback: fallback.into(),
        };
        for (category, color) in entries {
            palette.insert(category, color);
        }
        palette
    }

    /// The palette shipped with the Mile End map.
    pub fn mile_end() -> Self {
        Self::new(
            [
                ("coffee", "#D4A574"),
                ("Restaurant", "#800020"),
                ("Epicerie Fine", "#4CAF50"),
                ("Bar", "#2196F3"),
                ("Brasserie", "#FF9800"),
                ("Boulangerie", "#FFEB3B"),
                ("Cremerie", "#9C27B0"),
            ],
            FALLBACK_COLOR,
        )
    }

    fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) {
        let category = category.into();
        let color = color.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((category, color)),
        }
    }

    /// Resolve the display color for `category`, falling back for unknown labels.
    pub fn color_for(&self, category: &str) -> &str {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| color.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Color used for categories with no entry.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no category has a color of its own.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(category, color)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(category, color)| (category.as_str(), color.as_str()))
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::mile_end()
    }
}
