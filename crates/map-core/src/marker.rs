//! Circle markers positioned at each business, carrying tooltip and popup content.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    palette::CategoryPalette,
    popup::{Popup, popup_content, tooltip_content},
    record::{BusinessRecord, Coordinates},
};

pub const MARKER_RADIUS: u32 = 9;
pub const MARKER_WEIGHT: u32 = 2;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

/// Presentational circle marker for one business.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Row index of the record this marker belongs to.
    pub index: usize,
    pub position: Coordinates,
    /// Circle radius in pixels.
    pub radius: u32,
    /// Stroke color; fill uses the same value.
    pub color: String,
    pub fill: bool,
    /// Fill opacity between 0 and 1.
    pub fill_opacity: f64,
    /// Stroke width in pixels.
    pub weight: u32,
    /// Rendered hover tooltip.
    pub tooltip: String,
    /// Rendered click popup and its width hint.
    pub popup: Popup,
}

impl Marker {
    /// Fill color, always the stroke color.
    pub fn fill_color(&self) -> &str {
        &self.color
    }
}

/// Lookup entry kept per marker index.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerPosition {
    pub position: Coordinates,
    /// Business name.
    pub name: String,
    /// Category label as loaded, before palette lookup.
    pub category: String,
    /// Raw Instagram handle as loaded.
    pub link: Option<String>,
}

/// Markers in record order plus the index → position table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerSet {
    /// Drawn markers in record order.
    pub markers: Vec<Marker>,
    /// Keyed by record row index.
    pub positions: BTreeMap<usize, MarkerPosition>,
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Side-table entry for the record at row `index`, if it was placed.
    pub fn position(&self, index: usize) -> Option<&MarkerPosition> {
        self.positions.get(&index)
    }
}

/// Build the marker for `record`; `None` when the record has no coordinates.
pub fn build_marker(record: &BusinessRecord, palette: &CategoryPalette) -> Option<Marker> {
    let position = record.coordinates?;
    let color = palette.color_for(&record.category);

    Some(Marker {
        index: record.index,
        position,
        radius: MARKER_RADIUS,
        color: color.to_string(),
        fill: true,
        fill_opacity: MARKER_FILL_OPACITY,
        weight: MARKER_WEIGHT,
        tooltip: tooltip_content(record, color).into_string(),
        popup: popup_content(record, color),
    })
}

/// Markers for every placeable record, in record order.
pub fn build_markers(records: &[BusinessRecord], palette: &CategoryPalette) -> MarkerSet {
    let mut set = MarkerSet::default();
    for record in records {
        let Some(marker) = build_marker(record, palette) else {
            continue;
        };
        set.positions.insert(
            record.index,
            MarkerPosition {
                position: marker.position,
                name: record.name.clone(),
                category: record.category.clone(),
                link: record.instagram.clone(),
            },
        );
        set.markers.push(marker);
    }
    set
}
