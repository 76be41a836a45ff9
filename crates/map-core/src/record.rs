//! Business records and the per-field default resolution applied at load time.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

/// Shown wherever a record has no address.
pub const ADDRESS_FALLBACK: &str = "Address not available";

/// Popup description used when a record has none.
pub const DESCRIPTION_FALLBACK: &str = "A wonderful local business in Montreal.";

/// URL prefix under which business photos are served.
pub const PHOTO_ROUTE: &str = "/business_photo";

const INSTAGRAM_BASE: &str = "https://www.instagram.com";

/// Bytes escaped when a photo filename becomes one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// WGS84 position of a business.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Layout hint for the business photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoOrientation {
    #[default]
    Landscape,
    Portrait,
}

impl PhotoOrientation {
    /// Parse a raw cell; only `portrait` selects the portrait layout.
    pub fn from_cell(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("portrait") => PhotoOrientation::Portrait,
            _ => PhotoOrientation::Landscape,
        }
    }
}

/// One business, derived from one row of the source table.
#[derive(Clone, Debug, PartialEq)]
pub struct BusinessRecord {
    /// Zero-based row index in the source table.
    pub index: usize,
    /// Display name; an empty cell stays empty.
    pub name: String,
    /// Key into the category palette; unknown values are allowed.
    pub category: String,
    /// `None` when the row has blank coordinates; such records get no marker.
    pub coordinates: Option<Coordinates>,
    /// Street address, trimmed.
    pub address: Option<String>,
    /// French description shown in the popup.
    pub description: Option<String>,
    /// Instagram handle without the site prefix.
    pub instagram: Option<String>,
    /// Photo filename inside the photo directory.
    pub photo: Option<String>,
    /// Selects the popup layout and width.
    pub orientation: PhotoOrientation,
}

impl BusinessRecord {
    /// Minimal record with every optional field absent.
    pub fn new(
        index: usize,
        name: impl Into<String>,
        category: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            category: category.into(),
            coordinates: Some(coordinates),
            address: None,
            description: None,
            instagram: None,
            photo: None,
            orientation: PhotoOrientation::default(),
        }
    }

    /// Address for display, or [`ADDRESS_FALLBACK`].
    pub fn address_text(&self) -> &str {
        self.address.as_deref().unwrap_or(ADDRESS_FALLBACK)
    }

    /// Description for display, or [`DESCRIPTION_FALLBACK`].
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(DESCRIPTION_FALLBACK)
    }

    /// Whether the row carried its own description.
    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// Profile link, or `None` when there is no usable handle.
    pub fn instagram_url(&self) -> Option<String> {
        let handle = self.instagram.as_deref()?.trim().trim_start_matches('@');
        if handle.is_empty() {
            return None;
        }
        Some(format!("{INSTAGRAM_BASE}/{handle}"))
    }

    /// Photo link under [`PHOTO_ROUTE`], with the filename percent-encoded.
    pub fn photo_url(&self) -> Option<String> {
        let filename = self.photo.as_deref()?;
        Some(format!(
            "{PHOTO_ROUTE}/{}",
            utf8_percent_encode(filename, PATH_SEGMENT)
        ))
    }
}

/// Normalise an optional text cell: trimmed, blank becomes `None`.
pub(crate) fn optional_text(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
