//! Popup (click) and tooltip (hover) content for a single business.
//!
//! Markup is built with `maud`, which escapes every spliced value.

use maud::{Markup, html};
use serde::Serialize;

use crate::record::{BusinessRecord, PhotoOrientation};

/// Tooltip addresses longer than this many characters are truncated.
pub const TOOLTIP_ADDRESS_LIMIT: usize = 30;

pub const INSTAGRAM_ICON: &str = "/assets/instagram_icon.svg";

const PHOTO_PLACEHOLDER: &str = "📷";
const ADDRESS_GLYPH: &str = "📍";

/// Maximum popup width as a share of the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PopupWidth {
    /// Percent of `window.innerWidth`, 25 for portrait and 30 for landscape.
    pub viewport_percent: u8,
}

impl PopupWidth {
    pub fn for_orientation(orientation: PhotoOrientation) -> Self {
        let viewport_percent = match orientation {
            PhotoOrientation::Portrait => 25,
            PhotoOrientation::Landscape => 30,
        };
        Self { viewport_percent }
    }

    /// CSS length form, e.g. `30vw`.
    pub fn css(&self) -> String {
        format!("{}vw", self.viewport_percent)
    }
}

/// Rendered popup plus its sizing hint.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Escaped HTML fragment handed to the map library.
    pub html: String,
    /// Width cap derived from the photo orientation.
    pub max_width: PopupWidth,
}

/// Build the click popup for `record` using its resolved category `color`.
pub fn popup_content(record: &BusinessRecord, color: &str) -> Popup {
    let layout = Layout::from(record.orientation);
    let background = format!("background-color: {color}");
    let description_class = if record.has_description() {
        "popup-description popup-description-italic"
    } else {
        "popup-description"
    };

    let markup = html! {
        div class=(layout.container_class) {
            div class="popup-img-container" {
                @if let Some(src) = record.photo_url() {
                    img src=(src) alt=(record.name) class=(layout.image_class) style=(background);
                } @else {
                    div class=(format!("{} popup-img-placeholder", layout.image_class)) style=(background) {
                        (PHOTO_PLACEHOLDER)
                    }
                }
            }
            div class="popup-metadata" {
                div class="popup-header-row" {
                    h2 class="popup-business-name" { (record.name) }
                    @if let Some(href) = record.instagram_url() {
                        a class="popup-instagram-link" href=(href) target="_blank" rel="noopener noreferrer" {
                            img class="popup-instagram-icon" src=(INSTAGRAM_ICON) alt="Instagram";
                        }
                    }
                }
                div class="popup-category-badge" style=(background) { (record.category) }
                p class=(description_class) { (record.description_text()) }
                div class="popup-address-container" {
                    span class="popup-address-icon" { (ADDRESS_GLYPH) }
                    span class="popup-address-text" { (record.address_text()) }
                }
            }
        }
    };

    Popup {
        html: markup.into_string(),
        max_width: layout.max_width,
    }
}

/// Build the hover tooltip: name, colored category, and a short address line.
pub fn tooltip_content(record: &BusinessRecord, color: &str) -> Markup {
    let address = match record.address.as_deref() {
        Some(address) => truncate_address(address),
        None => record.address_text().to_string(),
    };

    html! {
        div class="tooltip-container" {
            strong class="tooltip-business-name" { (record.name) }
            span class="tooltip-category" style=(format!("color: {color}")) { (record.category) }
            br;
            span class="tooltip-address" { (address) }
        }
    }
}

/// First [`TOOLTIP_ADDRESS_LIMIT`] characters plus `...` when longer.
pub fn truncate_address(address: &str) -> String {
    if address.chars().count() <= TOOLTIP_ADDRESS_LIMIT {
        return address.to_string();
    }
    let mut short: String = address.chars().take(TOOLTIP_ADDRESS_LIMIT).collect();
    short.push_str("...");
    short
}

struct Layout {
    image_class: &'static str,
    container_class: &'static str,
    max_width: PopupWidth,
}

impl From<PhotoOrientation> for Layout {
    fn from(orientation: PhotoOrientation) -> Self {
        let (image_class, container_class) = match orientation {
            PhotoOrientation::Portrait => ("popup-img-portrait", "popup-container-portrait"),
            PhotoOrientation::Landscape => ("popup-img-landscape", "popup-container-landscape"),
        };
        Self {
            image_class,
            container_class,
            max_width: PopupWidth::for_orientation(orientation),
        }
    }
}
