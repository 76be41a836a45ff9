//! Domain model for the Mile End business map.
//!
//! Everything here is pure and built once at startup:
//! - `palette`: category → color mapping with a fallback.
//! - `record` / `loader`: business rows read from the source table.
//! - `popup`: popup and tooltip content for one business.
//! - `marker`: circle markers and the per-index position table.
//! - `legend`: palette swatches in display order.
//! - `view`: the immutable view model handed to the HTTP layer.

pub mod legend;
pub mod loader;
pub mod marker;
pub mod palette;
pub mod popup;
pub mod record;
pub mod view;

pub use legend::{Legend, LegendItem, build_legend};
pub use loader::{LoadError, load_records, read_records};
pub use marker::{Marker, MarkerPosition, MarkerSet, build_marker, build_markers};
pub use palette::{CategoryPalette, FALLBACK_COLOR};
pub use popup::{Popup, PopupWidth, popup_content, tooltip_content};
pub use record::{BusinessRecord, Coordinates, PhotoOrientation};
pub use view::ViewModel;
