//! Static legend listing every palette category with its swatch.

use maud::{Markup, html};
use serde::Serialize;

use crate::palette::CategoryPalette;

pub const LEGEND_TITLE: &str = "Legend";

/// One swatch row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    pub category: String,
    /// CSS color of the swatch.
    pub color: String,
}

/// Legend overlay in palette order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// Heading above the swatches.
    pub title: &'static str,
    /// One entry per palette category, in insertion order.
    pub items: Vec<LegendItem>,
}

impl Legend {
    /// Fixed-position overlay: title first, then one row per category.
    pub fn to_markup(&self) -> Markup {
        html! {
            div class="legend-container" {
                div class="legend-title" { (self.title) }
                @for item in &self.items {
                    div class="legend-item" {
                        span class="legend-color-dot" style=(format!("background-color: {}", item.color)) {}
                        span class="legend-category-name" { (item.category) }
                    }
                }
            }
        }
    }
}

/// Legend with one item per palette entry.
pub fn build_legend(palette: &CategoryPalette) -> Legend {
    Legend {
        title: LEGEND_TITLE,
        items: palette
            .iter()
            .map(|(category, color)| LegendItem {
                category: category.to_string(),
                color: color.to_string(),
            })
            .collect(),
    }
}
