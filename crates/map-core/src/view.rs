//! Immutable view model assembled once at process start.

use std::path::Path;

use crate::{
    legend::{Legend, build_legend},
    loader::{LoadError, load_records},
    marker::{MarkerSet, build_markers},
    palette::CategoryPalette,
    record::BusinessRecord,
};

/// Everything the page and handlers need, computed up front and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub records: Vec<BusinessRecord>,
    pub palette: CategoryPalette,
    pub markers: MarkerSet,
    pub legend: Legend,
}

impl ViewModel {
    pub fn build(records: Vec<BusinessRecord>, palette: CategoryPalette) -> Self {
        let markers = build_markers(&records, &palette);
        let legend = build_legend(&palette);
        Self {
            records,
            palette,
            markers,
            legend,
        }
    }

    pub fn load(path: impl AsRef<Path>, palette: CategoryPalette) -> Result<Self, LoadError> {
        let records = load_records(path)?;
        Ok(Self::build(records, palette))
    }

    /// Records that could not be placed on the map.
    pub fn unplaced(&self) -> impl Iterator<Item = &BusinessRecord> {
        self.records
            .iter()
            .filter(|record| record.coordinates.is_none())
    }
}
