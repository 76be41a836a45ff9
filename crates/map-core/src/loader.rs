//! One-shot loader for the business source table.
//!
//! Columns are matched by header name. Optional cells are normalised here, once,
//! so formatting never has to second-guess blank strings.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::record::{BusinessRecord, Coordinates, PhotoOrientation, optional_text};

pub const COL_NAME: &str = "business_name";
pub const COL_CATEGORY: &str = "category";
pub const COL_LAT: &str = "lat";
pub const COL_LON: &str = "lon";
pub const COL_ADDRESS: &str = "Addresse";
pub const COL_DESCRIPTION: &str = "description_fr";
pub const COL_INSTAGRAM: &str = "instagram";
pub const COL_PHOTO: &str = "image_url";
pub const COL_ORIENTATION: &str = "image_orientation";

const REQUIRED_COLUMNS: [&str; 4] = [COL_NAME, COL_CATEGORY, COL_LAT, COL_LON];

/// Startup-fatal failures while reading the source table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open business table {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("business table is missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("row {row}: column `{column}` is not a valid coordinate: {value:?}")]
    InvalidCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Header positions resolved once per table.
struct ColumnIndex {
    name: usize,
    category: usize,
    lat: usize,
    lon: usize,
    address: Option<usize>,
    description: Option<usize>,
    instagram: Option<usize>,
    photo: Option<usize>,
    orientation: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let position = |column: &str| headers.iter().position(|header| header == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.to_string())
            .collect();
        let (Some(name), Some(category), Some(lat), Some(lon)) = (
            position(COL_NAME),
            position(COL_CATEGORY),
            position(COL_LAT),
            position(COL_LON),
        ) else {
            return Err(LoadError::MissingColumns { missing });
        };

        Ok(Self {
            name,
            category,
            lat,
            lon,
            address: position(COL_ADDRESS),
            description: position(COL_DESCRIPTION),
            instagram: position(COL_INSTAGRAM),
            photo: position(COL_PHOTO),
            orientation: position(COL_ORIENTATION),
        })
    }
}

/// Read the table at `path` into records, in row order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BusinessRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Read records from any CSV source with a header row.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BusinessRecord>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(index, &row, &columns)?);
    }
    Ok(records)
}

fn parse_row(
    index: usize,
    row: &StringRecord,
    columns: &ColumnIndex,
) -> Result<BusinessRecord, LoadError> {
    let cell = |position: Option<usize>| position.and_then(|position| row.get(position));
    let required = |position: usize| row.get(position).unwrap_or_default().trim().to_string();

    let lat = parse_coordinate(index, COL_LAT, row.get(columns.lat))?;
    let lon = parse_coordinate(index, COL_LON, row.get(columns.lon))?;
    let coordinates = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    };

    Ok(BusinessRecord {
        index,
        name: required(columns.name),
        category: required(columns.category),
        coordinates,
        address: optional_text(cell(columns.address)),
        description: optional_text(cell(columns.description)),
        instagram: optional_text(cell(columns.instagram)),
        photo: optional_text(cell(columns.photo)),
        orientation: PhotoOrientation::from_cell(cell(columns.orientation)),
    })
}

/// Blank cells yield `None`; anything else must be a finite float.
fn parse_coordinate(
    row: usize,
    column: &'static str,
    raw: Option<&str>,
) -> Result<Option<f64>, LoadError> {
    let Some(value) = optional_text(raw) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(LoadError::InvalidCoordinate { row, column, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "business_name,category,lat,lon,Addresse,description_fr,instagram,image_url,image_orientation";

    fn read(body: &str) -> Result<Vec<BusinessRecord>, LoadError> {
        read_records(body.as_bytes())
    }

    #[test]
    fn reads_full_row() {
        let table = format!(
            "{HEADER}\nDispatch,coffee,45.5231,-73.5998,\"267 rue St-Zotique O\",Torréfacteur,dispatchcoffee,dispatch.jpg,portrait\n"
        );
        let records = read(&table).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.index, 0);
        assert_eq!(record.name, "Dispatch");
        assert_eq!(record.coordinates, Some(Coordinates::new(45.5231, -73.5998)));
        assert_eq!(record.address.as_deref(), Some("267 rue St-Zotique O"));
        assert_eq!(record.description.as_deref(), Some("Torréfacteur"));
        assert_eq!(record.instagram.as_deref(), Some("dispatchcoffee"));
        assert_eq!(record.photo.as_deref(), Some("dispatch.jpg"));
        assert_eq!(record.orientation, PhotoOrientation::Portrait);
    }

    #[test]
    fn columns_are_matched_by_name() {
        let records = read("lon,instagram,lat,category,business_name\n-73.6,,45.52,Bar,Le Barbu\n").unwrap();
        let record = &records[0];
        assert_eq!(record.name, "Le Barbu");
        assert_eq!(record.category, "Bar");
        assert_eq!(record.coordinates, Some(Coordinates::new(45.52, -73.6)));
        assert_eq!(record.instagram, None);
        assert_eq!(record.orientation, PhotoOrientation::Landscape);
    }

    #[test]
    fn blank_optional_cells_become_none() {
        let table = format!("{HEADER}\nCafe X,coffee,45.52,-73.6,  ,,,,\n");
        let record = &read(&table).unwrap()[0];
        assert_eq!(record.address, None);
        assert_eq!(record.description, None);
        assert_eq!(record.photo, None);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let table = format!("{HEADER}\nCafe X,coffee,45.52,-73.6\n");
        let record = &read(&table).unwrap()[0];
        assert_eq!(record.address, None);
        assert_eq!(record.orientation, PhotoOrientation::Landscape);
    }

    #[test]
    fn missing_required_columns_are_all_reported() {
        let err = read("business_name,lat\nCafe X,45.52\n").unwrap_err();
        match err {
            LoadError::MissingColumns { missing } => assert_eq!(missing, vec!["category", "lon"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_coordinates_load_without_position() {
        let records = read("business_name,category,lat,lon\nNowhere,Bar,,-73.6\n").unwrap();
        assert_eq!(records[0].coordinates, None);
    }

    #[test]
    fn non_numeric_coordinate_is_fatal() {
        let err = read("business_name,category,lat,lon\nCafe X,coffee,north,-73.6\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidCoordinate { row: 0, column: "lat", .. }
        ));
    }

    #[test]
    fn missing_file_reports_open_error() {
        let err = load_records("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
