//! Full-viewport map page: tile layer, business markers, legend, and welcome banner.
//!
//! Marker content is rendered server-side; the embedded script only hands the
//! pre-built HTML to Leaflet, which owns tooltip/popup open and close.

use anyhow::{Context, Result};
use map_core::{Coordinates, Marker, ViewModel};
use maud::html;
use serde::Serialize;

pub const STADIA_TONER_URL: &str =
    "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.png?api_key=";

pub const STADIA_ATTRIBUTION: &str = concat!(
    "&copy; <a href=\"https://stadiamaps.com/\">Stadia Maps</a>, ",
    "&copy; <a href=\"https://stamen.com/\">Stamen Design</a>, ",
    "&copy; <a href=\"https://openmaptiles.org/\">OpenMapTiles</a>, ",
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
);

pub const INITIAL_CENTER: Coordinates = Coordinates::new(45.5250, -73.5992);
pub const INITIAL_ZOOM: f64 = 15.0;
pub const WELCOME_TEXT: &str = "Welcome to MTL.";

/// Leaflet tile source and its credit line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileLayer {
    /// Leaflet URL template with the API key already appended.
    pub url: String,
    /// HTML credit line shown in the map corner.
    pub attribution: String,
}

impl TileLayer {
    /// Stamen Toner tiles via Stadia. An empty key yields broken tiles, not an error.
    pub fn stadia_toner(api_key: &str) -> Self {
        Self {
            url: format!("{STADIA_TONER_URL}{api_key}"),
            attribution: STADIA_ATTRIBUTION.to_string(),
        }
    }
}

/// Everything about the page that does not come from the business table.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// Background tile layer.
    pub tiles: TileLayer,
    /// Initial map center.
    pub center: Coordinates,
    /// Initial Leaflet zoom level.
    pub zoom: f64,
    /// Banner text shown over the map.
    pub welcome: String,
}

impl PageConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            tiles: TileLayer::stadia_toner(api_key),
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            welcome: WELCOME_TEXT.to_string(),
        }
    }
}

#[derive(Serialize)]
struct MapBootstrap<'a> {
    center: [f64; 2],
    zoom: f64,
    tiles: &'a TileLayer,
    markers: Vec<LeafletMarker<'a>>,
}

/// Leaflet `circleMarker` options plus pre-rendered tooltip/popup HTML.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafletMarker<'a> {
    index: usize,
    center: [f64; 2],
    radius: u32,
    color: &'a str,
    fill: bool,
    fill_color: &'a str,
    fill_opacity: f64,
    weight: u32,
    tooltip: &'a str,
    popup: &'a str,
    popup_max_width_vw: u8,
}

impl<'a> From<&'a Marker> for LeafletMarker<'a> {
    fn from(marker: &'a Marker) -> Self {
        Self {
            index: marker.index,
            center: [marker.position.lat, marker.position.lon],
            radius: marker.radius,
            color: &marker.color,
            fill: marker.fill,
            fill_color: marker.fill_color(),
            fill_opacity: marker.fill_opacity,
            weight: marker.weight,
            tooltip: &marker.tooltip,
            popup: &marker.popup.html,
            popup_max_width_vw: marker.popup.max_width.viewport_percent,
        }
    }
}

/// Render the single page served at `/`.
pub fn compose_page(view: &ViewModel, config: &PageConfig) -> Result<String> {
    let bootstrap = MapBootstrap {
        center: [config.center.lat, config.center.lon],
        zoom: config.zoom,
        tiles: &config.tiles,
        markers: view.markers.markers.iter().map(LeafletMarker::from).collect(),
    };
    let bootstrap_json =
        serde_json::to_string(&bootstrap).context("Failed to serialise map markers")?;

    let welcome = html! { div class="welcome-div" { (config.welcome) } };

    Ok(PAGE_TEMPLATE
        .replace("__LEGEND__", &view.legend.to_markup().into_string())
        .replace("__WELCOME__", &welcome.into_string())
        .replace("__MAP_DATA__", &script_safe(&bootstrap_json)))
}

/// Keep embedded JSON from closing its `<script>` element early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mile End</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>
  <link rel="stylesheet" href="/assets/styles.css" />
</head>

<body>
  <div class="app-layout">
    <div id="map" style="width: 100%; height: 100vh"></div>
    __LEGEND__
    __WELCOME__
  </div>

  <script type="application/json" id="map-data">__MAP_DATA__</script>
  <script>
    (() => {
      const data = JSON.parse(document.getElementById('map-data').textContent);
      const map = L.map('map', {center: data.center, zoom: data.zoom});

      L.tileLayer(data.tiles.url, {attribution: data.tiles.attribution}).addTo(map);

      const popupWidth = (vw) => Math.round(window.innerWidth * vw / 100);
      const markers = L.featureGroup().addTo(map);
      for (const m of data.markers) {
        L.circleMarker(m.center, {
          radius: m.radius,
          color: m.color,
          fill: m.fill,
          fillColor: m.fillColor,
          fillOpacity: m.fillOpacity,
          weight: m.weight
        })
          .bindTooltip(m.tooltip, {permanent: false})
          .bindPopup(m.popup, {maxWidth: popupWidth(m.popupMaxWidthVw)})
          .addTo(markers);
      }
    })();
  </script>
</body>

</html>
"#;
