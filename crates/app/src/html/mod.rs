//! HTML served by the map UI.
//!
//! The page shell is kept as a `&'static str` template bundled inside the binary;
//! only the marker data, legend, and banner are filled in at startup.

pub mod page;
