//! Boundary geometry: provider payload parsing and the containment test.
//!
//! Provider geometries arrive as loosely-typed GeoJSON; they are mapped
//! into validated `geo` shapes here so the rest of the pipeline only ever
//! sees well-formed multipolygons.

mod contains;
mod parse;

pub use contains::contains;
pub use parse::GeoJsonGeometry;
