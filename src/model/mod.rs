//! Data model: measurement tables and value-with-uncertainty pairs.

pub mod quantity;
mod table;

pub use quantity::{Extreme, Quantity};
pub use table::MeasurementTable;
