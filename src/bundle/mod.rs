// ABOUTME: Parameter bundle module for the elementals function framework
// ABOUTME: Exports the bundle records, the dynamic value type and the record capability

pub mod error;
pub mod params;
pub mod record;
pub mod value;

pub use error::{BundleError, Result};
pub use params::{ElementalParams, Environment, Meta, ProcessInfo};
pub use record::{Node, Record};
pub use value::{Map, RecordValue, Value};
