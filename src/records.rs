// 🚗 Sales Records - Data model + JSON ingestion
// One record = aggregate sales of a single car model

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ReportError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// CarInfo - make, model, and model year of one car
///
/// The input JSON uses `car_make`/`car_model`/`car_year` field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarInfo {
    #[serde(rename = "car_make")]
    pub make: String,

    #[serde(rename = "car_model")]
    pub model: String,

    #[serde(rename = "car_year")]
    pub year: i32,
}

impl CarInfo {
    /// Human-readable label: `"<make> <model> (<year>)"`
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}

/// SalesRecord - one row of input data
///
/// Immutable once loaded: aggregation reads records, it never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: u64,
    pub car: CarInfo,

    /// Unit price as a currency string, e.g. `"$30000.00"`
    pub price: String,

    pub total_sales: u64,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a JSON array of sales records from disk.
///
/// A missing file or a document that is not a JSON array of records is an
/// `InputNotFound` error - nothing downstream runs without the data.
pub fn load_records(path: &Path) -> Result<Vec<SalesRecord>, ReportError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ReportError::input_not_found(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| ReportError::input_not_found(format!("{}: invalid JSON: {}", path.display(), e)))
}
