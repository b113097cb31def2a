//! Derived dataset HTTP handler.
//!
//! ```text
//! GET /data
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::domain::{CellValue, Dataset, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One derived record, serialized as an object keyed in column order.
///
/// Serialization is manual so the key order follows the table's columns
/// and every column appears in every record — missing cells emit `null`
/// rather than dropping the key.
struct RecordDto<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl Serialize for RecordDto<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Response payload for `GET /data`.
#[derive(Serialize)]
struct DatasetResponse<'a> {
    columns: &'a [String],
    data: Vec<RecordDto<'a>>,
    repaid_cols: &'a [String],
    days_late_col: &'a str,
}

impl<'a> DatasetResponse<'a> {
    fn from_dataset(dataset: &'a Dataset) -> Self {
        let columns = dataset.table.columns();
        Self {
            columns,
            data: dataset
                .table
                .rows()
                .iter()
                .map(|row| RecordDto {
                    columns,
                    cells: row,
                })
                .collect(),
            repaid_cols: &dataset.repaid_columns,
            days_late_col: &dataset.days_late_column,
        }
    }
}

/// Serve the derived dataset.
///
/// First request fetches and derives; later requests serve the cached
/// snapshot.
///
/// # Errors
///
/// - `500 Internal Server Error`: remote fetch/parse failed, or the
///   source lacks a usable days-late column.
#[utoipa::path(
    get,
    path = "/data",
    description = "Derived repayment dataset: source columns plus total_repaid and days_late_bucket.",
    responses(
        (status = 200, description = "Derived dataset"),
        (status = 500, description = "Source unavailable or required column missing", body = Error)
    ),
    tags = ["data"],
    operation_id = "getData"
)]
#[get("/data")]
pub async fn get_data(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let dataset = state.dataset.dataset().await?;
    Ok(HttpResponse::Ok().json(DatasetResponse::from_dataset(&dataset)))
}
