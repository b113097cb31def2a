//! Derivation engine: shape the raw spreadsheet into the served dataset.
//!
//! Pure function of the input table. Adds `total_repaid` and
//! `days_late_bucket`, normalizes `officer` in place, and reports which
//! columns participated so the frontend can render them without
//! re-deriving the heuristics.

use serde_json::json;

use super::columns;
use super::error::Error;
use super::table::{CellValue, Table};
use super::text::normalize_name;

/// Column holding the loan officer's name.
pub const OFFICER_COLUMN: &str = "officer";

/// Derived column: row-wise sum of the repaid family.
pub const TOTAL_REPAID_COLUMN: &str = "total_repaid";

/// Derived column: categorical lateness bucket.
pub const DAYS_LATE_BUCKET_COLUMN: &str = "days_late_bucket";

/// The derived table plus the column inferences that produced it.
///
/// Immutable once computed; the cache hands out shared references for the
/// rest of the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Source table with normalized officer names and the derived columns
    /// appended.
    pub table: Table,
    /// Repaid columns included in `total_repaid`, in source order.
    pub repaid_columns: Vec<String>,
    /// The column that drove `days_late_bucket`.
    pub days_late_column: String,
}

/// Bucket a days-late value by inclusive thresholds 30/60/90.
pub fn days_late_bucket(value: Option<f64>) -> &'static str {
    match value {
        None => "Unknown",
        Some(days) if days <= 30.0 => "1-30",
        Some(days) if days <= 60.0 => "31-60",
        Some(days) if days <= 90.0 => "61-90",
        Some(_) => "90+",
    }
}

/// Compute the derived dataset.
///
/// # Errors
///
/// Returns a [`MissingColumn`](super::error::ErrorCode::MissingColumn)
/// error when the table lacks an `officer` column or any usable
/// days-late column. Both are fatal for the whole load; no partial
/// dataset is produced.
pub fn derive(mut table: Table) -> Result<Dataset, Error> {
    let officer_index = table.column_index(OFFICER_COLUMN).ok_or_else(|| {
        Error::missing_column("No 'officer' column found")
            .with_details(json!({ "column": OFFICER_COLUMN }))
    })?;
    for row in table.rows_mut() {
        row[officer_index] = CellValue::Text(normalize_name(&row[officer_index].render()));
    }

    let repaid_columns = columns::repaid_columns(table.columns());
    let repaid_indices: Vec<usize> = repaid_columns
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let mut totals = Vec::with_capacity(table.len());
    for row in table.rows_mut() {
        let mut total = 0.0;
        for &index in &repaid_indices {
            let value = row[index].as_number().unwrap_or(0.0);
            row[index] = CellValue::Number(value);
            total += value;
        }
        totals.push(CellValue::Number(total));
    }
    table.add_column(TOTAL_REPAID_COLUMN, totals);

    let days_late_column = columns::find_days_late_column(table.columns())
        .ok_or_else(|| Error::missing_column("No valid 'days_late' column found"))?
        .to_owned();
    // find_days_late_column returned this exact name, so the index exists.
    let days_late_index = table
        .column_index(&days_late_column)
        .ok_or_else(|| Error::internal("days-late column vanished during derivation"))?;
    let buckets = table
        .rows()
        .iter()
        .map(|row| CellValue::Text(days_late_bucket(row[days_late_index].as_number()).to_owned()))
        .collect();
    table.add_column(DAYS_LATE_BUCKET_COLUMN, buckets);

    Ok(Dataset {
        table,
        repaid_columns,
        days_late_column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use rstest::rstest;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_owned()).collect());
        for row in rows {
            table.push_row(row.iter().map(|cell| CellValue::parse(cell)).collect());
        }
        table
    }

    #[rstest]
    #[case(Some(1.0), "1-30")]
    #[case(Some(30.0), "1-30")]
    #[case(Some(31.0), "31-60")]
    #[case(Some(60.0), "31-60")]
    #[case(Some(61.0), "61-90")]
    #[case(Some(90.0), "61-90")]
    #[case(Some(91.0), "90+")]
    #[case(None, "Unknown")]
    fn buckets_by_inclusive_thresholds(#[case] days: Option<f64>, #[case] expected: &str) {
        assert_eq!(days_late_bucket(days), expected);
    }

    #[test]
    fn sums_repaid_columns_with_non_numeric_as_zero() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "repaid_feb", "days_late"],
            &[&["ada", "100", "abc", "5"]],
        ))
        .expect("derivation succeeds");

        assert_eq!(dataset.repaid_columns, ["repaid_jan", "repaid_feb"]);
        let total_index = dataset
            .table
            .column_index(TOTAL_REPAID_COLUMN)
            .expect("total column");
        assert_eq!(dataset.table.rows()[0][total_index], CellValue::Number(100.0));
        let feb_index = dataset.table.column_index("repaid_feb").expect("feb column");
        assert_eq!(
            dataset.table.rows()[0][feb_index],
            CellValue::Number(0.0),
            "non-numeric repaid cells coerce to zero in place"
        );
    }

    #[test]
    fn negative_repayments_pass_through() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "days_late"],
            &[&["ada", "-50", "5"]],
        ))
        .expect("derivation succeeds");
        let total_index = dataset
            .table
            .column_index(TOTAL_REPAID_COLUMN)
            .expect("total column");
        assert_eq!(dataset.table.rows()[0][total_index], CellValue::Number(-50.0));
    }

    #[test]
    fn repaid_amounts_never_joins_the_sum() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "repaid_amounts", "days_late"],
            &[&["ada", "10", "999", "5"]],
        ))
        .expect("derivation succeeds");
        assert_eq!(dataset.repaid_columns, ["repaid_jan"]);
        let total_index = dataset
            .table
            .column_index(TOTAL_REPAID_COLUMN)
            .expect("total column");
        assert_eq!(dataset.table.rows()[0][total_index], CellValue::Number(10.0));
    }

    #[test]
    fn normalizes_officer_names_and_missing_officer_cells() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "days_late"],
            &[&["  jane DOE ", "1", "5"], &["", "2", "5"]],
        ))
        .expect("derivation succeeds");
        let officer_index = dataset.table.column_index(OFFICER_COLUMN).expect("officer");
        assert_eq!(
            dataset.table.rows()[0][officer_index],
            CellValue::Text("Jane Doe".to_owned())
        );
        assert_eq!(
            dataset.table.rows()[1][officer_index],
            CellValue::Text("Nan".to_owned()),
            "missing officers render like the upstream reader's nan"
        );
    }

    #[test]
    fn appends_derived_columns_in_order() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "days_late"],
            &[&["ada", "1", "35"]],
        ))
        .expect("derivation succeeds");
        assert_eq!(
            dataset.table.columns(),
            [
                "officer",
                "repaid_jan",
                "days_late",
                TOTAL_REPAID_COLUMN,
                DAYS_LATE_BUCKET_COLUMN
            ]
        );
        let bucket_index = dataset
            .table
            .column_index(DAYS_LATE_BUCKET_COLUMN)
            .expect("bucket column");
        assert_eq!(
            dataset.table.rows()[0][bucket_index],
            CellValue::Text("31-60".to_owned())
        );
    }

    #[test]
    fn fails_when_only_the_excluded_days_late_column_exists() {
        let err = derive(table(
            &["officer", "repaid_jan", "days_late_lastinstallment"],
            &[&["ada", "1", "5"]],
        ))
        .expect_err("derivation must fail");
        assert_eq!(err.code(), ErrorCode::MissingColumn);
    }

    #[test]
    fn fails_without_an_officer_column() {
        let err = derive(table(&["repaid_jan", "days_late"], &[&["1", "5"]]))
            .expect_err("derivation must fail");
        assert_eq!(err.code(), ErrorCode::MissingColumn);
    }

    #[test]
    fn non_numeric_days_late_buckets_as_unknown() {
        let dataset = derive(table(
            &["officer", "repaid_jan", "days_late"],
            &[&["ada", "1", "soon"]],
        ))
        .expect("derivation succeeds");
        let bucket_index = dataset
            .table
            .column_index(DAYS_LATE_BUCKET_COLUMN)
            .expect("bucket column");
        assert_eq!(
            dataset.table.rows()[0][bucket_index],
            CellValue::Text("Unknown".to_owned())
        );
    }
}
