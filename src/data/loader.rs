use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, StringArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{required_columns, CellValue, RawColumn, RawTable};
use super::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the campaign table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one customer per row
/// * `.json`    – records orient: `[{ "Income": 58138, ... }, ...]`
/// * `.parquet` – flat scalar columns (as written by `df.to_parquet()`)
///
/// Fails with [`DataError::Schema`] if any required column is absent.
pub fn load_file(path: &Path) -> Result<RawTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    check_schema(&table)?;
    Ok(table)
}

/// Verify that every required column is present in the loaded table.
fn check_schema(table: &RawTable) -> Result<(), DataError> {
    for column in required_columns() {
        if !table.has_column(column) {
            return Err(DataError::Schema {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per customer. Empty
/// cells are missing values; anything that parses as a float is numeric.
fn load_csv(path: &Path) -> Result<RawTable, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut columns: Vec<RawColumn> = headers
        .iter()
        .map(|name| RawColumn {
            name: name.clone(),
            cells: Vec::new(),
        })
        .collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            return Err(DataError::Malformed {
                row: row_no,
                detail: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            col.cells.push(parse_cell(field));
        }
    }

    Ok(RawTable { columns })
}

fn parse_cell(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Missing;
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Number(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Income": 58138.0, "Response": 1, "Kidhome": 0, ... },
///   ...
/// ]
/// ```
///
/// Column order follows the first record; keys absent from a record become
/// missing values.
fn load_json(path: &Path) -> Result<RawTable, DataError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or_else(|| DataError::Malformed {
        row: 0,
        detail: "expected top-level JSON array".to_string(),
    })?;

    let mut columns: Vec<RawColumn> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for (row_no, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| DataError::Malformed {
            row: row_no,
            detail: "row is not a JSON object".to_string(),
        })?;

        for (key, val) in obj {
            let idx = *index.entry(key.clone()).or_insert_with(|| {
                columns.push(RawColumn {
                    name: key.clone(),
                    // Backfill rows seen before this column first appeared.
                    cells: vec![CellValue::Missing; row_no],
                });
                columns.len() - 1
            });
            columns[idx].cells.push(json_to_cell(val));
        }

        // Keys absent from this record are missing.
        for col in columns.iter_mut() {
            if col.cells.len() == row_no {
                col.cells.push(CellValue::Missing);
            }
        }
    }

    Ok(RawTable { columns })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): ints, floats, strings, and bools are
/// accepted; bools become 0/1 indicators.
fn load_parquet(path: &Path) -> Result<RawTable, DataError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut columns: Vec<RawColumn> = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        if columns.is_empty() {
            columns = schema
                .fields()
                .iter()
                .map(|f| RawColumn {
                    name: f.name().clone(),
                    cells: Vec::new(),
                })
                .collect();
        }

        for (col_idx, col) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                col.cells.push(extract_cell(array, row));
            }
        }
    }

    Ok(RawTable { columns })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Missing;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_primitive::<Int32Type>();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_primitive::<Int64Type>();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col.as_primitive::<Float32Type>();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_primitive::<Float64Type>();
            CellValue::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_boolean();
            CellValue::Number(if arr.value(row) { 1.0 } else { 0.0 })
        }
        _ => CellValue::Text(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "Income,Response,Complain,Kidhome,\
AcceptedCmp1,AcceptedCmp2,AcceptedCmp3,AcceptedCmp4,AcceptedCmp5,\
MntWines,MntFruits,MntMeatProducts,MntFishProducts,MntSweetProducts,MntGoldProds";

    #[test]
    fn csv_roundtrip_with_missing_income() {
        let csv = format!(
            "{HEADER}\n58138,1,0,0,0,0,0,0,1,635,88,546,172,88,88\n,0,0,1,0,0,0,0,0,11,1,6,2,1,6\n"
        );
        let path = write_temp("campaign_lens_loader_ok.csv", &csv);
        let table = load_file(&path).unwrap();

        assert_eq!(table.n_rows(), 2);
        let income = &table.columns[0];
        assert_eq!(income.name, "Income");
        assert_eq!(income.cells[0], CellValue::Number(58_138.0));
        assert_eq!(income.cells[1], CellValue::Missing);
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let csv = "Income,Response\n58138,1\n";
        let path = write_temp("campaign_lens_loader_schema.csv", csv);
        match load_file(&path) {
            Err(DataError::Schema { column }) => assert_eq!(column, "Complain"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::path::Path::new("ifood_df.xlsx");
        assert!(matches!(
            load_file(path),
            Err(DataError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn json_records_orient() {
        let json = r#"[
            {"Income": 58138, "Response": 1, "Complain": 0, "Kidhome": 0,
             "AcceptedCmp1": 0, "AcceptedCmp2": 0, "AcceptedCmp3": 0,
             "AcceptedCmp4": 0, "AcceptedCmp5": 1,
             "MntWines": 635, "MntFruits": 88, "MntMeatProducts": 546,
             "MntFishProducts": 172, "MntSweetProducts": 88, "MntGoldProds": 88},
            {"Income": null, "Response": 0, "Complain": 0, "Kidhome": 2,
             "AcceptedCmp1": 0, "AcceptedCmp2": 0, "AcceptedCmp3": 0,
             "AcceptedCmp4": 0, "AcceptedCmp5": 0,
             "MntWines": 11, "MntFruits": 1, "MntMeatProducts": 6,
             "MntFishProducts": 2, "MntSweetProducts": 1, "MntGoldProds": 6}
        ]"#;
        let path = write_temp("campaign_lens_loader_ok.json", json);
        let table = load_file(&path).unwrap();

        assert_eq!(table.n_rows(), 2);
        let income = table
            .columns
            .iter()
            .find(|c| c.name == "Income")
            .unwrap();
        assert_eq!(income.cells[1], CellValue::Missing);
    }
}
