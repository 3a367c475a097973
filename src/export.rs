//! Snapshot export for CSV and JSON formats.
//!
//! Used by `--export` to dump the job list without starting the UI. An
//! optional column list narrows and reorders the output; names are matched
//! against the `squeue` header exactly.

use lasso::Spur;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::ExportError;
use crate::parser::Dataset;

/// Export format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Prefix so spreadsheet tools detect the encoding.
const UTF8_BOM: &str = "\u{FEFF}";

/// Export `columns` of the snapshot (every column when empty) in `format`.
pub fn export_table(
    data: &Dataset,
    format: ExportFormat,
    columns: &[String],
) -> Result<String, ExportError> {
    let projection = Projection::new(data, columns)?;
    match format {
        ExportFormat::Csv => projection.to_csv(),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&projection)?),
    }
}

/// A view of selected columns, in output order.
struct Projection<'a> {
    data: &'a Dataset,
    columns: Vec<usize>,
}

impl<'a> Projection<'a> {
    fn new(data: &'a Dataset, names: &[String]) -> Result<Self, ExportError> {
        let columns = if names.is_empty() {
            (0..data.column_count()).collect()
        } else {
            names
                .iter()
                .map(|name| {
                    data.headers
                        .iter()
                        .position(|h| h == name)
                        .ok_or_else(|| ExportError::UnknownColumn(name.clone()))
                })
                .collect::<Result<_, _>>()?
        };
        Ok(Self { data, columns })
    }

    fn headers(&self) -> impl Iterator<Item = &'a str> + '_ {
        let data = self.data;
        self.columns.iter().map(move |&c| data.headers[c].as_str())
    }

    fn cells(&self, row: &'a [Spur]) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        let data = self.data;
        self.columns
            .iter()
            .map(move |&c| (data.headers[c].as_str(), data.resolve(&row[c])))
    }

    fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(UTF8_BOM.as_bytes().to_vec());
        wtr.write_record(self.headers())?;
        for row in &self.data.rows {
            wtr.write_record(self.cells(row).map(|(_, value)| value))?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

struct Record<'p, 'a>(&'p Projection<'a>, &'a [Spur]);

impl Serialize for Record<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.columns.len()))?;
        for (header, value) in self.0.cells(self.1) {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

/// Serializes as an array of objects keyed by header, in column order.
impl Serialize for Projection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.data.row_count()))?;
        for row in &self.data.rows {
            seq.serialize_element(&Record(self, row))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_squeue;

    fn sample_table() -> Dataset {
        parse_squeue("JOBID NAME STATE\n1 alpha RUNNING\n2 beta PENDING")
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_export_csv() {
        let result = export_table(&sample_table(), ExportFormat::Csv, &[]).unwrap();
        assert!(result.starts_with(UTF8_BOM));
        assert!(result.contains("JOBID,NAME,STATE\n"));
        assert!(result.contains("1,alpha,RUNNING\n"));
        assert!(result.contains("2,beta,PENDING\n"));
    }

    #[test]
    fn test_export_json_keeps_column_order() {
        let result = export_table(&sample_table(), ExportFormat::Json, &[]).unwrap();
        let first = result.find("\"JOBID\"").unwrap();
        let second = result.find("\"NAME\"").unwrap();
        let third = result.find("\"STATE\"").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_export_selected_columns_reordered() {
        let result =
            export_table(&sample_table(), ExportFormat::Csv, &cols(&["STATE", "JOBID"])).unwrap();
        assert_eq!(result, format!("{}STATE,JOBID\nRUNNING,1\nPENDING,2\n", UTF8_BOM));

        let json = export_table(&sample_table(), ExportFormat::Json, &cols(&["NAME"])).unwrap();
        assert!(!json.contains("JOBID"));
        assert!(json.contains("\"NAME\": \"beta\""));
    }

    #[test]
    fn test_export_unknown_column() {
        let err = export_table(&sample_table(), ExportFormat::Json, &cols(&["JOBID", "PARTITION"]))
            .unwrap_err();
        assert!(matches!(err, ExportError::UnknownColumn(ref name) if name == "PARTITION"));
    }

    #[test]
    fn test_export_empty_table() {
        let data = parse_squeue("JOBID NAME");

        let csv_result = export_table(&data, ExportFormat::Csv, &[]).unwrap();
        assert!(csv_result.contains("JOBID,NAME"));

        let json_result = export_table(&data, ExportFormat::Json, &[]).unwrap();
        assert_eq!(json_result.trim(), "[]");
    }
}
