use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::{
    error::{GeoError, Result},
    utils::{parse_cell, transpose},
};

/// Row label closing the expression table in series-matrix files
pub const TABLE_END_MARKER: &str = "!series_matrix_table_end";

/// Index name given to the sample axis after transposition
pub const SAMPLE_INDEX_NAME: &str = "Sample_ID";

/// A labelled numeric table
///
/// As parsed, rows are probes and columns are samples. After
/// [`ExpressionMatrix::transpose`] rows are samples indexed by `Sample_ID`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatrix {
    pub index_name: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// Row-major values, one inner vector per row
    pub values: Vec<Vec<f64>>,
}
impl ExpressionMatrix {
    /// Parses the data lines of a series-matrix file
    ///
    /// The lines are joined and read as a tab-separated table with the first
    /// row as header and the first column as row label. A trailing
    /// `!series_matrix_table_end` row is dropped. Rows shorter than the header
    /// are padded with `NaN`; longer rows are an error.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let block = lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(block.as_bytes());

        let mut records = reader
            .records()
            .collect::<std::result::Result<Vec<StringRecord>, _>>()?;
        if records.is_empty() {
            return Err(GeoError::EmptyTable);
        }
        let header = records.remove(0);

        if records
            .last()
            .is_some_and(|record| record.get(0) == Some(TABLE_END_MARKER))
        {
            debug!("Dropping {TABLE_END_MARKER} row");
            records.pop();
        }

        let index_name = header.get(0).unwrap_or_default().to_string();
        let column_labels = header.iter().skip(1).map(String::from).collect::<Vec<_>>();

        let mut row_labels = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        for record in &records {
            let label = record.get(0).unwrap_or_default().to_string();
            if record.len() > header.len() {
                return Err(GeoError::Ragged {
                    label,
                    expected: header.len(),
                    found: record.len(),
                });
            }
            let mut row = record
                .iter()
                .skip(1)
                .zip(&column_labels)
                .map(|(cell, column)| {
                    parse_cell(cell).ok_or_else(|| GeoError::NonNumeric {
                        row: label.clone(),
                        column: column.clone(),
                        value: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            // short rows lose trailing empty cells to line trimming
            row.resize(column_labels.len(), f64::NAN);
            row_labels.push(label);
            values.push(row);
        }

        debug!(
            "Parsed expression matrix with {} rows and {} columns",
            row_labels.len(),
            column_labels.len()
        );
        Ok(Self {
            index_name,
            row_labels,
            column_labels,
            values,
        })
    }

    /// Swaps rows and columns; the new row index is named `Sample_ID`
    pub fn transpose(self) -> Self {
        let values = transpose(&self.values, self.column_labels.len());
        Self {
            index_name: SAMPLE_INDEX_NAME.to_string(),
            row_labels: self.column_labels,
            column_labels: self.row_labels,
            values,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.column_labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_quoted_table() {
        let data = lines(&[
            "\"ID_REF\"\t\"GSM591265\"\t\"GSM591267\"",
            "\"1007_s_at\"\t10.5\t-2",
            "\"1053_at\"\t0\t3.25",
        ]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.index_name, "ID_REF");
        assert_eq!(matrix.row_labels, vec!["1007_s_at", "1053_at"]);
        assert_eq!(matrix.column_labels, vec!["GSM591265", "GSM591267"]);
        assert_eq!(matrix.values, vec![vec![10.5, -2.0], vec![0.0, 3.25]]);
    }

    #[test]
    fn test_parse_drops_end_marker() {
        let data = lines(&[
            "ID_REF\tGSM1\tGSM2",
            "p1\t1\t2",
            "!series_matrix_table_end",
        ]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.row_labels, vec!["p1"]);
        assert!(!matrix.column_labels.iter().any(|c| c == TABLE_END_MARKER));
    }

    #[test]
    fn test_parse_keeps_inner_end_marker_row() {
        let data = lines(&["ID_REF\tGSM1", "!series_matrix_table_end\t1", "p1\t2"]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.row_labels, vec![TABLE_END_MARKER, "p1"]);
    }

    #[test]
    fn test_parse_missing_values() {
        let data = lines(&["ID_REF\tGSM1\tGSM2", "p1\tnull\t", "p2\tNaN\t4"]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert!(matrix.values[0][0].is_nan());
        assert!(matrix.values[0][1].is_nan());
        assert!(matrix.values[1][0].is_nan());
        assert_eq!(matrix.values[1][1], 4.0);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let data = lines(&["ID_REF\tGSM1", "", "p1\t1", ""]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.n_rows(), 1);
    }

    #[test]
    fn test_parse_header_only() {
        let data = lines(&["ID_REF\tGSM1\tGSM2"]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.n_rows(), 0);
        assert_eq!(matrix.n_cols(), 2);
    }

    #[test]
    fn test_parse_empty() {
        let err = ExpressionMatrix::parse(&[]).unwrap_err();
        assert!(matches!(err, GeoError::EmptyTable));
        let err = ExpressionMatrix::parse(&lines(&["", ""])).unwrap_err();
        assert!(matches!(err, GeoError::EmptyTable));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let data = lines(&["ID_REF\tGSM1\tGSM2\tGSM3", "p1\t1", "p2", "p3\t1\t2\t3"]);
        let matrix = ExpressionMatrix::parse(&data).unwrap();
        assert_eq!(matrix.values[0][0], 1.0);
        assert!(matrix.values[0][1].is_nan());
        assert!(matrix.values[0][2].is_nan());
        assert!(matrix.values[1].iter().all(|x| x.is_nan()));
        assert_eq!(matrix.values[2], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_ragged() {
        let data = lines(&["ID_REF\tGSM1\tGSM2", "p1\t1\t2", "p2\t3\t4\t5"]);
        let err = ExpressionMatrix::parse(&data).unwrap_err();
        match err {
            GeoError::Ragged {
                label,
                expected,
                found,
            } => {
                assert_eq!(label, "p2");
                assert_eq!(expected, 3);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        let data = lines(&["ID_REF\tGSM1\tGSM2", "p1\t1\thigh"]);
        let err = ExpressionMatrix::parse(&data).unwrap_err();
        assert!(matches!(
            err,
            GeoError::NonNumeric { ref row, ref column, ref value }
                if row == "p1" && column == "GSM2" && value == "high"
        ));
    }

    #[test]
    fn test_transpose() {
        let data = lines(&["ID_REF\tGSM1\tGSM2\tGSM3", "p1\t1\t2\t3", "p2\t4\t5\t6"]);
        let matrix = ExpressionMatrix::parse(&data).unwrap().transpose();
        assert_eq!(matrix.index_name, SAMPLE_INDEX_NAME);
        assert_eq!(matrix.row_labels, vec!["GSM1", "GSM2", "GSM3"]);
        assert_eq!(matrix.column_labels, vec!["p1", "p2"]);
        assert_eq!(
            matrix.values,
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );
    }
}
