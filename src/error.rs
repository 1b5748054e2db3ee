use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors raised while loading a series-matrix file
///
/// Semantic gaps in the metadata (missing title line, unknown samples) are not
/// errors; they degrade to `N/A` titles and excluded rows.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not valid UTF-8.
    #[error("Invalid UTF-8 in {} at line {line}", .path.display())]
    Decode { path: PathBuf, line: usize },

    /// The data block has no header row.
    #[error("Expression table is empty")]
    EmptyTable,

    /// A row has more fields than the header.
    #[error("Row '{label}' has {found} fields but the header has {expected}")]
    Ragged {
        label: String,
        expected: usize,
        found: usize,
    },

    /// A cell could not be parsed as a number.
    #[error("Non-numeric value '{value}' at row '{row}', column '{column}'")]
    NonNumeric {
        row: String,
        column: String,
        value: String,
    },

    /// Tokenizer failure from the tab-separated reader.
    #[error("Malformed expression table: {0}")]
    Csv(#[from] csv::Error),
}
