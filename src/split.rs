use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::error::{GeoError, Result};

/// Marker character that opens every metadata line
pub const METADATA_MARKER: u8 = b'!';

/// Lines of a series-matrix file partitioned into metadata and data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitLines {
    /// Lines starting with `!`, trimmed
    pub metadata: Vec<String>,
    /// All other lines (header row included), trimmed
    pub data: Vec<String>,
}
impl SplitLines {
    /// Splits the lines of `reader`
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. A line is metadata if its
    /// first byte, before trimming, is `!`.
    /// `path` is only used to label errors.
    pub fn from_reader<R: BufRead>(mut reader: R, path: &Path) -> Result<Self> {
        let mut split = Self::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            let bytes = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|source| GeoError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            if bytes == 0 {
                break;
            }

            let text = std::str::from_utf8(&buffer).map_err(|_| GeoError::Decode {
                path: path.to_path_buf(),
                line: line_number + 1,
            })?;
            let text = text.strip_suffix('\n').unwrap_or(text);
            let text = text.strip_suffix('\r').unwrap_or(text);

            // a lone `\r` also ends a line
            for line in text.split('\r') {
                line_number += 1;
                if line.as_bytes().first() == Some(&METADATA_MARKER) {
                    split.metadata.push(line.trim().to_string());
                } else {
                    split.data.push(line.trim().to_string());
                }
            }
        }

        debug!(
            "Split {} lines into {} metadata and {} data lines",
            line_number,
            split.metadata.len(),
            split.data.len()
        );
        Ok(split)
    }
}

/// Reads the file at `path` and splits its lines
///
/// The file is closed before returning, on success and on error.
pub fn split_lines(path: &Path) -> Result<SplitLines> {
    let file = File::open(path).map_err(|source| GeoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SplitLines::from_reader(BufReader::new(file), path)
}
