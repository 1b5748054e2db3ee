/// Cell contents read as a missing value
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parses a table cell, mapping missing-value tokens to `NaN`
pub fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if MISSING_TOKENS.contains(&cell) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

/// Swaps the axes of a row-major table with `n_cols` columns
pub fn transpose<T: Copy>(rows: &[Vec<T>], n_cols: usize) -> Vec<Vec<T>> {
    (0..n_cols)
        .map(|j| rows.iter().map(|row| row[j]).collect())
        .collect()
}
