use std::{io::BufRead, path::Path};

use log::{debug, info, warn};

use crate::{
    config::{LoaderConfig, TransformConfig},
    error::Result,
    group::{Group, MISSING_TITLE},
    matrix::ExpressionMatrix,
    metadata::{extract_sample_titles, SampleTitles},
    split::{split_lines, SplitLines},
    table::{ExpressionTable, SampleRow},
};

/// A loaded series: the filtered expression table and every sample title
#[derive(Debug, Clone)]
pub struct GeoSeries {
    pub table: ExpressionTable,
    pub titles: SampleTitles,
}

/// Loads GEO series-matrix files
///
/// Both public entry points run the same pipeline:
/// 1. Split lines into metadata and data
/// 2. Synthesize sample identifiers for the `!Sample_title` entries
/// 3. Parse and transpose the expression matrix
/// 4. Label each sample with its group and drop irrelevant samples
/// 5. Apply the configured transform
pub struct GeoLoader {
    config: LoaderConfig,
}
impl GeoLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn load(&self, path: &Path) -> Result<GeoSeries> {
        let lines = split_lines(path)?;
        let series = self.process(lines)?;
        info!(
            "Loaded {} samples x {} genes from {}",
            series.table.len(),
            series.table.genes().len(),
            path.display()
        );
        Ok(series)
    }

    /// Runs the pipeline on an in-memory source
    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<GeoSeries> {
        let lines = SplitLines::from_reader(reader, Path::new("<reader>"))?;
        self.process(lines)
    }

    fn process(&self, lines: SplitLines) -> Result<GeoSeries> {
        let titles = extract_sample_titles(&lines.metadata, &self.config.scheme);
        let matrix = ExpressionMatrix::parse(&lines.data)?.transpose();

        let mut table = self.label_samples(matrix, &titles);
        table.apply_transform(self.config.transform);

        Ok(GeoSeries { table, titles })
    }

    /// Attaches a group to each sample row and keeps the relevant ones
    fn label_samples(&self, matrix: ExpressionMatrix, titles: &SampleTitles) -> ExpressionTable {
        let n_samples = matrix.n_rows();
        let mut untitled = 0;

        let rows = matrix
            .row_labels
            .into_iter()
            .zip(matrix.values)
            .map(|(sample_id, values)| {
                let title = titles.get(&sample_id).unwrap_or_else(|| {
                    untitled += 1;
                    MISSING_TITLE
                });
                let group = Group::classify(Some(title));
                SampleRow::new(sample_id, group, values)
            })
            .collect::<Vec<_>>();

        if untitled > 0 {
            warn!("{untitled} of {n_samples} samples have no title and were excluded");
        }

        let table = ExpressionTable::new(matrix.column_labels, rows);
        debug!(
            "Kept {} of {} samples after group labelling",
            table.len(),
            n_samples
        );
        table
    }
}

/// Loads a series with log-floor normalized values
///
/// Values become `log2(max(x, 0.1) + 1)`. Returns the filtered table together
/// with the full sample title table.
pub fn preprocess_geo_data(path: &Path) -> Result<(ExpressionTable, SampleTitles)> {
    let config = LoaderConfig::builder()
        .transform(TransformConfig::log_floor())
        .build();
    let series = GeoLoader::new(config).load(path)?;
    Ok((series.table, series.titles))
}

/// Loads a series without transforming the values
pub fn load_raw_data(path: &Path) -> Result<ExpressionTable> {
    let series = GeoLoader::new(LoaderConfig::default()).load(path)?;
    Ok(series.table)
}
