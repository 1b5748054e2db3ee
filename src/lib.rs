//! geoseries: GEO series-matrix loading for pigmentation studies
//!
//! This library reads a GEO series-matrix text file, separates the `!`-prefixed
//! metadata from the tab-separated expression matrix, labels each sample as
//! pigmented or non-pigmented from its title, and optionally log-transforms the
//! expression values.
//!
//! The main components of this library are:
//! - `GeoLoader`: The shared parse/label/transform pipeline
//! - `preprocess_geo_data` / `load_raw_data`: Entry points with and without the log transform
//! - `LoaderConfig`, `AccessionScheme`, `TransformConfig`: Pipeline configuration
//! - `ExpressionTable`: The samples × genes result with a group per sample

mod config;
mod error;
mod group;
mod loader;
mod math;
mod matrix;
mod metadata;
mod split;
mod table;
mod utils;

pub use config::{AccessionScheme, LoaderConfig, TransformConfig};
pub use error::{GeoError, Result};
pub use group::Group;
pub use loader::{load_raw_data, preprocess_geo_data, GeoLoader, GeoSeries};
pub use matrix::ExpressionMatrix;
pub use metadata::{extract_sample_titles, SampleTitle, SampleTitles};
pub use split::{split_lines, SplitLines};
pub use table::{ExpressionTable, SampleRow};
