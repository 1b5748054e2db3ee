use std::collections::HashMap;

use derive_new::new;
use log::{debug, warn};

use crate::config::AccessionScheme;

/// Tag of the metadata line carrying per-sample titles
pub const SAMPLE_TITLE_TAG: &str = "!Sample_title";

/// A synthesized sample identifier paired with its title
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct SampleTitle {
    pub sample_id: String,
    pub title: String,
}

/// Ordered mapping from sample identifier to title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleTitles {
    entries: Vec<SampleTitle>,
    /// sample_id -> position in `entries`; the first occurrence wins
    index: HashMap<String, usize>,
}
impl SampleTitles {
    pub fn get(&self, sample_id: &str) -> Option<&str> {
        self.index
            .get(sample_id)
            .map(|&i| self.entries[i].title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleTitle> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl FromIterator<SampleTitle> for SampleTitles {
    fn from_iter<I: IntoIterator<Item = SampleTitle>>(iter: I) -> Self {
        let entries = iter.into_iter().collect::<Vec<_>>();
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.sample_id.clone()).or_insert(i);
        }
        Self { entries, index }
    }
}
impl<'a> IntoIterator for &'a SampleTitles {
    type Item = &'a SampleTitle;
    type IntoIter = std::slice::Iter<'a, SampleTitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds the sample title table from the first `!Sample_title` line
///
/// Titles are the tab-separated fields after the tag with every `"` removed.
/// Identifiers come from the title's position, not from the file.
/// Returns an empty table when no line carries the tag.
pub fn extract_sample_titles(metadata: &[String], scheme: &AccessionScheme) -> SampleTitles {
    let Some(line) = metadata
        .iter()
        .find(|line| line.trim().starts_with(SAMPLE_TITLE_TAG))
    else {
        warn!("No {SAMPLE_TITLE_TAG} line found; every sample will be excluded");
        return SampleTitles::default();
    };

    let raw_titles = line.trim().split('\t').skip(1).collect::<Vec<_>>();
    let titles: SampleTitles = raw_titles
        .iter()
        .enumerate()
        .map_while(|(i, raw)| {
            let sample_id = scheme.sample_id(i)?;
            Some(SampleTitle::new(sample_id, raw.replace('"', "")))
        })
        .collect();

    if titles.len() < raw_titles.len() {
        warn!(
            "Accession numbers overflow after {} of {} titles; the rest are dropped",
            titles.len(),
            raw_titles.len()
        );
    }

    debug!("Found {} sample titles", titles.len());
    titles
}
