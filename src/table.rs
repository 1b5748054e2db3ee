use std::collections::BTreeMap;

use derive_new::new;
use itertools::Itertools;

use crate::{config::TransformConfig, group::Group, matrix::SAMPLE_INDEX_NAME};

/// Name of the group column in printed output
pub const GROUP_COLUMN: &str = "Grupo";

/// One sample of the expression table
#[derive(new, Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub sample_id: String,
    pub group: Group,
    /// One value per gene, aligned with [`ExpressionTable::genes`]
    pub values: Vec<f64>,
}

/// Samples × genes expression values with a group label per sample
///
/// Only pigmented and non-pigmented samples are ever stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionTable {
    genes: Vec<String>,
    rows: Vec<SampleRow>,
}
impl ExpressionTable {
    /// Builds a table, dropping every row labelled irrelevant
    pub(crate) fn new(genes: Vec<String>, rows: Vec<SampleRow>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| row.group.is_relevant())
            .collect();
        Self { genes, rows }
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    pub fn sample_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.sample_id.as_str()).collect()
    }

    pub fn row(&self, sample_id: &str) -> Option<&SampleRow> {
        self.rows.iter().find(|row| row.sample_id == sample_id)
    }

    pub fn value(&self, sample_id: &str, gene: &str) -> Option<f64> {
        let j = self.gene_index(gene)?;
        self.row(sample_id)?.values.get(j).copied()
    }

    /// All values of one gene in row order, `None` if any row lacks it
    pub fn column(&self, gene: &str) -> Option<Vec<f64>> {
        let j = self.gene_index(gene)?;
        self.rows.iter().map(|row| row.values.get(j).copied()).collect()
    }

    pub fn samples_in(&self, group: Group) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.group == group)
            .map(|row| row.sample_id.as_str())
            .collect()
    }

    pub fn group_counts(&self) -> BTreeMap<Group, usize> {
        self.rows
            .iter()
            .map(|row| row.group)
            .counts()
            .into_iter()
            .collect()
    }

    /// Applies `transform` to every numeric cell; groups are untouched
    pub fn apply_transform(&mut self, transform: TransformConfig) {
        for row in self.rows.iter_mut() {
            transform.transform_slice(&mut row.values);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn gene_index(&self, gene: &str) -> Option<usize> {
        self.genes.iter().position(|g| g == gene)
    }

    pub fn pprint(&self) {
        println!(
            "{}\t{}\t{}",
            SAMPLE_INDEX_NAME,
            GROUP_COLUMN,
            self.genes.iter().join("\t")
        );
        for row in &self.rows {
            println!(
                "{}\t{}\t{}",
                row.sample_id,
                row.group,
                row.values.iter().join("\t")
            );
        }
    }
}
