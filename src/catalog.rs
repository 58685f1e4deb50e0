// 📚 Catalog Store - the records of the current load cycle
//
// Empty at startup, replaced wholesale on every successful load,
// left untouched when a load fails.

use crate::entities::Pokemon;
use chrono::{DateTime, Local, Utc};
use std::collections::HashSet;

/// In-memory ordered collection of normalized records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Pokemon>,

    /// When the current records were loaded (None = never)
    loaded_at: Option<DateTime<Utc>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all records (never merges)
    pub fn replace(&mut self, records: Vec<Pokemon>) {
        self.records = records;
        self.loaded_at = Some(Utc::now());
    }

    pub fn records(&self) -> &[Pokemon] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Local wall-clock time of the last load, e.g. "14:03:27"
    pub fn loaded_label(&self) -> Option<String> {
        self.loaded_at
            .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
    }

    /// Distinct type labels across all records, first-seen order
    pub fn distinct_types(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();

        for label in self.records.iter().flat_map(|p| p.types.iter()) {
            if seen.insert(label.as_str()) {
                labels.push(label.clone());
            }
        }

        labels
    }
}
