use std::path::Path;

use crate::error::ProcessError;
use crate::filter::{self, MinPrice};
use crate::record::Record;
use crate::saving;
use crate::sorting::{self, SortField};
use crate::stats::{self, Summary};

/// Per-session record state: the working set the client sees plus the
/// immutable baseline taken at upload time.
///
/// All four operations are full-state transitions; none leaves the session
/// partially updated. Before the first upload both sets are empty and
/// every operation runs over the empty collection.
#[derive(Debug, Default)]
pub struct Session {
    working: Vec<Record>,
    original: Vec<Record>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly parsed upload, replacing any prior state.
    ///
    /// The working set starts as an independently-owned copy of the
    /// original, so later narrowing never touches the baseline.
    pub fn upload(&mut self, records: Vec<Record>) -> &[Record] {
        self.working = records.clone();
        self.original = records;
        &self.working
    }

    /// Filter and optionally sort the working set, then keep the result.
    ///
    /// Each call narrows or reorders the *current* working set, not the
    /// original: successive filter calls compose (progressive refinement).
    /// Use [`Session::reset`] to start over from the baseline.
    pub fn process(
        &mut self,
        category: Option<&str>,
        min_price: Option<&MinPrice>,
        sort: Option<&str>,
    ) -> Result<(&[Record], Summary), ProcessError> {
        let mut rows = filter::apply(&self.working, category, min_price)?;

        if let Some(field) = sort {
            if !field.trim().is_empty() {
                let field: SortField = field.parse()?;
                rows = sorting::sort_records(rows, field);
            }
        }

        self.working = rows;
        let summary = stats::summarize(&self.working);
        Ok((&self.working, summary))
    }

    /// Restore the working set from the upload-time baseline.
    pub fn reset(&mut self) -> &[Record] {
        self.working = self.original.clone();
        &self.working
    }

    /// Dump the working set to a JSON file. No state mutation.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        saving::write_records(path, &self.working)
    }

    pub fn working(&self) -> &[Record] {
        &self.working
    }

    pub fn original(&self) -> &[Record] {
        &self.original
    }
}
