// ============================================================
// Layer 2 — CleanUseCase
// ============================================================
// Load → fill missing values → save. No features, no models.

use anyhow::{Context, Result};

use crate::data::{cleaner::Cleaner, loader::CsvLoader, writer::save_table};
use crate::domain::table::PostTable;
use crate::domain::traits::RecordSource;

pub struct CleanUseCase {
    input:  String,
    output: String,
}

impl CleanUseCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self { input: input.into(), output: output.into() }
    }

    /// Returns the cleaned table that was written.
    pub fn execute(&self) -> Result<PostTable> {
        let raw = CsvLoader::new(&self.input)
            .load()
            .with_context(|| format!("Cannot load '{}'", self.input))?;

        let cleaned = Cleaner::new().clean(&raw)?;
        save_table(&cleaned, &self.output)
            .with_context(|| format!("Cannot save cleaned data to '{}'", self.output))?;

        Ok(cleaned)
    }
}
