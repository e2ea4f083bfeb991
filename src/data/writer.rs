// ============================================================
// Layer 4 — Table Writer
// ============================================================
// Writes a PostTable back to CSV (header + rows, missing cells as
// empty fields), creating parent directories like `mkdir -p`.

use std::{fs, path::Path};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::PostTable;

pub fn save_table(table: &PostTable, path: impl AsRef<Path>) -> PipelineResult<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;

    let mut writer = csv::Writer::from_path(path).map_err(|e| PipelineError::output(path, e))?;
    writer
        .write_record(table.headers())
        .map_err(|e| PipelineError::output(path, e))?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .map_err(|e| PipelineError::output(path, e))?;
    }
    writer.flush().map_err(|e| PipelineError::output(path, e))?;

    println!("Processed data saved to: {}", path.display());
    Ok(())
}

/// Create the directory that will hold `path`, if any.
pub(crate) fn create_parent_dirs(path: &Path) -> PipelineResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| PipelineError::output(dir, e))
        }
        _ => Ok(()),
    }
}
