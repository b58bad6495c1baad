//! Handles serialising and saving processed data to disk as JSON artifacts.

pub mod annual;
pub mod regional;

use std::{fs, io::BufWriter, path::Path};

use anyhow::Result;
use serde::Serialize;

pub use annual::save_annual;
pub use regional::save_regional;

/// Writes a value as pretty-printed JSON, creating parent directories as
/// needed. Absent values serialize as `null`.
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;

    Ok(())
}
