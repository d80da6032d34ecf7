// Dataset module: finding and reading the latest EOD export.

pub mod locator;
pub mod reader;

pub use locator::locate_latest;
pub use reader::read_rows;

use crate::model::{Dataset, DatasetError};
use std::path::Path;

/// Locates the latest CSV in `dir` and reads it.
pub fn load_latest(dir: &Path) -> Result<Dataset, DatasetError> {
    let file = locate_latest(dir).ok_or_else(|| DatasetError::NotConfigured {
        dir: dir.display().to_string(),
    })?;
    read_rows(&file)
}
