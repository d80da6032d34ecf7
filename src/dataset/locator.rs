use crate::model::DatasetFile;
use crate::utils::{extension_lower, filename_date};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const TABULAR_EXTENSIONS: &[&str] = &["csv"];

/// Picks the dataset file that represents "latest" in `dir`.
///
/// Files whose name carries a valid `YYYY-MM-DD` token are ranked by that
/// date (mtime breaks ties). Only when no file carries a valid date does the
/// newest modification time decide. Returns `None` for a missing directory
/// or one without CSV files.
pub fn locate_latest(dir: &Path) -> Option<DatasetFile> {
    let candidates = list_candidates(dir);
    if candidates.is_empty() {
        debug!("No CSV candidates in {}", dir.display());
        return None;
    }

    let dated = candidates
        .iter()
        .filter(|f| f.date.is_some())
        .max_by_key(|f| (f.date, f.modified));
    if let Some(file) = dated {
        info!("Selected dataset {} by filename date", file.file_name);
        return Some(file.clone());
    }

    let newest = candidates.into_iter().max_by_key(|f| f.modified)?;
    info!("Selected dataset {} by modification time", newest.file_name);
    Some(newest)
}

fn list_candidates(dir: &Path) -> Vec<DatasetFile> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_tabular = extension_lower(&path)
            .is_some_and(|ext| TABULAR_EXTENSIONS.contains(&ext.as_str()));
        if !is_tabular {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };
        let metadata = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                warn!("Skipping {}: {}", file_name, e);
                continue;
            }
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        files.push(DatasetFile {
            date: filename_date(&file_name),
            path,
            file_name,
            modified,
        });
    }
    files
}
