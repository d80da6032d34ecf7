use crate::dataset;
use crate::model::{AnnouncementEntry, AnnouncementError, AnnouncementListing, Dataset};
use crate::resolver::ColumnRoles;
use crate::utils::{extension_lower, find_date_token, to_utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const ANNOUNCEMENT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "avif", "pdf"];
const MAX_GUESS_LEN: usize = 20;
const SERIES_MARKER: &str = ".E1";

/// Symbol → company lookup built from one dataset, in file order.
#[derive(Debug, Default)]
pub struct SymbolMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SymbolMap {
    /// Maps every row with a symbol to its company (or the symbol itself when
    /// the company cell is empty). A repeated symbol takes the later row's
    /// company but keeps its first position.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let roles = ColumnRoles::from_headers(&dataset.headers);
        let mut map = Self::default();
        for row in &dataset.rows {
            let Some(symbol) = roles.symbol(row) else {
                continue;
            };
            let company = roles.company(row).unwrap_or(symbol);
            map.insert(symbol.to_uppercase(), company.to_string());
        }
        map
    }

    pub fn insert(&mut self, symbol: String, company: String) {
        if let Some(&i) = self.index.get(&symbol) {
            self.entries[i].1 = company;
            return;
        }
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push((symbol, company));
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.index.get(symbol).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a filename ticker guess to a company name.
    ///
    /// Tries the guess directly, then with any `.E1` series marker removed, then
    /// scans for a symbol contained in the guess or a company name contained
    /// in the guess.
    pub fn resolve(&self, guess: &str) -> Option<&str> {
        if let Some(company) = self.get(guess) {
            return Some(company);
        }
        if guess.contains(SERIES_MARKER) {
            if let Some(company) = self.get(&guess.replace(SERIES_MARKER, "")) {
                return Some(company);
            }
        }
        self.entries
            .iter()
            .find(|(symbol, company)| guess.contains(symbol.as_str()) || guess.contains(&company.to_uppercase()))
            .map(|(_, company)| company.as_str())
    }
}

/// Leading run of `[A-Z0-9.-]` (at most 20 chars) of the uppercased file stem.
/// Falls back to the whole uppercased stem when the stem starts with anything else.
pub fn ticker_guess(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let upper = stem.trim().to_uppercase();
    let prefix: String = upper
        .chars()
        .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-'))
        .take(MAX_GUESS_LEN)
        .collect();
    if prefix.is_empty() { upper } else { prefix }
}

/// Lists announcement files in `uploads_dir` with companies resolved from the
/// latest dataset in `data_dir`, newest first.
pub fn list_enriched(
    uploads_dir: &Path,
    data_dir: &Path,
    url_prefix: &str,
) -> Result<AnnouncementListing, AnnouncementError> {
    if !uploads_dir.is_dir() {
        return Err(AnnouncementError::UploadsMissing {
            dir: uploads_dir.display().to_string(),
        });
    }

    let dataset = dataset::load_latest(data_dir)?;
    let symbols = SymbolMap::from_dataset(&dataset);
    debug!("Symbol map has {} entries from {}", symbols.len(), dataset.file.file_name);

    let mut names: Vec<String> = fs::read_dir(uploads_dir)
        .map_err(|_| AnnouncementError::UploadsMissing {
            dir: uploads_dir.display().to_string(),
        })?
        .flatten()
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut files: Vec<AnnouncementEntry> = names
        .into_iter()
        .filter(|name| {
            extension_lower(Path::new(name))
                .is_some_and(|ext| ANNOUNCEMENT_EXTENSIONS.contains(&ext.as_str()))
        })
        .filter_map(|name| enrich_file(uploads_dir, name, &symbols, url_prefix))
        .collect();
    files.sort_by(|a, b| b.modified.cmp(&a.modified));

    info!("Listed {} announcement files", files.len());
    Ok(AnnouncementListing {
        count: files.len(),
        files,
    })
}

fn enrich_file(
    dir: &Path,
    name: String,
    symbols: &SymbolMap,
    url_prefix: &str,
) -> Option<AnnouncementEntry> {
    let metadata = match fs::metadata(dir.join(&name)) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return None,
        Err(e) => {
            warn!("Skipping announcement {}: {}", name, e);
            return None;
        }
    };
    let modified = match metadata.modified() {
        Ok(t) => to_utc(t),
        Err(e) => {
            warn!("Skipping announcement {}: {}", name, e);
            return None;
        }
    };

    let guess = ticker_guess(&name);
    let company = symbols.resolve(&guess).unwrap_or(&guess).to_string();

    Some(AnnouncementEntry {
        download_url: format!("{}/{}", url_prefix.trim_end_matches('/'), name),
        filename_date: find_date_token(&name).map(|t| t.replace('_', "-")),
        size_bytes: metadata.len(),
        mtime_iso: modified.to_rfc3339(),
        modified,
        ticker_guess: guess,
        company,
        filename: name,
    })
}
