use crate::model::{Dataset, DatasetError, DatasetFile, Row};
use csv::ReaderBuilder;
use std::fs;
use tracing::{debug, warn};

/// Reads the whole file into rows keyed by the first line's headers.
///
/// Invalid UTF-8 is replaced rather than rejected. Short records leave the
/// trailing columns as `None`; surplus fields are dropped. Only failing to
/// read the file or its header line is an error.
pub fn read_rows(file: &DatasetFile) -> Result<Dataset, DatasetError> {
    let read_err = |source: csv::Error| DatasetError::Read {
        file: file.file_name.clone(),
        source,
    };

    let bytes = fs::read(&file.path).map_err(|e| read_err(e.into()))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(read_err)?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping malformed record {} in {}: {}", line + 2, file.file_name, e);
                continue;
            }
        };
        let entries = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).map(String::from)))
            .collect();
        rows.push(Row::new(entries));
    }

    debug!("Read {} rows from {}", rows.len(), file.file_name);
    Ok(Dataset {
        file: file.clone(),
        headers,
        rows,
    })
}
