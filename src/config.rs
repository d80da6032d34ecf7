use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_URL_PREFIX: &str = "/announcements/file";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the EOD CSV exports.
    pub data_dir: PathBuf,
    /// Directory holding uploaded announcement images and PDFs.
    pub uploads_dir: PathBuf,
    pub static_images_dir: PathBuf,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// URL prefix under which `uploads_dir` is served.
    pub file_url_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            uploads_dir: PathBuf::from("announcements/uploads"),
            static_images_dir: PathBuf::from("static/images"),
            database_path: "marketnews.db".into(),
            host: "0.0.0.0".into(),
            port: 8000,
            file_url_prefix: DEFAULT_FILE_URL_PREFIX.into(),
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `file_url_prefix` with a leading slash and no trailing slash. An empty
    /// or root prefix falls back to the default, since uploads cannot be
    /// mounted at the root.
    pub fn file_mount(&self) -> String {
        match self.file_url_prefix.trim().trim_matches('/') {
            "" => DEFAULT_FILE_URL_PREFIX.to_string(),
            p => format!("/{p}"),
        }
    }
}

/// Loads the config from a JSON file. A missing file means "all defaults";
/// a present but malformed file is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config(dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "data_dir": "/srv/eod", "port": 9100 }"#).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/eod"));
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.file_url_prefix, "/announcements/file");
    }

    #[test]
    fn file_mount_is_normalized() {
        let with = |prefix: &str| AppConfig {
            file_url_prefix: prefix.into(),
            ..AppConfig::default()
        };
        assert_eq!(with("/announcements/file").file_mount(), "/announcements/file");
        assert_eq!(with("files").file_mount(), "/files");
        assert_eq!(with("/files/").file_mount(), "/files");
        assert_eq!(with("").file_mount(), "/announcements/file");
        assert_eq!(with("/").file_mount(), "/announcements/file");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config(&path).is_err());
    }
}
