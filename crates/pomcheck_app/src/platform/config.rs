use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pomcheck_engine::ClientSettings;
use pomcheck_logging::{pom_info, pom_warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "pomcheck.ron";

/// Optional settings read from a RON file; CLI flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub endpoint: Option<String>,
    pub depth: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
}

/// Values from the command line that override the file.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub endpoint: Option<String>,
    pub depth: Option<u32>,
}

/// Load the config file. A missing default `./pomcheck.ron` is silent; a
/// missing explicit path, an unreadable file or one that does not parse is
/// logged as a warning. Every failure falls back to defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> FileConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILENAME),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            return FileConfig::default();
        }
        Err(err) => {
            pom_warn!("Failed to read config {:?}: {}; using defaults", path, err);
            return FileConfig::default();
        }
    };

    match ron::from_str::<FileConfig>(&content) {
        Ok(config) => {
            pom_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            pom_warn!("Failed to parse config {:?}: {}; using defaults", path, err);
            FileConfig::default()
        }
    }
}

pub(crate) fn client_settings(file: &FileConfig, overrides: &Overrides) -> ClientSettings {
    let defaults = ClientSettings::default();
    ClientSettings {
        base_endpoint: overrides
            .endpoint
            .clone()
            .or_else(|| file.endpoint.clone())
            .unwrap_or(defaults.base_endpoint),
        request_timeout: file
            .request_timeout_secs
            .map(Duration::from_secs)
            .or(defaults.request_timeout),
        max_bytes: file.max_bytes.unwrap_or(defaults.max_bytes),
        depth: overrides.depth.or(file.depth),
        ..defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomcheck_engine::DEFAULT_ENDPOINT;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.ron");
        assert_eq!(load_config(Some(&missing)), FileConfig::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        // A directory exists but cannot be read as text.
        let dir = temp.path().join("pomcheck.ron");
        fs::create_dir(&dir).unwrap();

        assert_eq!(load_config(Some(&dir)), FileConfig::default());
    }

    #[test]
    fn parses_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pomcheck.ron");
        fs::write(
            &path,
            r#"(endpoint: Some("http://localhost:8080/purplecat/api/"), depth: Some(2))"#,
        )
        .unwrap();

        let config = load_config(Some(&path));
        assert_eq!(
            config.endpoint.as_deref(),
            Some("http://localhost:8080/purplecat/api/")
        );
        assert_eq!(config.depth, Some(2));
        assert_eq!(config.max_bytes, None);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pomcheck.ron");
        fs::write(&path, "(endpoint: 42").unwrap();

        assert_eq!(load_config(Some(&path)), FileConfig::default());
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig {
            endpoint: Some("http://file/api/".to_string()),
            depth: Some(1),
            request_timeout_secs: Some(30),
            max_bytes: None,
        };
        let overrides = Overrides {
            endpoint: Some("http://cli/api/".to_string()),
            depth: None,
        };

        let settings = client_settings(&file, &overrides);
        assert_eq!(settings.base_endpoint, "http://cli/api/");
        assert_eq!(settings.depth, Some(1));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = client_settings(&FileConfig::default(), &Overrides::default());
        assert_eq!(settings.base_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout, None);
        assert_eq!(settings.depth, None);
    }
}
