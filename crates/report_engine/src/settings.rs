use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Base URL of the generation service; `reports/generate` is appended.
    pub generation_base_url: String,
    /// Base URL of the entity directory; `entities/search` is appended.
    pub directory_base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            generation_base_url: "http://localhost:8080/api".to_string(),
            directory_base_url: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub quiet_period: Duration,
    pub limit: usize,
    pub request_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(300),
            limit: 8,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Joins `path` onto `base`, treating the base as a directory even when it
/// lacks a trailing slash.
pub(crate) fn endpoint(base: &str, path: &str) -> Result<url::Url, url::ParseError> {
    let mut base = url::Url::parse(base)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
}
