use serde::Deserialize;
use std::fmt;

/// TMDB client configuration loaded from `TMDB_*` environment variables
///
/// | Variable | Default |
/// |---|---|
/// | `TMDB_API_KEY` | required |
/// | `TMDB_API_URL` | `https://api.themoviedb.org/3` |
/// | `TMDB_IMAGE_BASE_URL` | `https://image.tmdb.org/t/p/w500` |
/// | `TMDB_LANGUAGE` | `en-US` |
#[derive(Deserialize, Clone)]
pub struct TmdbConfig {
    /// TMDB v3 API key. Never logged.
    pub api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Image host and size prefix that poster paths are appended to
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Language requested for overviews and genre names
    #[serde(default = "default_language")]
    pub language: String,
}

const ENV_PREFIX: &str = "TMDB_";

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

impl TmdbConfig {
    /// Configuration with the given key and default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: default_api_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }

    /// Point the client at a different API host
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env::<TmdbConfig>()
    }

    /// Load configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter::<_, TmdbConfig>(vars)
    }
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_from_env_vars() {
        let config = TmdbConfig::from_vars(vars(&[("TMDB_API_KEY", "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn test_overrides_from_env_vars() {
        let config = TmdbConfig::from_vars(vars(&[
            ("TMDB_API_KEY", "secret"),
            ("TMDB_API_URL", "http://localhost:8080/3"),
            ("TMDB_LANGUAGE", "fr-FR"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/3");
        assert_eq!(config.language, "fr-FR");
    }

    #[test]
    fn test_missing_api_key() {
        assert!(TmdbConfig::from_vars(vars(&[("TMDB_LANGUAGE", "en-US")])).is_err());
    }

    #[test]
    fn test_from_env_reads_prefixed_vars() {
        // Only this test touches the process environment
        std::env::set_var("TMDB_API_KEY", "env-secret");
        std::env::set_var("TMDB_LANGUAGE", "de-DE");

        let config = TmdbConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-secret");
        assert_eq!(config.language, "de-DE");
        assert_eq!(config.api_url, "https://api.themoviedb.org/3");

        std::env::remove_var("TMDB_API_KEY");
        std::env::remove_var("TMDB_LANGUAGE");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", TmdbConfig::new("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
