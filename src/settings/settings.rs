use anyhow::{Result, anyhow};
use config::{Config, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: Store,
    pub gateway: Gateway,
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub backend: String, // "memory" or "redis"
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
    pub backend: String, // "fake" or "real"
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub filter: String,
}

fn default_base_url() -> String {
    crate::infra_http::DEFAULT_GATEWAY_BASE_URL.to_string()
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

fn load<S>(source: S) -> Result<Settings>
where
    S: config::Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(source)
        .build()
        .and_then(|config| config.try_deserialize::<Settings>())
        .map_err(|e| anyhow!(e))
}

/// Reads the settings file at `path`, or the build profile's default file.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    load(File::with_name(path.unwrap_or(SETTINGS_PATH)))
}

pub fn parse_settings_toml(toml: &str) -> Result<Settings> {
    load(File::from_str(toml, FileFormat::Toml))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_redis_settings() {
        let settings = parse_settings_toml(
            r#"
            [store]
            backend = "redis"
            url = "redis://127.0.0.1:6379"

            [gateway]
            backend = "real"
            base_url = "https://auth.example.com"

            [log]
            filter = "info,session_broker=debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.store.backend, "redis");
        assert_eq!(settings.store.url, "redis://127.0.0.1:6379");
        assert_eq!(settings.gateway.base_url, "https://auth.example.com");
        assert_eq!(settings.log.filter, "info,session_broker=debug");
    }

    #[test]
    fn gateway_base_url_defaults_to_provider() {
        let settings = parse_settings_toml(
            r#"
            [store]
            backend = "memory"

            [gateway]
            backend = "fake"

            [log]
            filter = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.gateway.base_url, "https://members-ng.iracing.com");
        assert!(settings.store.url.is_empty());
    }

    #[test]
    fn missing_section_is_an_error() {
        assert!(parse_settings_toml("[log]\nfilter = \"info\"\n").is_err());
        assert!(parse_settings(Some("settings/does-not-exist.toml")).is_err());
    }

    #[test]
    fn bundled_profiles_parse() {
        let dev = parse_settings(Some("settings/dev.toml")).unwrap();
        assert_eq!(dev.store.backend, "memory");
        assert_eq!(dev.gateway.backend, "fake");

        let release = parse_settings(Some("settings/release.toml")).unwrap();
        assert_eq!(release.store.backend, "redis");
        assert_eq!(release.gateway.base_url, "https://members-ng.iracing.com");
    }
}
