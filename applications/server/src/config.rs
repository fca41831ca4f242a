/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_web")]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory mounted at `/music`
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebSettings {
    /// Directory holding `index.html` and the web bundle
    #[serde(default = "default_web_dir")]
    pub dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, later ones winning: `path` (or `config.toml` if present),
    /// `LYRA_*` variables, then a bare `PORT`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. LYRA_STORAGE__DATABASE_URL
        settings = settings.add_source(Self::environment());

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if let Ok(port) = std::env::var("PORT") {
            config.apply_port_override(&port)?;
        }

        Ok(config)
    }

    /// `LYRA_<SECTION>__<KEY>` variables
    ///
    /// Keys contain single underscores, so sections are split on `__`.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("LYRA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Apply a `PORT`-style override
    pub fn apply_port_override(&mut self, value: &str) -> Result<()> {
        self.server.port = value
            .trim()
            .parse()
            .map_err(|_| ServerError::Config(format!("Invalid PORT value: {:?}", value)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Port must be non-zero".to_string()));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        music_dir: default_music_dir(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/lyra.db".to_string()
}

fn default_music_dir() -> PathBuf {
    PathBuf::from("./data/music")
}

fn default_web() -> WebSettings {
    WebSettings {
        dir: default_web_dir(),
    }
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("./web")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            web: default_web(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.database_url, "sqlite://./data/lyra.db");
        assert_eq!(config.storage.music_dir, PathBuf::from("./data/music"));
        assert_eq!(config.web.dir, PathBuf::from("./web"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_port_zero() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_database_url() {
        let mut config = ServerConfig::default();
        config.storage.database_url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn port_override() {
        let mut config = ServerConfig::default();
        config.apply_port_override("8123").unwrap();
        assert_eq!(config.server.port, 8123);

        assert!(config.apply_port_override("eighty").is_err());
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn load_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 4100\n\n[web]\ndir = \"/srv/lyra\"").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.web.dir, PathBuf::from("/srv/lyra"));
        assert_eq!(config.storage.database_url, "sqlite://./data/lyra.db");
        // PORT from the environment wins when it is set
        if std::env::var("PORT").is_err() && std::env::var("LYRA_SERVER__PORT").is_err() {
            assert_eq!(config.server.port, 4100);
        }
    }

    #[test]
    fn environment_keys_with_underscores() {
        let source = ServerConfig::environment().source(Some(
            [
                ("LYRA_STORAGE__DATABASE_URL", "sqlite::memory:"),
                ("LYRA_STORAGE__MUSIC_DIR", "/srv/music"),
                ("LYRA_SERVER__PORT", "8088"),
                ("LYRA_WEB__DIR", "/srv/web"),
            ]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        ));

        let config: ServerConfig = config::Config::builder()
            .add_source(source)
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.storage.music_dir, PathBuf::from("/srv/music"));
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.web.dir, PathBuf::from("/srv/web"));
    }
}
