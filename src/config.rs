use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub watcher: WatcherConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Opaque key clients must pass as `?api_key=...` on /stats.
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
    /// Address polled when no saved preference exists yet.
    pub default_endpoint: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Per-request timeout; keeps a stalled fetch from outliving the tick.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.api_key.is_empty(),
            "server.api_key must be non-empty"
        );
        anyhow::ensure!(
            !self.watcher.default_endpoint.is_empty(),
            "watcher.default_endpoint must be non-empty"
        );
        anyhow::ensure!(
            self.watcher.poll_interval_ms > 0,
            "watcher.poll_interval_ms must be > 0, got {}",
            self.watcher.poll_interval_ms
        );
        anyhow::ensure!(
            self.watcher.request_timeout_ms > 0,
            "watcher.request_timeout_ms must be > 0, got {}",
            self.watcher.request_timeout_ms
        );
        Ok(())
    }
}
