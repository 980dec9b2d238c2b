use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Zipcode sample data is generated for when a request names none.
    pub zipcode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Days shown on each side of today in the dashboard feed.
    pub window_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub seed: SeedConfig,
    pub dashboard: DashboardConfig,
}

/// Defaults, then an optional `weatherdesk.toml`, then `WEATHERDESK_*`
/// environment variables (`WEATHERDESK_SERVER__PORT=9000`).
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    build(Some("weatherdesk"), true)
}

fn build(file: Option<&str>, with_env: bool) -> Result<AppConfig, config::ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("seed.zipcode", "10001")?
        .set_default("dashboard.window_days", 7)?;

    if let Some(name) = file {
        builder = builder.add_source(File::with_name(name).required(false));
    }
    if with_env {
        builder = builder.add_source(
            Environment::with_prefix("WEATHERDESK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    }

    builder.build()?.try_deserialize()
}

impl AppConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            seed: SeedConfig {
                zipcode: "10001".to_string(),
            },
            dashboard: DashboardConfig { window_days: 7 },
        }
    }
}
