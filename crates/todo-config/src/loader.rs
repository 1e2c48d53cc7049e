use std::net::SocketAddr;
use std::path::Path;

use crate::{Config, CorsConfig};

/// Environment variable with the port to listen on
pub const PORT_ENV: &str = "PORT";

/// Environment variable with the single origin allowed by CORS
pub const ALLOWED_ORIGIN_ENV: &str = "ALLOWED_ORIGIN";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from the process environment alone
    ///
    /// `PORT` selects the port on `0.0.0.0` (default 3000) and
    /// `ALLOWED_ORIGIN` the single CORS origin (default
    /// `http://localhost:5173`). Both are read once, at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var(PORT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid {PORT_ENV} value `{raw}`: {e}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let origin = std::env::var(ALLOWED_ORIGIN_ENV).unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_owned());

        let mut config = Self::default();
        config.server.listen_address = Some(SocketAddr::from(([0, 0, 0, 0], port)));
        config.server.cors = Some(CorsConfig::allow_origin(origin));

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the health path or CORS settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health_config()?;
        self.validate_cors_config()?;
        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got `{}`", health.path);
        }

        Ok(())
    }

    fn validate_cors_config(&self) -> anyhow::Result<()> {
        let Some(ref cors) = self.server.cors else {
            return Ok(());
        };

        if cors.credentials && (cors.origins.is_any() || cors.headers.is_any() || cors.methods.is_any()) {
            anyhow::bail!("server.cors.credentials cannot be combined with wildcard origins, methods or headers");
        }

        if let crate::AnyOrArray::List(origins) = &cors.origins
            && origins.iter().any(|o| o.trim().is_empty())
        {
            anyhow::bail!("server.cors.origins must not contain empty values");
        }

        Ok(())
    }
}
