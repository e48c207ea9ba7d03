use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, ServerConfig, TickerConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
    pub ticker: TickerConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. BEACON_CONFIG_DIR env var, else ./.beacon/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply BEACON_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| {
                ConfigError::config_dir(format!("cannot create {}: {}", config_dir.display(), e))
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: BEACON_CONFIG_DIR env var > ./.beacon/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config_dir("cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.websocket.validate()?;
        self.ticker.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::invalid(
                "logging.dir",
                "must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  websocket: buffer={}, reply={:?}, remove_on_error={}",
            self.websocket.send_buffer_size,
            self.websocket.reply_text,
            self.websocket.remove_on_error
        );
        info!(
            "  ticker: interval={}ms, session_limit={} ticks",
            self.ticker.interval_ms, self.ticker.session_limit_ticks
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("BEACON_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("BEACON_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "BEACON_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Logging
        Self::apply_env_parse("BEACON_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BEACON_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("BEACON_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("BEACON_LOG_FILE", &mut self.logging.file);

        // WebSocket
        Self::apply_env_parse(
            "BEACON_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_string("BEACON_WS_REPLY_TEXT", &mut self.websocket.reply_text);
        Self::apply_env_bool(
            "BEACON_WS_REMOVE_ON_ERROR",
            &mut self.websocket.remove_on_error,
        );

        // Ticker
        Self::apply_env_parse("BEACON_TICKER_INTERVAL_MS", &mut self.ticker.interval_ms);
        Self::apply_env_parse(
            "BEACON_TICKER_SESSION_LIMIT_TICKS",
            &mut self.ticker.session_limit_ticks,
        );
        Self::apply_env_string(
            "BEACON_TICKER_MESSAGE_PREFIX",
            &mut self.ticker.message_prefix,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1", anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the current value kept
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
