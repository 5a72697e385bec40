use std::path::PathBuf;
use std::time::Duration;

/// Server configuration, read from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, `MNEMO_ADDR` (default `127.0.0.1:3000`).
    pub addr: String,
    /// Optional JSON snapshot file, `MNEMO_SNAPSHOT`.
    pub snapshot_path: Option<PathBuf>,
    /// Seed demo documents into an empty store, `MNEMO_DEMO` (default on).
    pub demo_mode: bool,
    /// Timeout for URL-import fetches, `MNEMO_FETCH_TIMEOUT_SECS` (default 10).
    pub fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let addr =
            std::env::var("MNEMO_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let snapshot_path = std::env::var("MNEMO_SNAPSHOT").ok().map(PathBuf::from);
        let demo_mode = std::env::var("MNEMO_DEMO")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);
        let fetch_timeout = std::env::var("MNEMO_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        Self {
            addr,
            snapshot_path,
            demo_mode,
            fetch_timeout,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            snapshot_path: None,
            demo_mode: false,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}
