use std::env;

const DEFAULT_SAMPLE_SOURCE: &str = "/dev/ttyS0";
const DEFAULT_MONITOR_NAME: &str = "sleep-monitor";

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Serial device or recorded capture to read samples from
    pub sample_source: String,
    /// Enables PostgreSQL reporting when set
    pub database_url: Option<String>,
    pub monitor_name: String,
    /// Where to write the bounded history when the run ends
    pub history_path: Option<String>,
}

impl MonitorConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sample_source = get("SAMPLE_SOURCE").unwrap_or_else(|| DEFAULT_SAMPLE_SOURCE.into());
        let database_url = get("DATABASE_URL");
        let history_path = get("SLEEP_HISTORY_PATH");

        let monitor_name = match lookup("MONITOR_NAME") {
            None => DEFAULT_MONITOR_NAME.to_string(),
            Some(name) if name.trim().is_empty() => {
                return Err("MONITOR_NAME is set but empty".into());
            }
            Some(name) => name.trim().to_string(),
        };

        Ok(MonitorConfig {
            sample_source,
            database_url,
            monitor_name,
            history_path,
        })
    }
}
