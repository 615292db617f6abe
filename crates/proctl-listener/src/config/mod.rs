use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

pub mod validation;

/// Port the listener binds to unless configured otherwise.
pub const DEFAULT_PORT: u16 = 41000;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenerConfig {
    #[serde(default)]
    pub listener: ListenerOptions,

    /// Process names terminated on every `kill`, whoever started them
    #[serde(default)]
    pub always_kill: Vec<String>,
}

/// Socket and diagnostics options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerOptions {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// How long a client may take to deliver its command
    #[serde(default = "default_read_timeout", with = "duration_serde")]
    pub read_timeout: Duration,

    /// Send a one-line `OK`/`ERR` acknowledgement before closing.
    /// Off by default: the base protocol is fire-and-forget.
    #[serde(default)]
    pub reply: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            read_timeout: default_read_timeout(),
            reply: false,
            log_level: default_log_level(),
        }
    }
}

impl ListenerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::load_from_string(&content)
    }

    /// Load configuration from a YAML string
    pub fn load_from_string(content: &str) -> Result<Self> {
        let config: ListenerConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

// Default value functions
fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_log_level() -> String {
    "info".to_string()
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}ms", duration.as_millis()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, String> {
        let s = s.trim();
        // "ms" before "s": "ms" ends with 's'
        if let Some(num) = s.strip_suffix("ms") {
            parse_number(num, s).map(Duration::from_millis)
        } else if let Some(num) = s.strip_suffix('s') {
            parse_number(num, s).map(Duration::from_secs)
        } else if let Some(num) = s.strip_suffix('m') {
            parse_number(num, s).map(|mins| Duration::from_secs(mins * 60))
        } else {
            Err(format!("Duration must end with 's', 'ms', or 'm': {}", s))
        }
    }

    fn parse_number(num: &str, text: &str) -> Result<u64, String> {
        num.trim()
            .parse()
            .map_err(|_| format!("Invalid duration: {}", text))
    }
}
