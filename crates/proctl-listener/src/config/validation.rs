use super::*;
use anyhow::{anyhow, Result};
use std::collections::HashSet;

/// Validate the complete configuration
pub fn validate_config(config: &ListenerConfig) -> Result<()> {
    validate_listener_options(&config.listener)?;
    validate_always_kill(&config.always_kill)?;
    Ok(())
}

/// Validate listener options
fn validate_listener_options(options: &ListenerOptions) -> Result<()> {
    if options.port == 0 {
        return Err(anyhow!("Port must be between 1 and 65535, got: {}", options.port));
    }

    if options.read_timeout.is_zero() {
        return Err(anyhow!("Read timeout must be greater than 0"));
    }

    validate_log_level(&options.log_level)
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(anyhow!(
            "Invalid log level: {}, must be one of: trace, debug, info, warn, error",
            level
        )),
    }
}

/// Validate the always-kill list: bare, unique process names
fn validate_always_kill(names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(anyhow!("Always-kill entries cannot be empty"));
        }
        if name.trim() != name {
            return Err(anyhow!("Always-kill entry has surrounding whitespace: {:?}", name));
        }
        if name.contains(['/', '\\']) {
            return Err(anyhow!(
                "Always-kill entries are process names, not paths: {}",
                name
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(anyhow!("Duplicate always-kill entry: {}", name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(always_kill: &[&str]) -> ListenerConfig {
        ListenerConfig {
            listener: ListenerOptions::default(),
            always_kill: always_kill.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ListenerConfig::default()).is_ok());
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut config = ListenerConfig::default();
        config.listener.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ListenerConfig::default();
        config.listener.read_timeout = Duration::ZERO;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_log_level() {
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn test_always_kill_entries() {
        assert!(validate_config(&config_with(&["UnrealEngine.exe", "game"])).is_ok());
        assert!(validate_config(&config_with(&[""])).is_err());
        assert!(validate_config(&config_with(&[" game"])).is_err());
        assert!(validate_config(&config_with(&["C:\\Games\\game.exe"])).is_err());
        assert!(validate_config(&config_with(&["/usr/bin/game"])).is_err());

        let err = validate_config(&config_with(&["game", "game"])).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
