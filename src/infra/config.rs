use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    const CONFIG_FILE: &'static str = "config.yml";

    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::CONFIG_FILE);

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid config at {}", config_path.display()))?
        } else {
            Self::default()
        };

        // Environment variable wins over the config file
        if let Ok(url) = std::env::var("BRIEFLY_API_URL") {
            config.api_url = url;
        }

        Ok(config)
    }

    pub fn create_default(dir: &Path) -> Result<()> {
        let config_path = dir.join(Self::CONFIG_FILE);

        if config_path.exists() {
            return Ok(());
        }

        let default_content = r#"# Briefly configuration

api_url: http://localhost:8000  # summarization backend
timeout_secs: 60                # per-request timeout
"#;

        std::fs::create_dir_all(dir)?;
        std::fs::write(&config_path, default_content)?;
        println!("Created config at {}", config_path.display());

        Ok(())
    }
}

/// Directory holding the config file and the stored session.
/// `BRIEFLY_CONFIG_DIR` overrides the per-user default.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BRIEFLY_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join("briefly"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests around the process-global BRIEFLY_API_URL variable
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn file_values_are_loaded() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yml"),
            "api_url: http://summaries.internal:9000\ntimeout_secs: 15\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.api_url, "http://summaries.internal:9000");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn timeout_defaults_when_absent_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yml"), "api_url: http://host:1\n").unwrap();

        let config = ClientConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn env_var_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yml"), "api_url: http://from-file:1\n").unwrap();

        std::env::set_var("BRIEFLY_API_URL", "http://from-env:2");
        let config = ClientConfig::load_from(dir.path());
        std::env::remove_var("BRIEFLY_API_URL");

        assert_eq!(config.unwrap().api_url, "http://from-env:2");
    }
}
