use std::fs;
use serde::{Deserialize, Serialize};

/// Optional TOML configuration, merged under command-line flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // default hexadecimal key, overridden by -k on the command line
    #[serde(default)]
    pub key: Option<String>,

    // overwrite an existing output file without prompting
    #[serde(default)]
    pub force: bool,

    // refuse inputs larger than this many bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
    20_000_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            key: None,
            force: false,
            max_file_size: default_max_file_size(),
        }
    }
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            key = "5a6e"
            force = true
            max_file_size = 1000000
            "#,
        )
        .unwrap();
        assert_eq!(config.key.as_deref(), Some("5a6e"));
        assert!(config.force);
        assert_eq!(config.max_file_size, 1_000_000);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.key, None);
        assert!(!config.force);
        assert_eq!(config.max_file_size, 20_000_000);
    }
}
