use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::generator::Options;
use crate::layout::Layout;
use crate::machine_id::StaticMachineId;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_file: String,
    /// Overrides network-based resolution when set.
    #[serde(default)]
    pub machine_id: Option<u16>,
    /// Non-empty list restricts which machine ids may start a generator.
    #[serde(default)]
    pub allowed_machine_ids: Vec<u16>,
    pub layout: String,
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("log_level", "info")?
        .set_default("log_to_file", false)?
        .set_default("log_file", "log/daystamp.log")?
        .set_default("layout", "legacy")
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let s = with_defaults(Config::builder())?
        // Add configuration from a file
        .add_source(File::with_name("config/daystamp").required(false))
        // Add configuration from environment variables
        .add_source(
            Environment::with_prefix("DAYSTAMP")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_machine_ids"),
        )
        .build()?;

    s.try_deserialize()
}

/// Same defaults as [`load_config`], with an inline YAML document as the only source.
pub fn parse_config(yaml: &str) -> Result<AppConfig, ConfigError> {
    with_defaults(Config::builder())?
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()?
        .try_deserialize()
}

impl AppConfig {
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        match self.layout.to_lowercase().as_str() {
            "legacy" => Ok(Layout::LEGACY),
            "wide" => Ok(Layout::WIDE),
            other => Err(ConfigError::Message(format!(
                "unknown layout '{}', expected 'legacy' or 'wide'",
                other
            ))),
        }
    }
}

impl Options {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut opts = Options::new().with_layout(config.layout()?);

        if let Some(machine_id) = config.machine_id {
            opts = opts.with_machine_id(StaticMachineId(machine_id));
        }

        if !config.allowed_machine_ids.is_empty() {
            let allowed = config.allowed_machine_ids.clone();
            opts = opts.with_check_machine_id(move |id| allowed.contains(&id));
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    #[test]
    fn test_defaults() {
        let config = parse_config("log_level: debug").unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(!config.log_to_file);
        assert_eq!(config.log_file, "log/daystamp.log");
        assert_eq!(config.machine_id, None);
        assert!(config.allowed_machine_ids.is_empty());
        assert_eq!(config.layout().unwrap(), Layout::LEGACY);
    }

    #[test]
    fn test_machine_id_and_allow_list() {
        let config = parse_config(
            "machine_id: 288\nallowed_machine_ids: [288, 289]\nlayout: wide\n",
        )
        .unwrap();
        assert_eq!(config.machine_id, Some(288));

        let g = Generator::new(Options::from_config(&config).unwrap()).unwrap();
        assert_eq!(g.machine_id(), 288);
        assert_eq!(g.layout(), Layout::WIDE);
    }

    #[test]
    fn test_allow_list_rejects() {
        let config = parse_config("machine_id: 7\nallowed_machine_ids: [1, 2]\n").unwrap();
        assert!(Generator::new(Options::from_config(&config).unwrap()).is_none());
    }

    #[test]
    fn test_unknown_layout() {
        let config = parse_config("layout: compact").unwrap();
        assert!(config.layout().is_err());
        assert!(Options::from_config(&config).is_err());
    }

    #[test]
    fn test_machine_id_out_of_range() {
        assert!(parse_config("machine_id: 70000").is_err());
    }
}
