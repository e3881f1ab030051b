use crate::config::StoreConfig;
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: Option<StoreSection>,
    pub seed: Option<SeedSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub strict_transitions: Option<bool>,
    pub enforce_milestone_totals: Option<bool>,
    pub max_crop_images: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSection {
    pub enabled: bool,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarketError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MarketError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values; unset
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(store) = &self.store {
            if let Some(max_images) = store.max_crop_images {
                if max_images == 0 {
                    return Err(MarketError::ConfigError {
                        field: "store.max_crop_images".to_string(),
                        message: "Value must be at least 1".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Store switches with defaults filled in for absent keys.
    pub fn store_config(&self) -> StoreConfig {
        let defaults = StoreConfig::default();
        match &self.store {
            Some(section) => StoreConfig {
                strict_transitions: section
                    .strict_transitions
                    .unwrap_or(defaults.strict_transitions),
                enforce_milestone_totals: section
                    .enforce_milestone_totals
                    .unwrap_or(defaults.enforce_milestone_totals),
                max_crop_images: section.max_crop_images.unwrap_or(defaults.max_crop_images),
            },
            None => defaults,
        }
    }

    pub fn seed_enabled(&self) -> bool {
        self.seed.as_ref().map(|s| s.enabled).unwrap_or(true)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[store]
strict_transitions = true
max_crop_images = 3

[seed]
enabled = false
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let store = config.store_config();

        assert!(store.strict_transitions);
        assert!(!store.enforce_milestone_totals);
        assert_eq!(store.max_crop_images, 3);
        assert!(!config.seed_enabled());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        let store = config.store_config();

        assert!(!store.strict_transitions);
        assert_eq!(store.max_crop_images, 5);
        assert!(config.seed_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AGRILINK_TEST_MAX_IMAGES", "2");

        let toml_content = r#"
[store]
max_crop_images = ${AGRILINK_TEST_MAX_IMAGES}
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store_config().max_crop_images, 2);

        std::env::remove_var("AGRILINK_TEST_MAX_IMAGES");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[store]
max_crop_images = 0
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[store]
enforce_milestone_totals = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert!(config.store_config().enforce_milestone_totals);
    }
}
