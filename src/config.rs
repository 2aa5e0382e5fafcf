use crate::error::{AirWatchError, Result};
use crate::models::UserGroup;
use dialoguer::{Input, Password, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub location: LocationConfig,
    #[serde(default = "default_user_group")]
    pub user_group: String,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub waqi: Option<WaqiConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_user_group() -> String {
    UserGroup::Normal.as_str().into()
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct WaqiConfig {
    pub token: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for WaqiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaqiConfig")
            .field("token", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AirWatchError::Config(format!(
                "Config file not found at {:?}. Run `airwatch init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AirWatchError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parses YAML after substituting `${VAR}` placeholders from the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| AirWatchError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/airwatch/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AirWatchError::Config("Cannot determine config directory".into()))?
            .join("airwatch");
        Ok(config_dir.join("config.yaml"))
    }

    /// The configured group, falling back to `normal` for unknown values.
    pub fn user_group(&self) -> UserGroup {
        UserGroup::from_str_or_default(&self.user_group)
    }

    /// OpenWeatherMap settings when present and enabled with a non-empty key.
    pub fn active_openweathermap(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.trim().is_empty())
    }

    pub fn active_waqi(&self) -> Option<&WaqiConfig> {
        self.waqi
            .as_ref()
            .filter(|c| c.enabled && !c.token.trim().is_empty())
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up AirWatch!");
        println!();

        println!("Default location");
        let name: String = Input::new()
            .with_prompt("  Name")
            .default("Hà Nội - Hoàn Kiếm".into())
            .interact_text()
            .map_err(input_error)?;

        let latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(21.0285)
            .interact_text()
            .map_err(input_error)?;

        let longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(105.8542)
            .interact_text()
            .map_err(input_error)?;

        println!();

        let groups: Vec<&str> = UserGroup::ALL.iter().map(|g| g.as_str()).collect();
        let group_idx = Select::new()
            .with_prompt("User group")
            .items(&groups)
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        println!();

        println!("WAQI (leave token blank to skip)");
        let waqi_token: String = Password::new()
            .with_prompt("  Token")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        println!();

        let config = Config {
            location: LocationConfig {
                name,
                latitude,
                longitude,
            },
            user_group: groups[group_idx].to_string(),
            openweathermap: (!owm_api_key.is_empty()).then(|| OpenWeatherMapConfig {
                api_key: owm_api_key,
                enabled: true,
            }),
            waqi: (!waqi_token.is_empty()).then(|| WaqiConfig {
                token: waqi_token,
                enabled: true,
            }),
            http: HttpConfig::default(),
            history: HistoryConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AirWatchError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AirWatch Configuration\n\
             # Generated by `airwatch init`\n\
             # Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        re.replace_all(content, |caps: &regex_lite::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("AIRWATCH_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| AirWatchError::Config("Cannot determine data directory".into()))?
            .join("airwatch");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("history.db"))
    }
}

fn input_error(e: dialoguer::Error) -> AirWatchError {
    AirWatchError::Config(format!("Input error: {}", e))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: LocationConfig {
                name: "Hà Nội - Hoàn Kiếm".into(),
                latitude: 21.0285,
                longitude: 105.8542,
            },
            user_group: UserGroup::Normal.as_str().into(),
            openweathermap: None,
            waqi: None,
            http: HttpConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
location:
  name: Đà Nẵng - Hải Châu
  latitude: 16.0544
  longitude: 108.2022
user_group: elderly
openweathermap:
  api_key: abc123
waqi:
  token: ""
"#;

    #[test]
    fn parses_sample_with_defaults() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.location.name, "Đà Nẵng - Hải Châu");
        assert_eq!(config.user_group(), UserGroup::Elderly);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.http.max_retries, 2);
        assert!(config.history.enabled);
        assert!(config.active_openweathermap().is_some());
        // empty token counts as not configured
        assert!(config.active_waqi().is_none());
    }

    #[test]
    fn unknown_group_falls_back_to_normal() {
        let mut config = Config::default();
        config.user_group = "astronauts".into();
        assert_eq!(config.user_group(), UserGroup::Normal);
    }

    #[test]
    fn disabled_source_is_inactive() {
        let mut config = Config::default();
        config.openweathermap = Some(OpenWeatherMapConfig {
            api_key: "k".into(),
            enabled: false,
        });
        assert!(config.active_openweathermap().is_none());
    }

    #[test]
    fn substitutes_known_env_vars_only() {
        std::env::set_var("AIRWATCH_TEST_OWM_KEY", "from-env");
        let out = Config::substitute_env_vars(
            "a: ${AIRWATCH_TEST_OWM_KEY}\nb: ${AIRWATCH_TEST_UNSET_VAR}",
        );
        assert_eq!(out, "a: from-env\nb: ${AIRWATCH_TEST_UNSET_VAR}");
    }

    #[test]
    fn debug_redacts_credentials() {
        let owm = OpenWeatherMapConfig {
            api_key: "super-secret".into(),
            enabled: true,
        };
        let waqi = WaqiConfig {
            token: "also-secret".into(),
            enabled: true,
        };
        assert!(!format!("{:?}", owm).contains("super-secret"));
        assert!(!format!("{:?}", waqi).contains("also-secret"));
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(matches!(
            Config::load(Some(path.clone())),
            Err(AirWatchError::Config(_))
        ));

        std::fs::write(&path, SAMPLE).unwrap();
        let config = Config::load(Some(path.clone())).unwrap();
        assert_eq!(config.location.latitude, 16.0544);
        assert!(Config::exists(Some(&path)));
    }

    #[test]
    fn data_dir_override_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("data");
        let resolved = Config::data_dir(Some(&target)).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
        assert_eq!(
            Config::db_path(Some(&target)).unwrap(),
            target.join("history.db")
        );
    }
}
