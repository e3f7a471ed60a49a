use crate::logging;
use crate::settings::{Keymaps, Settings};
use eyre::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fs, path::PathBuf};

const APP_DIR: &str = "gwanju";
const LEGACY_APP_DIR: &str = ".gwanju";

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keymaps: Keymaps,
    filepath: PathBuf,
}

impl Config {
    /// Load `configuration.json` from the app data directory, writing the
    /// defaults out on first run.
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join("configuration.json");

        if filepath.exists() {
            return Self::load_from(filepath);
        }

        let config = Self {
            settings: Settings::default(),
            keymaps: Keymaps::default(),
            filepath,
        };
        config.save()?;
        Ok(config)
    }

    /// Load configuration from a custom path. Unreadable sections fall back
    /// to defaults.
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();
        let mut keymaps = Keymaps::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            match serde_json::from_str::<Value>(&config_str) {
                Ok(user_config) => {
                    if let Some(user_settings) = section::<Settings>(&user_config, "Setting") {
                        settings.merge(user_settings);
                    }
                    if let Some(user_keymaps) = section::<Keymaps>(&user_config, "Keymap") {
                        keymaps.merge(user_keymaps);
                    }
                }
                Err(err) => logging::warn(format!(
                    "ignoring invalid configuration {}: {}",
                    filepath.display(),
                    err
                )),
            }
        }

        Ok(Self {
            settings,
            keymaps,
            filepath,
        })
    }

    /// Create a config with custom settings for testing
    pub fn with_settings(settings: Settings, keymaps: Keymaps) -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join("test_configuration.json");

        Ok(Self {
            settings,
            keymaps,
            filepath,
        })
    }

    /// Defaults that are never written to disk.
    pub fn ephemeral() -> Self {
        Self {
            settings: Settings::default(),
            keymaps: Keymaps::default(),
            filepath: PathBuf::from("configuration.json"),
        }
    }

    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Replace the data file paths given on the command line.
    pub fn override_data_paths(&mut self, bible_data: Option<PathBuf>, refs_data: Option<PathBuf>) {
        if let Some(path) = bible_data {
            self.settings.bible_data_path = path.to_string_lossy().into_owned();
        }
        if let Some(path) = refs_data {
            self.settings.refs_data_path = path.to_string_lossy().into_owned();
        }
    }

    pub fn bible_data_path(&self) -> PathBuf {
        PathBuf::from(&self.settings.bible_data_path)
    }

    pub fn refs_data_path(&self) -> PathBuf {
        PathBuf::from(&self.settings.refs_data_path)
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_json = serde_json::json!({
            "Setting": self.settings,
            "Keymap": self.keymaps,
        });

        let config_str = serde_json::to_string_pretty(&config_json)?;

        if let Some(parent) = self.filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        Ok(())
    }
}

fn section<T: DeserializeOwned>(config: &Value, name: &str) -> Option<T> {
    let value = config.get(name)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            logging::warn(format!("ignoring configuration section {}: {}", name, err));
            None
        }
    }
}

pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join(APP_DIR));
    } else if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home.clone()).join(".config").join(APP_DIR);
        if path.exists() {
            return Ok(path);
        } else {
            return Ok(PathBuf::from(home).join(LEGACY_APP_DIR));
        }
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(user_profile).join(LEGACY_APP_DIR));
    }

    Err(eyre::eyre!("Could not determine application data directory"))
}
