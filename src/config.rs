use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::i18n::I18n;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct I18nConfig {
    /// Message language: auto | en | ja
    #[serde(default = "I18nConfig::default_language")]
    pub language: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Self::default_language(),
        }
    }
}

impl I18nConfig {
    fn default_language() -> String {
        "auto".to_string()
    }
}

/// File names inside the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "FilesConfig::default_template_en")]
    pub template_en: String,

    #[serde(default = "FilesConfig::default_template_ja")]
    pub template_ja: String,

    /// Primary target, read by Cursor
    #[serde(default = "FilesConfig::default_primary")]
    pub primary: String,

    /// Work-in-progress fallback for the primary target
    #[serde(default = "FilesConfig::default_wip")]
    pub wip: String,

    /// Mirror target, read by Google Antigravity
    #[serde(default = "FilesConfig::default_mirror")]
    pub mirror: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            template_en: Self::default_template_en(),
            template_ja: Self::default_template_ja(),
            primary: Self::default_primary(),
            wip: Self::default_wip(),
            mirror: Self::default_mirror(),
        }
    }
}

impl FilesConfig {
    fn default_template_en() -> String {
        "AGENTS.md.en".to_string()
    }

    fn default_template_ja() -> String {
        "AGENTS.md.ja".to_string()
    }

    fn default_primary() -> String {
        "AGENTS.md".to_string()
    }

    fn default_wip() -> String {
        "AGENTS.md.wip".to_string()
    }

    fn default_mirror() -> String {
        "GEMINI.md".to_string()
    }
}

const FILE_KEYS: [&str; 5] = ["template_en", "template_ja", "primary", "wip", "mirror"];

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(&path)
            .context(format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .context(format!("failed to parse config file: {}", path.display()))
    }

    pub fn save(&self, i18n: &I18n) -> Result<()> {
        let parent = app_home()?;
        let path = parent.join("config.toml");
        fs::create_dir_all(&parent)
            .context(i18n.err_create_config_dir(&parent.display().to_string()))?;
        let contents = toml::to_string_pretty(self).context(i18n.err_serialize_config())?;
        fs::write(&path, contents).context(i18n.err_write_config(&path.display().to_string()))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "language" => Some(self.i18n.language.clone()),
            "template_en" => Some(self.files.template_en.clone()),
            "template_ja" => Some(self.files.template_ja.clone()),
            "primary" => Some(self.files.primary.clone()),
            "wip" => Some(self.files.wip.clone()),
            "mirror" => Some(self.files.mirror.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, i18n: &I18n, key: &str, value: &str) -> Result<bool> {
        if key == "language" {
            let valid = ["auto", "en", "ja"];
            if !valid.contains(&value) {
                anyhow::bail!(
                    "{}",
                    i18n.err_invalid_language_value(value, &valid.join(", "))
                );
            }
            self.i18n.language = value.to_string();
            return Ok(true);
        }

        if !FILE_KEYS.contains(&key) {
            return Ok(false);
        }
        let value = value.trim();
        if value.is_empty() {
            anyhow::bail!("{}", i18n.err_empty_value(key));
        }
        let slot = match key {
            "template_en" => &mut self.files.template_en,
            "template_ja" => &mut self.files.template_ja,
            "primary" => &mut self.files.primary,
            "wip" => &mut self.files.wip,
            _ => &mut self.files.mirror,
        };
        *slot = value.to_string();
        Ok(true)
    }

    pub fn list(&self) -> Vec<(String, String)> {
        std::iter::once("language")
            .chain(FILE_KEYS)
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    pub fn reset(i18n: &I18n) -> Result<Self> {
        let config = Config::default();
        config.save(i18n)?;
        Ok(config)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(app_home()?.join("config.toml"))
}

pub fn app_home() -> Result<PathBuf> {
    let home = home_dir()?;
    Ok(home.join(".agents-md"))
}

pub fn home_dir() -> Result<PathBuf> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("failed to determine home directory")?;
    Ok(PathBuf::from(home))
}
