use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::Result;
use crate::modules::navigation::normalize_address;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub homepage: String,
    pub portfolio_url: String,
    pub new_tab_label: String,
    pub portfolio_label: String,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homepage: "https://www.google.com".to_string(),
            portfolio_url: "https://syedgoharhussain.github.io/Portfolio/".to_string(),
            new_tab_label: "🌍 New Tab".to_string(),
            portfolio_label: "👨‍💻 Portfolio".to_string(),
            user_agent: None,
        }
    }
}

impl Settings {
    pub fn path_in(app_data_dir: &Path) -> PathBuf {
        app_data_dir.join(SETTINGS_FILE)
    }

    /// Reads settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let settings: Self = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                Self::default()
            }
        };
        settings.normalized()
    }

    /// Makes the configured addresses loadable as typed into the URL field:
    /// a missing scheme becomes `https://`, blank or unparseable values fall
    /// back to the defaults.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.homepage = loadable_address(&self.homepage).unwrap_or_else(|| {
            log::warn!("[Settings] Unusable homepage {:?}, using {}", self.homepage, defaults.homepage);
            defaults.homepage
        });
        self.portfolio_url = loadable_address(&self.portfolio_url).unwrap_or_else(|| {
            log::warn!("[Settings] Unusable portfolio url {:?}, using {}", self.portfolio_url, defaults.portfolio_url);
            defaults.portfolio_url
        });
        self
    }

    /// Loads settings and writes the defaults out when no file exists yet.
    pub fn load_or_init(path: &Path) -> Self {
        let settings = Self::load(path);
        if !path.exists() {
            if let Err(e) = settings.save(path) {
                log::warn!("[Settings] Could not write defaults to {:?}: {}", path, e);
            }
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // tmp + rename so a crash never leaves a half-written file
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;

        Ok(())
    }
}

fn loadable_address(raw: &str) -> Option<String> {
    let address = normalize_address(raw)?;
    Url::parse(&address).ok().map(|_| address)
}
