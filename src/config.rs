use crate::editor::DEFAULT_EDITOR;
use crate::errors::*;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.softlayer.com/rest/v3.1";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub editor: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
    pub endpoint: String,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slfw").join("config.yaml"))
}

pub fn resolve(overrides: &Overrides) -> Result<Config> {
    let path = overrides.config_path.clone().or_else(default_config_path);
    let config = match path {
        Some(ref path) => load(path)?,
        None => Config::default(),
    };
    Ok(config.merge(overrides))
}

/// A missing file is an empty config.
pub fn load(path: &Path) -> Result<Config> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(e).chain_err(|| format!("failed to read config: {}", path.display()))
        }
    };
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config = serde_yaml::from_str(&content)
        .chain_err(|| format!("failed to parse config: {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

impl Config {
    pub fn merge(self, overrides: &Overrides) -> Config {
        Config {
            username: overrides.username.clone().or(self.username),
            api_key: overrides.api_key.clone().or(self.api_key),
            endpoint: overrides.endpoint.clone().or(self.endpoint),
            editor: self.editor,
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let username = self.username.clone().ok_or_else(|| {
            ErrorKind::Config(
                "no username configured: pass --username or set SL_USERNAME".to_owned(),
            )
        })?;
        let api_key = self.api_key.clone().ok_or_else(|| {
            ErrorKind::Config(
                "no API key configured: pass --api-key or set SL_API_KEY".to_owned(),
            )
        })?;
        Ok(Credentials {
            username,
            api_key,
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
        })
    }

    /// Config file first, then `$VISUAL`, then `$EDITOR`.
    pub fn editor_command<F>(&self, var: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        self.editor
            .clone()
            .or_else(|| var("VISUAL"))
            .or_else(|| var("EDITOR"))
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_owned())
    }
}
