//! Default options, read from a YAML file.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use passgen::{CharacterClass, GenerationConfig};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    length: Option<usize>,
    uppercase: Option<bool>,
    lowercase: Option<bool>,
    digits: Option<bool>,
    symbols: Option<bool>,
    /// Program and arguments that read the text to copy from stdin.
    pub clipboard_command: Option<Vec<String>>,
}

impl Settings {
    /// The built-in defaults, with anything set in this file applied on top.
    pub fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default();
        if let Some(length) = self.length {
            config.length = length;
        }
        let flags = [
            (CharacterClass::Uppercase, self.uppercase),
            (CharacterClass::Lowercase, self.lowercase),
            (CharacterClass::Digit, self.digits),
            (CharacterClass::Symbol, self.symbols),
        ];
        for (class, enabled) in flags {
            if let Some(enabled) = enabled {
                config.set_enabled(class, enabled);
            }
        }
        config
    }
}

/// Environment variable naming the settings file, used when `--config` isn't given.
const CONFIG_ENV_VAR: &str = "PASSGEN_CONFIG";

/// Load settings from `path`, else from `$PASSGEN_CONFIG`, else from the default location.
///
/// An explicitly given file must exist; the default one is optional.
pub(crate) fn load_settings(path: Option<PathBuf>) -> anyhow::Result<Settings> {
    let path = match explicit_settings_path(path, env::var_os(CONFIG_ENV_VAR)) {
        Some(p) => p,
        None => match default_settings_path() {
            Some(p) if p.exists() => p,
            _ => {
                log::debug!("no settings file found; using built-in defaults");
                return Ok(Settings::default());
            }
        },
    };
    log::debug!("reading settings from {}", path.display());
    read_settings(&path)
}

/// `--config` wins over the environment variable. An empty variable counts as unset.
fn explicit_settings_path(flag: Option<PathBuf>, env_value: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    parse_settings(&contents)
        .with_context(|| format!("failed to parse settings in {}", path.display()))
}

fn parse_settings(contents: &str) -> anyhow::Result<Settings> {
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(contents)?;
    if let Some(cmd) = settings.clipboard_command.as_ref() {
        if cmd.is_empty() {
            anyhow::bail!("clipboard_command must name a program");
        }
    }
    Ok(settings)
}

fn default_settings_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("passgen");
    p.push("config.yaml");
    Some(p)
}
