use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rota::policy::PolicyError;
use rota::{CandidateName, Palette, SpinPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Who's Got Mom?";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub candidates: Vec<CandidateName>,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub spin: SpinPolicy,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            candidates: Vec::new(),
            palette: Palette::default(),
            spin: SpinPolicy::default(),
        }
    }
}

impl Config {
    /// Candidate names with blank entries dropped.
    pub fn candidate_names(&self) -> Vec<CandidateName> {
        rota::candidate::parse_names(self.candidates.iter().map(|c| c.as_str()))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid spin settings: {0}")]
    Policy(#[from] PolicyError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "caretaker", "caretaker")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("CARETAKER").separator("__"))
        .build()?;

    parse(s)
}

fn parse(source: config::Config) -> Result<Config, ConfigError> {
    let config: Config = source.try_deserialize()?;
    config.spin.validate()?;
    Ok(config)
}

/// Writes the starter config on first run and falls back to built-in defaults
/// when the file cannot be used.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote starter config to {}", path.display()),
            Err(e) => log::error!("Failed to write starter config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota::HexColor;
    use std::time::Duration;

    fn from_toml(text: &str) -> Result<Config, ConfigError> {
        let source = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        parse(source)
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert!(!config.candidates.is_empty());
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.spin, SpinPolicy::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_palette_and_spin() {
        let config = from_toml(
            r##"
candidates = ["Alice", "  ", "Bob"]
palette = ["#000000", "#ff8800"]

[spin]
min_turns = 4
max_turns = 4
duration_ms = 1500
"##,
        )
        .unwrap();

        assert_eq!(config.candidate_names().len(), 2);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.palette.color(1), HexColor::rgb(0xFF, 0x88, 0x00));
        assert_eq!(config.spin.min_turns, 4);
        assert_eq!(config.spin.duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_spin_settings_are_rejected() {
        let result = from_toml(
            r#"
[spin]
min_turns = 5
max_turns = 2
"#,
        );
        assert!(matches!(result, Err(ConfigError::Policy(_))));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        assert!(from_toml(r#"palette = ["not-a-color"]"#).is_err());
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let config: Config =
            serde_json::from_str(r#"{ "title": "Dishes", "candidates": ["Ann"] }"#).unwrap();
        assert_eq!(config.title, "Dishes");
        assert_eq!(config.candidates, vec![CandidateName::new("Ann")]);
        assert_eq!(config.spin, SpinPolicy::default());
    }
}
