//! External configuration loader.
//!
//! Reads `maze-chase.toml` from the executable's directory, then the CWD.
//! Missing files or keys fall back to defaults; `MAZE_CHASE_SEED` and
//! `MAZE_CHASE_LOG` override the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

pub const CONFIG_FILE: &str = "maze-chase.toml";
const ENV_SEED: &str = "MAZE_CHASE_SEED";
const ENV_LOG: &str = "MAZE_CHASE_LOG";

// ── Public Config Struct ──

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub keys: KeyBindings,
    pub glyphs: GlyphSet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: char,
    pub left: char,
    pub down: char,
    pub right: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: 'w',
            left: 'a',
            down: 's',
            right: 'd',
            quit: '0',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    #[default]
    Ascii,
    Unicode,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    controls: TomlControls,
    #[serde(default)]
    display: TomlDisplay,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    seed: Option<u64>,
    log_file: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TomlControls {
    #[serde(default = "default_up")]
    up: String,
    #[serde(default = "default_left")]
    left: String,
    #[serde(default = "default_down")]
    down: String,
    #[serde(default = "default_right")]
    right: String,
    #[serde(default = "default_quit")]
    quit: String,
}

#[derive(Deserialize, Debug, Default)]
struct TomlDisplay {
    #[serde(default)]
    glyphs: GlyphSet,
}

// ── Defaults ──

fn default_up() -> String { "w".into() }
fn default_left() -> String { "a".into() }
fn default_down() -> String { "s".into() }
fn default_right() -> String { "d".into() }
fn default_quit() -> String { "0".into() }

impl Default for TomlControls {
    fn default() -> Self {
        TomlControls {
            up: default_up(),
            left: default_left(),
            down: default_down(),
            right: default_right(),
            quit: default_quit(),
        }
    }
}

fn key_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_lowercase()),
        _ => Err(GameError::KeyBinding(value.to_string())),
    }
}

/// A bad binding only loses that key; the rest of the file still applies.
fn binding_or(value: &str, default: char) -> char {
    key_char(value).unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using '{default}'");
        default
    })
}

// ── Loading ──

impl GameConfig {
    /// Load config from the first `maze-chase.toml` found, then apply
    /// environment overrides. Problems are reported and defaults kept.
    pub fn load() -> Self {
        let mut config = match find_config_file() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                eprintln!("Warning: {e}");
                eprintln!("Using default settings.");
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };
        if let Err(e) = config.apply_env(|var| std::env::var(var).ok()) {
            eprintln!("Warning: {e}");
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let parsed = toml::from_str::<TomlConfig>(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(parsed)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let parsed = toml::from_str::<TomlConfig>(text).map_err(|source| GameError::Config {
            path: PathBuf::from(CONFIG_FILE),
            source,
        })?;
        Self::from_toml(parsed)
    }

    fn from_toml(cfg: TomlConfig) -> Result<Self> {
        let fallback = KeyBindings::default();
        Ok(GameConfig {
            seed: cfg.general.seed,
            log_file: cfg.general.log_file.map(PathBuf::from),
            keys: KeyBindings {
                up: binding_or(&cfg.controls.up, fallback.up),
                left: binding_or(&cfg.controls.left, fallback.left),
                down: binding_or(&cfg.controls.down, fallback.down),
                right: binding_or(&cfg.controls.right, fallback.right),
                quit: binding_or(&cfg.controls.quit, fallback.quit),
            },
            glyphs: cfg.display.glyphs,
        })
    }

    /// Environment wins over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup(ENV_SEED) {
            let seed = value.trim().parse::<u64>().map_err(|_| GameError::Env {
                var: ENV_SEED,
                value: value.clone(),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

/// Executable directory first, then the working directory.
fn find_config_file() -> Option<PathBuf> {
    let mut dirs = vec![];
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }
    dirs.into_iter()
        .map(|d| d.join(CONFIG_FILE))
        .find(|p| p.is_file())
}
