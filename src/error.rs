use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid key binding `{0}`: expected a single character")]
    KeyBinding(String),

    #[error("invalid value for {var}: `{value}`")]
    Env { var: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, GameError>;
