use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Narration error: {0}")]
    Narration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
