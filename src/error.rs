use crate::sector::BlockId;

/// Errors surfaced at the weak block boundaries (sector lookups, level data, editor options).
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Level parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Level serialization error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timing: {field} = {value}")]
    InvalidTiming { field: &'static str, value: f32 },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option {key} expects a {expected} value")]
    OptionType { key: String, expected: &'static str },
}
