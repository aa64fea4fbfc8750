use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("insight {insight} has unknown branch {value:?}")]
    UnknownBranch { insight: String, value: String },

    #[error("insight {insight} has unknown emotional tone {value:?}")]
    UnknownTone { insight: String, value: String },

    #[error("connection {insight} -> {target} has unknown type {value:?}")]
    UnknownConnectionType {
        insight: String,
        target: String,
        value: String,
    },

    #[error("insight {insight} has invalid bloom color {value:?} (expected #rrggbb)")]
    InvalidColor { insight: String, value: String },

    #[error("duplicate insight id {0}")]
    DuplicateId(String),

    #[error("insight at position {position} has an empty id")]
    EmptyId { position: usize },

    #[error("invalid arboretum JSON: {0}")]
    Json(#[from] serde_json::Error),
}
