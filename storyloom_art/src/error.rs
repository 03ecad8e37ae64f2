// Error type for configuration and story loading.
//
// The composers themselves are total and never fail. Only the edges that
// parse external input (art config JSON, story drafts, files on disk)
// return `ArtError`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ArtError {
    #[error("invalid color {0:?}: expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = ArtError> = std::result::Result<T, E>;
