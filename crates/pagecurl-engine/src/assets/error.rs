use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset name `{0}` must be a plain file name")]
    InvalidName(String),

    #[error("failed to open asset {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read asset {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("asset {name} truncated: expected {expected} bytes, read {read}")]
    Truncated {
        name: String,
        expected: u64,
        read: u64,
    },
}

impl AssetError {
    /// Whether the asset simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Open { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
