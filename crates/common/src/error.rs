//! Error types shared across Inlay crates.

use std::fmt::Display;
use std::path::PathBuf;

/// Top-level error type for Inlay operations.
#[derive(Debug, thiserror::Error)]
pub enum InlayError {
    /// A referenced file (image, clip, font, audio) does not exist.
    /// Raised at element construction, before any per-frame work starts.
    #[error("Asset not found: {path}")]
    AssetNotFound { path: PathBuf },

    /// Invalid or insufficient configuration, e.g. a position that cannot
    /// be resolved from the given anchors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An enum-like parameter was given a value outside its fixed set.
    /// The message enumerates every accepted value.
    #[error("Unsupported {name} \"{value}\": choose one of [{allowed}]")]
    Unsupported {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Audio error: {message}")]
    Audio { message: String },

    /// An external ffmpeg/ffprobe invocation failed to spawn or exited
    /// non-zero. The message carries the tail of the process stderr.
    #[error("ffmpeg error: {message}")]
    Ffmpeg { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using InlayError.
pub type InlayResult<T> = Result<T, InlayError>;

impl InlayError {
    pub fn asset_not_found(path: impl Into<PathBuf>) -> Self {
        Self::AssetNotFound { path: path.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio {
            message: msg.into(),
        }
    }

    pub fn ffmpeg(msg: impl Into<String>) -> Self {
        Self::Ffmpeg {
            message: msg.into(),
        }
    }

    /// Build an `Unsupported` error for `value` given the full set of
    /// accepted values for the parameter `name`.
    pub fn unsupported<I, T>(name: &str, value: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let allowed = allowed
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Unsupported {
            name: name.to_string(),
            value: value.to_string(),
            allowed,
        }
    }

    /// Check a path exists, returning it untouched if so.
    pub fn require_asset(path: impl Into<PathBuf>) -> InlayResult<PathBuf> {
        let path = path.into();
        if path.exists() {
            Ok(path)
        } else {
            Err(Self::AssetNotFound { path })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_lists_every_choice() {
        let err = InlayError::unsupported("codec", "FLAC", ["H264", "VP80", "XVID"]);
        let msg = err.to_string();
        assert!(msg.contains("codec"));
        assert!(msg.contains("FLAC"));
        assert!(msg.contains("H264"));
        assert!(msg.contains("VP80"));
        assert!(msg.contains("XVID"));
    }

    #[test]
    fn test_require_asset_missing() {
        let err = InlayError::require_asset("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, InlayError::AssetNotFound { .. }));
        assert!(err.to_string().contains("not/here.png"));
    }
}
