//! Error type shared by every render backend.

use thiserror::Error;

/// Everything that can stop a render pass.
///
/// All variants except [`RenderError::Backend`] are reported before the first
/// drawing call, so a failed pass never leaves a half-drawn surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("unknown dash style `{0}` (expected one of: solid, dotted, dashed, dashdot)")]
    UnknownDashStyle(String),

    #[error("unknown line cap `{0}` (expected one of: butt, round, square)")]
    UnknownLineCap(String),

    #[error("malformed vector `{key}`: {reason}")]
    MalformedInput { key: String, reason: String },

    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Failure reported by the underlying drawing backend while drawing.
    #[error("drawing backend error: {0}")]
    Backend(String),
}

impl RenderError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        RenderError::MalformedInput {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
