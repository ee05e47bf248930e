//! Error types for keyframe editing and registry commands.

use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;

/// Every failure in this crate is local and recoverable; callers retry with
/// corrected arguments.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyframeError {
    /// A required argument was missing or out of range
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A keyframe already occupies the requested tick
    #[error("A keyframe already exists at tick {tick}")]
    Collision { tick: u32 },

    /// The timeline holds no keyframes
    #[error("Timeline is empty")]
    EmptyTimeline,

    /// No keyframe sits at the requested tick
    #[error("No keyframe at tick {tick}")]
    KeyframeNotFound { tick: u32 },

    /// The object id was never registered (or was unregistered)
    #[error("{object} is not registered")]
    NotRegistered { object: ObjectId },
}

impl KeyframeError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "validation",
            Self::Collision { .. } | Self::EmptyTimeline | Self::KeyframeNotFound { .. } => {
                "timeline"
            }
            Self::NotRegistered { .. } => "registry",
        }
    }
}

/// Keyframer result type
pub type Result<T> = core::result::Result<T, KeyframeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(KeyframeError::Collision { tick: 60 }.category(), "timeline");
        assert_eq!(KeyframeError::EmptyTimeline.category(), "timeline");
        assert_eq!(
            KeyframeError::NotRegistered {
                object: ObjectId(4)
            }
            .category(),
            "registry"
        );
        assert_eq!(
            KeyframeError::InvalidArgument {
                reason: "x".into()
            }
            .category(),
            "validation"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            KeyframeError::Collision { tick: 120 }.to_string(),
            "A keyframe already exists at tick 120"
        );
        assert_eq!(
            KeyframeError::NotRegistered {
                object: ObjectId(2)
            }
            .to_string(),
            "object#2 is not registered"
        );
    }

    #[test]
    fn test_serialization() {
        let error = KeyframeError::KeyframeNotFound { tick: 30 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: KeyframeError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
