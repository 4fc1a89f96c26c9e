//! Error type raised across the native boundary.
//!
//! Bridge errors come in two tiers. `Error` is an ordinary R condition the
//! caller may catch; `Unimplemented` and `ShouldNotReachHere` abort the
//! current native call because they indicate a gap in the bridge itself.
//! Permissive coercions (`as_integer`, `as_real`, `as_char`, `as_logical`)
//! never produce either tier.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RError {
    /// Catchable R-level error.
    #[error("Error: {message}")]
    Error { message: String },
    /// The operation exists in GNU R but is not provided by the bridge.
    #[error("not yet implemented: {message}")]
    Unimplemented { message: String },
    /// Dispatch reached a state it should have ruled out.
    #[error("should not reach here: {message}")]
    ShouldNotReachHere { message: String },
}

pub type RResult<T> = Result<T, RError>;

impl RError {
    pub fn error(message: impl Into<String>) -> Self {
        RError::Error {
            message: message.into(),
        }
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        RError::Unimplemented {
            message: message.into(),
        }
    }

    pub fn should_not_reach_here(message: impl Into<String>) -> Self {
        RError::ShouldNotReachHere {
            message: message.into(),
        }
    }

    /// GNU R's `UNIMPLEMENTED_TYPE` condition, raised as an ordinary error.
    pub fn unimplemented_type(type_name: &str, function: &str) -> Self {
        RError::error(format!(
            "unimplemented type '{}' in '{}'",
            type_name, function
        ))
    }

    /// Returns `true` for errors that indicate a bridge defect rather than a
    /// caller mistake.
    pub fn is_internal(&self) -> bool {
        !matches!(self, RError::Error { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            RError::Error { message }
            | RError::Unimplemented { message }
            | RError::ShouldNotReachHere { message } => message,
        }
    }
}
