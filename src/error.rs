use thiserror::Error;

use crate::sim::ObjectKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid world dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid point: ({x}, {y})")]
    InvalidPoint { x: f32, y: f32 },

    #[error("Invalid spawn entry for {kind:?}: {reason}")]
    InvalidObjectType { kind: ObjectKind, reason: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject non-finite or non-positive world dimensions
pub fn check_dimensions(width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(800.0, 600.0).is_ok());
        assert!(check_dimensions(0.0, 600.0).is_err());
        assert!(check_dimensions(800.0, -1.0).is_err());
        assert!(check_dimensions(f32::NAN, 600.0).is_err());
        assert!(check_dimensions(f32::INFINITY, 600.0).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = SimError::InvalidDimensions {
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(err.to_string(), "Invalid world dimensions: 0x10");
    }
}
