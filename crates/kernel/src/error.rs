//! Error types shared by every stage of the antenna pipeline.

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while deriving or synthesizing antenna geometry.
///
/// All errors are terminal for the request that produced them; no partial
/// geometry is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    #[error("scene sink failed: {reason}")]
    Scene { reason: String },
}

impl Error {
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Error::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub fn scene(reason: impl Into<String>) -> Self {
        Error::Scene {
            reason: reason.into(),
        }
    }
}

/// Reject anything that is not a finite, strictly positive length.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(
            parameter,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Reject integer counts below `min`.
pub(crate) fn require_at_least(parameter: &'static str, value: usize, min: usize) -> Result<usize> {
    if value >= min {
        Ok(value)
    } else {
        Err(Error::invalid(
            parameter,
            format!("must be at least {min}, got {value}"),
        ))
    }
}

/// Reject vertex counts that `u32` face and edge indices cannot address.
/// `None` stands for a count that already overflowed `usize`.
pub(crate) fn require_indexable(what: &str, vertices: Option<usize>) -> Result<usize> {
    match vertices {
        Some(n) if u32::try_from(n).is_ok() => Ok(n),
        _ => Err(Error::degenerate(format!(
            "{what} needs more vertices than u32 indices can address"
        ))),
    }
}
