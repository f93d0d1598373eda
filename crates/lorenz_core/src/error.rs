//! Core error types
//!
//! Every variant except `GridMismatch` is a configuration problem detected
//! before integration starts. Once a run begins it cannot fail.

use std::fmt;
use lorenz_math::Axis;

/// Error type for run validation and volume allocation
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Grid resolution of zero
    ZeroResolution,
    /// An axis range that is empty, inverted or non-finite
    InvalidBounds { axis: Axis, min: f64, max: f64 },
    /// `resolution³` does not fit in the address space
    VolumeTooLarge { resolution: usize },
    /// The counter buffer could not be allocated
    Allocation { cells: usize },
    /// Integration step that is zero, negative or non-finite
    InvalidStepSize(f64),
    /// A Lorenz coefficient or start coordinate that is NaN or infinite
    NonFiniteParameter(&'static str),
    /// More iterations than a visit counter can hold
    CounterOverflow { iterations: u64 },
    /// Merging volumes built on different grids
    GridMismatch,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::ZeroResolution => write!(f, "Grid resolution must be at least 1"),
            CoreError::InvalidBounds { axis, min, max } => {
                write!(f, "Invalid {} range: [{}, {}] (min must be below max)", axis, min, max)
            }
            CoreError::VolumeTooLarge { resolution } => {
                write!(f, "Volume too large: {}^3 cells overflow the address space", resolution)
            }
            CoreError::Allocation { cells } => {
                write!(f, "Failed to allocate scalar volume of {} cells", cells)
            }
            CoreError::InvalidStepSize(h) => {
                write!(f, "Integration step size must be finite and positive, got {}", h)
            }
            CoreError::NonFiniteParameter(name) => write!(f, "Parameter '{}' is not finite", name),
            CoreError::CounterOverflow { iterations } => write!(
                f,
                "{} iterations could overflow a visit counter (max {})",
                iterations,
                u32::MAX
            ),
            CoreError::GridMismatch => write!(f, "Cannot merge volumes with different grids"),
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_display() {
        let err = CoreError::InvalidBounds { axis: Axis::Z, min: 60.0, max: -10.0 };
        let msg = format!("{}", err);
        assert!(msg.contains("z range"));
        assert!(msg.contains("60"));
    }

    #[test]
    fn test_allocation_display() {
        let msg = format!("{}", CoreError::Allocation { cells: 8_000_000 });
        assert!(msg.contains("allocate"));
        assert!(msg.contains("8000000"));
    }

    #[test]
    fn test_step_size_display() {
        let msg = format!("{}", CoreError::InvalidStepSize(-0.5));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn test_counter_overflow_display() {
        let msg = format!("{}", CoreError::CounterOverflow { iterations: 5_000_000_000 });
        assert!(msg.contains("5000000000"));
        assert!(msg.contains(&u32::MAX.to_string()));
    }

    #[test]
    fn test_error_has_no_source() {
        use std::error::Error;
        assert!(CoreError::ZeroResolution.source().is_none());
    }
}
