//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g. `GridError`, `TargetError`) are defined in their
//! respective modules alongside the operations that produce them. This module
//! holds the classification shared by all of them.
//!
//! # Design Principles
//!
//! - **Typed outcomes**: expected failures (out of bounds, no such target, bad
//!   dice notation) are returned as values, never raised as panics
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: every variant maps to a SCREAMING_SNAKE code callers can
//!   branch on or log
//!
//! Contract violations (zero-sized grids, `min > max` random ranges, decisions
//! requested for an actor that is not in the encounter) are caller bugs and
//! panic instead.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: destination occupied, target out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed dice notation, unknown target token
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - encounter state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl; the display
///   string is the human message shown to players
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
