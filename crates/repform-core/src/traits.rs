//! Small shared trait definitions.
//!
//! Exercise dispatch itself is a closed tagged enum (exhaustiveness over
//! exercise kinds is checked by the compiler), so there is no classifier
//! trait here; these are the cross-cutting capabilities.

use crate::error::CoreResult;

/// Trait for types that can validate themselves.
pub trait Validate {
    /// Validates the instance.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first validation failure found.
    fn validate(&self) -> CoreResult<()>;
}

/// Trait for types that can be reset to their initial state.
pub trait Resettable {
    /// Resets the instance to its initial state.
    fn reset(&mut self);
}
