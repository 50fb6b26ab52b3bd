//! Errors raised when effects are declared in the wrong place.
//!
//! Both kinds are programmer errors and are returned at the call site of
//! [`Effects::declare_effect`](crate::Effects::declare_effect). They are never
//! caught internally; components forward them with `?`.

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectError {
    /// An array dependency list was passed while the component was being
    /// constructed. Only a dependency function (or none) is valid there.
    #[error("array dependency lists can only be used for effects declared in `render()`")]
    InvalidDependencyShape,

    /// The declaration happened outside the construction or render of a
    /// component wrapped in `WithEffects`.
    #[error(
        "effects must be declared from a component wrapped in `WithEffects`, \
         and only during construction or `render()`"
    )]
    IllegalInvocationContext,
}

impl EffectError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EffectError::InvalidDependencyShape => "invalid_dependency_shape",
            EffectError::IllegalInvocationContext => "illegal_invocation_context",
        }
    }
}
