//! Error types for binding resolution and method invocation.
//!
//! Two phases, two enums:
//!
//! - [`BindError`] - anything that goes wrong while introspecting the engine
//!   or materializing a binding (registry init, resolution, synthesis).
//! - [`CallError`] - anything that goes wrong invoking a member on an
//!   already-bound instance.
//!
//! Metadata queries for unknown classes are deliberately NOT errors: the
//! engine reports empty member lists for names it does not know, so callers
//! cannot distinguish "wrong name" from "memberless class" through that
//! layer. Resolution of an unregistered public name is an error
//! ([`BindError::UnknownName`]) because the registry does know the full name
//! set.

use std::sync::PoisonError;
use thiserror::Error;

use crate::variant::VariantKind;

pub type BindResult<T> = Result<T, BindError>;
pub type CallResult<T> = Result<T, CallError>;

/// Errors raised while building or resolving bindings.
#[derive(Error, Debug)]
pub enum BindError {
    /// The requested public name is not registered.
    #[error("unknown binding name `{0}`")]
    UnknownName(String),

    /// The class hierarchy reported by the engine cannot be parent-ordered.
    #[error("broken class hierarchy: {0}")]
    BrokenHierarchy(String),

    /// The engine does not expose the requested global singleton.
    #[error("engine singleton `{0}` not available")]
    MissingSingleton(String),

    /// A required method-bind did not resolve.
    #[error("no method bind for `{class}.{method}`")]
    MissingMethodBind { class: String, method: String },

    /// The engine returned a value of an unexpected shape.
    #[error("unexpected engine response: {0}")]
    EngineCall(String),

    /// The registry mutex was poisoned by a panicking thread.
    #[error("binding registry mutex poisoned")]
    MutexPoisoned,
}

impl<T> From<PoisonError<T>> for BindError {
    fn from(_: PoisonError<T>) -> Self {
        BindError::MutexPoisoned
    }
}

/// Errors raised when invoking a member on a bound instance.
#[derive(Error, Debug)]
pub enum CallError {
    /// The method is virtual/abstract, or the engine resolved no native
    /// method-bind for it. Construction of the bound type succeeds; only
    /// invocation fails.
    #[error("method `{class}.{method}` is virtual and has no native implementation")]
    UnimplementedVirtual { class: String, method: String },

    /// Supplied arguments do not match the declared signature. Raised before
    /// the native call; an invalid pointer call corrupts the native stack.
    #[error("argument mismatch calling `{class}.{method}`: {detail}")]
    ArgumentMismatch {
        class: String,
        method: String,
        detail: String,
    },

    /// No method with this name anywhere in the class chain.
    #[error("no method `{method}` on class `{class}`")]
    UnknownMethod { class: String, method: String },

    /// No property with this name anywhere in the class chain.
    #[error("no property `{property}` on class `{class}`")]
    UnknownProperty { class: String, property: String },

    /// A property write did not match the declared property kind.
    #[error(
        "property `{class}.{property}` expects {expected:?}, got {got:?}"
    )]
    PropertyKindMismatch {
        class: String,
        property: String,
        expected: VariantKind,
        got: VariantKind,
    },

    /// The class has no native default constructor.
    #[error("class `{class}` is not constructible")]
    NotConstructible { class: String },

    /// The gateway reported a failure during the native call.
    #[error("engine call failed: {0}")]
    Engine(String),
}
