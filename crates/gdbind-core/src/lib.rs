//! Core contracts and value types for the gdbind binding layer.
//!
//! This crate defines everything the dynamic binding engine in
//! `gdbind-registry` consumes but does not own:
//!
//! - [`EngineApi`] - the gateway contract to the host engine's C ABI
//! - [`ObjectHandle`], [`MethodBind`], [`ClassConstructor`] - opaque native
//!   handles
//! - [`Variant`] / [`VariantKind`] - the typed value union crossing the
//!   gateway boundary
//! - [`MethodInfo`], [`PropertyInfo`], [`ArgInfo`] - decoded class metadata
//! - [`BindError`] / [`CallError`] - the error taxonomy
//!
//! The production gateway implementation lives on the engine side; this crate
//! only carries the contract, so everything here is engine-agnostic and
//! testable with an in-memory engine.

pub mod api;
pub mod class_id;
pub mod error;
pub mod flags;
pub mod handle;
pub mod info;
pub mod variant;
pub mod vector2;

pub use api::EngineApi;
pub use class_id::ClassId;
pub use error::{BindError, BindResult, CallError, CallResult};
pub use flags::MethodFlags;
pub use handle::{ClassConstructor, MethodBind, ObjectHandle};
pub use info::{ArgInfo, MethodInfo, PropertyInfo};
pub use variant::{FromVariant, ToVariant, Variant, VariantKind};
pub use vector2::Vector2;
