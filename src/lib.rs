//! gdbind - dynamic engine-class bindings for an embedded scripting runtime.
//!
//! This is the facade crate: it re-exports the gateway contract and value
//! types from `gdbind-core` and the binding engine from `gdbind-registry`.
//! The offline header tool lives in `gdbind-cdefgen` and is not re-exported;
//! it is a build-step binary, not a runtime dependency.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use gdbind::prelude::*;
//!
//! let api: Arc<dyn EngineApi> = host_engine_gateway();
//! let bindings = Bindings::new(api)?;
//!
//! // Listing never forces resolution.
//! for name in bindings.names() {
//!     println!("{name}");
//! }
//!
//! // First resolution synthesizes (parent chain first) and caches.
//! let node = bindings.resolve("Node")?;
//! let class = node.as_class().unwrap().clone();
//! let instance = Instance::new(class)?;
//! instance.call("set_name", &[Variant::Str("root".into())])?;
//! ```

pub use gdbind_core as core;
pub use gdbind_registry as registry;

pub mod prelude {
    pub use gdbind_core::{
        ArgInfo, BindError, BindResult, CallError, CallResult, ClassId, EngineApi, FromVariant,
        MethodBind, MethodFlags, MethodInfo, ObjectHandle, PropertyInfo, ToVariant, Variant,
        VariantKind, Vector2,
    };
    pub use gdbind_registry::{Binding, Bindings, BoundClass, ClassDb, Instance};
}
