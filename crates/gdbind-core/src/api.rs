//! The gateway contract to the host engine's C ABI.
//!
//! The engine side of this boundary is a fixed external collaborator; the
//! binding layer only consumes it. Everything the dynamic binding engine ever
//! asks of the engine goes through [`EngineApi`]: singleton lookup,
//! method-bind lookup, pointer calls, construction/destruction, and named
//! property access.
//!
//! Arguments and returns cross this boundary as typed [`Variant`]s rather
//! than raw pointer arrays; the implementation owns the conversion to the
//! native calling convention. Callers are expected to have validated the
//! argument list against the declared signature first - the implementation
//! may assume a well-formed call.

use crate::error::BindResult;
use crate::handle::{ClassConstructor, MethodBind, ObjectHandle};
use crate::variant::{Variant, VariantKind};

/// Access point to the host engine's C ABI.
pub trait EngineApi: Send + Sync {
    /// Look up a global engine singleton by its public service name.
    fn global_singleton(&self, name: &str) -> Option<ObjectHandle>;

    /// Resolve the callable handle for `(class, method)`, or `None` when the
    /// engine has no native implementation (virtual/abstract methods).
    fn method_bind(&self, class: &str, method: &str) -> Option<MethodBind>;

    /// Invoke a method-bind against a receiver.
    ///
    /// `return_kind` declares the type of the pre-allocated return slot; the
    /// returned variant always carries that kind (or `Nil`).
    fn ptrcall(
        &self,
        bind: MethodBind,
        receiver: ObjectHandle,
        args: &[Variant],
        return_kind: VariantKind,
    ) -> BindResult<Variant>;

    /// Look up the native default constructor for a class.
    fn class_constructor(&self, class: &str) -> Option<ClassConstructor>;

    /// Construct a fresh native instance. The caller becomes the owner and
    /// must eventually pass the handle to [`free_object`](Self::free_object).
    fn construct(&self, constructor: ClassConstructor) -> BindResult<ObjectHandle>;

    /// Destroy a native instance previously obtained from
    /// [`construct`](Self::construct). Never called for borrowed handles.
    fn free_object(&self, handle: ObjectHandle);

    /// Read a named property from a native object.
    fn get_property(&self, receiver: ObjectHandle, name: &str) -> BindResult<Variant>;

    /// Write a named property on a native object.
    fn set_property(&self, receiver: ObjectHandle, name: &str, value: Variant) -> BindResult<()>;
}
