//! Bound instance wrapper.
//!
//! An [`Instance`] pairs one native object handle with the bound type that
//! knows how to dispatch on it. Equality between two instances is handle
//! equality, never wrapper identity: two wrappers around the same native
//! object compare equal, a wrapper never equals anything else.
//!
//! Ownership follows the construction path. [`Instance::new`] constructs a
//! fresh native object and frees it on drop; [`Instance::from_handle`] wraps
//! an engine-owned handle and never frees it.

use std::sync::Arc;

use gdbind_core::{CallError, CallResult, ObjectHandle, Variant};

use crate::bound_class::BoundClass;

/// One native engine object, viewed through its bound type.
#[derive(Debug)]
pub struct Instance {
    class: Arc<BoundClass>,
    handle: ObjectHandle,
    owned: bool,
}

impl Instance {
    /// Construct a fresh native instance of `class`. The wrapper owns the
    /// native object and frees it on drop.
    pub fn new(class: Arc<BoundClass>) -> CallResult<Self> {
        let constructor = class.constructor().ok_or_else(|| CallError::NotConstructible {
            class: class.class_name().to_string(),
        })?;
        let handle = class
            .api()
            .construct(constructor)
            .map_err(|e| CallError::Engine(e.to_string()))?;
        Ok(Self {
            class,
            handle,
            owned: true,
        })
    }

    /// Wrap an existing engine-owned handle. The wrapper never frees it.
    pub fn from_handle(class: Arc<BoundClass>, handle: ObjectHandle) -> Self {
        Self {
            class,
            handle,
            owned: false,
        }
    }

    /// The wrapped native handle.
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    /// The bound type of this instance.
    pub fn class(&self) -> &Arc<BoundClass> {
        &self.class
    }

    /// Whether this wrapper owns (and will free) the native object.
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Invoke a method, validating arguments against the declared signature.
    pub fn call(&self, method: &str, args: &[Variant]) -> CallResult<Variant> {
        self.class.call(self.handle, method, args)
    }

    /// Read a property.
    pub fn get(&self, property: &str) -> CallResult<Variant> {
        self.class.get_property(self.handle, property)
    }

    /// Write a property.
    pub fn set(&self, property: &str, value: Variant) -> CallResult<()> {
        self.class.set_property(self.handle, property, value)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Instance {}

impl Drop for Instance {
    fn drop(&mut self) {
        if self.owned {
            self.class.api().free_object(self.handle);
        }
    }
}
