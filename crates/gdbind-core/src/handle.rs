//! Opaque native handle types.
//!
//! The engine owns every object these handles refer to. A handle is just an
//! address with identity semantics: two handles are equal when they point at
//! the same native object, and that is the only equality the binding layer
//! ever relies on.

use std::ffi::c_void;
use std::fmt;

/// Handle to a native engine object instance.
///
/// Non-owning by default. The wrapper that performed the native construction
/// (see `Instance` in `gdbind-registry`) is the only party allowed to free it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    ptr: *mut c_void,
}

impl ObjectHandle {
    /// Wrap a raw native object pointer.
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self { ptr }
    }

    /// The null handle.
    pub fn null() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
        }
    }

    /// Check whether this is the null handle.
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Get the raw pointer for crossing the gateway boundary.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHandle({:p})", self.ptr)
    }
}

// Handles are plain addresses that the binding layer never dereferences; all
// native access goes through the gateway, which is externally synchronized.
unsafe impl Send for ObjectHandle {}
unsafe impl Sync for ObjectHandle {}

/// Handle to a single callable engine method, resolved by (class, method).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodBind {
    ptr: *mut c_void,
}

impl MethodBind {
    /// Wrap a raw method-bind pointer.
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self { ptr }
    }

    /// Get the raw pointer for crossing the gateway boundary.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }
}

impl fmt::Debug for MethodBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodBind({:p})", self.ptr)
    }
}

unsafe impl Send for MethodBind {}
unsafe impl Sync for MethodBind {}

/// Handle to a class's native default constructor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassConstructor {
    ptr: *mut c_void,
}

impl ClassConstructor {
    /// Wrap a raw constructor pointer.
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self { ptr }
    }

    /// Get the raw pointer for crossing the gateway boundary.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }
}

impl fmt::Debug for ClassConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassConstructor({:p})", self.ptr)
    }
}

unsafe impl Send for ClassConstructor {}
unsafe impl Sync for ClassConstructor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_equality_is_address_equality() {
        let a = ObjectHandle::from_raw(0x1000 as *mut _);
        let b = ObjectHandle::from_raw(0x1000 as *mut _);
        let c = ObjectHandle::from_raw(0x2000 as *mut _);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn null_handle() {
        assert!(ObjectHandle::null().is_null());
        assert!(!ObjectHandle::from_raw(0x1000 as *mut _).is_null());
    }
}
