//! Engine method flags.

use bitflags::bitflags;

bitflags! {
    /// Flag bits the engine attaches to each method descriptor.
    ///
    /// Values mirror the engine's `METHOD_FLAG_*` constants. The one the
    /// binding layer acts on is [`VIRTUAL`](MethodFlags::VIRTUAL): virtual
    /// methods have no native method-bind and must fail at call time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodFlags: u32 {
        const NORMAL      = 1;
        const EDITOR      = 1 << 1;
        const NOSCRIPT    = 1 << 2;
        const CONST       = 1 << 3;
        const REVERSE     = 1 << 4;
        const VIRTUAL     = 1 << 5;
        const FROM_SCRIPT = 1 << 6;
        const VARARG      = 1 << 7;
    }
}

impl MethodFlags {
    /// Decode the raw flag word from a method descriptor.
    ///
    /// Unknown bits are dropped; the engine is free to grow new flags without
    /// breaking the binding layer.
    pub fn from_raw(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }

    /// Whether the method is marked virtual/abstract.
    pub fn is_virtual(&self) -> bool {
        self.contains(MethodFlags::VIRTUAL)
    }
}

impl Default for MethodFlags {
    fn default() -> Self {
        MethodFlags::NORMAL
    }
}
