//! Deterministic hash-based class identity.
//!
//! A [`ClassId`] is a 64-bit xxh64 hash of the class name mixed with a
//! domain constant. Hashes are computed deterministically from names, so an
//! id can be derived before the class is ever materialized and two runs of
//! the same engine produce the same ids.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain constant mixed into class-name hashes so they can never collide
/// with other hash families the process might use.
const CLASS_DOMAIN: u64 = 0x6b1d_93fa_27c4_e805;

/// A deterministic 64-bit hash identifying one engine class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u64);

impl ClassId {
    /// Compute the id for a class name.
    pub fn from_name(name: &str) -> Self {
        Self(xxh64(name.as_bytes(), CLASS_DOMAIN))
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({:#018x})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(ClassId::from_name("Node"), ClassId::from_name("Node"));
    }

    #[test]
    fn distinct_names_distinct_ids() {
        assert_ne!(ClassId::from_name("Node"), ClassId::from_name("Node2D"));
        assert_ne!(ClassId::from_name("Object"), ClassId::from_name("object"));
    }
}
