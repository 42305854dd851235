//! Typed value union for crossing the gateway boundary.
//!
//! The engine's pointer-call primitive is untyped at the C level; on the Rust
//! side every argument and return slot travels as a [`Variant`] so the
//! binding layer can validate a call against its declared signature before
//! the native call happens. A bad pointer call is not a recoverable error,
//! it corrupts the native stack, so this validation is the correctness
//! boundary for the whole process.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::handle::ObjectHandle;
use crate::vector2::Vector2;

/// The engine's integer type tags, as reported in method and property
/// descriptors.
///
/// Only the tags the binding layer marshals are listed; anything else decodes
/// to an error at descriptor-decoding time rather than at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum VariantKind {
    Nil = 0,
    Bool = 1,
    Int = 2,
    Real = 3,
    String = 4,
    Vector2 = 5,
    Object = 17,
    Dictionary = 18,
    Array = 19,
    StringArray = 23,
}

/// A single engine value.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Nil,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    Vector2(Vector2),
    Object(ObjectHandle),
    /// Engine dictionaries keep insertion order; so do we.
    Dictionary(Vec<(String, Variant)>),
    Array(Vec<Variant>),
    StringArray(Vec<String>),
}

impl Variant {
    /// The type tag of this value.
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Nil => VariantKind::Nil,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::Int(_) => VariantKind::Int,
            Variant::Real(_) => VariantKind::Real,
            Variant::Str(_) => VariantKind::String,
            Variant::Vector2(_) => VariantKind::Vector2,
            Variant::Object(_) => VariantKind::Object,
            Variant::Dictionary(_) => VariantKind::Dictionary,
            Variant::Array(_) => VariantKind::Array,
            Variant::StringArray(_) => VariantKind::StringArray,
        }
    }

    /// Check whether this value may be passed where `declared` is expected.
    ///
    /// Exact kind match, with two widenings: an `Int` is accepted for a
    /// declared `Real`, and `Nil` is accepted for a declared `Object` (the
    /// null handle).
    pub fn conforms_to(&self, declared: VariantKind) -> bool {
        match (self.kind(), declared) {
            (got, want) if got == want => true,
            (VariantKind::Int, VariantKind::Real) => true,
            (VariantKind::Nil, VariantKind::Object) => true,
            _ => false,
        }
    }

    /// Look up a dictionary entry by key. Returns `None` for non-dictionaries.
    pub fn dict_get(&self, key: &str) -> Option<&Variant> {
        match self {
            Variant::Dictionary(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Convert to a concrete Rust type.
    pub fn get_as<T: FromVariant>(&self) -> Option<T> {
        T::from_variant(self)
    }
}

/// Conversion from a [`Variant`] to a concrete Rust type.
pub trait FromVariant: Sized {
    fn from_variant(value: &Variant) -> Option<Self>;
}

/// Conversion from a concrete Rust type into a [`Variant`].
pub trait ToVariant {
    fn to_variant(&self) -> Variant;
}

impl FromVariant for bool {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromVariant for i64 {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromVariant for f64 {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Real(r) => Some(*r),
            Variant::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromVariant for String {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromVariant for Vector2 {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Vector2(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromVariant for ObjectHandle {
    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Object(h) => Some(*h),
            Variant::Nil => Some(ObjectHandle::null()),
            _ => None,
        }
    }
}

impl ToVariant for bool {
    fn to_variant(&self) -> Variant {
        Variant::Bool(*self)
    }
}

impl ToVariant for i64 {
    fn to_variant(&self) -> Variant {
        Variant::Int(*self)
    }
}

impl ToVariant for f64 {
    fn to_variant(&self) -> Variant {
        Variant::Real(*self)
    }
}

impl ToVariant for &str {
    fn to_variant(&self) -> Variant {
        Variant::Str((*self).to_string())
    }
}

impl ToVariant for String {
    fn to_variant(&self) -> Variant {
        Variant::Str(self.clone())
    }
}

impl ToVariant for Vector2 {
    fn to_variant(&self) -> Variant {
        Variant::Vector2(*self)
    }
}

impl ToVariant for ObjectHandle {
    fn to_variant(&self) -> Variant {
        Variant::Object(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        assert_eq!(VariantKind::try_from(2u32), Ok(VariantKind::Int));
        assert_eq!(VariantKind::try_from(23u32), Ok(VariantKind::StringArray));
        assert!(VariantKind::try_from(99u32).is_err());
        assert_eq!(u32::from(VariantKind::Object), 17);
    }

    #[test]
    fn conforms_exact() {
        assert!(Variant::Int(1).conforms_to(VariantKind::Int));
        assert!(Variant::Str("x".into()).conforms_to(VariantKind::String));
        assert!(!Variant::Bool(true).conforms_to(VariantKind::Int));
    }

    #[test]
    fn conforms_widens_int_to_real() {
        assert!(Variant::Int(3).conforms_to(VariantKind::Real));
        assert!(!Variant::Real(3.0).conforms_to(VariantKind::Int));
    }

    #[test]
    fn conforms_widens_nil_to_object() {
        assert!(Variant::Nil.conforms_to(VariantKind::Object));
        assert!(!Variant::Nil.conforms_to(VariantKind::Int));
    }

    #[test]
    fn dict_get_finds_entries() {
        let dict = Variant::Dictionary(vec![
            ("name".into(), Variant::Str("walk".into())),
            ("flags".into(), Variant::Int(1)),
        ]);

        assert_eq!(dict.dict_get("flags"), Some(&Variant::Int(1)));
        assert_eq!(dict.dict_get("missing"), None);
        assert_eq!(Variant::Nil.dict_get("name"), None);
    }

    #[test]
    fn primitive_conversions() {
        assert_eq!(Variant::Int(7).get_as::<i64>(), Some(7));
        assert_eq!(Variant::Int(7).get_as::<f64>(), Some(7.0));
        assert_eq!(Variant::Str("hi".into()).get_as::<String>(), Some("hi".into()));
        assert_eq!(Variant::Nil.get_as::<ObjectHandle>(), Some(ObjectHandle::null()));
        assert_eq!(Variant::Bool(true).get_as::<i64>(), None);
    }
}
