//! Decoded class metadata descriptors.
//!
//! The engine reports methods and properties as dictionaries. These structs
//! are the decoded, typed form the proxy synthesizer consumes; decoding
//! failures are [`BindError::EngineCall`] because they mean the engine spoke
//! a shape we do not understand, not that the caller did anything wrong.

use crate::error::{BindError, BindResult};
use crate::flags::MethodFlags;
use crate::variant::{Variant, VariantKind};

/// One declared method argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgInfo {
    pub name: String,
    pub kind: VariantKind,
}

/// One engine method, as reported by the class database.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    pub name: String,
    pub flags: MethodFlags,
    pub args: Vec<ArgInfo>,
    pub return_kind: VariantKind,
}

impl MethodInfo {
    /// Whether the descriptor carries the virtual/abstract marker.
    pub fn is_virtual(&self) -> bool {
        self.flags.is_virtual()
    }

    /// Decode a method descriptor from the engine's dictionary form.
    ///
    /// Expected entries: `name` (string), `flags` (int), `args` (array of
    /// `{name, type}` dictionaries), and optionally `return` (`{type}`
    /// dictionary; absent means no return value).
    pub fn from_dictionary(dict: &Variant) -> BindResult<Self> {
        let name = dict
            .dict_get("name")
            .and_then(|v| v.get_as::<String>())
            .ok_or_else(|| malformed("method descriptor without a name"))?;

        let flags = dict
            .dict_get("flags")
            .and_then(|v| v.get_as::<i64>())
            .map(|raw| MethodFlags::from_raw(raw as u32))
            .ok_or_else(|| malformed("method descriptor without flags"))?;

        let args = match dict.dict_get("args") {
            Some(Variant::Array(entries)) => entries
                .iter()
                .map(ArgInfo::from_dictionary)
                .collect::<BindResult<Vec<_>>>()?,
            Some(_) => return Err(malformed("method args is not an array")),
            None => Vec::new(),
        };

        let return_kind = match dict.dict_get("return") {
            Some(ret) => decode_kind(ret.dict_get("type"))?,
            None => VariantKind::Nil,
        };

        Ok(Self {
            name,
            flags,
            args,
            return_kind,
        })
    }
}

impl ArgInfo {
    fn from_dictionary(dict: &Variant) -> BindResult<Self> {
        let name = dict
            .dict_get("name")
            .and_then(|v| v.get_as::<String>())
            .ok_or_else(|| malformed("argument descriptor without a name"))?;
        let kind = decode_kind(dict.dict_get("type"))?;
        Ok(Self { name, kind })
    }
}

/// One engine property, as reported by the class database. Getter/setter
/// presence is implied by the engine; access goes through named property
/// lookup on the receiving object.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    pub kind: VariantKind,
}

impl PropertyInfo {
    /// Decode a property descriptor from the engine's dictionary form.
    pub fn from_dictionary(dict: &Variant) -> BindResult<Self> {
        let name = dict
            .dict_get("name")
            .and_then(|v| v.get_as::<String>())
            .ok_or_else(|| malformed("property descriptor without a name"))?;
        let kind = decode_kind(dict.dict_get("type"))?;
        Ok(Self { name, kind })
    }
}

fn decode_kind(tag: Option<&Variant>) -> BindResult<VariantKind> {
    let raw = tag
        .and_then(|v| v.get_as::<i64>())
        .ok_or_else(|| malformed("descriptor without a type tag"))?;
    u32::try_from(raw)
        .ok()
        .and_then(|raw| VariantKind::try_from(raw).ok())
        .ok_or_else(|| malformed(&format!("unsupported type tag {raw}")))
}

fn malformed(detail: &str) -> BindError {
    BindError::EngineCall(detail.to_string())
}
