//! Class metadata reader.
//!
//! `ClassDb` answers metadata queries against the engine's live class
//! registry. It is itself a consumer of the binding machinery's lowest
//! layer: the class database is an engine singleton, and every query here is
//! an ordinary pointer call through one of six method-binds resolved once at
//! construction.
//!
//! Results are never cached by this component; the synthesizer queries the
//! one class it is materializing and drops the descriptors afterwards.
//!
//! A query for a class name the engine does not know returns empty
//! collections, exactly like a real class with no members. That asymmetry is
//! the engine's, not ours; callers must treat the two identically.

use std::sync::Arc;

use gdbind_core::{
    BindError, BindResult, EngineApi, MethodBind, MethodInfo, ObjectHandle, PropertyInfo, Variant,
    VariantKind,
};

/// Public service name of the class database singleton.
const CLASS_DB_SINGLETON: &str = "ClassDB";
/// Engine-internal class name its method-binds resolve under.
const CLASS_DB_CLASS: &str = "_ClassDB";

/// Read-only view of the engine's class registry.
pub struct ClassDb {
    api: Arc<dyn EngineApi>,
    instance: ObjectHandle,
    get_class_list: MethodBind,
    get_method_list: MethodBind,
    get_property_list: MethodBind,
    get_integer_constant_list: MethodBind,
    get_integer_constant: MethodBind,
    get_parent_class: MethodBind,
}

impl ClassDb {
    /// Resolve the class database singleton and its introspection binds.
    pub fn new(api: Arc<dyn EngineApi>) -> BindResult<Self> {
        let instance = api
            .global_singleton(CLASS_DB_SINGLETON)
            .ok_or_else(|| BindError::MissingSingleton(CLASS_DB_SINGLETON.to_string()))?;

        let bind = |method: &str| {
            api.method_bind(CLASS_DB_CLASS, method)
                .ok_or_else(|| BindError::MissingMethodBind {
                    class: CLASS_DB_CLASS.to_string(),
                    method: method.to_string(),
                })
        };

        let get_class_list = bind("get_class_list")?;
        let get_method_list = bind("class_get_method_list")?;
        let get_property_list = bind("class_get_property_list")?;
        let get_integer_constant_list = bind("class_get_integer_constant_list")?;
        let get_integer_constant = bind("class_get_integer_constant")?;
        let get_parent_class = bind("get_parent_class")?;

        Ok(Self {
            api,
            instance,
            get_class_list,
            get_method_list,
            get_property_list,
            get_integer_constant_list,
            get_integer_constant,
            get_parent_class,
        })
    }

    /// All class names known to the engine, in engine order (unordered with
    /// respect to the hierarchy).
    pub fn class_list(&self) -> BindResult<Vec<String>> {
        let ret = self.api.ptrcall(
            self.get_class_list,
            self.instance,
            &[],
            VariantKind::StringArray,
        )?;
        expect_string_array(ret)
    }

    /// The immediate parent of a class, or `None` for root classes.
    pub fn parent_class(&self, class: &str) -> BindResult<Option<String>> {
        let ret = self.api.ptrcall(
            self.get_parent_class,
            self.instance,
            &[Variant::Str(class.to_string())],
            VariantKind::String,
        )?;
        let parent = expect_string(ret)?;
        Ok(if parent.is_empty() { None } else { Some(parent) })
    }

    /// All methods declared directly on a class.
    pub fn class_methods(&self, class: &str) -> BindResult<Vec<MethodInfo>> {
        // Second argument: report only the class's own members, not inherited
        // ones. Inheritance is reconstructed through the parent chain.
        let ret = self.api.ptrcall(
            self.get_method_list,
            self.instance,
            &[Variant::Str(class.to_string()), Variant::Bool(true)],
            VariantKind::Array,
        )?;
        expect_array(ret)?
            .iter()
            .map(MethodInfo::from_dictionary)
            .collect()
    }

    /// All properties declared directly on a class.
    pub fn class_properties(&self, class: &str) -> BindResult<Vec<PropertyInfo>> {
        let ret = self.api.ptrcall(
            self.get_property_list,
            self.instance,
            &[Variant::Str(class.to_string()), Variant::Bool(true)],
            VariantKind::Array,
        )?;
        expect_array(ret)?
            .iter()
            .map(PropertyInfo::from_dictionary)
            .collect()
    }

    /// All integer constants of a class, with their values.
    pub fn class_constants(&self, class: &str) -> BindResult<Vec<(String, i64)>> {
        let ret = self.api.ptrcall(
            self.get_integer_constant_list,
            self.instance,
            &[Variant::Str(class.to_string()), Variant::Bool(true)],
            VariantKind::StringArray,
        )?;
        let names = expect_string_array(ret)?;

        let mut constants = Vec::with_capacity(names.len());
        for name in names {
            let value = self.integer_constant(class, &name)?;
            constants.push((name, value));
        }
        Ok(constants)
    }

    /// The value of a single integer constant.
    pub fn integer_constant(&self, class: &str, constant: &str) -> BindResult<i64> {
        let ret = self.api.ptrcall(
            self.get_integer_constant,
            self.instance,
            &[
                Variant::Str(class.to_string()),
                Variant::Str(constant.to_string()),
            ],
            VariantKind::Int,
        )?;
        expect_int(ret)
    }
}

fn expect_string_array(value: Variant) -> BindResult<Vec<String>> {
    match value {
        Variant::StringArray(items) => Ok(items),
        other => Err(shape_error("string array", &other)),
    }
}

fn expect_array(value: Variant) -> BindResult<Vec<Variant>> {
    match value {
        Variant::Array(items) => Ok(items),
        other => Err(shape_error("array", &other)),
    }
}

fn expect_string(value: Variant) -> BindResult<String> {
    match value {
        Variant::Str(s) => Ok(s),
        other => Err(shape_error("string", &other)),
    }
}

fn expect_int(value: Variant) -> BindResult<i64> {
    match value {
        Variant::Int(i) => Ok(i),
        other => Err(shape_error("int", &other)),
    }
}

fn shape_error(expected: &str, got: &Variant) -> BindError {
    BindError::EngineCall(format!("expected {expected}, got {:?}", got.kind()))
}
