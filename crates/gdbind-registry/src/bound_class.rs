//! Proxy synthesis: building a callable bound type for one engine class.
//!
//! A [`BoundClass`] is the runtime-constructed type object for one engine
//! class: a method table of trampolines, a property table, a table of
//! constants baked at synthesis time, and a pointer to the already-resolved
//! parent type. Dispatch is capability-based - member lookup walks the class
//! and then its parent chain.
//!
//! Synthesizing a type never constructs a native instance; instantiation is
//! a separate, explicit step on [`Instance`](crate::Instance).

use std::sync::Arc;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use gdbind_core::{
    ArgInfo, BindResult, CallError, CallResult, ClassConstructor, ClassId, EngineApi, MethodBind,
    ObjectHandle, PropertyInfo, Variant, VariantKind,
};

use crate::class_db::ClassDb;

/// How a synthesized method dispatches.
#[derive(Debug, Clone)]
pub enum MethodKind {
    /// A real native method: marshal arguments, pointer-call, marshal return.
    Callable {
        bind: MethodBind,
        args: Vec<ArgInfo>,
        return_kind: VariantKind,
    },
    /// The descriptor is flagged virtual, or no native method-bind resolved.
    /// Constructing the type succeeded; every invocation fails.
    UnimplementedVirtual,
}

/// One entry in a bound type's method table.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    pub name: String,
    pub kind: MethodKind,
}

impl BoundMethod {
    /// Whether invoking this method can ever reach the engine.
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, MethodKind::Callable { .. })
    }
}

/// Runtime-constructed type object for one engine class.
///
/// Exactly one `Arc<BoundClass>` exists per registered public name for the
/// lifetime of the process; the registry enforces that.
pub struct BoundClass {
    api: Arc<dyn EngineApi>,
    binding_name: String,
    class_name: String,
    class_id: ClassId,
    parent: Option<Arc<BoundClass>>,
    constructor: Option<ClassConstructor>,
    methods: FxHashMap<String, BoundMethod>,
    properties: FxHashMap<String, PropertyInfo>,
    constants: FxHashMap<String, i64>,
}

impl BoundClass {
    /// Build the bound type for `class_name`, registered publicly as
    /// `binding_name`, with its parent type already resolved.
    ///
    /// Constants are fetched here, once, and never re-queried. Method-binds
    /// are resolved here so call sites pay no lookup cost.
    pub fn synthesize(
        api: Arc<dyn EngineApi>,
        db: &ClassDb,
        class_name: &str,
        binding_name: &str,
        parent: Option<Arc<BoundClass>>,
    ) -> BindResult<Self> {
        debug!("binding class `{class_name}` as `{binding_name}`");

        let mut methods = FxHashMap::default();
        for info in db.class_methods(class_name)? {
            let kind = if info.is_virtual() {
                MethodKind::UnimplementedVirtual
            } else if let Some(bind) = api.method_bind(class_name, &info.name) {
                MethodKind::Callable {
                    bind,
                    args: info.args,
                    return_kind: info.return_kind,
                }
            } else {
                // No native bind even though the flags say non-virtual;
                // treated exactly like a virtual.
                MethodKind::UnimplementedVirtual
            };
            trace!("  method {}", info.name);
            methods.insert(info.name.clone(), BoundMethod { name: info.name, kind });
        }

        let mut properties = FxHashMap::default();
        for info in db.class_properties(class_name)? {
            trace!("  property {}", info.name);
            properties.insert(info.name.clone(), info);
        }

        let mut constants = FxHashMap::default();
        for (name, value) in db.class_constants(class_name)? {
            trace!("  constant {name} = {value}");
            constants.insert(name, value);
        }

        let constructor = api.class_constructor(class_name);

        Ok(Self {
            api,
            binding_name: binding_name.to_string(),
            class_name: class_name.to_string(),
            class_id: ClassId::from_name(class_name),
            parent,
            constructor,
            methods,
            properties,
            constants,
        })
    }

    /// Public name this type is registered under.
    pub fn name(&self) -> &str {
        &self.binding_name
    }

    /// Engine class name this type binds.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Deterministic identity hash of the engine class name.
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// The parent bound type, `None` for root classes.
    pub fn parent(&self) -> Option<&Arc<BoundClass>> {
        self.parent.as_ref()
    }

    /// Whether fresh instances of this class can be constructed.
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<ClassConstructor> {
        self.constructor
    }

    pub(crate) fn api(&self) -> &Arc<dyn EngineApi> {
        &self.api
    }

    /// Look up a method in this class or its parent chain.
    pub fn method(&self, name: &str) -> Option<&BoundMethod> {
        self.find_method(name).map(|(_, m)| m)
    }

    /// Look up a property in this class or its parent chain.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.chain().find_map(|class| class.properties.get(name))
    }

    /// Look up a constant in this class or its parent chain.
    pub fn constant(&self, name: &str) -> Option<i64> {
        self.chain()
            .find_map(|class| class.constants.get(name))
            .copied()
    }

    /// Names of the constants declared directly on this class.
    pub fn own_constants(&self) -> impl Iterator<Item = (&str, i64)> {
        self.constants.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// This class followed by its ancestors, nearest first.
    fn chain(&self) -> impl Iterator<Item = &BoundClass> {
        std::iter::successors(Some(self), |class| class.parent.as_deref())
    }

    fn find_method(&self, name: &str) -> Option<(&BoundClass, &BoundMethod)> {
        self.chain()
            .find_map(|class| class.methods.get(name).map(|m| (class, m)))
    }

    /// Invoke a method against a receiver handle.
    ///
    /// The argument list is validated against the declared signature before
    /// anything crosses the gateway; a malformed pointer call is fatal to the
    /// process, so it must never be issued.
    pub(crate) fn call(
        &self,
        receiver: ObjectHandle,
        method: &str,
        args: &[Variant],
    ) -> CallResult<Variant> {
        let Some((owner, bound)) = self.find_method(method) else {
            return Err(CallError::UnknownMethod {
                class: self.class_name.clone(),
                method: method.to_string(),
            });
        };

        match &bound.kind {
            MethodKind::UnimplementedVirtual => Err(CallError::UnimplementedVirtual {
                class: owner.class_name.clone(),
                method: method.to_string(),
            }),
            MethodKind::Callable {
                bind,
                args: declared,
                return_kind,
            } => {
                self.check_args(owner, method, declared, args)?;
                self.api
                    .ptrcall(*bind, receiver, args, *return_kind)
                    .map_err(|e| CallError::Engine(e.to_string()))
            }
        }
    }

    fn check_args(
        &self,
        owner: &BoundClass,
        method: &str,
        declared: &[ArgInfo],
        supplied: &[Variant],
    ) -> CallResult<()> {
        let mismatch = |detail: String| CallError::ArgumentMismatch {
            class: owner.class_name.clone(),
            method: method.to_string(),
            detail,
        };

        if supplied.len() != declared.len() {
            return Err(mismatch(format!(
                "expected {} arguments, got {}",
                declared.len(),
                supplied.len()
            )));
        }
        for (arg, decl) in supplied.iter().zip(declared) {
            if !arg.conforms_to(decl.kind) {
                return Err(mismatch(format!(
                    "argument `{}` expects {:?}, got {:?}",
                    decl.name,
                    decl.kind,
                    arg.kind()
                )));
            }
        }
        Ok(())
    }

    /// Read a property from a receiver handle.
    pub(crate) fn get_property(&self, receiver: ObjectHandle, name: &str) -> CallResult<Variant> {
        if self.property(name).is_none() {
            return Err(CallError::UnknownProperty {
                class: self.class_name.clone(),
                property: name.to_string(),
            });
        }
        self.api
            .get_property(receiver, name)
            .map_err(|e| CallError::Engine(e.to_string()))
    }

    /// Write a property on a receiver handle, validating the declared kind.
    pub(crate) fn set_property(
        &self,
        receiver: ObjectHandle,
        name: &str,
        value: Variant,
    ) -> CallResult<()> {
        let Some(info) = self.property(name) else {
            return Err(CallError::UnknownProperty {
                class: self.class_name.clone(),
                property: name.to_string(),
            });
        };
        if !value.conforms_to(info.kind) {
            return Err(CallError::PropertyKindMismatch {
                class: self.class_name.clone(),
                property: name.to_string(),
                expected: info.kind,
                got: value.kind(),
            });
        }
        self.api
            .set_property(receiver, name, value)
            .map_err(|e| CallError::Engine(e.to_string()))
    }
}

impl std::fmt::Debug for BoundClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundClass")
            .field("name", &self.binding_name)
            .field("class_name", &self.class_name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("methods", &self.methods.len())
            .field("properties", &self.properties.len())
            .field("constants", &self.constants.len())
            .finish()
    }
}
