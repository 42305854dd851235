//! Shared in-memory engine for the integration tests.
//!
//! `MockEngine` implements the full gateway contract, including the class
//! database protocol: the binding layer resolves the `ClassDB` singleton and
//! issues pointer calls against its introspection method-binds exactly as it
//! would against a real engine. The mock also counts constant fetches,
//! records every user-method pointer call, and tracks construction/free so
//! tests can assert on side effects.

#![allow(dead_code)]

use std::ffi::c_void;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use gdbind::prelude::*;
use gdbind_core::ClassConstructor;

/// Fabricate a handle from a synthetic address. Never dereferenced.
pub fn handle(id: usize) -> ObjectHandle {
    ObjectHandle::from_raw(id as *mut c_void)
}

const CLASS_DB_HANDLE: usize = 1;

/// One scripted method on a mock class.
#[derive(Clone)]
pub struct MethodSpec {
    pub name: String,
    pub flags: u32,
    pub args: Vec<(String, VariantKind)>,
    pub return_kind: VariantKind,
    /// Value every pointer call to this method returns.
    pub result: Variant,
    /// Report the method in metadata but resolve no native bind for it.
    pub bindless: bool,
}

/// Build a normal callable method.
pub fn method(
    name: &str,
    args: &[(&str, VariantKind)],
    return_kind: VariantKind,
    result: Variant,
) -> MethodSpec {
    MethodSpec {
        name: name.to_string(),
        flags: 1, // METHOD_FLAG_NORMAL
        args: args.iter().map(|(n, k)| (n.to_string(), *k)).collect(),
        return_kind,
        result,
        bindless: false,
    }
}

/// Build a method flagged virtual.
pub fn virtual_method(name: &str) -> MethodSpec {
    MethodSpec {
        flags: 1 | 32, // NORMAL | VIRTUAL
        ..method(name, &[], VariantKind::Nil, Variant::Nil)
    }
}

/// Build a method with metadata but no native bind.
pub fn bindless_method(name: &str) -> MethodSpec {
    MethodSpec {
        bindless: true,
        ..method(name, &[], VariantKind::Nil, Variant::Nil)
    }
}

/// One scripted class in the mock engine's database.
#[derive(Clone)]
pub struct ClassSpec {
    pub name: String,
    pub parent: Option<String>,
    pub methods: Vec<MethodSpec>,
    pub properties: Vec<(String, VariantKind)>,
    pub constants: Vec<(String, i64)>,
    pub constructible: bool,
}

impl ClassSpec {
    pub fn new(name: &str, parent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            methods: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
            constructible: false,
        }
    }

    pub fn with_method(mut self, spec: MethodSpec) -> Self {
        self.methods.push(spec);
        self
    }

    pub fn with_property(mut self, name: &str, kind: VariantKind) -> Self {
        self.properties.push((name.to_string(), kind));
        self
    }

    pub fn with_constant(mut self, name: &str, value: i64) -> Self {
        self.constants.push((name.to_string(), value));
        self
    }

    pub fn constructible(mut self) -> Self {
        self.constructible = true;
        self
    }
}

/// What a synthetic method-bind address dispatches to.
#[derive(Clone)]
enum BindTarget {
    GetClassList,
    GetMethodList,
    GetPropertyList,
    GetConstantList,
    GetConstant,
    GetParentClass,
    UserMethod { class: String, method: String },
}

#[derive(Default)]
pub struct Counters {
    /// (class, constant) -> number of value fetches.
    pub constant_fetches: FxHashMap<(String, String), usize>,
    /// Every user-method pointer call, as (class, method).
    pub user_calls: Vec<(String, String)>,
    pub constructed: Vec<ObjectHandle>,
    pub freed: Vec<ObjectHandle>,
}

struct MockState {
    counters: Counters,
    properties: FxHashMap<(usize, String), Variant>,
    next_handle: usize,
}

pub struct MockEngine {
    classes: FxHashMap<String, ClassSpec>,
    /// Class-list order as built, so tests control the (unordered) input.
    class_order: Vec<String>,
    singletons: FxHashMap<String, ObjectHandle>,
    binds: FxHashMap<usize, BindTarget>,
    bind_ids: FxHashMap<(String, String), usize>,
    constructor_classes: FxHashMap<usize, String>,
    state: Mutex<MockState>,
}

pub struct MockEngineBuilder {
    classes: Vec<ClassSpec>,
    singletons: Vec<(String, usize)>,
}

impl MockEngineBuilder {
    pub fn class(mut self, spec: ClassSpec) -> Self {
        self.classes.push(spec);
        self
    }

    /// Register a global service under `name`, resolving to `handle(id)`.
    pub fn singleton(mut self, name: &str, id: usize) -> Self {
        self.singletons.push((name.to_string(), id));
        self
    }

    pub fn build(self) -> Arc<MockEngine> {
        let mut binds = FxHashMap::default();
        let mut bind_ids = FxHashMap::default();
        let mut next_bind = 100usize;

        let classdb = [
            ("get_class_list", BindTarget::GetClassList),
            ("class_get_method_list", BindTarget::GetMethodList),
            ("class_get_property_list", BindTarget::GetPropertyList),
            (
                "class_get_integer_constant_list",
                BindTarget::GetConstantList,
            ),
            ("class_get_integer_constant", BindTarget::GetConstant),
            ("get_parent_class", BindTarget::GetParentClass),
        ];
        for (name, target) in classdb {
            binds.insert(next_bind, target);
            bind_ids.insert(("_ClassDB".to_string(), name.to_string()), next_bind);
            next_bind += 1;
        }

        let mut constructor_classes = FxHashMap::default();
        let mut next_ctor = 10_000usize;
        for spec in &self.classes {
            for m in &spec.methods {
                if m.bindless {
                    continue;
                }
                binds.insert(
                    next_bind,
                    BindTarget::UserMethod {
                        class: spec.name.clone(),
                        method: m.name.clone(),
                    },
                );
                bind_ids.insert((spec.name.clone(), m.name.clone()), next_bind);
                next_bind += 1;
            }
            if spec.constructible {
                constructor_classes.insert(next_ctor, spec.name.clone());
                next_ctor += 1;
            }
        }

        let class_order: Vec<String> = self.classes.iter().map(|c| c.name.clone()).collect();
        let classes = self
            .classes
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();
        let singletons = self
            .singletons
            .into_iter()
            .map(|(name, id)| (name, handle(id)))
            .collect();

        Arc::new(MockEngine {
            classes,
            class_order,
            singletons,
            binds,
            bind_ids,
            constructor_classes,
            state: Mutex::new(MockState {
                counters: Counters::default(),
                properties: FxHashMap::default(),
                next_handle: 0x10_000,
            }),
        })
    }
}

impl MockEngine {
    pub fn builder() -> MockEngineBuilder {
        MockEngineBuilder {
            classes: Vec::new(),
            singletons: Vec::new(),
        }
    }

    /// Snapshot the side-effect counters.
    pub fn with_counters<R>(&self, f: impl FnOnce(&Counters) -> R) -> R {
        f(&self.state.lock().unwrap().counters)
    }

    pub fn constant_fetches(&self, class: &str, constant: &str) -> usize {
        self.with_counters(|c| {
            c.constant_fetches
                .get(&(class.to_string(), constant.to_string()))
                .copied()
                .unwrap_or(0)
        })
    }

    pub fn user_calls_to(&self, class: &str, method: &str) -> usize {
        self.with_counters(|c| {
            c.user_calls
                .iter()
                .filter(|(cl, m)| cl == class && m == method)
                .count()
        })
    }

    pub fn was_freed(&self, h: ObjectHandle) -> bool {
        self.with_counters(|c| c.freed.contains(&h))
    }

    fn spec_args_dict(args: &[(String, VariantKind)]) -> Variant {
        Variant::Array(
            args.iter()
                .map(|(name, kind)| {
                    Variant::Dictionary(vec![
                        ("name".to_string(), Variant::Str(name.clone())),
                        ("type".to_string(), Variant::Int(u32::from(*kind) as i64)),
                    ])
                })
                .collect(),
        )
    }

    fn method_dict(m: &MethodSpec) -> Variant {
        Variant::Dictionary(vec![
            ("name".to_string(), Variant::Str(m.name.clone())),
            ("flags".to_string(), Variant::Int(m.flags as i64)),
            ("args".to_string(), Self::spec_args_dict(&m.args)),
            (
                "return".to_string(),
                Variant::Dictionary(vec![(
                    "type".to_string(),
                    Variant::Int(u32::from(m.return_kind) as i64),
                )]),
            ),
        ])
    }

    fn class_arg(args: &[Variant]) -> String {
        match args.first() {
            Some(Variant::Str(s)) => s.clone(),
            other => panic!("class database call without a class name argument: {other:?}"),
        }
    }
}

impl EngineApi for MockEngine {
    fn global_singleton(&self, name: &str) -> Option<ObjectHandle> {
        if name == "ClassDB" {
            return Some(handle(CLASS_DB_HANDLE));
        }
        self.singletons.get(name).copied()
    }

    fn method_bind(&self, class: &str, method: &str) -> Option<MethodBind> {
        // Virtual methods have no native bind, exactly like the real engine.
        if let Some(spec) = self.classes.get(class) {
            if let Some(m) = spec.methods.iter().find(|m| m.name == method) {
                if m.flags & 32 != 0 {
                    return None;
                }
            }
        }
        self.bind_ids
            .get(&(class.to_string(), method.to_string()))
            .map(|&id| MethodBind::from_raw(id as *mut c_void))
    }

    fn ptrcall(
        &self,
        bind: MethodBind,
        receiver: ObjectHandle,
        args: &[Variant],
        _return_kind: VariantKind,
    ) -> BindResult<Variant> {
        let target = self
            .binds
            .get(&(bind.as_ptr() as usize))
            .cloned()
            .ok_or_else(|| BindError::EngineCall("pointer call on unknown bind".into()))?;

        match target {
            BindTarget::GetClassList => {
                assert_eq!(receiver, handle(CLASS_DB_HANDLE));
                Ok(Variant::StringArray(self.class_order.clone()))
            }
            BindTarget::GetParentClass => {
                let class = Self::class_arg(args);
                let parent = self
                    .classes
                    .get(&class)
                    .and_then(|c| c.parent.clone())
                    .unwrap_or_default();
                Ok(Variant::Str(parent))
            }
            BindTarget::GetMethodList => {
                let class = Self::class_arg(args);
                let methods = self
                    .classes
                    .get(&class)
                    .map(|c| c.methods.iter().map(Self::method_dict).collect())
                    .unwrap_or_default();
                Ok(Variant::Array(methods))
            }
            BindTarget::GetPropertyList => {
                let class = Self::class_arg(args);
                let props = self
                    .classes
                    .get(&class)
                    .map(|c| {
                        c.properties
                            .iter()
                            .map(|(name, kind)| {
                                Variant::Dictionary(vec![
                                    ("name".to_string(), Variant::Str(name.clone())),
                                    ("type".to_string(), Variant::Int(u32::from(*kind) as i64)),
                                ])
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(Variant::Array(props))
            }
            BindTarget::GetConstantList => {
                let class = Self::class_arg(args);
                let names = self
                    .classes
                    .get(&class)
                    .map(|c| c.constants.iter().map(|(n, _)| n.clone()).collect())
                    .unwrap_or_default();
                Ok(Variant::StringArray(names))
            }
            BindTarget::GetConstant => {
                let class = Self::class_arg(args);
                let constant = match args.get(1) {
                    Some(Variant::Str(s)) => s.clone(),
                    other => panic!("constant fetch without a constant name: {other:?}"),
                };
                let mut state = self.state.lock().unwrap();
                *state
                    .counters
                    .constant_fetches
                    .entry((class.clone(), constant.clone()))
                    .or_insert(0) += 1;
                let value = self
                    .classes
                    .get(&class)
                    .and_then(|c| c.constants.iter().find(|(n, _)| *n == constant))
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                Ok(Variant::Int(value))
            }
            BindTarget::UserMethod { class, method } => {
                let mut state = self.state.lock().unwrap();
                state
                    .counters
                    .user_calls
                    .push((class.clone(), method.clone()));
                let result = self
                    .classes
                    .get(&class)
                    .and_then(|c| c.methods.iter().find(|m| m.name == method))
                    .map(|m| m.result.clone())
                    .unwrap_or(Variant::Nil);
                Ok(result)
            }
        }
    }

    fn class_constructor(&self, class: &str) -> Option<ClassConstructor> {
        self.constructor_classes
            .iter()
            .find(|(_, c)| c.as_str() == class)
            .map(|(&id, _)| ClassConstructor::from_raw(id as *mut c_void))
    }

    fn construct(&self, _constructor: ClassConstructor) -> BindResult<ObjectHandle> {
        let mut state = self.state.lock().unwrap();
        state.next_handle += 1;
        let h = handle(state.next_handle);
        state.counters.constructed.push(h);
        Ok(h)
    }

    fn free_object(&self, h: ObjectHandle) {
        self.state.lock().unwrap().counters.freed.push(h);
    }

    fn get_property(&self, receiver: ObjectHandle, name: &str) -> BindResult<Variant> {
        let state = self.state.lock().unwrap();
        Ok(state
            .properties
            .get(&(receiver.as_ptr() as usize, name.to_string()))
            .cloned()
            .unwrap_or(Variant::Nil))
    }

    fn set_property(&self, receiver: ObjectHandle, name: &str, value: Variant) -> BindResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .properties
            .insert((receiver.as_ptr() as usize, name.to_string()), value);
        Ok(())
    }
}
