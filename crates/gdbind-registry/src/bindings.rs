//! Lazy binding registry.
//!
//! The registry is the consumer-facing surface: every engine class name and
//! every singleton public name is a registered entry. Initialization only
//! enumerates and validates - synthesis happens on first resolution, parent
//! chain first, and the result is memoized for the lifetime of the process.
//!
//! Resolution is at-most-once per name: the registry mutex is held across
//! synthesis, and parent recursion runs on the locked state, so two racing
//! resolvers can never produce two distinct bound types for one name.

use std::sync::{Arc, Mutex};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use gdbind_core::{BindError, BindResult, EngineApi};

use crate::bound_class::BoundClass;
use crate::class_db::ClassDb;
use crate::instance::Instance;
use crate::order::hierarchy_order;
use crate::singletons::{CORE_SINGLETONS, RENAMED_SINGLETONS, engine_class_of};

/// A resolved binding: either a bound type or a wrapped service singleton.
#[derive(Debug, Clone)]
pub enum Binding {
    Class(Arc<BoundClass>),
    Singleton(Arc<Instance>),
}

impl Binding {
    pub fn as_class(&self) -> Option<&Arc<BoundClass>> {
        match self {
            Binding::Class(class) => Some(class),
            Binding::Singleton(_) => None,
        }
    }

    pub fn as_singleton(&self) -> Option<&Arc<Instance>> {
        match self {
            Binding::Singleton(instance) => Some(instance),
            Binding::Class(_) => None,
        }
    }
}

/// A registered but not-yet-executed synthesis.
#[derive(Debug, Clone)]
enum Deferred {
    /// Synthesize the bound type for an engine class.
    Class { class_name: String },
    /// Wrap the engine's singleton instance for `service`, typed as the
    /// already-registered class entry `internal`.
    Singleton { internal: String, service: String },
}

#[derive(Debug)]
enum Entry {
    Deferred(Deferred),
    Resolved(Binding),
}

/// Process-wide table of every bindable public name.
pub struct Bindings {
    api: Arc<dyn EngineApi>,
    class_db: ClassDb,
    state: Mutex<FxHashMap<String, Entry>>,
}

impl Bindings {
    /// Enumerate the engine's classes, validate the hierarchy, and register
    /// one deferred entry per class plus the singleton table.
    ///
    /// No bound type is synthesized here; a broken hierarchy (cycle or
    /// dangling parent) fails fast instead of failing on some later access.
    pub fn new(api: Arc<dyn EngineApi>) -> BindResult<Self> {
        let class_db = ClassDb::new(api.clone())?;

        let unordered = class_db.class_list()?;
        let ordered = hierarchy_order(&unordered, |class| class_db.parent_class(class))?;

        let mut entries: FxHashMap<String, Entry> = FxHashMap::default();
        for class_name in ordered {
            entries.insert(
                class_name.clone(),
                Entry::Deferred(Deferred::Class { class_name }),
            );
        }

        for (internal, public) in CORE_SINGLETONS {
            entries.insert(
                (*public).to_string(),
                Entry::Deferred(Deferred::Singleton {
                    internal: (*internal).to_string(),
                    service: (*public).to_string(),
                }),
            );
        }

        for (internal, public) in RENAMED_SINGLETONS {
            // Keep the shadowed class reachable under its underscored alias.
            entries.entry((*internal).to_string()).or_insert_with(|| {
                Entry::Deferred(Deferred::Class {
                    class_name: engine_class_of(internal).to_string(),
                })
            });
            entries.insert(
                (*public).to_string(),
                Entry::Deferred(Deferred::Singleton {
                    internal: (*internal).to_string(),
                    service: (*public).to_string(),
                }),
            );
        }

        debug!("registered {} binding names", entries.len());

        Ok(Self {
            api,
            class_db,
            state: Mutex::new(entries),
        })
    }

    /// All registered public names, sorted, without forcing any resolution.
    pub fn names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = state.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Whether a name has already been resolved. Never forces.
    pub fn is_resolved(&self, name: &str) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        matches!(state.get(name), Some(Entry::Resolved(_)))
    }

    /// Resolve a public name, synthesizing and caching on first access.
    ///
    /// Idempotent and memoized: resolving the same name twice returns the
    /// identical cached value.
    pub fn resolve(&self, name: &str) -> BindResult<Binding> {
        let mut state = self.state.lock()?;
        self.resolve_locked(&mut state, name)
    }

    fn resolve_locked(
        &self,
        state: &mut FxHashMap<String, Entry>,
        name: &str,
    ) -> BindResult<Binding> {
        let deferred = match state.get(name) {
            None => return Err(BindError::UnknownName(name.to_string())),
            Some(Entry::Resolved(binding)) => return Ok(binding.clone()),
            Some(Entry::Deferred(deferred)) => deferred.clone(),
        };

        trace!("resolving `{name}`");
        let binding = match deferred {
            Deferred::Class { class_name } => {
                let parent = match self.class_db.parent_class(&class_name)? {
                    Some(parent_name) => {
                        let parent = self.resolve_locked(state, &parent_name)?;
                        let parent = parent.as_class().cloned().ok_or_else(|| {
                            BindError::BrokenHierarchy(format!(
                                "parent `{parent_name}` of `{class_name}` is not a class binding"
                            ))
                        })?;
                        Some(parent)
                    }
                    None => None,
                };
                let class = BoundClass::synthesize(
                    self.api.clone(),
                    &self.class_db,
                    &class_name,
                    name,
                    parent,
                )?;
                Binding::Class(Arc::new(class))
            }
            Deferred::Singleton { internal, service } => {
                let class = self
                    .resolve_locked(state, &internal)?
                    .as_class()
                    .cloned()
                    .ok_or_else(|| {
                        BindError::BrokenHierarchy(format!(
                            "singleton `{service}` refers to `{internal}`, which is not a class"
                        ))
                    })?;
                let handle = self
                    .api
                    .global_singleton(&service)
                    .ok_or_else(|| BindError::MissingSingleton(service.clone()))?;
                Binding::Singleton(Arc::new(Instance::from_handle(class, handle)))
            }
        };

        state.insert(name.to_string(), Entry::Resolved(binding.clone()));
        Ok(binding)
    }
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let resolved = state
            .values()
            .filter(|e| matches!(e, Entry::Resolved(_)))
            .count();
        f.debug_struct("Bindings")
            .field("registered", &state.len())
            .field("resolved", &resolved)
            .finish()
    }
}
