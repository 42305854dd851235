//! Global engine service singletons.
//!
//! The engine does not expose a way to enumerate its singletons, so the
//! table is fixed. Two flavors exist:
//!
//! - Core-bound service classes whose engine class name carries a leading
//!   underscore (`_OS`); the public name drops it.
//! - Regular server classes (`AudioServer`) whose public name collides with
//!   their own class name; the class binding moves to an underscored alias
//!   and the public name becomes the singleton. Several of these also have a
//!   historical short alias (`AS`, `VS`, ...).
//!
//! Every alias resolves to its own wrapper, but all aliases of one service
//! wrap the same native handle.

/// Engine classes generated with a `_` prefix; public name is the suffix.
pub(crate) const CORE_SINGLETONS: &[(&str, &str)] = &[
    ("_ResourceLoader", "ResourceLoader"),
    ("_ResourceSaver", "ResourceSaver"),
    ("_OS", "OS"),
    ("_Geometry", "Geometry"),
    ("_ClassDB", "ClassDB"),
    ("_Engine", "Engine"),
];

/// Regular classes re-registered under an underscored name so the public
/// name can denote the singleton instance. `(underscored alias, public name)`;
/// repeated aliases are short names for the same service.
pub(crate) const RENAMED_SINGLETONS: &[(&str, &str)] = &[
    ("_AudioServer", "AudioServer"),
    ("_AudioServer", "AS"),
    ("_GlobalConfig", "GlobalConfig"),
    ("_IP", "IP"),
    ("_Input", "Input"),
    ("_InputMap", "InputMap"),
    ("_Marshalls", "Marshalls"),
    ("_Performance", "Performance"),
    ("_Physics2DServer", "Physics2DServer"),
    ("_Physics2DServer", "PS2D"),
    ("_PhysicsServer", "PhysicsServer"),
    ("_PhysicsServer", "PS"),
    ("_TranslationServer", "TranslationServer"),
    ("_TranslationServer", "TS"),
    ("_VisualServer", "VisualServer"),
    ("_VisualServer", "VS"),
];

/// Strip the underscore prefix of a renamed singleton's class alias to get
/// the engine class name it binds.
pub(crate) fn engine_class_of(underscored: &str) -> &str {
    underscored.strip_prefix('_').unwrap_or(underscored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn public_names_are_unique() {
        let mut seen = FxHashSet::default();
        for (_, public) in CORE_SINGLETONS.iter().chain(RENAMED_SINGLETONS) {
            assert!(seen.insert(*public), "duplicate public name `{public}`");
        }
    }

    #[test]
    fn aliases_share_one_internal_name() {
        let audio: Vec<_> = RENAMED_SINGLETONS
            .iter()
            .filter(|(_, public)| *public == "AudioServer" || *public == "AS")
            .collect();
        assert_eq!(audio.len(), 2);
        assert!(audio.iter().all(|(internal, _)| *internal == "_AudioServer"));
    }

    #[test]
    fn engine_class_strips_prefix() {
        assert_eq!(engine_class_of("_AudioServer"), "AudioServer");
        assert_eq!(engine_class_of("AudioServer"), "AudioServer");
    }
}
