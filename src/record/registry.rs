//! Process-wide mapping from class name to class descriptor, per
//! `spec.md` §3.4.
//!
//! [`Registry`] is a plain, independently constructible value — per
//! `spec.md` §9's note on preferring an interface abstraction over bare
//! module state, [`crate::record::encode_record`] and
//! [`crate::record::decode_record`] both take a `&Registry` explicitly.
//! The `sync` feature additionally exposes a process-default singleton
//! (behind a [`std::sync::OnceLock`] + [`parking_lot::RwLock`], the same
//! shape `vitte-hal` uses for its own global state) for callers who don't
//! need to thread a registry handle through their whole call graph.
//!
//! Thread-safety is explicitly out of scope beyond what the lock gives
//! you for free: concurrent *mutation* of one `Registry` from multiple
//! threads without synchronization is undefined, per `spec.md` §5.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String, vec::Vec};

use crate::record::class::ClassDescriptor;

/// Errors raised by registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// [`Registry::register`] was called with a class name that is already
    /// present.
    #[error("class `{class_name}` is already registered")]
    AlreadyRegistered {
        /// The class name that collided.
        class_name: String,
    },
}

/// A mapping from class name to [`ClassDescriptor`].
///
/// `spec.md` §9 ("forward references among nested classes") is preserved:
/// registering class `A` whose fields reference a not-yet-registered class
/// `B` is not rejected here — the check is deferred to encode/decode time
/// (see [`crate::record::encode_record`]/[`crate::record::decode_record`]).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: BTreeMap<String, ClassDescriptor>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { classes: BTreeMap::new() }
    }

    /// Register `descriptor` under its own `class_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the name is already
    /// present; the existing entry is left untouched.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, descriptor), fields(class = descriptor.class_name())))]
    pub fn register(&mut self, descriptor: ClassDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.class_name().to_owned();
        if self.classes.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered { class_name: name });
        }
        self.classes.insert(name, descriptor);
        Ok(())
    }

    /// Remove `class_name`. Idempotent: returns `true` if an entry was
    /// removed, `false` if there was nothing to remove (including a second
    /// call for the same name).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn unregister(&mut self, class_name: &str) -> bool {
        self.classes.remove(class_name).is_some()
    }

    /// Look up a class descriptor by name.
    #[must_use]
    pub fn get(&self, class_name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(class_name)
    }

    /// `true` if `class_name` currently has a registered descriptor.
    #[must_use]
    pub fn is_registered(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// All registered class names, in ascending order.
    #[must_use]
    pub fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Remove every registered class. Primarily for test isolation
    /// (`spec.md` §3.4).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}

#[cfg(feature = "sync")]
mod global {
    use super::{Registry, RegistryError};
    use crate::record::class::ClassDescriptor;
    use parking_lot::RwLock;
    use std::sync::OnceLock;

    #[cfg(not(feature = "std"))]
    use alloc::{string::String, vec::Vec};
    #[cfg(feature = "std")]
    use std::{string::String, vec::Vec};

    static DEFAULT: OnceLock<RwLock<Registry>> = OnceLock::new();

    fn default_registry() -> &'static RwLock<Registry> {
        DEFAULT.get_or_init(|| RwLock::new(Registry::new()))
    }

    /// Register `descriptor` in the process-default registry.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(descriptor), fields(class = descriptor.class_name())))]
    pub fn register_class(descriptor: ClassDescriptor) -> Result<(), RegistryError> {
        #[cfg(feature = "tracing")]
        tracing::trace!("registering class");
        default_registry().write().register(descriptor)
    }

    /// Remove `class_name` from the process-default registry.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn unregister_class(class_name: &str) -> bool {
        #[cfg(feature = "tracing")]
        tracing::trace!("unregistering class");
        default_registry().write().unregister(class_name)
    }

    /// Look up a class descriptor in the process-default registry.
    #[must_use]
    pub fn get_class_metadata(class_name: &str) -> Option<ClassDescriptor> {
        default_registry().read().get(class_name).cloned()
    }

    /// All class names registered in the process-default registry, in
    /// ascending order.
    #[must_use]
    pub fn registered_class_names() -> Vec<String> {
        default_registry().read().class_names()
    }

    /// Remove every class from the process-default registry. Primarily for
    /// test isolation.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn clear_registry() {
        default_registry().write().clear();
    }
}

#[cfg(feature = "sync")]
pub use global::{clear_registry, get_class_metadata, register_class, registered_class_names, unregister_class};
