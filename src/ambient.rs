//! # Ambient Registry
//!
//! A single process-wide slot holding the registry used by [`crate::each`] when no
//! registry is passed explicitly. The slot is read only when a registrar is invoked,
//! never when `each(..)` is called, so a registry may be installed after the
//! parameter set is built.
//!
//! Lookup is typed: a registrar whose bodies use context `C` and output `R` only
//! accepts a registry with the same `Context` and `Output`.

use crate::errors::Error;
use crate::registry::{Registry, SharedRegistry};
use log::debug;
use once_cell::sync::Lazy;
use std::any::{type_name, Any};
use std::sync::{Arc, PoisonError, RwLock};

type Slot = Option<Box<dyn Any + Send + Sync>>;

static AMBIENT: Lazy<RwLock<Slot>> = Lazy::new(|| RwLock::new(None));

/// Installs `registry` as the ambient registry. Returns true if one was replaced.
///
/// # Example
/// ```rust
/// use each_case::{ambient, harness::Suite};
/// use std::sync::Arc;
/// let suite = Arc::new(Suite::new());
/// ambient::install(suite);
/// assert!(ambient::is_installed());
/// ambient::clear();
/// ```
pub fn install<T: Registry + 'static>(registry: Arc<T>) -> bool {
    let shared: SharedRegistry<T::Context, T::Output> = registry;
    install_shared(shared)
}

/// Installs an already type-erased registry.
pub fn install_shared<C: 'static, R: 'static>(registry: SharedRegistry<C, R>) -> bool {
    debug!("installing ambient registry {}", type_name::<SharedRegistry<C, R>>());
    let mut slot = AMBIENT.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(Box::new(registry)).is_some()
}

/// Removes the ambient registry. Returns true if one was installed.
pub fn clear() -> bool {
    let mut slot = AMBIENT.write().unwrap_or_else(PoisonError::into_inner);
    slot.take().is_some()
}

pub fn is_installed() -> bool {
    AMBIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Looks up the ambient registry for bodies with context `C` and output `R`.
pub fn resolve<C: 'static, R: 'static>() -> Result<SharedRegistry<C, R>, Error> {
    let expected = type_name::<SharedRegistry<C, R>>();
    let slot = AMBIENT.read().unwrap_or_else(PoisonError::into_inner);
    let installed = slot
        .as_ref()
        .ok_or(Error::AmbientMissing { expected })?;
    installed
        .downcast_ref::<SharedRegistry<C, R>>()
        .cloned()
        .ok_or(Error::AmbientIncompatible { expected })
}
