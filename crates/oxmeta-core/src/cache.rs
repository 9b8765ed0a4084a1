//! Shared Color Profile Cache
//!
//! Profiles are keyed by name and handed out as `Arc`s, so every caller
//! asking for the same name gets the same instance. Each name has its own
//! slot: its builder runs at most once even under contention, and only
//! callers of that name wait for it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::icc::ColorProfile;

static GLOBAL_CACHE: OnceLock<ProfileCache> = OnceLock::new();

#[derive(Debug, Default)]
struct Slot {
    profile: OnceLock<Arc<ColorProfile>>,
    /// Held while the profile is being built
    building: Mutex<()>,
}

/// Name-keyed store of shared [`ColorProfile`]s
#[derive(Debug, Default)]
pub struct ProfileCache {
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache backing the built-in profiles
    ///
    /// A builder may request other names, built-ins included, from this
    /// cache. Requesting the name it is building deadlocks.
    pub fn global() -> &'static ProfileCache {
        GLOBAL_CACHE.get_or_init(ProfileCache::new)
    }

    /// Cached profile for `name`, building it with `build` on first request
    pub fn get_or_insert_with<F>(&self, name: &str, build: F) -> Arc<ColorProfile>
    where
        F: FnOnce() -> ColorProfile,
    {
        match self.try_get_or_insert_with(name, || Ok::<_, std::convert::Infallible>(build())) {
            Ok(profile) => profile,
            Err(never) => match never {},
        }
    }

    /// Like [`ProfileCache::get_or_insert_with`]; a failed build caches
    /// nothing and the next request tries again
    pub fn try_get_or_insert_with<F, E>(&self, name: &str, build: F) -> Result<Arc<ColorProfile>, E>
    where
        F: FnOnce() -> Result<ColorProfile, E>,
    {
        let slot = self.slot(name);
        if let Some(profile) = slot.profile.get() {
            return Ok(Arc::clone(profile));
        }

        let _building = slot.building.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(profile) = slot.profile.get() {
            return Ok(Arc::clone(profile));
        }
        log::trace!("caching profile '{}'", name);
        let profile = Arc::new(build()?);
        Ok(Arc::clone(slot.profile.get_or_init(|| profile)))
    }

    pub fn get(&self, name: &str) -> Option<Arc<ColorProfile>> {
        let slot = self.lock().get(name).cloned()?;
        slot.profile.get().cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.profile.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, name: &str) -> Arc<Slot> {
        let mut slots = self.lock();
        match slots.get(name) {
            Some(slot) => Arc::clone(slot),
            None => Arc::clone(slots.entry(name.to_string()).or_default()),
        }
    }

    // Slots are inserted whole and never removed, so a panic in another
    // holder does not invalidate the map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Slot>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
