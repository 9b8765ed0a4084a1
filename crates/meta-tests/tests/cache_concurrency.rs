//! Profile cache under contention

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use oxmeta_core::icc::{BUILTIN_NAMES, ColorProfile, IccError};
use oxmeta_core::{ImageProfile, ProfileCache};
use rayon::prelude::*;

#[test]
fn test_builtin_requests_share_one_instance() {
    let profiles: Vec<Arc<ColorProfile>> = (0..256)
        .into_par_iter()
        .map(|i| ColorProfile::builtin(BUILTIN_NAMES[i % BUILTIN_NAMES.len()]).unwrap())
        .collect();

    for (i, profile) in profiles.iter().enumerate() {
        let first = &profiles[i % BUILTIN_NAMES.len()];
        assert!(Arc::ptr_eq(profile, first));
    }
    for name in BUILTIN_NAMES {
        assert!(ProfileCache::global().contains(name));
    }
}

#[test]
fn test_builder_runs_once_per_name() {
    let cache = ProfileCache::new();
    let builds = AtomicUsize::new(0);
    let template = ColorProfile::srgb();

    let results: Vec<(usize, Arc<ColorProfile>)> = (0..512usize)
        .into_par_iter()
        .map(|i| {
            let key = i % 4;
            let profile = cache.get_or_insert_with(&format!("profile-{}", key), || {
                builds.fetch_add(1, Ordering::SeqCst);
                template.as_ref().clone()
            });
            (key, profile)
        })
        .collect();

    assert_eq!(builds.load(Ordering::SeqCst), 4);
    assert_eq!(cache.len(), 4);
    for (key, profile) in &results {
        let cached = cache.get(&format!("profile-{}", key)).unwrap();
        assert!(Arc::ptr_eq(profile, &cached));
    }
}

#[test]
fn test_fallible_builder_under_contention() {
    let cache = ProfileCache::new();
    let data = ColorProfile::apple_rgb().to_byte_array();
    let attempts = AtomicUsize::new(0);

    let results: Vec<Result<Arc<ColorProfile>, IccError>> = (0..64)
        .into_par_iter()
        .map(|_| {
            cache.try_get_or_insert_with("apple", || {
                // The first attempt fails; failures are not cached
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    ColorProfile::from_bytes(&data[..64])
                } else {
                    ColorProfile::from_bytes(&data)
                }
            })
        })
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    let cached = cache.get("apple").unwrap();
    for profile in results.into_iter().flatten() {
        assert!(Arc::ptr_eq(&profile, &cached));
    }
    assert_eq!(cached.name(), "icc");
    assert_eq!(cached.to_byte_array(), data);
}
