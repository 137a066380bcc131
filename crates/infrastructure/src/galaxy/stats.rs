use ferrous_galaxy_domain::{CacheTier, GalaxyStats};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters behind [`GalaxyStats`] snapshots.
#[derive(Debug, Default)]
pub struct GalaxyCounters {
    gets: AtomicU64,
    loads: AtomicU64,
    peer_loads: AtomicU64,
    peer_load_errors: AtomicU64,
    backend_loads: AtomicU64,
    backend_load_errors: AtomicU64,
    main_cache_hits: AtomicU64,
    hot_cache_hits: AtomicU64,
}

impl GalaxyCounters {
    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self, tier: CacheTier) {
        match tier {
            CacheTier::Main => self.main_cache_hits.fetch_add(1, Ordering::Relaxed),
            CacheTier::Hot => self.hot_cache_hits.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_load(&self, ok: bool) {
        self.peer_loads.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.peer_load_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_backend_load(&self, ok: bool) {
        self.backend_loads.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.backend_load_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> GalaxyStats {
        GalaxyStats {
            gets: self.gets.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_load_errors: self.peer_load_errors.load(Ordering::Relaxed),
            backend_loads: self.backend_loads.load(Ordering::Relaxed),
            backend_load_errors: self.backend_load_errors.load(Ordering::Relaxed),
            main_cache_hits: self.main_cache_hits.load(Ordering::Relaxed),
            hot_cache_hits: self.hot_cache_hits.load(Ordering::Relaxed),
        }
    }
}
