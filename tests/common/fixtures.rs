use ferrous_galaxy_application::ports::CacheLoader;
use ferrous_galaxy_application::use_cases::LoadCacheEntryUseCase;
use ferrous_galaxy_domain::Config;
use ferrous_galaxy_infrastructure::galaxy::{LocalGalaxy, PeerMembership};
use ferrous_galaxy_infrastructure::storage::FilesystemObjectStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Caching rules shaped like a block storage bucket.
pub const BUCKET_CONFIG: &str = r#"
[groupcache]
self_url = "http://127.0.0.1:10902"
group = "blocks"

[[caching.rules]]
name = "metafile"
match = { suffix = "meta.json" }
content = { ttl_secs = 300 }
attributes = { ttl_secs = 300 }

[[caching.rules]]
name = "existence"
match = "any"
exists = { exists_ttl_secs = 600, absent_ttl_secs = 30 }

[[caching.rules]]
name = "block-listing"
match = { prefix = "blocks/" }
iter = { ttl_secs = 60 }

[[caching.rules]]
name = "chunks"
match = { suffix = ".dat" }
subrange = { ttl_secs = 86400 }
"#;

/// A filesystem bucket in a temp directory, removed on drop.
pub struct TestBucket {
    dir: TempDir,
}

impl TestBucket {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn with_object(self, name: &str, body: &[u8]) -> Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, body).expect("write object");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        let mut config = Config::from_toml(BUCKET_CONFIG).expect("bucket config");
        config.storage.directory = self.path().display().to_string();
        config.validate().expect("valid config");
        config
    }

    pub fn loader(&self) -> Arc<LoadCacheEntryUseCase> {
        let config = self.config();
        Arc::new(LoadCacheEntryUseCase::new(
            Arc::new(FilesystemObjectStore::new(self.path())),
            Arc::new(config.caching_policy().expect("policy")),
        ))
    }

    pub fn galaxy(&self) -> (Arc<LoadCacheEntryUseCase>, Arc<LocalGalaxy>) {
        let config = self.config();
        let loader = self.loader();
        let galaxy = LocalGalaxy::new(
            config.groupcache.group.clone(),
            config.groupcache.max_size_bytes,
            Arc::clone(&loader) as Arc<dyn CacheLoader>,
            PeerMembership::new(config.groupcache.self_url.clone()).expect("self url"),
        );
        (loader, Arc::new(galaxy))
    }
}
