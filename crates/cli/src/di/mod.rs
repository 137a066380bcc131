//! Wiring of adapters into use cases

use ferrous_galaxy_api::AppState;
use ferrous_galaxy_application::ports::{
    CacheEngine, CacheLoader, CacheStatsSource, MembershipView, ObjectStore, PeerResolver,
};
use ferrous_galaxy_application::use_cases::{
    FetchCacheEntriesUseCase, GetCacheStatsUseCase, LoadCacheEntryUseCase, RefreshPeersUseCase,
};
use ferrous_galaxy_domain::config::DnsSdResolverKind;
use ferrous_galaxy_domain::Config;
use ferrous_galaxy_infrastructure::discovery::{DnsPeerResolver, SystemLookup, WireLookup};
use ferrous_galaxy_infrastructure::galaxy::{LocalGalaxy, PeerMembership};
use ferrous_galaxy_infrastructure::metrics::{CacheStatsCollector, DiscoveryMetrics};
use ferrous_galaxy_infrastructure::storage::FilesystemObjectStore;
use prometheus::Registry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct Services {
    pub galaxy: Arc<LocalGalaxy>,
    pub refresh_peers: Arc<RefreshPeersUseCase>,
    pub app_state: AppState,
}

impl Services {
    pub fn build(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let registry = Arc::new(Registry::new());

        let store: Arc<dyn ObjectStore> =
            Arc::new(FilesystemObjectStore::new(&config.storage.directory));
        let loader: Arc<dyn CacheLoader> = Arc::new(
            LoadCacheEntryUseCase::new(store, Arc::new(config.caching_policy()?))
                .with_unconfigured_path_action(config.caching.on_unconfigured_path),
        );

        let galaxy = Arc::new(
            LocalGalaxy::new(
                config.groupcache.group.clone(),
                config.groupcache.max_size_bytes,
                loader,
                PeerMembership::new(config.groupcache.self_url.clone())?,
            )
            .with_cancellation(shutdown),
        );

        let stats_source: Arc<dyn CacheStatsSource> = galaxy.clone();
        CacheStatsCollector::register(Arc::clone(&stats_source), &registry)?;

        let discovery_metrics = Arc::new(DiscoveryMetrics::new(&registry)?);
        let resolver = build_resolver(config, discovery_metrics)?;

        let membership: Arc<dyn MembershipView> = galaxy.clone();
        let refresh_peers = Arc::new(
            RefreshPeersUseCase::new(
                resolver,
                Arc::clone(&membership),
                config.groupcache.effective_peers(),
            )
            .with_resolve_timeout(Duration::from_millis(config.groupcache.dns_timeout_ms)),
        );

        let engine: Arc<dyn CacheEngine> = galaxy.clone();
        let app_state = AppState {
            engine: Arc::clone(&engine),
            get_stats: Arc::new(GetCacheStatsUseCase::new(stats_source)),
            fetch_entries: Arc::new(FetchCacheEntriesUseCase::new(engine)),
            membership,
            registry,
        };

        info!(
            group = %config.groupcache.group,
            max_size_bytes = config.groupcache.max_size_bytes,
            storage = %config.storage.directory,
            "Services initialized"
        );

        Ok(Self {
            galaxy,
            refresh_peers,
            app_state,
        })
    }
}

fn build_resolver(
    config: &Config,
    metrics: Arc<DiscoveryMetrics>,
) -> anyhow::Result<Arc<dyn PeerResolver>> {
    let timeout = Duration::from_millis(config.groupcache.dns_timeout_ms);

    let resolver: Arc<dyn PeerResolver> = match config.groupcache.dns_sd_resolver {
        DnsSdResolverKind::System => {
            Arc::new(DnsPeerResolver::new(SystemLookup::new(timeout)).with_metrics(metrics))
        }
        DnsSdResolverKind::Wire => {
            let lookup = match config.groupcache.nameserver.as_deref() {
                Some(nameserver) => WireLookup::new(nameserver.parse::<SocketAddr>()?, timeout),
                None => WireLookup::from_system_config(timeout)?,
            };
            info!(nameserver = %lookup.nameserver(), "Using wire DNS resolver for peer discovery");
            Arc::new(DnsPeerResolver::new(lookup).with_metrics(metrics))
        }
    };

    Ok(resolver)
}
