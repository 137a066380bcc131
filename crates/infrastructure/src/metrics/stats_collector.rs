use ferrous_galaxy_application::ports::CacheStatsSource;
use ferrous_galaxy_domain::{CacheTier, GalaxyStats};
use prometheus::core::{Collector, Desc};
use prometheus::proto::{Counter, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::Registry;
use std::collections::HashMap;
use std::sync::Arc;

const NAMESPACE: &str = "thanos_cache_groupcache";
const TIER_LABEL: &str = "type";

/// Re-exports the engine's own counters on every scrape.
///
/// Holds no metric state: each collect builds constant samples from the
/// engine's current cumulative totals.
pub struct CacheStatsCollector {
    source: Arc<dyn CacheStatsSource>,
    gets: Desc,
    loads: Desc,
    peer_loads: Desc,
    peer_load_errors: Desc,
    backend_loads: Desc,
    backend_load_errors: Desc,
    hits: Desc,
}

impl CacheStatsCollector {
    pub fn new(source: Arc<dyn CacheStatsSource>) -> prometheus::Result<Self> {
        Ok(Self {
            source,
            gets: desc("get_requests_total", "Total number of get requests, including from peers.", &[])?,
            loads: desc("loads_total", "Total number of loads from backend (gets - cacheHits).", &[])?,
            peer_loads: desc(
                "peer_loads_total",
                "Total number of loads from peers (remote load or remote cache hit).",
                &[],
            )?,
            peer_load_errors: desc("peer_load_errors_total", "Total number of errors from peer loads.", &[])?,
            backend_loads: desc("backend_loads_total", "Total number of direct backend loads.", &[])?,
            backend_load_errors: desc(
                "backend_load_errors_total",
                "Total number of errors on direct backend loads.",
                &[],
            )?,
            hits: desc("hits_total", "Total number of cache hits.", &[TIER_LABEL])?,
        })
    }

    /// Creates the collector and registers it with `registry`.
    pub fn register(
        source: Arc<dyn CacheStatsSource>,
        registry: &Registry,
    ) -> prometheus::Result<()> {
        registry.register(Box::new(Self::new(source)?))
    }

    fn families(&self, stats: &GalaxyStats) -> Vec<MetricFamily> {
        vec![
            family(&self.gets, vec![sample(stats.gets, None)]),
            family(&self.loads, vec![sample(stats.loads, None)]),
            family(&self.peer_loads, vec![sample(stats.peer_loads, None)]),
            family(&self.peer_load_errors, vec![sample(stats.peer_load_errors, None)]),
            family(&self.backend_loads, vec![sample(stats.backend_loads, None)]),
            family(&self.backend_load_errors, vec![sample(stats.backend_load_errors, None)]),
            family(
                &self.hits,
                vec![
                    sample(stats.main_cache_hits, Some(CacheTier::Main)),
                    sample(stats.hot_cache_hits, Some(CacheTier::Hot)),
                ],
            ),
        ]
    }
}

impl Collector for CacheStatsCollector {
    fn desc(&self) -> Vec<&Desc> {
        vec![
            &self.gets,
            &self.loads,
            &self.peer_loads,
            &self.peer_load_errors,
            &self.backend_loads,
            &self.backend_load_errors,
            &self.hits,
        ]
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.families(&self.source.stats())
    }
}

fn desc(name: &str, help: &str, labels: &[&str]) -> prometheus::Result<Desc> {
    Desc::new(
        format!("{}_{}", NAMESPACE, name),
        help.to_string(),
        labels.iter().map(|l| l.to_string()).collect(),
        HashMap::new(),
    )
}

fn family(desc: &Desc, metrics: Vec<Metric>) -> MetricFamily {
    let mut family = MetricFamily::default();
    family.set_name(desc.fq_name.clone());
    family.set_help(desc.help.clone());
    family.set_field_type(MetricType::COUNTER);
    family.set_metric(metrics);
    family
}

fn sample(value: u64, tier: Option<CacheTier>) -> Metric {
    let mut counter = Counter::default();
    counter.set_value(value as f64);

    let mut metric = Metric::default();
    metric.set_counter(counter);
    if let Some(tier) = tier {
        let mut label = LabelPair::default();
        label.set_name(TIER_LABEL.to_string());
        label.set_value(tier.as_str().to_string());
        metric.set_label(vec![label]);
    }
    metric
}
