use prometheus::{IntCounter, IntGaugeVec, Opts, Registry};

const NAMESPACE: &str = "thanos_store_groupcache";

/// Counters for the DNS peer provider.
pub struct DiscoveryMetrics {
    lookups: IntCounter,
    failures: IntCounter,
    results: IntGaugeVec,
}

impl DiscoveryMetrics {
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let lookups = IntCounter::with_opts(
            Opts::new("dns_lookups_total", "The number of DNS lookups resolutions attempts")
                .namespace(NAMESPACE),
        )?;
        let failures = IntCounter::with_opts(
            Opts::new("dns_failures_total", "The number of DNS lookup failures")
                .namespace(NAMESPACE),
        )?;
        let results = IntGaugeVec::new(
            Opts::new("dns_provider_results", "The number of resolved endpoints for each configured address")
                .namespace(NAMESPACE),
            &["addr"],
        )?;

        registry.register(Box::new(lookups.clone()))?;
        registry.register(Box::new(failures.clone()))?;
        registry.register(Box::new(results.clone()))?;

        Ok(Self {
            lookups,
            failures,
            results,
        })
    }

    pub fn record_lookup(&self) {
        self.lookups.inc();
    }

    pub fn record_failure(&self) {
        self.failures.inc();
    }

    pub fn record_results(&self, address: &str, count: usize) {
        self.results
            .with_label_values(&[address])
            .set(count as i64);
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.get()
    }

    pub fn failures(&self) -> u64 {
        self.failures.get()
    }

    pub fn results(&self, address: &str) -> i64 {
        self.results.with_label_values(&[address]).get()
    }
}
