use ferrous_galaxy_domain::{CliOverrides, Config};
use tracing::info;

/// Loads and validates configuration. Runs before logging is set up, so
/// failures surface through the returned error.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config_summary(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        web_port = config.server.web_port,
        bind = %config.server.bind_address,
        group = %config.groupcache.group,
        self_url = %config.groupcache.self_url,
        peers = ?config.groupcache.effective_peers(),
        rules = config.caching.rules.len(),
        "Configuration loaded"
    );
}
