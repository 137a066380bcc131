use ferrous_galaxy_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

const DNS_PORT: u16 = 53;

/// Nameservers listed in a resolv.conf document, in file order.
pub fn parse_nameservers(contents: &str) -> Vec<SocketAddr> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => {
                    // Drop an IPv6 zone suffix (fe80::1%eth0).
                    let addr = addr.split('%').next().unwrap_or(addr);
                    addr.parse::<IpAddr>()
                        .ok()
                        .map(|ip| SocketAddr::new(ip, DNS_PORT))
                }
                _ => None,
            }
        })
        .collect()
}

/// First nameserver of the system resolver configuration. Startup only.
pub fn system_nameserver() -> Result<SocketAddr, DomainError> {
    let contents = std::fs::read_to_string(RESOLV_CONF_PATH)
        .map_err(|e| read_error(Path::new(RESOLV_CONF_PATH), e))?;

    first_nameserver(&contents, Path::new(RESOLV_CONF_PATH))
}

/// First nameserver of the resolv.conf at `path`, read without blocking
/// the runtime.
pub async fn nameserver_from(path: &Path) -> Result<SocketAddr, DomainError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| read_error(path, e))?;

    first_nameserver(&contents, path)
}

fn first_nameserver(contents: &str, path: &Path) -> Result<SocketAddr, DomainError> {
    parse_nameservers(contents).into_iter().next().ok_or_else(|| {
        DomainError::PeerResolution(format!("No nameserver found in {}", path.display()))
    })
}

fn read_error(path: &Path, error: std::io::Error) -> DomainError {
    DomainError::PeerResolution(format!("Failed to read {}: {}", path.display(), error))
}
