use ferrous_galaxy_domain::DomainError;
use std::net::IpAddr;

/// How a configured peer address is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// No prefix: used verbatim.
    Static,
    /// `dns+`: A/AAAA lookup.
    A,
    /// `dnssrv+`: SRV lookup, then A/AAAA lookup of every target.
    Srv,
    /// `dnssrvnoa+`: SRV lookup, targets used as hostnames.
    SrvNoA,
}

impl QueryType {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "dns" => Some(Self::A),
            "dnssrv" => Some(Self::Srv),
            "dnssrvnoa" => Some(Self::SrvNoA),
            _ => None,
        }
    }
}

/// A configured peer address split into the parts discovery needs.
///
/// `dns+http://galaxy-store:10902/` becomes scheme `http://`, host
/// `galaxy-store`, port `10902`, suffix `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    pub raw: String,
    pub qtype: QueryType,
    pub scheme: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub suffix: String,
}

impl PeerAddress {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let (qtype, rest) = match raw.split_once('+') {
            Some((prefix, rest)) => {
                let qtype = QueryType::from_prefix(prefix).ok_or_else(|| {
                    DomainError::InvalidPeerAddress(format!(
                        "unknown discovery prefix '{}+' in '{}'",
                        prefix, raw
                    ))
                })?;
                (qtype, rest)
            }
            None => (QueryType::Static, raw),
        };

        if qtype == QueryType::Static {
            return Ok(Self {
                raw: raw.to_string(),
                qtype,
                scheme: None,
                host: raw.to_string(),
                port: None,
                suffix: String::new(),
            });
        }

        let (scheme, rest) = match rest.split_once("://") {
            Some((scheme, rest)) => (Some(format!("{}://", scheme)), rest),
            None => (None, rest),
        };

        let (authority, suffix) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        let (host, port) = split_host_port(authority, raw)?;
        if host.is_empty() {
            return Err(DomainError::InvalidPeerAddress(format!(
                "missing host in '{}'",
                raw
            )));
        }
        if qtype == QueryType::A && port.is_none() {
            return Err(DomainError::InvalidPeerAddress(format!(
                "missing port in address given for dns lookup: {}",
                raw
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
            qtype,
            scheme,
            host,
            port,
            suffix: suffix.to_string(),
        })
    }

    /// Re-assembles an address around a discovered host and port.
    pub fn render(&self, host: &str, port: u16) -> String {
        format!(
            "{}{}:{}{}",
            self.scheme.as_deref().unwrap_or(""),
            bracket_ipv6(host),
            port,
            self.suffix
        )
    }

    pub fn render_ip(&self, ip: IpAddr, port: u16) -> String {
        self.render(&ip.to_string(), port)
    }
}

fn split_host_port(authority: &str, raw: &str) -> Result<(String, Option<u16>), DomainError> {
    // [v6]:port or [v6]
    if let Some(rest) = authority.strip_prefix('[') {
        let (host, after) = rest.split_once(']').ok_or_else(|| {
            DomainError::InvalidPeerAddress(format!("unterminated '[' in '{}'", raw))
        })?;
        let port = match after.strip_prefix(':') {
            Some(p) => Some(parse_port(p, raw)?),
            None if after.is_empty() => None,
            None => {
                return Err(DomainError::InvalidPeerAddress(format!(
                    "unexpected '{}' after ']' in '{}'",
                    after, raw
                )))
            }
        };
        return Ok((host.to_string(), port));
    }

    match authority.rsplit_once(':') {
        Some((host, port)) => Ok((host.to_string(), Some(parse_port(port, raw)?))),
        None => Ok((authority.to_string(), None)),
    }
}

fn parse_port(port: &str, raw: &str) -> Result<u16, DomainError> {
    port.parse::<u16>()
        .map_err(|_| DomainError::InvalidPeerAddress(format!("invalid port '{}' in '{}'", port, raw)))
}

fn bracket_ipv6(host: &str) -> String {
    if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}
