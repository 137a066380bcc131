//! DNS service discovery for cache peers
//!
//! - `address`: `dns+` / `dnssrv+` / `dnssrvnoa+` address grammar
//! - `lookup`: A/AAAA and SRV lookups (system resolver or raw UDP)
//! - `message_builder` / `response_parser`: DNS wire format via hickory-proto
//! - `udp`: single-shot UDP exchange with a nameserver
//! - `resolv_conf`: nameserver discovery from `/etc/resolv.conf`
//! - `provider`: the `PeerResolver` tying it together

pub mod address;
pub mod lookup;
pub mod message_builder;
pub mod provider;
pub mod resolv_conf;
pub mod response_parser;
pub mod udp;

pub use address::{PeerAddress, QueryType};
pub use lookup::{DnsLookup, SrvTarget, SystemLookup, WireLookup};
pub use provider::DnsPeerResolver;
