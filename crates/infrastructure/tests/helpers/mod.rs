#![allow(dead_code)]

pub mod mock_loader;
pub mod mock_lookup;

pub use dns_server_mock::{MockDnsServer, MockZone};
pub use mock_loader::CountingLoader;
pub use mock_lookup::MockLookup;
