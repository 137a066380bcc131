use ferrous_galaxy_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::IpAddr;
use tracing::{debug, warn};

use super::lookup::SrvTarget;

/// Answers relevant to discovery, extracted from one response.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryAnswer {
    pub addresses: Vec<IpAddr>,
    pub srv: Vec<SrvTarget>,
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a response to the query with ID `expected_id`.
    ///
    /// NXDOMAIN is an empty answer, not an error: the name simply has no
    /// peers behind it right now. Server failures are errors.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<DiscoveryAnswer, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::PeerResolution(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::PeerResolution(format!(
                "DNS response ID mismatch: expected {}, got {}",
                expected_id,
                message.id()
            )));
        }

        let rcode = message.response_code();
        match rcode {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => {
                debug!("DNS name does not exist");
                return Ok(DiscoveryAnswer::default());
            }
            other => {
                return Err(DomainError::PeerResolution(format!(
                    "DNS server answered {}",
                    Self::rcode_to_status(other)
                )))
            }
        }

        if message.truncated() {
            warn!("Truncated DNS response, using partial answer section");
        }

        let mut answer = DiscoveryAnswer::default();

        for record in message.answers() {
            match record.data() {
                RData::A(a) => answer.addresses.push(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => answer.addresses.push(IpAddr::V6(aaaa.0)),
                RData::SRV(srv) => answer.srv.push(SrvTarget {
                    target: srv.target().to_utf8().trim_end_matches('.').to_string(),
                    port: srv.port(),
                }),
                _ => {}
            }
        }

        debug!(
            addresses = answer.addresses.len(),
            srv = answer.srv.len(),
            "DNS response parsed"
        );

        Ok(answer)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
