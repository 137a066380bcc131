use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct PeersResponse {
    pub peers: Vec<String>,
    pub count: usize,
}
