use crate::{dto::PeersResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_peers")]
pub async fn get_peers(State(state): State<AppState>) -> Json<PeersResponse> {
    let peers = state.membership.peers();
    debug!(count = peers.len(), "Fetching cache peers");

    Json(PeersResponse {
        count: peers.len(),
        peers: peers.to_vec(),
    })
}
