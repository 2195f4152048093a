//! Manual LIVIN DNA edits

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::design::DesignState;

/// Request body of `POST /api/dna/update`
#[derive(Debug, Deserialize)]
pub struct DnaUpdateRequest {
    pub state: DesignState,
    pub updated_dna: Vec<String>,
}

/// Response carrying the edited state
#[derive(Debug, Serialize)]
pub struct DnaUpdateResponse {
    pub updated_state: DesignState,
}

/// POST /api/dna/update - Replace the DNA keywords chosen by the user
///
/// Only the first eight keywords are kept; the rest of the state is echoed back.
pub async fn update_dna(Json(request): Json<DnaUpdateRequest>) -> Json<DnaUpdateResponse> {
    Json(DnaUpdateResponse {
        updated_state: request.state.with_livin_dna(&request.updated_dna),
    })
}
