//! Response types for the agent API.

use serde::{Deserialize, Serialize};

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theoriq_uri: Option<String>,
}

/// Response from the public key endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    pub public_key: String,
    pub key_type: &'static str,
}

/// Challenge request: a hex nonce for the agent to sign.
#[derive(Deserialize)]
pub struct ChallengeRequest {
    pub nonce: String,
}

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub nonce: String,
    pub signature: String,
}
