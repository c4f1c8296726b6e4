use serde::{Deserialize, Serialize};

/// Input document sent to both generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Points come back in display order; duplicates are allowed and an empty
/// list is a valid result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulletPointsResponse {
    pub bullet_points: Vec<String>,
}

/// Credential issued by the token endpoint. The server delivers the value
/// through a `token` cookie; `access_token` carries that same value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
