use serde::Serialize;

/// Issued on a successful login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token (in seconds)
    pub expires_in: i64,
}

/// Issued when a refresh token is exchanged, the refresh token itself is not
/// rotated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessTokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}
