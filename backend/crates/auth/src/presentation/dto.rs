//! API DTOs (Data Transfer Objects)

use platform::validation::{Constraint::*, Rule, Validate, Value};
use serde::{Deserialize, Serialize};

// ============================================================================
// Get Token
// ============================================================================

/// Credentials, from the query string (`GET`) or a JSON body (`POST`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Validate for AuthRequest {
    const RULES: &'static [Rule] = &[
        Rule::new("username", &[Required, MaxSize(50)]),
        Rule::new("password", &[Required, MaxSize(50)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "username" => (&self.username).into(),
            "password" => (&self.password).into(),
            _ => Value::Missing,
        }
    }
}

/// Get token response payload
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
