//! Verify Token Use Case
//!
//! The per-request gate. Each request walks
//! `Start -> TokenExtracted -> Verified -> Authorized`, or stops at
//! `Rejected` on the first failing step.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::clock::Clock;
use platform::header::extract_header;
use platform::token::Claims;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Gate progress for one request
#[derive(Debug)]
pub enum GateState {
    Start,
    TokenExtracted(String),
    Verified(Claims),
    Authorized(Claims),
    Rejected(AuthError),
}

pub struct VerifyTokenUseCase {
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl VerifyTokenUseCase {
    pub fn new(config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Advance the gate by one step
    pub fn step(&self, state: GateState, headers: &HeaderMap) -> GateState {
        match state {
            GateState::Start => match extract_header(headers, &self.config.token_header) {
                Some(token) => GateState::TokenExtracted(token),
                None => GateState::Rejected(AuthError::MissingToken),
            },
            GateState::TokenExtracted(token) => {
                match self.config.signer().verify(&token, self.clock.now()) {
                    Ok(claims) => GateState::Verified(claims),
                    Err(e) => GateState::Rejected(e.into()),
                }
            }
            // Claims do not narrow what the caller may do
            GateState::Verified(claims) => GateState::Authorized(claims),
            done @ (GateState::Authorized(_) | GateState::Rejected(_)) => done,
        }
    }

    /// Run the gate to a terminal state
    pub fn execute(&self, headers: &HeaderMap) -> AuthResult<Claims> {
        let mut state = GateState::Start;
        loop {
            state = match self.step(state, headers) {
                GateState::Authorized(claims) => return Ok(claims),
                GateState::Rejected(err) => return Err(err),
                next => next,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use platform::clock::ManualClock;

    fn setup() -> (Arc<AuthConfig>, Arc<ManualClock>, VerifyTokenUseCase) {
        let config = Arc::new(AuthConfig {
            jwt_secret: b"gate-secret".to_vec(),
            ..AuthConfig::default()
        });
        let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
        let gate = VerifyTokenUseCase::new(config.clone(), clock.clone());
        (config, clock, gate)
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("token", HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn test_walks_to_authorized() {
        let (config, clock, gate) = setup();
        let token = config.signer().issue("alice", "H", clock.now()).unwrap();
        let headers = headers_with(&token);

        let s = gate.step(GateState::Start, &headers);
        assert!(matches!(s, GateState::TokenExtracted(_)));
        let s = gate.step(s, &headers);
        assert!(matches!(s, GateState::Verified(_)));
        let s = gate.step(s, &headers);
        assert!(matches!(s, GateState::Authorized(ref c) if c.username == "alice"));
    }

    #[test]
    fn test_missing_header() {
        let (_, _, gate) = setup();
        assert!(matches!(
            gate.execute(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_blank_header_counts_as_missing() {
        let (_, _, gate) = setup();
        assert!(matches!(
            gate.execute(&headers_with("   ")),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_garbage_token() {
        let (_, _, gate) = setup();
        assert!(matches!(
            gate.execute(&headers_with("not.a.token")),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_token() {
        let (config, clock, gate) = setup();
        let token = config.signer().issue("alice", "H", clock.now()).unwrap();
        clock.advance(Duration::hours(3) + Duration::minutes(1));
        assert!(matches!(
            gate.execute(&headers_with(&token)),
            Err(AuthError::TokenExpired)
        ));
    }
}
