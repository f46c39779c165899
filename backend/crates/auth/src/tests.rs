//! Scenario tests for the auth crate
//!
//! Drive the HTTP router with an in-process credential store and a pinned
//! clock.

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::{Extension, Router};
    use chrono::Duration;
    use http_body_util::BodyExt;
    use platform::clock::{Clock, ManualClock};
    use platform::token::Claims;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::credential::Credential;
    use crate::domain::repository::CredentialRepository;
    use crate::error::{AuthError, AuthResult};
    use crate::presentation::middleware::{TokenGateState, require_token};
    use crate::presentation::router::auth_router_generic;

    #[derive(Clone, Default)]
    struct FakeCredentials {
        known: Vec<Credential>,
        down: bool,
    }

    impl CredentialRepository for FakeCredentials {
        async fn exists(&self, credential: &Credential) -> AuthResult<bool> {
            if self.down {
                return Err(AuthError::Database(sqlx::Error::PoolClosed));
            }
            Ok(self.known.iter().any(|c| c == credential))
        }
    }

    struct Harness {
        app: Router,
        clock: Arc<ManualClock>,
        config: Arc<AuthConfig>,
    }

    fn harness(repo: FakeCredentials, config: AuthConfig) -> Harness {
        let config = Arc::new(config);
        let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
        let gate = TokenGateState {
            config: config.clone(),
            clock: clock.clone(),
        };

        let guarded = Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<Claims>| async move { claims.username }),
            )
            .layer(from_fn_with_state(gate, require_token));

        let app = auth_router_generic(repo, config.clone(), clock.clone()).merge(guarded);

        Harness { app, clock, config }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: b"integration-secret".to_vec(),
            ..AuthConfig::default()
        }
    }

    fn seeded() -> FakeCredentials {
        FakeCredentials {
            known: vec![Credential::from_plain("test", "test123")],
            down: false,
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn whoami(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header("token", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_get_token_with_query() {
        let h = harness(seeded(), test_config());

        let (status, json) = send(&h.app, get_req("/auth?username=test&password=test123")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 200);
        assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_get_token_with_json() {
        let h = harness(seeded(), test_config());

        let req = Request::builder()
            .method("POST")
            .uri("/auth")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"test","password":"test123"}"#))
            .unwrap();
        let (status, json) = send(&h.app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 200);
    }

    #[tokio::test]
    async fn test_wrong_password_is_error_auth() {
        let h = harness(seeded(), test_config());

        let (status, json) = send(&h.app, get_req("/auth?username=test&password=nope")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 20004);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_missing_fields_are_invalid_params() {
        let h = harness(seeded(), test_config());

        let (status, json) = send(&h.app, get_req("/auth?username=test")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_params() {
        let h = harness(seeded(), test_config());

        let req = Request::builder()
            .method("POST")
            .uri("/auth")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(&h.app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
    }

    #[tokio::test]
    async fn test_store_outage_is_server_error() {
        let repo = FakeCredentials {
            down: true,
            ..seeded()
        };
        let h = harness(repo, test_config());

        let (status, json) = send(&h.app, get_req("/auth?username=test&password=test123")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], 20001);
    }

    #[tokio::test]
    async fn test_missing_signing_key_is_error_auth_token() {
        let h = harness(seeded(), AuthConfig::default());

        let (status, json) = send(&h.app, get_req("/auth?username=test&password=test123")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], 20003);
    }

    #[tokio::test]
    async fn test_gate_accepts_issued_token() {
        let h = harness(seeded(), test_config());
        let (_, json) = send(&h.app, get_req("/auth?username=test&password=test123")).await;
        let token = json["data"]["token"].as_str().unwrap().to_string();

        let response = h.app.clone().oneshot(whoami(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"test");
    }

    #[tokio::test]
    async fn test_gate_without_token() {
        let h = harness(seeded(), test_config());

        let (status, json) = send(&h.app, whoami(None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 400);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_gate_with_forged_token() {
        let h = harness(seeded(), test_config());
        let other = AuthConfig {
            jwt_secret: b"someone-else".to_vec(),
            ..AuthConfig::default()
        };
        let forged = other.signer().issue("test", "x", h.clock.now()).unwrap();

        let (status, json) = send(&h.app, whoami(Some(&forged))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 20001);
    }

    #[tokio::test]
    async fn test_gate_with_expired_token() {
        let h = harness(seeded(), test_config());
        let token = h.config.signer().issue("test", "x", h.clock.now()).unwrap();

        h.clock.advance(Duration::hours(2) + Duration::minutes(59));
        let (status, _) = send(&h.app, whoami(Some(&token))).await;
        assert_eq!(status, StatusCode::OK);

        h.clock.advance(Duration::minutes(2));
        let (status, json) = send(&h.app, whoami(Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 20002);
    }

    #[tokio::test]
    async fn test_token_survives_password_rotation() {
        let h = harness(seeded(), test_config());
        let (_, json) = send(&h.app, get_req("/auth?username=test&password=test123")).await;
        let token = json["data"]["token"].as_str().unwrap().to_string();

        // The gate never consults the credential store
        let rotated = harness(FakeCredentials::default(), (*h.config).clone());
        let (status, _) = send(&rotated.app, whoami(Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
