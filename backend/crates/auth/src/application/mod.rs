//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_token;
pub mod verify_token;

// Re-exports
pub use config::AuthConfig;
pub use get_token::{GetTokenInput, GetTokenOutput, GetTokenUseCase};
pub use verify_token::{GateState, VerifyTokenUseCase};
